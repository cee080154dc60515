//! Scripted collaborators shared by the integration tests.
#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use hrm_console::domain::company::Company;
use hrm_console::domain::permission::PermissionFlag;
use hrm_console::dto::envelope::ResponseEnvelope;
use hrm_console::dto::query::QueryParams;
use hrm_console::repository::errors::{GatewayError, GatewayResult};
use hrm_console::repository::permissions::StaticPermissionResolver;
use hrm_console::repository::{Endpoint, ExportSink, QueryGateway};
use hrm_console::services::list::{ListController, ListOptions};
use serde_json::{Value, json};
use tokio::sync::oneshot;

type Reply = GatewayResult<ResponseEnvelope>;

enum Scripted {
    Ready(Reply),
    Gated(oneshot::Receiver<Reply>),
}

/// Gateway answering reads and deletes from queues filled by the test.
///
/// Reads with nothing queued get an empty first page.
#[derive(Default)]
pub struct ScriptedGateway {
    reads: Mutex<VecDeque<Scripted>>,
    deletes: Mutex<VecDeque<Reply>>,
    read_params: Mutex<Vec<QueryParams>>,
    deleted: Mutex<Vec<String>>,
    endpoints: Mutex<Vec<Endpoint>>,
}

impl ScriptedGateway {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn push_read(&self, reply: Reply) {
        self.reads.lock().unwrap().push_back(Scripted::Ready(reply));
    }

    /// Queues a read that stays pending until the returned sender fires.
    pub fn push_gated_read(&self) -> oneshot::Sender<Reply> {
        let (tx, rx) = oneshot::channel();
        self.reads.lock().unwrap().push_back(Scripted::Gated(rx));
        tx
    }

    pub fn push_delete(&self, reply: Reply) {
        self.deletes.lock().unwrap().push_back(reply);
    }

    pub fn reads(&self) -> Vec<QueryParams> {
        self.read_params.lock().unwrap().clone()
    }

    pub fn read_count(&self) -> usize {
        self.read_params.lock().unwrap().len()
    }

    pub fn deleted(&self) -> Vec<String> {
        self.deleted.lock().unwrap().clone()
    }

    /// Endpoints of every read and delete, in call order.
    pub fn endpoints(&self) -> Vec<Endpoint> {
        self.endpoints.lock().unwrap().clone()
    }
}

#[async_trait]
impl QueryGateway for ScriptedGateway {
    async fn read(&self, endpoint: &Endpoint, params: &QueryParams) -> Reply {
        self.endpoints.lock().unwrap().push(endpoint.clone());
        self.read_params.lock().unwrap().push(params.clone());
        let next = self.reads.lock().unwrap().pop_front();
        match next {
            Some(Scripted::Ready(reply)) => reply,
            Some(Scripted::Gated(rx)) => rx
                .await
                .unwrap_or_else(|_| Err(GatewayError::Network("gate dropped".to_string()))),
            None => Ok(page_envelope(&[], 1, 10, 0)),
        }
    }

    async fn create(&self, _endpoint: &Endpoint, _body: &Value) -> Reply {
        Ok(ResponseEnvelope::ok(Value::Null))
    }

    async fn update(&self, _endpoint: &Endpoint, _body: &Value) -> Reply {
        Ok(ResponseEnvelope::ok(Value::Null))
    }

    async fn patch(&self, _endpoint: &Endpoint, _body: &Value) -> Reply {
        Ok(ResponseEnvelope::ok(Value::Null))
    }

    async fn delete(&self, endpoint: &Endpoint, id: &str) -> Reply {
        self.endpoints.lock().unwrap().push(endpoint.clone());
        self.deleted.lock().unwrap().push(id.to_string());
        self.deletes
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(ResponseEnvelope::ok(Value::Null)))
    }
}

/// Export sink remembering what it was handed.
#[derive(Default)]
pub struct RecordingSink {
    pub exports: Mutex<Vec<(String, Vec<Value>)>>,
}

impl ExportSink for RecordingSink {
    fn export_data(&self, format: &str, rows: &[Value]) {
        self.exports
            .lock()
            .unwrap()
            .push((format.to_string(), rows.to_vec()));
    }
}

pub fn company(id: &str, name: &str) -> Company {
    Company {
        company_id: id.to_string(),
        name: name.to_string(),
        ..Company::default()
    }
}

pub fn page_envelope(
    rows: &[Company],
    page_no: usize,
    page_size: usize,
    total_count: usize,
) -> ResponseEnvelope {
    ResponseEnvelope::ok(json!({
        "companies": rows,
        "pagination": {
            "pageNo": page_no,
            "pageSize": page_size,
            "totalCount": total_count,
        }
    }))
}

pub fn company_resolver(flags: &[(&str, bool)]) -> Arc<StaticPermissionResolver> {
    let flags = flags
        .iter()
        .map(|(name, assigned)| PermissionFlag::new(*name, *assigned))
        .collect();
    Arc::new(StaticPermissionResolver::default().with_route("company-structure", flags))
}

pub fn company_screen(
    gateway: &Arc<ScriptedGateway>,
    flags: &[(&str, bool)],
) -> (ListController<Company>, Arc<RecordingSink>) {
    let sink = Arc::new(RecordingSink::default());
    let controller = ListController::new(
        Arc::clone(gateway) as Arc<dyn QueryGateway>,
        company_resolver(flags),
        Arc::clone(&sink) as Arc<dyn ExportSink>,
        ListOptions::default(),
    );
    (controller, sink)
}

/// Yields until the gateway has seen `count` reads.
pub async fn wait_for_reads(gateway: &ScriptedGateway, count: usize) {
    for _ in 0..1000 {
        if gateway.read_count() >= count {
            return;
        }
        tokio::task::yield_now().await;
    }
    panic!("gateway saw {} reads, expected {count}", gateway.read_count());
}
