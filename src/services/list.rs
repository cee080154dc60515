//! Generic paginated, searchable, exportable list controller.
//!
//! One controller drives one list screen. It owns the paging/search/filter
//! state, issues reads through the [`QueryGateway`], and applies responses in
//! request order: every fetch takes a sequence number when issued and its
//! response is dropped unless that number is still the latest. Search input
//! is debounced on top of that. Tearing the controller down cancels the
//! debounce task and every in-flight request; nothing mutates state after.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use serde_json::Value;
use tokio_util::sync::CancellationToken;

use crate::domain::entity::ListEntity;
use crate::domain::permission::ScreenAccess;
use crate::domain::types::{ActiveStatus, RowId};
use crate::dto::envelope::{ListResponse, ResponseEnvelope};
use crate::dto::query::{QueryOverrides, QueryParams};
use crate::pagination::{PageSnapshot, PageState, apply_page_result};
use crate::repository::{Endpoint, ExportSink, PermissionResolver, QueryGateway};
use crate::services::debounce::Debouncer;
use crate::services::{ServiceError, ServiceResult};
use crate::{DEFAULT_PAGE_SIZE, PAGE_SIZE_OPTIONS, SEARCH_DEBOUNCE};

/// Tunables of a list screen.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ListOptions {
    pub page_size: usize,
    /// Sizes offered by the page-size dropdown.
    pub page_sizes: Vec<usize>,
    pub debounce: Duration,
}

impl Default for ListOptions {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            page_sizes: PAGE_SIZE_OPTIONS.to_vec(),
            debounce: SEARCH_DEBOUNCE,
        }
    }
}

/// How a fetch ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The response was the latest and has been applied.
    Applied,
    /// The request failed or was rejected; rows were cleared.
    Failed,
    /// A newer request was issued before this one resolved.
    Stale,
    /// The controller was torn down.
    Cancelled,
    /// Nothing was requested.
    Skipped,
}

/// Everything a view needs to render the screen.
#[derive(Clone, Debug, PartialEq)]
pub struct ListSnapshot<R> {
    pub search_term: String,
    pub active_status: Option<ActiveStatus>,
    pub filters: BTreeMap<String, String>,
    pub page: PageState,
    pub rows: Vec<R>,
    pub access: ScreenAccess,
    pub page_sizes: Vec<usize>,
}

impl<R> ListSnapshot<R> {
    fn new(options: &ListOptions) -> Self {
        Self {
            search_term: String::new(),
            active_status: None,
            filters: BTreeMap::new(),
            page: PageState::new(options.page_size),
            rows: Vec::new(),
            access: ScreenAccess::default(),
            page_sizes: options.page_sizes.clone(),
        }
    }

    /// Query parameters derived from the current state.
    fn query(&self) -> QueryParams {
        QueryParams {
            search_query: self.search_term.clone(),
            active_status: self.active_status,
            page_no: Some(self.page.page_no),
            page_size: Some(self.page.page_size),
            filters: self.filters.clone(),
        }
    }
}

struct ListState<R> {
    view: ListSnapshot<R>,
    latest_request: u64,
}

pub(crate) struct Shared<E: ListEntity> {
    pub(crate) gateway: Arc<dyn QueryGateway>,
    resolver: Arc<dyn PermissionResolver>,
    sink: Arc<dyn ExportSink>,
    state: Mutex<ListState<E>>,
    pub(crate) cancel: CancellationToken,
}

impl<E: ListEntity> Shared<E> {
    /// Takes the next sequence number and builds the request parameters.
    fn issue(&self, overrides: QueryOverrides) -> Option<(u64, QueryParams)> {
        let mut state = self.state.lock();
        if self.cancel.is_cancelled() {
            return None;
        }
        state.latest_request += 1;
        Some((state.latest_request, state.view.query().merge(overrides)))
    }

    pub(crate) async fn fetch(&self, overrides: QueryOverrides) -> FetchOutcome {
        let Some((seq, params)) = self.issue(overrides) else {
            return FetchOutcome::Cancelled;
        };
        let config = &E::CONFIG;
        let endpoint = Endpoint::new(config.resource, config.list_endpoint);
        log::debug!("Fetching {} list #{seq}: {params:?}", config.name);

        let response = tokio::select! {
            biased;
            _ = self.cancel.cancelled() => return FetchOutcome::Cancelled,
            response = self.gateway.read(&endpoint, &params) => response,
        };

        let result = match response {
            Ok(envelope) => decode_page::<E>(envelope),
            Err(err) => {
                log::error!("Failed to fetch {} list: {err}", config.name);
                None
            }
        };

        self.apply(seq, result)
    }

    /// Applies `update` to the view, moves back to page 1 and fetches.
    pub(crate) async fn fetch_first_page(
        &self,
        overrides: QueryOverrides,
        update: impl FnOnce(&mut ListSnapshot<E>),
    ) -> FetchOutcome {
        {
            let mut state = self.state.lock();
            if self.cancel.is_cancelled() {
                return FetchOutcome::Cancelled;
            }
            update(&mut state.view);
            state.view.page.page_no = 1;
        }
        self.fetch(overrides).await
    }

    fn apply(&self, seq: u64, result: Option<ListResponse<E>>) -> FetchOutcome {
        let mut state = self.state.lock();
        if self.cancel.is_cancelled() {
            return FetchOutcome::Cancelled;
        }
        if seq != state.latest_request {
            log::warn!(
                "Dropping stale {} response #{seq}, latest is #{}",
                E::CONFIG.name,
                state.latest_request
            );
            return FetchOutcome::Stale;
        }

        let loaded = result.is_some();
        let PageSnapshot { rows, page } = apply_page_result(&state.view.page, result);
        state.view.rows = rows;
        state.view.page = page;

        if loaded {
            FetchOutcome::Applied
        } else {
            FetchOutcome::Failed
        }
    }

    pub(crate) fn access(&self) -> ScreenAccess {
        self.state.lock().view.access.clone()
    }
}

fn decode_page<E: ListEntity>(envelope: ResponseEnvelope) -> Option<ListResponse<E>> {
    let config = &E::CONFIG;
    if !envelope.success {
        log::warn!(
            "{} list request rejected: {}",
            config.name,
            envelope.failure_message()
        );
        return None;
    }

    let Some(data) = envelope.data else {
        log::error!("{} list response carried no data", config.name);
        return None;
    };

    match ListResponse::from_data(data, config.rows_key) {
        Ok(page) => Some(page),
        Err(err) => {
            log::error!("Malformed {} list payload: {err}", config.name);
            None
        }
    }
}

/// Controller behind one list screen for entity `E`.
pub struct ListController<E: ListEntity> {
    pub(crate) shared: Arc<Shared<E>>,
    search: Debouncer<String>,
}

impl<E: ListEntity> ListController<E> {
    /// Creates the controller and starts its debounce task.
    ///
    /// Must be called from within a tokio runtime.
    pub fn new(
        gateway: Arc<dyn QueryGateway>,
        resolver: Arc<dyn PermissionResolver>,
        sink: Arc<dyn ExportSink>,
        options: ListOptions,
    ) -> Self {
        let shared = Arc::new(Shared {
            gateway,
            resolver,
            sink,
            state: Mutex::new(ListState {
                view: ListSnapshot::new(&options),
                latest_request: 0,
            }),
            cancel: CancellationToken::new(),
        });

        let target = Arc::clone(&shared);
        let search = Debouncer::spawn(options.debounce, shared.cancel.clone(), move |term: String| {
            let shared = Arc::clone(&target);
            async move {
                shared
                    .fetch_first_page(QueryOverrides::new().search(term), |_| {})
                    .await;
            }
        });

        Self { shared, search }
    }

    /// Resolves permissions for the screen, then loads the first page.
    pub async fn initialize(&self) -> FetchOutcome {
        self.load_permissions().await;
        self.shared.fetch(QueryOverrides::new().search("")).await
    }

    async fn load_permissions(&self) {
        let config = &E::CONFIG;
        let payload = tokio::select! {
            biased;
            _ = self.shared.cancel.cancelled() => return,
            payload = self.shared.resolver.resolve(config.route) => payload,
        };

        let access = match payload {
            Ok(payload) => ScreenAccess::from_payload(&payload, &config.permissions)
                .unwrap_or_else(|err| {
                    log::error!("Invalid permissions format for route {}: {err}", config.route);
                    ScreenAccess::default()
                }),
            Err(err) => {
                log::error!("Failed to resolve permissions for route {}: {err}", config.route);
                ScreenAccess::default()
            }
        };

        let mut state = self.shared.state.lock();
        if !self.shared.cancel.is_cancelled() {
            state.view.access = access;
        }
    }

    /// Records the term right away and schedules a debounced fetch.
    pub fn search(&self, term: impl Into<String>) {
        let term = term.into();
        {
            let mut state = self.shared.state.lock();
            if self.shared.cancel.is_cancelled() {
                return;
            }
            state.view.search_term = term.clone();
        }
        if !self.search.emit(term) {
            log::debug!("{} search emitted after teardown", E::CONFIG.name);
        }
    }

    /// Records the term and fetches page 1 without waiting for the quiet window.
    pub async fn search_now(&self, term: impl Into<String>) -> FetchOutcome {
        let term = term.into();
        self.shared
            .fetch_first_page(QueryOverrides::new(), |view| view.search_term = term)
            .await
    }

    /// Applies the status filter and reloads from page 1.
    pub async fn change_status_filter(&self, status: Option<ActiveStatus>) -> FetchOutcome {
        self.shared
            .fetch_first_page(QueryOverrides::new(), |view| view.active_status = status)
            .await
    }

    /// Moves to `page`; out-of-range targets are ignored without a fetch.
    pub async fn change_page(&self, page: usize) -> FetchOutcome {
        {
            let mut state = self.shared.state.lock();
            if self.shared.cancel.is_cancelled() {
                return FetchOutcome::Cancelled;
            }
            if !state.view.page.contains_page(page) {
                return FetchOutcome::Skipped;
            }
            state.view.page.page_no = page;
        }
        self.shared.fetch(QueryOverrides::new()).await
    }

    /// Switches the page size and reloads from page 1.
    ///
    /// The size is not checked against the dropdown options.
    pub async fn change_page_size(&self, size: usize) -> FetchOutcome {
        self.shared
            .fetch_first_page(QueryOverrides::new(), |view| view.page.page_size = size)
            .await
    }

    /// Sets an entity specific filter used by subsequent fetches.
    pub fn set_filter(&self, key: impl Into<String>, value: impl Into<String>) {
        let mut state = self.shared.state.lock();
        if !self.shared.cancel.is_cancelled() {
            state.view.filters.insert(key.into(), value.into());
        }
    }

    pub fn clear_filter(&self, key: &str) {
        let mut state = self.shared.state.lock();
        if !self.shared.cancel.is_cancelled() {
            state.view.filters.remove(key);
        }
    }

    /// Fetches with the current state merged with `overrides`.
    pub async fn fetch(&self, overrides: QueryOverrides) -> FetchOutcome {
        self.shared.fetch(overrides).await
    }

    /// Deletes a row on the backend and drops it from the loaded rows.
    ///
    /// Returns how many loaded rows were removed. Counts are left as they are.
    pub async fn delete_row(&self, id: &str) -> ServiceResult<usize> {
        let config = &E::CONFIG;
        let id = RowId::new(id)?;

        if self.shared.cancel.is_cancelled() {
            return Err(ServiceError::Cancelled);
        }
        if !self.shared.access().is_delete {
            return Err(ServiceError::Unauthorized);
        }

        let endpoint = Endpoint::item(config.resource, config.delete_endpoint, id.as_str());
        let response = tokio::select! {
            biased;
            _ = self.shared.cancel.cancelled() => return Err(ServiceError::Cancelled),
            response = self.shared.gateway.delete(&endpoint, id.as_str()) => response,
        };
        let envelope = match response {
            Ok(envelope) => envelope,
            Err(err) => {
                log::error!("Error deleting {} {id}: {err}", config.name);
                return Err(err.into());
            }
        };

        if !envelope.success {
            let message = envelope.failure_message();
            log::error!("Backend refused to delete {} {id}: {message}", config.name);
            return Err(ServiceError::Rejected(message));
        }

        let mut state = self.shared.state.lock();
        if self.shared.cancel.is_cancelled() {
            return Err(ServiceError::Cancelled);
        }
        let before = state.view.rows.len();
        state.view.rows.retain(|row| row.row_id() != id.as_str());
        let removed = before - state.view.rows.len();
        log::info!("Deleted {} {}={id}, removed {removed} rows", config.name, config.id_field);

        Ok(removed)
    }

    /// Hands the rows currently on screen to the export sink.
    pub fn export_current_view(&self, format: &str) {
        let rows = self.shared.state.lock().view.rows.clone();
        let values = match rows
            .iter()
            .map(serde_json::to_value)
            .collect::<Result<Vec<Value>, _>>()
        {
            Ok(values) => values,
            Err(err) => {
                log::error!("Failed to serialize {} rows for export: {err}", E::CONFIG.name);
                return;
            }
        };

        self.shared.sink.export_data(format, &values);
    }

    pub fn snapshot(&self) -> ListSnapshot<E> {
        self.shared.state.lock().view.clone()
    }

    pub fn access(&self) -> ScreenAccess {
        self.shared.access()
    }

    /// Cancels pending searches and in-flight requests. Idempotent.
    pub fn teardown(&self) {
        if !self.shared.cancel.is_cancelled() {
            log::debug!("Tearing down {} list", E::CONFIG.name);
            self.shared.cancel.cancel();
        }
    }

    pub fn is_torn_down(&self) -> bool {
        self.shared.cancel.is_cancelled()
    }
}

impl<E: ListEntity> Drop for ListController<E> {
    fn drop(&mut self) {
        self.shared.cancel.cancel();
    }
}
