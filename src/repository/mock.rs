//! Mock collaborators for isolating the list controller in tests.

use async_trait::async_trait;
use mockall::mock;
use serde_json::Value;

use crate::dto::envelope::ResponseEnvelope;
use crate::dto::query::QueryParams;
use crate::repository::errors::GatewayResult;
use crate::repository::{Endpoint, ExportSink, PermissionResolver, QueryGateway};

mock! {
    pub Gateway {}

    #[async_trait]
    impl QueryGateway for Gateway {
        async fn read(&self, endpoint: &Endpoint, params: &QueryParams) -> GatewayResult<ResponseEnvelope>;
        async fn create(&self, endpoint: &Endpoint, body: &Value) -> GatewayResult<ResponseEnvelope>;
        async fn update(&self, endpoint: &Endpoint, body: &Value) -> GatewayResult<ResponseEnvelope>;
        async fn patch(&self, endpoint: &Endpoint, body: &Value) -> GatewayResult<ResponseEnvelope>;
        async fn delete(&self, endpoint: &Endpoint, id: &str) -> GatewayResult<ResponseEnvelope>;
    }
}

mock! {
    pub Resolver {}

    #[async_trait]
    impl PermissionResolver for Resolver {
        async fn resolve(&self, route: &str) -> GatewayResult<Value>;
    }
}

mock! {
    pub Sink {}

    impl ExportSink for Sink {
        fn export_data(&self, format: &str, rows: &[Value]);
    }
}
