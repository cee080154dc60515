//! Collaborator seams of the list controller: the backend gateway, the
//! permission resolver, and the export sink.

use async_trait::async_trait;
use serde_json::Value;

use crate::dto::envelope::ResponseEnvelope;
use crate::dto::query::QueryParams;
use crate::repository::errors::GatewayResult;

pub mod errors;
#[cfg(feature = "client")]
pub mod export;
#[cfg(feature = "client")]
pub mod http;
#[cfg(feature = "test-mocks")]
pub mod mock;
pub mod permissions;

/// Resource, path, and auth requirement of one backend call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Endpoint {
    pub resource: String,
    pub path: String,
    pub auth_required: bool,
}

impl Endpoint {
    /// Authenticated endpoint; every screen call uses one.
    pub fn new(resource: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            resource: resource.into(),
            path: path.into(),
            auth_required: true,
        }
    }

    /// Endpoint addressing a single record: `{prefix}/{id}`.
    pub fn item(resource: impl Into<String>, prefix: &str, id: &str) -> Self {
        Self::new(resource, format!("{prefix}/{id}"))
    }
}

#[async_trait]
pub trait QueryGateway: Send + Sync {
    async fn read(&self, endpoint: &Endpoint, params: &QueryParams) -> GatewayResult<ResponseEnvelope>;
    async fn create(&self, endpoint: &Endpoint, body: &Value) -> GatewayResult<ResponseEnvelope>;
    async fn update(&self, endpoint: &Endpoint, body: &Value) -> GatewayResult<ResponseEnvelope>;
    async fn patch(&self, endpoint: &Endpoint, body: &Value) -> GatewayResult<ResponseEnvelope>;
    async fn delete(&self, endpoint: &Endpoint, id: &str) -> GatewayResult<ResponseEnvelope>;
}

/// Supplies the raw permission payload for a route.
///
/// The payload is expected to be an array of `{permission, isAssign}`
/// objects; callers validate it.
#[async_trait]
pub trait PermissionResolver: Send + Sync {
    async fn resolve(&self, route: &str) -> GatewayResult<Value>;
}

/// Fire-and-forget serialization of the rows currently on screen.
pub trait ExportSink: Send + Sync {
    fn export_data(&self, format: &str, rows: &[Value]);
}
