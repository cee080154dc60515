//! Permission resolver implementations.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use crate::domain::permission::{PermissionFlag, parse_permission_list};
use crate::dto::query::QueryParams;
use crate::repository::errors::{GatewayError, GatewayResult};
use crate::repository::{Endpoint, PermissionResolver, QueryGateway};

/// Serves permission flags from a fixed route table.
///
/// Unknown routes resolve to `null`, which callers treat as malformed.
#[derive(Clone, Debug, Default)]
pub struct StaticPermissionResolver {
    routes: HashMap<String, Vec<PermissionFlag>>,
}

impl StaticPermissionResolver {
    pub fn new(routes: HashMap<String, Vec<PermissionFlag>>) -> Self {
        Self { routes }
    }

    pub fn with_route(mut self, route: impl Into<String>, flags: Vec<PermissionFlag>) -> Self {
        self.routes.insert(route.into(), flags);
        self
    }
}

#[async_trait]
impl PermissionResolver for StaticPermissionResolver {
    async fn resolve(&self, route: &str) -> GatewayResult<Value> {
        match self.routes.get(route) {
            Some(flags) => Ok(serde_json::to_value(flags)?),
            None => Ok(Value::Null),
        }
    }
}

/// Asks the backend which of a route's permission names the user holds.
///
/// Routes are registered with their comma-separated permission list, e.g.
/// `"Create_Employee,Edit_Employee,View_Employee,Delete_Employee"`.
pub struct GatewayPermissionResolver {
    gateway: Arc<dyn QueryGateway>,
    endpoint: Endpoint,
    routes: HashMap<String, String>,
}

impl GatewayPermissionResolver {
    pub fn new(
        gateway: Arc<dyn QueryGateway>,
        endpoint: Endpoint,
        routes: HashMap<String, String>,
    ) -> Self {
        Self {
            gateway,
            endpoint,
            routes,
        }
    }
}

#[async_trait]
impl PermissionResolver for GatewayPermissionResolver {
    async fn resolve(&self, route: &str) -> GatewayResult<Value> {
        let Some(raw) = self.routes.get(route) else {
            log::warn!("No permission names registered for route {route}");
            return Ok(Value::Null);
        };

        let names = parse_permission_list(raw);
        if names.is_empty() {
            return Err(GatewayError::Validation(format!(
                "empty permission list for route {route}"
            )));
        }

        let params = QueryParams::default().filter("permissions", names.join(","));
        let envelope = self.gateway.read(&self.endpoint, &params).await?;

        if !envelope.success {
            log::warn!(
                "Permission lookup for route {route} rejected: {}",
                envelope.failure_message()
            );
            return Ok(Value::Null);
        }

        Ok(envelope.data.unwrap_or(Value::Null))
    }
}
