//! Per-entity configuration consumed by the generic list controller.

use std::fmt::Debug;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::domain::permission::PermissionNames;

/// Routing and naming details that distinguish one list screen from another.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EntityConfig {
    /// Human readable name used in log lines.
    pub name: &'static str,
    /// Backend resource (first path segment).
    pub resource: &'static str,
    /// Route whose permission flags gate the screen.
    pub route: &'static str,
    /// Endpoint returning the paginated list.
    pub list_endpoint: &'static str,
    /// Endpoint prefix for deleting a row; the id is appended as a segment.
    pub delete_endpoint: &'static str,
    /// Key holding the rows inside the list payload.
    pub rows_key: &'static str,
    /// Wire name of the identifier field.
    pub id_field: &'static str,
    pub permissions: PermissionNames,
}

/// A row type that can be listed by [`crate::services::list::ListController`].
pub trait ListEntity:
    Clone + Debug + PartialEq + Send + Sync + Serialize + DeserializeOwned + 'static
{
    const CONFIG: EntityConfig;

    /// Value of the identifier field named by [`EntityConfig::id_field`].
    fn row_id(&self) -> &str;
}

/// A row type that also has an add/edit screen.
pub trait EditableEntity: ListEntity {
    /// Payload posted when creating or updating a record.
    type Draft: Serialize + validator::Validate + Send + Sync;

    /// Endpoint prefix for reading a single record by id.
    const GET_ENDPOINT: &'static str;
    const CREATE_ENDPOINT: &'static str;
    /// Endpoint prefix for updating a record; the id is appended as a segment.
    const UPDATE_ENDPOINT: &'static str;
}
