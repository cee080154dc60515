//! Permission flags resolved per route and the access they grant on a screen.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::types::TypeConstraintError;

/// A single permission assignment as delivered by the permission resolver.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionFlag {
    pub permission: String,
    #[serde(rename = "isAssign", alias = "isassign", alias = "is_assign")]
    pub is_assign: bool,
}

impl PermissionFlag {
    pub fn new(permission: impl Into<String>, is_assign: bool) -> Self {
        Self {
            permission: permission.into(),
            is_assign,
        }
    }
}

/// Permission names a screen checks its actions against.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PermissionNames {
    pub create: &'static str,
    pub edit: &'static str,
    pub delete: &'static str,
    /// Only screens with an approval workflow carry this name.
    pub approve: Option<&'static str>,
}

/// Capabilities derived once from the resolved permission flags.
///
/// The default value grants nothing, which is also what a screen falls back
/// to when the permission payload cannot be trusted.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ScreenAccess {
    pub is_create: bool,
    pub is_edit: bool,
    pub is_delete: bool,
    pub is_approve: bool,
}

impl ScreenAccess {
    /// Computes the screen capabilities by exact name match.
    pub fn from_flags(flags: &[PermissionFlag], names: &PermissionNames) -> Self {
        let granted = |name: &str| flags.iter().any(|f| f.permission == name && f.is_assign);

        Self {
            is_create: granted(names.create),
            is_edit: granted(names.edit),
            is_delete: granted(names.delete),
            is_approve: names.approve.is_some_and(granted),
        }
    }

    /// Validates a raw resolver payload and derives the capabilities from it.
    ///
    /// Anything other than an array of `{permission, isAssign}` objects is a
    /// contract violation.
    pub fn from_payload(payload: &Value, names: &PermissionNames) -> Result<Self, TypeConstraintError> {
        let Value::Array(items) = payload else {
            return Err(TypeConstraintError::InvalidValue(format!(
                "expected a permission list, got {payload}"
            )));
        };

        let flags = items
            .iter()
            .map(|item| PermissionFlag::deserialize(item))
            .collect::<Result<Vec<_>, _>>()
            .map_err(|err| TypeConstraintError::InvalidValue(format!("permission flag: {err}")))?;

        Ok(Self::from_flags(&flags, names))
    }
}

/// Splits a route permission list such as `"Create_Employee,Edit_Employee"`.
pub fn parse_permission_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}
