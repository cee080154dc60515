use serde::{Deserialize, Serialize};

use crate::domain::entity::{EntityConfig, ListEntity};
use crate::domain::permission::PermissionNames;

/// Leave request row on the leave list.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Leave {
    pub leave_id: String,
    pub employee_id: String,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub leave_type_id: Option<String>,
    #[serde(default)]
    pub leave_type_name: Option<String>,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(default)]
    pub reason: Option<String>,
    /// Review state code, as sent by the backend.
    #[serde(default)]
    pub status: Option<i64>,
}

impl ListEntity for Leave {
    const CONFIG: EntityConfig = EntityConfig {
        name: "leave",
        resource: "Leave",
        route: "leave-list",
        list_endpoint: "getLeaves",
        delete_endpoint: "deleteLeave",
        rows_key: "leaves",
        id_field: "leaveId",
        permissions: PermissionNames {
            create: "Create_Leave",
            edit: "Edit_Leave",
            delete: "Delete_Leave",
            approve: None,
        },
    };

    fn row_id(&self) -> &str {
        &self.leave_id
    }
}

/// Leave category row (annual, sick, ...).
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaveType {
    pub leave_type_id: String,
    pub leave_type_name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub is_active: Option<bool>,
}

impl ListEntity for LeaveType {
    const CONFIG: EntityConfig = EntityConfig {
        name: "leave_type",
        resource: "LeaveType",
        route: "leave-type-list",
        list_endpoint: "getLeaveTypes",
        delete_endpoint: "deleteLeaveType",
        rows_key: "leaveTypes",
        id_field: "leaveTypeId",
        permissions: PermissionNames {
            create: "Create_Leave_Type",
            edit: "Edit_Leave_Type",
            delete: "Delete_Leave_Type",
            approve: None,
        },
    };

    fn row_id(&self) -> &str {
        &self.leave_type_id
    }
}
