use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::entity::{EditableEntity, EntityConfig, ListEntity};
use crate::domain::permission::PermissionNames;

/// Work shift row.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Shift {
    pub shift_id: String,
    pub shift_name: String,
    #[serde(default)]
    pub start_time: Option<String>,
    #[serde(default)]
    pub end_time: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub is_active: Option<bool>,
}

impl ListEntity for Shift {
    const CONFIG: EntityConfig = EntityConfig {
        name: "shift",
        resource: "Shift",
        route: "shift-list",
        list_endpoint: "getShifts",
        delete_endpoint: "deleteShift",
        rows_key: "shifts",
        id_field: "shiftId",
        permissions: PermissionNames {
            create: "Create_Shift",
            edit: "Edit_Shift",
            delete: "Delete_Shift",
            approve: None,
        },
    };

    fn row_id(&self) -> &str {
        &self.shift_id
    }
}

#[derive(Clone, Debug, Default, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ShiftDraft {
    #[validate(length(min = 1))]
    pub shift_name: String,
    #[validate(length(min = 1))]
    pub start_time: String,
    #[validate(length(min = 1))]
    pub end_time: String,
    pub description: String,
}

impl EditableEntity for Shift {
    type Draft = ShiftDraft;

    const GET_ENDPOINT: &'static str = "getShiftById";
    const CREATE_ENDPOINT: &'static str = "addShift";
    const UPDATE_ENDPOINT: &'static str = "updateShift";
}
