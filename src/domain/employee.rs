use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::entity::{EditableEntity, EntityConfig, ListEntity};
use crate::domain::permission::PermissionNames;

/// Employee row on the manage-employee screen.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub employee_id: String,
    pub full_name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub department_name: Option<String>,
    #[serde(default)]
    pub designation_name: Option<String>,
    #[serde(default)]
    pub is_active: Option<bool>,
}

impl ListEntity for Employee {
    const CONFIG: EntityConfig = EntityConfig {
        name: "employee",
        resource: "Employee",
        route: "employee-list",
        list_endpoint: "getEmployees",
        delete_endpoint: "deleteEmployee",
        rows_key: "employees",
        id_field: "employeeId",
        permissions: PermissionNames {
            create: "Create_Employee",
            edit: "Edit_Employee",
            delete: "Delete_Employee",
            approve: None,
        },
    };

    fn row_id(&self) -> &str {
        &self.employee_id
    }
}

#[derive(Clone, Debug, Default, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeDraft {
    #[validate(length(min = 1))]
    pub full_name: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1))]
    pub phone_number: String,
    pub department_id: String,
    pub designation_id: String,
    pub is_active: bool,
}

impl EditableEntity for Employee {
    type Draft = EmployeeDraft;

    const GET_ENDPOINT: &'static str = "getEmployeeById";
    const CREATE_ENDPOINT: &'static str = "addEmployee";
    const UPDATE_ENDPOINT: &'static str = "updateEmployee";
}
