use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::entity::{EditableEntity, EntityConfig, ListEntity};
use crate::domain::permission::PermissionNames;

/// Company row as listed on the company structure screen.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    pub company_id: String,
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub registration_number: Option<String>,
    #[serde(default)]
    pub country_id: Option<String>,
    #[serde(default)]
    pub industry_id: Option<String>,
    #[serde(default)]
    pub first_address: Option<String>,
    #[serde(default)]
    pub second_address: Option<String>,
    #[serde(default)]
    pub employees_count: Option<u32>,
    #[serde(default)]
    pub founded_date: Option<String>,
    /// 1 = head office, 2 = branch, 3 = subsidiary.
    #[serde(default)]
    pub company_type: Option<u8>,
    #[serde(default)]
    pub company_image: Option<String>,
    #[serde(default)]
    pub is_active: Option<bool>,
}

impl ListEntity for Company {
    const CONFIG: EntityConfig = EntityConfig {
        name: "company",
        resource: "Company",
        route: "company-structure",
        list_endpoint: "getCompanies",
        delete_endpoint: "deleteCompany",
        rows_key: "companies",
        id_field: "companyId",
        permissions: PermissionNames {
            create: "Create_Company",
            edit: "Edit_Employee_Company",
            delete: "Delete_Company",
            approve: None,
        },
    };

    fn row_id(&self) -> &str {
        &self.company_id
    }
}

/// Payload of the add/edit company screen.
#[derive(Clone, Debug, Default, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CompanyDraft {
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1))]
    pub phone_number: String,
    pub website: String,
    pub registration_number: String,
    pub country_id: String,
    pub industry_id: String,
    pub first_address: String,
    pub second_address: String,
    pub employees_count: u32,
    /// RFC 3339 timestamp.
    pub founded_date: String,
    pub company_type: u8,
}

impl EditableEntity for Company {
    type Draft = CompanyDraft;

    const GET_ENDPOINT: &'static str = "getCompanyById";
    const CREATE_ENDPOINT: &'static str = "addCompany";
    const UPDATE_ENDPOINT: &'static str = "updateCompany";
}
