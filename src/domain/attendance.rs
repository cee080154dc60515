use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::entity::{EntityConfig, ListEntity};
use crate::domain::permission::PermissionNames;
use crate::domain::types::TypeConstraintError;

/// Review state of an attendance record. Travels as its numeric code.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "i64", into = "i64")]
pub enum AttendanceStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
    Unknown(i64),
}

impl From<i64> for AttendanceStatus {
    fn from(value: i64) -> Self {
        match value {
            0 => AttendanceStatus::Pending,
            1 => AttendanceStatus::Approved,
            2 => AttendanceStatus::Rejected,
            other => AttendanceStatus::Unknown(other),
        }
    }
}

impl From<AttendanceStatus> for i64 {
    fn from(value: AttendanceStatus) -> Self {
        match value {
            AttendanceStatus::Pending => 0,
            AttendanceStatus::Approved => 1,
            AttendanceStatus::Rejected => 2,
            AttendanceStatus::Unknown(code) => code,
        }
    }
}

impl Display for AttendanceStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            AttendanceStatus::Pending => "Pending",
            AttendanceStatus::Approved => "Approved",
            AttendanceStatus::Rejected => "Rejected",
            AttendanceStatus::Unknown(_) => "Unknown",
        };
        f.write_str(text)
    }
}

/// Attendance row for one employee and day.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attendance {
    pub attendance_id: String,
    pub employee_id: String,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub attendance_date: Option<String>,
    #[serde(default)]
    pub check_in: Option<String>,
    #[serde(default)]
    pub check_out: Option<String>,
    #[serde(default)]
    pub attendance_status: AttendanceStatus,
    #[serde(default)]
    pub comment: Option<String>,
}

impl ListEntity for Attendance {
    const CONFIG: EntityConfig = EntityConfig {
        name: "attendance",
        resource: "Attendance",
        route: "attendance-list",
        list_endpoint: "getAttendanceByDateRange",
        delete_endpoint: "deleteAttendance",
        rows_key: "attendances",
        id_field: "attendanceId",
        permissions: PermissionNames {
            create: "Apply_Attendance",
            edit: "Edit_Attendance",
            delete: "Delete_Attendance",
            approve: Some("Attendance_Approval"),
        },
    };

    fn row_id(&self) -> &str {
        &self.attendance_id
    }
}

/// Endpoint prefix for approving or rejecting a record.
pub const PROCESS_ATTENDANCE_ENDPOINT: &str = "processAttendance";

/// Endpoint listing the employees that report to a given employee.
pub const USER_REPORTINGS_ENDPOINT: &str = "getUserReportings";

/// Entry of the employee picker on the attendance screen.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportingEmployee {
    pub employee_id: String,
    pub full_name: String,
}

/// Reviewer decision sent when processing an attendance record.
#[derive(Clone, Debug, PartialEq, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceDecision {
    pub attendance_status: AttendanceStatus,
    #[validate(length(min = 1))]
    pub comment: String,
}

impl AttendanceDecision {
    pub fn new(attendance_status: AttendanceStatus, comment: impl Into<String>) -> Self {
        Self {
            attendance_status,
            comment: comment.into().trim().to_string(),
        }
    }
}

/// Date window and employee the attendance list is filtered by.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AttendanceRange {
    pub employee_id: Option<String>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl AttendanceRange {
    /// Both ends of the window are required and must be ordered.
    pub fn new(
        employee_id: Option<String>,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> Result<Self, TypeConstraintError> {
        let (Some(start_date), Some(end_date)) = (start_date, end_date) else {
            return Err(TypeConstraintError::InvalidValue(
                "both start date and end date must be selected".to_string(),
            ));
        };

        if start_date > end_date {
            return Err(TypeConstraintError::InvalidValue(
                "start date must not be after end date".to_string(),
            ));
        }

        Ok(Self {
            employee_id: employee_id
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
            start_date,
            end_date,
        })
    }

    /// Query filters understood by the attendance list endpoint.
    pub fn to_filters(&self) -> BTreeMap<String, String> {
        let mut filters = BTreeMap::new();
        if let Some(employee_id) = &self.employee_id {
            filters.insert("employeeId".to_string(), employee_id.clone());
        }
        filters.insert(
            "startDate".to_string(),
            self.start_date.format("%Y-%m-%d").to_string(),
        );
        filters.insert(
            "endDate".to_string(),
            self.end_date.format("%Y-%m-%d").to_string(),
        );
        filters
    }
}
