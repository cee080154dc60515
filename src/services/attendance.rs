//! Attendance specific operations on top of the generic list controller.

use chrono::NaiveDate;
use validator::Validate;

use crate::domain::attendance::{
    Attendance, AttendanceDecision, AttendanceRange, PROCESS_ATTENDANCE_ENDPOINT,
    ReportingEmployee, USER_REPORTINGS_ENDPOINT,
};
use crate::domain::entity::ListEntity;
use crate::domain::types::RowId;
use crate::dto::query::{QueryOverrides, QueryParams};
use crate::repository::Endpoint;
use crate::services::list::{FetchOutcome, ListController};
use crate::services::{ServiceError, ServiceResult};

const RANGE_FILTERS: [&str; 3] = ["employeeId", "startDate", "endDate"];

impl ListController<Attendance> {
    /// Filters the list by employee and date window, then reloads page 1.
    ///
    /// Both dates must be given; otherwise nothing is fetched.
    pub async fn apply_date_range(
        &self,
        employee_id: Option<String>,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> ServiceResult<FetchOutcome> {
        let range = AttendanceRange::new(employee_id, start_date, end_date)
            .map_err(|e| ServiceError::Form(e.to_string()))?;

        if self.is_torn_down() {
            return Err(ServiceError::Cancelled);
        }

        let outcome = self
            .shared
            .fetch_first_page(QueryOverrides::new(), |view| {
                for key in RANGE_FILTERS {
                    view.filters.remove(key);
                }
                view.filters.extend(range.to_filters());
            })
            .await;
        Ok(outcome)
    }

    /// Employees reporting to `employee_id`, used to fill the employee picker.
    ///
    /// Any failure yields an empty list.
    pub async fn user_reportings(&self, employee_id: &str) -> Vec<ReportingEmployee> {
        let config = &Attendance::CONFIG;
        let endpoint = Endpoint::new(config.resource, USER_REPORTINGS_ENDPOINT);
        let params = QueryParams::default().filter("employeeId", employee_id);

        let response = tokio::select! {
            biased;
            _ = self.shared.cancel.cancelled() => return Vec::new(),
            response = self.shared.gateway.read(&endpoint, &params) => response,
        };
        let envelope = match response {
            Ok(envelope) => envelope,
            Err(err) => {
                log::error!("Failed to load reportings of {employee_id}: {err}");
                return Vec::new();
            }
        };

        if !envelope.success {
            log::warn!(
                "Reportings of {employee_id} rejected: {}",
                envelope.failure_message()
            );
            return Vec::new();
        }

        match envelope.data.map(serde_json::from_value::<Vec<ReportingEmployee>>) {
            Some(Ok(employees)) => employees,
            Some(Err(err)) => {
                log::error!("Malformed reportings of {employee_id}: {err}");
                Vec::new()
            }
            None => Vec::new(),
        }
    }

    /// Approves or rejects an attendance record and reloads the list.
    pub async fn process_attendance(
        &self,
        id: &str,
        decision: &AttendanceDecision,
    ) -> ServiceResult<FetchOutcome> {
        let config = &Attendance::CONFIG;
        let id = RowId::new(id)?;

        if self.is_torn_down() {
            return Err(ServiceError::Cancelled);
        }
        if !self.access().is_approve {
            return Err(ServiceError::Unauthorized);
        }
        if let Err(e) = decision.validate() {
            log::error!("Failed to validate attendance decision: {e}");
            return Err(ServiceError::Form(e.to_string()));
        }

        let body = serde_json::to_value(decision)
            .map_err(|e| ServiceError::Form(format!("attendance decision: {e}")))?;
        let endpoint = Endpoint::item(config.resource, PROCESS_ATTENDANCE_ENDPOINT, id.as_str());

        let response = tokio::select! {
            biased;
            _ = self.shared.cancel.cancelled() => return Err(ServiceError::Cancelled),
            response = self.shared.gateway.patch(&endpoint, &body) => response,
        };
        let envelope = match response {
            Ok(envelope) => envelope,
            Err(err) => {
                log::error!("Error processing attendance {id}: {err}");
                return Err(err.into());
            }
        };

        if !envelope.success {
            let message = envelope.failure_message();
            log::error!("Backend refused to process attendance {id}: {message}");
            return Err(ServiceError::Rejected(message));
        }

        log::info!(
            "Attendance {id} marked {}",
            decision.attendance_status
        );
        Ok(self.fetch(QueryOverrides::new()).await)
    }
}
