//! Query parameters sent with every list request.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::domain::types::ActiveStatus;

/// Parameters of a list read, built fresh for each fetch.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryParams {
    pub search_query: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active_status: Option<ActiveStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_no: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_size: Option<usize>,
    /// Entity specific filters such as `employeeId` or `startDate`.
    #[serde(flatten)]
    pub filters: BTreeMap<String, String>,
}

impl QueryParams {
    pub fn new(search_query: impl Into<String>) -> Self {
        Self {
            search_query: search_query.into(),
            ..Self::default()
        }
    }

    pub fn filter(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.filters.insert(key.into(), value.into());
        self
    }

    /// Applies explicit overrides on top of parameters derived from state.
    pub fn merge(mut self, overrides: QueryOverrides) -> Self {
        if let Some(search) = overrides.search_query {
            self.search_query = search;
        }
        if let Some(status) = overrides.active_status {
            self.active_status = status;
        }
        if let Some(page_no) = overrides.page_no {
            self.page_no = Some(page_no);
        }
        self.filters.extend(overrides.filters);
        self
    }
}

/// Explicit values that take precedence over controller state for one fetch.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct QueryOverrides {
    pub search_query: Option<String>,
    /// `Some(None)` clears the status filter for this fetch.
    pub active_status: Option<Option<ActiveStatus>>,
    pub page_no: Option<usize>,
    pub filters: BTreeMap<String, String>,
}

impl QueryOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search_query = Some(term.into());
        self
    }

    pub fn active_status(mut self, status: Option<ActiveStatus>) -> Self {
        self.active_status = Some(status);
        self
    }

    pub fn page(mut self, page_no: usize) -> Self {
        self.page_no = Some(page_no);
        self
    }

    pub fn filter(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.filters.insert(key.into(), value.into());
        self
    }
}
