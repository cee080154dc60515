//! The `{success, data, message}` wrapper every backend response uses.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Backend response wrapper.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ResponseEnvelope<T = Value> {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub data: Option<T>,
    #[serde(default)]
    pub message: Option<String>,
}

impl<T> ResponseEnvelope<T> {
    /// Successful envelope carrying `data`.
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
        }
    }

    /// Business failure (`success: false`) with a message.
    pub fn rejected(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            message: Some(message.into()),
        }
    }

    /// Message to surface for a rejected request.
    pub fn failure_message(&self) -> String {
        self.message
            .clone()
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| "request was rejected".to_string())
    }
}

/// Pagination block returned next to a page of rows.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationInfo {
    pub page_no: usize,
    pub page_size: usize,
    pub total_count: usize,
}

/// One page of rows for any list screen.
#[derive(Clone, Debug, PartialEq)]
pub struct ListResponse<R> {
    pub rows: Vec<R>,
    pub pagination: PaginationInfo,
}

impl<R: DeserializeOwned> ListResponse<R> {
    /// Decodes the list payload. Rows are read from `rows_key`, falling back
    /// to a generic `rows` key.
    pub fn from_data(mut data: Value, rows_key: &str) -> Result<Self, serde_json::Error> {
        let key = if data.get(rows_key).is_some() {
            rows_key
        } else {
            "rows"
        };
        let rows = data.get_mut(key).map(Value::take).unwrap_or(Value::Null);
        let pagination = data
            .get_mut("pagination")
            .map(Value::take)
            .unwrap_or(Value::Null);

        Ok(Self {
            rows: serde_json::from_value(rows)?,
            pagination: serde_json::from_value(pagination)?,
        })
    }
}
