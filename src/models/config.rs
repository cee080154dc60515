//! Configuration model loaded from external sources.

use std::collections::HashMap;
use std::time::Duration;

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, Environment, File};
use serde::Deserialize;
use validator::Validate;

use crate::domain::permission::PermissionFlag;
use crate::services::list::ListOptions;
use crate::{DEFAULT_PAGE_SIZE, PAGE_SIZE_OPTIONS, SEARCH_DEBOUNCE};

fn default_debounce_ms() -> u64 {
    SEARCH_DEBOUNCE.as_millis() as u64
}

fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}

fn default_page_sizes() -> Vec<usize> {
    PAGE_SIZE_OPTIONS.to_vec()
}

fn default_export_dir() -> String {
    "exports".to_string()
}

fn default_permission_resource() -> String {
    "Permission".to_string()
}

fn default_permission_path() -> String {
    "getPermissionsByName".to_string()
}

#[derive(Clone, Debug, Deserialize, Validate)]
/// Settings of the console client.
pub struct ConsoleConfig {
    #[validate(url)]
    pub api_base_url: String,
    #[serde(default)]
    pub api_token: Option<String>,
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
    #[serde(default = "default_debounce_ms")]
    pub search_debounce_ms: u64,
    #[serde(default = "default_page_size")]
    #[validate(range(min = 1))]
    pub default_page_size: usize,
    #[serde(default = "default_page_sizes")]
    #[validate(length(min = 1))]
    pub page_sizes: Vec<usize>,
    #[serde(default = "default_export_dir")]
    pub export_dir: String,
    /// Flags served for each route when no permission routes are registered.
    #[serde(default)]
    pub permissions: HashMap<String, Vec<PermissionFlag>>,
    /// Route to comma-separated permission names checked against the backend.
    #[serde(default)]
    pub permission_routes: HashMap<String, String>,
    #[serde(default = "default_permission_resource")]
    pub permission_resource: String,
    #[serde(default = "default_permission_path")]
    pub permission_path: String,
}

impl ConsoleConfig {
    /// Reads `config/default`, the `config/{app_env}` overrides and `APP_*`
    /// environment variables, in that order.
    pub fn load(app_env: &str) -> Result<Self, ConfigError> {
        Self::from_builder(
            Config::builder()
                .add_source(File::with_name("config/default"))
                .add_source(File::with_name(&format!("config/{app_env}")).required(false))
                .add_source(Environment::with_prefix("APP")),
        )
    }

    fn from_builder(builder: ConfigBuilder<DefaultState>) -> Result<Self, ConfigError> {
        builder.build()?.try_deserialize()
    }

    pub fn list_options(&self) -> ListOptions {
        ListOptions {
            page_size: self.default_page_size,
            page_sizes: self.page_sizes.clone(),
            debounce: Duration::from_millis(self.search_debounce_ms),
        }
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }
}
