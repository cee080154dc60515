use std::time::Duration;

pub mod domain;
pub mod dto;
mod error_conversions;
#[cfg(feature = "client")]
pub mod models;
pub mod pagination;
pub mod repository;
pub mod services;

#[cfg(feature = "client")]
mod console;
#[cfg(feature = "client")]
pub use console::{ConsoleCommand, EntityKind, run};

pub const DEFAULT_PAGE_SIZE: usize = 10;
pub const PAGE_SIZE_OPTIONS: [usize; 4] = [10, 50, 75, 100];
/// Quiet period a search term must survive before it is sent.
pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(500);
