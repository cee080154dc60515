//! Runtime settings of the console binary.

pub mod config;
