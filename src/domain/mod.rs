//! Domain rows, permissions, and value objects shared by every list screen.

pub mod attendance;
pub mod company;
pub mod employee;
pub mod entity;
pub mod leave;
pub mod permission;
pub mod shift;
pub mod types;
