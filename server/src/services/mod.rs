//! Domain services used by the HTTP routes.
//!
//! ARCHITECTURE
//! ============
//! Service modules own business logic, persistence and upstream I/O so
//! route handlers can stay focused on protocol translation and status codes.

pub mod accounts;
pub mod assistant;
pub mod disease;
pub mod session;
pub mod upstream;
