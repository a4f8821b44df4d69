//! Shared client-side state modules.
//!
//! DESIGN
//! ======
//! State is split by widget (`weather`, `market`, `disease`, `assistant`, `home`)
//! plus the shared `session` and navbar `ui`, so each page depends on one
//! small focused model. `request` provides the stale-response tickets.

pub mod assistant;
pub mod disease;
pub mod home;
pub mod market;
pub mod request;
pub mod session;
pub mod ui;
pub mod weather;
