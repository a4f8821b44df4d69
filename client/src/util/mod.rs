//! Utility helpers shared across client UI modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Utility modules isolate browser/environment concerns (storage, speech,
//! geolocation, clocks) from page and component logic to improve reuse and
//! testability.

pub mod datetime;
pub mod geo;
pub mod speech;
pub mod storage;
