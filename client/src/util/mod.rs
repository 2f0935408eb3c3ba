//! Utility helpers shared across client UI modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Utility modules isolate browser/environment concerns (storage, timers,
//! redirect URLs) from page and component logic to improve reuse and
//! testability.

pub mod auth;
pub mod latency;
pub mod session_store;
