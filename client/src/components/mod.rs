//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components render page chrome and route wrappers while reading shared auth
//! state from Leptos context providers.

pub mod navbar;
pub mod require_auth;
