//! Page modules for route-level screens.
//!
//! ARCHITECTURE
//! ============
//! Each page owns route-scoped orchestration (form state, validation, calling
//! the auth session) and delegates shared chrome to `components`.

pub mod home;
pub mod login;
pub mod profile;
pub mod register;
