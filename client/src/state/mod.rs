//! Shared client-side state modules.
//!
//! DESIGN
//! ======
//! State is split by concern (`user` records, the `directory` of known
//! accounts, the published `auth` snapshot, and the `session` that owns them)
//! so pages can depend on small focused models.

pub mod auth;
pub mod directory;
pub mod session;
pub mod user;
