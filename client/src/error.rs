//! Error types for the auth core and its storage backend.
//!
//! ERROR HANDLING
//! ==============
//! `AuthError` is what pages see and turn into user-facing messages.
//! `StorageError` never leaves the session store: backend failures are
//! logged and the operation degrades to "nothing persisted".

/// Failure outcome of an auth operation. The prior session state is kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    /// Unknown email or wrong password. Which one is not reported.
    #[error("invalid email or password")]
    InvalidCredentials,
    /// Registration attempted with an email already in the directory.
    #[error("email already registered")]
    EmailTaken,
    /// Operation requires an authenticated session.
    #[error("not signed in")]
    NotAuthenticated,
}

/// Failure of a key/value storage backend.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StorageError {
    /// No storage is reachable (server render, private mode, no window).
    #[error("storage unavailable")]
    Unavailable,
    /// The backend refused the operation (quota, security policy).
    #[error("storage operation failed: {0}")]
    Backend(String),
}
