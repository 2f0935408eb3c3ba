//! Auth-session state for the current browser user.
//!
//! SYSTEM CONTEXT
//! ==============
//! Used by route guards and user-aware components to coordinate login redirects
//! and identity-dependent rendering. The session publishes a fresh snapshot on
//! every change; the app mirrors it into an `RwSignal<AuthState>`.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use crate::state::user::User;

/// Authentication state tracking the current user and loading status.
///
/// `loading` is true only until the persisted session has been inspected once.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthState {
    pub user: Option<User>,
    pub loading: bool,
}

impl AuthState {
    /// Resolved state with no user.
    #[must_use]
    pub const fn signed_out() -> Self {
        Self { user: None, loading: false }
    }

    /// Resolved state holding `user`.
    #[must_use]
    pub const fn signed_in(user: User) -> Self {
        Self { user: Some(user), loading: false }
    }

    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }
}

impl Default for AuthState {
    /// Startup state: loading, no user.
    fn default() -> Self {
        Self { user: None, loading: true }
    }
}
