//! Shared auth routing helpers.
//!
//! SYSTEM CONTEXT
//! ==============
//! Guarded routes and the login page must agree on how the requested path is
//! carried through the login redirect, so both sides live here.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use crate::state::auth::AuthState;

/// Login entry point for unauthenticated navigation.
pub const LOGIN_PATH: &str = "/login";

/// Query parameter carrying the originally requested path.
pub const REDIRECT_PARAM: &str = "redirect";

/// Post-login destination when no usable redirect target was supplied.
pub const DEFAULT_AFTER_LOGIN: &str = "/profile";

/// What a guarded route should render for the current session.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GuardDecision {
    /// Session still restoring; render a neutral placeholder.
    Pending,
    /// Navigate to this login URL instead of rendering.
    Redirect(String),
    /// Render the protected content.
    Allow,
}

/// Decide how to handle a request for `requested_path` under `state`.
pub fn guard_decision(state: &AuthState, requested_path: &str) -> GuardDecision {
    if state.loading {
        GuardDecision::Pending
    } else if !state.is_authenticated() {
        GuardDecision::Redirect(login_redirect_url(requested_path))
    } else {
        GuardDecision::Allow
    }
}

/// `/login?redirect=<encoded path>`, or bare `/login` for an empty path.
pub fn login_redirect_url(requested_path: &str) -> String {
    if requested_path.is_empty() {
        return LOGIN_PATH.to_owned();
    }
    format!("{LOGIN_PATH}?{REDIRECT_PARAM}={}", urlencoding::encode(requested_path))
}

/// Where to go after a successful login, given the raw `redirect` query value.
///
/// Only site-local paths are honored; anything else falls back to
/// [`DEFAULT_AFTER_LOGIN`]. URL parsers drop tab and newline before resolving
/// (`/\t/host` becomes `//host`), so any control character disqualifies.
pub fn redirect_target(raw: Option<&str>) -> String {
    match raw {
        Some(path) if is_local_path(path) => path.to_owned(),
        _ => DEFAULT_AFTER_LOGIN.to_owned(),
    }
}

fn is_local_path(path: &str) -> bool {
    path.starts_with('/')
        && !path.starts_with("//")
        && !path.contains('\\')
        && !path.chars().any(char::is_control)
}

/// Path plus query string of the current location, as carried through login.
///
/// `search` may arrive with or without its leading `?`.
pub fn requested_path(pathname: &str, search: &str) -> String {
    let query = search.strip_prefix('?').unwrap_or(search);
    if query.is_empty() { pathname.to_owned() } else { format!("{pathname}?{query}") }
}
