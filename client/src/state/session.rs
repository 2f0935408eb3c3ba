//! Auth session manager: login, registration, logout, profile edits.
//!
//! ARCHITECTURE
//! ============
//! [`AuthSession`] is the single owner of the directory, the session store,
//! and the current [`AuthState`]. Every transition is synchronous and returns
//! whether the published state changed.
//!
//! [`AuthContext`] is the cloneable handle the app provides to the component
//! tree. It adds the simulated latency in front of login/registration and
//! fans state changes out to subscribers.
//!
//! STATE MACHINE
//! =============
//! `Loading -> {SignedOut, SignedIn}` once via [`AuthSession::restore`], then
//! `SignedOut <-> SignedIn`. Failed operations leave the state untouched.
//!
//! CONCURRENCY
//! ===========
//! The lock is taken only after the latency future resolves, and released
//! before listeners run. Two overlapping submissions are not deduplicated;
//! whichever resolves last sets the session.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use crate::error::AuthError;
use crate::state::auth::AuthState;
use crate::state::directory::{Credential, DirectoryEntry, UserDirectory};
use crate::state::user::{ProfileUpdate, Registration, User};
use crate::util::latency;
use crate::util::session_store::SessionStore;

// =============================================================================
// AUTH SESSION
// =============================================================================

/// Owner of the directory, the persisted slot, and the current state.
pub struct AuthSession {
    directory: Box<dyn UserDirectory>,
    store: SessionStore,
    state: AuthState,
}

impl AuthSession {
    /// New session in the `loading` state. Call [`Self::restore`] to resolve.
    pub fn new(directory: impl UserDirectory + 'static, store: SessionStore) -> Self {
        Self { directory: Box::new(directory), store, state: AuthState::default() }
    }

    #[must_use]
    pub fn state(&self) -> &AuthState {
        &self.state
    }

    #[cfg(test)]
    #[must_use]
    pub fn directory(&self) -> &dyn UserDirectory {
        self.directory.as_ref()
    }

    /// Resolve the startup `loading` state from persisted storage.
    ///
    /// Runs once; later calls return `false` without reading storage.
    pub fn restore(&mut self) -> bool {
        if !self.state.loading {
            return false;
        }
        self.state = match self.store.restore() {
            Some(user) => {
                log::info!("session restored for {}", user.email);
                AuthState::signed_in(user)
            }
            None => AuthState::signed_out(),
        };
        true
    }

    /// Check `email`/`password` against the directory and sign in on success.
    ///
    /// # Errors
    ///
    /// [`AuthError::InvalidCredentials`] when the email is unknown or the
    /// password does not verify.
    pub fn login(&mut self, email: &str, password: &str) -> Result<User, AuthError> {
        let user = match self.directory.lookup(email) {
            Some(entry) if entry.credential.verify(email, password) => entry.user.clone(),
            _ => {
                log::info!("login rejected for {email}");
                return Err(AuthError::InvalidCredentials);
            }
        };
        log::info!("login succeeded for {email}");
        self.sign_in(user.clone());
        Ok(user)
    }

    /// Enroll a new account and sign it in.
    ///
    /// # Errors
    ///
    /// [`AuthError::EmailTaken`] when the email already exists; the directory
    /// is left unchanged.
    pub fn register(&mut self, registration: Registration) -> Result<User, AuthError> {
        if self.directory.lookup(&registration.email).is_some() {
            log::info!("registration rejected: {} already exists", registration.email);
            return Err(AuthError::EmailTaken);
        }
        let credential = Credential::derive(&registration.email, &registration.password);
        let id = self.directory.next_id();
        let user = registration.into_user(id);
        self.directory.append(DirectoryEntry { user: user.clone(), credential });
        log::info!("registered {} as user {}", user.email, user.id);
        self.sign_in(user.clone());
        Ok(user)
    }

    /// Clear the persisted session and sign out.
    ///
    /// Returns `false` when already signed out.
    pub fn logout(&mut self) -> bool {
        self.store.clear();
        if self.state == AuthState::signed_out() {
            return false;
        }
        if let Some(user) = &self.state.user {
            log::info!("logged out {}", user.email);
        }
        self.state = AuthState::signed_out();
        true
    }

    /// Apply profile edits to the signed-in user.
    ///
    /// A restored user missing from this page's directory still gets the
    /// session and persisted copy updated.
    ///
    /// # Errors
    ///
    /// [`AuthError::NotAuthenticated`] when no user is signed in.
    pub fn update_profile(&mut self, update: &ProfileUpdate) -> Result<User, AuthError> {
        let current = self.state.user.as_ref().ok_or(AuthError::NotAuthenticated)?;
        let user = current.with_profile(update);
        if !self.directory.replace(user.clone()) {
            log::debug!("user {} not in directory; updating session only", user.id);
        }
        self.sign_in(user.clone());
        Ok(user)
    }

    fn sign_in(&mut self, user: User) {
        self.store.persist(&user);
        self.state = AuthState::signed_in(user);
    }
}

// =============================================================================
// AUTH CONTEXT
// =============================================================================

/// Handle returned by [`AuthContext::subscribe`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Arc<dyn Fn(&AuthState) + Send + Sync>;

#[derive(Default)]
struct Listeners {
    next_id: u64,
    entries: Vec<(SubscriptionId, Listener)>,
}

/// Shared, cloneable entry point to the auth session for the component tree.
#[derive(Clone)]
pub struct AuthContext {
    session: Arc<Mutex<AuthSession>>,
    listeners: Arc<Mutex<Listeners>>,
    latency: Duration,
}

impl AuthContext {
    /// Wrap a fresh session using the default simulated latency.
    pub fn new(directory: impl UserDirectory + 'static, store: SessionStore) -> Self {
        Self {
            session: Arc::new(Mutex::new(AuthSession::new(directory, store))),
            listeners: Arc::new(Mutex::new(Listeners::default())),
            latency: latency::SIMULATED_LATENCY,
        }
    }

    /// Override the delay applied before login and registration resolve.
    #[cfg(test)]
    #[must_use]
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    #[cfg(test)]
    #[must_use]
    pub fn latency(&self) -> Duration {
        self.latency
    }

    fn session(&self) -> MutexGuard<'_, AuthSession> {
        self.session.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Current state snapshot.
    #[must_use]
    pub fn state(&self) -> AuthState {
        self.session().state().clone()
    }

    /// Number of known accounts.
    #[cfg(test)]
    #[must_use]
    pub fn directory_len(&self) -> usize {
        self.session().directory().len()
    }

    /// Register `listener` for every subsequent state change.
    pub fn subscribe(&self, listener: impl Fn(&AuthState) + Send + Sync + 'static) -> SubscriptionId {
        let mut listeners = self.listeners.lock().unwrap_or_else(PoisonError::into_inner);
        let id = SubscriptionId(listeners.next_id);
        listeners.next_id += 1;
        listeners.entries.push((id, Arc::new(listener)));
        id
    }

    /// Drop a listener. Returns `false` if `id` was not registered.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut listeners = self.listeners.lock().unwrap_or_else(PoisonError::into_inner);
        let before = listeners.entries.len();
        listeners.entries.retain(|(entry_id, _)| *entry_id != id);
        listeners.entries.len() != before
    }

    /// Resolve the startup state from storage; no-op after the first call.
    pub fn restore(&self) {
        self.apply(AuthSession::restore);
    }

    /// Sign in after the simulated latency.
    ///
    /// # Errors
    ///
    /// See [`AuthSession::login`].
    pub async fn login(&self, email: &str, password: &str) -> Result<User, AuthError> {
        latency::simulate(self.latency).await;
        self.apply_result(|session| session.login(email, password))
    }

    /// Register and sign in after the simulated latency.
    ///
    /// # Errors
    ///
    /// See [`AuthSession::register`].
    pub async fn register(&self, registration: Registration) -> Result<User, AuthError> {
        latency::simulate(self.latency).await;
        self.apply_result(|session| session.register(registration))
    }

    /// Sign out immediately.
    pub fn logout(&self) {
        self.apply(AuthSession::logout);
    }

    /// Save profile edits for the signed-in user.
    ///
    /// # Errors
    ///
    /// See [`AuthSession::update_profile`].
    pub fn update_profile(&self, update: &ProfileUpdate) -> Result<User, AuthError> {
        self.apply_result(|session| session.update_profile(update))
    }

    fn apply(&self, op: impl FnOnce(&mut AuthSession) -> bool) {
        let changed = {
            let mut session = self.session();
            op(&mut *session).then(|| session.state().clone())
        };
        if let Some(state) = changed {
            self.notify(&state);
        }
    }

    fn apply_result<T>(
        &self,
        op: impl FnOnce(&mut AuthSession) -> Result<T, AuthError>,
    ) -> Result<T, AuthError> {
        let (result, state) = {
            let mut session = self.session();
            let result = op(&mut *session);
            let state = session.state().clone();
            (result, state)
        };
        if result.is_ok() {
            self.notify(&state);
        }
        result
    }

    fn notify(&self, state: &AuthState) {
        let listeners: Vec<Listener> = {
            let listeners = self.listeners.lock().unwrap_or_else(PoisonError::into_inner);
            listeners.entries.iter().map(|(_, l)| Arc::clone(l)).collect()
        };
        for listener in listeners {
            listener(state);
        }
    }
}
