use std::sync::{Arc, Mutex};

use futures::executor::block_on;

use super::*;
use crate::state::directory::{InMemoryDirectory, SEED_PASSWORD};
use crate::state::user::UserRole;
use crate::util::session_store::{MemoryStorage, SESSION_KEY, SessionStorage};

fn registration(email: &str) -> Registration {
    Registration {
        email: email.to_owned(),
        first_name: "Jane".to_owned(),
        last_name: "Roe".to_owned(),
        phone: "555-0100".to_owned(),
        address: "1 Elm St".to_owned(),
        role: UserRole::Auctioneer,
        password: "hunter22".to_owned(),
    }
}

fn session_with(storage: &MemoryStorage) -> AuthSession {
    AuthSession::new(InMemoryDirectory::seeded(), SessionStore::new(storage.clone()))
}

fn restored_session(storage: &MemoryStorage) -> AuthSession {
    let mut session = session_with(storage);
    session.restore();
    session
}

fn context_with(storage: &MemoryStorage) -> AuthContext {
    let ctx = AuthContext::new(InMemoryDirectory::seeded(), SessionStore::new(storage.clone()));
    ctx.restore();
    ctx
}

fn persisted(storage: &MemoryStorage) -> Option<String> {
    storage.get_item(SESSION_KEY).unwrap()
}

// =============================================================================
// restore
// =============================================================================

#[test]
fn new_session_starts_loading() {
    let session = session_with(&MemoryStorage::new());
    assert!(session.state().loading);
    assert!(!session.state().is_authenticated());
}

#[test]
fn restore_without_persisted_user_signs_out() {
    let mut session = session_with(&MemoryStorage::new());
    assert!(session.restore());
    assert_eq!(session.state(), &AuthState::signed_out());
}

#[test]
fn restore_with_persisted_user_signs_in() {
    let storage = MemoryStorage::new();
    let mut first = restored_session(&storage);
    let john = first.login("john@example.com", SEED_PASSWORD).unwrap();

    let mut second = session_with(&storage);
    assert!(second.restore());
    assert_eq!(second.state(), &AuthState::signed_in(john));
}

#[test]
fn restore_with_corrupt_storage_signs_out_and_clears() {
    let storage = MemoryStorage::new();
    storage.set_item(SESSION_KEY, "][").unwrap();

    let mut session = session_with(&storage);
    session.restore();
    assert_eq!(session.state(), &AuthState::signed_out());
    assert_eq!(persisted(&storage), None);
}

#[test]
fn restore_runs_only_once() {
    let storage = MemoryStorage::new();
    let mut session = restored_session(&storage);

    // A user persisted after resolution is not picked up by a second restore.
    SessionStore::new(storage.clone()).persist(&registration("late@example.com").into_user("9".to_owned()));
    assert!(!session.restore());
    assert_eq!(session.state(), &AuthState::signed_out());
}

// =============================================================================
// login
// =============================================================================

#[test]
fn login_seed_account_with_seed_password_succeeds() {
    let storage = MemoryStorage::new();
    let mut session = restored_session(&storage);

    let user = session.login("john@example.com", "password123").unwrap();
    assert_eq!(user.id, "1");
    assert!(session.state().is_authenticated());
    assert_eq!(session.state().user.as_ref(), Some(&user));
    assert!(persisted(&storage).is_some());
}

#[test]
fn login_wrong_password_fails_without_state_change() {
    let storage = MemoryStorage::new();
    let mut session = restored_session(&storage);

    assert_eq!(session.login("john@example.com", "wrong"), Err(AuthError::InvalidCredentials));
    assert_eq!(session.state(), &AuthState::signed_out());
    assert_eq!(persisted(&storage), None);
}

#[test]
fn login_unknown_email_fails_with_same_error() {
    let mut session = restored_session(&MemoryStorage::new());
    assert_eq!(session.login("nobody@example.com", "password123"), Err(AuthError::InvalidCredentials));
    assert_eq!(session.login("nobody@example.com", "anything"), Err(AuthError::InvalidCredentials));
}

#[test]
fn login_email_match_is_case_sensitive() {
    let mut session = restored_session(&MemoryStorage::new());
    assert_eq!(session.login("JOHN@example.com", "password123"), Err(AuthError::InvalidCredentials));
}

#[test]
fn failed_login_keeps_existing_session() {
    let mut session = restored_session(&MemoryStorage::new());
    let john = session.login("john@example.com", "password123").unwrap();
    assert!(session.login("john@example.com", "nope").is_err());
    assert_eq!(session.state(), &AuthState::signed_in(john));
}

// =============================================================================
// register
// =============================================================================

#[test]
fn register_fresh_email_grows_directory_and_signs_in() {
    let storage = MemoryStorage::new();
    let mut session = restored_session(&storage);
    let before = session.directory().len();

    let user = session.register(registration("jane@example.com")).unwrap();
    assert_eq!(session.directory().len(), before + 1);
    assert_eq!(user.id, "2");
    assert_eq!(user.role, UserRole::Auctioneer);
    assert_eq!(session.state(), &AuthState::signed_in(user.clone()));

    let restored = SessionStore::new(storage).restore();
    assert_eq!(restored, Some(user));
}

#[test]
fn register_existing_email_fails_and_leaves_directory_unchanged() {
    let storage = MemoryStorage::new();
    let mut session = restored_session(&storage);

    assert_eq!(session.register(registration("john@example.com")), Err(AuthError::EmailTaken));
    assert_eq!(session.directory().len(), 1);
    assert_eq!(session.state(), &AuthState::signed_out());
    assert_eq!(persisted(&storage), None);
}

#[test]
fn register_twice_with_same_email_fails_second_time() {
    let mut session = restored_session(&MemoryStorage::new());
    session.register(registration("jane@example.com")).unwrap();
    assert_eq!(session.register(registration("jane@example.com")), Err(AuthError::EmailTaken));
    assert_eq!(session.directory().len(), 2);
}

#[test]
fn register_assigns_distinct_sequential_ids() {
    let mut session = restored_session(&MemoryStorage::new());
    let a = session.register(registration("a@example.com")).unwrap();
    let b = session.register(registration("b@example.com")).unwrap();
    assert_eq!(a.id, "2");
    assert_eq!(b.id, "3");
}

#[test]
fn registered_user_logs_in_with_own_password_only() {
    let mut session = restored_session(&MemoryStorage::new());
    session.register(registration("jane@example.com")).unwrap();
    session.logout();

    assert_eq!(session.login("jane@example.com", "password123"), Err(AuthError::InvalidCredentials));
    let user = session.login("jane@example.com", "hunter22").unwrap();
    assert_eq!(user.email, "jane@example.com");
}

#[test]
fn persisted_record_never_contains_password() {
    let storage = MemoryStorage::new();
    let mut session = restored_session(&storage);
    session.register(registration("jane@example.com")).unwrap();

    let raw = persisted(&storage).unwrap();
    assert!(!raw.contains("hunter22"));
    assert!(!raw.contains("password"));
    assert!(!raw.contains("credential"));
}

// =============================================================================
// logout
// =============================================================================

#[test]
fn logout_clears_storage_and_signs_out() {
    let storage = MemoryStorage::new();
    let mut session = restored_session(&storage);
    session.login("john@example.com", "password123").unwrap();

    assert!(session.logout());
    assert_eq!(session.state(), &AuthState::signed_out());
    assert_eq!(persisted(&storage), None);
}

#[test]
fn logout_twice_equals_logout_once() {
    let storage = MemoryStorage::new();
    let mut session = restored_session(&storage);
    session.login("john@example.com", "password123").unwrap();

    assert!(session.logout());
    let after_once = session.state().clone();
    assert!(!session.logout());
    assert_eq!(session.state(), &after_once);
    assert_eq!(persisted(&storage), None);
}

#[test]
fn logout_while_loading_resolves_signed_out() {
    let mut session = session_with(&MemoryStorage::new());
    assert!(session.logout());
    assert_eq!(session.state(), &AuthState::signed_out());
    assert!(!session.restore());
}

// =============================================================================
// update_profile
// =============================================================================

fn profile_update() -> ProfileUpdate {
    ProfileUpdate {
        first_name: "Johnny".to_owned(),
        last_name: "Doe".to_owned(),
        phone: "+1999".to_owned(),
        address: "9 Side St".to_owned(),
    }
}

#[test]
fn update_profile_requires_session() {
    let mut session = restored_session(&MemoryStorage::new());
    assert_eq!(session.update_profile(&profile_update()), Err(AuthError::NotAuthenticated));
}

#[test]
fn update_profile_updates_session_storage_and_directory() {
    let storage = MemoryStorage::new();
    let mut session = restored_session(&storage);
    session.login("john@example.com", "password123").unwrap();

    let user = session.update_profile(&profile_update()).unwrap();
    assert_eq!(user.first_name, "Johnny");
    assert_eq!(user.id, "1");
    assert_eq!(session.state().user.as_ref(), Some(&user));
    assert_eq!(SessionStore::new(storage).restore(), Some(user.clone()));
    assert_eq!(session.directory().lookup("john@example.com").unwrap().user, user);
}

#[test]
fn update_profile_for_restored_user_outside_directory_updates_session() {
    let storage = MemoryStorage::new();
    let mut first = restored_session(&storage);
    first.register(registration("jane@example.com")).unwrap();

    // A reloaded page only knows the seed account.
    let mut second = restored_session(&storage);
    let user = second.update_profile(&profile_update()).unwrap();
    assert_eq!(user.email, "jane@example.com");
    assert_eq!(SessionStore::new(storage).restore(), Some(user));
    assert_eq!(second.directory().len(), 1);
}

// =============================================================================
// AuthContext
// =============================================================================

fn recorder(ctx: &AuthContext) -> (SubscriptionId, Arc<Mutex<Vec<AuthState>>>) {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    let id = ctx.subscribe(move |state| sink.lock().unwrap().push(state.clone()));
    (id, seen)
}

#[test]
fn context_restore_notifies_once() {
    let ctx = AuthContext::new(InMemoryDirectory::seeded(), SessionStore::new(MemoryStorage::new()));
    let (_, seen) = recorder(&ctx);

    ctx.restore();
    ctx.restore();
    assert_eq!(*seen.lock().unwrap(), vec![AuthState::signed_out()]);
}

#[test]
fn context_login_notifies_subscribers() {
    let ctx = context_with(&MemoryStorage::new());
    let (_, seen) = recorder(&ctx);

    let user = block_on(ctx.login("john@example.com", "password123")).unwrap();
    assert_eq!(*seen.lock().unwrap(), vec![AuthState::signed_in(user)]);
    assert!(ctx.state().is_authenticated());
}

#[test]
fn context_failed_login_does_not_notify() {
    let ctx = context_with(&MemoryStorage::new());
    let (_, seen) = recorder(&ctx);

    assert_eq!(
        block_on(ctx.login("john@example.com", "wrong")),
        Err(AuthError::InvalidCredentials)
    );
    assert!(seen.lock().unwrap().is_empty());
}

#[test]
fn context_register_then_logout_notifies_in_order() {
    let ctx = context_with(&MemoryStorage::new());
    let (_, seen) = recorder(&ctx);

    let user = block_on(ctx.register(registration("jane@example.com"))).unwrap();
    ctx.logout();
    ctx.logout();
    assert_eq!(ctx.directory_len(), 2);
    assert_eq!(
        *seen.lock().unwrap(),
        vec![AuthState::signed_in(user), AuthState::signed_out()]
    );
}

#[test]
fn context_unsubscribed_listener_is_not_called() {
    let ctx = context_with(&MemoryStorage::new());
    let (id, seen) = recorder(&ctx);

    assert!(ctx.unsubscribe(id));
    assert!(!ctx.unsubscribe(id));
    block_on(ctx.login("john@example.com", "password123")).unwrap();
    assert!(seen.lock().unwrap().is_empty());
}

#[test]
fn context_listener_may_read_state() {
    let ctx = context_with(&MemoryStorage::new());
    let observed = Arc::new(Mutex::new(None));
    let sink = Arc::clone(&observed);
    let reader = ctx.clone();
    ctx.subscribe(move |_| *sink.lock().unwrap() = Some(reader.state()));

    ctx.logout();
    block_on(ctx.login("john@example.com", "password123")).unwrap();
    let state = observed.lock().unwrap().clone().unwrap();
    assert!(state.is_authenticated());
}

#[test]
fn context_clones_share_session() {
    let ctx = context_with(&MemoryStorage::new());
    let other = ctx.clone();
    block_on(ctx.login("john@example.com", "password123")).unwrap();
    assert!(other.state().is_authenticated());
}

#[test]
fn context_update_profile_notifies() {
    let ctx = context_with(&MemoryStorage::new());
    block_on(ctx.login("john@example.com", "password123")).unwrap();
    let (_, seen) = recorder(&ctx);

    let user = ctx.update_profile(&profile_update()).unwrap();
    assert_eq!(*seen.lock().unwrap(), vec![AuthState::signed_in(user)]);
}

#[test]
fn context_latency_defaults_to_one_second_and_is_configurable() {
    let ctx = context_with(&MemoryStorage::new());
    assert_eq!(ctx.latency(), Duration::from_millis(1000));
    let fast = ctx.with_latency(Duration::ZERO);
    assert_eq!(fast.latency(), Duration::ZERO);
}
