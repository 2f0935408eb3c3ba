//! Durable single-slot storage for the active user.
//!
//! SYSTEM CONTEXT
//! ==============
//! The auth session persists exactly one JSON user record under
//! [`SESSION_KEY`]. Pages never touch storage directly; they go through the
//! session, which goes through [`SessionStore`].
//!
//! ERROR HANDLING
//! ==============
//! Nothing here surfaces an error to callers. A malformed blob reads as "no
//! session" and is deleted; backend failures are logged at `warn` and ignored.

#[cfg(test)]
#[path = "session_store_test.rs"]
mod session_store_test;

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use crate::error::StorageError;
use crate::state::user::User;

/// Storage key holding the serialized active user.
pub const SESSION_KEY: &str = "user";

/// Minimal key/value backend the session store writes through.
pub trait SessionStorage: Send {
    /// Read the raw value at `key`, `Ok(None)` when absent.
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;
    /// Overwrite the value at `key`.
    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;
    /// Delete `key`. Deleting an absent key is not an error.
    fn remove_item(&self, key: &str) -> Result<(), StorageError>;
}

/// `window.localStorage`, resolved on every call.
///
/// Holds no handle so it stays `Send`; outside the browser every read is
/// empty and every write reports [`StorageError::Unavailable`].
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserStorage;

#[cfg(feature = "hydrate")]
fn local_storage() -> Result<web_sys::Storage, StorageError> {
    web_sys::window()
        .and_then(|w| w.local_storage().ok().flatten())
        .ok_or(StorageError::Unavailable)
}

#[cfg(feature = "hydrate")]
fn js_error(err: &wasm_bindgen::JsValue) -> StorageError {
    StorageError::Backend(err.as_string().unwrap_or_else(|| format!("{err:?}")))
}

impl SessionStorage for BrowserStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        #[cfg(feature = "hydrate")]
        {
            local_storage()?.get_item(key).map_err(|e| js_error(&e))
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = key;
            Ok(None)
        }
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        #[cfg(feature = "hydrate")]
        {
            local_storage()?.set_item(key, value).map_err(|e| js_error(&e))
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (key, value);
            Err(StorageError::Unavailable)
        }
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        #[cfg(feature = "hydrate")]
        {
            local_storage()?.remove_item(key).map_err(|e| js_error(&e))
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = key;
            Ok(())
        }
    }
}

/// In-memory backend. Clones share the same map, so a store rebuilt from a
/// clone sees everything the first one persisted.
#[derive(Clone, Debug, Default)]
pub struct MemoryStorage {
    items: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn items(&self) -> std::sync::MutexGuard<'_, HashMap<String, String>> {
        self.items.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl SessionStorage for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.items().get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.items().insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        self.items().remove(key);
        Ok(())
    }
}

/// The persisted session slot.
pub struct SessionStore {
    backend: Box<dyn SessionStorage>,
}

impl SessionStore {
    pub fn new(backend: impl SessionStorage + 'static) -> Self {
        Self { backend: Box::new(backend) }
    }

    /// Serialize `user` under [`SESSION_KEY`], replacing any previous value.
    pub fn persist(&self, user: &User) {
        let raw = match serde_json::to_string(user) {
            Ok(raw) => raw,
            Err(e) => {
                log::warn!("session serialize failed: {e}");
                return;
            }
        };
        if let Err(e) = self.backend.set_item(SESSION_KEY, &raw) {
            log::warn!("session persist failed: {e}");
        }
    }

    /// Read the persisted user. Corrupt data is cleared and reads as `None`.
    pub fn restore(&self) -> Option<User> {
        let raw = match self.backend.get_item(SESSION_KEY) {
            Ok(raw) => raw?,
            Err(e) => {
                log::warn!("session read failed: {e}");
                return None;
            }
        };
        match serde_json::from_str::<User>(&raw) {
            Ok(user) => Some(user),
            Err(e) => {
                log::warn!("discarding malformed session: {e}");
                self.clear();
                None
            }
        }
    }

    /// Remove the persisted user, if any.
    pub fn clear(&self) {
        if let Err(e) = self.backend.remove_item(SESSION_KEY) {
            log::warn!("session clear failed: {e}");
        }
    }
}
