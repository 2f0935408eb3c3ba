//! Known-user directory backing login and registration.
//!
//! ARCHITECTURE
//! ============
//! The session only talks to [`UserDirectory`], so a real account backend can
//! replace [`InMemoryDirectory`] without touching session logic. The
//! in-memory directory starts with a single bootstrap account and lives as
//! long as the page.
//!
//! TRADE-OFFS
//! ==========
//! Ids come from a counter owned by the directory rather than the entry count,
//! so they stay unique even if entries are ever dropped or appended out of
//! order. Credentials are SHA-256 digests salted with the email. That keeps
//! plaintext out of memory dumps, but it is not a password-hashing scheme fit
//! for a real server.

#[cfg(test)]
#[path = "directory_test.rs"]
mod directory_test;

use std::fmt::Write;

use sha2::{Digest, Sha256};

use crate::state::user::{User, UserRole};

/// Email of the bootstrap account.
pub const SEED_EMAIL: &str = "john@example.com";

/// Password of the bootstrap account.
pub const SEED_PASSWORD: &str = "password123";

fn bytes_to_hex(bytes: &[u8]) -> String {
    let mut s = String::with_capacity(bytes.len() * 2);
    for b in bytes {
        let _ = write!(s, "{b:02x}");
    }
    s
}

/// Hex SHA-256 digest of a password, salted with the owning email.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    #[must_use]
    pub fn derive(email: &str, password: &str) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(email.as_bytes());
        hasher.update(b":");
        hasher.update(password.as_bytes());
        Self(bytes_to_hex(&hasher.finalize()))
    }

    #[must_use]
    pub fn verify(&self, email: &str, password: &str) -> bool {
        *self == Self::derive(email, password)
    }
}

impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Credential(..)")
    }
}

/// A directory row: the public record plus its credential.
#[derive(Clone, Debug)]
pub struct DirectoryEntry {
    pub user: User,
    pub credential: Credential,
}

/// Account lookup and enrollment capability used by the auth session.
pub trait UserDirectory: Send {
    /// Find the entry whose email matches exactly (case-sensitive).
    fn lookup(&self, email: &str) -> Option<&DirectoryEntry>;

    /// Reserve the next unused identifier.
    fn next_id(&mut self) -> String;

    /// Add a new entry. Callers check email uniqueness first.
    fn append(&mut self, entry: DirectoryEntry);

    /// Replace the record with the same id, keeping its credential.
    /// Returns `false` when no such record exists.
    fn replace(&mut self, user: User) -> bool;

    /// Number of entries.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Page-lifetime directory seeded with the bootstrap account.
#[derive(Debug)]
pub struct InMemoryDirectory {
    entries: Vec<DirectoryEntry>,
    next_id: u64,
}

impl InMemoryDirectory {
    /// Empty directory; the first id handed out is `"1"`.
    #[must_use]
    pub fn empty() -> Self {
        Self { entries: Vec::new(), next_id: 1 }
    }

    /// Directory holding only the bootstrap account (`john@example.com`).
    #[must_use]
    pub fn seeded() -> Self {
        let mut directory = Self::empty();
        let user = User {
            id: directory.next_id(),
            email: SEED_EMAIL.to_owned(),
            first_name: "John".to_owned(),
            last_name: "Doe".to_owned(),
            phone: "+1234567890".to_owned(),
            address: "123 Main St, City, Country".to_owned(),
            role: UserRole::Bidder,
        };
        let credential = Credential::derive(&user.email, SEED_PASSWORD);
        directory.append(DirectoryEntry { user, credential });
        directory
    }

    /// Records in insertion order.
    #[cfg(test)]
    pub fn users(&self) -> impl Iterator<Item = &User> {
        self.entries.iter().map(|e| &e.user)
    }
}

impl UserDirectory for InMemoryDirectory {
    fn lookup(&self, email: &str) -> Option<&DirectoryEntry> {
        self.entries.iter().find(|e| e.user.email == email)
    }

    fn next_id(&mut self) -> String {
        let id = self.next_id;
        self.next_id += 1;
        id.to_string()
    }

    fn append(&mut self, entry: DirectoryEntry) {
        self.entries.push(entry);
    }

    fn replace(&mut self, user: User) -> bool {
        match self.entries.iter_mut().find(|e| e.user.id == user.id) {
            Some(entry) => {
                entry.user = user;
                true
            }
            None => false,
        }
    }

    fn len(&self) -> usize {
        self.entries.len()
    }
}
