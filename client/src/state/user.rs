//! User records shared by the directory, the session store, and the pages.
//!
//! DESIGN
//! ======
//! Field names serialize in camelCase so the persisted `user` blob keeps the
//! layout the browser already holds. Credentials never live on `User`; they
//! stay in the directory entry.

#[cfg(test)]
#[path = "user_test.rs"]
mod user_test;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Account role chosen at registration.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    /// Places bids on listed lots.
    #[default]
    Bidder,
    /// Lists lots and runs auctions.
    Auctioneer,
}

impl UserRole {
    /// Stable wire value (`"bidder"` / `"auctioneer"`).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Bidder => "bidder",
            Self::Auctioneer => "auctioneer",
        }
    }

    /// Human-readable label for form controls and the profile card.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Bidder => "Bidder",
            Self::Auctioneer => "Auctioneer",
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "bidder" => Ok(Self::Bidder),
            "auctioneer" => Ok(Self::Auctioneer),
            other => Err(format!("unknown user role: {other}")),
        }
    }
}

/// A known user. This is the record persisted under the session key.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Opaque unique identifier assigned by the directory.
    pub id: String,
    /// Login identity; unique across the directory.
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub address: String,
    /// Account role.
    #[serde(rename = "userType")]
    pub role: UserRole,
}

impl User {
    /// "First Last", trimmed when either part is blank.
    #[must_use]
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name).trim().to_owned()
    }

    /// Copy of this user with the editable profile fields replaced.
    #[must_use]
    pub fn with_profile(&self, update: &ProfileUpdate) -> Self {
        Self {
            first_name: update.first_name.clone(),
            last_name: update.last_name.clone(),
            phone: update.phone.clone(),
            address: update.address.clone(),
            ..self.clone()
        }
    }
}

/// Input for a new account. The password is only ever digested.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Registration {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub address: String,
    pub role: UserRole,
    pub password: String,
}

impl Registration {
    /// Build the stored record once the directory has assigned an id.
    #[must_use]
    pub fn into_user(self, id: String) -> User {
        User {
            id,
            email: self.email,
            first_name: self.first_name,
            last_name: self.last_name,
            phone: self.phone,
            address: self.address,
            role: self.role,
        }
    }
}

/// Editable subset of a user record shown on the profile page.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ProfileUpdate {
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub address: String,
}

impl From<&User> for ProfileUpdate {
    fn from(user: &User) -> Self {
        Self {
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            phone: user.phone.clone(),
            address: user.address.clone(),
        }
    }
}
