//! Linked identity model and persistence keying.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::ValidateEmail;

use cloudvault_core::AppError;
use cloudvault_core::result::AppResult;

/// The account linked to the active session.
///
/// Absent entirely in anonymous mode; linking and unlinking swap which
/// vault is active, they never merge vault contents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// The linked email address.
    pub email: String,
    /// Human-readable display name.
    pub display_name: String,
    /// Optional avatar reference (URL or provider handle).
    pub avatar_ref: Option<String>,
    /// When the identity was linked.
    pub linked_at: DateTime<Utc>,
}

impl Identity {
    /// Link an identity from an email address.
    ///
    /// The address is trimmed and validated; the display name defaults to
    /// the mailbox local part.
    pub fn link(email: &str) -> AppResult<Self> {
        let email = email.trim();
        if !email.validate_email() {
            return Err(AppError::validation(format!(
                "Invalid email address: '{email}'"
            )));
        }

        let display_name = email.split('@').next().unwrap_or(email).to_string();

        Ok(Self {
            email: email.to_string(),
            display_name,
            avatar_ref: None,
            linked_at: Utc::now(),
        })
    }

    /// The persistence key owning this identity's vault.
    pub fn key(&self) -> IdentityKey {
        IdentityKey::Linked(self.email.clone())
    }
}

/// Selects which persisted vault a session reads and writes.
///
/// Every key owns an independent blob; switching identity must never
/// touch another key's vault.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IdentityKey {
    /// Anonymous / local-only mode.
    Anonymous,
    /// A linked account, keyed by its email address.
    Linked(String),
}

impl IdentityKey {
    /// Derive the key for an optional identity.
    pub fn for_identity(identity: Option<&Identity>) -> Self {
        match identity {
            Some(identity) => identity.key(),
            None => Self::Anonymous,
        }
    }

    /// A filesystem-safe token for this key, usable as a file stem.
    ///
    /// Validated emails always contain `@`, so a linked slug can never
    /// collide with the anonymous one.
    pub fn slug(&self) -> String {
        match self {
            Self::Anonymous => "anonymous".to_string(),
            Self::Linked(email) => email
                .chars()
                .map(|c| match c {
                    'a'..='z' | 'A'..='Z' | '0'..='9' | '.' | '-' | '_' | '@' | '+' => c,
                    _ => '_',
                })
                .collect(),
        }
    }
}

impl fmt::Display for IdentityKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Anonymous => write!(f, "anonymous"),
            Self::Linked(email) => write!(f, "{email}"),
        }
    }
}
