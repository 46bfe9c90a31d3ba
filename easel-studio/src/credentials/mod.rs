//! Account credentials
//!
//! A `CredentialStore` is the durable, uniqueness-enforcing registry of
//! `(identity, secret hash)` pairs. Stores are injected into the session
//! rather than reached through ambient file access, so tests can swap in
//! [`MemoryStore`] and the file-backed [`JsonFileStore`] can serialize writers.
//!
//! The registry document is read in full before any lookup and rewritten in
//! full after any mutation.

mod json_store;
mod memory;
mod password;

pub use json_store::JsonFileStore;
pub use memory::MemoryStore;
pub use password::{HashMode, PasswordError, hash_secret, verify_secret};

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::AuthError;

/// A registered account
///
/// Only the secret hash is kept; the plaintext secret is never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// Argon2 PHC string, or a legacy SHA-256 hex digest
    #[serde(rename = "secretHash", alias = "password_hash")]
    secret_hash: String,
}

impl Account {
    /// Create an account record from an already computed hash
    pub fn new(secret_hash: String) -> Self {
        Self { secret_hash }
    }

    /// The stored hash
    pub fn secret_hash(&self) -> &str {
        &self.secret_hash
    }
}

/// Full contents of a registry document, keyed by identity
///
/// Serializes as a JSON object `{ "<identity>": { "secretHash": "..." } }`
/// with keys in sorted order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Registry {
    accounts: BTreeMap<String, Account>,
}

impl Registry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether an account exists for `identity` (case-sensitive)
    pub fn contains(&self, identity: &str) -> bool {
        self.accounts.contains_key(identity)
    }

    /// Look up an account
    pub fn get(&self, identity: &str) -> Option<&Account> {
        self.accounts.get(identity)
    }

    /// Number of accounts
    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    /// Whether the registry has no accounts
    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    /// Add a new account, hashing `secret` with `mode`
    ///
    /// The registry is left untouched on failure.
    pub fn register(
        &mut self,
        identity: &str,
        secret: &str,
        mode: HashMode,
    ) -> Result<(), AuthError> {
        if self.contains(identity) {
            return Err(AuthError::AlreadyExists);
        }
        let secret_hash = hash_secret(secret, mode)?;
        self.accounts
            .insert(identity.to_string(), Account::new(secret_hash));
        Ok(())
    }

    /// Check `secret` against the stored hash for `identity`
    pub fn authenticate(&self, identity: &str, secret: &str) -> Result<(), AuthError> {
        let account = self.get(identity).ok_or(AuthError::NotFound)?;
        match verify_secret(secret, account.secret_hash()) {
            Ok(true) => Ok(()),
            Ok(false) => Err(AuthError::InvalidSecret),
            Err(e) => {
                tracing::warn!(identity, error = %e, "stored hash could not be verified");
                Err(AuthError::InvalidSecret)
            }
        }
    }
}

/// Durable registry of accounts
///
/// Implementations must make `register` all-or-nothing: when it returns an
/// error the durable registry is exactly as it was before the call.
pub trait CredentialStore {
    /// Read the whole registry
    ///
    /// A missing or malformed document reads as an empty registry.
    fn load(&self) -> Registry;

    /// Replace the whole registry
    fn save(&self, registry: &Registry) -> Result<(), AuthError>;

    /// Create an account
    ///
    /// Fails with `AlreadyExists` if `identity` is present. The registry is
    /// persisted before this returns `Ok`.
    fn register(&self, identity: &str, secret: &str) -> Result<(), AuthError>;

    /// Check a secret for an identity
    ///
    /// Fails with `NotFound` if `identity` is absent and `InvalidSecret` if
    /// the secret does not match.
    fn authenticate(&self, identity: &str, secret: &str) -> Result<(), AuthError> {
        self.load().authenticate(identity, secret)
    }
}
