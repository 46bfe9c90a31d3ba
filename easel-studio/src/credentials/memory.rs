//! In-memory credential store
//!
//! Keeps the registry in process memory. Used by tests and by sessions that
//! should not touch disk.

use std::sync::{Mutex, MutexGuard, PoisonError};

use super::{CredentialStore, HashMode, Registry};
use crate::error::AuthError;

/// Credential store that never persists
#[derive(Debug, Default)]
pub struct MemoryStore {
    registry: Mutex<Registry>,
    hash_mode: HashMode,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a different hash format for new accounts
    pub fn with_hash_mode(mut self, hash_mode: HashMode) -> Self {
        self.hash_mode = hash_mode;
        self
    }

    fn registry(&self) -> MutexGuard<'_, Registry> {
        self.registry.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl CredentialStore for MemoryStore {
    fn load(&self) -> Registry {
        self.registry().clone()
    }

    fn save(&self, registry: &Registry) -> Result<(), AuthError> {
        *self.registry() = registry.clone();
        Ok(())
    }

    fn register(&self, identity: &str, secret: &str) -> Result<(), AuthError> {
        // Hash on a copy so a failure leaves the shared registry untouched
        let mut registry = self.registry();
        let mut updated = registry.clone();
        updated.register(identity, secret, self.hash_mode)?;
        *registry = updated;
        Ok(())
    }
}
