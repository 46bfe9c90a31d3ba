//! Password hashing utilities using Argon2id
//!
//! New accounts get a salted Argon2id hash in PHC string format. Registries
//! written before salting was introduced hold a bare SHA-256 hex digest per
//! account; those still verify, and `HashMode::Sha256` can produce them for
//! tests that need deterministic, fast hashes.
//!
//! **Never use `HashMode::Sha256` for real accounts** - it is unsalted.

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use easel_common::hash::{constant_time_eq, sha256_hex};
use easel_common::validators;
use thiserror::Error;

/// How new secrets are hashed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HashMode {
    /// Salted Argon2id (PHC string)
    #[default]
    Argon2,
    /// Unsalted SHA-256 hex digest (legacy format)
    Sha256,
}

/// Error type for password operations
#[derive(Debug, Error)]
pub enum PasswordError {
    /// Secret exceeds the maximum accepted length
    #[error("secret exceeds {} bytes", validators::MAX_PASSWORD_LENGTH)]
    TooLong,
    /// Hashing or verification failed, or the stored hash is malformed
    #[error("{0}")]
    Hash(#[from] argon2::password_hash::Error),
}

/// Hash a secret
///
/// # Returns
///
/// * `Ok(String)` - The hash
///   - `Argon2`: PHC string with a fresh random salt
///   - `Sha256`: 64-char lowercase hex digest
/// * `Err` - If the secret is too long or hashing fails
pub fn hash_secret(secret: &str, mode: HashMode) -> Result<String, PasswordError> {
    if validators::validate_password_input(secret).is_err() {
        return Err(PasswordError::TooLong);
    }

    match mode {
        HashMode::Sha256 => Ok(sha256_hex(secret)),
        HashMode::Argon2 => {
            let salt = SaltString::generate(&mut OsRng);
            let hash = Argon2::default().hash_password(secret.as_bytes(), &salt)?;
            Ok(hash.to_string())
        }
    }
}

/// Verify a secret against a stored hash
///
/// Detects the hash format automatically:
/// - 64-char lowercase hex is a legacy SHA-256 digest
/// - anything else is parsed as a PHC string
///
/// # Returns
///
/// * `Ok(true)` - Secret matches
/// * `Ok(false)` - Secret does not match
/// * `Err` - The secret is too long, or the stored hash is malformed
pub fn verify_secret(secret: &str, stored_hash: &str) -> Result<bool, PasswordError> {
    if validators::validate_password_input(secret).is_err() {
        return Err(PasswordError::TooLong);
    }

    if validators::validate_sha256(stored_hash).is_ok() {
        return Ok(constant_time_eq(&sha256_hex(secret), stored_hash));
    }

    let parsed = PasswordHash::new(stored_hash)?;
    match Argon2::default().verify_password(secret.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(PasswordError::Hash(e)),
    }
}
