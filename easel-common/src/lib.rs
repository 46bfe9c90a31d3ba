//! Easel Common Library
//!
//! Validators and hashing helpers shared by the Easel studio and its tools.

pub mod hash;
pub mod validators;

/// Minimum password length in characters for new accounts
pub const MIN_PASSWORD_LENGTH: usize = 6;

