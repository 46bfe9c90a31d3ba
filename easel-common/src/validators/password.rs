//! Password validation
//!
//! Validates password strings for different contexts:
//! - `validate_password_input` - For login flow (only the length cap applies)
//! - `validate_password` - For new accounts (non-empty, minimum length)

use crate::MIN_PASSWORD_LENGTH;

/// Maximum length for passwords in bytes
///
/// Argon2 hashing cost grows with input length, so very long inputs are refused.
pub const MAX_PASSWORD_LENGTH: usize = 256;

/// Validation error for passwords
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PasswordError {
    /// Password is empty
    Empty,
    /// Password is shorter than the minimum length
    TooShort,
    /// Password exceeds maximum length
    TooLong,
}

/// Validate a password for login
///
/// Checks:
/// - Does not exceed maximum length (256 bytes)
///
/// Emptiness is checked by the login form itself; the credential store
/// decides whether the password is correct.
///
/// # Errors
///
/// Returns a `PasswordError` variant describing the validation failure.
pub fn validate_password_input(password: &str) -> Result<(), PasswordError> {
    if password.len() > MAX_PASSWORD_LENGTH {
        return Err(PasswordError::TooLong);
    }
    Ok(())
}

/// Validate a password for a new account
///
/// Checks:
/// - Not empty
/// - At least 6 characters (counted as Unicode scalar values)
/// - Does not exceed maximum length (256 bytes)
///
/// No other strength policy is applied. Control characters and spaces are
/// allowed since they may be part of a passphrase or generated password.
///
/// # Errors
///
/// Returns a `PasswordError` variant describing the validation failure.
pub fn validate_password(password: &str) -> Result<(), PasswordError> {
    if password.is_empty() {
        return Err(PasswordError::Empty);
    }
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(PasswordError::TooShort);
    }
    if password.len() > MAX_PASSWORD_LENGTH {
        return Err(PasswordError::TooLong);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    // ========================================================================
    // validate_password_input tests (login flow)
    // ========================================================================

    #[test]
    fn test_input_valid_passwords() {
        assert!(validate_password_input("password123").is_ok());
        assert!(validate_password_input("a").is_ok());
        assert!(validate_password_input(&"a".repeat(MAX_PASSWORD_LENGTH)).is_ok());
        assert!(validate_password_input("correct horse battery staple").is_ok());
        assert!(validate_password_input("密码🔐").is_ok());
    }

    #[test]
    fn test_input_too_long() {
        assert_eq!(
            validate_password_input(&"a".repeat(MAX_PASSWORD_LENGTH + 1)),
            Err(PasswordError::TooLong)
        );
    }

    // ========================================================================
    // validate_password tests (registration flow)
    // ========================================================================

    #[test]
    fn test_valid_passwords() {
        assert!(validate_password("abcdef").is_ok());
        assert!(validate_password("p@$$w0rd!#$%").is_ok());
        assert!(validate_password("correct horse battery staple").is_ok());
        assert!(validate_password("pass\tword").is_ok());
        assert!(validate_password(&"a".repeat(MAX_PASSWORD_LENGTH)).is_ok());
    }

    #[test]
    fn test_empty() {
        assert_eq!(validate_password(""), Err(PasswordError::Empty));
    }

    #[test]
    fn test_minimum_length_boundary() {
        // 5 characters is one short
        assert_eq!(validate_password("abc12"), Err(PasswordError::TooShort));
        // 6 characters is accepted
        assert!(validate_password("abc123").is_ok());
    }

    #[test]
    fn test_minimum_length_counts_characters() {
        // Six multi-byte characters meet the minimum even though byte length is larger
        assert!(validate_password("密码密码密码").is_ok());
        // Five multi-byte characters do not, despite being more than six bytes
        assert_eq!(validate_password("密码密码密"), Err(PasswordError::TooShort));
    }

    #[test]
    fn test_too_long() {
        assert_eq!(
            validate_password(&"a".repeat(MAX_PASSWORD_LENGTH + 1)),
            Err(PasswordError::TooLong)
        );
    }
}
