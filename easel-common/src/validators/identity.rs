//! Identity validation
//!
//! Validates account identities (usually an email address). Identities are
//! compared case-sensitively and are never normalized.

/// Maximum length for identities in characters (longest valid email address)
pub const MAX_IDENTITY_LENGTH: usize = 254;

/// Validation error for identities
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdentityError {
    /// Identity is empty
    Empty,
    /// Identity exceeds maximum length
    TooLong,
    /// Identity contains whitespace or control characters
    InvalidCharacters,
}

/// Validate an identity
///
/// Checks:
/// - Not empty
/// - Does not exceed maximum length (254 characters)
/// - Contains no whitespace or control characters
///
/// No email syntax check is made; any printable token is a valid identity.
///
/// # Errors
///
/// Returns an `IdentityError` variant describing the validation failure.
pub fn validate_identity(identity: &str) -> Result<(), IdentityError> {
    if identity.is_empty() {
        return Err(IdentityError::Empty);
    }
    if identity.chars().count() > MAX_IDENTITY_LENGTH {
        return Err(IdentityError::TooLong);
    }
    if identity
        .chars()
        .any(|ch| ch.is_whitespace() || ch.is_control())
    {
        return Err(IdentityError::InvalidCharacters);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_identities() {
        assert!(validate_identity("u@x.com").is_ok());
        assert!(validate_identity("alice").is_ok());
        assert!(validate_identity("Alice.Smith+art@example.org").is_ok());
        assert!(validate_identity(&"a".repeat(MAX_IDENTITY_LENGTH)).is_ok());
        // Unicode is fine
        assert!(validate_identity("用户@例子.中国").is_ok());
    }

    #[test]
    fn test_empty() {
        assert_eq!(validate_identity(""), Err(IdentityError::Empty));
    }

    #[test]
    fn test_too_long() {
        assert_eq!(
            validate_identity(&"a".repeat(MAX_IDENTITY_LENGTH + 1)),
            Err(IdentityError::TooLong)
        );
    }

    #[test]
    fn test_invalid_characters() {
        assert_eq!(
            validate_identity("u @x.com"),
            Err(IdentityError::InvalidCharacters)
        );
        assert_eq!(
            validate_identity("u@x.com\n"),
            Err(IdentityError::InvalidCharacters)
        );
        assert_eq!(
            validate_identity("u\0x"),
            Err(IdentityError::InvalidCharacters)
        );
        assert_eq!(
            validate_identity(" "),
            Err(IdentityError::InvalidCharacters)
        );
    }
}
