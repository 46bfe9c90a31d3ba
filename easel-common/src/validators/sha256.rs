//! SHA-256 digest validation
//!
//! Recognizes the unsalted digests stored by legacy account records, so the
//! password verifier can tell them apart from PHC-formatted hashes.

/// Length of a hex-encoded SHA-256 digest
pub const SHA256_HEX_LENGTH: usize = 64;

/// Validation error for SHA-256 digest strings
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Sha256Error {
    /// Digest has the wrong length
    InvalidLength,
    /// Digest contains something other than lowercase hex
    InvalidCharacters,
}

/// Validate a hex-encoded SHA-256 digest
///
/// Checks:
/// - Exactly 64 characters long
/// - Only lowercase hexadecimal characters (0-9, a-f)
///
/// # Errors
///
/// Returns a `Sha256Error` variant describing the validation failure.
pub fn validate_sha256(digest: &str) -> Result<(), Sha256Error> {
    if digest.len() != SHA256_HEX_LENGTH {
        return Err(Sha256Error::InvalidLength);
    }
    if !digest
        .bytes()
        .all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b))
    {
        return Err(Sha256Error::InvalidCharacters);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_digest() {
        assert!(
            validate_sha256("e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855")
                .is_ok()
        );
        assert!(validate_sha256(&"0".repeat(SHA256_HEX_LENGTH)).is_ok());
    }

    #[test]
    fn test_wrong_length() {
        assert_eq!(validate_sha256(""), Err(Sha256Error::InvalidLength));
        assert_eq!(
            validate_sha256(&"a".repeat(SHA256_HEX_LENGTH - 1)),
            Err(Sha256Error::InvalidLength)
        );
        assert_eq!(
            validate_sha256(&"a".repeat(SHA256_HEX_LENGTH + 1)),
            Err(Sha256Error::InvalidLength)
        );
    }

    #[test]
    fn test_phc_string_is_not_a_digest() {
        // Argon2 PHC strings must never be mistaken for a legacy digest
        let phc = "$argon2id$v=19$m=19456,t=2,p=1$c29tZXNhbHQ$aGFzaA";
        assert!(validate_sha256(phc).is_err());
    }

    #[test]
    fn test_uppercase_rejected() {
        assert_eq!(
            validate_sha256(&"A".repeat(SHA256_HEX_LENGTH)),
            Err(Sha256Error::InvalidCharacters)
        );
    }

    #[test]
    fn test_non_hex_rejected() {
        assert_eq!(
            validate_sha256(&"g".repeat(SHA256_HEX_LENGTH)),
            Err(Sha256Error::InvalidCharacters)
        );
        let mut with_space = "a".repeat(SHA256_HEX_LENGTH - 1);
        with_space.push(' ');
        assert_eq!(
            validate_sha256(&with_space),
            Err(Sha256Error::InvalidCharacters)
        );
    }
}
