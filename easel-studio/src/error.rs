//! Error types for the studio
//!
//! Each error knows the short message shown to the end user. The `Display`
//! text is for logs and may carry internal detail; `user_message` never does.

use std::io;

use easel_common::validators::{IdentityError, PasswordError as PasswordRuleError, PromptError};
use thiserror::Error;

use crate::constants::*;
use crate::credentials::PasswordError;
use crate::generator::GenerateError;

/// Locally detectable bad input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required registration field is empty
    #[error("registration form has empty fields")]
    MissingRegistrationFields,
    /// A required login field is empty
    #[error("login form has empty fields")]
    MissingLoginFields,
    /// Password and confirmation differ
    #[error("password confirmation does not match")]
    PasswordMismatch,
    /// Password is under the minimum length
    #[error("password is shorter than the minimum length")]
    PasswordTooShort,
    /// Password is over the maximum length
    #[error("password exceeds the maximum length")]
    PasswordTooLong,
    /// Identity contains characters that are not allowed
    #[error("identity is malformed")]
    InvalidIdentity,
    /// Prompt has no visible content
    #[error("prompt is blank")]
    EmptyPrompt,
    /// Prompt is over the maximum length
    #[error("prompt exceeds the maximum length")]
    PromptTooLong,
}

impl ValidationError {
    /// Message shown to the end user
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::MissingRegistrationFields => MSG_REGISTER_MISSING_FIELDS,
            Self::MissingLoginFields => MSG_LOGIN_MISSING_FIELDS,
            Self::PasswordMismatch => MSG_PASSWORD_MISMATCH,
            Self::PasswordTooShort => MSG_PASSWORD_TOO_SHORT,
            Self::PasswordTooLong => MSG_PASSWORD_TOO_LONG,
            Self::InvalidIdentity => MSG_INVALID_IDENTITY,
            Self::EmptyPrompt => MSG_EMPTY_PROMPT,
            Self::PromptTooLong => MSG_PROMPT_TOO_LONG,
        }
    }

    /// Map a new-account password rule failure
    pub(crate) fn from_password_rule(err: PasswordRuleError) -> Self {
        match err {
            PasswordRuleError::Empty => Self::MissingRegistrationFields,
            PasswordRuleError::TooShort => Self::PasswordTooShort,
            PasswordRuleError::TooLong => Self::PasswordTooLong,
        }
    }

    /// Map an identity rule failure, reporting emptiness per form
    pub(crate) fn from_identity_rule(err: IdentityError, missing: Self) -> Self {
        match err {
            IdentityError::Empty => missing,
            IdentityError::TooLong | IdentityError::InvalidCharacters => Self::InvalidIdentity,
        }
    }
}

impl From<PromptError> for ValidationError {
    fn from(err: PromptError) -> Self {
        match err {
            PromptError::Blank => Self::EmptyPrompt,
            PromptError::TooLong => Self::PromptTooLong,
        }
    }
}

/// Credential store failures
#[derive(Debug, Error)]
pub enum AuthError {
    /// Registration collided with an existing identity
    #[error("account already exists")]
    AlreadyExists,
    /// No account for the identity
    #[error("account not found")]
    NotFound,
    /// Secret did not verify against the stored hash
    #[error("secret does not match")]
    InvalidSecret,
    /// Reading or writing the durable registry failed
    #[error("registry I/O failed: {0}")]
    Io(#[from] io::Error),
    /// The registry could not be encoded
    #[error("registry encoding failed: {0}")]
    Encode(#[from] serde_json::Error),
    /// Hashing the secret failed
    #[error("password hashing failed: {0}")]
    Hash(#[from] PasswordError),
}

impl AuthError {
    /// Message shown to the end user
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::AlreadyExists => MSG_USER_EXISTS,
            Self::NotFound => MSG_USER_NOT_FOUND,
            Self::InvalidSecret => MSG_INVALID_PASSWORD,
            Self::Io(_) | Self::Encode(_) => MSG_STORAGE_FAILED,
            Self::Hash(_) => MSG_HASH_FAILED,
        }
    }
}

/// Failures of a session transition
#[derive(Debug, Error)]
pub enum SessionError {
    /// Input was rejected before reaching a collaborator
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// The credential store refused the request
    #[error(transparent)]
    Auth(#[from] AuthError),
    /// The generator failed
    #[error(transparent)]
    Generate(#[from] GenerateError),
    /// The transition needs an anonymous session
    #[error("session is already authenticated")]
    AlreadyAuthenticated,
    /// The transition needs an authenticated session
    #[error("session is not authenticated")]
    NotAuthenticated,
}

impl From<PromptError> for SessionError {
    fn from(err: PromptError) -> Self {
        Self::Validation(err.into())
    }
}

impl SessionError {
    /// Message shown to the end user
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::Validation(e) => e.user_message(),
            Self::Auth(e) => e.user_message(),
            Self::Generate(_) => MSG_GENERATION_FAILED,
            Self::AlreadyAuthenticated => MSG_ALREADY_LOGGED_IN,
            Self::NotAuthenticated => MSG_NOT_LOGGED_IN,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_rule_mapping() {
        assert_eq!(
            ValidationError::from_password_rule(PasswordRuleError::Empty),
            ValidationError::MissingRegistrationFields
        );
        assert_eq!(
            ValidationError::from_password_rule(PasswordRuleError::TooShort),
            ValidationError::PasswordTooShort
        );
        assert_eq!(
            ValidationError::from_password_rule(PasswordRuleError::TooLong),
            ValidationError::PasswordTooLong
        );
    }

    #[test]
    fn test_identity_rule_mapping() {
        assert_eq!(
            ValidationError::from_identity_rule(
                IdentityError::Empty,
                ValidationError::MissingLoginFields
            ),
            ValidationError::MissingLoginFields
        );
        assert_eq!(
            ValidationError::from_identity_rule(
                IdentityError::InvalidCharacters,
                ValidationError::MissingLoginFields
            ),
            ValidationError::InvalidIdentity
        );
    }

    #[test]
    fn test_user_messages_hide_detail() {
        let err = AuthError::Io(io::Error::other("/secret/path/users.json: disk full"));
        assert_eq!(err.user_message(), MSG_STORAGE_FAILED);
        assert!(err.to_string().contains("disk full"));
    }

    #[test]
    fn test_session_error_messages() {
        assert_eq!(
            SessionError::from(AuthError::NotFound).user_message(),
            "User not found"
        );
        assert_eq!(
            SessionError::from(ValidationError::PasswordMismatch).user_message(),
            "Passwords do not match"
        );
        assert_eq!(
            SessionError::NotAuthenticated.user_message(),
            MSG_NOT_LOGGED_IN
        );
    }
}
