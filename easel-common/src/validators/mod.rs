//! Input validation functions
//!
//! Reusable validators for the values a user types into the studio. The
//! interaction layer calls them before touching the credential store or the
//! generator, so bad input never reaches either.

mod identity;
mod password;
mod prompt;
mod sha256;

pub use identity::{IdentityError, MAX_IDENTITY_LENGTH, validate_identity};
pub use password::{
    MAX_PASSWORD_LENGTH, PasswordError, validate_password, validate_password_input,
};
pub use prompt::{MAX_PROMPT_LENGTH, PromptError, validate_prompt};
pub use sha256::{SHA256_HEX_LENGTH, Sha256Error, validate_sha256};
