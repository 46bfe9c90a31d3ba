//! Prompt validation

/// Maximum length for prompts in characters
pub const MAX_PROMPT_LENGTH: usize = 4096;

/// Validation error for prompts
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptError {
    /// Prompt is empty or contains only whitespace
    Blank,
    /// Prompt exceeds maximum length
    TooLong,
}

/// Validate a generation prompt
///
/// Checks:
/// - Contains at least one non-whitespace character
/// - Does not exceed maximum length (4096 characters)
///
/// The prompt is stored as typed; surrounding whitespace is not trimmed.
///
/// # Errors
///
/// Returns a `PromptError` variant describing the validation failure.
pub fn validate_prompt(prompt: &str) -> Result<(), PromptError> {
    if prompt.trim().is_empty() {
        return Err(PromptError::Blank);
    }
    if prompt.chars().count() > MAX_PROMPT_LENGTH {
        return Err(PromptError::TooLong);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_prompts() {
        assert!(validate_prompt("a red fox in the snow").is_ok());
        assert!(validate_prompt("  padded  ").is_ok());
        assert!(validate_prompt(&"a".repeat(MAX_PROMPT_LENGTH)).is_ok());
    }

    #[test]
    fn test_blank() {
        assert_eq!(validate_prompt(""), Err(PromptError::Blank));
        assert_eq!(validate_prompt("   "), Err(PromptError::Blank));
        assert_eq!(validate_prompt("\n\t "), Err(PromptError::Blank));
    }

    #[test]
    fn test_too_long() {
        assert_eq!(
            validate_prompt(&"a".repeat(MAX_PROMPT_LENGTH + 1)),
            Err(PromptError::TooLong)
        );
    }
}
