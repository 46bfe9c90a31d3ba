//! Application-wide constants
//!
//! File names, limits, and every user-visible message string.

/// Banner printed at startup (followed by the crate version)
pub const MSG_BANNER: &str = "Easel Studio v";

// =============================================================================
// Paths
// =============================================================================

/// Application directory name (used under the platform config and data dirs)
pub const APP_DIR_NAME: &str = "easel";

/// Settings file name
pub const CONFIG_FILE_NAME: &str = "config.json";

/// Account registry file name
pub const USERS_FILE_NAME: &str = "users.json";

/// Prefix for exported image file names (`generated_image_<n>.png`)
pub const EXPORT_FILE_PREFIX: &str = "generated_image_";

/// Extension for exported image files
pub const EXPORT_FILE_EXT: &str = "png";

/// Environment variable holding the log filter directive
pub const LOG_ENV_VAR: &str = "EASEL_LOG";

/// Characters of a prompt shown in the history listing before truncation
pub const HISTORY_PROMPT_PREVIEW_CHARS: usize = 50;

// =============================================================================
// Authentication Messages
// =============================================================================

pub const MSG_REGISTER_MISSING_FIELDS: &str = "Fill all fields";
pub const MSG_LOGIN_MISSING_FIELDS: &str = "Please fill in all fields";
pub const MSG_PASSWORD_MISMATCH: &str = "Passwords do not match";
pub const MSG_PASSWORD_TOO_SHORT: &str = "Password must be at least 6 characters";
pub const MSG_PASSWORD_TOO_LONG: &str = "Password is too long";
pub const MSG_INVALID_IDENTITY: &str = "Email must not contain spaces";
pub const MSG_REGISTRATION_SUCCESS: &str = "Registration successful!";
pub const MSG_USER_EXISTS: &str = "User already exists";
pub const MSG_LOGIN_SUCCESS: &str = "Login successful!";
pub const MSG_USER_NOT_FOUND: &str = "User not found";
pub const MSG_INVALID_PASSWORD: &str = "Invalid password";
pub const MSG_LOGOUT_SUCCESS: &str = "Logged out successfully";
pub const MSG_STORAGE_FAILED: &str = "Could not save account, please try again";
pub const MSG_HASH_FAILED: &str = "Could not process password, please try again";
pub const MSG_ALREADY_LOGGED_IN: &str = "Already logged in";
pub const MSG_NOT_LOGGED_IN: &str = "Please log in first";

// =============================================================================
// Generation Messages
// =============================================================================

pub const MSG_EMPTY_PROMPT: &str = "Please enter a prompt first!";
pub const MSG_PROMPT_TOO_LONG: &str = "Prompt is too long";
pub const MSG_GENERATION_SUCCESS: &str = "Image generated successfully";
pub const MSG_GENERATION_FAILED: &str = "Image generation failed";
pub const MSG_NO_HISTORY: &str = "No history yet. Generate an image to see it here!";

// =============================================================================
// Command Messages
// =============================================================================

pub const MSG_EXPORT_SUCCESS: &str = "Image saved successfully";
pub const MSG_EXPORT_FAILED: &str = "Could not save image";
pub const MSG_NO_SUCH_ENTRY: &str = "No history entry at that position";
pub const MSG_UNKNOWN_COMMAND: &str = "Unknown command";
pub const MSG_UNCLOSED_QUOTE: &str = "Unclosed quote in command";
pub const MSG_HELP_HINT: &str = "Type 'help' for a list of commands";
