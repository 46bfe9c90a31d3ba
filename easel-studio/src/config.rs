//! Settings file
//!
//! Optional JSON file at `<config_dir>/easel/config.json`. Every field has a
//! default; a missing or unreadable file means "all defaults".

use std::fs;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::args::Args;
use crate::constants::{APP_DIR_NAME, CONFIG_FILE_NAME};
use crate::credentials::JsonFileStore;

/// External generator program and its leading arguments
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratorSettings {
    /// Program name or path
    pub program: String,

    /// Arguments placed before the prompt
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub args: Vec<String>,
}

/// Studio settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Credential registry location (platform data dir when unset)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub users_file: Option<PathBuf>,

    /// Maximum history entries per login (0 = unbounded)
    #[serde(default)]
    pub history_limit: usize,

    /// Directory for exported images (current directory when unset)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub export_dir: Option<PathBuf>,

    /// Image generator (none configured when unset)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generator: Option<GeneratorSettings>,
}

impl Settings {
    /// Platform-specific settings path
    ///
    /// Returns None if the config directory cannot be determined.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    /// Load settings from `path`, or the platform path when `None`
    ///
    /// Falls back to defaults if the file is missing, unreadable, or not
    /// valid JSON. Only the last two are logged.
    pub fn load(path: Option<&Path>) -> Self {
        let Some(path) = path.map(Path::to_path_buf).or_else(Self::default_path) else {
            return Self::default();
        };

        if !path.exists() {
            tracing::debug!(path = %path.display(), "no settings file, using defaults");
            return Self::default();
        }

        match fs::read_to_string(&path) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(settings) => settings,
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "invalid settings file");
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "unreadable settings file");
                Self::default()
            }
        }
    }

    /// Override settings with any command-line values given
    pub fn apply_args(&mut self, args: &Args) {
        if let Some(users_file) = &args.users_file {
            self.users_file = Some(users_file.clone());
        }
        if let Some(history_limit) = args.history_limit {
            self.history_limit = history_limit;
        }
        if let Some(export_dir) = &args.export_dir {
            self.export_dir = Some(export_dir.clone());
        }
        if let Some(program) = &args.generator {
            self.generator = Some(GeneratorSettings {
                program: program.clone(),
                args: args.generator_args.clone(),
            });
        } else if !args.generator_args.is_empty()
            && let Some(generator) = &mut self.generator
        {
            generator.args = args.generator_args.clone();
        }
    }

    /// History capacity for new logins
    pub fn history_capacity(&self) -> Option<NonZeroUsize> {
        NonZeroUsize::new(self.history_limit)
    }

    /// Resolved registry path
    ///
    /// Returns None if neither a configured path nor a platform data
    /// directory is available.
    pub fn users_path(&self) -> Option<PathBuf> {
        self.users_file.clone().or_else(JsonFileStore::default_path)
    }

    /// Resolved export directory
    pub fn export_path(&self) -> PathBuf {
        self.export_dir.clone().unwrap_or_else(|| PathBuf::from("."))
    }
}
