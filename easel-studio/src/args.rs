//! Command-line argument parsing

use std::path::PathBuf;

use clap::Parser;

/// Get default settings path help text for current platform
fn default_config_help() -> String {
    #[cfg(target_os = "linux")]
    return "Settings file path (default: ~/.config/easel/config.json)".to_string();

    #[cfg(target_os = "macos")]
    return "Settings file path (default: ~/Library/Application Support/easel/config.json)"
        .to_string();

    #[cfg(target_os = "windows")]
    return "Settings file path (default: %APPDATA%\\easel\\config.json)".to_string();

    #[cfg(not(any(target_os = "linux", target_os = "macos", target_os = "windows")))]
    return "Settings file path (overrides platform default)".to_string();
}

/// Get default account registry help text for current platform
fn default_users_help() -> String {
    #[cfg(target_os = "linux")]
    return "Account registry path (default: ~/.local/share/easel/users.json)".to_string();

    #[cfg(target_os = "macos")]
    return "Account registry path (default: ~/Library/Application Support/easel/users.json)"
        .to_string();

    #[cfg(target_os = "windows")]
    return "Account registry path (default: %APPDATA%\\easel\\users.json)".to_string();

    #[cfg(not(any(target_os = "linux", target_os = "macos", target_os = "windows")))]
    return "Account registry path (overrides platform default)".to_string();
}

/// Easel image studio
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Settings file path (overrides platform default)
    #[arg(short, long, help = default_config_help())]
    pub config: Option<PathBuf>,

    /// Account registry path (overrides settings and platform default)
    #[arg(short, long = "users-file", help = default_users_help())]
    pub users_file: Option<PathBuf>,

    /// Maximum history entries kept per login (0 = unbounded)
    #[arg(long)]
    pub history_limit: Option<usize>,

    /// Image generator program, run as `<program> [args...] <prompt>`
    #[arg(short, long)]
    pub generator: Option<String>,

    /// Argument passed to the generator before the prompt (repeatable)
    #[arg(long = "generator-arg", value_name = "ARG", allow_hyphen_values = true)]
    pub generator_args: Vec<String>,

    /// Directory for exported images
    #[arg(short, long)]
    pub export_dir: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, default_value = "false")]
    pub debug: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::parse_from(["easel"]);
        assert!(args.config.is_none());
        assert!(args.users_file.is_none());
        assert!(args.history_limit.is_none());
        assert!(args.generator.is_none());
        assert!(args.generator_args.is_empty());
        assert!(!args.debug);
    }

    #[test]
    fn test_repeated_generator_args() {
        let args = Args::parse_from([
            "easel",
            "--generator",
            "sd-cli",
            "--generator-arg",
            "--steps",
            "--generator-arg",
            "30",
        ]);
        assert_eq!(args.generator.as_deref(), Some("sd-cli"));
        assert_eq!(args.generator_args, vec!["--steps", "30"]);
    }

    #[test]
    fn test_verify_cli() {
        use clap::CommandFactory;
        Args::command().debug_assert();
    }
}
