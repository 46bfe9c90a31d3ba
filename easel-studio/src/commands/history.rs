//! History commands: list and export

use std::path::PathBuf;

use super::{CommandInvocation, Reply, usage};
use crate::app::Studio;
use crate::constants::{
    HISTORY_PROMPT_PREVIEW_CHARS, MSG_EXPORT_FAILED, MSG_EXPORT_SUCCESS, MSG_NO_HISTORY,
    MSG_NO_SUCH_ENTRY,
};
use crate::history::{HistoryEntry, write_export};

/// Execute the `history` command
///
/// Lists entries newest first, numbered from 1. The numbers are the
/// positions `export` accepts.
pub fn list(studio: &mut Studio, _command: &CommandInvocation) -> Reply {
    let Some(history) = studio.session.history() else {
        return Reply::none();
    };
    if history.is_empty() {
        return Reply::none().with_text(MSG_NO_HISTORY);
    }

    history
        .iter_most_recent_first()
        .enumerate()
        .fold(Reply::none(), |reply, (index, entry)| {
            reply.with_text(format_entry(index + 1, entry))
        })
}

/// Execute the `export` command
///
/// Writes the entry at a 1-based newest-first position as
/// `generated_image_<n>.png`, into `dir` or the configured export directory.
///
/// The directory is everything after the position, so it may contain
/// spaces with or without quotes.
///
/// Usage:
/// - export <n> [dir]
pub fn export(studio: &mut Studio, command: &CommandInvocation) -> Reply {
    let (position, dir) = match command.rest.split_once(char::is_whitespace) {
        Some((position, dir)) => (position, export_dir_arg(dir.trim())),
        None => (command.rest.as_str(), None),
    };
    let Ok(position) = position.parse::<usize>() else {
        return usage("export");
    };
    let dir = dir.map_or_else(|| studio.export_dir.clone(), PathBuf::from);
    let dir = dir.as_path();

    let Some(entry) = studio
        .session
        .history()
        .and_then(|history| history.get(position))
    else {
        return Reply::message(MSG_NO_SUCH_ENTRY);
    };

    match write_export(dir, position, entry) {
        Ok(path) => {
            tracing::info!(path = %path.display(), position, "exported image");
            Reply::message(MSG_EXPORT_SUCCESS).with_text(path.display().to_string())
        }
        Err(e) => {
            tracing::error!(dir = %dir.display(), position, error = %e, "export failed");
            Reply::message(MSG_EXPORT_FAILED)
        }
    }
}

/// Unquote a directory argument when it is a single shell word
fn export_dir_arg(raw: &str) -> Option<String> {
    if raw.is_empty() {
        return None;
    }
    match shell_words::split(raw).as_deref() {
        Ok([dir]) => Some(dir.clone()),
        _ => Some(raw.to_string()),
    }
}

fn format_entry(position: usize, entry: &HistoryEntry) -> String {
    let prompt = entry.prompt();
    let preview: String = prompt.chars().take(HISTORY_PROMPT_PREVIEW_CHARS).collect();
    let ellipsis = if preview.len() < prompt.len() { "..." } else { "" };
    format!(
        "{position}. {preview}{ellipsis} ({}x{}, {})",
        entry.artifact().width(),
        entry.artifact().height(),
        entry.created_at().format("%H:%M:%S"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history::{Artifact, HistoryCache};
    use image::DynamicImage;

    #[test]
    fn test_format_entry_truncates_long_prompts() {
        let mut cache = HistoryCache::unbounded();
        let prompt = "x".repeat(HISTORY_PROMPT_PREVIEW_CHARS + 10);
        let entry = cache
            .append(prompt, Artifact::new(DynamicImage::new_rgb8(4, 3)))
            .unwrap();

        let line = format_entry(1, entry);

        let expected_prefix = format!("1. {}... (4x3, ", "x".repeat(HISTORY_PROMPT_PREVIEW_CHARS));
        assert!(line.starts_with(&expected_prefix), "{line}");
    }

    #[test]
    fn test_export_dir_arg_keeps_spaces() {
        assert_eq!(export_dir_arg(""), None);
        assert_eq!(export_dir_arg("out"), Some("out".to_string()));
        assert_eq!(export_dir_arg("my images"), Some("my images".to_string()));
        assert_eq!(export_dir_arg("\"my images\""), Some("my images".to_string()));
        assert_eq!(export_dir_arg("'a b/c'"), Some("a b/c".to_string()));
    }

    #[test]
    fn test_format_entry_short_prompt() {
        let mut cache = HistoryCache::unbounded();
        let entry = cache
            .append("a red fox", Artifact::new(DynamicImage::new_rgb8(2, 2)))
            .unwrap();

        assert!(format_entry(3, entry).starts_with("3. a red fox (2x2, "));
    }
}
