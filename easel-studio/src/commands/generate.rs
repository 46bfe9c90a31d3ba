//! generate command implementation - run the generator on a prompt

use super::{CommandInvocation, Reply};
use crate::app::Studio;

/// Execute the `generate` command
///
/// The whole remainder of the line is the prompt. Blocks until the
/// generator finishes.
///
/// Usage:
/// - generate <prompt...>
pub fn execute(studio: &mut Studio, command: &CommandInvocation) -> Reply {
    let detail = match studio
        .session
        .generate(studio.generator.as_mut(), &command.rest)
    {
        Ok(entry) => Some(format!(
            "{}x{} image added to history",
            entry.artifact().width(),
            entry.artifact().height()
        )),
        Err(_) => None,
    };

    let reply = Reply::from_session(&studio.session);
    match detail {
        Some(detail) => reply.with_text(detail),
        None => reply,
    }
}
