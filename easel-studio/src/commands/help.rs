//! help command implementation

use super::{CommandInvocation, Reply, command_list_for_session, get_command_info, split_args};
use crate::app::Studio;
use crate::constants::MSG_UNKNOWN_COMMAND;

/// Execute the `help` command
///
/// Usage:
/// - help - List commands usable right now
/// - help <command> - Show usage for one command
pub fn execute(studio: &mut Studio, command: &CommandInvocation) -> Reply {
    let args = match split_args(command) {
        Ok(args) => args,
        Err(reply) => return reply,
    };
    match args.as_slice() {
        [] => command_list_for_session(&studio.session)
            .fold(Reply::none().with_text("Commands:"), |reply, info| {
                reply.with_text(format!("  {:<40} {}", info.usage, info.description))
            }),
        [name] => match get_command_info(name) {
            Some(info) => {
                let reply = Reply::none()
                    .with_text(format!("{} - {}", info.name, info.description))
                    .with_text(format!("Usage: {}", info.usage));
                if info.aliases.is_empty() {
                    reply
                } else {
                    reply.with_text(format!("Aliases: {}", info.aliases.join(", ")))
                }
            }
            None => Reply::message(format!("{MSG_UNKNOWN_COMMAND}: {name}")),
        },
        _ => super::usage("help"),
    }
}
