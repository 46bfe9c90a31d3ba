//! quit command implementation

use super::{CommandInvocation, Reply};
use crate::app::Studio;

/// Execute the `quit` command
///
/// Session state is memory only, so leaving discards any history.
pub fn execute(studio: &mut Studio, _command: &CommandInvocation) -> Reply {
    if let Some(identity) = studio.session.identity() {
        tracing::info!(identity, "leaving studio while logged in");
    }
    Reply::quit()
}
