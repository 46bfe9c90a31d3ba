//! Interactive command system
//!
//! Each input line is one command: a name followed by whitespace-separated
//! arguments, where quotes group words (`login a@x.com "correct horse"`).
//! A leading `/` is accepted and ignored.
//!
//! ## Available Commands
//!
//! | Command | Aliases | Phase | Description |
//! |---------|---------|-------|-------------|
//! | `export` | `save`, `download` | logged in | Save a history image as PNG |
//! | `generate` | `gen`, `g` | logged in | Generate an image from a prompt |
//! | `help` | `h`, `?` | any | Show available commands |
//! | `history` | `hist` | logged in | List generated images, newest first |
//! | `login` | | logged out | Log in to an account |
//! | `logout` | | logged in | Log out and discard history |
//! | `quit` | `exit`, `q` | any | Leave the studio |
//! | `register` | `reg` | logged out | Create an account |
//! | `view` | `toggle` | logged out | Switch between login and registration |
//!
//! Commands for the other phase are refused with the session's own message
//! ("Please log in first" / "Already logged in"). Unknown commands get an
//! error line.

mod auth;
mod generate;
mod help;
mod history;
mod quit;

use std::collections::HashMap;
use std::sync::LazyLock;

use crate::app::Studio;
use crate::constants::{MSG_HELP_HINT, MSG_UNCLOSED_QUOTE, MSG_UNKNOWN_COMMAND};
use crate::error::SessionError;
use crate::session::{PendingMessage, Session};

/// Command handler function type
/// Parameters: studio, invocation
type CommandHandler = fn(&mut Studio, &CommandInvocation) -> Reply;

/// Session phase a command is usable in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Availability {
    /// Usable at any time
    Always,
    /// Only while nobody is logged in
    Anonymous,
    /// Only while logged in
    Authenticated,
}

impl Availability {
    fn check(self, session: &Session) -> Result<(), SessionError> {
        match (self, session.is_authenticated()) {
            (Self::Anonymous, true) => Err(SessionError::AlreadyAuthenticated),
            (Self::Authenticated, false) => Err(SessionError::NotAuthenticated),
            _ => Ok(()),
        }
    }

    fn allows(self, session: &Session) -> bool {
        self.check(session).is_ok()
    }
}

/// Registry of all available commands with their descriptions (for help display)
#[derive(Debug)]
pub struct CommandInfo {
    /// Primary command name
    pub name: &'static str,
    /// Aliases for the command
    pub aliases: &'static [&'static str],
    /// One-line description
    pub description: &'static str,
    /// Argument synopsis
    pub usage: &'static str,
    /// Phase the command is usable in
    pub availability: Availability,
}

/// Command registration entry - links metadata to handler
struct CommandRegistration {
    info: CommandInfo,
    handler: CommandHandler,
}

/// All registered commands (alphabetical order)
static COMMANDS: &[CommandRegistration] = &[
    CommandRegistration {
        info: CommandInfo {
            name: "export",
            aliases: &["save", "download"],
            description: "Save a history image as PNG",
            usage: "export <n> [dir]",
            availability: Availability::Authenticated,
        },
        handler: history::export,
    },
    CommandRegistration {
        info: CommandInfo {
            name: "generate",
            aliases: &["gen", "g"],
            description: "Generate an image from a prompt",
            usage: "generate <prompt...>",
            availability: Availability::Authenticated,
        },
        handler: generate::execute,
    },
    CommandRegistration {
        info: CommandInfo {
            name: "help",
            aliases: &["h", "?"],
            description: "Show available commands",
            usage: "help [command]",
            availability: Availability::Always,
        },
        handler: help::execute,
    },
    CommandRegistration {
        info: CommandInfo {
            name: "history",
            aliases: &["hist"],
            description: "List generated images, newest first",
            usage: "history",
            availability: Availability::Authenticated,
        },
        handler: history::list,
    },
    CommandRegistration {
        info: CommandInfo {
            name: "login",
            aliases: &[],
            description: "Log in to an account",
            usage: "login <email> <password>",
            availability: Availability::Anonymous,
        },
        handler: auth::login,
    },
    CommandRegistration {
        info: CommandInfo {
            name: "logout",
            aliases: &[],
            description: "Log out and discard history",
            usage: "logout",
            availability: Availability::Authenticated,
        },
        handler: auth::logout,
    },
    CommandRegistration {
        info: CommandInfo {
            name: "quit",
            aliases: &["exit", "q"],
            description: "Leave the studio",
            usage: "quit",
            availability: Availability::Always,
        },
        handler: quit::execute,
    },
    CommandRegistration {
        info: CommandInfo {
            name: "register",
            aliases: &["reg"],
            description: "Create an account",
            usage: "register <email> <password> <confirm>",
            availability: Availability::Anonymous,
        },
        handler: auth::register,
    },
    CommandRegistration {
        info: CommandInfo {
            name: "view",
            aliases: &["toggle"],
            description: "Switch between login and registration",
            usage: "view",
            availability: Availability::Anonymous,
        },
        handler: auth::toggle_view,
    },
];

/// Lookup table from name or alias to registry index
static COMMAND_MAP: LazyLock<HashMap<&'static str, usize>> = LazyLock::new(|| {
    let mut map = HashMap::new();
    for (index, reg) in COMMANDS.iter().enumerate() {
        map.insert(reg.info.name, index);
        for alias in reg.info.aliases {
            map.insert(alias, index);
        }
    }
    map
});

/// Get command info by name or alias (for `help <command>`)
pub fn get_command_info(name: &str) -> Option<&'static CommandInfo> {
    COMMAND_MAP
        .get(name.to_lowercase().as_str())
        .map(|&index| &COMMANDS[index].info)
}

/// Commands usable in the session's current phase (for help display)
pub(crate) fn command_list_for_session(
    session: &Session,
) -> impl Iterator<Item = &'static CommandInfo> {
    COMMANDS
        .iter()
        .map(|reg| &reg.info)
        .filter(move |info| info.availability.allows(session))
}

// =============================================================================
// Replies
// =============================================================================

/// One line of command output
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplyLine {
    /// Outcome message (success or error)
    Message(PendingMessage),
    /// Plain listing text
    Text(String),
}

/// Output of one command
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Reply {
    lines: Vec<ReplyLine>,
    quit: bool,
}

impl Reply {
    /// Reply with no output
    pub fn none() -> Self {
        Self::default()
    }

    /// Reply with a single outcome message
    pub fn message(text: impl Into<String>) -> Self {
        Self::none().with_message(text)
    }

    /// Reply echoing the session's pending message, if any
    pub fn from_session(session: &Session) -> Self {
        Self {
            lines: session
                .pending_message()
                .cloned()
                .map(ReplyLine::Message)
                .into_iter()
                .collect(),
            quit: false,
        }
    }

    /// Reply asking the front end to exit
    pub fn quit() -> Self {
        Self {
            lines: Vec::new(),
            quit: true,
        }
    }

    /// Append an outcome message
    pub fn with_message(mut self, text: impl Into<String>) -> Self {
        self.lines.push(ReplyLine::Message(PendingMessage::new(text)));
        self
    }

    /// Append a plain line
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.lines.push(ReplyLine::Text(text.into()));
        self
    }

    /// Output lines in order
    pub fn lines(&self) -> &[ReplyLine] {
        &self.lines
    }

    /// Whether the front end should exit
    pub fn is_quit(&self) -> bool {
        self.quit
    }
}

// =============================================================================
// Parsing
// =============================================================================

/// Result of parsing an input line
#[derive(Debug, PartialEq, Eq)]
pub enum ParseResult {
    /// Input is a command that should be executed
    Command(CommandInvocation),
    /// Input is empty (should be ignored)
    Empty,
}

/// A parsed command invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandInvocation {
    /// Command name (lowercase, without any leading slash)
    pub name: String,
    /// Everything after the command name, trimmed, with inner spacing kept
    pub rest: String,
}

impl CommandInvocation {
    /// Arguments after the command name
    ///
    /// Split like a shell line: single or double quotes group words, so
    /// `login a@x.com "correct horse"` has two arguments.
    ///
    /// # Errors
    ///
    /// Returns an error if a quote is left open.
    pub fn args(&self) -> Result<Vec<String>, shell_words::ParseError> {
        shell_words::split(&self.rest)
    }
}

/// Parse an input line into a command
///
/// # Rules
/// - `command args` → Command { name: "command", rest: "args" }
/// - `/command args` → same as without the slash
/// - `/` alone → `help`
/// - `` or whitespace only → Empty
///
/// Arguments are split on demand by [`CommandInvocation::args`], so commands
/// that take free text (like `generate`) never trip over quotes.
pub fn parse_input(input: &str) -> ParseResult {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return ParseResult::Empty;
    }

    let line = trimmed.strip_prefix('/').unwrap_or(trimmed).trim_start();
    if line.is_empty() {
        return ParseResult::Command(CommandInvocation {
            name: "help".to_string(),
            rest: String::new(),
        });
    }

    let (name, rest) = match line.split_once(char::is_whitespace) {
        Some((name, rest)) => (name, rest.trim()),
        None => (line, ""),
    };

    ParseResult::Command(CommandInvocation {
        name: name.to_lowercase(),
        rest: rest.to_string(),
    })
}

/// Execute a command against the studio
///
/// Unknown commands and commands for the other session phase produce an
/// error reply without touching any state.
pub fn execute_command(studio: &mut Studio, command: CommandInvocation) -> Reply {
    let Some(&index) = COMMAND_MAP.get(command.name.as_str()) else {
        tracing::debug!(command = %command.name, "unknown command");
        return Reply::message(format!("{MSG_UNKNOWN_COMMAND}: {}", command.name))
            .with_text(MSG_HELP_HINT);
    };

    let reg = &COMMANDS[index];
    if let Err(e) = reg.info.availability.check(&studio.session) {
        return Reply::message(e.user_message());
    }

    (reg.handler)(studio, &command)
}

/// Split a command's arguments, or reply with the quoting error
fn split_args(command: &CommandInvocation) -> Result<Vec<String>, Reply> {
    command.args().map_err(|e| {
        tracing::debug!(command = %command.name, error = %e, "unbalanced quotes");
        Reply::message(MSG_UNCLOSED_QUOTE)
    })
}

/// Reply with a command's usage line
fn usage(name: &str) -> Reply {
    match get_command_info(name) {
        Some(info) => Reply::message(format!("Usage: {}", info.usage)),
        None => Reply::message(MSG_UNKNOWN_COMMAND),
    }
}
