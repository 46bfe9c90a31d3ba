//! Studio application state
//!
//! `Studio` owns everything one interactive run needs: the session, the
//! credential store, the generator, and where exports go. The front end feeds
//! it one input line at a time and prints the [`Reply`].

use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};

use crate::commands::{self, ParseResult, Reply};
use crate::config::Settings;
use crate::credentials::CredentialStore;
use crate::generator::{CommandGenerator, Generator, UnconfiguredGenerator};
use crate::session::Session;

/// Single owned state passed through the interaction handler
pub struct Studio {
    pub(crate) session: Session,
    pub(crate) store: Box<dyn CredentialStore>,
    pub(crate) generator: Box<dyn Generator>,
    pub(crate) export_dir: PathBuf,
}

impl Studio {
    /// Assemble a studio from its collaborators
    pub fn new(
        store: Box<dyn CredentialStore>,
        generator: Box<dyn Generator>,
        history_capacity: Option<NonZeroUsize>,
        export_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            session: Session::with_history_capacity(history_capacity),
            store,
            generator,
            export_dir: export_dir.into(),
        }
    }

    /// Assemble a studio from settings, building the generator they name
    pub fn from_settings(store: Box<dyn CredentialStore>, settings: &Settings) -> Self {
        let generator: Box<dyn Generator> = match &settings.generator {
            Some(generator) if !generator.program.is_empty() => Box::new(CommandGenerator::new(
                &generator.program,
                generator.args.clone(),
            )),
            _ => {
                tracing::warn!("no generator configured, image generation will fail");
                Box::new(UnconfiguredGenerator)
            }
        };
        Self::new(
            store,
            generator,
            settings.history_capacity(),
            settings.export_path(),
        )
    }

    /// Current session state
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Default directory for exported images
    pub fn export_dir(&self) -> &Path {
        &self.export_dir
    }

    /// Handle one line of user input
    pub fn handle_line(&mut self, input: &str) -> Reply {
        match commands::parse_input(input) {
            ParseResult::Command(command) => commands::execute_command(self, command),
            ParseResult::Empty => Reply::none(),
        }
    }

    /// Prompt shown before each input line
    pub fn prompt(&self) -> String {
        match self.session.identity() {
            Some(identity) => format!("{identity}> "),
            None if self.session.showing_registration_form() => "register> ".to_string(),
            None => "login> ".to_string(),
        }
    }
}

impl std::fmt::Debug for Studio {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Studio")
            .field("session", &self.session)
            .field("export_dir", &self.export_dir)
            .finish_non_exhaustive()
    }
}
