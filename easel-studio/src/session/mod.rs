//! Session state machine
//!
//! One `Session` per interactive run. It starts `Anonymous`, where the user can
//! register or log in against a [`CredentialStore`]; a successful login moves
//! it to `Authenticated`, which owns a fresh [`HistoryCache`]. Logging out
//! drops the identity and the history together.
//!
//! Every transition replaces the pending message with a short, user-facing
//! outcome. Internal error detail goes to the log, never to the message.

mod message;

pub use message::{MessageKind, PendingMessage};

use std::mem;
use std::num::NonZeroUsize;

use easel_common::validators::{
    validate_identity, validate_password, validate_password_input, validate_prompt,
};

use crate::constants::*;
use crate::credentials::CredentialStore;
use crate::error::{AuthError, SessionError, ValidationError};
use crate::generator::Generator;
use crate::history::{HistoryCache, HistoryEntry};

/// Lifecycle phase of a session
#[derive(Debug, Default)]
pub enum Phase {
    /// Nobody is logged in
    #[default]
    Anonymous,
    /// A user is logged in; history lives and dies with this phase
    Authenticated {
        identity: String,
        history: HistoryCache,
    },
}

/// State of one interactive run
#[derive(Debug, Default)]
pub struct Session {
    phase: Phase,
    /// Outcome of the last interaction
    pending_message: Option<PendingMessage>,
    /// Whether the anonymous view shows the registration form (vs. login)
    showing_registration_form: bool,
    /// Capacity given to each new history cache
    history_capacity: Option<NonZeroUsize>,
}

impl Session {
    /// Create an anonymous session with unbounded history
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an anonymous session whose history keeps at most `capacity` entries
    pub fn with_history_capacity(capacity: Option<NonZeroUsize>) -> Self {
        Self {
            history_capacity: capacity,
            ..Self::default()
        }
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Current phase
    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    /// Whether a user is logged in
    pub fn is_authenticated(&self) -> bool {
        matches!(self.phase, Phase::Authenticated { .. })
    }

    /// Logged-in identity
    pub fn identity(&self) -> Option<&str> {
        match &self.phase {
            Phase::Authenticated { identity, .. } => Some(identity),
            Phase::Anonymous => None,
        }
    }

    /// History of the logged-in user
    pub fn history(&self) -> Option<&HistoryCache> {
        match &self.phase {
            Phase::Authenticated { history, .. } => Some(history),
            Phase::Anonymous => None,
        }
    }

    /// Outcome of the last interaction
    pub fn pending_message(&self) -> Option<&PendingMessage> {
        self.pending_message.as_ref()
    }

    /// Whether the anonymous view shows the registration form
    pub fn showing_registration_form(&self) -> bool {
        self.showing_registration_form
    }

    // =========================================================================
    // Anonymous Transitions
    // =========================================================================

    /// Submit the registration form
    ///
    /// Checks fields locally (all present, password matches confirmation,
    /// minimum length) before asking the store. On success the session stays
    /// anonymous and switches back to the login form.
    pub fn submit_registration(
        &mut self,
        store: &dyn CredentialStore,
        identity: &str,
        secret: &str,
        confirm: &str,
    ) -> Result<(), SessionError> {
        let result = self.register(store, identity, secret, confirm);
        match &result {
            Ok(()) => {
                self.showing_registration_form = false;
                self.set_message(MSG_REGISTRATION_SUCCESS);
            }
            Err(e) => self.report(e),
        }
        result
    }

    fn register(
        &self,
        store: &dyn CredentialStore,
        identity: &str,
        secret: &str,
        confirm: &str,
    ) -> Result<(), SessionError> {
        if self.is_authenticated() {
            return Err(SessionError::AlreadyAuthenticated);
        }
        if identity.is_empty() || secret.is_empty() || confirm.is_empty() {
            return Err(ValidationError::MissingRegistrationFields.into());
        }
        if secret != confirm {
            return Err(ValidationError::PasswordMismatch.into());
        }
        validate_password(secret).map_err(ValidationError::from_password_rule)?;
        validate_identity(identity).map_err(|e| {
            ValidationError::from_identity_rule(e, ValidationError::MissingRegistrationFields)
        })?;

        store.register(identity, secret)?;
        Ok(())
    }

    /// Submit the login form
    ///
    /// On success the session becomes authenticated with an empty history.
    pub fn submit_login(
        &mut self,
        store: &dyn CredentialStore,
        identity: &str,
        secret: &str,
    ) -> Result<(), SessionError> {
        let result = self.authenticate(store, identity, secret);
        match &result {
            Ok(()) => {
                self.phase = Phase::Authenticated {
                    identity: identity.to_string(),
                    history: HistoryCache::new(self.history_capacity),
                };
                self.showing_registration_form = false;
                self.set_message(MSG_LOGIN_SUCCESS);
                tracing::info!(identity, "logged in");
            }
            Err(e) => self.report(e),
        }
        result
    }

    fn authenticate(
        &self,
        store: &dyn CredentialStore,
        identity: &str,
        secret: &str,
    ) -> Result<(), SessionError> {
        if self.is_authenticated() {
            return Err(SessionError::AlreadyAuthenticated);
        }
        if identity.is_empty() || secret.is_empty() {
            return Err(ValidationError::MissingLoginFields.into());
        }
        validate_password_input(secret).map_err(ValidationError::from_password_rule)?;

        store.authenticate(identity, secret)?;
        Ok(())
    }

    /// Flip between the login and registration forms
    ///
    /// Clears the pending message. Returns whether the registration form is
    /// now shown. Has no effect while authenticated.
    pub fn toggle_registration_view(&mut self) -> bool {
        let show = !self.showing_registration_form;
        self.set_registration_view(show)
    }

    /// Show the login form
    pub fn show_login_view(&mut self) -> bool {
        self.set_registration_view(false)
    }

    /// Show the registration form
    pub fn show_registration_view(&mut self) -> bool {
        self.set_registration_view(true)
    }

    fn set_registration_view(&mut self, show: bool) -> bool {
        if self.is_authenticated() {
            return false;
        }
        self.showing_registration_form = show;
        self.pending_message = None;
        show
    }

    // =========================================================================
    // Authenticated Transitions
    // =========================================================================

    /// Log out, discarding the identity and the entire history
    pub fn logout(&mut self) -> Result<(), SessionError> {
        match mem::take(&mut self.phase) {
            Phase::Authenticated { identity, history } => {
                tracing::info!(identity, discarded = history.len(), "logged out");
                self.showing_registration_form = false;
                self.set_message(MSG_LOGOUT_SUCCESS);
                Ok(())
            }
            Phase::Anonymous => {
                let err = SessionError::NotAuthenticated;
                self.report(&err);
                Err(err)
            }
        }
    }

    /// Generate an image for `prompt` and record it in the history
    ///
    /// The generator call is one blocking step. If it fails the history is
    /// left untouched.
    pub fn generate(
        &mut self,
        generator: &mut dyn Generator,
        prompt: &str,
    ) -> Result<&HistoryEntry, SessionError> {
        let Phase::Authenticated { identity, history } = &mut self.phase else {
            self.pending_message = Some(PendingMessage::new(MSG_NOT_LOGGED_IN));
            return Err(SessionError::NotAuthenticated);
        };

        if let Err(e) = validate_prompt(prompt) {
            let err = SessionError::from(e);
            self.pending_message = Some(PendingMessage::new(err.user_message()));
            return Err(err);
        }

        let artifact = match generator.generate(prompt) {
            Ok(artifact) => artifact,
            Err(e) => {
                tracing::warn!(identity = %identity, error = %e, "generation failed");
                self.pending_message = Some(PendingMessage::new(MSG_GENERATION_FAILED));
                return Err(e.into());
            }
        };

        self.pending_message = Some(PendingMessage::new(MSG_GENERATION_SUCCESS));
        Ok(history.append(prompt, artifact)?)
    }

    // =========================================================================
    // Messages
    // =========================================================================

    fn set_message(&mut self, text: &str) {
        self.pending_message = Some(PendingMessage::new(text));
    }

    fn report(&mut self, err: &SessionError) {
        match err {
            SessionError::Auth(e @ (AuthError::Io(_) | AuthError::Encode(_) | AuthError::Hash(_))) => {
                tracing::error!(error = %e, "credential store failure");
            }
            _ => tracing::debug!(error = %err, "interaction rejected"),
        }
        self.set_message(err.user_message());
    }
}
