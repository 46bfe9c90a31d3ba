//! Account commands: register, login, view, logout

use super::{CommandInvocation, Reply, split_args, usage};
use crate::app::Studio;

/// Execute the `register` command
///
/// Missing arguments are passed through as empty fields so the session
/// reports them the same way the form would. Quote a password that
/// contains spaces.
///
/// Usage:
/// - register <email> <password> <confirm>
pub fn register(studio: &mut Studio, command: &CommandInvocation) -> Reply {
    let args = match split_args(command) {
        Ok(args) => args,
        Err(reply) => return reply,
    };
    if args.len() > 3 {
        return usage("register");
    }
    let field = |index: usize| args.get(index).map_or("", String::as_str);

    studio.session.show_registration_view();
    let _ = studio
        .session
        .submit_registration(studio.store.as_ref(), field(0), field(1), field(2));
    Reply::from_session(&studio.session)
}

/// Execute the `login` command
///
/// Usage:
/// - login <email> <password>
pub fn login(studio: &mut Studio, command: &CommandInvocation) -> Reply {
    let args = match split_args(command) {
        Ok(args) => args,
        Err(reply) => return reply,
    };
    if args.len() > 2 {
        return usage("login");
    }
    let field = |index: usize| args.get(index).map_or("", String::as_str);

    let _ = studio
        .session
        .submit_login(studio.store.as_ref(), field(0), field(1));
    Reply::from_session(&studio.session)
}

/// Execute the `view` command: switch between the login and registration forms
pub fn toggle_view(studio: &mut Studio, _command: &CommandInvocation) -> Reply {
    if studio.session.toggle_registration_view() {
        Reply::none().with_text("Create an account: register <email> <password> <confirm>")
    } else {
        Reply::none().with_text("Log in: login <email> <password>")
    }
}

/// Execute the `logout` command
pub fn logout(studio: &mut Studio, _command: &CommandInvocation) -> Reply {
    let _ = studio.session.logout();
    Reply::from_session(&studio.session)
}
