//! Easel image studio

use std::io::{self, BufRead, Write};
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use easel_studio::app::Studio;
use easel_studio::args::Args;
use easel_studio::commands::{Reply, ReplyLine};
use easel_studio::config::Settings;
use easel_studio::constants::{LOG_ENV_VAR, MSG_BANNER, MSG_HELP_HINT};
use easel_studio::credentials::JsonFileStore;
use easel_studio::session::MessageKind;

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.debug);

    println!("{}{}", MSG_BANNER, env!("CARGO_PKG_VERSION"));

    let mut settings = Settings::load(args.config.as_deref());
    settings.apply_args(&args);

    let Some(users_path) = settings.users_path() else {
        eprintln!("Could not determine data directory, use --users-file");
        return ExitCode::FAILURE;
    };
    tracing::debug!(path = %users_path.display(), "using account registry");

    let store = JsonFileStore::new(users_path);
    let mut studio = Studio::from_settings(Box::new(store), &settings);

    println!("{MSG_HELP_HINT}");
    match run(&mut studio) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Terminal error: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Log to stderr so events never mix with command output
fn init_logging(debug: bool) {
    let default = if debug { "easel_studio=debug" } else { "warn" };
    let filter = EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// Read commands from stdin until `quit` or end of input
fn run(studio: &mut Studio) -> io::Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut line = String::new();

    loop {
        write!(stdout, "{}", studio.prompt())?;
        stdout.flush()?;

        line.clear();
        if stdin.lock().read_line(&mut line)? == 0 {
            writeln!(stdout)?;
            return Ok(());
        }

        let reply = studio.handle_line(&line);
        print_reply(&mut stdout, &reply)?;
        if reply.is_quit() {
            return Ok(());
        }
    }
}

fn print_reply(out: &mut impl Write, reply: &Reply) -> io::Result<()> {
    for line in reply.lines() {
        match line {
            ReplyLine::Message(message) if message.kind() == MessageKind::Error => {
                writeln!(out, "error: {message}")?
            }
            ReplyLine::Message(message) => writeln!(out, "{message}")?,
            ReplyLine::Text(text) => writeln!(out, "{text}")?,
        }
    }
    Ok(())
}
