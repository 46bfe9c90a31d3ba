//! Easel image studio library
//!
//! Local accounts, a per-login generation history, and the interactive
//! command surface. The `easel` binary is a thin line-reading loop over
//! [`app::Studio`].

pub mod app;
pub mod args;
pub mod commands;
pub mod config;
pub mod constants;
pub mod credentials;
pub mod error;
pub mod generator;
pub mod history;
pub mod session;
