//! Command-line front end: argument parsing, the interactive menu and
//! terminal rendering. Everything here talks to the vault through
//! `nodevault::api::VaultApi`.

mod commands;
mod menu;
mod render;
mod setup;

pub use commands::run;
