//! Command-line interface wiring for the `idcard` binary.
//!
//! This module owns the clap definitions and delegates execution to
//! one submodule per command.

use anyhow::Result;
use clap::{Parser, Subcommand};

pub mod common;
pub mod details;
pub mod render;
pub mod show;
pub mod utils;

/// Parsed CLI entrypoint for the `idcard` binary.
#[derive(Parser, Debug)]
#[command(name = "idcard", version, about = "Student ID card generator")]
pub struct Cli {
    /// Emit debug logs on stderr.
    #[arg(long, global = true)]
    pub log: bool,

    /// Command to execute.
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Compose the ID card and export it as PNG.
    Render(render::RenderArgs),
    /// Display an existing card image in the terminal.
    Show(show::ShowArgs),
    /// Print the effective card details and QR payload.
    Details(details::DetailsCommandArgs),
}

/// Execute the requested command.
pub fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Render(args) => render::handle(args),
        Command::Show(args) => show::handle(args),
        Command::Details(args) => details::handle(args),
    }
}
