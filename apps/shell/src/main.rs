#![warn(rust_2018_idioms, unused_lifetimes)]
#![allow(clippy::print_stderr, clippy::print_stdout)]

mod args;
mod handlers;
mod sample;

use crate::args::{Cli, ShellCommand};
use crate::handlers::{records, seed};

use anyhow::Result;
use clap::Parser;
use shelf::kernel::config::{StoreSettings, load_config};
use shelf::logger::{LevelFilter, Telemetry, parse_level};

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut settings: StoreSettings = load_config(cli.config.as_deref())?;
    if let Some(root) = cli.root {
        settings.root = root;
    }

    let level = if cli.verbose { LevelFilter::DEBUG } else { parse_level(&settings.log_level)? };
    let _telemetry = Telemetry::builder().name(env!("CARGO_PKG_NAME")).level(level).init()?;

    let db = shelf::open(&settings, level)?;

    match cli.command {
        ShellCommand::Seed {} => seed::seed(&db)?,
        ShellCommand::Read { collection, resource } => records::read(&db, &collection, &resource)?,
        ShellCommand::List { collection, decode: false } => records::list(&db, &collection)?,
        ShellCommand::List { collection, decode: true } => records::list_decoded(&db, &collection)?,
        ShellCommand::Delete { collection, resource } => {
            records::delete(&db, &collection, resource.as_deref())?;
        },
    }

    Ok(())
}
