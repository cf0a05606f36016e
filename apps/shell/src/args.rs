//! # CLI Argument Definitions
//!
//! This module defines the command-line interface of the `shelf` binary using `clap`.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// The main CLI structure parsing command-line arguments.
#[derive(Debug, Parser)]
#[command(name = "shelf")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(arg_required_else_help = true)]
#[command(about = "Inspect and edit a Shelf document store")]
pub(crate) struct Cli {
    /// Store root directory (overrides the config file and `SHELF__ROOT`)
    #[arg(short, long, global = true)]
    pub(crate) root: Option<PathBuf>,

    /// Configuration file (`.toml` or `.json`)
    #[arg(short, long, global = true)]
    pub(crate) config: Option<PathBuf>,

    /// Log store operations at debug level
    #[arg(short, long, global = true)]
    pub(crate) verbose: bool,

    /// The subcommand to execute.
    #[command(subcommand)]
    pub(crate) command: ShellCommand,
}

#[derive(Debug, Subcommand)]
pub(crate) enum ShellCommand {
    /// Write the sample employee records into the `users` collection
    Seed {},
    /// Print one record
    Read {
        collection: String,
        /// Resource name, with or without the codec suffix
        resource: String,
    },
    /// Print every record of a collection
    List {
        collection: String,
        /// Decode each record as a sample employee and print one summary line per record
        #[arg(short, long)]
        decode: bool,
    },
    /// Delete one record, or the whole collection when no resource is given
    Delete {
        collection: String,
        resource: Option<String>,
    },
}
