//! Command-line interface definition.
//!
//! # Command Structure
//!
//! - `edge-bundler build` - Bundle the handler directory and write the output
//! - `edge-bundler check` - Verify a previously written bundle against its manifest
//! - `edge-bundler schema` - Print the JSON schema of `edge.config.json`

mod commands;
pub mod enums;

use clap::Parser;

pub use commands::{BuildArgs, CheckArgs, Command, SchemaArgs};
pub use enums::*;

/// edge-bundler - package edge handlers into a single deployable script
#[derive(Parser, Debug)]
#[command(
    name = "edge-bundler",
    version,
    about = "Bundle a directory of edge handlers into one content-addressed script",
    long_about = "edge-bundler collects every .js and .ts handler in a directory, registers each\n\
                  one under its file name, and bundles them with Rolldown into a single\n\
                  self-executing script. The script is written under its SHA-1 next to a\n\
                  manifest.json describing it."
)]
pub struct Cli {
    /// Enable verbose logging (debug level)
    ///
    /// Shows handler discovery, entrypoint generation, and per-module bundler activity.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}
