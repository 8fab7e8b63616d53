use clap::{Args, Subcommand};
use std::path::PathBuf;

use crate::cli::enums::*;

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Bundle the edge handler directory
    ///
    /// Runs the post-build pipeline: assemble an entrypoint from every handler,
    /// bundle it into one IIFE script, and write the script and manifest.json.
    Build(BuildArgs),

    /// Verify a written bundle
    ///
    /// Reads manifest.json and checks that the bundle it names exists and
    /// matches the recorded hash, length, and content type.
    Check(CheckArgs),

    /// Print the JSON schema for edge.config.json
    Schema(SchemaArgs),
}

/// Arguments for the build command
///
/// Every option left unset falls back to edge.config.json, then `EDGE_*`
/// environment variables, then the built-in defaults.
#[derive(Args, Debug, Default)]
pub struct BuildArgs {
    /// Directory containing the handler files
    ///
    /// Only regular `.js` and `.ts` files directly inside it are bundled.
    /// Defaults to `edge-handlers`.
    #[arg(short = 's', long, value_name = "DIR")]
    pub source_dir: Option<PathBuf>,

    /// Directory receiving the bundle and manifest.json
    ///
    /// Created if it doesn't exist. Defaults to `.edge/handlers`.
    #[arg(short = 'd', long, value_name = "DIR")]
    pub out_dir: Option<PathBuf>,

    /// Run the pipeline without writing any output files
    #[arg(long)]
    pub no_persist: bool,

    /// JavaScript syntax level of the emitted script
    #[arg(short = 't', long, value_enum)]
    pub target: Option<EsTarget>,

    /// Minify the emitted script
    #[arg(long)]
    pub minify: bool,

    /// Project root used to resolve relative paths and node_modules
    #[arg(long, value_name = "DIR")]
    pub cwd: Option<PathBuf>,

    /// Path to edge.config.json
    ///
    /// If not provided, edge.config.json in the project root is used when present.
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

/// Arguments for the check command
#[derive(Args, Debug, Default)]
pub struct CheckArgs {
    /// Output directory to verify
    ///
    /// Defaults to the configured outDir.
    #[arg(short = 'd', long, value_name = "DIR")]
    pub out_dir: Option<PathBuf>,

    /// Project root used to resolve relative paths
    #[arg(long, value_name = "DIR")]
    pub cwd: Option<PathBuf>,

    /// Path to edge.config.json
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

/// Arguments for the schema command
#[derive(Args, Debug, Default)]
pub struct SchemaArgs {
    /// Print an example edge.config.json instead of the schema
    #[arg(long)]
    pub example: bool,
}
