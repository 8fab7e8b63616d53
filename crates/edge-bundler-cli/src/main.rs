//! edge-bundler CLI entry point.
//!
//! Parses arguments, sets up logging and terminal output, and dispatches to
//! the subcommand.

use clap::Parser;
use edge_bundler_cli::{cli, commands, error, logger, ui};
use miette::Result;

#[tokio::main]
async fn main() -> Result<()> {
    let args = cli::Cli::parse();

    logger::init_logger(args.verbose, args.quiet, args.no_color);
    ui::init(args.no_color, args.quiet);

    let result = match args.command {
        cli::Command::Build(build_args) => commands::build_execute(build_args).await,
        cli::Command::Check(check_args) => commands::check_execute(check_args).await,
        cli::Command::Schema(schema_args) => commands::schema_execute(schema_args),
    };

    result.map_err(error::cli_error_to_miette)
}
