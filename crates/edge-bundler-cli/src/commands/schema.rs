//! `edge-bundler schema`.

use crate::cli::SchemaArgs;
use crate::config::EdgeConfig;
use crate::error::Result;

/// Print the edge.config.json JSON schema, or an example config, to stdout.
pub fn execute(args: SchemaArgs) -> Result<()> {
    let output = if args.example {
        EdgeConfig::example_config()?
    } else {
        serde_json::to_string_pretty(&EdgeConfig::json_schema()?)?
    };
    println!("{}", output);
    Ok(())
}
