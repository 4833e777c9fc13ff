//! `simdgen show` — print parsed metric definitions.

use std::path::Path;

use anyhow::{Context, Result};
use simdgen_defs::parse_all;

use crate::commands::OutputFormat;

pub fn run(definitions_dir: &Path, format: OutputFormat) -> Result<()> {
    let config = parse_all(definitions_dir)
        .with_context(|| format!("loading definitions from {}", definitions_dir.display()))?;

    if config.is_empty() {
        println!("No definitions found in {}", definitions_dir.display());
        return Ok(());
    }

    match format {
        OutputFormat::Human => print!("{config}"),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&config)?),
    }
    Ok(())
}
