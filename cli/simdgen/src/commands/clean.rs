//! `simdgen clean` — remove generated sources.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

/// Remove the generated output directory.
pub fn run(output_dir: &Path) -> Result<()> {
    if output_dir.exists() {
        fs::remove_dir_all(output_dir)
            .with_context(|| format!("removing {}", output_dir.display()))?;
        println!("Removed {}", output_dir.display());
    } else {
        println!("Already clean: {} does not exist", output_dir.display());
    }
    Ok(())
}
