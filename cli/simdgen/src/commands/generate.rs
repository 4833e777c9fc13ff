//! `simdgen generate` — resolve, parse, expand, write.

use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};
use simdgen_emit::{generate, plan, GenerateConfig, GenerationReport};

use crate::commands::OutputFormat;
use crate::manifest::Project;

/// Run the generation pipeline and print its report.
pub fn run(
    project: &Project,
    target: Option<&str>,
    definitions: Option<&Path>,
    output: Option<&Path>,
    dry_run: bool,
    format: OutputFormat,
) -> Result<()> {
    let report = execute(project, target, definitions, output, dry_run)?;
    match format {
        OutputFormat::Human => print!("{report}"),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
    }
    Ok(())
}

/// Build the configuration from flags and manifest, then generate (or plan,
/// on a dry run).
pub fn execute(
    project: &Project,
    target: Option<&str>,
    definitions: Option<&Path>,
    output: Option<&Path>,
    dry_run: bool,
) -> Result<GenerationReport> {
    let target = project.target(target).context(
        "no target architecture given; pass --target or set [generate] target in simdgen.toml",
    )?;

    let config = GenerateConfig::new(
        target,
        project.definitions_dir(definitions),
        project.output_dir(output),
    )
    .with_catalog(project.catalog()?)
    .with_options(project.emit_options());

    if dry_run {
        let start = Instant::now();
        let plan = plan(&config)?;
        let duration_ms = start.elapsed().as_millis() as u64;
        return Ok(plan.report(&config.output_dir, true, duration_ms));
    }

    let report = generate(&config)
        .with_context(|| format!("generating kernels for target '{target}'"))?;
    Ok(report)
}
