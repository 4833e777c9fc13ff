//! Generation pipeline orchestrator.
//!
//! resolve target -> parse definitions -> create output dir -> expand + write.
//!
//! Resolution and parsing run before anything touches the output directory,
//! so an unknown target or a malformed definition leaves the filesystem as it
//! was. A failure while writing aborts the run; files already written by that
//! run should not be trusted.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use simdgen_defs::parse_all;
use simdgen_targets::{Catalog, ResolvedArchitectures};
use tracing::{debug, info};

use crate::artifact::{Artifact, MetricArtifacts};
use crate::error::{GenerateError, Result};
use crate::expand::expand;
use crate::hash::{content_hash, hash_hex};
use crate::options::EmitOptions;
use crate::report::{GenerationReport, WrittenArtifact};

/// Inputs of one generation run.
#[derive(Debug, Clone)]
pub struct GenerateConfig {
    /// Requested target instruction set.
    pub target: String,
    /// Directory holding the `.def` files.
    pub definitions_dir: PathBuf,
    /// Directory receiving generated files. Created if missing.
    pub output_dir: PathBuf,
    /// Instruction-set hierarchy the target is resolved against.
    pub catalog: Catalog,
    /// Textual conventions of the emitted code.
    pub options: EmitOptions,
}

impl GenerateConfig {
    /// A configuration using the built-in catalog and default emit options.
    pub fn new(
        target: impl Into<String>,
        definitions_dir: impl Into<PathBuf>,
        output_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            target: target.into(),
            definitions_dir: definitions_dir.into(),
            output_dir: output_dir.into(),
            catalog: Catalog::builtin(),
            options: EmitOptions::default(),
        }
    }

    pub fn with_catalog(mut self, catalog: Catalog) -> Self {
        self.catalog = catalog;
        self
    }

    pub fn with_options(mut self, options: EmitOptions) -> Self {
        self.options = options;
        self
    }
}

/// Everything a run would write, computed in memory.
#[derive(Debug, Clone)]
pub struct Plan {
    pub resolved: ResolvedArchitectures,
    /// Per metric, in name order.
    pub metrics: Vec<MetricArtifacts>,
}

impl Plan {
    /// Every artifact, metric by metric, header before sources.
    pub fn artifacts(&self) -> impl Iterator<Item = &Artifact> {
        self.metrics.iter().flat_map(MetricArtifacts::iter)
    }

    /// Summarize the plan as if its artifacts were placed in `output_dir`.
    pub fn report(&self, output_dir: &Path, dry_run: bool, duration_ms: u64) -> GenerationReport {
        GenerationReport {
            target: self.resolved.target().name().to_string(),
            family: self.resolved.family,
            architectures: self.resolved.names().iter().map(|s| s.to_string()).collect(),
            metrics: self.metrics.iter().map(|m| m.metric.clone()).collect(),
            output_dir: output_dir.to_path_buf(),
            artifacts: self
                .artifacts()
                .map(|a| WrittenArtifact {
                    path: output_dir.join(&a.file_name),
                    kind: a.kind,
                    bytes: a.contents.len(),
                    sha256: hash_hex(&content_hash(a.contents.as_bytes())),
                })
                .collect(),
            dry_run,
            duration_ms,
        }
    }
}

/// Resolve the target, parse every definition and expand each metric,
/// without touching the output directory.
pub fn plan(config: &GenerateConfig) -> Result<Plan> {
    let resolved = config.catalog.resolve(&config.target)?;
    info!(
        requested = %config.target,
        family = %resolved.family,
        architectures = ?resolved.names(),
        "resolved SIMD targets"
    );

    let metrics = parse_all(&config.definitions_dir)?;

    let metrics = metrics
        .iter()
        .map(|spec| {
            debug!(metric = spec.name(), "expanding metric");
            expand(spec, &resolved, &config.options)
        })
        .collect();

    Ok(Plan { resolved, metrics })
}

/// Write artifacts into `dir`, creating it (and its parents) if needed.
/// Existing files are overwritten.
pub fn write_artifacts<'a>(
    dir: &Path,
    artifacts: impl IntoIterator<Item = &'a Artifact>,
) -> Result<()> {
    fs::create_dir_all(dir).map_err(|source| GenerateError::Filesystem {
        path: dir.to_path_buf(),
        source,
    })?;

    for artifact in artifacts {
        let path = dir.join(&artifact.file_name);
        fs::write(&path, &artifact.contents).map_err(|source| GenerateError::Filesystem {
            path: path.clone(),
            source,
        })?;
        debug!(path = %path.display(), bytes = artifact.contents.len(), "wrote artifact");
    }
    Ok(())
}

/// Run the full pipeline and write every artifact to the output directory.
pub fn generate(config: &GenerateConfig) -> Result<GenerationReport> {
    let start = Instant::now();

    let plan = plan(config)?;
    write_artifacts(&config.output_dir, plan.artifacts())?;
    for metric in &plan.metrics {
        info!(
            metric = %metric.metric,
            files = metric.sources.len() + 1,
            "generated metric kernels"
        );
    }

    let duration_ms = start.elapsed().as_millis() as u64;
    Ok(plan.report(&config.output_dir, false, duration_ms))
}
