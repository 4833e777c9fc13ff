//! Discovery and loading of definition files.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::config::{MetricConfig, MetricSpec};
use crate::error::{DefinitionError, Result};
use crate::parse::parse_definition;

/// File extension of definition files.
pub const DEFINITION_EXTENSION: &str = "def";

/// List the definition files directly inside `dir`, sorted by path.
///
/// The scan is flat: subdirectories are ignored, as are files with any other
/// extension.
pub fn discover_definitions(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(DefinitionError::NotFound {
            path: dir.to_path_buf(),
        });
    }

    let io_err = |source| DefinitionError::Io {
        path: dir.to_path_buf(),
        source,
    };

    let mut paths = Vec::new();
    for entry in fs::read_dir(dir).map_err(io_err)? {
        let path = entry.map_err(io_err)?.path();
        if path.is_file()
            && path.extension().and_then(|e| e.to_str()) == Some(DEFINITION_EXTENSION)
        {
            paths.push(path);
        }
    }
    paths.sort();
    Ok(paths)
}

/// Read and parse one definition file. The metric is named after the file stem.
pub fn load_definition(path: &Path) -> Result<MetricSpec> {
    let metric = path
        .file_stem()
        .and_then(|s| s.to_str())
        .ok_or_else(|| DefinitionError::InvalidMetricName {
            name: path
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_default(),
        })?;

    let text = fs::read_to_string(path).map_err(|source| DefinitionError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    debug!(metric, path = %path.display(), "parsing definition");
    parse_definition(metric, &text)
}

/// Discover and parse every definition file in `dir`.
///
/// Fails on the first malformed file; no partial configuration is returned.
/// Metric names that differ only in case are rejected, since generated
/// guards and macros use the upper-cased name.
pub fn parse_all(dir: &Path) -> Result<MetricConfig> {
    let paths = discover_definitions(dir)?;
    let mut config = MetricConfig::new();
    let mut upper: HashMap<String, String> = HashMap::new();
    for path in &paths {
        let spec = load_definition(path)?;
        let key = spec.name().to_uppercase();
        if let Some(first) = upper.get(&key) {
            return Err(DefinitionError::MetricNameCollision {
                first: first.clone(),
                second: spec.name().to_string(),
                upper: key,
            });
        }
        upper.insert(key, spec.name().to_string());
        config.insert(spec);
    }
    info!(
        dir = %dir.display(),
        metrics = config.len(),
        "loaded metric definitions"
    );
    Ok(config)
}
