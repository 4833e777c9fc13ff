//! Definition parsing errors.

use std::path::PathBuf;

use crate::section::Section;

/// Errors that can occur while loading metric definitions.
#[derive(Debug, thiserror::Error)]
pub enum DefinitionError {
    /// A definition did not yield all three sections.
    #[error("malformed definition for metric '{metric}': missing section(s) {}", labels(.missing))]
    MalformedSpecification {
        /// Metric the definition belongs to.
        metric: String,
        /// Sections that never appeared.
        missing: Vec<Section>,
    },

    /// The metric name cannot be used as a C++ identifier.
    #[error("invalid metric name '{name}': expected a C identifier ([A-Za-z_][A-Za-z0-9_]*)")]
    InvalidMetricName { name: String },

    /// Two metrics would share include guards and macro names.
    #[error(
        "metrics '{first}' and '{second}' both upper-case to '{upper}', \
         so their header guards and macros would clash"
    )]
    MetricNameCollision {
        first: String,
        second: String,
        upper: String,
    },

    /// The definitions directory does not exist.
    #[error("definitions directory not found: {}", path.display())]
    NotFound { path: PathBuf },

    /// Reading a directory or file failed.
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

fn labels(sections: &[Section]) -> String {
    sections
        .iter()
        .map(|s| s.label())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Result type alias for definition operations.
pub type Result<T> = std::result::Result<T, DefinitionError>;
