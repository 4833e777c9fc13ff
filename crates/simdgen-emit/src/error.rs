//! Generation errors.

use std::path::PathBuf;

use simdgen_defs::DefinitionError;
use simdgen_targets::TargetError;
use thiserror::Error;

/// Errors that can abort a generation run.
#[derive(Debug, Error)]
pub enum GenerateError {
    #[error(transparent)]
    Target(#[from] TargetError),

    #[error(transparent)]
    Definition(#[from] DefinitionError),

    #[error("filesystem error on {}: {source}", path.display())]
    Filesystem {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Result type alias for generation operations.
pub type Result<T> = std::result::Result<T, GenerateError>;
