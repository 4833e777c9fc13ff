//! Error types for catalog construction and target resolution.

use std::path::PathBuf;

/// Errors that can occur while building a catalog or resolving a target.
#[derive(Debug, thiserror::Error)]
pub enum TargetError {
    /// The requested target is not present in any family catalog.
    #[error(
        "unknown target architecture '{requested}'; choose from {} for x86 systems, \
         or {} for ARM systems",
        list(.x86),
        list(.arm)
    )]
    UnknownArchitecture {
        /// The value that was asked for.
        requested: String,
        /// Valid x86 identifiers, in catalog order.
        x86: Vec<String>,
        /// Valid ARM identifiers, in catalog order.
        arm: Vec<String>,
    },

    /// An identifier appears more than once across the catalog.
    #[error("instruction set '{name}' is listed {}", occurrences(.first, .second))]
    DuplicateInstructionSet {
        /// The repeated identifier.
        name: String,
        /// Family of the first occurrence.
        first: String,
        /// Family of the repeated occurrence.
        second: String,
    },

    /// Two identifiers map to the same output file tag.
    #[error("instruction sets '{first}' and '{second}' share the file tag '{tag}'")]
    FileTagCollision {
        /// The shared tag.
        tag: String,
        /// First identifier.
        first: String,
        /// Second identifier.
        second: String,
    },

    /// A catalog entry has no usable characters.
    #[error("empty instruction-set identifier in the {family} catalog")]
    EmptyIdentifier {
        /// Family the entry belongs to.
        family: String,
    },

    /// TOML deserialization error.
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// I/O error reading a catalog file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Catalog file not found.
    #[error("catalog file not found: {}", path.display())]
    NotFound {
        /// The path that was not found.
        path: PathBuf,
    },
}

fn list(names: &[String]) -> String {
    let quoted: Vec<String> = names.iter().map(|n| format!("'{n}'")).collect();
    format!("[{}]", quoted.join(", "))
}

fn occurrences(first: &str, second: &str) -> String {
    if first == second {
        format!("twice in the {first} catalog")
    } else {
        format!("in both the {first} and {second} catalogs")
    }
}

/// Result type for target operations.
pub type Result<T> = std::result::Result<T, TargetError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_architecture_lists_both_families() {
        let err = TargetError::UnknownArchitecture {
            requested: "avx9000".into(),
            x86: vec!["sse2".into(), "avx".into()],
            arm: vec!["neon".into()],
        };
        let msg = err.to_string();
        assert!(msg.contains("'avx9000'"));
        assert!(msg.contains("['sse2', 'avx'] for x86"));
        assert!(msg.contains("['neon'] for ARM"));
    }

    #[test]
    fn duplicate_wording_depends_on_families() {
        let within = TargetError::DuplicateInstructionSet {
            name: "avx".into(),
            first: "x86".into(),
            second: "x86".into(),
        };
        assert_eq!(
            within.to_string(),
            "instruction set 'avx' is listed twice in the x86 catalog"
        );

        let across = TargetError::DuplicateInstructionSet {
            name: "neon".into(),
            first: "x86".into(),
            second: "arm".into(),
        };
        assert_eq!(
            across.to_string(),
            "instruction set 'neon' is listed in both the x86 and arm catalogs"
        );
    }
}
