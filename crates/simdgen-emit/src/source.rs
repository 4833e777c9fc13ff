//! Per-architecture translation units.

use std::fmt;

use simdgen_targets::InstructionSet;

use crate::instantiation::Instantiation;
use crate::options::EmitOptions;

/// Structured contents of `<metric>_<arch>.cpp`: the header include and the
/// defining instantiations for one architecture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceArtifact {
    file_name: String,
    header: String,
    definitions: Vec<Instantiation>,
}

impl SourceArtifact {
    pub fn build(metric: &str, arch: &InstructionSet, options: &EmitOptions) -> Self {
        Self {
            file_name: options.source_file_name(metric, &arch.file_tag()),
            header: options.header_file_name(metric),
            definitions: Instantiation::for_arch(metric, arch, options),
        }
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn definitions(&self) -> &[Instantiation] {
        &self.definitions
    }
}

impl fmt::Display for SourceArtifact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "#include \"{}\"", self.header)?;
        writeln!(f)?;
        for def in &self.definitions {
            writeln!(f, "{def}")?;
        }
        Ok(())
    }
}
