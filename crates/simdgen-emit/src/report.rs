//! Generation report summarizing one run.

use std::fmt;
use std::path::PathBuf;

use serde::Serialize;
use simdgen_targets::CpuFamily;

use crate::artifact::ArtifactKind;

/// One artifact written (or, on a dry run, that would be written).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WrittenArtifact {
    pub path: PathBuf,
    pub kind: ArtifactKind,
    pub bytes: usize,
    /// Hex SHA-256 of the contents.
    pub sha256: String,
}

/// Summary of a generation run.
#[derive(Debug, Clone, Serialize)]
pub struct GenerationReport {
    /// Requested target instruction set.
    pub target: String,
    pub family: CpuFamily,
    /// Resolved architectures, weakest first.
    pub architectures: Vec<String>,
    /// Metric names in generation order.
    pub metrics: Vec<String>,
    pub output_dir: PathBuf,
    pub artifacts: Vec<WrittenArtifact>,
    /// Whether the files were left untouched.
    pub dry_run: bool,
    pub duration_ms: u64,
}

impl GenerationReport {
    pub fn header_count(&self) -> usize {
        self.count(ArtifactKind::Header)
    }

    pub fn source_count(&self) -> usize {
        self.count(ArtifactKind::Source)
    }

    fn count(&self, kind: ArtifactKind) -> usize {
        self.artifacts.iter().filter(|a| a.kind == kind).count()
    }
}

impl fmt::Display for GenerationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "=== Generation Report{} ===",
            if self.dry_run { " (dry run)" } else { "" }
        )?;
        writeln!(f, "Target: {} ({})", self.target, self.family)?;
        writeln!(f, "Architectures: {}", self.architectures.join(", "))?;
        writeln!(f, "Output: {}", self.output_dir.display())?;
        writeln!(f, "Duration: {} ms", self.duration_ms)?;
        writeln!(f)?;

        writeln!(f, "--- Metrics ({}) ---", self.metrics.len())?;
        for metric in &self.metrics {
            writeln!(f, "  {metric}")?;
        }

        writeln!(f)?;
        writeln!(
            f,
            "--- Artifacts ({} headers, {} sources) ---",
            self.header_count(),
            self.source_count()
        )?;
        for artifact in &self.artifacts {
            writeln!(
                f,
                "  {:<6} {:>7} B  {}  {}",
                artifact.kind,
                artifact.bytes,
                &artifact.sha256[..artifact.sha256.len().min(12)],
                artifact.path.display()
            )?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_display() {
        let report = GenerationReport {
            target: "sse3".into(),
            family: CpuFamily::X86,
            architectures: vec!["sse2".into(), "sse3".into()],
            metrics: vec!["manhattan".into()],
            output_dir: PathBuf::from("generated"),
            artifacts: vec![
                WrittenArtifact {
                    path: PathBuf::from("generated/manhattan.hpp"),
                    kind: ArtifactKind::Header,
                    bytes: 1024,
                    sha256: "ab".repeat(32),
                },
                WrittenArtifact {
                    path: PathBuf::from("generated/manhattan_sse2.cpp"),
                    kind: ArtifactKind::Source,
                    bytes: 256,
                    sha256: "cd".repeat(32),
                },
            ],
            dry_run: false,
            duration_ms: 3,
        };

        let output = format!("{report}");
        assert!(output.contains("Generation Report ==="));
        assert!(output.contains("Target: sse3 (x86)"));
        assert!(output.contains("Architectures: sse2, sse3"));
        assert!(output.contains("1 headers, 1 sources"));
        assert!(output.contains("manhattan_sse2.cpp"));
        assert!(!output.contains("dry run"));
    }
}
