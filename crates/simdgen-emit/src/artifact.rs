//! Generated output files.

use std::fmt;

use serde::Serialize;

/// Whether an artifact is the shared header or a per-architecture source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ArtifactKind {
    Header,
    Source,
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(match self {
            ArtifactKind::Header => "header",
            ArtifactKind::Source => "source",
        })
    }
}

/// A file name (relative to the output directory) and its full text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub file_name: String,
    pub kind: ArtifactKind,
    pub contents: String,
}

/// Everything generated for one metric.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricArtifacts {
    pub metric: String,
    pub header: Artifact,
    /// One per resolved architecture, weakest first.
    pub sources: Vec<Artifact>,
}

impl MetricArtifacts {
    /// Header first, then sources.
    pub fn iter(&self) -> impl Iterator<Item = &Artifact> {
        std::iter::once(&self.header).chain(self.sources.iter())
    }
}
