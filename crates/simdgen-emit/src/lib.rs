//! Per-architecture C++ kernel expansion and the generation pipeline.
//!
//! For every metric the expander builds one header holding the generic kernel
//! with `extern` instantiation declarations for each resolved architecture,
//! plus one small translation unit per architecture that provides the
//! matching definitions. The [`pipeline`] stitches target resolution,
//! definition parsing, expansion and file output together.

pub mod artifact;
pub mod error;
pub mod expand;
pub mod hash;
pub mod header;
pub mod instantiation;
pub mod options;
pub mod pipeline;
pub mod report;
pub mod source;

pub use artifact::{Artifact, ArtifactKind, MetricArtifacts};
pub use error::{GenerateError, Result};
pub use expand::expand;
pub use header::HeaderArtifact;
pub use instantiation::Instantiation;
pub use options::{ElementType, EmitOptions};
pub use pipeline::{generate, plan, write_artifacts, GenerateConfig, Plan};
pub use report::{GenerationReport, WrittenArtifact};
pub use source::SourceArtifact;
