//! Metric expansion: one header and one source per architecture.

use simdgen_defs::MetricSpec;
use simdgen_targets::ResolvedArchitectures;

use crate::artifact::{Artifact, ArtifactKind, MetricArtifacts};
use crate::header::HeaderArtifact;
use crate::options::EmitOptions;
use crate::source::SourceArtifact;

/// Render every artifact of one metric.
///
/// The result depends only on the arguments; other metrics in the same run
/// have no influence on it.
pub fn expand(
    spec: &MetricSpec,
    resolved: &ResolvedArchitectures,
    options: &EmitOptions,
) -> MetricArtifacts {
    let header = HeaderArtifact::build(spec, resolved, options);
    let sources = resolved
        .iter()
        .map(|arch| {
            let source = SourceArtifact::build(spec.name(), arch, options);
            Artifact {
                file_name: source.file_name().to_string(),
                kind: ArtifactKind::Source,
                contents: source.to_string(),
            }
        })
        .collect();

    MetricArtifacts {
        metric: spec.name().to_string(),
        header: Artifact {
            file_name: header.file_name().to_string(),
            kind: ArtifactKind::Header,
            contents: header.to_string(),
        },
        sources,
    }
}
