//! Textual conventions of the emitted C++.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Element types every kernel is instantiated for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementType {
    Float,
    Double,
}

impl ElementType {
    /// Instantiation order within one architecture.
    pub const ALL: [ElementType; 2] = [ElementType::Float, ElementType::Double];

    pub fn c_name(self) -> &'static str {
        match self {
            ElementType::Float => "float",
            ElementType::Double => "double",
        }
    }
}

impl fmt::Display for ElementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.c_name())
    }
}

/// Names the generated code relies on from the runtime SIMD layer, and the
/// file extensions of the output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct EmitOptions {
    /// Header providing the loop helper macro, included by every kernel header.
    pub support_header: String,
    /// Namespace of the SIMD layer (`xs::batch`, `xs::sse2`, ...).
    pub simd_namespace: String,
    /// Macro that loops over a vector in batches, taking the setup macro, the
    /// body macro and the batch type.
    pub loop_macro: String,
    /// Extension of generated headers.
    pub header_extension: String,
    /// Extension of generated translation units.
    pub source_extension: String,
}

impl Default for EmitOptions {
    fn default() -> Self {
        Self {
            support_header: "utils.hpp".into(),
            simd_namespace: "xs".into(),
            loop_macro: "MAKE_STD_VEC_LOOP".into(),
            header_extension: "hpp".into(),
            source_extension: "cpp".into(),
        }
    }
}

impl EmitOptions {
    /// Qualify `name` with the SIMD namespace.
    pub(crate) fn qualify(&self, name: &str) -> String {
        if self.simd_namespace.is_empty() {
            name.to_string()
        } else {
            format!("{}::{name}", self.simd_namespace)
        }
    }

    pub(crate) fn header_file_name(&self, metric: &str) -> String {
        format!("{metric}.{}", self.header_extension)
    }

    pub(crate) fn source_file_name(&self, metric: &str, file_tag: &str) -> String {
        format!("{metric}_{file_tag}.{}", self.source_extension)
    }
}
