//! Instruction-set identifiers and CPU families.

use std::fmt;

use serde::{Deserialize, Serialize};

/// CPU family an instruction set belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CpuFamily {
    X86,
    Arm,
}

impl CpuFamily {
    /// Every family, in lookup order.
    pub const ALL: [CpuFamily; 2] = [CpuFamily::X86, CpuFamily::Arm];

    /// Short lowercase name (`x86`, `arm`).
    pub fn as_str(self) -> &'static str {
        match self {
            CpuFamily::X86 => "x86",
            CpuFamily::Arm => "arm",
        }
    }
}

impl fmt::Display for CpuFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A SIMD instruction-set identifier as understood by the runtime SIMD layer
/// (e.g. `sse4_2`, `neon64`, `fma3<xs::avx2>`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InstructionSet(String);

impl InstructionSet {
    /// Wrap an identifier.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// The identifier exactly as it appears in the catalog.
    pub fn name(&self) -> &str {
        &self.0
    }

    /// C++ tag type for this instruction set inside `namespace`.
    ///
    /// Every identifier in the name is requalified, including template
    /// arguments: with namespace `xsimd`, `sse2` becomes `xsimd::sse2` and
    /// `fma3<xs::avx>` becomes `xsimd::fma3<xsimd::avx>`. An empty namespace
    /// leaves the identifiers unqualified.
    pub fn cpp_tag(&self, namespace: &str) -> String {
        let name = self.0.as_str();
        let mut out = String::with_capacity(name.len() + namespace.len() * 2);
        let mut cursor = 0;
        for (start, end) in self.words() {
            out.push_str(&name[cursor..start]);
            cursor = end;
            if name[end..].starts_with("::") {
                // Drop the existing qualifier along with its `::`.
                cursor = end + 2;
                continue;
            }
            let word = &name[start..end];
            if !namespace.is_empty() && !word.starts_with(|c: char| c.is_ascii_digit()) {
                out.push_str(namespace);
                out.push_str("::");
            }
            out.push_str(word);
        }
        out.push_str(&name[cursor..]);
        out
    }

    /// Filesystem-safe identifier used in generated file names.
    ///
    /// Namespace qualifiers are dropped and every run of characters that is
    /// not alphanumeric or `_` collapses to a single `_`, so `fma3<xs::avx2>`
    /// becomes `fma3_avx2`.
    pub fn file_tag(&self) -> String {
        let name = self.0.as_str();
        self.words()
            .into_iter()
            .filter(|&(_, end)| !name[end..].starts_with("::"))
            .map(|(s, end)| &name[s..end])
            .collect::<Vec<_>>()
            .join("_")
    }

    /// Byte spans of the identifier words (`[A-Za-z0-9_]+`) in the name.
    fn words(&self) -> Vec<(usize, usize)> {
        let name = self.0.as_str();
        let mut words = Vec::new();
        let mut start = None;
        for (i, c) in name.char_indices() {
            let ident = c.is_ascii_alphanumeric() || c == '_';
            match (ident, start) {
                (true, None) => start = Some(i),
                (false, Some(s)) => {
                    words.push((s, i));
                    start = None;
                }
                _ => {}
            }
        }
        if let Some(s) = start {
            words.push((s, name.len()));
        }
        words
    }

    /// Upper-cased identifier used as a comment banner.
    pub fn banner(&self) -> String {
        self.0.to_uppercase()
    }
}

impl fmt::Display for InstructionSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for InstructionSet {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}
