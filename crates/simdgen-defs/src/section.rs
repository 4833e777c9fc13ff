//! Section labels of a definition file.

use std::fmt;

use serde::Serialize;

/// One of the three code fragments a metric definition carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Section {
    /// Per-batch setup, expanded into the `<METRIC>_SETUP` macro.
    Setup,
    /// Per-batch loop body, expanded into the `<METRIC>_BODY` macro.
    Body,
    /// Trailing statements that reduce the accumulator and return.
    Remainder,
}

impl Section {
    /// All sections in their conventional order.
    pub const ALL: [Section; 3] = [Section::Setup, Section::Body, Section::Remainder];

    /// The label line that opens this section.
    pub fn label(self) -> &'static str {
        match self {
            Section::Setup => "SETUP",
            Section::Body => "BODY",
            Section::Remainder => "REMAINDER",
        }
    }

    /// Match a line against the labels. Exact and case-sensitive.
    pub fn from_label(line: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.label() == line)
    }

    /// Match a line that is a label only after trimming or case-folding.
    pub(crate) fn near_label(line: &str) -> Option<Self> {
        let trimmed = line.trim();
        Self::ALL
            .into_iter()
            .find(|s| s.label().eq_ignore_ascii_case(trimmed))
    }

    pub(crate) fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
