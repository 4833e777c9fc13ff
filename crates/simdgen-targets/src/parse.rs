//! TOML overrides for the built-in instruction-set catalog.
//!
//! A catalog override document names replacement lists per family. A family
//! that is not mentioned keeps its built-in list:
//!
//! ```toml
//! x86 = ["sse2", "sse4_2", "avx2"]
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::catalog::Catalog;
use crate::error::{Result, TargetError};
use crate::isa::{CpuFamily, InstructionSet};

/// Replacement lists for some or all families.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CatalogOverrides {
    /// Replacement x86 hierarchy, weakest first.
    #[serde(default)]
    pub x86: Option<Vec<InstructionSet>>,
    /// Replacement ARM hierarchy, weakest first.
    #[serde(default)]
    pub arm: Option<Vec<InstructionSet>>,
}

impl CatalogOverrides {
    /// Whether no family is overridden.
    pub fn is_empty(&self) -> bool {
        self.x86.is_none() && self.arm.is_none()
    }

    /// Build a validated catalog, filling unmentioned families from the
    /// built-in lists.
    pub fn into_catalog(self) -> Result<Catalog> {
        if self.is_empty() {
            return Ok(Catalog::builtin());
        }
        let x86 = self
            .x86
            .unwrap_or_else(|| Catalog::builtin_family(CpuFamily::X86));
        let arm = self
            .arm
            .unwrap_or_else(|| Catalog::builtin_family(CpuFamily::Arm));
        Catalog::new(x86, arm)
    }
}

/// Parse a catalog from a TOML override document.
pub fn parse_catalog_toml(toml_str: &str) -> Result<Catalog> {
    let overrides: CatalogOverrides = toml::from_str(toml_str)?;
    overrides.into_catalog()
}

/// Load a catalog from a TOML override file.
pub fn load_catalog_toml(path: &Path) -> Result<Catalog> {
    if !path.exists() {
        return Err(TargetError::NotFound {
            path: path.to_path_buf(),
        });
    }
    let content = std::fs::read_to_string(path)?;
    parse_catalog_toml(&content)
}
