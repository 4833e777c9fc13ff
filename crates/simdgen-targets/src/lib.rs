//! SIMD instruction-set catalogs and target resolution for simdgen.
//!
//! An instruction-set catalog holds one ordered list per CPU family. Within a
//! family each entry is assumed to be a superset of every entry before it, so
//! resolving a target yields that target together with everything weaker:
//!
//! - **ISA:** [`InstructionSet`] identifiers and their C++/file-name forms
//! - **Catalog:** the per-family hierarchy backed by a single lookup table
//! - **Parse:** TOML overrides for the built-in lists

pub mod catalog;
pub mod error;
pub mod isa;
pub mod parse;

pub use catalog::{Catalog, ResolvedArchitectures};
pub use error::{Result, TargetError};
pub use isa::{CpuFamily, InstructionSet};
pub use parse::{load_catalog_toml, parse_catalog_toml, CatalogOverrides};
