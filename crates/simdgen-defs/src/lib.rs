//! Definition-file parsing for simdgen metric kernels.
//!
//! Each `.def` file describes one metric as three free-form C++ fragments
//! introduced by standalone label lines:
//!
//! ```text
//! SETUP
//! batch_type acc(0);
//! BODY
//! acc += xs::abs(a_vec - b_vec);
//! REMAINDER
//! return xs::reduce_add(acc);
//! ```
//!
//! ## Modules
//!
//! - [`section`] — section labels
//! - [`parse`] — the line-driven section state machine
//! - [`config`] — [`MetricSpec`] and the per-run [`MetricConfig`]
//! - [`discover`] — directory scanning and loading

pub mod config;
pub mod discover;
pub mod error;
pub mod parse;
pub mod section;

pub use config::{is_c_identifier, MetricConfig, MetricSpec};
pub use discover::{discover_definitions, load_definition, parse_all, DEFINITION_EXTENSION};
pub use error::{DefinitionError, Result};
pub use parse::parse_definition;
pub use section::Section;
