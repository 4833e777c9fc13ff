//! CLI command implementations.

pub mod clean;
pub mod generate;
pub mod show;
pub mod targets;

/// Output format shared by commands that can emit JSON.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Human,
    Json,
}
