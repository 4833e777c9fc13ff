//! simdgen CLI — generate per-architecture SIMD kernel sources from metric
//! definition files.

mod commands;
mod manifest;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use commands::targets::FamilyArg;
use commands::OutputFormat;
use manifest::Project;

#[derive(Parser)]
#[command(
    name = "simdgen",
    version,
    about = "Generate per-architecture SIMD kernel sources"
)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
    /// Only log errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate kernel headers and per-architecture sources
    Generate {
        /// Target instruction set (e.g., avx2, neon64); every weaker one in
        /// its family is generated too
        #[arg(long)]
        target: Option<String>,
        /// Directory holding .def files
        #[arg(long)]
        definitions: Option<PathBuf>,
        /// Directory receiving generated files
        #[arg(long)]
        output: Option<PathBuf>,
        /// Compute and report the artifacts without writing them
        #[arg(long)]
        dry_run: bool,
        /// Report format
        #[arg(long, value_enum, default_value_t)]
        format: OutputFormat,
    },
    /// List the instruction-set catalog
    Targets {
        /// Only list one CPU family
        #[arg(long, value_enum)]
        family: Option<FamilyArg>,
    },
    /// Show the instruction sets a target expands to
    Resolve {
        /// Target instruction set
        target: String,
    },
    /// Print the parsed metric definitions
    Show {
        /// Directory holding .def files
        #[arg(long)]
        definitions: Option<PathBuf>,
        /// Output format
        #[arg(long, value_enum, default_value_t)]
        format: OutputFormat,
    },
    /// Remove the generated output directory
    Clean {
        /// Directory receiving generated files
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

fn main() {
    let cli = Cli::parse();

    let result = init_logging(cli.verbose, cli.quiet).and_then(|()| run(cli));
    if let Err(e) = result {
        eprintln!("error: {e:#}");
        process::exit(1);
    }
}

/// Install a stderr fmt subscriber whose level comes from the flags only.
fn init_logging(verbose: u8, quiet: bool) -> anyhow::Result<()> {
    let level = if quiet {
        Level::ERROR
    } else {
        match verbose {
            0 => Level::WARN,
            1 => Level::INFO,
            2 => Level::DEBUG,
            _ => Level::TRACE,
        }
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let cwd = std::env::current_dir()?;
    let project = Project::discover(&cwd)?;

    match cli.command {
        Commands::Generate {
            target,
            definitions,
            output,
            dry_run,
            format,
        } => commands::generate::run(
            &project,
            target.as_deref(),
            definitions.as_deref(),
            output.as_deref(),
            dry_run,
            format,
        ),

        Commands::Targets { family } => commands::targets::list(&project.catalog()?, family),

        Commands::Resolve { target } => commands::targets::resolve(&project.catalog()?, &target),

        Commands::Show {
            definitions,
            format,
        } => commands::show::run(&project.definitions_dir(definitions.as_deref()), format),

        Commands::Clean { output } => commands::clean::run(&project.output_dir(output.as_deref())),
    }
}
