//! Catalog CLI - command-line front end for the course catalog
//!
//! Loads a comma-separated course file, validates prerequisites, and answers
//! list and lookup queries, either one-shot or through an interactive menu.

use std::path::PathBuf;

use catalog_core::LineNumbering;
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod commands;
mod config;
mod output;

use commands::*;
use config::CatalogConfig;
use output::{OutputConfig, OutputFormat};

/// Course catalog: load, validate and query course files.
#[derive(Parser)]
#[command(name = "catalog")]
#[command(author, version)]
#[command(about = "Load, validate and query course catalog files")]
#[command(
    long_about = "Loads a course file (one course per line: number, name, prerequisites...),\nrejects malformed lines and unknown prerequisites, and answers list and\nlookup queries in course-number order."
)]
#[command(propagate_version = true)]
#[command(next_help_heading = "Options")]
#[command(after_help = "Examples:
  catalog list courses.csv           Print every course in order
  catalog show courses.csv CS200     Show one course and its prerequisites
  catalog check courses.csv --strict Fail if any line was rejected
  catalog menu                       Interactive menu")]
pub struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Enable verbose output (debug logging)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Output format (overrides config default)
    #[arg(long, global = true, value_enum)]
    format: Option<OutputFormat>,

    /// How line numbers in diagnostics are counted (overrides config default)
    #[arg(long, global = true, value_enum)]
    line_numbers: Option<LineNumbersArg>,
}

/// Line counting mode as accepted on the command line
#[derive(Debug, Clone, Copy, ValueEnum)]
enum LineNumbersArg {
    /// Count every line of the file, blank ones included
    Physical,
    /// Count only non-blank lines
    NonBlank,
}

impl From<LineNumbersArg> for LineNumbering {
    fn from(arg: LineNumbersArg) -> Self {
        match arg {
            LineNumbersArg::Physical => LineNumbering::Physical,
            LineNumbersArg::NonBlank => LineNumbering::NonBlank,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Print every course in ascending course-number order
    #[command(visible_alias = "ls")]
    List {
        /// Course file to load
        file: PathBuf,
    },

    /// Show one course and its prerequisites
    Show {
        /// Course file to load
        file: PathBuf,

        /// Course number to look up (case-sensitive)
        course: String,
    },

    /// Validate a course file and report rejected lines
    Check {
        /// Course file to load
        file: PathBuf,

        /// Exit with an error if any line was rejected
        #[arg(long)]
        strict: bool,
    },

    /// Interactive menu: load, print, search
    Menu {
        /// Course file used by the load option instead of prompting
        #[arg(short, long)]
        file: Option<PathBuf>,
    },

    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: completions::Shell,

        /// Show installation instructions instead of generating completions
        #[arg(long)]
        instructions: bool,
    },
}

fn setup_logging(verbose: bool, quiet: bool) {
    let filter = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "warn"
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)))
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    // Load configuration from .catalogrc.toml
    let config = CatalogConfig::load(std::path::Path::new("."));

    // Resolve output format: CLI flag > config default > Table
    let format = cli.format.unwrap_or_else(|| {
        config
            .default_format()
            .and_then(|f| f.parse().ok())
            .unwrap_or(OutputFormat::Table)
    });

    // Apply color override from config if set
    if let Some(use_color) = config.use_color() {
        colored::control::set_override(use_color);
    }
    let output_config = config.apply_output_settings(
        OutputConfig::auto_detect_with_color_override(format, config.use_color()),
    );
    let options = config.ingest_options(cli.line_numbers.map(Into::into));

    // Handle case where no command is provided
    let command = match cli.command {
        Some(cmd) => cmd,
        None => {
            let _ = Cli::command().print_help();
            println!();
            return Ok(());
        }
    };

    match command {
        Commands::List { file } => list::run(&file, &options, output_config),
        Commands::Show { file, course } => show::run(&file, &course, &options, output_config),
        Commands::Check { file, strict } => check::run(&file, strict, &options, output_config),
        Commands::Menu { file } => menu::run(file, options, output_config),
        Commands::Completions {
            shell,
            instructions,
        } => {
            let mut cmd = Cli::command();
            completions::run(shell, instructions, &mut cmd, output_config)
        }
    }
}
