//! Folio CLI
//!
//! Validates the site's content collections and builds the style
//! configuration for the CSS pipeline.
//!
//! This is the binary entry point. The library functionality is in `lib.rs`.

use clap::Parser;
use color_eyre::eyre::Result;

/// Command-line interface for folio.
#[derive(Parser)]
#[command(
    name = "folio",
    version,
    about = "Content schemas and style configuration for a personal site"
)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "folio.toml")]
    config: std::path::PathBuf,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

/// Available CLI commands.
#[derive(clap::Subcommand)]
enum Commands {
    /// Validate configuration and every content document
    Check {
        /// Treat warnings as errors
        #[arg(long)]
        strict: bool,
    },
    /// Merge the base design tokens into the style configuration
    Style {
        /// Base token configuration (JSON, YAML or TOML)
        #[arg(short, long)]
        base: Option<std::path::PathBuf>,
        /// Output file (stdout when omitted and not configured)
        #[arg(short, long)]
        output: Option<std::path::PathBuf>,
    },
    /// Create a new document in a collection
    New {
        /// Collection name (blog, projects)
        collection: String,
        /// Path inside the collection (e.g., 2024/my-article)
        path: std::path::PathBuf,
    },
    /// List loaded entries
    List {
        /// Only list this collection
        collection: Option<String>,
    },
}

fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    folio::init_tracing(cli.verbose);

    match cli.command {
        Commands::Check { strict } => {
            folio::cmd::check::run(&cli.config, strict)?;
        }
        Commands::Style { base, output } => {
            folio::cmd::style::run(&cli.config, base.as_deref(), output.as_deref())?;
        }
        Commands::New { collection, path } => {
            folio::cmd::new::run(&cli.config, &collection, &path)?;
        }
        Commands::List { collection } => {
            folio::cmd::list::run(&cli.config, collection.as_deref())?;
        }
    }

    Ok(())
}
