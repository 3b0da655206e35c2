//! EmojiDB CLI
//!
//! Command-line tools for EmojiDB backing files.
//!
//! # Commands
//!
//! - `inspect` - Display the store name, entity schemas and record counts
//! - `verify` - Check that a file loads and is in canonical form
//! - `dump` - Print decoded records

mod commands;
mod error;

use clap::{Parser, Subcommand};
use commands::OutputFormat;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// EmojiDB command-line store tools.
#[derive(Parser)]
#[command(name = "emojidb")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(global = true, short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Display store metadata
    Inspect {
        /// Path to the backing file
        file: PathBuf,

        /// Output format
        #[arg(short, long, value_enum, default_value_t)]
        format: OutputFormat,
    },

    /// Verify that a backing file loads and re-encodes identically
    Verify {
        /// Path to the backing file
        file: PathBuf,
    },

    /// Print decoded records
    Dump {
        /// Path to the backing file
        file: PathBuf,

        /// Only dump this entity
        #[arg(short, long)]
        entity: Option<String>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t)]
        format: OutputFormat,
    },

    /// Show version information
    Version,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Inspect { file, format } => commands::inspect::run(&file, format)?,
        Commands::Verify { file } => commands::verify::run(&file)?,
        Commands::Dump {
            file,
            entity,
            format,
        } => commands::dump::run(&file, entity.as_deref(), format)?,
        Commands::Version => {
            println!("EmojiDB CLI v{}", env!("CARGO_PKG_VERSION"));
            println!("EmojiDB Core v{}", emojidb_core::VERSION);
        }
    }

    Ok(())
}
