//! `bulletin-cal` CLI - Convert parish bulletins into calendar files

mod cmd;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "bulletin-cal")]
#[command(about = "Turn parish service bulletins into calendar events")]
#[command(version)]
struct Cli {
    /// More log output (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Only log warnings and errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract events from a bulletin and export them
    Convert {
        /// Bulletin file (.pdf, .json text-run dump, or plain text)
        file: PathBuf,

        /// Year the bulletin's dates fall in (default: current year)
        #[arg(short, long)]
        year: Option<i32>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "ics")]
        format: OutputFormat,

        /// Write to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Keep only these events (1-based, comma-separated: 1,3,5 or 2-4)
        #[arg(short, long)]
        select: Option<String>,

        /// Template file (default: ~/.config/bulletin-cal/template.toml)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Print the reconstructed lines of a bulletin
    Lines {
        /// Bulletin file
        file: PathBuf,

        /// Template file
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Print the effective template as TOML
    Template {
        /// Template file
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// iCalendar (RFC 5545)
    #[default]
    Ics,
    /// JSON array of events
    Json,
    /// Human-readable listing
    Text,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    match cli.command {
        Commands::Convert {
            file,
            year,
            format,
            output,
            select,
            config,
        } => {
            cmd::cmd_convert(
                file,
                year,
                format,
                output,
                select.as_deref(),
                config.as_deref(),
            )
            .await?;
        }
        Commands::Lines { file, config } => {
            cmd::cmd_lines(file, config.as_deref()).await?;
        }
        Commands::Template { config } => {
            cmd::cmd_template(config.as_deref())?;
        }
    }

    Ok(())
}

/// Log to stderr so stdout stays clean for exported calendars.
///
/// `RUST_LOG` wins over the flags when set.
fn init_logging(verbose: u8, quiet: bool) {
    let level = match (quiet, verbose) {
        (true, _) => "warn",
        (false, 0) => "info",
        (false, 1) => "debug",
        (false, _) => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();
}
