//! Ad copy compliance checker
//!
//! # Usage
//!
//! ```bash
//! # Deterministic scan of a campaign document
//! copy-check scan --state MT --file campaign.json
//!
//! # Scan one string, quality rules included
//! copy-check scan --state OH --text "No military renters!!" --quality
//!
//! # Enforce length limits and auto-fix deterministic findings
//! copy-check fix --state CA --file campaign.json
//!
//! # Full oracle-backed verification (needs ORACLE_API_KEY)
//! copy-check rewrite --state NY --file campaign.json --config oracle.toml
//!
//! # Labeled corpus and cross-jurisdiction isolation
//! copy-check qa --format console
//! copy-check isolate --text "No military renters" --from OH --to MT
//! ```
//!
//! Results go to stdout as JSON (or console text for `qa`/`isolate`); logs
//! go to stderr, filtered with `RUST_LOG`.

mod commands;
mod input;

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "copy-check")]
#[command(version, about = "Fair housing and quality checks for real estate ad copy")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ReportFormat {
    Console,
    Json,
    JsonPretty,
}

impl From<ReportFormat> for qa_harness::OutputFormat {
    fn from(format: ReportFormat) -> Self {
        match format {
            ReportFormat::Console => qa_harness::OutputFormat::Console,
            ReportFormat::Json => qa_harness::OutputFormat::Json,
            ReportFormat::JsonPretty => qa_harness::OutputFormat::JsonPretty,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Deterministic scan of a campaign (JSON) or a single string
    Scan {
        /// Jurisdiction code or name
        #[arg(short, long)]
        state: String,

        /// Campaign JSON file (reads stdin if neither --file nor --text is given)
        #[arg(short, long, conflicts_with = "text")]
        file: Option<PathBuf>,

        /// Scan this string instead of a campaign
        #[arg(short, long)]
        text: Option<String>,

        /// Include copy quality rules
        #[arg(long)]
        quality: bool,
    },

    /// Enforce length limits and auto-fix every deterministic finding
    Fix {
        #[arg(short, long)]
        state: String,

        /// Campaign JSON file (reads stdin if not provided)
        #[arg(short, long)]
        file: Option<PathBuf>,
    },

    /// Oracle-backed compliance rewrite plus quality check and score
    Rewrite {
        #[arg(short, long)]
        state: String,

        /// Campaign JSON file (reads stdin if not provided)
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// Oracle TOML configuration (defaults apply if omitted)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Check one string with the pattern engine and the oracle
    Check {
        #[arg(short, long)]
        state: String,

        #[arg(short, long)]
        text: String,

        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Generate a campaign from a listing description
    Generate {
        /// Listing description file (reads stdin if not provided)
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// Platform keys to generate, e.g. twitter,googleAds
        #[arg(short, long, value_delimiter = ',', required = true)]
        platforms: Vec<String>,

        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Run a labeled corpus through the pattern engine
    Qa {
        /// Corpus TOML (the bundled corpus if omitted)
        #[arg(long)]
        corpus: Option<PathBuf>,

        #[arg(long, default_value = "console", value_enum)]
        format: ReportFormat,

        /// Also write the report to this file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Check that state rules do not fire outside their state
    Isolate {
        /// Corpus TOML (the bundled corpus if omitted)
        #[arg(long, conflicts_with = "text")]
        corpus: Option<PathBuf>,

        /// Check one string instead of a corpus
        #[arg(long, requires_all = ["from", "to"])]
        text: Option<String>,

        /// Jurisdiction the text was written for
        #[arg(long)]
        from: Option<String>,

        /// Jurisdiction to scan it as
        #[arg(long)]
        to: Option<String>,

        #[arg(long, default_value = "console", value_enum)]
        format: ReportFormat,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    // stdout carries results; logs go to stderr
    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env().add_directive(tracing::Level::WARN.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Scan {
            state,
            file,
            text,
            quality,
        } => commands::scan(&state, file, text, quality),
        Commands::Fix { state, file } => commands::fix(&state, file),
        Commands::Rewrite {
            state,
            file,
            config,
        } => commands::rewrite(&state, file, config).await,
        Commands::Check {
            state,
            text,
            config,
        } => commands::check(&state, &text, config).await,
        Commands::Generate {
            file,
            platforms,
            config,
        } => commands::generate(file, &platforms, config).await,
        Commands::Qa {
            corpus,
            format,
            output,
        } => commands::qa(corpus, format.into(), output),
        Commands::Isolate {
            corpus,
            text,
            from,
            to,
            format,
        } => commands::isolate(corpus, text, from, to, format.into()),
    };

    match result {
        Ok(outcome) => {
            println!("{}", outcome.output);
            if outcome.passed {
                ExitCode::SUCCESS
            } else {
                ExitCode::from(1)
            }
        }
        Err(e) => {
            eprintln!("error: {:#}", e);
            ExitCode::from(2)
        }
    }
}
