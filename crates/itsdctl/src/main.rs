//! ITSD Control - CLI for the ITSD admin copilot
//!
//! Answers Unix administration questions against a local knowledge base.

mod commands;
mod config;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{CliContext, DISK_QUERY, STATUS_QUERY};
use config::{ItsdConfig, OutputFormat};
use output::Printer;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "itsdctl")]
#[command(about = "ITSD Admin Copilot - your assistant for Unix administration", long_about = None)]
#[command(version)]
struct Cli {
    /// Config file (default: <config dir>/itsd/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Knowledge base snapshot to use
    #[arg(long, global = true)]
    kb: Option<PathBuf>,

    /// Print JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    /// Color mode: auto, always or never
    #[arg(long, global = true, value_name = "MODE")]
    color: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Ask a question to the copilot
    Ask {
        /// The question, e.g. "How do I restart apache?"
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,
    },

    /// Check system status
    Status,

    /// Check disk space
    Disk,

    /// Show simulated output of a safe diagnostic command
    Run {
        /// Command key, e.g. disk_space
        key: Option<String>,

        /// List available keys
        #[arg(long)]
        list: bool,
    },

    /// Verify a knowledge base snapshot
    VerifyKb {
        /// Snapshot path (default: configured knowledge base)
        path: Option<PathBuf>,
    },
}

fn init_logging(config: &ItsdConfig) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: Cli, ctx: &CliContext) -> Result<()> {
    let kb = cli.kb.as_deref();
    match cli.command {
        Commands::Ask { query } => commands::ask(ctx, kb, &query),
        Commands::Status => commands::canned(ctx, kb, STATUS_QUERY),
        Commands::Disk => commands::canned(ctx, kb, DISK_QUERY),
        Commands::Run { key, list } => commands::run(ctx, key.as_deref(), list),
        Commands::VerifyKb { path } => {
            let path = path.unwrap_or_else(|| ctx.config.knowledge_base_path(kb));
            commands::verify_kb(ctx, &path)
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = ItsdConfig::load(cli.config.as_deref()).and_then(|mut config| {
        if let Some(mode) = &cli.color {
            config.set_color_mode(mode)?;
        }
        Ok(config)
    });
    let config = match config {
        Ok(config) => config,
        Err(e) => {
            Printer::new(false).display_error(&format!("{:#}", e));
            return ExitCode::FAILURE;
        }
    };
    init_logging(&config);

    let color = config.output.color.enabled();
    let format = if cli.json {
        OutputFormat::Json
    } else {
        config.output.format
    };
    let ctx = CliContext {
        config,
        format,
        printer: Printer::new(color),
    };

    match run(cli, &ctx) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            ctx.printer.display_error(&format!("{:#}", e));
            ExitCode::FAILURE
        }
    }
}
