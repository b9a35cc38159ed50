//! Command implementations for itsdctl

use crate::config::{ItsdConfig, OutputFormat};
use crate::output::{print_json, Printer};
use anyhow::{bail, Context, Result};
use itsd_shared::automation::safe::execute_safe_command;
use itsd_shared::knowledge::{load_snapshot_file, KbSection};
use itsd_shared::{KnowledgeBase, QueryAnswer, QueryEngine};
use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};

pub const STATUS_QUERY: &str = "Check system status";
pub const DISK_QUERY: &str = "How to check disk space";

/// Settings shared by every command
pub struct CliContext {
    pub config: ItsdConfig,
    pub format: OutputFormat,
    pub printer: Printer,
}

/// Load the knowledge base; a missing file is an empty KB
pub fn load_knowledge_base(path: &Path) -> Result<KnowledgeBase> {
    if !path.exists() {
        warn!(path = %path.display(), "knowledge base not found, starting empty");
        return Ok(KnowledgeBase::new());
    }
    let (kb, report) = load_snapshot_file(path)
        .with_context(|| format!("Failed to load knowledge base {}", path.display()))?;
    info!(
        path = %path.display(),
        articles = report.count(KbSection::Articles),
        "knowledge base ready"
    );
    Ok(kb)
}

fn build_engine(ctx: &CliContext, kb_override: Option<&Path>) -> Result<QueryEngine> {
    let path = ctx.config.knowledge_base_path(kb_override);
    let kb = load_knowledge_base(&path)?;
    QueryEngine::new(Arc::new(kb)).context("Failed to build query engine")
}

fn emit(ctx: &CliContext, answer: &QueryAnswer, full: bool) -> Result<()> {
    match ctx.format {
        OutputFormat::Json => print_json(answer),
        OutputFormat::Text if full => {
            ctx.printer.display_answer(answer);
            Ok(())
        }
        OutputFormat::Text => {
            ctx.printer.display_response(answer);
            Ok(())
        }
    }
}

/// Answer a free-text question
pub fn ask(ctx: &CliContext, kb: Option<&Path>, words: &[String]) -> Result<()> {
    let query = words.join(" ");
    if query.trim().is_empty() {
        bail!("Query must not be empty");
    }
    let engine = build_engine(ctx, kb)?;
    emit(ctx, &engine.answer(&query), true)
}

/// Canned question shortcut (status, disk)
pub fn canned(ctx: &CliContext, kb: Option<&Path>, query: &str) -> Result<()> {
    let engine = build_engine(ctx, kb)?;
    emit(ctx, &engine.answer(query), false)
}

/// Show simulated output for an allow-listed command
pub fn run(ctx: &CliContext, key: Option<&str>, list: bool) -> Result<()> {
    let key = match key {
        Some(key) if !list => key,
        _ => {
            ctx.printer.display_safe_list();
            return Ok(());
        }
    };
    let out = execute_safe_command(key)
        .with_context(|| format!("Cannot run '{}' (see `itsdctl run --list`)", key))?;
    match ctx.format {
        OutputFormat::Json => print_json(&out),
        OutputFormat::Text => {
            ctx.printer.display_safe_output(&out);
            Ok(())
        }
    }
}

/// Parse a snapshot file and report what it contains
pub fn verify_kb(ctx: &CliContext, path: &Path) -> Result<()> {
    let (_, report) = load_snapshot_file(path)
        .with_context(|| format!("Invalid knowledge base {}", path.display()))?;
    match ctx.format {
        OutputFormat::Json => print_json(&report),
        OutputFormat::Text => {
            ctx.printer.display_report(&path.display().to_string(), &report);
            Ok(())
        }
    }
}
