//! Knowledge base snapshot loading and verification.
//!
//! A snapshot is a JSON object with the keys `intents`, `commands`,
//! `troubleshooting`, `articles` and `faq`. Missing sections load as empty and
//! are reported, never rejected.

use super::base::{KbSection, KnowledgeBase};
use crate::error::{ItsdError, Result};
use serde::Serialize;
use serde_json::Value;
use std::fs;
use std::path::Path;
use tracing::{info, warn};

/// What a snapshot contained
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SnapshotReport {
    pub present: Vec<KbSection>,
    pub missing: Vec<KbSection>,
    /// Entry count per present section, in section order
    pub counts: Vec<(KbSection, usize)>,
    /// Size of the raw document in bytes
    pub bytes: usize,
}

impl SnapshotReport {
    pub fn is_complete(&self) -> bool {
        self.missing.is_empty()
    }

    pub fn count(&self, section: KbSection) -> usize {
        self.counts
            .iter()
            .find(|(s, _)| *s == section)
            .map(|(_, n)| *n)
            .unwrap_or(0)
    }

    /// Human-readable verification lines
    pub fn summary_lines(&self) -> Vec<String> {
        let mut lines = vec![format!("File size: {} bytes", self.bytes)];
        for section in KbSection::ALL {
            if self.present.contains(&section) {
                lines.push(format!("Section '{}' found", section));
            } else {
                lines.push(format!("Missing section '{}'", section));
            }
        }
        lines.push(format!("Articles: {}", self.count(KbSection::Articles)));
        lines.push(format!("FAQ entries: {}", self.count(KbSection::Faq)));
        lines
    }
}

/// Parse a snapshot document
pub fn parse_snapshot(json: &str) -> Result<(KnowledgeBase, SnapshotReport)> {
    if json.trim().is_empty() {
        return Err(ItsdError::Snapshot("snapshot is empty".to_string()));
    }

    let doc: Value = serde_json::from_str(json)?;
    let Some(object) = doc.as_object() else {
        return Err(ItsdError::Snapshot(
            "snapshot must be a JSON object".to_string(),
        ));
    };

    let mut report = SnapshotReport {
        bytes: json.len(),
        ..Default::default()
    };
    for section in KbSection::ALL {
        if object.contains_key(section.as_str()) {
            report.present.push(section);
        } else {
            warn!(section = %section, "knowledge base section missing, using empty");
            report.missing.push(section);
        }
    }

    let kb: KnowledgeBase = serde_json::from_value(doc)
        .map_err(|e| ItsdError::Snapshot(format!("malformed section: {}", e)))?;

    report.counts = report
        .present
        .iter()
        .map(|s| (*s, kb.section_len(*s)))
        .collect();

    info!(
        articles = kb.articles.len(),
        faq = kb.faq.len(),
        commands = kb.commands.len(),
        "knowledge base loaded"
    );

    Ok((kb, report))
}

/// Read and parse a snapshot file
pub fn load_snapshot_file(path: &Path) -> Result<(KnowledgeBase, SnapshotReport)> {
    let content = fs::read_to_string(path)?;
    parse_snapshot(&content)
}

/// Serialize a knowledge base back to snapshot form
pub fn to_snapshot_json(kb: &KnowledgeBase) -> Result<String> {
    Ok(serde_json::to_string_pretty(kb)?)
}
