//! Tests for knowledge base snapshot loading and round-tripping.

use itsd_shared::knowledge::{
    load_snapshot_file, parse_snapshot, to_snapshot_json, KbSection, KnowledgeBase,
};
use itsd_shared::ItsdError;
use std::fs;
use tempfile::TempDir;

const SNAPSHOT: &str = r#"{
  "intents": {
    "troubleshooting": {"description": "Diagnose failures", "examples": ["fix", "error"]}
  },
  "commands": {
    "ls": "List directory contents",
    "df": "Report file system disk space usage"
  },
  "troubleshooting": {
    "permission denied": "Check permissions with ls -l"
  },
  "articles": {
    "KB010": {"title": "Zebra article", "content": "z", "tags": ["z"], "source": "scraper"},
    "KB002": {"title": "Alpha article", "content": "a", "tags": []}
  },
  "faq": {
    "FAQ001": {"question": "How do I list files", "answer": "Use ls.", "variations": ["list files"]}
  },
  "generated_at": "2024-01-01"
}"#;

#[test]
fn test_complete_snapshot_report() {
    let (kb, report) = parse_snapshot(SNAPSHOT).unwrap();

    assert!(report.is_complete());
    assert_eq!(report.present, KbSection::ALL.to_vec());
    assert_eq!(report.count(KbSection::Articles), 2);
    assert_eq!(report.count(KbSection::Faq), 1);
    assert_eq!(kb.commands.len(), 2);

    let lines = report.summary_lines();
    assert!(lines.contains(&"Articles: 2".to_string()));
    assert!(lines.contains(&"FAQ entries: 1".to_string()));
}

#[test]
fn test_roundtrip_is_lossless() {
    let (kb, _) = parse_snapshot(SNAPSHOT).unwrap();
    let json = to_snapshot_json(&kb).unwrap();

    let original: serde_json::Value = serde_json::from_str(SNAPSHOT).unwrap();
    let reserialized: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(original, reserialized);

    let (again, _) = parse_snapshot(&json).unwrap();
    assert_eq!(kb, again);
}

#[test]
fn test_roundtrip_keeps_order() {
    let (kb, _) = parse_snapshot(SNAPSHOT).unwrap();
    let json = to_snapshot_json(&kb).unwrap();

    assert!(json.find("KB010").unwrap() < json.find("KB002").unwrap());
    assert!(json.find("\"ls\"").unwrap() < json.find("\"df\"").unwrap());
}

#[test]
fn test_faq_without_question_is_rejected() {
    let err = parse_snapshot(r#"{"faq": {"F1": {"answer": "a", "variations": ["zzz unique"]}}}"#)
        .unwrap_err();
    assert!(matches!(err, ItsdError::Snapshot(_)));
}

#[test]
fn test_article_extras_follow_known_fields() {
    let (kb, _) = parse_snapshot(
        r#"{"articles": {"KB1": {"source": "scraper", "title": "T", "content": "c", "tags": []}}}"#,
    )
    .unwrap();
    let json = to_snapshot_json(&kb).unwrap();

    assert_eq!(kb.articles["KB1"].extra["source"], "scraper");
    assert!(json.find("\"title\"").unwrap() < json.find("\"source\"").unwrap());
}

#[test]
fn test_missing_sections_are_empty() {
    let (kb, report) = parse_snapshot(r#"{"commands": {"ls": "list"}}"#).unwrap();

    assert_eq!(report.missing.len(), 4);
    assert!(kb.faq.is_empty());
    assert!(kb.articles.is_empty());
    assert!(report
        .summary_lines()
        .contains(&"Missing section 'faq'".to_string()));
}

#[test]
fn test_load_from_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("unix_kb.json");
    fs::write(&path, SNAPSHOT).unwrap();

    let (kb, report) = load_snapshot_file(&path).unwrap();
    assert_eq!(report.bytes, SNAPSHOT.len());
    assert_eq!(kb.articles["KB010"].title, "Zebra article");
}

#[test]
fn test_missing_file_is_io_error() {
    let dir = TempDir::new().unwrap();
    let err = load_snapshot_file(&dir.path().join("nope.json")).unwrap_err();
    assert!(matches!(err, ItsdError::Io(_)));
}

#[test]
fn test_empty_kb_serializes_all_sections() {
    let json = to_snapshot_json(&KnowledgeBase::new()).unwrap();
    for section in KbSection::ALL {
        assert!(json.contains(&format!("\"{}\"", section)));
    }
}
