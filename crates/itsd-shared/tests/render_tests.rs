//! Tests for response formatting.

use indexmap::IndexMap;
use itsd_shared::automation::{AutomationSequence, SequenceId};
use itsd_shared::knowledge::retrieval::{ArticleMatch, FaqMatch};
use itsd_shared::knowledge::RetrievalResult;
use itsd_shared::render::{ResponseFormatter, FALLBACK_MESSAGE};

fn full_result() -> RetrievalResult {
    let mut commands = IndexMap::new();
    commands.insert("df".to_string(), "Report disk space".to_string());
    let mut troubleshooting = IndexMap::new();
    troubleshooting.insert("permission denied".to_string(), "Check ownership".to_string());

    RetrievalResult {
        intent_matches: None,
        command_matches: commands,
        troubleshooting_matches: troubleshooting,
        faq_matches: vec![FaqMatch {
            id: "FAQ001".to_string(),
            question: "How do I check disk space".to_string(),
            answer: "Run df -h.".to_string(),
        }],
        article_matches: vec![ArticleMatch {
            title: "Disk usage basics".to_string(),
            content: "Use df and du.".to_string(),
            score: 5,
        }],
    }
}

#[test]
fn test_nothing_is_fallback() {
    assert_eq!(ResponseFormatter::new().format(None, None), FALLBACK_MESSAGE);
}

#[test]
fn test_automation_only() {
    let seq = AutomationSequence::from(SequenceId::DiskUsageCheck);
    let text = ResponseFormatter::new().format(None, Some(&seq));

    assert!(text.contains("Recommended Steps"));
    assert!(text.contains("1. Check disk space usage"));
    assert!(text.contains("Command: df -h"));
    assert!(text.contains("2. Check log directory sizes"));
    assert!(!text.contains("Frequently Asked Questions"));
    assert!(!text.contains("Related Articles"));
    assert!(!text.contains("Command Help"));
    assert!(!text.contains("**Troubleshooting:**"));
}

#[test]
fn test_section_order() {
    let seq = AutomationSequence::from(SequenceId::DiskUsageCheck);
    let text = ResponseFormatter::new().format(Some(&full_result()), Some(&seq));

    let positions: Vec<usize> = [
        "**Frequently Asked Questions:**",
        "**Related Articles:**",
        "**Command Help:**",
        "**Troubleshooting:**",
        "**Recommended Steps:**",
    ]
    .iter()
    .map(|heading| text.find(heading).unwrap())
    .collect();

    assert!(positions.windows(2).all(|w| w[0] < w[1]));
    assert!(text.contains("**Q: How do I check disk space**"));
    assert!(text.contains("A: Run df -h."));
    assert!(text.contains("**df**: Report disk space"));
    assert!(text.contains("**permission denied**: Check ownership"));
}

#[test]
fn test_article_content_truncated() {
    let mut result = RetrievalResult::default();
    result.article_matches.push(ArticleMatch {
        title: "Long".to_string(),
        content: "x".repeat(250),
        score: 3,
    });
    let text = ResponseFormatter::new().format(Some(&result), None);

    assert!(text.contains(&format!("{}...", "x".repeat(200))));
    assert!(!text.contains(&"x".repeat(201)));
}

#[test]
fn test_short_article_not_marked() {
    let text = ResponseFormatter::new().format(Some(&full_result()), None);
    assert!(text.contains("Use df and du.\n") || text.ends_with("Use df and du."));
    assert!(!text.contains("Use df and du...."));
}

#[test]
fn test_intent_only_result_is_fallback() {
    let result = RetrievalResult {
        intent_matches: Some(serde_json::json!("describes troubleshooting")),
        ..Default::default()
    };
    assert_eq!(ResponseFormatter::new().format(Some(&result), None), FALLBACK_MESSAGE);
}

#[test]
fn test_format_is_idempotent() {
    let f = ResponseFormatter::new();
    let seq = AutomationSequence::from(SequenceId::ApacheRestart);
    let result = full_result();
    assert_eq!(
        f.format(Some(&result), Some(&seq)),
        f.format(Some(&result), Some(&seq))
    );
}
