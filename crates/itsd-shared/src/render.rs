//! Response assembly.
//!
//! Plain multi-line text. Sections come in a fixed order and are skipped when
//! empty; the only markup is `**` around headings.

use crate::automation::AutomationSequence;
use crate::knowledge::RetrievalResult;

/// Returned when there is nothing to say
pub const FALLBACK_MESSAGE: &str = "I couldn't find specific information about your query. \
Could you please provide more details or rephrase your question?";

/// Article bodies are cut to this many characters
pub const ARTICLE_PREVIEW_CHARS: usize = 200;

/// Builds the answer text
#[derive(Debug, Clone, Copy, Default)]
pub struct ResponseFormatter;

impl ResponseFormatter {
    pub fn new() -> Self {
        Self
    }

    pub fn format(
        &self,
        result: Option<&RetrievalResult>,
        automation: Option<&AutomationSequence>,
    ) -> String {
        let mut sections: Vec<String> = Vec::new();

        if let Some(result) = result {
            if !result.faq_matches.is_empty() {
                let mut s = String::from("**Frequently Asked Questions:**\n");
                for faq in &result.faq_matches {
                    s.push_str(&format!("\n**Q: {}**\nA: {}\n", faq.question, faq.answer));
                }
                sections.push(s);
            }

            if !result.article_matches.is_empty() {
                let mut s = String::from("**Related Articles:**\n");
                for article in &result.article_matches {
                    s.push_str(&format!(
                        "\n**{}**\n{}\n",
                        article.title,
                        preview(&article.content, ARTICLE_PREVIEW_CHARS)
                    ));
                }
                sections.push(s);
            }

            if !result.command_matches.is_empty() {
                let mut s = String::from("**Command Help:**\n");
                for (cmd, desc) in &result.command_matches {
                    s.push_str(&format!("- **{}**: {}\n", cmd, desc));
                }
                sections.push(s);
            }

            if !result.troubleshooting_matches.is_empty() {
                let mut s = String::from("**Troubleshooting:**\n");
                for (code, solution) in &result.troubleshooting_matches {
                    s.push_str(&format!("- **{}**: {}\n", code, solution));
                }
                sections.push(s);
            }
        }

        if let Some(seq) = automation.filter(|s| !s.steps.is_empty()) {
            let mut s = String::from("**Recommended Steps:**\n");
            for (i, step) in seq.steps.iter().enumerate() {
                s.push_str(&format!(
                    "{}. {}\n   Command: {}\n",
                    i + 1,
                    step.description,
                    step.command
                ));
            }
            sections.push(s);
        }

        if sections.is_empty() {
            return FALLBACK_MESSAGE.to_string();
        }

        sections
            .iter()
            .map(|s| s.trim_end())
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

/// First `max_chars` characters, with `...` appended when cut
pub fn preview(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => format!("{}...", &text[..byte_idx]),
        None => text.to_string(),
    }
}
