//! Knowledge base model.
//!
//! Five independent sections keyed by string. Maps keep document order, which
//! is also the order ties are broken in when ranking articles. Fields the
//! engine does not read are carried in `extra` so a snapshot re-serializes
//! without loss.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Named sections of a snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KbSection {
    Intents,
    Commands,
    Troubleshooting,
    Articles,
    Faq,
}

impl KbSection {
    pub const ALL: [KbSection; 5] = [
        KbSection::Intents,
        KbSection::Commands,
        KbSection::Troubleshooting,
        KbSection::Articles,
        KbSection::Faq,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            KbSection::Intents => "intents",
            KbSection::Commands => "commands",
            KbSection::Troubleshooting => "troubleshooting",
            KbSection::Articles => "articles",
            KbSection::Faq => "faq",
        }
    }
}

impl std::fmt::Display for KbSection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A knowledge article.
///
/// Unknown fields survive a round trip in `extra`, but are written after
/// `title`, `content` and `tags` whatever their original position.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Article {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(flatten)]
    pub extra: IndexMap<String, Value>,
}

impl Article {
    pub fn new(title: &str, content: &str, tags: &[&str]) -> Self {
        Self {
            title: title.to_string(),
            content: content.to_string(),
            tags: tags.iter().map(|s| s.to_string()).collect(),
            extra: IndexMap::new(),
        }
    }
}

/// A canonical question with its answer and alternate phrasings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FaqEntry {
    pub question: String,
    #[serde(default)]
    pub answer: String,
    #[serde(default)]
    pub variations: Vec<String>,
    #[serde(flatten)]
    pub extra: IndexMap<String, Value>,
}

impl FaqEntry {
    pub fn new(question: &str, answer: &str, variations: &[&str]) -> Self {
        Self {
            question: question.to_string(),
            answer: answer.to_string(),
            variations: variations.iter().map(|s| s.to_string()).collect(),
            extra: IndexMap::new(),
        }
    }
}

/// Immutable reference data searched by the retriever.
///
/// Built once by a loader and shared behind `Arc`; nothing in the engine
/// mutates it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KnowledgeBase {
    /// Intent name -> free-form record
    #[serde(default)]
    pub intents: IndexMap<String, Value>,
    /// Command name -> description
    #[serde(default)]
    pub commands: IndexMap<String, String>,
    /// Error code -> solution
    #[serde(default)]
    pub troubleshooting: IndexMap<String, String>,
    #[serde(default)]
    pub articles: IndexMap<String, Article>,
    #[serde(default)]
    pub faq: IndexMap<String, FaqEntry>,
    /// Top-level keys outside the five sections
    #[serde(flatten)]
    pub extra: IndexMap<String, Value>,
}

impl KnowledgeBase {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_intent(mut self, name: &str, record: Value) -> Self {
        self.intents.insert(name.to_string(), record);
        self
    }

    pub fn with_command(mut self, name: &str, description: &str) -> Self {
        self.commands.insert(name.to_string(), description.to_string());
        self
    }

    pub fn with_troubleshooting(mut self, code: &str, solution: &str) -> Self {
        self.troubleshooting.insert(code.to_string(), solution.to_string());
        self
    }

    pub fn with_article(mut self, id: &str, article: Article) -> Self {
        self.articles.insert(id.to_string(), article);
        self
    }

    pub fn with_faq(mut self, id: &str, entry: FaqEntry) -> Self {
        self.faq.insert(id.to_string(), entry);
        self
    }

    /// Number of entries in a section
    pub fn section_len(&self, section: KbSection) -> usize {
        match section {
            KbSection::Intents => self.intents.len(),
            KbSection::Commands => self.commands.len(),
            KbSection::Troubleshooting => self.troubleshooting.len(),
            KbSection::Articles => self.articles.len(),
            KbSection::Faq => self.faq.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        KbSection::ALL.iter().all(|s| self.section_len(*s) == 0)
    }
}
