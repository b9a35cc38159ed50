//! Multi-section knowledge retrieval.
//!
//! Deterministic and literal: direct key lookups for intents, commands and
//! error codes, substring matching for FAQ, and an integer score for articles.

use super::base::{Article, KnowledgeBase};
use crate::entities::{EntitySet, EntityType};
use crate::intent::IntentCategory;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use tracing::debug;

/// Maximum articles returned per query
pub const ARTICLE_LIMIT: usize = 3;

/// Articles scoring below this are dropped
pub const MIN_ARTICLE_SCORE: u32 = 2;

const TITLE_WEIGHT: u32 = 2;
const TAG_IN_QUERY_WEIGHT: u32 = 3;
const TAG_IN_ENTITY_WEIGHT: u32 = 2;
const CONTENT_WEIGHT: u32 = 1;

/// Content matching ignores tokens this short or shorter
const CONTENT_TOKEN_MIN_LEN: usize = 3;

/// FAQ entry matched by the query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FaqMatch {
    pub id: String,
    pub question: String,
    pub answer: String,
}

/// Article hit, reduced for display
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArticleMatch {
    pub title: String,
    pub content: String,
    pub score: u32,
}

/// Everything the knowledge base had to say about a query.
///
/// Only produced when at least one category is populated.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RetrievalResult {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intent_matches: Option<Value>,
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub command_matches: IndexMap<String, String>,
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub troubleshooting_matches: IndexMap<String, String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub faq_matches: Vec<FaqMatch>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub article_matches: Vec<ArticleMatch>,
}

impl RetrievalResult {
    pub fn is_empty(&self) -> bool {
        self.kb_matches().is_empty()
    }

    /// Names of the populated categories
    pub fn kb_matches(&self) -> Vec<&'static str> {
        let mut names = Vec::new();
        if self.intent_matches.is_some() {
            names.push("intent_matches");
        }
        if !self.command_matches.is_empty() {
            names.push("command_matches");
        }
        if !self.troubleshooting_matches.is_empty() {
            names.push("troubleshooting_matches");
        }
        if !self.faq_matches.is_empty() {
            names.push("faq_matches");
        }
        if !self.article_matches.is_empty() {
            names.push("article_matches");
        }
        names
    }
}

/// Searches an immutable knowledge base
#[derive(Debug, Clone)]
pub struct KnowledgeRetriever {
    kb: Arc<KnowledgeBase>,
}

impl KnowledgeRetriever {
    pub fn new(kb: Arc<KnowledgeBase>) -> Self {
        Self { kb }
    }

    pub fn knowledge_base(&self) -> &KnowledgeBase {
        &self.kb
    }

    /// Search every section. `None` when nothing matched anywhere.
    pub fn search(
        &self,
        intent: IntentCategory,
        entities: &EntitySet,
        raw_text: &str,
    ) -> Option<RetrievalResult> {
        let query_lower = raw_text.to_lowercase();

        let result = RetrievalResult {
            intent_matches: self.kb.intents.get(intent.as_str()).cloned(),
            command_matches: self.lookup_commands(entities),
            troubleshooting_matches: self.lookup_troubleshooting(intent, entities),
            faq_matches: self.search_faq(&query_lower),
            article_matches: self.search_articles(&query_lower, entities),
        };

        debug!(
            intent = %intent,
            commands = result.command_matches.len(),
            troubleshooting = result.troubleshooting_matches.len(),
            faq = result.faq_matches.len(),
            articles = result.article_matches.len(),
            "knowledge search"
        );

        if result.is_empty() {
            None
        } else {
            Some(result)
        }
    }

    fn lookup_commands(&self, entities: &EntitySet) -> IndexMap<String, String> {
        entities
            .get(EntityType::CommandName)
            .unwrap_or_default()
            .iter()
            .filter_map(|cmd| {
                self.kb
                    .commands
                    .get(cmd)
                    .map(|desc| (cmd.clone(), desc.clone()))
            })
            .collect()
    }

    fn lookup_troubleshooting(
        &self,
        intent: IntentCategory,
        entities: &EntitySet,
    ) -> IndexMap<String, String> {
        if intent != IntentCategory::Troubleshooting {
            return IndexMap::new();
        }
        entities
            .get(EntityType::ErrorCode)
            .unwrap_or_default()
            .iter()
            .filter_map(|code| {
                self.kb
                    .troubleshooting
                    .get(code)
                    .map(|solution| (code.clone(), solution.clone()))
            })
            .collect()
    }

    /// An entry matches when its question, or one of its variations, occurs
    /// inside the query. The stored text must be contained in the user's
    /// text, not the other way round. Blank phrasings never match.
    fn search_faq(&self, query_lower: &str) -> Vec<FaqMatch> {
        let occurs = |phrase: &str| {
            let phrase = phrase.trim().to_lowercase();
            !phrase.is_empty() && query_lower.contains(&phrase)
        };
        self.kb
            .faq
            .iter()
            .filter(|(_, entry)| {
                occurs(&entry.question) || entry.variations.iter().any(|v| occurs(v))
            })
            .map(|(id, entry)| FaqMatch {
                id: id.clone(),
                question: entry.question.clone(),
                answer: entry.answer.clone(),
            })
            .collect()
    }

    fn search_articles(&self, query_lower: &str, entities: &EntitySet) -> Vec<ArticleMatch> {
        let tokens: Vec<&str> = query_lower.split_whitespace().collect();

        let mut scored: Vec<(&Article, u32)> = self
            .kb
            .articles
            .values()
            .map(|article| (article, score_article(article, query_lower, &tokens, entities)))
            .filter(|(_, score)| *score >= MIN_ARTICLE_SCORE)
            .collect();

        // stable: equal scores stay in section order
        scored.sort_by(|a, b| b.1.cmp(&a.1));

        scored
            .into_iter()
            .take(ARTICLE_LIMIT)
            .map(|(article, score)| ArticleMatch {
                title: article.title.clone(),
                content: article.content.clone(),
                score,
            })
            .collect()
    }
}

/// Relevance of one article to a lowercased query and its whitespace tokens.
pub fn score_article(
    article: &Article,
    query_lower: &str,
    tokens: &[&str],
    entities: &EntitySet,
) -> u32 {
    let mut score = 0;

    let title = article.title.to_lowercase();
    if tokens.iter().any(|t| title.contains(t)) {
        score += TITLE_WEIGHT;
    }

    for tag in &article.tags {
        let tag = tag.to_lowercase();
        if query_lower.contains(&tag) {
            score += TAG_IN_QUERY_WEIGHT;
            if entities
                .all_values()
                .any(|value| value.to_lowercase().contains(&tag))
            {
                score += TAG_IN_ENTITY_WEIGHT;
            }
        }
    }

    let content = article.content.to_lowercase();
    if tokens
        .iter()
        .any(|t| t.chars().count() > CONTENT_TOKEN_MIN_LEN && content.contains(t))
    {
        score += CONTENT_WEIGHT;
    }

    score
}
