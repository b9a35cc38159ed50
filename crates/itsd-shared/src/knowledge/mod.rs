//! Knowledge base model, snapshot loading and retrieval.

pub mod base;
pub mod retrieval;
pub mod snapshot;

pub use base::{Article, FaqEntry, KbSection, KnowledgeBase};
pub use retrieval::{
    score_article, ArticleMatch, FaqMatch, KnowledgeRetriever, RetrievalResult, ARTICLE_LIMIT,
    MIN_ARTICLE_SCORE,
};
pub use snapshot::{load_snapshot_file, parse_snapshot, to_snapshot_json, SnapshotReport};
