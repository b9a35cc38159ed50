//! Query understanding and knowledge retrieval for the ITSD copilot.
//!
//! A free-text operations question goes through intent classification and
//! entity extraction, then a knowledge base search and automation planning,
//! and comes out as formatted text plus suggested commands. Everything here
//! is synchronous and in-memory; loading snapshots from disk and serving
//! requests belong to the callers.

pub mod automation;
pub mod entities;
pub mod error;
pub mod intent;
pub mod knowledge;
pub mod pipeline;
pub mod render;

pub use automation::{AutomationPlanner, AutomationSequence, AutomationStep, PlanRule, SequenceId};
pub use entities::{EntityExtractor, EntitySet, EntityType};
pub use error::ItsdError;
pub use intent::{IntentCategory, IntentClassifier};
pub use knowledge::{KnowledgeBase, KnowledgeRetriever, RetrievalResult};
pub use pipeline::{QueryAnswer, QueryEngine};
pub use render::{ResponseFormatter, FALLBACK_MESSAGE};
