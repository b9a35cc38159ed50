//! Query pipeline.
//!
//! `QueryEngine` owns one instance of each stage plus a shared handle to the
//! knowledge base. It holds no per-request state, so one engine can serve
//! any number of threads.

use crate::automation::{AutomationPlanner, AutomationStep};
use crate::entities::{EntityExtractor, EntitySet};
use crate::error::Result;
use crate::intent::{IntentCategory, IntentClassifier};
use crate::knowledge::{KnowledgeBase, KnowledgeRetriever};
use crate::render::ResponseFormatter;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

/// Structured answer handed to front-ends
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryAnswer {
    pub intent: IntentCategory,
    pub entities: EntitySet,
    pub response: String,
    pub automation_suggestions: Option<Vec<AutomationStep>>,
    pub kb_matches: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct QueryEngine {
    kb: Arc<KnowledgeBase>,
    classifier: IntentClassifier,
    extractor: EntityExtractor,
    retriever: KnowledgeRetriever,
    planner: AutomationPlanner,
    formatter: ResponseFormatter,
}

impl QueryEngine {
    /// Build every stage over the given knowledge base.
    ///
    /// Fails only if a built-in pattern does not compile.
    pub fn new(kb: Arc<KnowledgeBase>) -> Result<Self> {
        Ok(Self {
            retriever: KnowledgeRetriever::new(Arc::clone(&kb)),
            kb,
            classifier: IntentClassifier::new()?,
            extractor: EntityExtractor::new()?,
            planner: AutomationPlanner::new(),
            formatter: ResponseFormatter::new(),
        })
    }

    pub fn knowledge_base(&self) -> &Arc<KnowledgeBase> {
        &self.kb
    }

    pub fn classifier(&self) -> &IntentClassifier {
        &self.classifier
    }

    pub fn extractor(&self) -> &EntityExtractor {
        &self.extractor
    }

    pub fn retriever(&self) -> &KnowledgeRetriever {
        &self.retriever
    }

    pub fn planner(&self) -> &AutomationPlanner {
        &self.planner
    }

    /// Intent and entities for a query
    pub fn analyze(&self, text: &str) -> (IntentCategory, EntitySet) {
        let intent = self.classifier.classify(text);
        let entities = self.extractor.extract(text);
        debug!(query = text, intent = %intent, entities = ?entities, "query analysis");
        (intent, entities)
    }

    pub fn answer(&self, text: &str) -> QueryAnswer {
        let (intent, entities) = self.analyze(text);

        let retrieval = self.retriever.search(intent, &entities, text);
        let automation = self.planner.plan(intent, &entities);
        let response = self.formatter.format(retrieval.as_ref(), automation.as_ref());

        let kb_matches = retrieval
            .as_ref()
            .map(|r| r.kb_matches().into_iter().map(String::from).collect())
            .unwrap_or_default();

        QueryAnswer {
            intent,
            entities,
            response,
            automation_suggestions: automation.map(|seq| seq.steps),
            kb_matches,
        }
    }
}
