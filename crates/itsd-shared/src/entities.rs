//! Entity extraction.
//!
//! Each entity type owns one case-insensitive pattern that runs over the raw
//! query. Types are evaluated independently, so one substring can show up
//! under several types (`username` in particular is broad).

use crate::error::Result;
use indexmap::IndexMap;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Closed set of entity types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityType {
    ServerName,
    Username,
    ErrorCode,
    SoftwareName,
    CommandName,
    FilePath,
}

impl EntityType {
    pub const ALL: [EntityType; 6] = [
        EntityType::ServerName,
        EntityType::Username,
        EntityType::ErrorCode,
        EntityType::SoftwareName,
        EntityType::CommandName,
        EntityType::FilePath,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EntityType::ServerName => "server_name",
            EntityType::Username => "username",
            EntityType::ErrorCode => "error_code",
            EntityType::SoftwareName => "software_name",
            EntityType::CommandName => "command_name",
            EntityType::FilePath => "file_path",
        }
    }

    /// The single pattern bound to this type
    pub fn pattern(&self) -> &'static str {
        match self {
            EntityType::ServerName => r"server-[a-zA-Z0-9-]+|prod-|staging-|dev-",
            EntityType::Username => r"user[a-zA-Z0-9_]*|\b[a-z][a-z0-9_]{2,31}\b",
            EntityType::ErrorCode => {
                r"error[A-Z0-9]*|ERR[A-Z0-9]*|permission denied|command not found|no such file"
            }
            EntityType::SoftwareName => {
                r"(apache|nginx|ssh|mysql|postgresql|docker|kubernetes|k8s|python|java)"
            }
            EntityType::CommandName => {
                r"(cd|ls|grep|find|chmod|chown|ps|kill|df|du|top|htop|free|uname|who|w)"
            }
            EntityType::FilePath => r"/[/a-zA-Z0-9_.-]+|~?/[a-zA-Z0-9_/. -]+",
        }
    }
}

impl std::fmt::Display for EntityType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Entity type -> matched values, first-occurrence order.
///
/// A type is only ever present with at least one value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntitySet {
    entries: IndexMap<EntityType, Vec<String>>,
}

impl EntitySet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add values for a type, dropping blanks and duplicates.
    /// Nothing is recorded if no value survives.
    pub fn insert<I, S>(&mut self, entity_type: EntityType, values: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut seen: HashSet<String> = self
            .entries
            .get(&entity_type)
            .map(|v| v.iter().cloned().collect())
            .unwrap_or_default();
        let mut kept: Vec<String> = self.entries.get(&entity_type).cloned().unwrap_or_default();

        for value in values {
            let value = value.into();
            if value.trim().is_empty() {
                continue;
            }
            if seen.insert(value.clone()) {
                kept.push(value);
            }
        }

        if !kept.is_empty() {
            self.entries.insert(entity_type, kept);
        }
    }

    /// Builder form of `insert`
    pub fn with(mut self, entity_type: EntityType, values: &[&str]) -> Self {
        self.insert(entity_type, values.iter().copied());
        self
    }

    pub fn get(&self, entity_type: EntityType) -> Option<&[String]> {
        self.entries.get(&entity_type).map(|v| v.as_slice())
    }

    pub fn contains(&self, entity_type: EntityType) -> bool {
        self.entries.contains_key(&entity_type)
    }

    pub fn first(&self, entity_type: EntityType) -> Option<&str> {
        self.get(entity_type)
            .and_then(|v| v.first())
            .map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (EntityType, &[String])> {
        self.entries.iter().map(|(t, v)| (*t, v.as_slice()))
    }

    /// Every extracted value, across all types
    pub fn all_values(&self) -> impl Iterator<Item = &str> {
        self.entries.values().flatten().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Compiled entity patterns
#[derive(Debug, Clone)]
pub struct EntityExtractor {
    patterns: Vec<(EntityType, Regex)>,
}

impl EntityExtractor {
    pub fn new() -> Result<Self> {
        let mut patterns = Vec::with_capacity(EntityType::ALL.len());
        for entity_type in EntityType::ALL {
            let re = Regex::new(&format!("(?i){}", entity_type.pattern()))?;
            patterns.push((entity_type, re));
        }
        Ok(Self { patterns })
    }

    /// Extract entities from the raw (not lowercased) query
    pub fn extract(&self, text: &str) -> EntitySet {
        let mut set = EntitySet::new();
        for (entity_type, re) in &self.patterns {
            set.insert(*entity_type, re.find_iter(text).map(|m| m.as_str()));
        }
        set
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_skips_blank_and_duplicates() {
        let mut set = EntitySet::new();
        set.insert(EntityType::CommandName, ["df", " ", "du", "df"]);
        assert_eq!(set.get(EntityType::CommandName).unwrap(), ["df", "du"]);
    }

    #[test]
    fn test_insert_only_blanks_leaves_type_absent() {
        let mut set = EntitySet::new();
        set.insert(EntityType::FilePath, ["", "   "]);
        assert!(!set.contains(EntityType::FilePath));
        assert!(set.is_empty());
    }

    #[test]
    fn test_extract_empty_text() {
        let extractor = EntityExtractor::new().unwrap();
        assert!(extractor.extract("").is_empty());
    }

    #[test]
    fn test_software_match_keeps_source_case() {
        let extractor = EntityExtractor::new().unwrap();
        let set = extractor.extract("Restart Apache now");
        assert_eq!(set.first(EntityType::SoftwareName), Some("Apache"));
    }

    #[test]
    fn test_serializes_as_plain_map() {
        let set = EntitySet::new().with(EntityType::ServerName, &["server-web-01"]);
        let json = serde_json::to_string(&set).unwrap();
        assert_eq!(json, r#"{"server_name":["server-web-01"]}"#);
    }
}
