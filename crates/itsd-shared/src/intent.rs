//! Intent classification by regex pattern scoring.
//!
//! Every category owns an ordered list of patterns. A category scores one
//! point per distinct pattern that matches the lowercased query; the highest
//! score wins and ties go to the category listed first. A query that scores
//! zero everywhere is a `general_query`.

use crate::error::Result;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Closed set of query intents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntentCategory {
    /// How to use or read a command
    CommandSyntax,
    /// Something is failing
    Troubleshooting,
    /// Is something up, how much is used
    StatusCheck,
    /// Accounts, passwords, groups
    UserManagement,
    /// Services, daemons, processes
    ProcessManagement,
    /// Files, directories, ownership
    FileManagement,
    /// Fallback when nothing scored
    GeneralQuery,
}

impl IntentCategory {
    /// Categories that carry patterns, in tie-break order
    pub const SCORED: [IntentCategory; 6] = [
        IntentCategory::CommandSyntax,
        IntentCategory::Troubleshooting,
        IntentCategory::StatusCheck,
        IntentCategory::UserManagement,
        IntentCategory::ProcessManagement,
        IntentCategory::FileManagement,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            IntentCategory::CommandSyntax => "command_syntax",
            IntentCategory::Troubleshooting => "troubleshooting",
            IntentCategory::StatusCheck => "status_check",
            IntentCategory::UserManagement => "user_management",
            IntentCategory::ProcessManagement => "process_management",
            IntentCategory::FileManagement => "file_management",
            IntentCategory::GeneralQuery => "general_query",
        }
    }

    /// Parse from the snake_case name
    pub fn from_name(s: &str) -> Option<Self> {
        match s {
            "command_syntax" => Some(IntentCategory::CommandSyntax),
            "troubleshooting" => Some(IntentCategory::Troubleshooting),
            "status_check" => Some(IntentCategory::StatusCheck),
            "user_management" => Some(IntentCategory::UserManagement),
            "process_management" => Some(IntentCategory::ProcessManagement),
            "file_management" => Some(IntentCategory::FileManagement),
            "general_query" => Some(IntentCategory::GeneralQuery),
            _ => None,
        }
    }

    /// Raw pattern table for this category (empty for the fallback)
    pub fn patterns(&self) -> &'static [&'static str] {
        match self {
            IntentCategory::CommandSyntax => &[
                r"how.*command",
                r"what.*command",
                r"syntax.*",
                r"how.*run",
                r"what.*syntax",
                r"how.*us(e|ing).*command",
                r"explain.*command",
                r"what does.*command.*do",
                r"example of.*command",
                r"usage of.*command",
            ],
            IntentCategory::Troubleshooting => &[
                r"error",
                r"fix",
                r"problem",
                r"issue",
                r"not working",
                r"failed",
                r"broken",
                r"won't start",
                r"cannot",
                r"can't",
                r"unable to",
                r"permission denied",
                r"command not found",
                r"no such file",
            ],
            IntentCategory::StatusCheck => &[
                r"status",
                r"check",
                r"is.*up",
                r"is.*down",
                r"running",
                r"stopped",
                r"how.*check",
                r"system health",
                r"resource usage",
                r"monitor",
            ],
            IntentCategory::UserManagement => &[
                r"user",
                r"add user",
                r"create user",
                r"delete user",
                r"password",
                r"permission",
                r"group",
                r"sudo",
                r"user account",
                r"add to group",
            ],
            IntentCategory::ProcessManagement => &[
                r"process",
                r"kill",
                r"stop",
                r"start",
                r"restart",
                r"service",
                r"background",
                r"daemon",
                r"ps",
                r"killall",
            ],
            IntentCategory::FileManagement => &[
                r"file",
                r"directory",
                r"folder",
                r"permission",
                r"chmod",
                r"chown",
                r"copy",
                r"move",
                r"delete",
                r"find.*file",
                r"search.*file",
            ],
            IntentCategory::GeneralQuery => &[],
        }
    }
}

impl std::fmt::Display for IntentCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Compiled intent patterns
#[derive(Debug, Clone)]
pub struct IntentClassifier {
    rules: Vec<(IntentCategory, Vec<Regex>)>,
}

impl IntentClassifier {
    /// Compile the pattern tables
    pub fn new() -> Result<Self> {
        let mut rules = Vec::with_capacity(IntentCategory::SCORED.len());
        for category in IntentCategory::SCORED {
            let compiled = category
                .patterns()
                .iter()
                .map(|p| Regex::new(p))
                .collect::<std::result::Result<Vec<_>, _>>()?;
            rules.push((category, compiled));
        }
        Ok(Self { rules })
    }

    /// Score every category against the query, in tie-break order
    pub fn scores(&self, text: &str) -> Vec<(IntentCategory, usize)> {
        let lower = text.to_lowercase();
        self.rules
            .iter()
            .map(|(category, patterns)| {
                let score = patterns.iter().filter(|re| re.is_match(&lower)).count();
                (*category, score)
            })
            .collect()
    }

    /// Classify a query. Never fails; unmatched input is `GeneralQuery`.
    pub fn classify(&self, text: &str) -> IntentCategory {
        let mut best = IntentCategory::GeneralQuery;
        let mut best_score = 0;
        for (category, score) in self.scores(text) {
            // strict comparison keeps the earliest category on ties
            if score > best_score {
                best = category;
                best_score = score;
            }
        }
        best
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classifier() -> IntentClassifier {
        IntentClassifier::new().unwrap()
    }

    #[test]
    fn test_all_patterns_compile() {
        let c = classifier();
        assert_eq!(c.rules.len(), 6);
    }

    #[test]
    fn test_empty_is_general_query() {
        assert_eq!(classifier().classify(""), IntentCategory::GeneralQuery);
        assert_eq!(classifier().classify("   "), IntentCategory::GeneralQuery);
    }

    #[test]
    fn test_distinct_patterns_not_occurrences() {
        let scores = classifier().scores("error error error");
        let troubleshooting = scores
            .iter()
            .find(|(c, _)| *c == IntentCategory::Troubleshooting)
            .map(|(_, s)| *s);
        assert_eq!(troubleshooting, Some(1));
    }

    #[test]
    fn test_tie_goes_to_first_category() {
        // "permission" scores 1 for user_management and file_management
        assert_eq!(
            classifier().classify("permission"),
            IntentCategory::UserManagement
        );
    }

    #[test]
    fn test_case_insensitive() {
        assert_eq!(
            classifier().classify("RESTART THE SERVICE"),
            IntentCategory::ProcessManagement
        );
    }

    #[test]
    fn test_name_roundtrip() {
        for c in IntentCategory::SCORED {
            assert_eq!(IntentCategory::from_name(c.as_str()), Some(c));
        }
        assert_eq!(IntentCategory::from_name("nope"), None);
    }
}
