//! Automation planning.
//!
//! Picks at most one remediation sequence for a query. The decision table is
//! an ordered list of `PlanRule`s; the first rule whose predicate holds wins.
//! Sequences are fixed catalog entries, never computed.

pub mod safe;

use crate::entities::{EntitySet, EntityType};
use crate::intent::IntentCategory;
use serde::{Deserialize, Serialize};

/// One step of a remediation sequence
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AutomationStep {
    pub command: String,
    pub description: String,
}

impl AutomationStep {
    pub fn new(command: &str, description: &str) -> Self {
        Self {
            command: command.to_string(),
            description: description.to_string(),
        }
    }
}

/// The sequences in the catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SequenceId {
    ApacheRestart,
    DiskUsageCheck,
    UserCreation,
    PermissionTroubleshoot,
}

impl SequenceId {
    pub const ALL: [SequenceId; 4] = [
        SequenceId::ApacheRestart,
        SequenceId::DiskUsageCheck,
        SequenceId::UserCreation,
        SequenceId::PermissionTroubleshoot,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SequenceId::ApacheRestart => "apache-restart",
            SequenceId::DiskUsageCheck => "disk-usage-check",
            SequenceId::UserCreation => "user-creation",
            SequenceId::PermissionTroubleshoot => "permission-troubleshoot",
        }
    }

    /// Catalog steps, in execution order
    pub fn steps(&self) -> Vec<AutomationStep> {
        match self {
            SequenceId::ApacheRestart => vec![
                AutomationStep::new("sudo systemctl status apache2", "Check current Apache status"),
                AutomationStep::new("sudo systemctl restart apache2", "Restart Apache service"),
                AutomationStep::new("sudo systemctl status apache2", "Verify Apache is running"),
            ],
            SequenceId::DiskUsageCheck => vec![
                AutomationStep::new("df -h", "Check disk space usage"),
                AutomationStep::new("du -sh /var/log/*", "Check log directory sizes"),
            ],
            SequenceId::UserCreation => vec![
                AutomationStep::new("sudo useradd -m username", "Create new user with home directory"),
                AutomationStep::new("sudo passwd username", "Set password for new user"),
                AutomationStep::new("sudo usermod -aG groupname username", "Add user to group (optional)"),
            ],
            SequenceId::PermissionTroubleshoot => vec![
                AutomationStep::new("ls -l /path/to/file", "Check current file permissions"),
                AutomationStep::new("chmod 755 /path/to/file", "Set appropriate permissions"),
                AutomationStep::new("chown user:group /path/to/file", "Change ownership if needed"),
            ],
        }
    }
}

impl std::fmt::Display for SequenceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A selected sequence
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AutomationSequence {
    pub id: SequenceId,
    pub steps: Vec<AutomationStep>,
}

impl From<SequenceId> for AutomationSequence {
    fn from(id: SequenceId) -> Self {
        Self {
            id,
            steps: id.steps(),
        }
    }
}

/// Rule predicate over the classified query
pub type RulePredicate = fn(IntentCategory, &EntitySet) -> bool;

/// One row of the decision table
#[derive(Clone, Copy)]
pub struct PlanRule {
    pub name: &'static str,
    pub predicate: RulePredicate,
    pub sequence: SequenceId,
}

impl std::fmt::Debug for PlanRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlanRule")
            .field("name", &self.name)
            .field("sequence", &self.sequence)
            .finish()
    }
}

impl PlanRule {
    pub fn matches(&self, intent: IntentCategory, entities: &EntitySet) -> bool {
        (self.predicate)(intent, entities)
    }
}

fn permission_error(intent: IntentCategory, entities: &EntitySet) -> bool {
    intent == IntentCategory::Troubleshooting
        && entities
            .get(EntityType::ErrorCode)
            .unwrap_or_default()
            .iter()
            .any(|code| code.to_lowercase().contains("permission"))
}

fn apache_mentioned(_intent: IntentCategory, entities: &EntitySet) -> bool {
    entities
        .first(EntityType::SoftwareName)
        .map(|s| s.to_lowercase() == "apache")
        .unwrap_or(false)
}

fn user_management(intent: IntentCategory, _entities: &EntitySet) -> bool {
    intent == IntentCategory::UserManagement
}

fn status_check(intent: IntentCategory, _entities: &EntitySet) -> bool {
    intent == IntentCategory::StatusCheck
}

/// Rules in priority order
pub fn default_rules() -> Vec<PlanRule> {
    vec![
        PlanRule {
            name: "permission_error",
            predicate: permission_error,
            sequence: SequenceId::PermissionTroubleshoot,
        },
        PlanRule {
            name: "apache_software",
            predicate: apache_mentioned,
            sequence: SequenceId::ApacheRestart,
        },
        PlanRule {
            name: "user_management_intent",
            predicate: user_management,
            sequence: SequenceId::UserCreation,
        },
        PlanRule {
            name: "status_check_intent",
            predicate: status_check,
            sequence: SequenceId::DiskUsageCheck,
        },
    ]
}

/// Evaluates the decision table
#[derive(Debug, Clone)]
pub struct AutomationPlanner {
    rules: Vec<PlanRule>,
}

impl Default for AutomationPlanner {
    fn default() -> Self {
        Self::new()
    }
}

impl AutomationPlanner {
    pub fn new() -> Self {
        Self {
            rules: default_rules(),
        }
    }

    pub fn rules(&self) -> &[PlanRule] {
        &self.rules
    }

    /// First rule that fires, if any
    pub fn matching_rule(&self, intent: IntentCategory, entities: &EntitySet) -> Option<&PlanRule> {
        self.rules.iter().find(|rule| rule.matches(intent, entities))
    }

    pub fn plan(&self, intent: IntentCategory, entities: &EntitySet) -> Option<AutomationSequence> {
        self.matching_rule(intent, entities)
            .map(|rule| AutomationSequence::from(rule.sequence))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rule_order_is_fixed() {
        let names: Vec<&str> = default_rules().iter().map(|r| r.name).collect();
        assert_eq!(
            names,
            vec![
                "permission_error",
                "apache_software",
                "user_management_intent",
                "status_check_intent"
            ]
        );
    }

    #[test]
    fn test_permission_rule_needs_troubleshooting_intent() {
        let entities = EntitySet::new().with(EntityType::ErrorCode, &["permission denied"]);
        assert!(permission_error(IntentCategory::Troubleshooting, &entities));
        assert!(!permission_error(IntentCategory::FileManagement, &entities));
    }

    #[test]
    fn test_permission_rule_any_error_code() {
        let entities =
            EntitySet::new().with(EntityType::ErrorCode, &["error", "Permission Denied"]);
        assert!(permission_error(IntentCategory::Troubleshooting, &entities));
    }

    #[test]
    fn test_apache_only_checks_first_software() {
        let first = EntitySet::new().with(EntityType::SoftwareName, &["APACHE", "nginx"]);
        assert!(apache_mentioned(IntentCategory::GeneralQuery, &first));

        let second = EntitySet::new().with(EntityType::SoftwareName, &["nginx", "apache"]);
        assert!(!apache_mentioned(IntentCategory::GeneralQuery, &second));
    }

    #[test]
    fn test_catalog_shapes() {
        assert_eq!(SequenceId::ApacheRestart.steps().len(), 3);
        assert_eq!(SequenceId::DiskUsageCheck.steps().len(), 2);
        assert_eq!(SequenceId::UserCreation.steps().len(), 3);
        assert_eq!(SequenceId::PermissionTroubleshoot.steps().len(), 3);
        assert!(SequenceId::ApacheRestart
            .steps()
            .iter()
            .all(|s| s.command.contains("systemctl")));
    }

    #[test]
    fn test_sequence_id_serializes_kebab() {
        let json = serde_json::to_string(&SequenceId::DiskUsageCheck).unwrap();
        assert_eq!(json, "\"disk-usage-check\"");
    }
}
