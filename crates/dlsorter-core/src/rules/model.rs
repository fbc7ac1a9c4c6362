//! The sorting rule record.

use serde::{Deserialize, Serialize};

/// One sorting rule. Matching is described in [`crate::resolver`]; a rule only
/// participates when `enabled`, and a rule with both patterns empty never
/// matches anything.
///
/// Field names serialize in camelCase so the rules file stays interchangeable
/// with the browser extension's storage records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rule {
    /// Opaque stable identifier, independent of list position.
    #[serde(default = "new_rule_id")]
    pub id: String,
    /// Regex over the download's referrer or URL. Empty means "no URL
    /// condition" and excludes the rule from the URL tier.
    #[serde(default)]
    pub pattern: String,
    /// Regex over the bare filename. On a URL-tier rule this is an extra
    /// constraint; on its own it makes a file-tier rule.
    #[serde(default)]
    pub file_pattern: String,
    /// Destination template, see [`crate::template`].
    #[serde(default)]
    pub dir: String,
    #[serde(default = "enabled_default")]
    pub enabled: bool,
}

fn new_rule_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

fn enabled_default() -> bool {
    true
}

impl Rule {
    /// A fresh enabled rule with a new id.
    pub fn new(pattern: &str, file_pattern: &str, dir: &str) -> Self {
        Self {
            id: new_rule_id(),
            pattern: pattern.to_string(),
            file_pattern: file_pattern.to_string(),
            dir: dir.to_string(),
            enabled: true,
        }
    }

    pub fn has_url_pattern(&self) -> bool {
        !self.pattern.trim().is_empty()
    }

    pub fn has_file_pattern(&self) -> bool {
        !self.file_pattern.trim().is_empty()
    }
}
