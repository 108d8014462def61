//! Findings: the record shape every stage hands to the reporting sink.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::collections::SmallVec4;

/// Finding severity, ordered from least to most severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Low,
    Medium,
    High,
}

impl Severity {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A single audit finding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finding {
    /// Stage that produced the finding (e.g., "contract_diff").
    pub agent: String,
    pub title: String,
    pub description: String,
    pub severity: Severity,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line: Option<u32>,
    #[serde(default)]
    pub tags: SmallVec4<String>,
}

impl Finding {
    pub fn new(
        agent: impl Into<String>,
        title: impl Into<String>,
        description: impl Into<String>,
        severity: Severity,
    ) -> Self {
        Self {
            agent: agent.into(),
            title: title.into(),
            description: description.into(),
            severity,
            file_path: None,
            line: None,
            tags: SmallVec4::new(),
        }
    }

    /// Attach a source location.
    pub fn at(mut self, file_path: impl Into<String>, line: u32) -> Self {
        self.file_path = Some(file_path.into());
        self.line = Some(line);
        self
    }

    /// Append a tag.
    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severity_orders_by_weight() {
        assert!(Severity::Info < Severity::Low);
        assert!(Severity::Medium < Severity::High);
    }

    #[test]
    fn finding_serializes_lowercase_severity_and_skips_missing_location() {
        let finding = Finding::new("contract_diff", "t", "d", Severity::High).tag("contracts");
        let json = serde_json::to_value(&finding).unwrap();
        assert_eq!(json["severity"], "high");
        assert!(json.get("file_path").is_none());
        assert_eq!(json["tags"][0], "contracts");
    }
}
