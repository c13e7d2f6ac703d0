use crate::graph::TargetId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Targets that resolved to (or were supplied with) the same identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollisionGroup {
    pub identifier: String,
    pub targets: Vec<TargetId>,
}

/// Why an identifier fails the Apple format/length rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum IdentifierIssue {
    Empty,
    TooLong { length: usize },
    IllegalStart { found: char },
    IllegalChar { found: char, index: usize },
}

impl std::fmt::Display for IdentifierIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IdentifierIssue::Empty => write!(f, "identifier is empty"),
            IdentifierIssue::TooLong { length } => {
                write!(f, "identifier is {} bytes, limit is 255", length)
            }
            IdentifierIssue::IllegalStart { found } => {
                write!(f, "identifier may not start with `{}`", found)
            }
            IdentifierIssue::IllegalChar { found, index } => {
                write!(f, "illegal character `{}` at byte {}", found, index)
            }
        }
    }
}

/// An identifier that escaped the format rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormatViolation {
    pub target: TargetId,
    pub identifier: String,
    pub issue: IdentifierIssue,
}

/// Result of re-validating an assignment. Empty report = success.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollisionReport {
    #[serde(default)]
    pub groups: Vec<CollisionGroup>,

    #[serde(default)]
    pub format_violations: Vec<FormatViolation>,
}

impl CollisionReport {
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty() && self.format_violations.is_empty()
    }
}

/// Which embedding rule a framework's embed edges break.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmbedViolationReason {
    /// Embedded by more than one signing target.
    DuplicateEmbed,
    /// The sole embedder is not the main application.
    NonMainEmbedder,
    /// The embed edge points at a target id absent from the graph.
    UnknownFramework,
    /// The embed edge points at a target that is not a framework.
    NotAFramework,
}

/// A framework whose embed edges break the packaging rules.
///
/// Purely informational: remediation (removing an embed phase) belongs to
/// whatever owns the project representation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmbeddingViolation {
    pub framework: TargetId,
    pub embedders: Vec<TargetId>,
    pub reason: EmbedViolationReason,
}

/// Run-level report artifact.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolveReport {
    pub schema: String,
    pub tool: ReportToolInfo,
    pub run: ReportRunInfo,
    pub verdict: ReportVerdict,

    #[serde(default)]
    pub collisions: Vec<CollisionGroup>,

    #[serde(default)]
    pub format_violations: Vec<FormatViolation>,

    #[serde(default)]
    pub embedding_violations: Vec<EmbeddingViolation>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportToolInfo {
    pub name: String,
    pub version: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub commit: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportRunInfo {
    pub started_at: DateTime<Utc>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ended_at: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_ms: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportVerdict {
    pub status: ReportStatus,
    pub counts: ReportCounts,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub reasons: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportStatus {
    Pass,
    Warn,
    Fail,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportCounts {
    pub collisions: u64,
    pub format_violations: u64,
    pub embedding_violations: u64,
}
