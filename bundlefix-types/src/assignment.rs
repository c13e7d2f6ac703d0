use crate::graph::{TargetId, TargetKind};
use serde::{Deserialize, Serialize};

/// One resolved `target -> identifier` pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignmentEntry {
    pub target: TargetId,
    pub kind: TargetKind,
    pub identifier: String,
}

/// Immutable mapping from target id to bundle identifier, produced once per
/// resolver run. The only artifact that crosses the output boundary.
///
/// Entries are kept sorted by target id so that serialized assignments are
/// byte-stable across runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment {
    pub schema: String,

    /// The operator-supplied main identifier, recorded verbatim.
    pub main_bundle_id: String,

    #[serde(default)]
    pub entries: Vec<AssignmentEntry>,

    /// SHA-256 over the canonical-JSON entry list.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fingerprint: Option<String>,

    /// Deterministic id for this resolution (UUIDv5 of the fingerprint).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolution_id: Option<String>,
}

impl Assignment {
    pub fn new(main_bundle_id: impl Into<String>) -> Self {
        Self {
            schema: crate::schema::BUNDLEFIX_ASSIGNMENT_V1.to_string(),
            main_bundle_id: main_bundle_id.into(),
            entries: vec![],
            fingerprint: None,
            resolution_id: None,
        }
    }

    /// Looks up the identifier resolved for a target.
    pub fn identifier_for(&self, id: &TargetId) -> Option<&str> {
        self.entries
            .iter()
            .find(|e| &e.target == id)
            .map(|e| e.identifier.as_str())
    }
}
