use serde::{Deserialize, Serialize};

/// Opaque stable key for a build target: the target name as it appears in
/// the project.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TargetId(pub String);

impl TargetId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for TargetId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TargetId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for TargetId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Role of a target inside the build graph.
///
/// The classifier derives this once per run; everything downstream keys off
/// the tag instead of re-matching target names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetKind {
    MainApp,
    TestBundle,
    Extension,
    Framework,
}

impl TargetKind {
    pub fn is_main_app(self) -> bool {
        matches!(self, TargetKind::MainApp)
    }

    pub fn is_framework(self) -> bool {
        matches!(self, TargetKind::Framework)
    }
}

/// One compilation/product unit in the build graph.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildTarget {
    pub id: TargetId,

    /// Identifier currently recorded in the project for this target.
    /// May be empty, malformed, or colliding; the resolver never reads it
    /// when constructing candidates.
    #[serde(default)]
    pub current_identifier: String,

    /// Framework targets this target embeds-and-signs into its own product.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub embeds_frameworks: Vec<TargetId>,
}

impl BuildTarget {
    pub fn new(id: impl Into<TargetId>) -> Self {
        Self {
            id: id.into(),
            current_identifier: String::new(),
            embeds_frameworks: vec![],
        }
    }
}

/// Snapshot of the build graph handed to the resolver.
///
/// Produced by whatever reads the surrounding project representation; the
/// resolver only sees this in-memory form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildGraph {
    pub schema: String,

    #[serde(default)]
    pub targets: Vec<BuildTarget>,
}

impl BuildGraph {
    pub fn new(targets: Vec<BuildTarget>) -> Self {
        Self {
            schema: crate::schema::BUNDLEFIX_GRAPH_V1.to_string(),
            targets,
        }
    }

    pub fn target(&self, id: &TargetId) -> Option<&BuildTarget> {
        self.targets.iter().find(|t| &t.id == id)
    }
}
