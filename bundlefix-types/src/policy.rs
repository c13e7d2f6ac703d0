use serde::{Deserialize, Serialize};

/// Serializable form of the caller-supplied role predicates.
///
/// Patterns use `*`/`?` glob syntax and are matched against target ids.
/// The main-app target is designated by id in the resolver config, not here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifyPolicy {
    /// Patterns naming test-bundle targets.
    #[serde(default = "default_test_patterns")]
    pub test_patterns: Vec<String>,

    /// Patterns naming app-extension/widget targets.
    #[serde(default = "default_extension_patterns")]
    pub extension_patterns: Vec<String>,
}

impl Default for ClassifyPolicy {
    fn default() -> Self {
        Self {
            test_patterns: default_test_patterns(),
            extension_patterns: default_extension_patterns(),
        }
    }
}

fn default_test_patterns() -> Vec<String> {
    vec!["*Tests".to_string()]
}

fn default_extension_patterns() -> Vec<String> {
    vec!["*Extension".to_string(), "*Widget".to_string()]
}
