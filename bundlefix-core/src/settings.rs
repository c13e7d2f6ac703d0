//! Clap-free settings for the resolve pipeline.

use bundlefix_types::policy::ClassifyPolicy;
use camino::Utf8PathBuf;

/// Settings for the resolve pipeline.
#[derive(Debug, Clone)]
pub struct ResolveSettings {
    /// Build-graph snapshot to read.
    pub graph_path: Utf8PathBuf,
    /// Directory the artifacts are written into.
    pub out_dir: Utf8PathBuf,

    /// Target that ships as the main application.
    pub main_target: String,
    /// Operator-supplied identifier for the main application.
    pub main_bundle_id: String,
    /// Role predicates for the classifier.
    pub classify: ClassifyPolicy,

    /// Treat findings (collisions, embedding violations) as a block.
    pub strict: bool,
}

impl Default for ResolveSettings {
    fn default() -> Self {
        Self {
            graph_path: Utf8PathBuf::from("graph.json"),
            out_dir: Utf8PathBuf::from("artifacts/bundlefix"),
            main_target: String::new(),
            main_bundle_id: String::new(),
            classify: ClassifyPolicy::default(),
            strict: false,
        }
    }
}