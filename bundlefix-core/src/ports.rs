//! Port traits abstracting all I/O away from the pipeline.

use bundlefix_types::assignment::Assignment;
use bundlefix_types::graph::BuildGraph;
use camino::Utf8Path;

/// Source of build-graph snapshots.
pub trait GraphSource {
    fn load_graph(&self) -> anyhow::Result<BuildGraph>;
}

/// Source of previously-written assignments (for `check`).
pub trait AssignmentSource {
    fn load_assignment(&self) -> anyhow::Result<Assignment>;
}

/// File-system write operations.
pub trait WritePort {
    fn write_file(&self, path: &Utf8Path, contents: &[u8]) -> anyhow::Result<()>;
    fn create_dir_all(&self, path: &Utf8Path) -> anyhow::Result<()>;
}
