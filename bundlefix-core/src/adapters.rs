//! Default filesystem-backed implementations of the port traits.

use crate::ports::{AssignmentSource, GraphSource, WritePort};
use anyhow::Context;
use bundlefix_types::assignment::Assignment;
use bundlefix_types::graph::BuildGraph;
use bundlefix_types::wire;
use camino::{Utf8Path, Utf8PathBuf};
use fs_err as fs;
use tracing::debug;

/// Reads a `bundlefix.graph.v1` JSON snapshot from disk.
#[derive(Debug, Clone)]
pub struct FsGraphSource {
    path: Utf8PathBuf,
}

impl FsGraphSource {
    pub fn new(path: Utf8PathBuf) -> Self {
        Self { path }
    }
}

impl GraphSource for FsGraphSource {
    fn load_graph(&self) -> anyhow::Result<BuildGraph> {
        debug!(path = %self.path, "loading build-graph snapshot");
        let json =
            fs::read_to_string(&self.path).with_context(|| format!("read {}", self.path))?;
        let graph =
            wire::parse_graph_v1(&json).with_context(|| format!("parse {}", self.path))?;
        Ok(graph)
    }
}

/// Reads a `bundlefix.assignment.v1` JSON artifact from disk.
#[derive(Debug, Clone)]
pub struct FsAssignmentSource {
    path: Utf8PathBuf,
}

impl FsAssignmentSource {
    pub fn new(path: Utf8PathBuf) -> Self {
        Self { path }
    }
}

impl AssignmentSource for FsAssignmentSource {
    fn load_assignment(&self) -> anyhow::Result<Assignment> {
        debug!(path = %self.path, "loading assignment artifact");
        let json =
            fs::read_to_string(&self.path).with_context(|| format!("read {}", self.path))?;
        let assignment =
            wire::parse_assignment_v1(&json).with_context(|| format!("parse {}", self.path))?;
        Ok(assignment)
    }
}

/// Filesystem writer.
#[derive(Debug, Clone, Default)]
pub struct FsWriter;

impl WritePort for FsWriter {
    fn write_file(&self, path: &Utf8Path, contents: &[u8]) -> anyhow::Result<()> {
        fs::write(path, contents).with_context(|| format!("write {}", path))
    }

    fn create_dir_all(&self, path: &Utf8Path) -> anyhow::Result<()> {
        fs::create_dir_all(path).with_context(|| format!("create {}", path))
    }
}

#[cfg(test)]
mod tests {
    use super::{FsAssignmentSource, FsGraphSource, FsWriter};
    use crate::ports::{AssignmentSource, GraphSource, WritePort};
    use bundlefix_types::assignment::Assignment;
    use bundlefix_types::wire;
    use camino::Utf8PathBuf;
    use fs_err as fs;
    use tempfile::TempDir;

    fn temp_root() -> (TempDir, Utf8PathBuf) {
        let td = tempfile::tempdir().expect("tempdir");
        let root = Utf8PathBuf::from_path_buf(td.path().to_path_buf()).expect("utf8 tempdir");
        (td, root)
    }

    #[test]
    fn graph_source_reads_valid_snapshots() {
        let (_td, root) = temp_root();
        let path = root.join("graph.json");
        fs::write(
            &path,
            r#"{"schema": "bundlefix.graph.v1", "targets": [{"id": "Runner"}]}"#,
        )
        .unwrap();

        let graph = FsGraphSource::new(path).load_graph().expect("load");
        assert_eq!(graph.targets.len(), 1);
    }

    #[test]
    fn graph_source_surfaces_schema_mismatch_with_path_context() {
        let (_td, root) = temp_root();
        let path = root.join("graph.json");
        fs::write(&path, r#"{"schema": "something.else.v1", "targets": []}"#).unwrap();

        let err = FsGraphSource::new(path.clone())
            .load_graph()
            .expect_err("mismatch");
        let message = format!("{err:#}");
        assert!(message.contains("graph.json"));
        assert!(message.contains("bundlefix.graph.v1"));
    }

    #[test]
    fn graph_source_reports_missing_file() {
        let (_td, root) = temp_root();
        let err = FsGraphSource::new(root.join("absent.json"))
            .load_graph()
            .expect_err("missing");
        assert!(format!("{err:#}").contains("absent.json"));
    }

    #[test]
    fn assignment_source_round_trips_written_artifact() {
        let (_td, root) = temp_root();
        let path = root.join("assignment.json");

        let assignment = Assignment::new("com.acme.app");
        let json = wire::to_json_pretty(&assignment).expect("serialize");
        FsWriter.write_file(&path, json.as_bytes()).expect("write");

        let back = FsAssignmentSource::new(path).load_assignment().expect("load");
        assert_eq!(back, assignment);
    }

    #[test]
    fn writer_creates_nested_directories() {
        let (_td, root) = temp_root();
        let dir = root.join("artifacts/bundlefix");
        FsWriter.create_dir_all(&dir).expect("mkdir");
        FsWriter
            .write_file(&dir.join("report.json"), b"{}")
            .expect("write");
        assert!(dir.join("report.json").as_std_path().exists());
    }
}
