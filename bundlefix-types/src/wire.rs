//! Versioned parse/serialize entry points with schema guards.
//!
//! Readers are tolerant of unknown fields but strict about the `schema`
//! discriminator: a snapshot or assignment produced under a different
//! schema id is rejected up front instead of being misread.

use crate::assignment::Assignment;
use crate::graph::BuildGraph;
use crate::schema;

/// Errors emitted while reading wire-level artifacts.
#[derive(Debug, Clone)]
pub enum WireError {
    SchemaMismatch {
        expected: &'static str,
        found: String,
    },
    Json {
        message: String,
    },
}

impl std::fmt::Display for WireError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WireError::SchemaMismatch { expected, found } => {
                write!(f, "expected schema `{}`, found `{}`", expected, found)
            }
            WireError::Json { message } => write!(f, "json parse error: {}", message),
        }
    }
}

impl std::error::Error for WireError {}

/// Parses a `bundlefix.graph.v1` snapshot.
pub fn parse_graph_v1(json: &str) -> Result<BuildGraph, WireError> {
    let graph: BuildGraph = serde_json::from_str(json).map_err(|e| WireError::Json {
        message: e.to_string(),
    })?;
    if graph.schema != schema::BUNDLEFIX_GRAPH_V1 {
        return Err(WireError::SchemaMismatch {
            expected: schema::BUNDLEFIX_GRAPH_V1,
            found: graph.schema,
        });
    }
    Ok(graph)
}

/// Parses a `bundlefix.assignment.v1` artifact.
pub fn parse_assignment_v1(json: &str) -> Result<Assignment, WireError> {
    let assignment: Assignment = serde_json::from_str(json).map_err(|e| WireError::Json {
        message: e.to_string(),
    })?;
    if assignment.schema != schema::BUNDLEFIX_ASSIGNMENT_V1 {
        return Err(WireError::SchemaMismatch {
            expected: schema::BUNDLEFIX_ASSIGNMENT_V1,
            found: assignment.schema,
        });
    }
    Ok(assignment)
}

/// Serializes a wire artifact as pretty JSON with a trailing newline, so
/// repeated writes of an unchanged value are byte-identical files.
pub fn to_json_pretty<T: serde::Serialize>(value: &T) -> Result<String, WireError> {
    let mut out = serde_json::to_string_pretty(value).map_err(|e| WireError::Json {
        message: e.to_string(),
    })?;
    out.push('\n');
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::{parse_assignment_v1, parse_graph_v1, to_json_pretty};
    use crate::assignment::Assignment;
    use crate::graph::{BuildGraph, BuildTarget};

    #[test]
    fn graph_parse_accepts_matching_schema() {
        let json = r#"{"schema": "bundlefix.graph.v1", "targets": [{"id": "Runner"}]}"#;
        let graph = parse_graph_v1(json).expect("parse");
        assert_eq!(graph.targets.len(), 1);
    }

    #[test]
    fn graph_parse_rejects_foreign_schema() {
        let json = r#"{"schema": "bundlefix.graph.v2", "targets": []}"#;
        let err = parse_graph_v1(json).expect_err("schema mismatch");
        assert!(err.to_string().contains("bundlefix.graph.v1"));
        assert!(err.to_string().contains("bundlefix.graph.v2"));
    }

    #[test]
    fn graph_parse_reports_malformed_json() {
        let err = parse_graph_v1("{not json").expect_err("parse error");
        assert!(err.to_string().contains("json parse error"));
    }

    #[test]
    fn assignment_parse_guards_schema() {
        let json = r#"{"schema": "bundlefix.graph.v1", "main_bundle_id": "com.acme.app"}"#;
        assert!(parse_assignment_v1(json).is_err());

        let round = to_json_pretty(&Assignment::new("com.acme.app")).expect("serialize");
        assert!(parse_assignment_v1(&round).is_ok());
    }

    #[test]
    fn pretty_json_ends_with_newline() {
        let out = to_json_pretty(&BuildGraph::new(vec![BuildTarget::new("Runner")]))
            .expect("serialize");
        assert!(out.ends_with('\n'));
        assert!(!out.ends_with("\n\n"));
    }
}
