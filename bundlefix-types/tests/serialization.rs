//! Serialization contract tests for the shared DTOs.
//!
//! These pin the on-disk shapes other tooling reads: field names, enum
//! casing, and tolerance for absent optional fields.

use bundlefix_types::assignment::{Assignment, AssignmentEntry};
use bundlefix_types::graph::{BuildGraph, TargetKind};
use bundlefix_types::report::{
    CollisionGroup, ReportCounts, ReportRunInfo, ReportStatus, ReportToolInfo, ReportVerdict,
    ResolveReport,
};
use pretty_assertions::assert_eq;

#[test]
fn graph_round_trips_with_embeds() {
    let json = r#"{
        "schema": "bundlefix.graph.v1",
        "targets": [
            {"id": "Runner", "current_identifier": "com.acme.app", "embeds_frameworks": ["Shared"]},
            {"id": "Shared"}
        ]
    }"#;

    let graph: BuildGraph = serde_json::from_str(json).expect("parse");
    assert_eq!(graph.targets.len(), 2);
    assert_eq!(graph.targets[0].embeds_frameworks, vec!["Shared".into()]);

    let back = serde_json::to_string(&graph).expect("serialize");
    let reparsed: BuildGraph = serde_json::from_str(&back).expect("reparse");
    assert_eq!(reparsed.targets[0].id, graph.targets[0].id);
}

#[test]
fn assignment_entry_uses_snake_case_kind() {
    let entry = AssignmentEntry {
        target: "RunnerTests".into(),
        kind: TargetKind::TestBundle,
        identifier: "com.acme.app.tests".to_string(),
    };

    let json = serde_json::to_string(&entry).expect("serialize");
    assert!(json.contains("\"kind\":\"test_bundle\""));
}

#[test]
fn assignment_without_entries_parses() {
    let json = r#"{"schema": "bundlefix.assignment.v1", "main_bundle_id": "com.acme.app"}"#;
    let assignment: Assignment = serde_json::from_str(json).expect("parse");
    assert!(assignment.entries.is_empty());
    assert!(assignment.fingerprint.is_none());
}

#[test]
fn report_envelope_round_trips() {
    let report = ResolveReport {
        schema: bundlefix_types::schema::BUNDLEFIX_REPORT_V1.to_string(),
        tool: ReportToolInfo {
            name: "bundlefix".to_string(),
            version: "0.1.0".to_string(),
            commit: None,
        },
        run: ReportRunInfo {
            started_at: chrono::Utc::now(),
            ended_at: None,
            duration_ms: Some(3),
        },
        verdict: ReportVerdict {
            status: ReportStatus::Fail,
            counts: ReportCounts {
                collisions: 1,
                format_violations: 0,
                embedding_violations: 0,
            },
            reasons: vec!["1 identifier collision".to_string()],
        },
        collisions: vec![CollisionGroup {
            identifier: "com.acme.app.framework.utils".to_string(),
            targets: vec!["Utils".into(), "utils".into()],
        }],
        format_violations: vec![],
        embedding_violations: vec![],
    };

    let json = serde_json::to_string_pretty(&report).expect("serialize");
    assert!(json.contains("\"status\": \"fail\""));
    assert!(!json.contains("\"commit\""));

    let back: ResolveReport = serde_json::from_str(&json).expect("parse");
    assert_eq!(back.verdict.status, ReportStatus::Fail);
    assert_eq!(back.collisions.len(), 1);
}
