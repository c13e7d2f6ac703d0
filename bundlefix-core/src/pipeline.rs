//! Core resolve and check pipelines, extracted from the CLI.
//!
//! These entry points are I/O-agnostic: all filesystem access happens
//! through the port traits, so a host process can feed snapshots from
//! anywhere and decide for itself what to do with the artifacts.

use crate::ports::{AssignmentSource, GraphSource, WritePort};
use crate::settings::ResolveSettings;
use anyhow::Context;
use bundlefix_domain::{Resolution, ResolveError, Resolver, ResolverConfig, validate_entries};
use bundlefix_render::{render_assignment_md, render_report_md};
use bundlefix_types::assignment::Assignment;
use bundlefix_types::report::{
    CollisionReport, ReportCounts, ReportRunInfo, ReportStatus, ReportToolInfo, ReportVerdict,
    ResolveReport,
};
use bundlefix_types::wire;
use camino::Utf8Path;
use chrono::{DateTime, Utc};
use tracing::{debug, info};

/// Error type for pipeline results.
///
/// `Resolve` carries the engine's fatal taxonomy (bad operator input or a
/// degenerate graph); `Internal` is plumbing (I/O, parse). Findings never
/// appear here; they ride in the report.
#[derive(Debug, thiserror::Error)]
pub enum ToolError {
    #[error("{0}")]
    Resolve(#[from] ResolveError),
    #[error("{0:#}")]
    Internal(#[from] anyhow::Error),
}

/// Outcome of [`run_resolve`].
#[derive(Debug)]
pub struct ResolveOutcome {
    pub assignment: Assignment,
    pub report: ResolveReport,
    /// True when findings are present and strict mode turns them into a
    /// block (exit 2 at the CLI).
    pub findings_block: bool,
}

/// Outcome of [`run_check`].
pub struct CheckOutcome {
    pub report: CollisionReport,
    pub clean: bool,
}

/// Run the resolve pipeline: load a snapshot, resolve it, assemble the
/// run report.
///
/// The caller is responsible for persisting artifacts, either through
/// [`write_resolve_artifacts`] or its own sink.
pub fn run_resolve(
    settings: &ResolveSettings,
    source: &dyn GraphSource,
    tool: ReportToolInfo,
) -> Result<ResolveOutcome, ToolError> {
    let started = Utc::now();

    let graph = source.load_graph()?;
    debug!(targets = graph.targets.len(), "loaded build graph");

    let resolver = Resolver::new(ResolverConfig {
        main_target: settings.main_target.clone().into(),
        main_bundle_id: settings.main_bundle_id.clone(),
        classify: settings.classify.clone(),
    });
    let resolution = resolver.resolve(&graph)?;

    let report = build_report(tool, started, &resolution);
    let findings_block = settings.strict && report.verdict.status != ReportStatus::Pass;

    info!(
        targets = resolution.assignment.entries.len(),
        collisions = report.verdict.counts.collisions,
        embedding_violations = report.verdict.counts.embedding_violations,
        "resolved build graph"
    );

    Ok(ResolveOutcome {
        assignment: resolution.assignment,
        report,
        findings_block,
    })
}

/// Run the check pipeline: re-validate a caller-supplied assignment
/// without allocating anything.
///
/// This is the path for assignments that bypassed the allocator (e.g.
/// hand-edited artifacts); collisions found here are data for the caller,
/// not errors.
pub fn run_check(source: &dyn AssignmentSource) -> Result<CheckOutcome, ToolError> {
    let assignment = source.load_assignment()?;
    let report = validate_entries(&assignment.entries);
    let clean = report.is_empty();

    info!(
        entries = assignment.entries.len(),
        collisions = report.groups.len(),
        format_violations = report.format_violations.len(),
        "checked assignment"
    );

    Ok(CheckOutcome { report, clean })
}

/// Persist the standard artifact set through the write port.
///
/// Serialization is byte-stable for an unchanged outcome, so re-writing is
/// an effective no-op and downstream file watchers stay quiet.
pub fn write_resolve_artifacts(
    out_dir: &Utf8Path,
    outcome: &ResolveOutcome,
    writer: &dyn WritePort,
) -> anyhow::Result<()> {
    writer.create_dir_all(out_dir)?;

    let assignment_json =
        wire::to_json_pretty(&outcome.assignment).context("serialize assignment")?;
    writer.write_file(&out_dir.join("assignment.json"), assignment_json.as_bytes())?;

    let report_json = wire::to_json_pretty(&outcome.report).context("serialize report")?;
    writer.write_file(&out_dir.join("report.json"), report_json.as_bytes())?;

    writer.write_file(
        &out_dir.join("assignment.md"),
        render_assignment_md(&outcome.assignment).as_bytes(),
    )?;
    writer.write_file(
        &out_dir.join("report.md"),
        render_report_md(&outcome.report).as_bytes(),
    )?;

    Ok(())
}

fn build_report(
    tool: ReportToolInfo,
    started_at: DateTime<Utc>,
    resolution: &Resolution,
) -> ResolveReport {
    let counts = ReportCounts {
        collisions: resolution.collisions.groups.len() as u64,
        format_violations: resolution.collisions.format_violations.len() as u64,
        embedding_violations: resolution.embedding_violations.len() as u64,
    };

    // Collisions and format escapes mean the assignment is unshippable;
    // embedding violations are real but fixable outside the assignment.
    let status = if counts.collisions > 0 || counts.format_violations > 0 {
        ReportStatus::Fail
    } else if counts.embedding_violations > 0 {
        ReportStatus::Warn
    } else {
        ReportStatus::Pass
    };

    let mut reasons = Vec::new();
    if counts.collisions > 0 {
        reasons.push(format!("{} identifier collision(s)", counts.collisions));
    }
    if counts.format_violations > 0 {
        reasons.push(format!("{} format violation(s)", counts.format_violations));
    }
    if counts.embedding_violations > 0 {
        reasons.push(format!(
            "{} embedding violation(s)",
            counts.embedding_violations
        ));
    }

    let ended_at = Utc::now();
    let duration_ms = (ended_at - started_at).num_milliseconds().max(0) as u64;

    ResolveReport {
        schema: bundlefix_types::schema::BUNDLEFIX_REPORT_V1.to_string(),
        tool,
        run: ReportRunInfo {
            started_at,
            ended_at: Some(ended_at),
            duration_ms: Some(duration_ms),
        },
        verdict: ReportVerdict {
            status,
            counts,
            reasons,
        },
        collisions: resolution.collisions.groups.clone(),
        format_violations: resolution.collisions.format_violations.clone(),
        embedding_violations: resolution.embedding_violations.clone(),
    }
}
