//! Rendering helpers (markdown) for human-readable artifacts.

use bundlefix_types::assignment::Assignment;
use bundlefix_types::report::{EmbedViolationReason, ReportStatus, ResolveReport};

pub fn render_assignment_md(assignment: &Assignment) -> String {
    let mut out = String::new();
    out.push_str("# bundlefix assignment\n\n");
    out.push_str(&format!(
        "- Main bundle identifier: `{}`\n",
        assignment.main_bundle_id
    ));
    out.push_str(&format!("- Targets: {}\n", assignment.entries.len()));
    if let Some(fingerprint) = &assignment.fingerprint {
        out.push_str(&format!("- Fingerprint: `{}`\n", fingerprint));
    }
    if let Some(resolution_id) = &assignment.resolution_id {
        out.push_str(&format!("- Resolution id: `{}`\n", resolution_id));
    }
    out.push('\n');

    out.push_str("## Targets\n\n");
    if assignment.entries.is_empty() {
        out.push_str("_No targets assigned._\n");
        return out;
    }

    out.push_str("| Target | Kind | Identifier |\n");
    out.push_str("|---|---|---|\n");
    for entry in &assignment.entries {
        out.push_str(&format!(
            "| `{}` | {} | `{}` |\n",
            entry.target,
            kind_label(entry.kind),
            entry.identifier
        ));
    }

    out
}

pub fn render_report_md(report: &ResolveReport) -> String {
    let mut out = String::new();
    out.push_str("# bundlefix report\n\n");
    out.push_str(&format!(
        "- Status: `{}`\n",
        status_label(report.verdict.status)
    ));
    out.push_str(&format!(
        "- Collisions: {}\n",
        report.verdict.counts.collisions
    ));
    out.push_str(&format!(
        "- Format violations: {}\n",
        report.verdict.counts.format_violations
    ));
    out.push_str(&format!(
        "- Embedding violations: {}\n\n",
        report.verdict.counts.embedding_violations
    ));

    if !report.verdict.reasons.is_empty() {
        for reason in &report.verdict.reasons {
            out.push_str(&format!("> {}\n", reason));
        }
        out.push('\n');
    }

    if report.collisions.is_empty()
        && report.format_violations.is_empty()
        && report.embedding_violations.is_empty()
    {
        out.push_str("_No findings._\n");
        return out;
    }

    if !report.collisions.is_empty() {
        out.push_str("## Collisions\n\n");
        for group in &report.collisions {
            let targets: Vec<&str> = group.targets.iter().map(|t| t.as_str()).collect();
            out.push_str(&format!(
                "- `{}` claimed by {}\n",
                group.identifier,
                targets.join(", ")
            ));
        }
        out.push('\n');
    }

    if !report.format_violations.is_empty() {
        out.push_str("## Format violations\n\n");
        for violation in &report.format_violations {
            out.push_str(&format!(
                "- `{}` on `{}`: {}\n",
                violation.identifier, violation.target, violation.issue
            ));
        }
        out.push('\n');
    }

    if !report.embedding_violations.is_empty() {
        out.push_str("## Embedding violations\n\n");
        for violation in &report.embedding_violations {
            let embedders: Vec<&str> =
                violation.embedders.iter().map(|t| t.as_str()).collect();
            out.push_str(&format!(
                "- `{}` ({}): embedded by {}\n",
                violation.framework,
                reason_label(violation.reason),
                embedders.join(", ")
            ));
        }
        out.push('\n');
    }

    out
}

fn kind_label(kind: bundlefix_types::graph::TargetKind) -> &'static str {
    match kind {
        bundlefix_types::graph::TargetKind::MainApp => "main app",
        bundlefix_types::graph::TargetKind::TestBundle => "test bundle",
        bundlefix_types::graph::TargetKind::Extension => "extension",
        bundlefix_types::graph::TargetKind::Framework => "framework",
    }
}

fn status_label(status: ReportStatus) -> &'static str {
    match status {
        ReportStatus::Pass => "pass",
        ReportStatus::Warn => "warn",
        ReportStatus::Fail => "fail",
    }
}

fn reason_label(reason: EmbedViolationReason) -> &'static str {
    match reason {
        EmbedViolationReason::DuplicateEmbed => "duplicate embed",
        EmbedViolationReason::NonMainEmbedder => "non-main embedder",
        EmbedViolationReason::UnknownFramework => "unknown framework",
        EmbedViolationReason::NotAFramework => "not a framework",
    }
}
