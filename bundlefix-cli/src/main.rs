use bundlefix_core::adapters::{FsAssignmentSource, FsGraphSource, FsWriter};
use bundlefix_core::pipeline::{ToolError, run_check, run_resolve, write_resolve_artifacts};
use bundlefix_core::settings::ResolveSettings;
use bundlefix_render::render_report_md;
use bundlefix_types::policy::ClassifyPolicy;
use bundlefix_types::report::ReportToolInfo;
use camino::Utf8PathBuf;
use clap::{Parser, Subcommand};
use std::process::ExitCode;
use tracing::error;
use tracing_subscriber::EnvFilter;

/// Exit code when findings block the run (strict mode or failed check).
const EXIT_FINDINGS: u8 = 2;

#[derive(Debug, Parser)]
#[command(
    name = "bundlefix",
    version,
    about = "Deterministic bundle-identifier allocation for iOS build graphs."
)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Resolve a build graph into a unique, stable identifier assignment.
    Resolve(ResolveArgs),
    /// Re-validate an existing assignment without allocating.
    Check(CheckArgs),
}

#[derive(Debug, Parser)]
struct ResolveArgs {
    /// Build-graph snapshot (bundlefix.graph.v1 JSON).
    #[arg(long, default_value = "graph.json")]
    graph: Utf8PathBuf,

    /// Output directory for bundlefix artifacts.
    #[arg(long, default_value = "artifacts/bundlefix")]
    out_dir: Utf8PathBuf,

    /// Target that ships as the main application.
    #[arg(long)]
    main_target: String,

    /// Bundle identifier for the main application (assigned verbatim).
    #[arg(long)]
    main_bundle_id: String,

    /// Glob patterns naming test-bundle targets (default: *Tests).
    #[arg(long = "test-pattern")]
    test_patterns: Vec<String>,

    /// Glob patterns naming extension targets (default: *Extension, *Widget).
    #[arg(long = "extension-pattern")]
    extension_patterns: Vec<String>,

    /// Exit non-zero when the report contains findings.
    #[arg(long, default_value_t = false)]
    strict: bool,
}

#[derive(Debug, Parser)]
struct CheckArgs {
    /// Assignment artifact to validate (bundlefix.assignment.v1 JSON).
    #[arg(long, default_value = "artifacts/bundlefix/assignment.json")]
    assignment: Utf8PathBuf,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    match real_main() {
        Ok(code) => code,
        Err(e) => {
            error!("{e}");
            ExitCode::from(1)
        }
    }
}

fn real_main() -> Result<ExitCode, ToolError> {
    let cli = Cli::parse();
    match cli.cmd {
        Command::Resolve(args) => cmd_resolve(args),
        Command::Check(args) => cmd_check(args),
    }
}

fn cmd_resolve(args: ResolveArgs) -> Result<ExitCode, ToolError> {
    let mut classify = ClassifyPolicy::default();
    if !args.test_patterns.is_empty() {
        classify.test_patterns = args.test_patterns;
    }
    if !args.extension_patterns.is_empty() {
        classify.extension_patterns = args.extension_patterns;
    }

    let settings = ResolveSettings {
        graph_path: args.graph.clone(),
        out_dir: args.out_dir.clone(),
        main_target: args.main_target,
        main_bundle_id: args.main_bundle_id,
        classify,
        strict: args.strict,
    };

    let source = FsGraphSource::new(args.graph);
    let outcome = run_resolve(&settings, &source, tool_info())?;
    write_resolve_artifacts(&settings.out_dir, &outcome, &FsWriter)?;

    println!(
        "resolved {} target(s) under `{}` -> {}",
        outcome.assignment.entries.len(),
        outcome.assignment.main_bundle_id,
        settings.out_dir.join("assignment.json"),
    );

    if outcome.findings_block {
        print!("{}", render_report_md(&outcome.report));
        return Ok(ExitCode::from(EXIT_FINDINGS));
    }
    Ok(ExitCode::SUCCESS)
}

fn cmd_check(args: CheckArgs) -> Result<ExitCode, ToolError> {
    let source = FsAssignmentSource::new(args.assignment);
    let outcome = run_check(&source)?;

    if outcome.clean {
        println!("assignment is collision-free and well-formed");
        return Ok(ExitCode::SUCCESS);
    }

    for group in &outcome.report.groups {
        let targets: Vec<&str> = group.targets.iter().map(|t| t.as_str()).collect();
        println!(
            "collision: `{}` claimed by {}",
            group.identifier,
            targets.join(", ")
        );
    }
    for violation in &outcome.report.format_violations {
        println!(
            "format: `{}` on `{}`: {}",
            violation.identifier, violation.target, violation.issue
        );
    }
    Ok(ExitCode::from(EXIT_FINDINGS))
}

fn tool_info() -> ReportToolInfo {
    ReportToolInfo {
        name: "bundlefix".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        commit: None,
    }
}
