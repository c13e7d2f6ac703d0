use bundlefix_types::graph::TargetId;
use bundlefix_types::report::IdentifierIssue;
use thiserror::Error;

/// Fatal resolver failures.
///
/// Findings (collisions, embedding violations) are never errors; they travel
/// back to the caller as report data so the caller decides whether they are
/// fatal. Every variant here aborts the run with no partial assignment.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// No target in the graph matches the configured main target id.
    #[error("no target named `{main_target}` in the build graph")]
    MissingMainTarget { main_target: TargetId },

    /// The operator-supplied main bundle identifier fails the format rule.
    /// It is authoritative input and is never repaired silently.
    #[error("main bundle identifier `{identifier}` is invalid: {issue}")]
    InvalidMainIdentifier {
        identifier: String,
        issue: IdentifierIssue,
    },

    /// Two targets in the graph share the same id, so role assignment
    /// would be ambiguous.
    #[error("duplicate target id `{id}` in the build graph")]
    DuplicateTargetId { id: TargetId },

    /// The integer-suffix search ran out of attempts. Internal assertion,
    /// not an expected runtime condition.
    #[error("no unique suffix for `{identifier}` within {attempts} attempts")]
    UnresolvableCollision { identifier: String, attempts: u32 },
}
