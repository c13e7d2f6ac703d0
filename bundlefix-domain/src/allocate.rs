use crate::error::ResolveError;
use crate::sanitize::sanitize_fragment;
use bundlefix_types::assignment::AssignmentEntry;
use bundlefix_types::graph::{TargetId, TargetKind};
use std::collections::BTreeSet;

/// Upper bound on the integer-suffix search. Exceeding it means the input
/// graph is degenerate; surfacing [`ResolveError::UnresolvableCollision`]
/// beats looping forever.
pub const MAX_SUFFIX_ATTEMPTS: u32 = 10_000;

/// A target paired with the role the classifier assigned it.
#[derive(Debug, Clone)]
pub struct ClassifiedTarget {
    pub id: TargetId,
    pub kind: TargetKind,
}

/// Assigns every target a unique identifier, collision-free by construction.
///
/// Single greedy first-fit pass over the targets in stable id order; the
/// deterministic ordering is what makes repeated runs idempotent. Candidates
/// are a pure function of `(kind, id, main_id)` and never read a target's
/// currently-recorded identifier, so a fixed point is reached in one pass.
///
/// `main_id` must already be format-checked; it is threaded through
/// verbatim for the main app.
pub fn allocate(
    targets: &[ClassifiedTarget],
    main_id: &str,
) -> Result<Vec<AssignmentEntry>, ResolveError> {
    let mut ordered: Vec<&ClassifiedTarget> = targets.iter().collect();
    ordered.sort_by(|a, b| a.id.cmp(&b.id));

    let tests_id = format!("{main_id}.tests");

    // Reserve the identifiers whose owners get them verbatim, so no derived
    // candidate can shadow them regardless of target order.
    let mut used: BTreeSet<String> = BTreeSet::new();
    used.insert(main_id.to_string());
    used.insert(tests_id.clone());

    let mut tests_reserved = true;
    let mut entries = Vec::with_capacity(ordered.len());

    for target in ordered {
        let identifier = match target.kind {
            TargetKind::MainApp => main_id.to_string(),
            TargetKind::TestBundle if tests_reserved => {
                tests_reserved = false;
                tests_id.clone()
            }
            // A second test bundle competes for a suffix like everyone else.
            TargetKind::TestBundle => claim_unique(&mut used, tests_id.clone())?,
            TargetKind::Extension => {
                let fragment = sanitize_fragment(target.id.as_str());
                claim_unique(&mut used, format!("{main_id}.{fragment}"))?
            }
            TargetKind::Framework => {
                let fragment = sanitize_fragment(target.id.as_str());
                claim_unique(&mut used, format!("{main_id}.framework.{fragment}"))?
            }
        };

        entries.push(AssignmentEntry {
            target: target.id.clone(),
            kind: target.kind,
            identifier,
        });
    }

    Ok(entries)
}

/// First-fit resolution: the candidate itself, else the first unused
/// `.1`, `.2`, … suffix.
fn claim_unique(used: &mut BTreeSet<String>, candidate: String) -> Result<String, ResolveError> {
    if used.insert(candidate.clone()) {
        return Ok(candidate);
    }

    for n in 1..=MAX_SUFFIX_ATTEMPTS {
        let suffixed = format!("{candidate}.{n}");
        if used.insert(suffixed.clone()) {
            return Ok(suffixed);
        }
    }

    Err(ResolveError::UnresolvableCollision {
        identifier: candidate,
        attempts: MAX_SUFFIX_ATTEMPTS,
    })
}
