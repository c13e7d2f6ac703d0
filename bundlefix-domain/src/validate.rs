use bundlefix_types::assignment::AssignmentEntry;
use bundlefix_types::graph::TargetId;
use bundlefix_types::report::{
    CollisionGroup, CollisionReport, FormatViolation, IdentifierIssue,
};
use std::collections::BTreeMap;

/// Apple's hard cap on bundle identifier length, in bytes.
pub const MAX_IDENTIFIER_LEN: usize = 255;

/// Checks one identifier against the format and length rule:
/// `^[A-Za-z0-9][A-Za-z0-9.-]*$`, at most 255 bytes.
pub fn check_identifier(identifier: &str) -> Result<(), IdentifierIssue> {
    if identifier.is_empty() {
        return Err(IdentifierIssue::Empty);
    }
    if identifier.len() > MAX_IDENTIFIER_LEN {
        return Err(IdentifierIssue::TooLong {
            length: identifier.len(),
        });
    }

    for (index, found) in identifier.char_indices() {
        let alnum = found.is_ascii_alphanumeric();
        if index == 0 {
            if !alnum {
                return Err(IdentifierIssue::IllegalStart { found });
            }
        } else if !alnum && found != '.' && found != '-' {
            return Err(IdentifierIssue::IllegalChar { found, index });
        }
    }

    Ok(())
}

/// Groups entries by identifier and re-checks every identifier's format.
///
/// The allocator never produces a violation here; this exists as a second,
/// independent line of defense and as the entry point for callers who
/// bypass the allocator (a hand-edited assignment fed to `check`).
pub fn validate_entries(entries: &[AssignmentEntry]) -> CollisionReport {
    let mut by_identifier: BTreeMap<&str, Vec<TargetId>> = BTreeMap::new();
    for entry in entries {
        by_identifier
            .entry(entry.identifier.as_str())
            .or_default()
            .push(entry.target.clone());
    }

    let groups = by_identifier
        .into_iter()
        .filter(|(_, targets)| targets.len() > 1)
        .map(|(identifier, mut targets)| {
            targets.sort();
            CollisionGroup {
                identifier: identifier.to_string(),
                targets,
            }
        })
        .collect();

    let format_violations = entries
        .iter()
        .filter_map(|entry| {
            check_identifier(&entry.identifier)
                .err()
                .map(|issue| FormatViolation {
                    target: entry.target.clone(),
                    identifier: entry.identifier.clone(),
                    issue,
                })
        })
        .collect();

    CollisionReport {
        groups,
        format_violations,
    }
}
