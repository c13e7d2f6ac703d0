use bundlefix_types::graph::{BuildTarget, TargetId, TargetKind};
use bundlefix_types::report::{EmbedViolationReason, EmbeddingViolation};
use std::collections::BTreeMap;

/// Checks every embed edge in the graph against the packaging rules.
///
/// A framework may be embedded by at most one target, and that target must
/// be the main app; anything else ships duplicate or incorrectly-nested
/// copies, the same failure class as an identifier collision. The check
/// never mutates the graph; each offending framework produces exactly one
/// violation naming all of its embedders, in stable framework-id order.
pub fn check_embedding(
    targets: &[BuildTarget],
    kinds: &BTreeMap<TargetId, TargetKind>,
) -> Vec<EmbeddingViolation> {
    let mut embedders: BTreeMap<&TargetId, Vec<TargetId>> = BTreeMap::new();
    for target in targets {
        for framework in &target.embeds_frameworks {
            embedders
                .entry(framework)
                .or_default()
                .push(target.id.clone());
        }
    }

    let mut out = Vec::new();
    for (framework, mut embedded_by) in embedders {
        embedded_by.sort();

        let reason = match kinds.get(framework) {
            None => Some(EmbedViolationReason::UnknownFramework),
            Some(kind) if !kind.is_framework() => Some(EmbedViolationReason::NotAFramework),
            Some(_) if embedded_by.len() > 1 => Some(EmbedViolationReason::DuplicateEmbed),
            Some(_) => {
                let embedder_kind = kinds.get(&embedded_by[0]).copied();
                if embedder_kind == Some(TargetKind::MainApp) {
                    None
                } else {
                    Some(EmbedViolationReason::NonMainEmbedder)
                }
            }
        };

        if let Some(reason) = reason {
            out.push(EmbeddingViolation {
                framework: framework.clone(),
                embedders: embedded_by,
                reason,
            });
        }
    }

    out
}
