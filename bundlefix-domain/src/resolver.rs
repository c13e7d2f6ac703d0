use crate::allocate::{ClassifiedTarget, allocate};
use crate::classify::Classifier;
use crate::embedding::check_embedding;
use crate::error::ResolveError;
use crate::validate::{check_identifier, validate_entries};
use bundlefix_types::assignment::{Assignment, AssignmentEntry};
use bundlefix_types::graph::{BuildGraph, TargetId, TargetKind};
use bundlefix_types::policy::ClassifyPolicy;
use bundlefix_types::report::{CollisionReport, EmbeddingViolation};
use sha2::{Digest, Sha256};
use std::collections::{BTreeMap, BTreeSet};
use tracing::debug;
use uuid::Uuid;

/// Caller-supplied configuration for one resolver run.
#[derive(Debug, Clone)]
pub struct ResolverConfig {
    /// Target that ships as the main application.
    pub main_target: TargetId,
    /// Authoritative operator input; assigned to the main app verbatim.
    pub main_bundle_id: String,
    /// Role predicates for everything that is not the main target.
    pub classify: ClassifyPolicy,
}

/// Everything one resolver run produces.
///
/// Findings are data, not errors: a non-empty collision report or violation
/// list still comes with a best-effort assignment, and the caller decides
/// whether to proceed, warn, or abort.
#[derive(Debug, Clone)]
pub struct Resolution {
    pub assignment: Assignment,
    pub collisions: CollisionReport,
    pub embedding_violations: Vec<EmbeddingViolation>,
}

/// Orchestrates classify -> allocate -> validate -> embedding check.
///
/// Pure and stateless between calls: each run builds its own working state
/// from the snapshot, so concurrent runs over different snapshots are safe.
pub struct Resolver {
    config: ResolverConfig,
}

impl Resolver {
    pub fn new(config: ResolverConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    pub fn resolve(&self, graph: &BuildGraph) -> Result<Resolution, ResolveError> {
        let mut seen: BTreeSet<&TargetId> = BTreeSet::new();
        for target in &graph.targets {
            if !seen.insert(&target.id) {
                return Err(ResolveError::DuplicateTargetId {
                    id: target.id.clone(),
                });
            }
        }

        if !seen.contains(&self.config.main_target) {
            return Err(ResolveError::MissingMainTarget {
                main_target: self.config.main_target.clone(),
            });
        }

        if let Err(issue) = check_identifier(&self.config.main_bundle_id) {
            return Err(ResolveError::InvalidMainIdentifier {
                identifier: self.config.main_bundle_id.clone(),
                issue,
            });
        }

        let classifier =
            Classifier::new(self.config.main_target.clone(), self.config.classify.clone());
        let classified: Vec<ClassifiedTarget> = graph
            .targets
            .iter()
            .map(|t| ClassifiedTarget {
                id: t.id.clone(),
                kind: classifier.classify(&t.id),
            })
            .collect();
        let kinds: BTreeMap<TargetId, TargetKind> = classified
            .iter()
            .map(|c| (c.id.clone(), c.kind))
            .collect();

        debug!(
            targets = graph.targets.len(),
            frameworks = kinds.values().filter(|k| k.is_framework()).count(),
            "classified build graph"
        );

        let entries = allocate(&classified, &self.config.main_bundle_id)?;
        let collisions = validate_entries(&entries);
        let embedding_violations = check_embedding(&graph.targets, &kinds);

        let fingerprint = entries_fingerprint(&entries);
        let mut assignment = Assignment::new(self.config.main_bundle_id.clone());
        assignment.resolution_id = Some(resolution_id(&fingerprint).to_string());
        assignment.fingerprint = Some(fingerprint);
        assignment.entries = entries;

        Ok(Resolution {
            assignment,
            collisions,
            embedding_violations,
        })
    }
}

/// SHA-256 over the canonical-JSON entry list. Stable across runs because
/// entries arrive in stable id order and object keys are sorted.
fn entries_fingerprint(entries: &[AssignmentEntry]) -> String {
    let value = serde_json::to_value(entries).unwrap_or_default();
    let canonical = canonicalize_json(&value);
    let s = serde_json::to_string(&canonical).unwrap_or_default();
    let mut hasher = Sha256::new();
    hasher.update(s.as_bytes());
    hex::encode(hasher.finalize())
}

fn canonicalize_json(value: &serde_json::Value) -> serde_json::Value {
    match value {
        serde_json::Value::Object(map) => {
            let mut keys: Vec<_> = map.keys().cloned().collect();
            keys.sort();
            let mut out = serde_json::Map::new();
            for k in keys {
                if let Some(v) = map.get(&k) {
                    out.insert(k, canonicalize_json(v));
                }
            }
            serde_json::Value::Object(out)
        }
        serde_json::Value::Array(items) => {
            serde_json::Value::Array(items.iter().map(canonicalize_json).collect())
        }
        other => other.clone(),
    }
}

/// Deterministic id: v5(namespace, fingerprint).
fn resolution_id(fingerprint: &str) -> Uuid {
    const NAMESPACE: Uuid = Uuid::from_bytes([
        0x7c, 0x21, 0x9e, 0x04, 0x5b, 0x3a, 0x47, 0xd2, 0x91, 0x6f, 0xe8, 0x0d, 0x27, 0x4a, 0x1c,
        0x95,
    ]);
    Uuid::new_v5(&NAMESPACE, fingerprint.as_bytes())
}

#[cfg(test)]
mod tests {
    use super::{Resolution, Resolver, ResolverConfig, entries_fingerprint, resolution_id};
    use crate::error::ResolveError;
    use bundlefix_types::assignment::AssignmentEntry;
    use bundlefix_types::graph::{BuildGraph, BuildTarget, TargetKind};
    use bundlefix_types::policy::ClassifyPolicy;

    fn config(main_bundle_id: &str) -> ResolverConfig {
        ResolverConfig {
            main_target: "Runner".into(),
            main_bundle_id: main_bundle_id.to_string(),
            classify: ClassifyPolicy::default(),
        }
    }

    fn resolve(graph: &BuildGraph) -> Result<Resolution, ResolveError> {
        Resolver::new(config("com.acme.app")).resolve(graph)
    }

    #[test]
    fn missing_main_target_aborts_before_allocation() {
        let graph = BuildGraph::new(vec![BuildTarget::new("Pods-Lib")]);
        let err = resolve(&graph).expect_err("missing main");
        assert!(matches!(err, ResolveError::MissingMainTarget { .. }));
    }

    #[test]
    fn malformed_main_identifier_aborts() {
        let graph = BuildGraph::new(vec![BuildTarget::new("Runner")]);
        let err = Resolver::new(config("com.acme_app"))
            .resolve(&graph)
            .expect_err("underscore");
        match err {
            ResolveError::InvalidMainIdentifier { identifier, .. } => {
                assert_eq!(identifier, "com.acme_app");
            }
            other => panic!("expected InvalidMainIdentifier, got {other:?}"),
        }
    }

    #[test]
    fn duplicate_target_ids_abort() {
        let graph = BuildGraph::new(vec![
            BuildTarget::new("Runner"),
            BuildTarget::new("Runner"),
        ]);
        let err = resolve(&graph).expect_err("duplicate");
        assert!(matches!(err, ResolveError::DuplicateTargetId { .. }));
    }

    #[test]
    fn clean_graph_resolves_with_empty_findings() {
        let graph = BuildGraph::new(vec![
            BuildTarget::new("Runner"),
            BuildTarget::new("RunnerTests"),
            BuildTarget::new("Pods-Lib"),
        ]);

        let resolution = resolve(&graph).expect("resolve");
        assert!(resolution.collisions.is_empty());
        assert!(resolution.embedding_violations.is_empty());
        assert_eq!(
            resolution.assignment.identifier_for(&"Runner".into()),
            Some("com.acme.app")
        );
        assert_eq!(
            resolution.assignment.identifier_for(&"RunnerTests".into()),
            Some("com.acme.app.tests")
        );
        assert_eq!(
            resolution.assignment.identifier_for(&"Pods-Lib".into()),
            Some("com.acme.app.framework.podslib")
        );
    }

    #[test]
    fn provenance_fields_are_deterministic() {
        let graph = BuildGraph::new(vec![
            BuildTarget::new("Runner"),
            BuildTarget::new("Pods-Lib"),
        ]);

        let first = resolve(&graph).expect("resolve");
        let second = resolve(&graph).expect("resolve");
        assert_eq!(first.assignment.fingerprint, second.assignment.fingerprint);
        assert_eq!(
            first.assignment.resolution_id,
            second.assignment.resolution_id
        );
    }

    #[test]
    fn fingerprint_tracks_entry_content() {
        let a = vec![AssignmentEntry {
            target: "Runner".into(),
            kind: TargetKind::MainApp,
            identifier: "com.acme.app".to_string(),
        }];
        let mut b = a.clone();
        b[0].identifier = "com.acme.other".to_string();

        assert_ne!(entries_fingerprint(&a), entries_fingerprint(&b));
        assert_eq!(entries_fingerprint(&a), entries_fingerprint(&a.clone()));
    }

    #[test]
    fn resolution_id_is_stable_for_a_fingerprint() {
        let id1 = resolution_id("abc");
        let id2 = resolution_id("abc");
        let id3 = resolution_id("abd");
        assert_eq!(id1, id2);
        assert_ne!(id1, id3);
    }
}
