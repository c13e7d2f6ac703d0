use bundlefix_types::graph::{TargetId, TargetKind};
use bundlefix_types::policy::ClassifyPolicy;

/// Tags each target with its role in the build graph.
///
/// Priority order: the configured main target id wins, then test patterns,
/// then extension patterns; everything else is a framework (third-party
/// pods and internal shared libraries alike). Classification is total.
#[derive(Debug, Clone)]
pub struct Classifier {
    main_target: TargetId,
    policy: ClassifyPolicy,
}

impl Classifier {
    pub fn new(main_target: TargetId, policy: ClassifyPolicy) -> Self {
        Self {
            main_target,
            policy,
        }
    }

    pub fn classify(&self, id: &TargetId) -> TargetKind {
        if *id == self.main_target {
            return TargetKind::MainApp;
        }
        if matches_any(&self.policy.test_patterns, id.as_str()) {
            return TargetKind::TestBundle;
        }
        if matches_any(&self.policy.extension_patterns, id.as_str()) {
            return TargetKind::Extension;
        }
        TargetKind::Framework
    }
}

fn matches_any(patterns: &[String], text: &str) -> bool {
    patterns.iter().any(|pat| glob_match(pat, text))
}

fn glob_match(pat: &str, text: &str) -> bool {
    let p = pat.as_bytes();
    let t = text.as_bytes();
    let mut dp = vec![vec![false; t.len() + 1]; p.len() + 1];
    dp[0][0] = true;

    for i in 1..=p.len() {
        if p[i - 1] == b'*' {
            dp[i][0] = dp[i - 1][0];
        }
    }

    for i in 1..=p.len() {
        for j in 1..=t.len() {
            dp[i][j] = match p[i - 1] {
                b'*' => dp[i - 1][j] || dp[i][j - 1],
                b'?' => dp[i - 1][j - 1],
                c => dp[i - 1][j - 1] && c == t[j - 1],
            };
        }
    }

    dp[p.len()][t.len()]
}
