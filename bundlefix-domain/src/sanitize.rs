/// Fragment substituted when sanitization strips a name to nothing.
pub const FALLBACK_FRAGMENT: &str = "framework";

/// Normalizes an arbitrary target name into a legal identifier fragment.
///
/// Lowercases the input and drops every character outside `[a-z0-9]`.
/// Underscores and hyphens are always stripped so that repeated runs
/// converge regardless of how upstream tooling normalized the name.
/// Never fails: an empty result falls back to [`FALLBACK_FRAGMENT`].
pub fn sanitize_fragment(raw: &str) -> String {
    let fragment: String = raw
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
        .collect();

    if fragment.is_empty() {
        FALLBACK_FRAGMENT.to_string()
    } else {
        fragment
    }
}

#[cfg(test)]
mod tests {
    use super::{FALLBACK_FRAGMENT, sanitize_fragment};

    #[test]
    fn strips_underscores() {
        assert_eq!(sanitize_fragment("connectivity_plus"), "connectivityplus");
    }

    #[test]
    fn empty_input_falls_back() {
        assert_eq!(sanitize_fragment(""), FALLBACK_FRAGMENT);
    }

    #[test]
    fn mixed_separators_and_case() {
        assert_eq!(sanitize_fragment("A-B_C 1"), "abc1");
    }

    #[test]
    fn all_symbols_fall_back() {
        assert_eq!(sanitize_fragment("---___..."), FALLBACK_FRAGMENT);
    }

    #[test]
    fn non_ascii_is_dropped() {
        assert_eq!(sanitize_fragment("Péz-Kit"), "pzkit");
    }

    #[test]
    fn digits_survive() {
        assert_eq!(sanitize_fragment("Pods-GTMSessionFetcher2"), "podsgtmsessionfetcher2");
    }
}
