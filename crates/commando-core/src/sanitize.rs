// ── Filename sanitization ──

use std::sync::LazyLock;

use regex::Regex;

static UNSAFE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^0-9A-Za-z._\-]+").expect("static pattern is valid"));

/// Make `s` safe to use as a file name or extension.
///
/// Quotes and commas are dropped, surrounding whitespace is trimmed, and
/// every run of characters outside `[0-9A-Za-z._-]` becomes a single `-`.
/// The result is stable under repeated application.
pub fn sanitize_file_name(s: &str) -> String {
    let stripped: String = s
        .chars()
        .filter(|c| !matches!(c, '"' | '\'' | ','))
        .collect();

    UNSAFE_RUN.replace_all(stripped.trim(), "-").into_owned()
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn spaces_become_hyphens() {
        assert_eq!(sanitize_file_name("show ver"), "show-ver");
    }

    #[test]
    fn runs_collapse_to_one_hyphen() {
        assert_eq!(
            sanitize_file_name("show interfaces | include up/down"),
            "show-interfaces-include-up-down"
        );
    }

    #[test]
    fn quotes_and_commas_are_removed() {
        assert_eq!(
            sanitize_file_name(r#"show run | section "router bgp", 'x'"#),
            "show-run-section-router-bgp-x"
        );
    }

    #[test]
    fn surrounding_whitespace_is_trimmed() {
        assert_eq!(sanitize_file_name("  show clock \t"), "show-clock");
    }

    #[test]
    fn safe_characters_are_kept() {
        assert_eq!(sanitize_file_name("cfg_v1.2-final.txt"), "cfg_v1.2-final.txt");
    }

    #[test]
    fn extension_like_input() {
        assert_eq!(sanitize_file_name(".txt"), ".txt");
        assert_eq!(sanitize_file_name("t x t"), "t-x-t");
    }

    #[test]
    fn empty_input_stays_empty() {
        assert_eq!(sanitize_file_name(""), "");
        assert_eq!(sanitize_file_name(" \"', "), "");
    }

    proptest! {
        #[test]
        fn sanitize_is_idempotent(s in any::<String>()) {
            let once = sanitize_file_name(&s);
            prop_assert_eq!(sanitize_file_name(&once), once);
        }

        #[test]
        fn output_uses_only_safe_characters(s in any::<String>()) {
            let out = sanitize_file_name(&s);
            prop_assert!(
                out.chars().all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-')),
                "unsafe output: {:?}", out
            );
        }
    }
}
