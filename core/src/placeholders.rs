//! `:name` placeholder substitution in URL templates.

use std::collections::{BTreeMap, BTreeSet};

/// Placeholder name → replacement value.
pub type PlaceholderMap = BTreeMap<String, String>;

/// Replace `/:name` tokens in `url` with the matching placeholder values.
///
/// Returns an empty string unless both `url` and `placeholders` are given
/// and the url is non-empty. The template is scanned once: at each `/:` the
/// longest key that follows is replaced with its value verbatim (the value
/// carries its own leading slash). Only the first occurrence of each key is
/// replaced, inserted values are never scanned again, and tokens with no
/// matching key stay literal.
pub fn replace_placeholders(url: Option<&str>, placeholders: Option<&PlaceholderMap>) -> String {
    let (Some(url), Some(placeholders)) = (url, placeholders) else {
        return String::new();
    };
    if url.is_empty() {
        return String::new();
    }

    let mut used = BTreeSet::new();
    let mut resolved = String::with_capacity(url.len());
    let mut rest = url;
    while let Some(pos) = rest.find("/:") {
        resolved.push_str(&rest[..pos]);
        let after = &rest[pos + 2..];
        let longest = placeholders
            .iter()
            .filter(|(name, _)| !name.is_empty() && after.starts_with(name.as_str()))
            .max_by_key(|(name, _)| name.len());
        match longest {
            Some((name, value)) if used.insert(name.as_str()) => {
                resolved.push_str(value);
                rest = &after[name.len()..];
            }
            _ => {
                resolved.push_str("/:");
                rest = after;
            }
        }
    }
    resolved.push_str(rest);
    resolved
}

/// True when `text` is an absolute `http://` or `https://` URL.
pub fn is_url(text: &str) -> bool {
    text.starts_with("http://") || text.starts_with("https://")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(pairs: &[(&str, &str)]) -> PlaceholderMap {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn missing_url_yields_empty_string() {
        assert_eq!(replace_placeholders(None, Some(&PlaceholderMap::new())), "");
    }

    #[test]
    fn missing_placeholders_yields_empty_string() {
        assert_eq!(replace_placeholders(Some("https://x.com/:id"), None), "");
        assert_eq!(replace_placeholders(Some(""), None), "");
    }

    #[test]
    fn empty_map_leaves_url_unchanged() {
        let url = "https://google.com/search";
        assert_eq!(replace_placeholders(Some(url), Some(&PlaceholderMap::new())), url);
    }

    #[test]
    fn placeholder_is_switched_with_its_value() {
        let placeholders = map(&[("placeholder", "/search")]);
        assert_eq!(
            replace_placeholders(Some("https://google.com/:placeholder/"), Some(&placeholders)),
            "https://google.com/search/"
        );
    }

    #[test]
    fn trailing_placeholder_without_slash_is_replaced() {
        let placeholders = map(&[("id", "/42")]);
        assert_eq!(
            replace_placeholders(Some("https://x.com/users/:id"), Some(&placeholders)),
            "https://x.com/users/42"
        );
    }

    #[test]
    fn every_matching_key_is_applied() {
        let placeholders = map(&[("org", "/acme"), ("user", "/7")]);
        assert_eq!(
            replace_placeholders(Some("https://x.com/:org/users/:user"), Some(&placeholders)),
            "https://x.com/acme/users/7"
        );
    }

    #[test]
    fn only_first_occurrence_is_replaced() {
        let placeholders = map(&[("id", "/1")]);
        assert_eq!(
            replace_placeholders(Some("https://x.com/:id/:id"), Some(&placeholders)),
            "https://x.com/1/:id"
        );
    }

    #[test]
    fn overlapping_keys_match_the_longest_token() {
        let placeholders = map(&[("id", "/1"), ("idx", "/2")]);
        assert_eq!(
            replace_placeholders(Some("https://x.com/users/:idx/:id"), Some(&placeholders)),
            "https://x.com/users/2/1"
        );
    }

    #[test]
    fn inserted_values_are_not_substituted_again() {
        let placeholders = map(&[("a", "/:b"), ("b", "/x")]);
        assert_eq!(
            replace_placeholders(Some("https://x.com/:a/end"), Some(&placeholders)),
            "https://x.com/:b/end"
        );
    }

    #[test]
    fn unmatched_keys_are_ignored() {
        let placeholders = map(&[("missing", "/nope")]);
        assert_eq!(
            replace_placeholders(Some("https://x.com/static"), Some(&placeholders)),
            "https://x.com/static"
        );
    }

    #[test]
    fn is_url_checks_scheme_prefix() {
        assert!(is_url("http://google.com"));
        assert!(is_url("https://google.com"));
        assert!(!is_url("NotAnUrl"));
        assert!(!is_url("/relative/path"));
        assert!(!is_url(""));
    }
}
