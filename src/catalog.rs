//! The HTML5 table of URL-valued attributes.
//!
//! Each rule names an attribute, the elements on which it carries a URL, and
//! whether an empty value still counts as a link. An empty `href` on an
//! anchor points at the document itself, while an empty `src` on an image
//! points at nothing, so the two are kept in separate policy classes.
//!
//! Lookups are keyed on the (attribute, element) pair: `href` is a link on
//! `a` and on `link`, but with different policies, and no link at all on `p`.

/// Whether an attribute value that is empty after whitespace stripping is
/// still treated as a link.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EmptyPolicy {
    /// Empty values resolve to the base URL and are kept.
    AllowEmpty,
    /// Empty values are discarded.
    RequireNonEmpty,
}

impl EmptyPolicy {
    /// Check whether a stripped attribute value passes this policy.
    pub fn admits(self, stripped: &str) -> bool {
        match self {
            EmptyPolicy::AllowEmpty => true,
            EmptyPolicy::RequireNonEmpty => !stripped.is_empty(),
        }
    }
}

/// One row of the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UrlAttributeRule {
    pub attribute: &'static str,
    pub elements: &'static [&'static str],
    pub policy: EmptyPolicy,
}

const fn rule(
    attribute: &'static str,
    elements: &'static [&'static str],
    policy: EmptyPolicy,
) -> UrlAttributeRule {
    UrlAttributeRule {
        attribute,
        elements,
        policy,
    }
}

/// Every URL-valued (attribute, element) pair recognised by HTML5.
pub static URL_ATTRIBUTES: &[UrlAttributeRule] = &[
    rule(
        "cite",
        &["blockquote", "del", "ins", "q"],
        EmptyPolicy::AllowEmpty,
    ),
    rule("href", &["a", "area", "base"], EmptyPolicy::AllowEmpty),
    rule("action", &["form"], EmptyPolicy::RequireNonEmpty),
    rule("data", &["object"], EmptyPolicy::RequireNonEmpty),
    rule(
        "formaction",
        &["button", "input"],
        EmptyPolicy::RequireNonEmpty,
    ),
    rule("href", &["link"], EmptyPolicy::RequireNonEmpty),
    rule("manifest", &["html"], EmptyPolicy::RequireNonEmpty),
    rule("poster", &["video"], EmptyPolicy::RequireNonEmpty),
    rule(
        "src",
        &[
            "audio", "embed", "iframe", "img", "input", "script", "source", "track", "video",
        ],
        EmptyPolicy::RequireNonEmpty,
    ),
];

/// The distinct attribute names in [`URL_ATTRIBUTES`], used as the single
/// filter when querying a tree.
pub static URL_ATTRIBUTE_NAMES: &[&str] = &[
    "cite",
    "href",
    "action",
    "data",
    "formaction",
    "manifest",
    "poster",
    "src",
];

/// Look up the policy for an attribute on a given element.
///
/// Returns `None` when the pair is not URL-valued, e.g. `href` on `p`.
/// Names are compared ASCII case-insensitively.
///
/// ```
/// use linkscan::catalog::{url_attribute, EmptyPolicy};
///
/// assert_eq!(url_attribute("href", "a"), Some(EmptyPolicy::AllowEmpty));
/// assert_eq!(url_attribute("href", "link"), Some(EmptyPolicy::RequireNonEmpty));
/// assert_eq!(url_attribute("href", "p"), None);
/// ```
pub fn url_attribute(attribute: &str, element: &str) -> Option<EmptyPolicy> {
    URL_ATTRIBUTES
        .iter()
        .find(|rule| {
            rule.attribute.eq_ignore_ascii_case(attribute)
                && rule
                    .elements
                    .iter()
                    .any(|e| e.eq_ignore_ascii_case(element))
        })
        .map(|rule| rule.policy)
}

#[cfg(test)]
mod tests {
    use std::collections::{HashMap, HashSet};

    use super::*;

    #[test]
    fn test_href_policy_depends_on_element() {
        assert_eq!(url_attribute("href", "a"), Some(EmptyPolicy::AllowEmpty));
        assert_eq!(url_attribute("href", "area"), Some(EmptyPolicy::AllowEmpty));
        assert_eq!(url_attribute("href", "base"), Some(EmptyPolicy::AllowEmpty));
        assert_eq!(
            url_attribute("href", "link"),
            Some(EmptyPolicy::RequireNonEmpty)
        );
    }

    #[test]
    fn test_mismatched_pairs_are_not_applicable() {
        assert_eq!(url_attribute("href", "p"), None);
        assert_eq!(url_attribute("src", "a"), None);
        assert_eq!(url_attribute("cite", "blockquote2"), None);
        assert_eq!(url_attribute("class", "div"), None);
    }

    #[test]
    fn test_lookup_ignores_ascii_case() {
        assert_eq!(
            url_attribute("SRC", "IMG"),
            Some(EmptyPolicy::RequireNonEmpty)
        );
        assert_eq!(url_attribute("FormAction", "Button"), Some(EmptyPolicy::RequireNonEmpty));
    }

    #[test]
    fn test_every_row_is_reachable() {
        for rule in URL_ATTRIBUTES {
            for element in rule.elements {
                assert_eq!(
                    url_attribute(rule.attribute, element),
                    Some(rule.policy),
                    "{}@{}",
                    rule.attribute,
                    element
                );
            }
        }
    }

    #[test]
    fn test_no_pair_has_conflicting_policies() {
        let mut seen: HashMap<(&str, &str), EmptyPolicy> = HashMap::new();
        for rule in URL_ATTRIBUTES {
            for element in rule.elements {
                if let Some(previous) = seen.insert((rule.attribute, *element), rule.policy) {
                    panic!(
                        "{}@{} listed twice ({:?} and {:?})",
                        rule.attribute, element, previous, rule.policy
                    );
                }
            }
        }
    }

    #[test]
    fn test_attribute_names_match_table() {
        let from_table: HashSet<&str> = URL_ATTRIBUTES.iter().map(|r| r.attribute).collect();
        let listed: HashSet<&str> = URL_ATTRIBUTE_NAMES.iter().copied().collect();
        assert_eq!(from_table, listed);
        assert_eq!(listed.len(), URL_ATTRIBUTE_NAMES.len(), "names must be distinct");
    }

    #[test]
    fn test_policy_admits() {
        assert!(EmptyPolicy::AllowEmpty.admits(""));
        assert!(EmptyPolicy::AllowEmpty.admits("x"));
        assert!(!EmptyPolicy::RequireNonEmpty.admits(""));
        assert!(EmptyPolicy::RequireNonEmpty.admits("x"));
    }
}
