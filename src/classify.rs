//! Path classification against the category rule tables.
//!
//! A property path belongs to a category when any of the category's
//! canonical patterns matches it under a *two-directional* prefix check:
//! the pattern may be a prefix of the path (a short pattern like `mark`
//! claims every concrete `mark.*` leaf) or the path may be a prefix of the
//! pattern (a shallow concrete path like `encoding.x` still counts toward a
//! deeper canonical pattern like `encoding.x.field`). Matching is always
//! segment-wise: `mark` matches `mark.type` but never `markers`.
//!
//! Classification for scoring is multi-valued: one path may count toward
//! several categories and is tallied once per membership. The abstraction
//! variant used for display grouping is single-valued instead; see
//! [`abstract_category_of`].

use crate::rules::{Category, RuleConfig};

/// Root namespaces considered by the abstraction classifier.
const ABSTRACT_ROOTS: [&str; 4] = ["mark", "encoding", "title", "sizing"];

/// Segment-wise check that `shorter` is a dotted-path prefix of `longer`.
fn is_segment_prefix(shorter: &str, longer: &str) -> bool {
    if shorter == longer {
        return true;
    }
    longer.starts_with(shorter) && longer.as_bytes().get(shorter.len()) == Some(&b'.')
}

/// Two-directional prefix match between a canonical pattern and a path.
///
/// # Examples
///
/// ```
/// use vizeval::classify::path_matches;
///
/// assert!(path_matches("mark", "mark.type"));
/// assert!(path_matches("encoding.x.field", "encoding.x"));
/// assert!(path_matches("mark", "mark"));
/// assert!(!path_matches("mark", "markers"));
/// ```
#[must_use]
pub fn path_matches(pattern: &str, path: &str) -> bool {
    is_segment_prefix(pattern, path) || is_segment_prefix(path, pattern)
}

/// Whether a path is an encoding channel's field binding:
/// exactly three segments, rooted at `encoding`, ending in `field`.
#[must_use]
pub fn is_field_binding(path: &str) -> bool {
    let segs: Vec<&str> = path.split('.').collect();
    segs.len() == 3 && segs[0] == "encoding" && segs[2] == "field"
}

/// All categories a path counts toward, in rule-table order.
///
/// A path matching none of the explicitly-ruled categories falls back to
/// `Design`; the returned list is never empty.
#[must_use]
pub fn categories_of(path: &str, config: &RuleConfig) -> Vec<Category> {
    let mut matched = Vec::new();
    for category in [Category::DataSchema, Category::Mark, Category::Encoding] {
        let hit = config
            .patterns_for(category)
            .iter()
            .any(|pattern| path_matches(pattern, path));
        if hit {
            matched.push(category);
        }
    }
    if matched.is_empty() {
        matched.push(Category::Design);
    }
    matched
}

/// The property name a path is reported under for a given category.
///
/// `DataSchema` reports drop the `encoding.` prefix (the schema concern is
/// *which field*, not which channel carries it): `encoding.x.field` is
/// reported as `x.field` under `DataSchema` while staying
/// `encoding.x.field` under `Encoding`.
#[must_use]
pub fn display_property(path: &str, category: Category) -> String {
    if category == Category::DataSchema {
        if let Some(stripped) = path.strip_prefix("encoding.") {
            return stripped.to_string();
        }
    }
    path.to_string()
}

/// Single-valued classification for display grouping.
///
/// Restricted to paths rooted at one of the visualization's top-level
/// namespaces (`mark`, `encoding`, `title`, `sizing`) or mentioning an
/// `axis`/`legend` fragment; three-segment `encoding.<channel>.type`
/// leaves are excluded outright. Within the restriction, the first match
/// among `DataSchema`, `Mark`, `Encoding` wins, else `Design`; a path is
/// never grouped under more than one category.
#[must_use]
pub fn abstract_category_of(path: &str, config: &RuleConfig) -> Option<Category> {
    let segs: Vec<&str> = path.split('.').collect();
    if segs.len() == 3 && segs[0] == "encoding" && segs[2] == "type" {
        return None;
    }
    let in_namespace = ABSTRACT_ROOTS.contains(&segs[0]);
    let mentions_guide = path.contains("axis") || path.contains("legend");
    if !in_namespace && !mentions_guide {
        return None;
    }
    Some(
        categories_of(path, config)
            .into_iter()
            .next()
            .unwrap_or(Category::Design),
    )
}
