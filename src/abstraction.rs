//! Single-document property grouping for explanation output.
//!
//! Where the aggregator scores a *pair* of documents and may count one path
//! toward several categories, this classifier looks at one document alone
//! and files each of its properties under exactly one category, so the
//! grouping can be shown to a person (or fed to a model as an explanation
//! of what the specification contains) without double-listing anything.

use crate::classify::{abstract_category_of, display_property};
use crate::flatten::flatten;
use crate::rules::{Category, RuleConfig};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// One property of a specification, as grouped for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AbstractProperty {
    /// Property path, normalized per its category.
    pub property: String,
    /// The leaf value at that path.
    pub value: Value,
}

/// Group one specification's properties by category.
///
/// Properties outside the abstraction scope (paths not rooted at a
/// visualization namespace and mentioning neither axis nor legend) are
/// omitted; each admitted property appears under exactly one category.
/// Categories collecting nothing are absent from the returned map.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use vizeval::rules::{Category, RuleConfig};
/// use vizeval::abstraction::abstract_properties;
///
/// let doc = json!({"mark": {"type": "bar"}, "encoding": {"x": {"field": "year"}}});
/// let grouped = abstract_properties(&doc, RuleConfig::builtin());
/// assert_eq!(grouped[&Category::Mark][0].property, "mark.type");
/// assert_eq!(grouped[&Category::DataSchema][0].property, "x.field");
/// ```
#[must_use]
pub fn abstract_properties(
    doc: &Value,
    config: &RuleConfig,
) -> BTreeMap<Category, Vec<AbstractProperty>> {
    let mut grouped: BTreeMap<Category, Vec<AbstractProperty>> = BTreeMap::new();
    for (path, value) in flatten(doc) {
        if let Some(category) = abstract_category_of(&path, config) {
            grouped.entry(category).or_default().push(AbstractProperty {
                property: display_property(&path, category),
                value,
            });
        }
    }
    grouped
}
