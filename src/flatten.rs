//! Specification flattening: nested documents to dotted property paths.
//!
//! A specification document is an arbitrarily nested JSON object. Flattening
//! turns it into a flat map from dot-joined property path to leaf value,
//! e.g. `{"encoding": {"x": {"field": "a"}}}` becomes
//! `{"encoding.x.field": "a"}`.
//!
//! Only keyed mappings are descended into. Scalars, nulls, and arrays are
//! leaves; arrays in particular are treated as opaque values and never
//! decomposed, so `encoding.tooltip` holding a list of field refs is one
//! comparable property.

use serde_json::Value;
use std::collections::BTreeMap;

/// A flattened specification: dotted property path to leaf value.
///
/// `BTreeMap` keeps iteration in path order, which keeps every downstream
/// report deterministic.
pub type FlatSpec = BTreeMap<String, Value>;

/// Path segments whose subtrees never take part in comparison: the schema
/// identifier and the inline data payload.
pub const RESERVED_ROOTS: [&str; 2] = ["$schema", "data"];

/// Flatten a document into a path → leaf-value map.
///
/// The empty document flattens to an empty map. A non-object document also
/// flattens to an empty map; callers validate document shape before
/// flattening, so the top level here is expected to be an object.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use vizeval::flatten::flatten;
///
/// let doc = json!({"mark": {"type": "bar"}, "width": 400});
/// let flat = flatten(&doc);
/// assert_eq!(flat["mark.type"], json!("bar"));
/// assert_eq!(flat["width"], json!(400));
/// assert_eq!(flat.len(), 2);
/// ```
#[must_use]
pub fn flatten(doc: &Value) -> FlatSpec {
    let mut out = FlatSpec::new();
    if let Some(map) = doc.as_object() {
        for (key, value) in map {
            flatten_into(key.clone(), value, &mut out);
        }
    }
    out
}

fn flatten_into(path: String, value: &Value, out: &mut FlatSpec) {
    match value.as_object() {
        Some(map) => {
            for (key, child) in map {
                flatten_into(format!("{path}.{key}"), child, out);
            }
        }
        // Scalars, nulls, and arrays are leaves.
        None => {
            out.insert(path, value.clone());
        }
    }
}

/// Whether a flattened path is excluded from comparison.
///
/// Two exclusions apply, identically to both documents of a pair:
/// - the first segment is a reserved structural root (`$schema`, `data`);
/// - the path is a three-segment `encoding.<channel>.type` leaf, which is
///   redundant with the field's own categorization and would double-count.
#[must_use]
pub fn is_excluded(path: &str) -> bool {
    let segs: Vec<&str> = path.split('.').collect();
    if RESERVED_ROOTS.contains(&segs[0]) {
        return true;
    }
    segs.len() == 3 && segs[0] == "encoding" && segs[2] == "type"
}

/// Flatten a document and drop excluded paths.
#[must_use]
pub fn flatten_filtered(doc: &Value) -> FlatSpec {
    let mut flat = flatten(doc);
    flat.retain(|path, _| !is_excluded(path));
    flat
}
