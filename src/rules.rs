//! Category definitions and the injectable rule configuration.
//!
//! The classifier and resolver are driven entirely by a [`RuleConfig`]:
//! per-category canonical path patterns plus a table of implicit default
//! values for optional properties. A built-in configuration covers the
//! standard Vega-Lite-shaped specification layout; callers with a settings
//! surface can deserialize a stored configuration or build one on top of
//! the defaults with [`RuleConfig::merged`]. Configuration is always passed
//! in by value or reference; the engine holds no mutable global state.

use crate::{Error, Result};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

/// Semantic category of a specification property.
///
/// `Mark`, `Encoding`, and `DataSchema` are the *critical* categories: any
/// mismatch in them zeroes the binary accuracy of an evaluation. `Design`
/// is the fallback for everything else (titles, sizing, axis styling, ...);
/// its mismatches only decay the continuous similarity score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Category {
    /// Which data fields the chart binds (e.g. `encoding.x.field`).
    DataSchema,
    /// The mark type and its direct properties (e.g. `mark.type`).
    Mark,
    /// Channel encodings: what is mapped to x, y, color, and so on.
    Encoding,
    /// Presentational properties; the non-critical fallback category.
    Design,
}

impl Category {
    /// All categories, in declaration order.
    pub const ALL: [Category; 4] = [
        Category::DataSchema,
        Category::Mark,
        Category::Encoding,
        Category::Design,
    ];

    /// The critical categories: a mismatch in any of them zeroes accuracy.
    pub const CRITICAL: [Category; 3] = [Category::Mark, Category::Encoding, Category::DataSchema];

    /// Canonical string name, as used in serialized reports.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::DataSchema => "DataSchema",
            Category::Mark => "Mark",
            Category::Encoding => "Encoding",
            Category::Design => "Design",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Rule configuration driving classification and default-value resolution.
///
/// `patterns` maps each explicitly-ruled category to its ordered list of
/// canonical path patterns (see [`crate::classify::path_matches`] for the
/// two-directional prefix semantics). `Design` never appears here: it is
/// the implicit fallback for paths matching no pattern at all.
///
/// `defaults` maps a property path to the value an *omitted* property is
/// understood to carry, so that one side omitting the property and the
/// other side spelling out the default still compare equal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleConfig {
    /// Canonical path patterns per category (critical categories only).
    pub patterns: BTreeMap<Category, Vec<String>>,
    /// Implicit default values for optional properties.
    pub defaults: BTreeMap<String, Value>,
}

/// Partial override set for [`RuleConfig::merged`].
///
/// A category present in `patterns` replaces that category's built-in list
/// wholesale; entries in `defaults` are inserted over the built-in table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RuleOverrides {
    /// Replacement pattern lists, keyed by category.
    #[serde(default)]
    pub patterns: BTreeMap<Category, Vec<String>>,
    /// Additional or replacement default-value entries.
    #[serde(default)]
    pub defaults: BTreeMap<String, Value>,
}

static BUILTIN: Lazy<RuleConfig> = Lazy::new(RuleConfig::builtin_rules);

impl Default for RuleConfig {
    fn default() -> Self {
        BUILTIN.clone()
    }
}

impl RuleConfig {
    fn builtin_rules() -> Self {
        let mut patterns = BTreeMap::new();
        patterns.insert(
            Category::DataSchema,
            [
                "encoding.x.field",
                "encoding.y.field",
                "encoding.color.field",
                "encoding.size.field",
                "encoding.shape.field",
                "encoding.theta.field",
                "encoding.row.field",
                "encoding.column.field",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
        );
        patterns.insert(Category::Mark, vec!["mark".to_string()]);
        patterns.insert(Category::Encoding, vec!["encoding".to_string()]);

        let mut defaults = BTreeMap::new();
        // An omitted tooltip flag means "no hover tooltip"; a spec spelling
        // that out explicitly must still compare equal to one omitting it.
        defaults.insert("mark.tooltip".to_string(), Value::Null);

        RuleConfig { patterns, defaults }
    }

    /// Borrow the shared built-in configuration.
    #[must_use]
    pub fn builtin() -> &'static RuleConfig {
        &BUILTIN
    }

    /// Pattern list for one category (empty for `Design` and any category
    /// without an explicit entry).
    #[must_use]
    pub fn patterns_for(&self, category: Category) -> &[String] {
        self.patterns
            .get(&category)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    /// Build a configuration from the built-in rules plus an override set.
    ///
    /// Pure: neither the built-ins nor `overrides` are mutated. Category
    /// lists replace wholesale, default-table entries insert over.
    #[must_use]
    pub fn merged(overrides: &RuleOverrides) -> RuleConfig {
        let mut config = RuleConfig::default();
        for (category, list) in &overrides.patterns {
            log::debug!(
                "rule override: {} now has {} pattern(s)",
                category,
                list.len()
            );
            config.patterns.insert(*category, list.clone());
        }
        for (path, value) in &overrides.defaults {
            config.defaults.insert(path.clone(), value.clone());
        }
        config
    }

    /// Deserialize a configuration from a JSON string.
    pub fn from_json_str(json: &str) -> Result<RuleConfig> {
        serde_json::from_str(json).map_err(|e| Error::config(e.to_string()))
    }

    /// Load a configuration from a JSON file.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<RuleConfig> {
        let content = std::fs::read_to_string(path.as_ref())?;
        RuleConfig::from_json_str(&content)
    }
}
