//! Evaluation aggregator: drives a full specification comparison.
//!
//! Given a (generated, ground truth) document pair, the [`Evaluator`]
//! flattens both sides, filters reserved paths, walks the union of the
//! surviving property paths, scores each path once per category it counts
//! toward, and folds the outcomes into an [`EvaluationResult`]:
//!
//! - `accuracy`: 1 only when every critical category (`Mark`, `Encoding`,
//!   `DataSchema`) is fully matched; a single missed critical property
//!   zeroes the sample;
//! - `similarity`: `0.98 ^ unmatched_design`, a geometric decay per
//!   unmatched presentational property, never reaching zero;
//! - `details`: one deduplicated record per (property, category),
//!   sorted by category name then property path;
//! - `category_matches`: monotone matched/total tallies per category.
//!
//! Malformed input degrades to `None`, never to a panic, so a batch run can
//! continue past individual bad samples.

use crate::classify::{categories_of, display_property, is_field_binding};
use crate::flatten::flatten_filtered;
use crate::resolve::Resolver;
use crate::rules::{Category, RuleConfig};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::btree_map::Entry;
use std::collections::{BTreeMap, BTreeSet};

/// Decay base for the similarity score: each unmatched `Design` property
/// multiplies similarity by this factor.
pub const SIMILARITY_DECAY: f64 = 0.98;

/// One per-property comparison outcome.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonDetail {
    /// Property path, as reported under `category` (see
    /// [`display_property`] for the `DataSchema` normalization).
    pub property: String,
    /// Category this outcome was scored under.
    pub category: Category,
    /// Whether the two sides were equivalent at this property.
    pub matched: bool,
    /// Ground-truth value, if present at this path.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ground_truth_value: Option<Value>,
    /// Generated value, if present at this path.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generated_value: Option<Value>,
}

/// Matched/total counters for one category. Monotone: only ever
/// incremented during an evaluation pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryTally {
    /// Properties that compared equivalent.
    pub matched: usize,
    /// Properties compared.
    pub total: usize,
}

impl CategoryTally {
    fn record(&mut self, matched: bool) {
        self.total += 1;
        if matched {
            self.matched += 1;
        }
    }

    /// Whether every compared property matched. An empty tally counts as
    /// fully matched.
    #[must_use]
    pub fn is_fully_matched(&self) -> bool {
        self.matched == self.total
    }
}

/// The outcome of one specification comparison.
///
/// Immutable once returned; re-run the evaluation to refresh it.
/// Serializes to JSON for downstream reporting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluationResult {
    /// 1 when all critical categories are fully matched, else 0.
    pub accuracy: u8,
    /// Geometric similarity in `(0, 1]`, decayed per unmatched `Design`
    /// property.
    pub similarity: f64,
    /// Deduplicated per-property outcomes, sorted by (category name,
    /// property path).
    pub details: Vec<ComparisonDetail>,
    /// Per-category matched/total tallies; every category is present.
    pub category_matches: BTreeMap<Category, CategoryTally>,
}

/// Specification comparison engine.
///
/// Holds the rule configuration for its lifetime; every call to
/// [`Evaluator::evaluate`] is an independent pure computation, so one
/// evaluator can score any number of samples, from any number of threads.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use vizeval::Evaluator;
///
/// let evaluator = Evaluator::default();
/// let truth = json!({"mark": {"type": "bar"}, "encoding": {"x": {"field": "year"}}});
/// let result = evaluator.evaluate(&truth.clone(), &truth).unwrap();
/// assert_eq!(result.accuracy, 1);
/// assert_eq!(result.similarity, 1.0);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Evaluator {
    config: RuleConfig,
}

impl Evaluator {
    /// Create an evaluator with an explicit rule configuration.
    #[must_use]
    pub fn new(config: RuleConfig) -> Self {
        Evaluator { config }
    }

    /// The rule configuration in force.
    #[must_use]
    pub fn config(&self) -> &RuleConfig {
        &self.config
    }

    /// Compare a generated specification against its ground truth.
    ///
    /// Returns `None` when either document is not a keyed object; data
    /// irregularities below the top level degrade to per-property
    /// mismatches instead.
    #[must_use]
    pub fn evaluate(&self, generated: &Value, ground_truth: &Value) -> Option<EvaluationResult> {
        if !generated.is_object() || !ground_truth.is_object() {
            log::warn!("evaluation skipped: document is not a keyed object");
            return None;
        }

        let generated = flatten_filtered(generated);
        let truth = flatten_filtered(ground_truth);
        let resolver = Resolver::new(&generated, &truth, &self.config);

        // Union of surviving paths; paths present on neither side never
        // appear, so the both-absent case is filtered out by construction.
        let paths: BTreeSet<&String> = generated.keys().chain(truth.keys()).collect();

        let mut tallies: BTreeMap<Category, CategoryTally> = Category::ALL
            .iter()
            .map(|c| (*c, CategoryTally::default()))
            .collect();
        let mut raw_details = Vec::new();

        for path in paths {
            for category in categories_of(path, &self.config) {
                let matched = if category == Category::DataSchema && is_field_binding(path) {
                    resolver.equivalent_with_interchange(path)
                } else {
                    resolver.equivalent(path)
                };
                if let Some(tally) = tallies.get_mut(&category) {
                    tally.record(matched);
                }
                raw_details.push(ComparisonDetail {
                    property: display_property(path, category),
                    category,
                    matched,
                    ground_truth_value: truth.get(path).cloned(),
                    generated_value: generated.get(path).cloned(),
                });
            }
        }

        let mut details = dedup_details(raw_details);
        details.sort_by(|a, b| {
            a.category
                .as_str()
                .cmp(b.category.as_str())
                .then_with(|| a.property.cmp(&b.property))
        });

        let accuracy = Category::CRITICAL
            .iter()
            .all(|c| tallies[c].is_fully_matched()) as u8;
        let design = tallies[&Category::Design];
        let similarity = SIMILARITY_DECAY.powi((design.total - design.matched) as i32);

        Some(EvaluationResult {
            accuracy,
            similarity,
            details,
            category_matches: tallies,
        })
    }

    /// Parse a generated specification from JSON text, then evaluate.
    ///
    /// A parse failure is an expected outcome for model output, reported as
    /// `None` (and logged), never as a panic.
    #[must_use]
    pub fn evaluate_json_str(&self, generated: &str, ground_truth: &Value) -> Option<EvaluationResult> {
        match serde_json::from_str::<Value>(generated) {
            Ok(doc) => self.evaluate(&doc, ground_truth),
            Err(err) => {
                log::warn!("generated specification failed to parse: {err}");
                None
            }
        }
    }
}

/// Collapse duplicate detail records.
///
/// Byte-identical duplicates collapse silently. Conflicting records for
/// the same (property, category) pair collapse to the first record with
/// `matched` forced `false`: a specification carrying redundant,
/// disagreeing entries for one property is penalized, not double-reported.
/// Tallies are accumulated before this step and are never decremented.
fn dedup_details(raw: Vec<ComparisonDetail>) -> Vec<ComparisonDetail> {
    let mut index: BTreeMap<(String, Category), usize> = BTreeMap::new();
    let mut deduped: Vec<ComparisonDetail> = Vec::new();
    for detail in raw {
        match index.entry((detail.property.clone(), detail.category)) {
            Entry::Vacant(slot) => {
                slot.insert(deduped.len());
                deduped.push(detail);
            }
            Entry::Occupied(slot) => {
                let first = &mut deduped[*slot.get()];
                if *first != detail {
                    first.matched = false;
                }
            }
        }
    }
    deduped
}
