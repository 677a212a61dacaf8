//! Batch aggregation over many evaluation results.
//!
//! The engine scores one sample at a time; reporting layers display
//! statistics over a whole benchmark run. [`BatchSummary`] is the pure fold
//! those layers consume: overall accuracy rate, mean similarity, and summed
//! per-category tallies.

use crate::evaluate::{CategoryTally, EvaluationResult};
use crate::rules::Category;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Aggregate statistics over one batch of evaluations.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchSummary {
    /// Samples that produced a result.
    pub samples: usize,
    /// Samples skipped by the caller (missing ground truth, parse failure).
    pub skipped: usize,
    /// Fraction of evaluated samples with accuracy 1.
    pub accuracy_rate: f64,
    /// Mean similarity over evaluated samples.
    pub mean_similarity: f64,
    /// Per-category tallies summed over the batch.
    pub per_category: BTreeMap<Category, CategoryTally>,
}

impl BatchSummary {
    /// Fold a batch of results into summary statistics.
    ///
    /// An empty batch yields zero rates rather than NaN.
    #[must_use]
    pub fn from_results(results: &[EvaluationResult]) -> Self {
        let samples = results.len();
        let mut per_category: BTreeMap<Category, CategoryTally> = Category::ALL
            .iter()
            .map(|c| (*c, CategoryTally::default()))
            .collect();
        let mut accurate = 0usize;
        let mut similarity_sum = 0.0;

        for result in results {
            accurate += usize::from(result.accuracy == 1);
            similarity_sum += result.similarity;
            for (category, tally) in &result.category_matches {
                if let Some(sum) = per_category.get_mut(category) {
                    sum.matched += tally.matched;
                    sum.total += tally.total;
                }
            }
        }

        let (accuracy_rate, mean_similarity) = if samples == 0 {
            (0.0, 0.0)
        } else {
            (accurate as f64 / samples as f64, similarity_sum / samples as f64)
        };

        BatchSummary {
            samples,
            skipped: 0,
            accuracy_rate,
            mean_similarity,
            per_category,
        }
    }

    /// Record samples that never reached the evaluator.
    #[must_use]
    pub fn with_skipped(mut self, skipped: usize) -> Self {
        self.skipped = skipped;
        self
    }
}
