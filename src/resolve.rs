//! Value equivalence between the two sides of a comparison.
//!
//! Three rules, in order:
//! - both sides present: structural deep equality, independent of object
//!   key order (never a serialized-text comparison);
//! - exactly one side present: equal only if the path has a known implicit
//!   default and the present value equals that default;
//! - field bindings under `DataSchema`: a failed direct comparison falls
//!   back to the interchangeability search: the same data field bound to a
//!   different channel on the other side still counts as a match.

use crate::classify::is_field_binding;
use crate::flatten::FlatSpec;
use crate::rules::RuleConfig;
use serde_json::Value;

/// Per-evaluation equivalence resolver.
///
/// Borrows both flattened documents for the duration of one evaluation so
/// the interchangeability rule can search peer field bindings. Construction
/// is free; all methods are pure.
pub struct Resolver<'a> {
    generated: &'a FlatSpec,
    ground_truth: &'a FlatSpec,
    config: &'a RuleConfig,
}

impl<'a> Resolver<'a> {
    /// Create a resolver over one (generated, ground truth) pair.
    pub fn new(generated: &'a FlatSpec, ground_truth: &'a FlatSpec, config: &'a RuleConfig) -> Self {
        Resolver {
            generated,
            ground_truth,
            config,
        }
    }

    /// Direct equivalence at `path`: structural equality when both present,
    /// default-table comparison when one side is absent.
    ///
    /// Callers filter out both-absent paths before resolving; that case
    /// reports a mismatch here rather than panicking.
    #[must_use]
    pub fn equivalent(&self, path: &str) -> bool {
        match (self.ground_truth.get(path), self.generated.get(path)) {
            (Some(truth), Some(generated)) => truth == generated,
            (Some(present), None) | (None, Some(present)) => self.matches_default(path, present),
            (None, None) => {
                debug_assert!(false, "resolver invoked on a path absent from both sides");
                false
            }
        }
    }

    /// Equivalence with the field-interchangeability fallback, used only
    /// for field-binding paths scored under `DataSchema`.
    #[must_use]
    pub fn equivalent_with_interchange(&self, path: &str) -> bool {
        if self.equivalent(path) {
            return true;
        }
        is_field_binding(path) && self.field_interchange(path)
    }

    fn matches_default(&self, path: &str, present: &Value) -> bool {
        self.config
            .defaults
            .get(path)
            .map_or(false, |default| default == present)
    }

    /// Search for the reference value among the other document's *other*
    /// field bindings.
    ///
    /// The pivot is asymmetric: when the ground truth binds a field at
    /// `path`, that value is searched for among the generated document's
    /// field bindings; only a ground-truth-absent path pivots the other way
    /// around. A hit means the same data field survived on a different
    /// channel.
    fn field_interchange(&self, path: &str) -> bool {
        let (pivot, pool) = match (self.ground_truth.get(path), self.generated.get(path)) {
            (Some(value), _) => (value, self.generated),
            (None, Some(value)) => (value, self.ground_truth),
            (None, None) => return false,
        };
        pool.iter()
            .any(|(peer, value)| peer != path && is_field_binding(peer) && value == pivot)
    }
}
