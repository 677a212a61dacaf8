//! # vizeval
//!
//! Evaluation engine for generated chart specifications: scores how
//! faithfully a machine-generated declarative visualization spec (a nested
//! JSON document of data bindings, mark type, channel encodings, and design
//! attributes) reproduces a human-authored ground truth for the same
//! request.
//!
//! The engine flattens both documents into dotted property paths,
//! classifies each path into semantic categories (`DataSchema`, `Mark`,
//! `Encoding`, with `Design` as the presentational fallback), resolves
//! per-path equivalence under default-value and field-interchangeability
//! rules, and folds everything into a binary accuracy, a continuous
//! similarity, and an auditable per-property report.
//!
//! # Example
//!
//! ```
//! use serde_json::json;
//! use vizeval::{Category, Evaluator};
//!
//! let truth = json!({
//!     "mark": {"type": "bar"},
//!     "encoding": {"x": {"field": "year"}, "y": {"field": "sales"}},
//!     "title": {"text": "Sales by year"}
//! });
//! let generated = json!({
//!     "mark": {"type": "bar"},
//!     "encoding": {"x": {"field": "year"}, "y": {"field": "sales"}}
//! });
//!
//! let result = Evaluator::default().evaluate(&generated, &truth).unwrap();
//! assert_eq!(result.accuracy, 1);          // all critical properties match
//! assert!(result.similarity < 1.0);        // the missing title costs similarity
//! assert_eq!(result.category_matches[&Category::Mark].matched, 1);
//! ```
//!
//! # Scoring
//!
//! - `accuracy` is the strict conjunction over the critical categories:
//!   every `Mark`, `Encoding`, and `DataSchema` property must match (an
//!   empty category counts as matched);
//! - `similarity` is `0.98 ^ n` for `n` unmatched `Design` properties.
//!
//! Rule tables are injectable: see [`rules::RuleConfig`] and
//! [`rules::RuleConfig::merged`] for building overrides on top of the
//! built-in Vega-Lite-shaped defaults. The engine is purely functional
//! (no I/O, no shared mutable state), so batches parallelize trivially.

#![warn(missing_docs)]

pub mod abstraction;
pub mod classify;
pub mod error;
pub mod evaluate;
pub mod flatten;
pub mod report;
pub mod resolve;
pub mod rules;

pub use abstraction::{abstract_properties, AbstractProperty};
pub use error::{Error, Result};
pub use evaluate::{
    CategoryTally, ComparisonDetail, EvaluationResult, Evaluator, SIMILARITY_DECAY,
};
pub use flatten::{flatten, flatten_filtered, FlatSpec};
pub use report::BatchSummary;
pub use resolve::Resolver;
pub use rules::{Category, RuleConfig, RuleOverrides};
