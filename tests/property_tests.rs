//! Property tests for the evaluation engine.
//!
//! Random specification documents exercise determinism, the accuracy
//! conjunction law, and the geometric similarity decay.

use proptest::prelude::*;
use serde_json::{json, Map, Value};
use vizeval::{Category, Evaluator, SIMILARITY_DECAY};

/// Strategy for scalar leaf values.
fn leaf_strategy() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::from),
        (0i64..1000).prop_map(Value::from),
        "[a-z]{1,8}".prop_map(Value::from),
    ]
}

/// Strategy for small nested specification documents.
fn doc_strategy() -> impl Strategy<Value = Value> {
    let key = prop_oneof![
        Just("mark".to_string()),
        Just("encoding".to_string()),
        Just("title".to_string()),
        Just("width".to_string()),
        "[a-z]{1,6}",
    ];
    leaf_strategy()
        .prop_recursive(3, 24, 4, move |inner| {
            proptest::collection::btree_map(key.clone(), inner, 0..4).prop_map(|map| {
                Value::Object(map.into_iter().collect::<Map<String, Value>>())
            })
        })
        .prop_map(|v| if v.is_object() { v } else { json!({}) })
}

/// Build a document with `n` distinct design-only properties.
fn design_doc(n: usize) -> Value {
    let map: Map<String, Value> = (0..n)
        .map(|i| (format!("background{i}"), Value::from(i as i64)))
        .collect();
    Value::Object(map)
}

proptest! {
    #[test]
    fn evaluation_is_deterministic(generated in doc_strategy(), truth in doc_strategy()) {
        let evaluator = Evaluator::default();
        let first = evaluator.evaluate(&generated, &truth);
        let second = evaluator.evaluate(&generated, &truth);
        match (first, second) {
            (Some(a), Some(b)) => {
                prop_assert_eq!(
                    serde_json::to_string(&a).unwrap(),
                    serde_json::to_string(&b).unwrap()
                );
            }
            (None, None) => {}
            _ => prop_assert!(false, "one run evaluated, the other did not"),
        }
    }

    #[test]
    fn accuracy_is_the_critical_conjunction(generated in doc_strategy(), truth in doc_strategy()) {
        let result = Evaluator::default().evaluate(&generated, &truth).unwrap();
        let all_critical_matched = Category::CRITICAL
            .iter()
            .all(|c| result.category_matches[c].is_fully_matched());
        prop_assert_eq!(result.accuracy == 1, all_critical_matched);
    }

    #[test]
    fn tallies_bound_matched_by_total(generated in doc_strategy(), truth in doc_strategy()) {
        let result = Evaluator::default().evaluate(&generated, &truth).unwrap();
        for tally in result.category_matches.values() {
            prop_assert!(tally.matched <= tally.total);
        }
        prop_assert!(result.similarity > 0.0 && result.similarity <= 1.0);
    }

    #[test]
    fn one_more_design_mismatch_decays_by_the_base(n in 0usize..40) {
        let evaluator = Evaluator::default();
        let with_n = evaluator.evaluate(&design_doc(n), &json!({})).unwrap();
        let with_one_more = evaluator.evaluate(&design_doc(n + 1), &json!({})).unwrap();

        let design = with_n.category_matches[&Category::Design];
        prop_assert_eq!(design.total - design.matched, n);
        prop_assert!(
            (with_one_more.similarity - with_n.similarity * SIMILARITY_DECAY).abs() < 1e-12
        );
        prop_assert!(with_one_more.similarity < with_n.similarity);
    }

    #[test]
    fn details_are_unique_per_property_and_category(
        generated in doc_strategy(),
        truth in doc_strategy()
    ) {
        let result = Evaluator::default().evaluate(&generated, &truth).unwrap();
        let mut keys = std::collections::BTreeSet::new();
        for d in &result.details {
            prop_assert!(
                keys.insert((d.property.clone(), d.category)),
                "duplicate detail for {:?}/{}", d.category, d.property
            );
        }
    }
}
