//! End-to-end evaluation scenarios.
//!
//! Each test drives the full pipeline (flatten, classify, resolve,
//! aggregate) through the public API with realistic Vega-Lite-shaped
//! documents.

use serde_json::{json, Value};
use vizeval::{
    abstract_properties, Category, CategoryTally, Evaluator, RuleConfig, RuleOverrides,
    SIMILARITY_DECAY,
};

fn evaluate(generated: Value, truth: Value) -> vizeval::EvaluationResult {
    Evaluator::default()
        .evaluate(&generated, &truth)
        .expect("both documents are objects")
}

#[test]
fn identical_documents_score_perfectly() {
    let doc = json!({
        "mark": {"type": "bar"},
        "encoding": {"x": {"field": "A"}}
    });
    let result = evaluate(doc.clone(), doc);
    assert_eq!(result.accuracy, 1);
    assert_eq!(result.similarity, 1.0);
    assert_eq!(
        result.category_matches[&Category::Mark],
        CategoryTally { matched: 1, total: 1 }
    );
}

#[test]
fn omitted_mark_type_zeroes_accuracy_alone() {
    // Everything else matches; only mark.type is missing on the generated
    // side. The accuracy conjunction is strict.
    let truth = json!({
        "mark": {"type": "bar"},
        "encoding": {"x": {"field": "A"}, "y": {"field": "B"}},
        "width": 400
    });
    let generated = json!({
        "encoding": {"x": {"field": "A"}, "y": {"field": "B"}},
        "width": 400
    });
    let result = evaluate(generated, truth);
    assert_eq!(result.accuracy, 0);
    assert!(result.category_matches[&Category::Encoding].is_fully_matched());
    assert!(result.category_matches[&Category::DataSchema].is_fully_matched());
    let mark_detail = result
        .details
        .iter()
        .find(|d| d.category == Category::Mark)
        .unwrap();
    assert_eq!(mark_detail.property, "mark.type");
    assert!(!mark_detail.matched);
}

#[test]
fn swapped_channels_still_match_the_data_schema() {
    let truth = json!({"encoding": {"x": {"field": "A"}, "y": {"field": "B"}}});
    let generated = json!({"encoding": {"y": {"field": "A"}, "x": {"field": "B"}}});
    let result = evaluate(generated, truth);

    for property in ["x.field", "y.field"] {
        let detail = result
            .details
            .iter()
            .find(|d| d.category == Category::DataSchema && d.property == property)
            .unwrap();
        assert!(detail.matched, "{property} should match via interchange");
    }
    assert_eq!(
        result.category_matches[&Category::DataSchema],
        CategoryTally { matched: 2, total: 2 }
    );
    // The Encoding view of the same paths takes no interchange tolerance.
    assert_eq!(
        result.category_matches[&Category::Encoding],
        CategoryTally { matched: 0, total: 2 }
    );
}

#[test]
fn explicit_tooltip_default_matches_omission() {
    let truth = json!({"mark": {"type": "bar"}});
    let generated = json!({"mark": {"type": "bar", "tooltip": null}});
    let result = evaluate(generated, truth);
    let detail = result
        .details
        .iter()
        .find(|d| d.property == "mark.tooltip")
        .unwrap();
    assert!(detail.matched);
    assert_eq!(result.accuracy, 1);
}

#[test]
fn design_mismatches_decay_similarity_geometrically() {
    let truth = json!({
        "mark": {"type": "bar"},
        "title": {"text": "Sales", "fontSize": 14},
        "width": 400
    });
    let generated = json!({"mark": {"type": "bar"}});
    let result = evaluate(generated, truth);
    // Three unmatched Design properties, no critical damage.
    assert_eq!(result.accuracy, 1);
    assert!((result.similarity - SIMILARITY_DECAY.powi(3)).abs() < 1e-12);
}

#[test]
fn schema_and_data_payloads_are_invisible() {
    let truth = json!({
        "$schema": "https://vega.github.io/schema/vega-lite/v5.json",
        "data": {"values": [{"a": 1}, {"a": 2}]},
        "mark": {"type": "point"}
    });
    let generated = json!({"mark": {"type": "point"}});
    let result = evaluate(generated, truth);
    assert_eq!(result.accuracy, 1);
    assert_eq!(result.similarity, 1.0);
    assert_eq!(result.details.len(), 1);
}

#[test]
fn evaluation_is_idempotent() {
    let truth = json!({
        "mark": {"type": "line", "tooltip": true},
        "encoding": {"x": {"field": "date"}, "y": {"field": "price"}},
        "title": {"text": "Prices"}
    });
    let generated = json!({
        "mark": {"type": "area"},
        "encoding": {"x": {"field": "date"}, "color": {"field": "price"}}
    });
    let evaluator = Evaluator::default();
    let first = evaluator.evaluate(&generated, &truth).unwrap();
    let second = evaluator.evaluate(&generated, &truth).unwrap();
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}

#[test]
fn parse_failure_and_shape_failure_return_none() {
    let evaluator = Evaluator::default();
    let truth = json!({"mark": {"type": "bar"}});
    assert!(evaluator.evaluate_json_str("{\"mark\": ", &truth).is_none());
    assert!(evaluator.evaluate(&json!(42), &truth).is_none());
    assert!(evaluator
        .evaluate_json_str("{\"mark\": {\"type\": \"bar\"}}", &truth)
        .is_some());
}

#[test]
fn overridden_rules_reroute_classification() {
    // A caller that treats width/height as critical layout can promote the
    // sizing namespace into Mark via an override.
    let overrides = RuleOverrides {
        patterns: [(Category::Mark, vec!["mark".to_string(), "width".to_string()])]
            .into_iter()
            .collect(),
        defaults: Default::default(),
    };
    let evaluator = Evaluator::new(RuleConfig::merged(&overrides));
    let truth = json!({"mark": {"type": "bar"}, "width": 400});
    let generated = json!({"mark": {"type": "bar"}, "width": 600});
    let result = evaluator.evaluate(&generated, &truth).unwrap();
    // The width mismatch is now critical, not presentational.
    assert_eq!(result.accuracy, 0);
    assert_eq!(result.similarity, 1.0);
}

#[test]
fn abstraction_groups_without_duplicates() {
    let doc = json!({
        "mark": {"type": "bar", "tooltip": true},
        "encoding": {
            "x": {"field": "year", "type": "ordinal", "axis": {"title": "Year"}},
            "y": {"field": "sales"}
        },
        "title": {"text": "Sales"}
    });
    let grouped = abstract_properties(&doc, RuleConfig::builtin());

    let mut seen = std::collections::BTreeSet::new();
    for properties in grouped.values() {
        for p in properties {
            assert!(seen.insert(p.property.clone()), "duplicate {}", p.property);
        }
    }
    let schema: Vec<_> = grouped[&Category::DataSchema]
        .iter()
        .map(|p| p.property.as_str())
        .collect();
    assert_eq!(schema, ["x.field", "y.field"]);
}

#[test]
fn result_round_trips_through_json() {
    let truth = json!({"mark": {"type": "bar"}, "width": 400});
    let generated = json!({"mark": {"type": "line"}});
    let result = evaluate(generated, truth);
    let text = serde_json::to_string(&result).unwrap();
    let back: vizeval::EvaluationResult = serde_json::from_str(&text).unwrap();
    assert_eq!(result, back);
}
