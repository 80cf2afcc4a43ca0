use domain::{RawRecord, SourceTable, TaggedRecord};
use serde_json::{Value, json};
use shipnet_analysis::{
    FieldAnswer, QueryIntent, ThresholdOp, answer, classify_intent, detect_field,
    extract_threshold, field_distribution,
};
use shipnet_normalize::tag;

fn records(rows: Vec<Value>) -> Vec<TaggedRecord> {
    rows.into_iter()
        .filter_map(|row| row.as_object().cloned())
        .map(|raw: RawRecord| tag(SourceTable::FieldCables, raw))
        .collect()
}

fn rdp_records() -> Vec<TaggedRecord> {
    records(vec![
        json!({ "rdp_yard": "102B", "deck": 5 }),
        json!({ "rdp_yard": "102B", "deck": 5 }),
        json!({ "rdp_yard": "103B", "deck": 12 }),
        json!({ "deck": 3 }),
    ])
}

#[test]
fn unique_rdp_yard_count() {
    let answer = answer("how many unique rdp_yard", &rdp_records());
    assert_eq!(
        answer,
        FieldAnswer::UniqueCount {
            field: "rdp_yard".to_string(),
            unique_values: 2,
            total_records: 4,
        }
    );
}

#[test]
fn records_without_value_count_toward_total_only() {
    let rows = records(vec![
        json!({ "rdp_yard": "102B" }),
        json!({ "rdp_yard": "102B" }),
        json!({ "rdp_yard": "103B" }),
        json!({ "rdp_yard": "" }),
        json!({ "rdp_yard": null }),
    ]);
    let distribution = field_distribution("rdp_yard", &rows);
    assert_eq!(distribution.total_records, 5);
    assert_eq!(distribution.unique_values, 2);
    let counted: usize = distribution.distribution.iter().map(|entry| entry.count).sum();
    assert_eq!(counted, 3);
    assert_eq!(distribution.total_records - counted, 2);
}

#[test]
fn rdp_keyword_resolves_to_first_present_column() {
    assert_eq!(
        detect_field("rdp breakdown", &rdp_records()).as_deref(),
        Some("rdp_yard")
    );
    let named = records(vec![json!({ "rdp_name": "North" })]);
    assert_eq!(detect_field("list rdp", &named).as_deref(), Some("rdp_name"));
}

#[test]
fn threshold_list_of_rdp_yard() {
    match answer("list rdp_yard with more than 1", &rdp_records()) {
        FieldAnswer::Threshold {
            field,
            op,
            value,
            matches,
        } => {
            assert_eq!(field, "rdp_yard");
            assert_eq!(op, ThresholdOp::GreaterThan);
            assert_eq!(value, 1);
            let values: Vec<_> = matches.into_iter().map(|entry| entry.value).collect();
            assert_eq!(values, vec!["102B"]);
        }
        other => panic!("unexpected answer: {other:?}"),
    }
}

#[test]
fn word_and_digit_thresholds_agree() {
    assert_eq!(extract_threshold("more than two"), extract_threshold("more than 2"));
    assert_eq!(
        extract_threshold("more than two"),
        Some((ThresholdOp::GreaterThan, Some(2)))
    );
    assert_eq!(
        classify_intent("cabins with fewer than fifteen devices"),
        QueryIntent::Threshold {
            op: ThresholdOp::LessThan,
            value: Some(15),
        }
    );
    assert_eq!(
        extract_threshold("decks with > 3 cables"),
        Some((ThresholdOp::GreaterThan, Some(3)))
    );
}

#[test]
fn missing_threshold_number_is_reported() {
    assert_eq!(
        answer("rdp_yard with more than a few", &rdp_records()),
        FieldAnswer::ThresholdUndetermined {
            field: "rdp_yard".to_string(),
            op: ThresholdOp::GreaterThan,
        }
    );
}

#[test]
fn unknown_field_and_intent_are_explicit() {
    assert_eq!(answer("how many widgets", &rdp_records()), FieldAnswer::FieldUndetermined);
    assert_eq!(
        answer("rdp_yard", &rdp_records()),
        FieldAnswer::IntentUnknown {
            field: "rdp_yard".to_string()
        }
    );
    assert_eq!(classify_intent("hello there"), QueryIntent::Unknown);
}

#[test]
fn distribution_orders_by_count_then_value() {
    let distribution = field_distribution("deck", &rdp_records());
    assert_eq!(distribution.total_records, 4);
    let ordered: Vec<_> = distribution
        .distribution
        .iter()
        .map(|entry| (entry.value.as_str(), entry.count))
        .collect();
    assert_eq!(ordered, vec![("5", 2), ("12", 1), ("3", 1)]);
}

#[test]
fn value_lists_sort_numerically() {
    match answer("list all decks", &rdp_records()) {
        FieldAnswer::Values { values, .. } => assert_eq!(values, vec!["3", "5", "12"]),
        other => panic!("unexpected answer: {other:?}"),
    }
}

#[test]
fn top_n_defaults_and_parses_words() {
    assert_eq!(classify_intent("top decks"), QueryIntent::TopN(5));
    assert_eq!(classify_intent("top three decks"), QueryIntent::TopN(3));
    match answer("top 1 deck", &rdp_records()) {
        FieldAnswer::TopN { entries, .. } => {
            assert_eq!(entries.len(), 1);
            assert_eq!(entries[0].value, "5");
        }
        other => panic!("unexpected answer: {other:?}"),
    }
}
