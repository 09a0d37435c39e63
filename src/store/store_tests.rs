use super::*;
use serde_json::json;

fn doc(value: Value) -> Document {
    match value {
        Value::Object(map) => map,
        other => panic!("expected object, got {other}"),
    }
}

#[test]
fn test_filter_matches_id_and_field() {
    let document = doc(json!({ "_id": "abc", "meta": true }));
    assert!(Filter::id("abc").matches(&document));
    assert!(!Filter::id("abd").matches(&document));
    assert!(Filter::field_eq("meta", true).matches(&document));
    assert!(!Filter::field_eq("meta", false).matches(&document));
    assert!(!Filter::field_eq("missing", true).matches(&document));
}

#[test]
fn test_set_never_overwrites_id() {
    let mut document = doc(json!({ "_id": "keep", "a": 1 }));
    Update::Set(doc(json!({ "_id": "other", "a": 2, "b": 3 }))).apply(&mut document);
    assert_eq!(document, doc(json!({ "_id": "keep", "a": 2, "b": 3 })));
}

#[test]
fn test_unset_removes_fields() {
    let mut document = doc(json!({ "a": 1, "b": 2 }));
    Update::Unset(vec!["b".to_string(), "zzz".to_string()]).apply(&mut document);
    assert_eq!(document, doc(json!({ "a": 1 })));
}

#[test]
fn test_add_to_set_creates_and_dedups() {
    let mut document = Document::new();
    let add = Update::AddToSet { field: "pins".to_string(), value: json!("x") };
    add.apply(&mut document);
    add.apply(&mut document);
    Update::AddToSet { field: "pins".to_string(), value: json!("y") }.apply(&mut document);
    assert_eq!(document.get("pins"), Some(&json!(["x", "y"])));
}

#[test]
fn test_pull_is_a_noop_when_absent() {
    let mut document = doc(json!({ "pins": ["x", "y", "x"] }));
    let pull = Update::Pull { field: "pins".to_string(), value: json!("x") };
    pull.apply(&mut document);
    assert_eq!(document.get("pins"), Some(&json!(["y"])));
    pull.apply(&mut document);
    assert_eq!(document.get("pins"), Some(&json!(["y"])));

    let mut empty = Document::new();
    pull.apply(&mut empty);
    assert!(empty.is_empty());
}

#[test]
fn test_sort_descending_puts_missing_last_and_is_stable() {
    let mut documents = vec![
        doc(json!({ "n": "meta" })),
        doc(json!({ "n": "old", "createdAt": 1 })),
        doc(json!({ "n": "tie-a", "createdAt": 5 })),
        doc(json!({ "n": "tie-b", "createdAt": 5 })),
        doc(json!({ "n": "new", "createdAt": 9.5 })),
    ];
    Sort::descending("createdAt").apply(&mut documents);
    let order: Vec<&str> = documents
        .iter()
        .map(|d| d.get("n").and_then(Value::as_str).unwrap())
        .collect();
    assert_eq!(order, vec!["new", "tie-a", "tie-b", "old", "meta"]);
}

#[test]
fn test_and_filter_with_ne_clause() {
    let resource = doc(json!({ "_id": "abc", "link": "x" }));
    let meta = doc(json!({ "_id": "abc", "meta": true }));
    let filter = Filter::And(vec![Filter::id("abc"), Filter::field_ne("meta", true)]);
    assert!(filter.matches(&resource));
    assert!(!filter.matches(&meta));
    assert_eq!(filter.id_hint(), Some("abc"));
    assert_eq!(Filter::field_eq("meta", true).id_hint(), None);
}

#[test]
fn test_seed_collects_equalities() {
    let filter = Filter::And(vec![
        Filter::field_eq("meta", true),
        Filter::field_ne("gone", 1),
    ]);
    assert_eq!(filter.seed(), doc(json!({ "meta": true })));
}
