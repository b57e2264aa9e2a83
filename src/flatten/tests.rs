//! Tests for flatten module

use super::*;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use test_case::test_case;

fn as_value(record: JsonObject) -> Value {
    Value::Object(record)
}

// ============================================================================
// Flattener Tests
// ============================================================================

#[test_case(json!(42) ; "number")]
#[test_case(json!("text") ; "string")]
#[test_case(json!(true) ; "boolean")]
#[test_case(json!(null) ; "null")]
fn test_flatten_scalar_uses_empty_path(value: Value) {
    let flat = flatten(&value);
    assert_eq!(flat.len(), 1);
    assert_eq!(flat.get(""), Some(&value));
}

#[test]
fn test_flatten_nested_object() {
    let flat = flatten(&json!({"a": {"b": 1, "c": 2}}));
    assert_eq!(as_value(flat), json!({"a_b": 1, "a_c": 2}));
}

#[test]
fn test_flatten_array() {
    let flat = flatten(&json!({"a": [10, 20]}));
    assert_eq!(as_value(flat), json!({"a_0": 10, "a_1": 20}));
}

#[test]
fn test_flatten_array_of_objects() {
    let flat = flatten(&json!({
        "foo": [{"bar": 1, "quux": 2}, {"bar": 3}]
    }));
    assert_eq!(
        as_value(flat),
        json!({"foo_0_bar": 1, "foo_0_quux": 2, "foo_1_bar": 3})
    );
}

#[test]
fn test_flatten_top_level_array() {
    let flat = flatten(&json!(["x", {"y": false}]));
    assert_eq!(as_value(flat), json!({"0": "x", "1_y": false}));
}

#[test]
fn test_flatten_keeps_source_order() {
    let flat = flatten(&json!({"zeta": 1, "alpha": {"inner": 2}, "mid": 3}));
    let keys: Vec<&str> = flat.keys().map(String::as_str).collect();
    assert_eq!(keys, vec!["zeta", "alpha_inner", "mid"]);
}

#[test]
fn test_flatten_empty_containers_produce_nothing() {
    let flat = flatten(&json!({"a": {}, "b": [], "c": 1}));
    assert_eq!(as_value(flat), json!({"c": 1}));
}

#[test]
fn test_flatten_null_leaf_is_kept() {
    let flat = flatten(&json!({"a": {"b": null}}));
    assert_eq!(as_value(flat), json!({"a_b": null}));
}

#[test]
fn test_flatten_colliding_paths_last_wins() {
    let flat = flatten(&json!({"a_b": 1, "a": {"b": 2}}));
    assert_eq!(flat.len(), 1);
    assert_eq!(flat.get("a_b"), Some(&json!(2)));
}

#[test]
fn test_flatten_key_with_trailing_separator() {
    // "x_" + "_" trimmed once leaves "x_"
    let flat = flatten(&json!({"x_": 1}));
    assert_eq!(flat.get("x_"), Some(&json!(1)));
}

// ============================================================================
// Column Naming Tests
// ============================================================================

#[test_case("" ; "empty")]
#[test_case("   " ; "spaces")]
#[test_case("\t" ; "tab")]
fn test_blank_name_detected(name: &str) {
    assert!(is_blank_name(name));
}

#[test]
fn test_non_blank_name() {
    assert!(!is_blank_name("a"));
    assert!(!is_blank_name(" a "));
}

#[test]
fn test_placeholder_names() {
    assert_eq!(placeholder_name(0), "Unnamed_Column");
    assert_eq!(placeholder_name(2), "Unnamed_Column_2");
}

#[test]
fn test_scalar_record_gets_placeholder() {
    let record = flatten_record(&json!("just text"));
    assert_eq!(as_value(record), json!({"Unnamed_Column": "just text"}));
}

#[test]
fn test_whitespace_key_gets_placeholder() {
    let record = flatten_record(&json!({" ": 1, "b": 2}));
    assert_eq!(as_value(record), json!({"Unnamed_Column": 1, "b": 2}));
}

#[test]
fn test_duplicate_placeholders_are_suffixed() {
    let record = flatten_record(&json!({" ": 1, "  ": 2, "\t": 3}));
    assert_eq!(
        as_value(record),
        json!({"Unnamed_Column": 1, "Unnamed_Column_1": 2, "Unnamed_Column_2": 3})
    );
}

#[test]
fn test_placeholder_skips_existing_name() {
    let record = flatten_record(&json!({" ": 1, "Unnamed_Column": 2}));
    assert_eq!(
        as_value(record),
        json!({"Unnamed_Column_1": 1, "Unnamed_Column": 2})
    );
}

#[test]
fn test_normalize_without_blanks_is_identity() {
    let flat = flatten(&json!({"a": {"b": 1}, "c": [true]}));
    let normalized = normalize_column_names(flat.clone());
    assert_eq!(normalized, flat);
}
