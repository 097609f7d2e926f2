use crate::lenient::{number_from_value, text_from_value};

use serde_json::json;

/// **VALUE**: Verifies number extraction from the shapes seen in responses.
///
/// **WHY THIS MATTERS**: Some backend iterations sent prices as strings. The renderer
/// must show `$12.50` for `"12.5"` rather than a placeholder.
///
/// **BUG THIS CATCHES**: Would catch if string prices or currency-prefixed strings stop
/// parsing, or if non-finite values slip through.
#[test]
fn given_mixed_value_shapes_when_reading_number_then_accepts_numeric_forms() {
    // GIVEN / WHEN / THEN
    assert_eq!(number_from_value(&json!(12.5)), Some(12.5));
    assert_eq!(number_from_value(&json!("12.5")), Some(12.5));
    assert_eq!(number_from_value(&json!(" $1,250.00 ")), Some(1250.0));
    assert_eq!(number_from_value(&json!("n/a")), None);
    assert_eq!(number_from_value(&json!("NaN")), None);
    assert_eq!(number_from_value(&json!(null)), None);
    assert_eq!(number_from_value(&json!({"value": 1})), None);
}

#[test]
fn given_scalar_values_when_reading_text_then_stringifies_scalars_only() {
    assert_eq!(text_from_value(&json!("stable")), Some(String::from("stable")));
    assert_eq!(text_from_value(&json!(3)), Some(String::from("3")));
    assert_eq!(text_from_value(&json!(null)), None);
    assert_eq!(text_from_value(&json!(["a"])), None);
}
