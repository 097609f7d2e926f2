mod builder;

use crate::{CardQuery, ModelError, parse_leading_int};

/// **VALUE**: Verifies leading-integer parsing of the year input.
///
/// **WHY THIS MATTERS**: The year is the only coerced form field. Users type "2023 " or
/// "2023 Prizm" and expect the year to be sent; an empty box must send `null`, not 0.
///
/// **BUG THIS CATCHES**: Would catch if:
/// - Trailing text causes the whole value to be dropped
/// - Empty input becomes 0 instead of None
/// - Sign handling is lost
#[test]
fn given_year_inputs_when_parsed_then_follows_leading_integer_rules() {
    // GIVEN / WHEN / THEN
    assert_eq!(parse_leading_int("2023"), Some(2023));
    assert_eq!(parse_leading_int("  2023abc"), Some(2023));
    assert_eq!(parse_leading_int("-12"), Some(-12));
    assert_eq!(parse_leading_int("+7"), Some(7));
    assert_eq!(parse_leading_int("1999.9"), Some(1999));
    assert_eq!(parse_leading_int(""), None);
    assert_eq!(parse_leading_int("abc2023"), None);
    assert_eq!(parse_leading_int("-"), None);
    assert_eq!(parse_leading_int("99999999999"), None);
}

/// **VALUE**: Verifies the canonical camelCase request body with all seven fields.
///
/// **WHY THIS MATTERS**: The server and client agree on one wire shape. A renamed field
/// silently becomes an empty search term on the server.
///
/// **BUG THIS CATCHES**: Would catch if `rename_all` is dropped or a field is skipped.
#[test]
fn given_card_query_when_serialized_then_uses_camel_case_keys() {
    // GIVEN: A fully populated query
    let query = CardQuery {
        brand: String::from("Panini"),
        set_name: String::from("Prizm"),
        year: Some(2020),
        condition: String::from("PSA 10"),
        player_name: String::from("Justin Herbert"),
        card_number: String::from("325"),
        card_variation: String::from("Silver"),
    };

    // WHEN: Serializing
    let json = serde_json::to_value(&query).unwrap();

    // THEN: Seven camelCase keys, year is a number
    let object = json.as_object().unwrap();
    assert_eq!(object.len(), 7);
    assert_eq!(json["setName"], "Prizm");
    assert_eq!(json["playerName"], "Justin Herbert");
    assert_eq!(json["cardNumber"], "325");
    assert_eq!(json["cardVariation"], "Silver");
    assert_eq!(json["year"], 2020);
}

#[test]
fn given_missing_year_when_serialized_then_year_is_null() {
    let query = CardQuery::default();

    let json = serde_json::to_value(&query).unwrap();

    assert!(json["year"].is_null());
}

/// **VALUE**: Verifies that the server accepts snake_case bodies and string years.
///
/// **WHY THIS MATTERS**: Older clients posted `set_name` / `player_name`; they must keep
/// working against the current server.
///
/// **BUG THIS CATCHES**: Would catch if the serde aliases are removed.
#[test]
fn given_snake_case_body_when_deserialized_then_fields_are_populated() {
    // GIVEN: A snake_case request with a textual year
    let body = r#"{"brand":"Topps","set_name":"Chrome","year":"2018","condition":"raw",
        "player_name":"Shohei Ohtani","card_number":"150","card_variation":""}"#;

    // WHEN: Deserializing
    let query: CardQuery = serde_json::from_str(body).unwrap();

    // THEN: Everything lands in the right place
    assert_eq!(query.set_name, "Chrome");
    assert_eq!(query.player_name, "Shohei Ohtani");
    assert_eq!(query.card_number, "150");
    assert_eq!(query.year, Some(2018));
}

/// **VALUE**: Verifies server-side admission of a query.
///
/// **WHY THIS MATTERS**: A search with no brand, set or year matches the whole
/// marketplace and burns API quota for a meaningless price.
///
/// **BUG THIS CATCHES**: Would catch if validation stops checking any of the three fields.
#[test]
fn given_incomplete_query_when_validated_then_returns_validation_error() {
    // GIVEN: A query missing a year
    let query = CardQuery {
        brand: String::from("Topps"),
        set_name: String::from("Chrome"),
        ..CardQuery::default()
    };

    // WHEN: Validating
    let result = query.validate();

    // THEN: Year is reported
    match result {
        Err(ModelError::Validation { message, .. }) => {
            assert_eq!(message, "year must be an integer");
        }
        Ok(()) => panic!("expected validation error"),
    }

    let blank_brand = CardQuery {
        brand: String::from("   "),
        set_name: String::from("Chrome"),
        year: Some(2018),
        ..CardQuery::default()
    };
    assert!(blank_brand.validate().is_err());
}
