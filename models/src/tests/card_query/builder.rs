use crate::CardQueryBuilder;

/// **VALUE**: Verifies that the builder carries form text verbatim and coerces the year.
///
/// **WHY THIS MATTERS**: The form submitter builds every request through this builder.
/// Trimming or normalizing text here would change what the server searches for.
///
/// **BUG THIS CATCHES**: Would catch if:
/// - Text fields get trimmed or lowercased
/// - The year input bypasses leading-integer parsing
#[test]
fn given_raw_form_values_when_building_then_text_is_verbatim_and_year_parsed() {
    // GIVEN: Raw form inputs
    let builder = CardQueryBuilder::default()
        .with_brand(" Panini ")
        .with_set_name("Prizm")
        .with_year_input("2020 season")
        .with_condition("PSA 10")
        .with_player_name("Joe Burrow")
        .with_card_number("307")
        .with_card_variation("");

    // WHEN: Building
    let query = builder.build();

    // THEN: Text untouched, year parsed
    assert_eq!(query.brand, " Panini ");
    assert_eq!(query.year, Some(2020));
    assert_eq!(query.card_variation, "");
}

#[test]
fn given_unset_fields_when_building_then_defaults_to_empty_and_no_year() {
    let query = CardQueryBuilder::default().with_brand("Topps").build();

    assert_eq!(query.brand, "Topps");
    assert_eq!(query.set_name, "");
    assert_eq!(query.year, None);
}
