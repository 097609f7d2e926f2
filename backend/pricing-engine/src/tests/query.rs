use crate::query::build_search_query;

use models::CardQueryBuilder;

/// **VALUE**: Verifies every populated field lands in the search text in order.
///
/// **WHY THIS MATTERS**: The marketplace search is keyword based; a missing `#` before the
/// card number matches unrelated cards.
///
/// **BUG THIS CATCHES**: Would catch reordering or a dropped optional field.
#[test]
fn given_full_query_when_building_search_then_all_parts_in_order() {
    // GIVEN: All fields set
    let query = CardQueryBuilder::default()
        .with_brand("Panini")
        .with_set_name("Prizm")
        .with_year_input("2020")
        .with_player_name("Justin Herbert")
        .with_card_number("325")
        .with_card_variation("Silver")
        .build();

    // WHEN / THEN
    assert_eq!(
        build_search_query(&query),
        "Panini Prizm 2020 Justin Herbert #325 Silver"
    );
}

/// **VALUE**: Verifies blank optional fields leave no stray separators.
///
/// **BUG THIS CATCHES**: Would catch `"Topps Chrome 2021  #"` style output.
#[test]
fn given_only_required_fields_when_building_search_then_no_trailing_parts() {
    let query = CardQueryBuilder::default()
        .with_brand("Topps")
        .with_set_name("Chrome")
        .with_year_input("2021")
        .with_player_name("   ")
        .build();

    assert_eq!(build_search_query(&query), "Topps Chrome 2021");
}

#[test]
fn given_missing_year_when_building_search_then_trimmed() {
    let query = CardQueryBuilder::default()
        .with_brand("Topps")
        .with_set_name("Chrome")
        .with_card_number("12")
        .build();

    assert_eq!(build_search_query(&query), "Topps Chrome #12");
}
