use models::CardQuery;

/// `"{brand} {set} {year}"`, then player name, `#{card number}` and variation, each
/// only when non-blank.
pub fn build_search_query(query: &CardQuery) -> String {
    let year = query.year.map(|year| year.to_string()).unwrap_or_default();
    let mut search = format!("{} {} {}", query.brand, query.set_name, year)
        .trim()
        .to_string();

    let player_name = query.player_name.trim();
    if !player_name.is_empty() {
        search.push(' ');
        search.push_str(player_name);
    }

    let card_number = query.card_number.trim();
    if !card_number.is_empty() {
        search.push_str(" #");
        search.push_str(card_number);
    }

    let card_variation = query.card_variation.trim();
    if !card_variation.is_empty() {
        search.push(' ');
        search.push_str(card_variation);
    }

    search
}
