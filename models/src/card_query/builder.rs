use crate::card_query::{CardQuery, parse_leading_int};

/// Builder that assembles a [`CardQuery`] from raw form input strings.
///
/// Values are taken as typed. The year input goes through
/// [`parse_leading_int`] so `"2023 "` and `"2023abc"` both become `2023`.
#[derive(Debug, Default)]
pub struct CardQueryBuilder {
    brand: Option<String>,
    set_name: Option<String>,
    year: Option<String>,
    condition: Option<String>,
    player_name: Option<String>,
    card_number: Option<String>,
    card_variation: Option<String>,
}

impl CardQueryBuilder {
    pub fn with_brand(mut self, brand: impl Into<String>) -> Self {
        self.brand = Some(brand.into());
        self
    }

    pub fn with_set_name(mut self, set_name: impl Into<String>) -> Self {
        self.set_name = Some(set_name.into());
        self
    }

    /// Raw year input, parsed at build time.
    pub fn with_year_input(mut self, year: impl Into<String>) -> Self {
        self.year = Some(year.into());
        self
    }

    pub fn with_condition(mut self, condition: impl Into<String>) -> Self {
        self.condition = Some(condition.into());
        self
    }

    pub fn with_player_name(mut self, player_name: impl Into<String>) -> Self {
        self.player_name = Some(player_name.into());
        self
    }

    pub fn with_card_number(mut self, card_number: impl Into<String>) -> Self {
        self.card_number = Some(card_number.into());
        self
    }

    pub fn with_card_variation(mut self, card_variation: impl Into<String>) -> Self {
        self.card_variation = Some(card_variation.into());
        self
    }

    /// Build the query. Unset fields become empty strings and an unset or
    /// non-numeric year becomes `None`.
    pub fn build(self) -> CardQuery {
        CardQuery {
            brand: self.brand.unwrap_or_default(),
            set_name: self.set_name.unwrap_or_default(),
            year: self.year.as_deref().and_then(parse_leading_int),
            condition: self.condition.unwrap_or_default(),
            player_name: self.player_name.unwrap_or_default(),
            card_number: self.card_number.unwrap_or_default(),
            card_variation: self.card_variation.unwrap_or_default(),
        }
    }
}
