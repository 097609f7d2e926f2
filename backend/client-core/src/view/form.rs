use models::{CardQuery, CardQueryBuilder};

/// The seven bound form inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormField {
    Brand,
    SetName,
    Year,
    Condition,
    PlayerName,
    CardNumber,
    CardVariation,
}

/// Current raw input values, exactly as typed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CardForm {
    pub brand: String,
    pub set_name: String,
    pub year: String,
    pub condition: String,
    pub player_name: String,
    pub card_number: String,
    pub card_variation: String,
}

impl CardForm {
    pub fn set(&mut self, field: FormField, value: impl Into<String>) {
        let value = value.into();
        match field {
            FormField::Brand => self.brand = value,
            FormField::SetName => self.set_name = value,
            FormField::Year => self.year = value,
            FormField::Condition => self.condition = value,
            FormField::PlayerName => self.player_name = value,
            FormField::CardNumber => self.card_number = value,
            FormField::CardVariation => self.card_variation = value,
        }
    }

    pub fn to_query(&self) -> CardQuery {
        CardQueryBuilder::default()
            .with_brand(self.brand.as_str())
            .with_set_name(self.set_name.as_str())
            .with_year_input(self.year.as_str())
            .with_condition(self.condition.as_str())
            .with_player_name(self.player_name.as_str())
            .with_card_number(self.card_number.as_str())
            .with_card_variation(self.card_variation.as_str())
            .build()
    }
}
