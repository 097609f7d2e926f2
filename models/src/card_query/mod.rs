pub mod builder;

use crate::error::model_error::ModelError;
use crate::{ErrorLocation, lenient};

use std::panic::Location;

use serde::{Deserialize, Serialize};

/// The card-identifying fields submitted to the pricing endpoint.
///
/// Text fields are carried verbatim from the form. `year` is the only coerced
/// field and serializes as `null` when the input held no leading integer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardQuery {
    #[serde(default)]
    pub brand: String,
    #[serde(default, alias = "set_name")]
    pub set_name: String,
    #[serde(default, deserialize_with = "lenient::year")]
    pub year: Option<i32>,
    #[serde(default)]
    pub condition: String,
    #[serde(default, alias = "player_name")]
    pub player_name: String,
    #[serde(default, alias = "card_number")]
    pub card_number: String,
    #[serde(default, alias = "card_variation")]
    pub card_variation: String,
}

impl CardQuery {
    /// Server-side admission check: a search needs a brand, a set and a year.
    #[track_caller]
    pub fn validate(&self) -> Result<(), ModelError> {
        if self.brand.trim().is_empty() {
            return Err(ModelError::Validation {
                message: String::from("brand is required"),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        if self.set_name.trim().is_empty() {
            return Err(ModelError::Validation {
                message: String::from("setName is required"),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        if self.year.is_none() {
            return Err(ModelError::Validation {
                message: String::from("year must be an integer"),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        Ok(())
    }
}

/// Parse the leading integer of `raw`.
///
/// Leading whitespace and one optional sign are accepted, then as many ASCII digits as
/// follow. Anything after the digits is ignored. Returns `None` when no digit is found
/// or the value does not fit an `i32`.
pub fn parse_leading_int(raw: &str) -> Option<i32> {
    let trimmed = raw.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let digits_len = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digits_len == 0 {
        return None;
    }

    let magnitude: i64 = rest[..digits_len].parse().ok()?;
    let value = if negative { -magnitude } else { magnitude };
    i32::try_from(value).ok()
}
