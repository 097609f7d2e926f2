use crate::error::RulesError;

use common::ErrorLocation;

use std::panic::Location;
use std::path::Path;

use log::info;
use serde::{Deserialize, Serialize};

/// eBay only keeps sold data for this many days.
pub const MAX_SOLD_WINDOW_DAYS: u32 = 90;
/// Browse API page size ceiling.
pub const MAX_RESULTS_LIMIT: u32 = 200;

// ============================================
// RULES STRUCT
// ============================================

/// Tunables for a pricing run, loaded from `pricing.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingRules {
    /// Title fragments that mark lots, set builders and pick-your-card listings.
    #[serde(default = "default_excluded_keywords")]
    pub excluded_keywords: Vec<String>,

    #[serde(default = "default_sold_window_days")]
    pub sold_window_days: u32,

    #[serde(default = "default_max_results")]
    pub max_results: u32,
}

impl Default for PricingRules {
    fn default() -> Self {
        Self {
            excluded_keywords: default_excluded_keywords(),
            sold_window_days: default_sold_window_days(),
            max_results: default_max_results(),
        }
    }
}

// ============================================
// DEFAULT FUNCTIONS
// ============================================

fn default_excluded_keywords() -> Vec<String> {
    [
        "lot",
        "complete your set",
        "you pick",
        "u pick",
        "pick your",
        "complete set",
        "bulk",
        "pick a card",
        "pick your card",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}
fn default_sold_window_days() -> u32 {
    MAX_SOLD_WINDOW_DAYS
}
fn default_max_results() -> u32 {
    100
}

// ============================================
// IMPLEMENTATION
// ============================================

impl PricingRules {
    /// Load rules from a TOML file. Absent keys take defaults.
    pub fn load(path: &Path) -> Result<Self, RulesError> {
        let contents = std::fs::read_to_string(path).map_err(|e| RulesError::Read {
            location: ErrorLocation::from(Location::caller()),
            path: path.to_path_buf(),
            source: e,
        })?;

        let rules: PricingRules = toml::from_str(&contents).map_err(|e| RulesError::Parse {
            location: ErrorLocation::from(Location::caller()),
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        rules.validate()?;

        info!(
            "Pricing rules loaded from {} ({} excluded keywords)",
            path.display(),
            rules.excluded_keywords.len()
        );
        Ok(rules)
    }

    pub fn validate(&self) -> Result<(), RulesError> {
        if !(1..=MAX_SOLD_WINDOW_DAYS).contains(&self.sold_window_days) {
            return Err(RulesError::Validation {
                location: ErrorLocation::from(Location::caller()),
                reason: format!(
                    "sold_window_days must be 1-{}, got {}",
                    MAX_SOLD_WINDOW_DAYS, self.sold_window_days
                ),
            });
        }

        if !(1..=MAX_RESULTS_LIMIT).contains(&self.max_results) {
            return Err(RulesError::Validation {
                location: ErrorLocation::from(Location::caller()),
                reason: format!(
                    "max_results must be 1-{}, got {}",
                    MAX_RESULTS_LIMIT, self.max_results
                ),
            });
        }

        if self.excluded_keywords.iter().any(|kw| kw.trim().is_empty()) {
            return Err(RulesError::Validation {
                location: ErrorLocation::from(Location::caller()),
                reason: "excluded_keywords cannot contain blank entries".to_string(),
            });
        }

        Ok(())
    }
}
