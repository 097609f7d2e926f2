use crate::analysis::{analyze_market, predict_price};
use crate::filters::{
    filter_by_condition, filter_by_title_keywords, filter_price_outliers, remove_listing_duplicates,
};
use crate::rules::PricingRules;

use models::{ActiveItem, CardQuery, ListingRecord, PriceResponse, SaleRecord, SoldItem};

use log::{debug, info};

/// Runs the filter pipeline and produces a [`PriceResponse`].
#[derive(Debug, Clone, Default)]
pub struct Pricer {
    rules: PricingRules,
}

impl Pricer {
    pub fn new(rules: PricingRules) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &PricingRules {
        &self.rules
    }

    /// Price a card from raw marketplace results.
    ///
    /// `sold` should be newest first and `active` cheapest first; weighting in
    /// [`predict_price`] depends on it.
    pub fn price(
        &self,
        query: &CardQuery,
        sold: Vec<SoldItem>,
        active: Vec<ActiveItem>,
    ) -> PriceResponse {
        let (raw_sold, raw_active) = (sold.len(), active.len());

        let sold = filter_by_condition(sold, &query.condition);
        let active = filter_by_condition(active, &query.condition);

        let sold = filter_by_title_keywords(sold, &self.rules.excluded_keywords);
        let active = filter_by_title_keywords(active, &self.rules.excluded_keywords);

        let sold = filter_price_outliers(sold);
        let active = filter_price_outliers(active);

        let active = remove_listing_duplicates(active, &sold);

        debug!(
            "Filtered sold {} -> {}, active {} -> {}",
            raw_sold,
            sold.len(),
            raw_active,
            active.len()
        );

        let analysis = analyze_market(&sold, &active);
        let prediction = predict_price(&sold, &active);

        info!(
            "Predicted {:.2} (confidence {:.2}, market {})",
            prediction.price, prediction.confidence, analysis.market_trend
        );

        PriceResponse::from_analysis(
            prediction.price,
            prediction.confidence,
            &analysis,
            sold.into_iter().map(SaleRecord::from).collect(),
            active.into_iter().map(ListingRecord::from).collect(),
        )
    }
}
