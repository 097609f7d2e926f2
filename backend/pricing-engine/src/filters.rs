//! Listing filters applied before analysis.

use models::{ActiveItem, SoldItem};

use log::debug;

const IQR_MULTIPLIER: f64 = 1.5;
const LENIENT_IQR_MULTIPLIER: f64 = 2.5;
const MIN_ITEMS_FOR_OUTLIERS: usize = 4;
const DUPLICATE_PRICE_TOLERANCE: f64 = 0.01;

/// Anything with a title, a price and a condition.
pub trait Priced {
    fn title(&self) -> &str;
    fn price(&self) -> f64;
    fn condition(&self) -> &str;
}

impl Priced for SoldItem {
    fn title(&self) -> &str {
        &self.title
    }
    fn price(&self) -> f64 {
        self.price
    }
    fn condition(&self) -> &str {
        &self.condition
    }
}

impl Priced for ActiveItem {
    fn title(&self) -> &str {
        &self.title
    }
    fn price(&self) -> f64 {
        self.price
    }
    fn condition(&self) -> &str {
        &self.condition
    }
}

/// Whether a listing's condition satisfies the requested one. Case-insensitive.
///
/// - blank request: everything matches
/// - `ungraded`: rejects conditions mentioning "graded" unless they say "ungraded"
/// - `graded`: requires "graded"
/// - otherwise: exact match
pub fn condition_matches(requested: &str, actual: &str) -> bool {
    let requested = requested.trim().to_lowercase();
    if requested.is_empty() {
        return true;
    }

    let actual = actual.trim().to_lowercase();
    match requested.as_str() {
        "ungraded" => !actual.contains("graded") || actual.contains("ungraded"),
        "graded" => actual.contains("graded"),
        _ => actual == requested,
    }
}

pub fn filter_by_condition<T: Priced>(items: Vec<T>, requested: &str) -> Vec<T> {
    let before = items.len();
    let kept: Vec<T> = items
        .into_iter()
        .filter(|item| condition_matches(requested, item.condition()))
        .collect();

    debug!(
        "Condition '{}' filtered out {} of {} items",
        requested,
        before - kept.len(),
        before
    );
    kept
}

/// Drop items whose title contains any keyword, case-insensitively.
pub fn filter_by_title_keywords<T: Priced>(items: Vec<T>, keywords: &[String]) -> Vec<T> {
    if items.is_empty() || keywords.is_empty() {
        return items;
    }

    let keywords: Vec<String> = keywords.iter().map(|kw| kw.to_lowercase()).collect();
    let before = items.len();
    let kept: Vec<T> = items
        .into_iter()
        .filter(|item| {
            let title = item.title().to_lowercase();
            let excluded = keywords.iter().any(|kw| title.contains(kw.as_str()));
            if excluded {
                debug!("EXCLUDED by keyword: {} - ${}", item.title(), item.price());
            }
            !excluded
        })
        .collect();

    debug!("Keyword filter removed {} of {} items", before - kept.len(), before);
    kept
}

/// Percentile of sorted values with linear interpolation between closest ranks.
pub fn percentile(sorted: &[f64], pct: f64) -> f64 {
    match sorted.len() {
        0 => 0.0,
        1 => sorted[0],
        len => {
            let rank = pct / 100.0 * (len - 1) as f64;
            let lower = rank.floor() as usize;
            let upper = rank.ceil() as usize;
            sorted[lower] + (sorted[upper] - sorted[lower]) * (rank - lower as f64)
        }
    }
}

/// IQR outlier removal.
///
/// Fewer than four items pass through untouched. Bounds are
/// `[Q1 - 1.5·IQR, Q3 + 1.5·IQR]`, widened to 2.5·IQR when the tight bounds would
/// keep fewer than half the items.
pub fn filter_price_outliers<T: Priced>(items: Vec<T>) -> Vec<T> {
    if items.len() < MIN_ITEMS_FOR_OUTLIERS {
        return items;
    }

    let mut prices: Vec<f64> = items.iter().map(Priced::price).collect();
    prices.sort_by(f64::total_cmp);

    let q1 = percentile(&prices, 25.0);
    let q3 = percentile(&prices, 75.0);
    let iqr = q3 - q1;

    let within = |multiplier: f64| {
        let lower = q1 - multiplier * iqr;
        let upper = q3 + multiplier * iqr;
        move |price: f64| lower <= price && price <= upper
    };

    let tight = within(IQR_MULTIPLIER);
    let tight_kept = items.iter().filter(|item| tight(item.price())).count();
    let multiplier = if (tight_kept as f64) < items.len() as f64 * 0.5 {
        LENIENT_IQR_MULTIPLIER
    } else {
        IQR_MULTIPLIER
    };

    let keep = within(multiplier);
    let before = items.len();
    let kept: Vec<T> = items
        .into_iter()
        .filter(|item| keep(item.price()))
        .collect();

    debug!(
        "Outlier filter (x{}) removed {} of {} items, Q1={:.2} Q3={:.2}",
        multiplier,
        before - kept.len(),
        before,
        q1,
        q3
    );
    kept
}

/// Drop listings that mirror a sale: same title (case-insensitive) and price within a
/// cent. If every listing would go, the original list is kept.
pub fn remove_listing_duplicates(listings: Vec<ActiveItem>, sales: &[SoldItem]) -> Vec<ActiveItem> {
    let is_duplicate = |listing: &ActiveItem| {
        let title = listing.title.to_lowercase();
        sales.iter().any(|sale| {
            sale.title.to_lowercase() == title
                && (sale.price - listing.price).abs() < DUPLICATE_PRICE_TOLERANCE
        })
    };

    let unique: Vec<ActiveItem> = listings
        .iter()
        .filter(|listing| !is_duplicate(*listing))
        .cloned()
        .collect();

    if unique.is_empty() && !listings.is_empty() {
        debug!("All active listings matched sales; keeping the original list");
        return listings;
    }

    unique
}
