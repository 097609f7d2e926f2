//! The page as data.
//!
//! A front end draws [`PageView`]; it never mutates it. Sections are rebuilt as
//! fresh values on every render, so toggle state cannot leak between renders.

pub mod collapsible;
pub mod form;
pub mod list;

pub use collapsible::{CollapsibleSection, SectionId};
pub use form::{CardForm, FormField};
pub use list::{ListRow, ListSection, ListingRow, NO_DATA_TEXT, SaleRow};

use models::UserProfile;

/// Rendered valuation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultsView {
    pub predicted_price: String,
    pub confidence_score: String,
    pub market_trend: String,
    pub supply_level: String,
    pub price_trend: String,
    pub average_sale_price: String,
    pub average_active_price: String,
    pub recent_sales: ListSection,
    pub active_listings: ListSection,
}

impl ResultsView {
    pub fn section(&self, id: SectionId) -> &ListSection {
        match id {
            SectionId::RecentSales => &self.recent_sales,
            SectionId::ActiveListings => &self.active_listings,
        }
    }

    pub fn section_mut(&mut self, id: SectionId) -> &mut ListSection {
        match id {
            SectionId::RecentSales => &mut self.recent_sales,
            SectionId::ActiveListings => &mut self.active_listings,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageView {
    pub login_visible: bool,
    pub authenticated_visible: bool,
    pub results_visible: bool,
    pub user_name: String,
    pub user_email: String,
    pub form: CardForm,
    /// A request is in flight.
    pub loading: bool,
    /// Inline error panel text.
    pub error: Option<String>,
    pub results: Option<ResultsView>,
}

impl PageView {
    /// Fresh page: login shown, everything else hidden.
    pub fn signed_out() -> Self {
        Self {
            login_visible: true,
            authenticated_visible: false,
            results_visible: false,
            user_name: String::new(),
            user_email: String::new(),
            form: CardForm::default(),
            loading: false,
            error: None,
            results: None,
        }
    }

    /// Toggle login vs. authenticated visibility for a session-state emission.
    pub fn apply_session(&mut self, user: Option<&UserProfile>) {
        match user {
            Some(user) => {
                self.login_visible = false;
                self.authenticated_visible = true;
                self.user_name = user.display_name.clone();
                self.user_email = user.email.clone();
            }
            None => {
                self.login_visible = true;
                self.authenticated_visible = false;
                self.results_visible = false;
                self.user_name.clear();
                self.user_email.clear();
            }
        }
    }
}

impl Default for PageView {
    fn default() -> Self {
        Self::signed_out()
    }
}
