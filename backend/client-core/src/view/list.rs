use crate::view::collapsible::CollapsibleSection;

pub const NO_DATA_TEXT: &str = "no data found";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaleRow {
    pub title: String,
    pub price: String,
    pub condition: String,
    pub date: String,
    pub url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingRow {
    pub title: String,
    pub price: String,
    pub condition: String,
    pub listing_type: String,
    pub url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListRow {
    Sale(SaleRow),
    Listing(ListingRow),
    /// Single row shown for an empty list.
    Placeholder,
}

impl ListRow {
    /// Cells in display order: title, price, condition, then the type-specific field.
    pub fn cells(&self) -> Vec<&str> {
        match self {
            ListRow::Sale(row) => vec![
                row.title.as_str(),
                row.price.as_str(),
                row.condition.as_str(),
                row.date.as_str(),
            ],
            ListRow::Listing(row) => vec![
                row.title.as_str(),
                row.price.as_str(),
                row.condition.as_str(),
                row.listing_type.as_str(),
            ],
            ListRow::Placeholder => vec![NO_DATA_TEXT],
        }
    }
}

/// A titled, collapsible list of rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListSection {
    pub title: &'static str,
    /// Number of records rendered; 0 when only the placeholder is shown.
    pub count: usize,
    pub rows: Vec<ListRow>,
    pub toggle: CollapsibleSection,
}

impl ListSection {
    /// Build from rows. An empty input yields the placeholder row.
    pub fn new(title: &'static str, rows: Vec<ListRow>) -> Self {
        let count = rows.len();
        let rows = if rows.is_empty() {
            vec![ListRow::Placeholder]
        } else {
            rows
        };

        Self {
            title,
            count,
            rows,
            toggle: CollapsibleSection::collapsed(),
        }
    }

    pub fn header(&self) -> String {
        format!("{} {} ({})", self.toggle.indicator(), self.title, self.count)
    }
}
