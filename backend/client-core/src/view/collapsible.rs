pub const COLLAPSED_INDICATOR: &str = "▶";
pub const EXPANDED_INDICATOR: &str = "▼";

/// Which list section a toggle targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SectionId {
    RecentSales,
    ActiveListings,
}

/// Open/closed state of one list section. Starts collapsed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CollapsibleSection {
    open: bool,
}

impl CollapsibleSection {
    pub fn collapsed() -> Self {
        Self { open: false }
    }

    /// Flip the state and return the new one.
    pub fn toggle(&mut self) -> bool {
        self.open = !self.open;
        self.open
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn content_visible(&self) -> bool {
        self.open
    }

    pub fn indicator(&self) -> &'static str {
        if self.open {
            EXPANDED_INDICATOR
        } else {
            COLLAPSED_INDICATOR
        }
    }
}
