use crate::view::collapsible::{COLLAPSED_INDICATOR, EXPANDED_INDICATOR};
use crate::view::{CollapsibleSection, ListSection};

/// **VALUE**: Verifies that two toggles return a section to its initial collapsed state.
///
/// **WHY THIS MATTERS**: Accumulated listeners used to fire twice per click, leaving the
/// section stuck. Toggle state is now a value; this pins the behavior.
///
/// **BUG THIS CATCHES**: Would catch if toggle stops flipping or the indicator desyncs.
#[test]
fn given_collapsed_section_when_toggled_twice_then_returns_to_initial_state() {
    // GIVEN: A fresh section
    let mut section = CollapsibleSection::collapsed();
    let initial = (section.content_visible(), section.indicator());
    assert_eq!(initial, (false, COLLAPSED_INDICATOR));

    // WHEN: Toggling once
    assert!(section.toggle());

    // THEN: Open with the expanded glyph
    assert!(section.content_visible());
    assert_eq!(section.indicator(), EXPANDED_INDICATOR);

    // WHEN: Toggling again
    assert!(!section.toggle());

    // THEN: Back to initial
    assert_eq!((section.content_visible(), section.indicator()), initial);
}

#[test]
fn given_list_section_when_created_then_header_shows_indicator_and_count() {
    let section = ListSection::new("Recent Sales", Vec::new());

    assert_eq!(section.header(), "▶ Recent Sales (0)");
    assert!(!section.toggle.is_open());
}
