use crate::component::{PageState, StateCommand};
use crate::render::render_results;
use crate::view::SectionId;
use crate::view::collapsible::{COLLAPSED_INDICATOR, EXPANDED_INDICATOR};

use models::{PriceResponse, UserProfile};

fn rendered(price: f64) -> Box<crate::view::ResultsView> {
    Box::new(render_results(&PriceResponse {
        predicted_price: Some(price),
        ..PriceResponse::default()
    }))
}

/// **VALUE**: Verifies a stale generation cannot overwrite newer results.
///
/// **WHY THIS MATTERS**: Two quick submissions can answer out of order. Without the
/// generation check the slower, older answer would replace the newer one.
///
/// **BUG THIS CATCHES**: Would catch if the actor stops comparing generations.
#[tokio::test]
async fn given_newer_submission_when_older_result_arrives_then_it_is_dropped() {
    // GIVEN: Two submissions
    let state = PageState::new();
    let first = state.next_generation();
    state
        .update(StateCommand::BeginSubmit { generation: first })
        .await
        .unwrap();
    let second = state.next_generation();
    state
        .update(StateCommand::BeginSubmit { generation: second })
        .await
        .unwrap();

    // WHEN: The second answers, then the first
    let second_applied = state
        .update(StateCommand::ApplyResults {
            generation: second,
            results: rendered(20.0),
        })
        .await
        .unwrap();
    let first_applied = state
        .update(StateCommand::ApplyResults {
            generation: first,
            results: rendered(10.0),
        })
        .await
        .unwrap();

    // THEN: Only the newer result is shown
    assert!(second_applied);
    assert!(!first_applied);
    let view = state.snapshot().await;
    assert_eq!(view.results.unwrap().predicted_price, "$20.00");
    assert!(!view.loading);
}

/// **VALUE**: Verifies an error keeps prior results and replaces the loading placeholder.
///
/// **WHY THIS MATTERS**: A failed refresh should not wipe the last good valuation.
///
/// **BUG THIS CATCHES**: Would catch if errors clear `results` or leave `loading` set.
#[tokio::test]
async fn given_prior_results_when_error_applied_then_results_kept_and_error_shown() {
    // GIVEN: Rendered results
    let state = PageState::new();
    let first = state.next_generation();
    state
        .update(StateCommand::ApplyResults {
            generation: first,
            results: rendered(5.0),
        })
        .await
        .unwrap();

    // WHEN: A new submission fails
    let second = state.next_generation();
    state
        .update(StateCommand::BeginSubmit { generation: second })
        .await
        .unwrap();
    assert!(state.snapshot().await.loading);
    state
        .update(StateCommand::ApplyError {
            generation: second,
            message: String::from("failed"),
        })
        .await
        .unwrap();

    // THEN: Old results, error text, no loading
    let view = state.snapshot().await;
    assert!(!view.loading);
    assert!(view.results_visible);
    assert_eq!(view.error.as_deref(), Some("failed"));
    assert_eq!(view.results.unwrap().predicted_price, "$5.00");
}

/// **VALUE**: Verifies sign-out invalidates in-flight submissions.
///
/// **WHY THIS MATTERS**: A response arriving after sign-out must not make results visible
/// on the login page.
///
/// **BUG THIS CATCHES**: Would catch if `ApplySession(None)` stops bumping the generation.
#[tokio::test]
async fn given_in_flight_submission_when_signed_out_then_result_is_dropped() {
    // GIVEN: A signed-in page with a submission in flight
    let state = PageState::new();
    state
        .update(StateCommand::ApplySession(Some(UserProfile::new(
            "Ada",
            "ada@example.com",
        ))))
        .await
        .unwrap();
    let generation = state.next_generation();

    // WHEN: Signing out, then the response lands
    state
        .update(StateCommand::ApplySession(None))
        .await
        .unwrap();
    let applied = state
        .update(StateCommand::ApplyResults {
            generation,
            results: rendered(1.0),
        })
        .await
        .unwrap();

    // THEN: Dropped
    assert!(!applied);
    let view = state.snapshot().await;
    assert!(view.login_visible);
    assert!(!view.results_visible);
}

#[tokio::test]
async fn given_no_results_when_toggling_section_then_reports_not_applied() {
    let state = PageState::new();

    let applied = state
        .update(StateCommand::ToggleSection(SectionId::RecentSales))
        .await
        .unwrap();

    assert!(!applied);
}

#[tokio::test]
async fn given_rendered_results_when_toggling_then_only_that_section_opens() {
    let state = PageState::new();
    let generation = state.next_generation();
    state
        .update(StateCommand::ApplyResults {
            generation,
            results: rendered(3.0),
        })
        .await
        .unwrap();

    state
        .update(StateCommand::ToggleSection(SectionId::ActiveListings))
        .await
        .unwrap();

    let results = state.snapshot().await.results.unwrap();
    assert!(results.active_listings.toggle.is_open());
    assert!(!results.recent_sales.toggle.is_open());
}

/// **VALUE**: Verifies a new render brings every section back collapsed.
///
/// **WHY THIS MATTERS**: Sections are rebuilt on each render. An open panel from the
/// previous valuation must not stay open over the new rows.
///
/// **BUG THIS CATCHES**: Would catch if results are patched in place, or if toggle state
/// is carried over from the previous `ResultsView`.
#[tokio::test]
async fn given_open_section_when_newer_results_applied_then_sections_collapsed() {
    // GIVEN: Rendered results with Recent Sales opened
    let state = PageState::new();
    let first = state.next_generation();
    state
        .update(StateCommand::ApplyResults {
            generation: first,
            results: rendered(5.0),
        })
        .await
        .unwrap();
    state
        .update(StateCommand::ToggleSection(SectionId::RecentSales))
        .await
        .unwrap();
    let opened = state.snapshot().await.results.unwrap();
    assert!(opened.section(SectionId::RecentSales).toggle.is_open());
    assert_eq!(
        opened.section(SectionId::RecentSales).toggle.indicator(),
        EXPANDED_INDICATOR
    );

    // WHEN: A newer submission renders
    let second = state.next_generation();
    state
        .update(StateCommand::ApplyResults {
            generation: second,
            results: rendered(6.0),
        })
        .await
        .unwrap();

    // THEN: Both sections start over collapsed
    let results = state.snapshot().await.results.unwrap();
    assert_eq!(results.predicted_price, "$6.00");
    for id in [SectionId::RecentSales, SectionId::ActiveListings] {
        let section = results.section(id);
        assert!(!section.toggle.is_open());
        assert!(!section.toggle.content_visible());
        assert_eq!(section.toggle.indicator(), COLLAPSED_INDICATOR);
    }
}

/// **VALUE**: Verifies a 401 for a superseded submission does not reset the page.
///
/// **WHY THIS MATTERS**: The rejected token may already have been replaced by a new
/// sign-in. Only the live submission may expire the session.
///
/// **BUG THIS CATCHES**: Would catch if `Expire` resets unconditionally.
#[tokio::test]
async fn given_newer_submission_when_old_generation_expires_then_page_kept() {
    // GIVEN: A signed-in page whose newer submission rendered
    let state = PageState::new();
    state
        .update(StateCommand::ApplySession(Some(UserProfile::new(
            "Ada Lovelace",
            "ada@example.com",
        ))))
        .await
        .unwrap();
    let old = state.next_generation();
    let current = state.next_generation();
    state
        .update(StateCommand::ApplyResults {
            generation: current,
            results: rendered(8.0),
        })
        .await
        .unwrap();

    // WHEN: The old submission's 401 lands
    let expired = state
        .update(StateCommand::Expire { generation: old })
        .await
        .unwrap();

    // THEN: Nothing changed
    assert!(!expired);
    let view = state.snapshot().await;
    assert!(view.authenticated_visible);
    assert_eq!(view.results.unwrap().predicted_price, "$8.00");

    // WHEN: The live submission's 401 lands
    let expired = state
        .update(StateCommand::Expire {
            generation: current,
        })
        .await
        .unwrap();

    // THEN: Fresh signed-out page
    assert!(expired);
    let view = state.snapshot().await;
    assert!(view.login_visible);
    assert!(view.results.is_none());
}
