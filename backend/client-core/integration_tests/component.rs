use crate::helpers::{ada, config_for, price_body, wait_for_view};

use client_core::component::{
    AuthOutcome, PRICE_ERROR_ALERT, PageEvent, PricerComponent, SIGN_IN_ALERT,
    SIGN_IN_FIRST_ALERT, SubmitOutcome,
};
use client_core::identity::LocalIdentityProvider;
use client_core::session::{AuthSession, SessionStore};
use client_core::view::{FormField, SectionId};

use common::RedactedToken;

use std::sync::Arc;
use std::time::Duration;

use tempfile::TempDir;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn mounted(
    server: &MockServer,
    provider: Arc<LocalIdentityProvider>,
    store_dir: &TempDir,
    require_token: bool,
) -> PricerComponent<LocalIdentityProvider> {
    let component = PricerComponent::new(
        provider,
        &config_for(server, require_token),
        SessionStore::new(store_dir.path()),
    )
    .unwrap();
    component.mount().await.unwrap();
    component
}

/// **VALUE**: Verifies the auth gate follows provider emissions after mount.
///
/// **WHY THIS MATTERS**: The provider can change state at any time (popup in another
/// tab, expiry). The page must follow without a reload.
///
/// **BUG THIS CATCHES**: Would catch if the listener is not started, or stops after the
/// first emission.
#[tokio::test]
async fn given_mounted_component_when_provider_emits_then_visibility_follows() {
    // GIVEN: A mounted component with no session
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    let provider = Arc::new(LocalIdentityProvider::new(ada()));
    let component = mounted(&server, Arc::clone(&provider), &dir, false).await;
    assert!(component.view().await.login_visible);

    // WHEN: The provider signs in on its own
    provider.emit(Some(ada()));

    // THEN: Authenticated view with user text
    let view = wait_for_view(&component, |v| v.authenticated_visible).await;
    assert!(!view.login_visible);
    assert_eq!(view.user_name, "Ada Lovelace");
    assert_eq!(view.user_email, "ada@example.com");

    // WHEN: The provider signs out
    provider.emit(None);

    // THEN: Login view again
    let view = wait_for_view(&component, |v| v.login_visible).await;
    assert!(!view.authenticated_visible);
    assert!(!view.results_visible);
}

/// **VALUE**: Verifies a persisted session restores the authenticated view at mount.
///
/// **WHY THIS MATTERS**: Reloading must keep the user signed in without the popup.
///
/// **BUG THIS CATCHES**: Would catch if mount ignores the store or the provider's empty
/// state overrides it.
#[tokio::test]
async fn given_persisted_session_when_mounted_then_authenticated_view_restored() {
    // GIVEN: A stored session and a provider that knows nothing
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    SessionStore::new(dir.path())
        .save(&AuthSession::new(ada()).with_token(RedactedToken::new("jwt")))
        .unwrap();
    let provider = Arc::new(LocalIdentityProvider::new(ada()));

    // WHEN: Mounting
    let component = mounted(&server, provider, &dir, true).await;

    // THEN: Signed in
    let view = component.view().await;
    assert!(view.authenticated_visible);
    assert_eq!(view.user_email, "ada@example.com");
}

/// **VALUE**: Verifies the full submit path renders formatted results.
///
/// **WHY THIS MATTERS**: This is the main user journey: fill form, submit, read price.
///
/// **BUG THIS CATCHES**: Would catch breaks anywhere between form state and rendered text.
#[tokio::test]
async fn given_filled_form_when_submitted_then_results_rendered() {
    // GIVEN: A signed-in component and a pricing server
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/price"))
        .respond_with(ResponseTemplate::new(200).set_body_json(price_body(12.5)))
        .expect(1)
        .mount(&server)
        .await;
    let dir = TempDir::new().unwrap();
    let provider = Arc::new(
        LocalIdentityProvider::new(ada()).with_token(RedactedToken::new("jwt-abc")),
    );
    let component = mounted(&server, provider, &dir, true).await;
    assert!(matches!(
        component.sign_in().await.unwrap(),
        AuthOutcome::SignedIn
    ));
    component.set_field(FormField::Brand, "Panini").await.unwrap();
    component.set_field(FormField::Year, "2020").await.unwrap();

    // WHEN: Submitting
    let outcome = component.submit().await.unwrap();

    // THEN: Rendered
    assert!(matches!(outcome, SubmitOutcome::Rendered));
    let view = component.view().await;
    assert!(view.results_visible);
    assert!(!view.loading);
    let results = view.results.unwrap();
    assert_eq!(results.predicted_price, "$12.50");
    assert_eq!(results.confidence_score, "87.3%");
    assert_eq!(results.recent_sales.count, 1);
    assert_eq!(results.active_listings.count, 0);

    // WHEN: Toggling a section twice
    component.toggle_section(SectionId::RecentSales).await.unwrap();
    assert!(
        component.view().await.results.unwrap().recent_sales.toggle.is_open()
    );
    component.toggle_section(SectionId::RecentSales).await.unwrap();

    // THEN: Collapsed again
    assert!(
        !component.view().await.results.unwrap().recent_sales.toggle.is_open()
    );
}

/// **VALUE**: Verifies a missing token aborts before any request when one is required.
///
/// **WHY THIS MATTERS**: The server would answer 401 anyway; the user needs a clear
/// "sign in first" instead.
///
/// **BUG THIS CATCHES**: Would catch if the request is sent without a token.
#[tokio::test]
async fn given_required_token_missing_when_submitted_then_alert_and_no_request() {
    // GIVEN: No session, token required, a server that must not be hit
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(price_body(1.0)))
        .expect(0)
        .mount(&server)
        .await;
    let dir = TempDir::new().unwrap();
    let component = mounted(
        &server,
        Arc::new(LocalIdentityProvider::new(ada())),
        &dir,
        true,
    )
    .await;
    let mut events = component.events();

    // WHEN: Submitting
    let outcome = component.submit().await.unwrap();

    // THEN: Rejected with alert
    assert!(matches!(outcome, SubmitOutcome::Rejected));
    assert_eq!(
        events.recv().await.unwrap(),
        PageEvent::Alert(SIGN_IN_FIRST_ALERT.to_string())
    );
}

/// **VALUE**: Verifies a 401 clears the persisted session and requests a reload.
///
/// **WHY THIS MATTERS**: An expired token must force re-authentication; otherwise every
/// later submit fails the same way.
///
/// **BUG THIS CATCHES**: Would catch if the session file survives or no reload is emitted.
#[tokio::test]
async fn given_401_when_submitted_then_session_cleared_and_reload_emitted() {
    // GIVEN: A persisted session and a server that rejects the token
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;
    let dir = TempDir::new().unwrap();
    let store = SessionStore::new(dir.path());
    store
        .save(&AuthSession::new(ada()).with_token(RedactedToken::new("expired")))
        .unwrap();
    let component = mounted(
        &server,
        Arc::new(LocalIdentityProvider::new(ada())),
        &dir,
        true,
    )
    .await;
    let mut events = component.events();

    // WHEN: Submitting
    let outcome = component.submit().await.unwrap();

    // THEN: Session gone, reload requested, page reset
    assert!(matches!(outcome, SubmitOutcome::SessionExpired));
    assert!(store.load().unwrap().is_none());
    assert_eq!(events.recv().await.unwrap(), PageEvent::Reload);
    assert!(component.view().await.login_visible);
}

/// **VALUE**: Verifies a non-401 failure keeps the session and shows the error.
///
/// **WHY THIS MATTERS**: A pricing outage is not an auth problem; logging the user out
/// would be wrong.
///
/// **BUG THIS CATCHES**: Would catch if every error is treated as a 401.
#[tokio::test]
async fn given_server_error_when_submitted_then_session_kept_and_error_shown() {
    // GIVEN: A persisted session and a failing server
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;
    let dir = TempDir::new().unwrap();
    let store = SessionStore::new(dir.path());
    store
        .save(&AuthSession::new(ada()).with_token(RedactedToken::new("jwt")))
        .unwrap();
    let component = mounted(
        &server,
        Arc::new(LocalIdentityProvider::new(ada())),
        &dir,
        true,
    )
    .await;
    let mut events = component.events();

    // WHEN: Submitting
    let outcome = component.submit().await.unwrap();

    // THEN: Failed, session intact, inline error and alert
    assert!(matches!(outcome, SubmitOutcome::Failed(_)));
    assert!(store.load().unwrap().is_some());
    let view = component.view().await;
    assert!(view.results_visible);
    assert_eq!(view.error.as_deref(), Some(PRICE_ERROR_ALERT));
    assert_eq!(
        events.recv().await.unwrap(),
        PageEvent::Alert(PRICE_ERROR_ALERT.to_string())
    );
}

/// **VALUE**: Verifies a slow response is reported as superseded once a newer one lands.
///
/// **WHY THIS MATTERS**: Out-of-order answers must never overwrite the newer valuation.
///
/// **BUG THIS CATCHES**: Would catch if the component applies responses unconditionally.
#[tokio::test]
async fn given_overlapping_submissions_when_older_answers_last_then_it_is_superseded() {
    // GIVEN: The first request is slow, the second fast
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(price_body(10.0))
                .set_delay(Duration::from_millis(400)),
        )
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(price_body(20.0)))
        .mount(&server)
        .await;
    let dir = TempDir::new().unwrap();
    let component = Arc::new(
        mounted(
            &server,
            Arc::new(LocalIdentityProvider::new(ada())),
            &dir,
            false,
        )
        .await,
    );

    // WHEN: Submitting twice without waiting
    let slow = {
        let component = Arc::clone(&component);
        tokio::spawn(async move { component.submit().await })
    };
    tokio::time::sleep(Duration::from_millis(100)).await;
    let fast = component.submit().await.unwrap();
    let slow = slow.await.unwrap().unwrap();

    // THEN: The newer result stays
    assert!(matches!(fast, SubmitOutcome::Rendered));
    assert!(matches!(slow, SubmitOutcome::Superseded));
    assert_eq!(
        component.view().await.results.unwrap().predicted_price,
        "$20.00"
    );
}

/// **VALUE**: Verifies a late 401 for a replaced token leaves the new session alone.
///
/// **WHY THIS MATTERS**: A request sent with the old token can still be in flight when
/// the user signs out and back in. Its 401 is about a session that no longer exists.
///
/// **BUG THIS CATCHES**: Would catch if the 401 path skips the generation check and
/// deletes the fresh session, resets newer results, or emits a reload.
#[tokio::test]
async fn given_resigned_in_user_when_old_token_401_arrives_late_then_new_session_kept() {
    // GIVEN: A persisted session with an old token the server rejects slowly,
    // and a provider that hands out a fresh token the server accepts
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(header("authorization", "Bearer old"))
        .respond_with(ResponseTemplate::new(401).set_delay(Duration::from_millis(400)))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(header("authorization", "Bearer fresh"))
        .respond_with(ResponseTemplate::new(200).set_body_json(price_body(30.0)))
        .mount(&server)
        .await;
    let dir = TempDir::new().unwrap();
    let store = SessionStore::new(dir.path());
    store
        .save(&AuthSession::new(ada()).with_token(RedactedToken::new("old")))
        .unwrap();
    let provider = Arc::new(
        LocalIdentityProvider::new(ada()).with_token(RedactedToken::new("fresh")),
    );
    let component = Arc::new(mounted(&server, provider, &dir, true).await);
    let mut events = component.events();

    // WHEN: The old-token request is in flight while the user signs out, signs back
    // in and submits again
    let stale = {
        let component = Arc::clone(&component);
        tokio::spawn(async move { component.submit().await })
    };
    tokio::time::sleep(Duration::from_millis(100)).await;
    assert!(matches!(
        component.sign_out().await.unwrap(),
        AuthOutcome::SignedOut
    ));
    assert!(matches!(
        component.sign_in().await.unwrap(),
        AuthOutcome::SignedIn
    ));
    let fresh = component.submit().await.unwrap();
    let stale = stale.await.unwrap().unwrap();

    // THEN: The late 401 is superseded and the new session survives
    assert!(matches!(fresh, SubmitOutcome::Rendered));
    assert!(matches!(stale, SubmitOutcome::Superseded));
    let persisted = store.load().unwrap().unwrap();
    assert_eq!(persisted.token.unwrap().as_str(), "fresh");
    let view = component.view().await;
    assert!(view.authenticated_visible);
    assert!(!view.login_visible);
    assert_eq!(view.results.unwrap().predicted_price, "$30.00");
    assert!(events.try_recv().is_err());
}

#[tokio::test]
async fn given_rejecting_provider_when_signing_in_then_alert_and_view_unchanged() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    let provider = Arc::new(LocalIdentityProvider::new(ada()));
    provider.set_sign_in_failure(true);
    let component = mounted(&server, provider, &dir, false).await;
    let mut events = component.events();

    let outcome = component.sign_in().await.unwrap();

    assert!(matches!(outcome, AuthOutcome::Failed(_)));
    assert_eq!(
        events.recv().await.unwrap(),
        PageEvent::Alert(SIGN_IN_ALERT.to_string())
    );
    assert!(component.view().await.login_visible);
}

#[tokio::test]
async fn given_signed_in_user_when_signing_out_then_persisted_session_cleared() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    let provider = Arc::new(
        LocalIdentityProvider::new(ada()).with_token(RedactedToken::new("jwt")),
    );
    let component = mounted(&server, provider, &dir, false).await;
    component.sign_in().await.unwrap();
    let store = SessionStore::new(dir.path());
    assert!(store.load().unwrap().is_some());

    let outcome = component.sign_out().await.unwrap();

    assert!(matches!(outcome, AuthOutcome::SignedOut));
    assert!(store.load().unwrap().is_none());
    assert!(component.view().await.login_visible);
}

#[tokio::test]
async fn given_mounted_component_when_unmounted_then_listener_stops() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    let provider = Arc::new(LocalIdentityProvider::new(ada()));
    let component = mounted(&server, Arc::clone(&provider), &dir, false).await;
    assert!(component.is_mounted().await);

    component.unmount().await;
    provider.emit(Some(ada()));
    tokio::time::sleep(Duration::from_millis(50)).await;

    assert!(!component.is_mounted().await);
    assert!(component.view().await.login_visible);
}
