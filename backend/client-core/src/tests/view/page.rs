use crate::view::{FormField, PageView};

use models::UserProfile;

/// **VALUE**: Verifies the auth gate's visibility rules.
///
/// **WHY THIS MATTERS**: Without a session the form and results must be hidden; with one,
/// the user's name and email must be shown.
///
/// **BUG THIS CATCHES**: Would catch if sign-out leaves results visible or stale user text.
#[test]
fn given_session_emissions_when_applied_then_visibility_toggles() {
    // GIVEN: A fresh page
    let mut page = PageView::signed_out();
    assert!(page.login_visible);
    assert!(!page.authenticated_visible);
    assert!(!page.results_visible);

    // WHEN: A session arrives
    let user = UserProfile::new("Ada Lovelace", "ada@example.com");
    page.apply_session(Some(&user));

    // THEN: Authenticated view with user text
    assert!(!page.login_visible);
    assert!(page.authenticated_visible);
    assert_eq!(page.user_name, "Ada Lovelace");
    assert_eq!(page.user_email, "ada@example.com");

    // WHEN: The session ends with results showing
    page.results_visible = true;
    page.apply_session(None);

    // THEN: Login shown, results hidden, user text cleared
    assert!(page.login_visible);
    assert!(!page.authenticated_visible);
    assert!(!page.results_visible);
    assert!(page.user_email.is_empty());
}

#[test]
fn given_form_values_when_converted_then_query_has_all_fields() {
    let mut page = PageView::signed_out();
    page.form.set(FormField::Brand, "Topps");
    page.form.set(FormField::SetName, "Chrome");
    page.form.set(FormField::Year, "2018");
    page.form.set(FormField::Condition, "raw");
    page.form.set(FormField::PlayerName, "Shohei Ohtani");
    page.form.set(FormField::CardNumber, "150");
    page.form.set(FormField::CardVariation, "Refractor");

    let query = page.form.to_query();

    assert_eq!(query.brand, "Topps");
    assert_eq!(query.year, Some(2018));
    assert_eq!(query.card_variation, "Refractor");
}
