//! End-to-end walk of the session lifecycle over a cookie-string jar:
//! login establishes the pair, menus gate on the cached role, logout
//! clears everything, and a tampered token degrades to the
//! unauthenticated menu state instead of crashing.

use garda_auth::{
    claims, dashboard_sidebar, kiosk_menu, ClaimsRecord, CookieString, Role, SessionError,
    SessionStore, SessionView, Ttl, TOKEN_KEY,
};

#[test]
fn login_to_logout_over_a_cookie_jar() {
    let jar = CookieString::new();
    let session = SessionView::over(&jar);

    // Before login: nothing privileged renders.
    assert_eq!(session.token(), None);
    assert!(kiosk_menu().visible(session.parsed_role()).is_empty());

    // Login flow: server hands back a token, the view stores the pair.
    let token = claims::encode_unsigned(&ClaimsRecord::new("Client", "Rudi Hartono"));
    let claims = session.establish(&token).expect("token should decode");
    assert_eq!(claims.parsed_role(), Some(Role::Client));

    // The serialized jar carries both cookies, role matching the payload.
    let line = jar.to_line();
    assert!(line.contains("token="), "jar was {line}");
    assert!(line.contains("role=Client"), "jar was {line}");

    // Kiosk screen hides what a Client cannot open.
    let visible = kiosk_menu().visible(session.parsed_role());
    assert!(!visible.is_empty());
    assert!(visible.iter().all(|entry| entry.key != "manajemen-admin"));

    // Dashboard sidebar keeps everything but locks the SuperAdmin entry.
    let annotated = dashboard_sidebar().annotated(session.parsed_role());
    assert_eq!(annotated.len(), dashboard_sidebar().len());
    assert!(annotated
        .iter()
        .any(|a| a.entry.key == "manage-admin" && a.locked));

    // Logout expires both cookies; accessors read None immediately after.
    session.logout();
    assert_eq!(session.token(), None);
    assert_eq!(session.role(), None);
    assert_eq!(jar.to_line(), "");
}

#[test]
fn tampered_token_falls_back_to_empty_menu() {
    let jar = CookieString::new();
    jar.set(TOKEN_KEY, "abc.def", Ttl::Session);

    let session = SessionView::over(&jar);
    assert!(matches!(session.claims(), Err(SessionError::Token(_))));

    // No role cookie was ever written, so the UI renders the
    // unauthenticated state rather than an error.
    assert_eq!(session.parsed_role(), None);
    assert!(kiosk_menu().visible(session.parsed_role()).is_empty());
    assert!(dashboard_sidebar()
        .annotated(session.parsed_role())
        .iter()
        .any(|a| a.locked));
}

#[test]
fn two_views_share_one_jar_without_coordination() {
    let jar = CookieString::new();
    let tab_a = SessionView::over(&jar);
    let tab_b = SessionView::over(&jar);

    let token = claims::encode_unsigned(&ClaimsRecord::new("Admin", "Dewi"));
    tab_a.establish(&token).expect("should establish");
    assert_eq!(tab_b.role().as_deref(), Some("Admin"));

    tab_b.logout();
    assert_eq!(tab_a.token(), None);
}
