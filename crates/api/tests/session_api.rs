//! Integration tests for login, logout, and the session redirects.

mod common;

use axum::http::StatusCode;
use common::{body_json, build_test_app, get, location, login, post, post_json, seeded_store};
use serde_json::json;

// ---------------------------------------------------------------------------
// Test: anonymous requests to guarded views are sent to /login
// ---------------------------------------------------------------------------

#[tokio::test]
async fn anonymous_views_redirect_to_login() {
    let app = build_test_app(seeded_store());

    for uri in [
        "/",
        "/dashboard",
        "/ticket/1",
        "/customer/1",
        "/reporting",
        "/ticket/abc",
        "/customer/x",
        "/ticket/99999999999999999999",
    ] {
        let response = get(app.clone(), uri).await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER, "{uri}");
        assert_eq!(location(&response), "/login", "{uri}");
    }
}

#[tokio::test]
async fn anonymous_writes_are_redirected_without_touching_the_store() {
    let store = seeded_store();
    let app = build_test_app(store.clone());

    let response = post_json(app, "/ticket/1/notes", json!({ "note": "sneaky" })).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(store.call_count(), 0);
}

#[tokio::test]
async fn signed_in_malformed_ids_reach_the_handler() {
    let app = build_test_app(seeded_store());
    login(&app).await;

    let response = get(app, "/ticket/abc").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Test: login with the fixed agent credentials
// ---------------------------------------------------------------------------

#[tokio::test]
async fn login_with_agent_credentials_authenticates() {
    let app = build_test_app(seeded_store());

    let response = get(app.clone(), "/login").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["state"], "anonymous");

    let response = post_json(
        app.clone(),
        "/login",
        json!({ "username": "agent", "password": "password" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["state"], "authenticated");

    let response = get(app, "/dashboard").await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn login_with_wrong_password_is_unauthorized() {
    let app = build_test_app(seeded_store());

    let response = post_json(
        app.clone(),
        "/login",
        json!({ "username": "agent", "password": "hunter2" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(response).await["code"], "UNAUTHORIZED");

    let response = get(app, "/dashboard").await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
}

// ---------------------------------------------------------------------------
// Test: signed-in agents skip the login view
// ---------------------------------------------------------------------------

#[tokio::test]
async fn authenticated_login_and_root_redirect_to_dashboard() {
    let app = build_test_app(seeded_store());
    login(&app).await;

    for uri in ["/login", "/"] {
        let response = get(app.clone(), uri).await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER, "{uri}");
        assert_eq!(location(&response), "/dashboard", "{uri}");
    }
}

// ---------------------------------------------------------------------------
// Test: logout returns the console to the anonymous state
// ---------------------------------------------------------------------------

#[tokio::test]
async fn logout_guards_views_again() {
    let app = build_test_app(seeded_store());
    login(&app).await;

    let response = post(app.clone(), "/logout").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["state"], "anonymous");

    let response = get(app, "/reporting").await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/login");
}
