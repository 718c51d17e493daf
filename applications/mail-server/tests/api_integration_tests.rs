/// API integration tests
/// Drives the router in-process with mocked mail, model and token endpoints
mod common;

use axum::http::{header, StatusCode};
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use common::{create_test_app, TestApp, REDIRECT_URI};
use serde_json::json;
use wiremock::matchers::{body_string_contains, header as header_eq, method, path, query_param};
use wiremock::{Mock, ResponseTemplate};

async fn mount_inbox(app: &TestApp, bodies: &[&str]) {
    let ids: Vec<_> = (0..bodies.len()).map(|i| json!({"id": format!("m{}", i)})).collect();

    Mock::given(method("GET"))
        .and(path("/gmail/v1/users/me/messages"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"messages": ids})))
        .mount(&app.server)
        .await;

    for (i, body) in bodies.iter().enumerate() {
        Mock::given(method("GET"))
            .and(path(format!("/gmail/v1/users/me/messages/m{}", i)))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "payload": {"mimeType": "text/plain", "body": {"data": URL_SAFE_NO_PAD.encode(body)}}
            })))
            .mount(&app.server)
            .await;
    }
}

async fn mount_model(app: &TestApp, text: &str) {
    Mock::given(method("POST"))
        .and(path("/v1beta/models/gemini-1.5-flash:generateContent"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [{"content": {"parts": [{"text": text}]}}]
        })))
        .mount(&app.server)
        .await;
}

/// Hit `/oauth/start` for `user` and return the state sent to the provider
async fn start_authorization(app: &TestApp, user: &str) -> String {
    let (status, headers, _) = app.get(&format!("/oauth/start?user={}", user)).await;
    assert_eq!(status, StatusCode::FOUND);

    let location = headers[header::LOCATION].to_str().unwrap();
    url::Url::parse(location)
        .unwrap()
        .query_pairs()
        .find(|(k, _)| k == "state")
        .map(|(_, v)| v.into_owned())
        .unwrap()
}

#[tokio::test]
async fn test_root_and_health() {
    let app = create_test_app().await;

    let (status, _, body) = app.get("/").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["message"].as_str().unwrap().contains("/summarize-emails"));

    let (status, _, body) = app.get("/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_summarize_default_identity() {
    let app = create_test_app().await;
    let credential = app.credential("valid-access", 3600);
    app.store_credential("default", &credential).await;

    mount_inbox(&app, &["Quarterly report attached", "Lunch on Friday?"]).await;
    mount_model(&app, "- Summary: something happened").await;

    let (status, _, body) = app.get("/summarize-emails").await;
    assert_eq!(status, StatusCode::OK);

    let summaries = body["summaries"].as_array().unwrap();
    assert_eq!(summaries.len(), 2);
    assert_eq!(summaries[0]["email_number"], 1);
    assert_eq!(summaries[1]["email_number"], 2);
    assert_eq!(summaries[1]["summary"], "- Summary: something happened");
}

#[tokio::test]
async fn test_summarize_passes_count_through() {
    let app = create_test_app().await;
    app.store_credential("alice", &app.credential("valid-access", 3600))
        .await;

    Mock::given(method("GET"))
        .and(path("/gmail/v1/users/me/messages"))
        .and(query_param("maxResults", "2"))
        .and(header_eq("authorization", "Bearer valid-access"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&app.server)
        .await;

    let (status, _, body) = app.get("/summarize-emails?count=2&user=alice").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["summaries"], json!([]));
}

#[tokio::test]
async fn test_summarize_without_credential() {
    let app = create_test_app().await;

    let (status, headers, body) = app.get("/summarize-emails?user=alice").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(headers[header::WWW_AUTHENTICATE], "Bearer");
    assert_eq!(body["code"], "not_authenticated");
    assert!(body["error"].as_str().unwrap().contains("/oauth/start"));
}

#[tokio::test]
async fn test_summarize_count_out_of_range() {
    let app = create_test_app().await;

    for uri in ["/summarize-emails?count=0", "/summarize-emails?count=21"] {
        let (status, _, body) = app.get(uri).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "invalid_count");
    }
}

#[tokio::test]
async fn test_summarize_with_rejected_refresh() {
    let app = create_test_app().await;
    app.store_credential("alice", &app.credential("stale", -600))
        .await;

    Mock::given(method("POST"))
        .and(path("/token"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({"error": "invalid_grant"})))
        .mount(&app.server)
        .await;

    let (status, _, body) = app.get("/summarize-emails?user=alice").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "auth_expired");
}

#[tokio::test]
async fn test_summarize_upstream_failure_hides_detail() {
    let app = create_test_app().await;
    app.store_credential("alice", &app.credential("valid-access", 3600))
        .await;

    Mock::given(method("GET"))
        .and(path("/gmail/v1/users/me/messages"))
        .respond_with(ResponseTemplate::new(503).set_body_string("backend secret detail"))
        .mount(&app.server)
        .await;

    let (status, _, body) = app.get("/summarize-emails?user=alice").await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["code"], "upstream_error");
    assert!(!body["error"].as_str().unwrap().contains("secret"));
}

#[tokio::test]
async fn test_oauth_start_redirects_to_provider() {
    let app = create_test_app().await;

    let (status, headers, _) = app.get("/oauth/start?user=alice").await;
    assert_eq!(status, StatusCode::FOUND);

    let location = headers[header::LOCATION].to_str().unwrap();
    let url = url::Url::parse(location).unwrap();
    let pairs: std::collections::HashMap<_, _> = url.query_pairs().into_owned().collect();

    assert_eq!(url.path(), "/o/oauth2/auth");
    assert_eq!(pairs["state"].len(), 32);
    assert_ne!(pairs["state"], "alice");
    assert_eq!(pairs["redirect_uri"], REDIRECT_URI);
    assert_eq!(pairs["access_type"], "offline");
    assert_eq!(pairs["client_id"], "client-id");
}

#[tokio::test]
async fn test_oauth_start_rejects_bad_identity() {
    let app = create_test_app().await;

    let (status, _, body) = app.get("/oauth/start?user=..%2Fetc").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "invalid_identity");
}

#[tokio::test]
async fn test_oauth_callback_persists_credential() {
    let app = create_test_app().await;

    Mock::given(method("POST"))
        .and(path("/token"))
        .and(body_string_contains("grant_type=authorization_code"))
        .and(body_string_contains("code=4%2Fgranted"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "brand-new",
            "refresh_token": "1//kept",
            "expires_in": 3600
        })))
        .expect(1)
        .mount(&app.server)
        .await;

    let state = start_authorization(&app, "alice").await;
    let (status, _, body) = app
        .get(&format!("/oauth/callback?code=4%2Fgranted&state={}", state))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user"], "alice");

    let stored = app
        .state
        .digest
        .credentials()
        .load("alice")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.access_token, "brand-new");
    assert_eq!(stored.refresh_token.as_deref(), Some("1//kept"));
    assert!(app.token_dir.path().join("token_alice.json").exists());
}

#[tokio::test]
async fn test_oauth_callback_denied_or_incomplete() {
    let app = create_test_app().await;

    let (status, _, body) = app.get("/oauth/callback?error=access_denied&state=alice").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "auth_expired");

    let (status, _, body) = app.get("/oauth/callback?state=alice").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "bad_request");
}

#[tokio::test]
async fn test_oauth_callback_requires_issued_state() {
    let app = create_test_app().await;

    Mock::given(method("POST"))
        .and(path("/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "brand-new",
            "refresh_token": "1//kept",
            "expires_in": 3600
        })))
        .expect(1)
        .mount(&app.server)
        .await;

    // A bare identity is not a state the server handed out
    let (status, _, body) = app.get("/oauth/callback?code=abc&state=victim").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "auth_expired");
    assert!(!app.token_dir.path().join("token_victim.json").exists());

    let state = start_authorization(&app, "alice").await;
    let callback = format!("/oauth/callback?code=abc&state={}", state);

    let (status, _, _) = app.get(&callback).await;
    assert_eq!(status, StatusCode::OK);

    // Replaying the same state fails
    let (status, _, body) = app.get(&callback).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "auth_expired");
}

#[tokio::test]
async fn test_malformed_count_gets_json_error() {
    let app = create_test_app().await;

    let (status, _, body) = app.get("/summarize-emails?count=lots").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "bad_request");
}
