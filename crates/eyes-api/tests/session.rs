#![allow(non_snake_case)]

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    response::Response,
};
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use eyes_api::{api_router, middleware::access::AppState};
use serde_json::Value;
use tower::ServiceExt;

fn cookie_for(role: &str) -> String {
    let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
    let payload = URL_SAFE_NO_PAD.encode(format!(
        r#"{{"sub":"{role}@example.com","role":"{role}","exp":1700000000}}"#
    ));
    format!("access_token={header}.{payload}.sig")
}

async fn send(method: Method, path: &str, cookie: Option<String>) -> Response {
    let mut builder = Request::builder().method(method).uri(path);
    if let Some(c) = cookie {
        builder = builder.header(header::COOKIE, c);
    }
    api_router(AppState::default())
        .oneshot(builder.body(Body::empty()).unwrap())
        .await
        .unwrap()
}

fn location(response: &Response) -> Option<&str> {
    response
        .headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
}

#[tokio::test]
async fn role_redirect_follows_token() {
    let response = send(Method::GET, "/role", Some(cookie_for("surgeon"))).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), Some("/app/dashboard"));

    let response = send(Method::GET, "/", Some(cookie_for("patient"))).await;
    assert_eq!(location(&response), Some("/patient"));
}

#[tokio::test]
async fn role_redirect_without_token_goes_to_login() {
    let response = send(Method::GET, "/role", None).await;
    assert_eq!(location(&response), Some("/login"));
}

#[tokio::test]
async fn role_redirect_with_malformed_token_goes_to_login() {
    let response = send(Method::GET, "/role", Some("access_token=abc.def".into())).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), Some("/login"));
}

#[tokio::test]
async fn session_reports_decoded_claims() {
    let response = send(Method::GET, "/api/v1/session", Some(cookie_for("feldsher"))).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let session: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(session["role"], "feldsher");
    assert_eq!(session["subject"], "feldsher@example.com");
    assert_eq!(session["landing"], "/app/dashboard");
    assert_eq!(session["expires_at"], 1700000000);
}

#[tokio::test]
async fn session_without_token_is_unauthorized() {
    let response = send(Method::GET, "/api/v1/session", None).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn logout_expires_cookie_and_redirects() {
    let response = send(Method::POST, "/api/v1/session/logout", Some(cookie_for("admin"))).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), Some("/login"));

    let cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .unwrap();
    assert!(cookie.starts_with("access_token=;"));
    assert!(cookie.contains("Max-Age=0"));
    assert!(cookie.contains("HttpOnly"));
}
