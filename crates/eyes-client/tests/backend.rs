#![allow(non_snake_case)]

use axum::{
    extract::{Path, Query},
    http::{header, HeaderMap, Method, StatusCode},
    response::IntoResponse,
    routing::{any, get, post, put},
    Json, Router,
};
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use eyes_client::{
    start_session, ApiClient, ApiError, CookieSettings, CookieTokenStore, MemoryTokenStore,
    RequestOptions, TokenStore,
};
use eyes_types::{CaseQuery, Measurements, PatientQuery, PatientStatus, Role};
use serde_json::{json, Value};
use std::collections::HashMap;

fn header_text(headers: &HeaderMap, name: header::HeaderName) -> Value {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(|s| Value::String(s.to_string()))
        .unwrap_or(Value::Null)
}

async fn echo(
    method: Method,
    headers: HeaderMap,
    Query(query): Query<HashMap<String, String>>,
    body: String,
) -> Json<Value> {
    Json(json!({
        "method": method.as_str(),
        "authorization": header_text(&headers, header::AUTHORIZATION),
        "content_type": header_text(&headers, header::CONTENT_TYPE),
        "cache_control": header_text(&headers, header::CACHE_CONTROL),
        "query": query,
        "body": body,
    }))
}

async fn login(body: String) -> impl IntoResponse {
    if body.contains("password=wrong") {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({"detail": "Invalid credentials"})),
        )
            .into_response();
    }
    // role is whatever precedes the '@' of the username
    let role = body
        .split('&')
        .find_map(|pair| pair.strip_prefix("username="))
        .and_then(|user| user.split("%40").next())
        .unwrap_or("patient")
        .to_string();
    Json(json!({"access_token": token_for(&role), "token_type": "bearer"})).into_response()
}

fn token_for(role: &str) -> String {
    let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
    let payload = URL_SAFE_NO_PAD.encode(format!(
        r#"{{"sub":"{role}@example.com","role":"{role}","exp":1900000000}}"#
    ));
    format!("{header}.{payload}.sig")
}

async fn list_patients(Query(query): Query<HashMap<String, String>>) -> Json<Value> {
    let status = query.get("status").cloned().unwrap_or_else(|| "NEW".into());
    Json(json!([{
        "id": 1,
        "fio": "Petrov I. I.",
        "status": status,
        "created_at": "2024-01-01T00:00:00",
        "updated_at": "2024-01-01T00:00:00"
    }]))
}

async fn list_cases(Query(query): Query<HashMap<String, String>>) -> Json<Value> {
    let patientId: i64 = query
        .get("patient_id")
        .and_then(|p| p.parse().ok())
        .unwrap_or(0);
    Json(json!({"items": [
        {"id": 5, "patient_id": patientId, "template_id": null, "status": "DRAFT", "progress_percent": 0}
    ]}))
}

async fn put_measurements(Path(id): Path<i64>, Json(body): Json<Value>) -> impl IntoResponse {
    if id != 5 {
        return (StatusCode::NOT_FOUND, Json(json!({"detail": "Case not found"}))).into_response();
    }
    assert_eq!(body["axial_length_mm"], json!(23.4));
    assert_eq!(body["k2_d"], Value::Null);
    Json(json!({"ok": true})).into_response()
}

async fn calculate(Path(id): Path<i64>) -> Json<Value> {
    Json(json!({
        "ok": true,
        "result": {
            "recommended_iol_power": 20.1,
            "warnings": [],
            "input": {"axial_length_mm": 23.4, "k1_d": 43.0, "k2_d": 44.0},
            "case": id
        }
    }))
}

async fn spawn_backend() -> String {
    let app = Router::new()
        .route("/echo", any(echo))
        .route("/empty", post(|| async { StatusCode::OK }))
        .route("/auth/login", post(login))
        .route("/patients/", get(list_patients))
        .route("/cases", get(list_cases))
        .route("/cases/:id/measurements", put(put_measurements))
        .route("/cases/:id/calculate", post(calculate))
        .route(
            "/cases/calc-queue/list",
            get(|| async {
                Json(json!({"items": [{"id": 9, "patient_id": 2, "status": "ON_REVIEW", "progress_percent": 50}]}))
            }),
        );

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

#[tokio::test]
async fn attaches_bearer_and_json_content_type() {
    let baseUrl = spawn_backend().await;
    let client = ApiClient::new(baseUrl, MemoryTokenStore::with_token("tok.en.x"));

    let echoed: Value = client.request("/echo", RequestOptions::get()).await.unwrap();

    assert_eq!(echoed["method"], "GET");
    assert_eq!(echoed["authorization"], "Bearer tok.en.x");
    assert_eq!(echoed["content_type"], "application/json");
    assert_eq!(echoed["cache_control"], Value::Null);
}

#[tokio::test]
async fn omits_authorization_without_token() {
    let baseUrl = spawn_backend().await;
    let client = ApiClient::new(baseUrl, MemoryTokenStore::new());

    let echoed: Value = client.request("/echo", RequestOptions::get()).await.unwrap();
    assert_eq!(echoed["authorization"], Value::Null);
}

#[tokio::test]
async fn picks_up_token_changes_between_requests() {
    let baseUrl = spawn_backend().await;
    let mut client = ApiClient::new(baseUrl, MemoryTokenStore::new());

    client.store_mut().set("later.token.x");
    let echoed: Value = client.request("/echo", RequestOptions::get()).await.unwrap();
    assert_eq!(echoed["authorization"], "Bearer later.token.x");

    client.store_mut().clear();
    let echoed: Value = client.request("/echo", RequestOptions::get()).await.unwrap();
    assert_eq!(echoed["authorization"], Value::Null);
}

#[tokio::test]
async fn caller_content_type_wins() {
    let baseUrl = spawn_backend().await;
    let client = ApiClient::new(baseUrl, MemoryTokenStore::new());

    let opts = RequestOptions::method(Method::POST).header("Content-Type", "text/plain");
    let echoed: Value = client.request("/echo", opts).await.unwrap();
    assert_eq!(echoed["content_type"], "text/plain");
}

#[tokio::test]
async fn multipart_body_is_not_tagged_as_json() {
    let baseUrl = spawn_backend().await;
    let client = ApiClient::new(baseUrl, MemoryTokenStore::new());

    let form = reqwest::multipart::Form::new().text("kind", "scan");
    let opts = RequestOptions::method(Method::POST).multipart(form);
    let echoed: Value = client.request("/echo", opts).await.unwrap();

    let contentType = echoed["content_type"].as_str().unwrap();
    assert!(contentType.starts_with("multipart/form-data; boundary="));
}

#[tokio::test]
async fn cache_bypass_sends_no_store() {
    let baseUrl = spawn_backend().await;
    let client = ApiClient::new(baseUrl, MemoryTokenStore::new()).with_cache_bypass(true);

    let echoed: Value = client.request("/echo", RequestOptions::get()).await.unwrap();
    assert_eq!(echoed["cache_control"], "no-store");
}

#[tokio::test]
async fn non_success_becomes_status_error_with_body() {
    let baseUrl = spawn_backend().await;
    let client = ApiClient::new(baseUrl, MemoryTokenStore::new());

    let err = client.login("doctor@example.com", "wrong").await.unwrap_err();
    match &err {
        ApiError::Status { status, body } => {
            assert_eq!(*status, 401);
            assert!(body.contains("Invalid credentials"));
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(err.user_message(), "API 401: Invalid credentials");
}

#[tokio::test]
async fn missing_route_is_a_status_error() {
    let baseUrl = spawn_backend().await;
    let client = ApiClient::new(baseUrl, MemoryTokenStore::new());

    let err = client.get_patient(1).await.unwrap_err();
    assert_eq!(err.status(), Some(404));
}

#[tokio::test]
async fn empty_success_body_decodes_as_unit() {
    let baseUrl = spawn_backend().await;
    let client = ApiClient::new(baseUrl, MemoryTokenStore::new());

    client
        .request::<()>("/empty", RequestOptions::method(Method::POST))
        .await
        .unwrap();
}

#[tokio::test]
async fn login_posts_password_form() {
    let baseUrl = spawn_backend().await;
    let client = ApiClient::new(baseUrl, MemoryTokenStore::new());

    let token = client.login("admin@example.com", "admin123").await.unwrap();
    assert_eq!(token.access_token, token_for("admin"));
    assert_eq!(token.token_type, "bearer");
}

#[tokio::test]
async fn form_body_is_url_encoded() {
    let baseUrl = spawn_backend().await;
    let client = ApiClient::new(baseUrl, MemoryTokenStore::new());

    let opts = RequestOptions::method(Method::POST)
        .form([("username", "a+b@example.com"), ("password", "p&ss word")]);
    let echoed: Value = client.request("/echo", opts).await.unwrap();

    assert_eq!(echoed["content_type"], "application/x-www-form-urlencoded");
    assert_eq!(echoed["body"], "username=a%2Bb%40example.com&password=p%26ss+word");
}

#[tokio::test]
async fn sign_in_sets_cookie_and_lands_by_role() {
    let baseUrl = spawn_backend().await;
    let client = ApiClient::new(baseUrl, MemoryTokenStore::new());

    for role in Role::ALL {
        let email = format!("{}@example.com", role.as_str());
        let issued = client.login(&email, "secret").await.unwrap();

        let mut cookie = CookieTokenStore::new(CookieSettings::default());
        let outcome = start_session(&mut cookie, &issued.access_token).unwrap();

        assert_eq!(outcome.landing, role.landing_path());
        let header = cookie.set_cookie_header().unwrap();
        assert!(header.starts_with(&format!("access_token={};", issued.access_token)));
        assert!(header.contains("HttpOnly"));
        assert!(header.contains("SameSite=Lax"));
    }
}

#[tokio::test]
async fn patient_listing_forwards_status_filter() {
    let baseUrl = spawn_backend().await;
    let client = ApiClient::new(baseUrl, MemoryTokenStore::new());

    let query = PatientQuery {
        status: Some(PatientStatus::Approved),
        limit: Some(50),
        offset: None,
    };
    let patients = client.list_patients(&query).await.unwrap();
    assert_eq!(patients.len(), 1);
    assert_eq!(patients[0].status, PatientStatus::Approved);
}

#[tokio::test]
async fn case_listing_unwraps_items_envelope() {
    let baseUrl = spawn_backend().await;
    let client = ApiClient::new(baseUrl, MemoryTokenStore::new());

    let query = CaseQuery {
        patient_id: Some(42),
        ..CaseQuery::default()
    };
    let cases = client.list_cases(&query).await.unwrap();
    assert_eq!(cases[0].patient_id, 42);

    let queue = client.calc_queue(Some(50), None).await.unwrap();
    assert_eq!(queue[0].id, 9);
}

#[tokio::test]
async fn measurements_and_calculation_round_trip() {
    let baseUrl = spawn_backend().await;
    let client = ApiClient::new(baseUrl, MemoryTokenStore::with_token("a.b.c"));

    let meas = Measurements {
        axial_length_mm: Some(23.4),
        k1_d: Some(43.0),
        k2_d: None,
        note: None,
    };
    let ack = client.save_measurements(5, &meas).await.unwrap();
    assert!(ack.ok);

    let missing = client.save_measurements(6, &meas).await.unwrap_err();
    assert_eq!(missing.user_message(), "API 404: Case not found");

    let calc = client.calculate(5).await.unwrap();
    assert_eq!(calc.result.recommended_iol_power, Some(20.1));
}
