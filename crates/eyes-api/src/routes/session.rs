use axum::{
    body::Body,
    extract::State,
    http::{header, HeaderValue, Request, StatusCode},
    response::{IntoResponse, Json, Redirect, Response},
    routing::{get, post},
    Router,
};
use eyes_client::{decode_claims, TokenStore};
use eyes_types::SessionInfo;
use serde::Serialize;
use tracing::info;

use crate::middleware::access::{AppState, LOGIN_PATH};

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

pub fn routes(_state: AppState) -> Router<AppState> {
    Router::new()
        .route("/", get(landing_redirect))
        .route("/role", get(landing_redirect))
        .route("/api/v1/session", get(get_session))
        .route("/api/v1/session/logout", post(logout))
}

fn session_from(state: &AppState, request: &Request<Body>) -> Option<SessionInfo> {
    let token = state.token_store(request).get()?;
    decode_claims(&token).ok().map(SessionInfo::from)
}

/// Sends the user to their role's landing page, or to sign-in.
async fn landing_redirect(State(state): State<AppState>, request: Request<Body>) -> Redirect {
    match session_from(&state, &request) {
        Some(session) => Redirect::to(&session.landing),
        None => Redirect::to(LOGIN_PATH),
    }
}

async fn get_session(State(state): State<AppState>, request: Request<Body>) -> Response {
    match session_from(&state, &request) {
        Some(session) => Json(session).into_response(),
        None => (
            StatusCode::UNAUTHORIZED,
            Json(ErrorResponse {
                error: "no session".into(),
            }),
        )
            .into_response(),
    }
}

async fn logout(State(state): State<AppState>, request: Request<Body>) -> Response {
    let mut store = state.token_store(&request);
    store.clear();

    if let Some(subject) = session_from(&state, &request).map(|s| s.subject) {
        info!("signing out {subject}");
    }

    let mut response = Redirect::to(LOGIN_PATH).into_response();
    if let Some(cookie) = store.set_cookie_header() {
        match HeaderValue::from_str(cookie) {
            Ok(value) => {
                response.headers_mut().insert(header::SET_COOKIE, value);
            }
            Err(_) => return StatusCode::INTERNAL_SERVER_ERROR.into_response(),
        }
    }
    response
}
