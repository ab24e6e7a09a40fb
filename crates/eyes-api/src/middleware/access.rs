use axum::{
    body::Body,
    extract::State,
    http::{header, Request},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use eyes_client::{decode_claims, CookieSettings, CookieTokenStore, TokenStore};
use eyes_types::{BackendSettings, Role};
use tracing::debug;

#[derive(Clone, Debug, Default)]
pub struct AppState {
    pub cookie: CookieSettings,
    pub backend: BackendSettings,
}

impl AppState {
    /// Token cookie carried by `request`, if any.
    pub fn token_store<B>(&self, request: &Request<B>) -> CookieTokenStore {
        let cookieHeader = request
            .headers()
            .get(header::COOKIE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("");
        CookieTokenStore::from_cookie_header(cookieHeader, self.cookie.clone())
    }
}

pub const LOGIN_PATH: &str = "/login";

/// Pages served without a token: sign-in, the role redirect and the icon.
pub const PUBLIC_PATHS: &[&str] = &["/login", "/role", "/favicon.svg", "/favicon.ico"];

/// Directories served without a token: static assets and server functions.
pub const PUBLIC_PREFIXES: &[&str] = &["/pkg/", "/api/", "/assets/"];

pub struct RouteRule {
    pub prefix: &'static str,
    pub allow: &'static [Role],
}

/// Ordered; the first matching prefix decides.
pub const ROUTE_RULES: &[RouteRule] = &[
    RouteRule {
        prefix: "/app/calc-queue",
        allow: &[Role::Surgeon, Role::Admin],
    },
    RouteRule {
        prefix: "/app",
        allow: &[Role::Feldsher, Role::Surgeon, Role::Admin],
    },
    RouteRule {
        prefix: "/patient",
        allow: &[Role::Patient],
    },
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AccessDecision {
    Allow,
    Redirect(&'static str),
}

pub fn is_public(path: &str) -> bool {
    PUBLIC_PATHS.contains(&path)
        || PUBLIC_PREFIXES
            .iter()
            .any(|prefix| path.starts_with(prefix))
}

pub fn matching_rule(path: &str) -> Option<&'static RouteRule> {
    ROUTE_RULES.iter().find(|rule| path.starts_with(rule.prefix))
}

/// Decision for a user whose role is already known.
pub fn evaluate(path: &str, role: Role) -> AccessDecision {
    match matching_rule(path) {
        Some(rule) if !rule.allow.contains(&role) => AccessDecision::Redirect(role.landing_path()),
        _ => AccessDecision::Allow,
    }
}

/// Full filter: public prefixes pass, a missing or undecodable token goes
/// to the login page, everything else is decided by role.
pub fn check_access(path: &str, token: Option<&str>) -> AccessDecision {
    if is_public(path) {
        return AccessDecision::Allow;
    }

    let Some(token) = token else {
        return AccessDecision::Redirect(LOGIN_PATH);
    };

    match decode_claims(token) {
        Ok(claims) => evaluate(path, claims.role),
        Err(e) => {
            debug!("undecodable token on {path}: {e}");
            AccessDecision::Redirect(LOGIN_PATH)
        }
    }
}

/// Middleware for page routes: gates navigation on the `access_token` cookie.
pub async fn require_route_access(
    State(state): State<AppState>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let path = request.uri().path().to_string();
    let token = state.token_store(&request).get();

    match check_access(&path, token.as_deref()) {
        AccessDecision::Allow => next.run(request).await,
        AccessDecision::Redirect(to) => {
            debug!("redirecting {path} to {to}");
            Redirect::to(to).into_response()
        }
    }
}
