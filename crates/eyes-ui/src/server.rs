//! Server-function plumbing: builds a backend client from the request's
//! token cookie.

use eyes_client::{ApiClient, ApiError, CookieSettings, CookieTokenStore};
use eyes_types::BackendSettings;
use leptos::prelude::*;

pub fn backend_settings() -> Result<BackendSettings, ServerFnError> {
    use_context::<BackendSettings>().ok_or_else(|| ServerFnError::new("backend settings unavailable"))
}

pub fn cookie_settings(settings: &BackendSettings) -> CookieSettings {
    CookieSettings {
        secure: settings.secure_cookie,
        ..CookieSettings::default()
    }
}

/// Client for the current request, authorized with its `access_token` cookie.
pub async fn backend() -> Result<ApiClient<CookieTokenStore>, ServerFnError> {
    let settings = backend_settings()?;
    let headers: http::HeaderMap = leptos_axum::extract().await?;
    let cookieHeader = headers
        .get(http::header::COOKIE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");
    let store = CookieTokenStore::from_cookie_header(cookieHeader, cookie_settings(&settings));

    Ok(ApiClient::new(settings.base_url, store).with_cache_bypass(settings.bypass_cache))
}

/// Backend failures surface to the page as their message text.
pub fn page_error(e: ApiError) -> ServerFnError {
    tracing::warn!("backend call failed: {e}");
    ServerFnError::new(e.user_message())
}
