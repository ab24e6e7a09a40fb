use eyes_types::LoginOutcome;
use leptos::prelude::*;

use super::error_text;

/// Exchanges credentials for a token and sets the `access_token` cookie.
/// The token is also returned so the browser can keep its own copy.
#[server]
async fn login(email: String, password: String) -> Result<LoginOutcome, ServerFnError> {
    use eyes_client::{start_session, ApiClient, CookieTokenStore, MemoryTokenStore};
    use http::header::{HeaderValue, SET_COOKIE};
    use leptos_axum::ResponseOptions;

    use crate::server::{backend_settings, cookie_settings, page_error};

    let settings = backend_settings()?;
    let client = ApiClient::new(settings.base_url.clone(), MemoryTokenStore::new())
        .with_cache_bypass(settings.bypass_cache);
    let token = client
        .login(email.trim(), &password)
        .await
        .map_err(page_error)?;

    let mut cookie = CookieTokenStore::new(cookie_settings(&settings));
    let outcome = start_session(&mut cookie, &token.access_token).map_err(|e| {
        tracing::warn!("backend issued an unreadable token: {e}");
        ServerFnError::new("Sign-in returned an unusable token")
    })?;

    if let Some(line) = cookie.set_cookie_header() {
        let responseOptions = expect_context::<ResponseOptions>();
        responseOptions.insert_header(
            SET_COOKIE,
            HeaderValue::from_str(line)
                .map_err(|e| ServerFnError::new(format!("cookie error: {e}")))?,
        );
    }

    tracing::info!(email = %email.trim(), landing = %outcome.landing, "signed in");

    Ok(outcome)
}

#[component]
pub fn LoginPage() -> impl IntoView {
    let loginAction = ServerAction::<Login>::new();
    let loginValue = loginAction.value();

    Effect::new(move |_| {
        if let Some(Ok(outcome)) = loginValue.get() {
            #[cfg(feature = "hydrate")]
            {
                use crate::session::{navigate_full, LocalStorageTokenStore};
                use eyes_client::TokenStore;

                LocalStorageTokenStore.set(&outcome.access_token);
                navigate_full(&outcome.landing);
            }
            #[cfg(not(feature = "hydrate"))]
            let _ = outcome;
        }
    });

    let errorMessage = move || {
        loginValue
            .get()
            .and_then(|result| result.err())
            .map(error_text)
    };

    view! {
        <div class="login-page">
            <div class="login-card">
                <div class="login-header">
                    <div class="login-icon">"E"</div>
                    <h1>"Eyes Console"</h1>
                    <p>"Sign in with your work account"</p>
                </div>

                {move || errorMessage().map(|e| view! { <div class="login-error">{e}</div> })}

                <ActionForm action=loginAction>
                    <div class="form-group">
                        <label for="email">"Email"</label>
                        <input type="email" id="email" name="email" autocomplete="username" required />
                    </div>
                    <div class="form-group">
                        <label for="password">"Password"</label>
                        <input
                            type="password"
                            id="password"
                            name="password"
                            autocomplete="current-password"
                            required
                        />
                    </div>
                    <button
                        type="submit"
                        class="btn btn-primary"
                        disabled=move || loginAction.pending().get()
                    >
                        {move || if loginAction.pending().get() { "Signing in..." } else { "Sign In" }}
                    </button>
                </ActionForm>
            </div>
        </div>
    }
}
