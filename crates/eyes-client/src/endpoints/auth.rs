use eyes_types::{CurrentUser, TokenResponse};
use reqwest::Method;

use crate::client::{ApiClient, RequestOptions};
use crate::error::ApiError;
use crate::token::TokenStore;

impl<S: TokenStore> ApiClient<S> {
    /// OAuth2 password form; the backend expects the email in `username`.
    pub async fn login(&self, email: &str, password: &str) -> Result<TokenResponse, ApiError> {
        let opts = RequestOptions::method(Method::POST)
            .form([("username", email), ("password", password)]);
        self.request("/auth/login", opts).await
    }

    pub async fn me(&self) -> Result<CurrentUser, ApiError> {
        self.request("/auth/me", RequestOptions::get()).await
    }
}
