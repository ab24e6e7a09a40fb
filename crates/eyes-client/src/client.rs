use reqwest::header::{
    HeaderMap, HeaderName, HeaderValue, AUTHORIZATION, CACHE_CONTROL, CONTENT_TYPE,
};
use reqwest::multipart::Form;
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use crate::error::ApiError;
use crate::token::TokenStore;

const JSON: &str = "application/json";

pub enum RequestBody {
    Empty,
    Json(serde_json::Value),
    /// `application/x-www-form-urlencoded` pairs.
    Form(Vec<(String, String)>),
    /// Sent with its own boundary content type; never tagged as JSON.
    Multipart(Form),
}

pub struct RequestOptions {
    pub method: Method,
    pub body: RequestBody,
    pub headers: Vec<(String, String)>,
    pub query: Vec<(String, String)>,
}

impl Default for RequestOptions {
    fn default() -> Self {
        Self {
            method: Method::GET,
            body: RequestBody::Empty,
            headers: Vec::new(),
            query: Vec::new(),
        }
    }
}

impl RequestOptions {
    pub fn get() -> Self {
        Self::default()
    }

    pub fn method(method: Method) -> Self {
        Self {
            method,
            ..Self::default()
        }
    }

    pub fn json<T: Serialize>(mut self, body: &T) -> Result<Self, ApiError> {
        self.body = RequestBody::Json(serde_json::to_value(body)?);
        Ok(self)
    }

    pub fn form<K: Into<String>, V: Into<String>>(
        mut self,
        pairs: impl IntoIterator<Item = (K, V)>,
    ) -> Self {
        self.body = RequestBody::Form(
            pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        );
        self
    }

    pub fn multipart(mut self, form: Form) -> Self {
        self.body = RequestBody::Multipart(form);
        self
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Adds a query parameter; `None` values are skipped.
    pub fn query<V: ToString>(mut self, name: &str, value: Option<V>) -> Self {
        if let Some(v) = value {
            self.query.push((name.to_string(), v.to_string()));
        }
        self
    }
}

/// Backend REST client. Every request carries the bearer token currently in
/// `store`, if any.
#[derive(Clone, Debug)]
pub struct ApiClient<S> {
    http: reqwest::Client,
    base_url: String,
    bypass_cache: bool,
    store: S,
}

impl<S: TokenStore> ApiClient<S> {
    pub fn new(baseUrl: impl Into<String>, store: S) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: baseUrl.into().trim_end_matches('/').to_string(),
            bypass_cache: false,
            store,
        }
    }

    /// Send `Cache-Control: no-store` on every request.
    pub fn with_cache_bypass(mut self, bypass: bool) -> Self {
        self.bypass_cache = bypass;
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    pub fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{path}", self.base_url)
        } else {
            format!("{}/{path}", self.base_url)
        }
    }

    pub async fn request<T: DeserializeOwned>(
        &self,
        path: &str,
        opts: RequestOptions,
    ) -> Result<T, ApiError> {
        let url = self.url(path);
        let method = opts.method.clone();

        let mut headers = HeaderMap::new();
        for (name, value) in &opts.headers {
            let headerName = HeaderName::from_bytes(name.as_bytes())
                .map_err(|e| ApiError::Request(format!("header {name}: {e}")))?;
            let headerValue = HeaderValue::from_str(value)
                .map_err(|e| ApiError::Request(format!("header {name}: {e}")))?;
            headers.insert(headerName, headerValue);
        }

        if !headers.contains_key(CONTENT_TYPE) {
            match opts.body {
                // reqwest fills in the form and multipart content types
                RequestBody::Multipart(_) | RequestBody::Form(_) => {}
                RequestBody::Empty | RequestBody::Json(_) => {
                    headers.insert(CONTENT_TYPE, HeaderValue::from_static(JSON));
                }
            }
        }

        if let Some(token) = self.store.get() {
            let bearer = HeaderValue::from_str(&format!("Bearer {token}"))
                .map_err(|_| ApiError::Request("token is not a valid header value".into()))?;
            headers.insert(AUTHORIZATION, bearer);
        }

        if self.bypass_cache {
            headers.insert(CACHE_CONTROL, HeaderValue::from_static("no-store"));
        }

        let mut builder = self.http.request(opts.method, &url).headers(headers);
        if !opts.query.is_empty() {
            builder = builder.query(&opts.query);
        }
        builder = match opts.body {
            RequestBody::Empty => builder,
            RequestBody::Json(value) => builder.body(serde_json::to_vec(&value)?),
            RequestBody::Form(pairs) => builder.form(&pairs),
            RequestBody::Multipart(form) => builder.multipart(form),
        };

        debug!(%method, %url, "backend request");
        let response = builder.send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(%method, %url, status = status.as_u16(), "backend request failed");
            return Err(ApiError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let text = response.text().await?;
        let payload = if text.trim().is_empty() { "null" } else { text.as_str() };
        Ok(serde_json::from_str(payload)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::MemoryTokenStore;

    #[test]
    fn url_joins_with_single_slash() {
        let client = ApiClient::new("http://backend:8000/", MemoryTokenStore::new());
        assert_eq!(client.url("/cases/3"), "http://backend:8000/cases/3");
        assert_eq!(client.url("cases/3"), "http://backend:8000/cases/3");
    }

    #[test]
    fn query_skips_missing_values() {
        let opts = RequestOptions::get()
            .query("status", Some("NEW"))
            .query::<u32>("limit", None)
            .query("offset", Some(20));
        assert_eq!(
            opts.query,
            vec![
                ("status".to_string(), "NEW".to_string()),
                ("offset".to_string(), "20".to_string())
            ]
        );
    }
}
