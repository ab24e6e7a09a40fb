use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    /// Backend answered with a non-2xx status.
    #[error("API {status}: {body}")]
    Status { status: u16, body: String },

    #[cfg(feature = "http")]
    #[error("network error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid request: {0}")]
    Request(String),
}

impl ApiError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Human-readable text for the page. FastAPI errors carry a `detail`
    /// field; prefer it over the raw body when present.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Status { status, body } => {
                let detail = serde_json::from_str::<serde_json::Value>(body)
                    .ok()
                    .and_then(|v| v.get("detail").and_then(|d| d.as_str()).map(str::to_string));
                match detail {
                    Some(d) => format!("API {status}: {d}"),
                    None => self.to_string(),
                }
            }
            other => other.to_string(),
        }
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum ClaimsError {
    #[error("token is not a three-part JWT")]
    Malformed,
    #[error("token payload is not valid base64url")]
    Encoding,
    #[error("token payload is not a claims object: {0}")]
    Payload(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_message_prefers_detail() {
        let err = ApiError::Status {
            status: 404,
            body: r#"{"detail":"Case not found"}"#.into(),
        };
        assert_eq!(err.user_message(), "API 404: Case not found");
        assert_eq!(err.to_string(), r#"API 404: {"detail":"Case not found"}"#);
    }

    #[test]
    fn user_message_falls_back_to_body() {
        let err = ApiError::Status {
            status: 502,
            body: "Bad Gateway".into(),
        };
        assert_eq!(err.user_message(), "API 502: Bad Gateway");
        assert_eq!(err.status(), Some(502));
    }
}
