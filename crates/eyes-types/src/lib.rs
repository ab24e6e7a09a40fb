pub mod case;
pub mod dashboard;
pub mod patient;
pub mod session;

pub use case::*;
pub use dashboard::*;
pub use patient::*;
pub use session::*;

use serde::{Deserialize, Serialize};

/// Backend connection settings shared via Leptos context.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct BackendSettings {
    pub base_url: String,
    pub bypass_cache: bool,
    pub secure_cookie: bool,
}

impl Default for BackendSettings {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".into(),
            bypass_cache: true,
            secure_cookie: false,
        }
    }
}

/// The backend's `{ "items": [...] }` list envelope.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Listing<T> {
    pub items: Vec<T>,
}

/// Generic `{ "ok": true }` acknowledgement.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct Ack {
    #[serde(default)]
    pub ok: bool,
}
