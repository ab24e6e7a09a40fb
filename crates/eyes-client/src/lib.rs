#![allow(non_snake_case)]

pub mod claims;
pub mod error;
pub mod token;

#[cfg(feature = "http")]
pub mod client;
#[cfg(feature = "http")]
pub mod endpoints;

pub use claims::{decode_claims, role_from_token, start_session};
pub use error::{ApiError, ClaimsError};
pub use token::{CookieSettings, CookieTokenStore, MemoryTokenStore, TokenStore, TOKEN_KEY};

#[cfg(feature = "http")]
pub use client::{ApiClient, RequestBody, RequestOptions};
