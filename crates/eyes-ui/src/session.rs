//! Browser side of the session: the local-storage token copy and full-page
//! navigation.

#[cfg(feature = "hydrate")]
use eyes_client::{TokenStore, TOKEN_KEY};

/// Token kept in `window.localStorage`. Only reachable in the browser.
#[cfg(feature = "hydrate")]
#[derive(Clone, Copy, Debug, Default)]
pub struct LocalStorageTokenStore;

#[cfg(feature = "hydrate")]
impl LocalStorageTokenStore {
    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()?.local_storage().ok()?
    }
}

#[cfg(feature = "hydrate")]
impl TokenStore for LocalStorageTokenStore {
    fn get(&self) -> Option<String> {
        Self::storage()?
            .get_item(TOKEN_KEY)
            .ok()?
            .filter(|token| !token.is_empty())
    }

    fn set(&mut self, token: &str) {
        if let Some(storage) = Self::storage() {
            let _ = storage.set_item(TOKEN_KEY, token);
        }
    }

    fn clear(&mut self) {
        if let Some(storage) = Self::storage() {
            let _ = storage.remove_item(TOKEN_KEY);
        }
    }
}

/// Leaves the client router so the server-side route filter sees the request.
#[cfg(feature = "hydrate")]
pub fn navigate_full(path: &str) {
    if let Some(window) = web_sys::window() {
        let _ = window.location().set_href(path);
    }
}
