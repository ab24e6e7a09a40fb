use std::sync::{Arc, Mutex};

/// Cookie name and local-storage key holding the bearer token.
pub const TOKEN_KEY: &str = "access_token";

const WEEK_SECS: u64 = 60 * 60 * 24 * 7;

/// Holds one opaque bearer token. Implementations differ only in where the
/// token lives; none of them validate or expire it.
pub trait TokenStore {
    fn get(&self) -> Option<String>;
    fn set(&mut self, token: &str);
    fn clear(&mut self);
}

/// In-process store. Clones share the same slot.
#[derive(Clone, Debug, Default)]
pub struct MemoryTokenStore {
    slot: Arc<Mutex<Option<String>>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            slot: Arc::new(Mutex::new(Some(token.into()))),
        }
    }
}

impl TokenStore for MemoryTokenStore {
    fn get(&self) -> Option<String> {
        self.slot.lock().ok().and_then(|slot| slot.clone())
    }

    fn set(&mut self, token: &str) {
        if let Ok(mut slot) = self.slot.lock() {
            *slot = Some(token.to_string());
        }
    }

    fn clear(&mut self) {
        if let Ok(mut slot) = self.slot.lock() {
            *slot = None;
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct CookieSettings {
    pub name: String,
    pub max_age_secs: u64,
    pub secure: bool,
}

impl Default for CookieSettings {
    fn default() -> Self {
        Self {
            name: TOKEN_KEY.into(),
            max_age_secs: WEEK_SECS,
            secure: false,
        }
    }
}

/// Server-side view of the token cookie for one request.
///
/// `get` reads the incoming `Cookie` header. `set` and `clear` update the
/// value seen by later `get` calls and queue a `Set-Cookie` header that the
/// caller must attach to the response.
#[derive(Clone, Debug, Default)]
pub struct CookieTokenStore {
    settings: CookieSettings,
    current: Option<String>,
    pending: Option<String>,
}

impl CookieTokenStore {
    pub fn new(settings: CookieSettings) -> Self {
        Self {
            settings,
            current: None,
            pending: None,
        }
    }

    pub fn from_cookie_header(cookieHeader: &str, settings: CookieSettings) -> Self {
        let current = extract_cookie_value(cookieHeader, &settings.name)
            .map(|raw| match urlencoding::decode(&raw) {
                Ok(decoded) => decoded.into_owned(),
                Err(_) => raw,
            })
            .filter(|token| !token.is_empty());

        Self {
            settings,
            current,
            pending: None,
        }
    }

    /// `Set-Cookie` value produced by the last `set` or `clear`.
    pub fn set_cookie_header(&self) -> Option<&str> {
        self.pending.as_deref()
    }

    fn cookie_line(&self, value: &str, maxAge: u64) -> String {
        let secure = if self.settings.secure { "; Secure" } else { "" };
        format!(
            "{}={}; HttpOnly{secure}; SameSite=Lax; Path=/; Max-Age={maxAge}",
            self.settings.name,
            urlencoding::encode(value),
        )
    }
}

impl TokenStore for CookieTokenStore {
    fn get(&self) -> Option<String> {
        self.current.clone()
    }

    fn set(&mut self, token: &str) {
        self.pending = Some(self.cookie_line(token, self.settings.max_age_secs));
        self.current = Some(token.to_string());
    }

    fn clear(&mut self) {
        self.pending = Some(self.cookie_line("", 0));
        self.current = None;
    }
}

/// Value of cookie `name` from a raw `Cookie` header, undecoded.
pub fn extract_cookie_value(cookieHeader: &str, name: &str) -> Option<String> {
    let prefix = format!("{name}=");
    cookieHeader
        .split(';')
        .map(str::trim)
        .find_map(|part| part.strip_prefix(&prefix))
        .map(str::to_string)
}
