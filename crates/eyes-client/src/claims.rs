use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use eyes_types::{Claims, LoginOutcome, Role};

use crate::error::ClaimsError;
use crate::token::TokenStore;

/// Reads the payload segment of a JWT. The signature is not checked; the
/// backend is the only party that verifies tokens.
pub fn decode_claims(token: &str) -> Result<Claims, ClaimsError> {
    let mut segments = token.trim().split('.');
    let (Some(_header), Some(payload), Some(_signature), None) = (
        segments.next(),
        segments.next(),
        segments.next(),
        segments.next(),
    ) else {
        return Err(ClaimsError::Malformed);
    };

    let payloadBytes = URL_SAFE_NO_PAD
        .decode(payload.trim_end_matches('='))
        .map_err(|_| ClaimsError::Encoding)?;

    serde_json::from_slice(&payloadBytes).map_err(|e| ClaimsError::Payload(e.to_string()))
}

/// Role claim of `token`, or `None` when the token does not decode.
pub fn role_from_token(token: &str) -> Option<Role> {
    decode_claims(token).ok().map(|claims| claims.role)
}

/// Keeps a freshly issued token in `store` and names the holder's landing
/// page. A token that does not decode is not stored.
pub fn start_session<S: TokenStore>(
    store: &mut S,
    token: &str,
) -> Result<LoginOutcome, ClaimsError> {
    let claims = decode_claims(token)?;
    store.set(token);
    Ok(LoginOutcome {
        access_token: token.to_string(),
        landing: claims.role.landing_path().to_string(),
    })
}

#[cfg(test)]
pub(crate) fn encode_test_token(payload: &serde_json::Value) -> String {
    let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
    let body = URL_SAFE_NO_PAD.encode(payload.to_string());
    format!("{header}.{body}.c2lnbmF0dXJl")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decodes_role_and_subject() {
        let token = encode_test_token(&json!({
            "sub": "surgeon@example.com",
            "role": "surgeon",
            "exp": 1_900_000_000
        }));
        let claims = decode_claims(&token).unwrap();
        assert_eq!(claims.role, Role::Surgeon);
        assert_eq!(claims.sub, "surgeon@example.com");
        assert_eq!(claims.exp, 1_900_000_000);
    }

    #[test]
    fn expired_token_still_decodes() {
        let token = encode_test_token(&json!({"sub": "a", "role": "admin", "exp": 1}));
        assert_eq!(role_from_token(&token), Some(Role::Admin));
    }

    #[test]
    fn rejects_wrong_segment_count() {
        assert_eq!(decode_claims("abc"), Err(ClaimsError::Malformed));
        assert_eq!(decode_claims("a.b.c.d"), Err(ClaimsError::Malformed));
    }

    #[test]
    fn rejects_bad_base64() {
        assert_eq!(decode_claims("x.!!!.y"), Err(ClaimsError::Encoding));
    }

    #[test]
    fn missing_or_unknown_role_does_not_decode() {
        let noRole = encode_test_token(&json!({"sub": "a", "exp": 1}));
        assert!(matches!(decode_claims(&noRole), Err(ClaimsError::Payload(_))));

        let unknown = encode_test_token(&json!({"sub": "a", "role": "janitor", "exp": 1}));
        assert_eq!(role_from_token(&unknown), None);
    }

    #[test]
    fn wire_aliases_decode_to_roles() {
        let cases = [
            ("DISTRICT_DOCTOR", Role::Feldsher),
            ("district_doctor", Role::Feldsher),
            ("SURGEON", Role::Surgeon),
            ("ADMIN", Role::Admin),
            ("PATIENT", Role::Patient),
            ("feldsher", Role::Feldsher),
        ];
        for (wire, role) in cases {
            let token = encode_test_token(&json!({"sub": "u", "role": wire, "exp": 1}));
            assert_eq!(decode_claims(&token).map(|c| c.role), Ok(role), "{wire}");
        }
    }

    #[test]
    fn session_start_sets_cookie_and_landing_per_role() {
        use crate::token::{CookieSettings, CookieTokenStore};

        for role in Role::ALL {
            let token = encode_test_token(&json!({"sub": "u", "role": role.as_str(), "exp": 1}));
            let mut store = CookieTokenStore::new(CookieSettings::default());

            let outcome = start_session(&mut store, &token).unwrap();

            assert_eq!(outcome.landing, role.landing_path());
            assert_eq!(outcome.access_token, token);
            assert_eq!(store.get().as_deref(), Some(token.as_str()));
            let cookie = store.set_cookie_header().unwrap();
            assert!(cookie.starts_with(&format!("access_token={token};")));
            assert!(cookie.contains("Max-Age=604800"));
        }
    }

    #[test]
    fn undecodable_token_is_not_stored() {
        use crate::token::MemoryTokenStore;

        let mut store = MemoryTokenStore::new();
        assert!(start_session(&mut store, "h.p.s").is_err());
        assert_eq!(store.get(), None);
    }

    #[test]
    fn accepts_padded_payload() {
        let token = encode_test_token(&json!({"sub": "p", "role": "patient"}));
        let mut parts: Vec<String> = token.split('.').map(str::to_string).collect();
        parts[1].push_str("==");
        assert_eq!(role_from_token(&parts.join(".")), Some(Role::Patient));
    }
}
