use eyes_types::{Role, SessionInfo};
use leptos::prelude::*;

/// Session as seen by the server, read from the request's token cookie.
#[server]
pub async fn current_session() -> Result<Option<SessionInfo>, ServerFnError> {
    use eyes_client::TokenStore;

    let client = crate::server::backend().await?;
    Ok(client
        .store()
        .get()
        .and_then(|token| eyes_client::decode_claims(&token).ok())
        .map(SessionInfo::from))
}

/// Role claimed by a locally stored token; blank or undecodable tokens count as absent.
pub fn stored_role(token: Option<&str>) -> Option<Role> {
    token
        .filter(|t| !t.trim().is_empty())
        .and_then(eyes_client::role_from_token)
}

pub fn can_see_calc_queue(role: Option<Role>) -> bool {
    matches!(role, Some(Role::Surgeon | Role::Admin))
}

#[component]
pub fn Nav() -> impl IntoView {
    #[allow(unused_variables)]
    let (role, setRole) = signal(Option::<Role>::None);

    // Server HTML is rendered without a role; fill it in after hydration.
    Effect::new(move |_| {
        #[cfg(feature = "hydrate")]
        {
            use crate::session::LocalStorageTokenStore;
            use eyes_client::TokenStore;
            use wasm_bindgen_futures::spawn_local;

            match stored_role(LocalStorageTokenStore.get().as_deref()) {
                Some(r) => setRole.set(Some(r)),
                // signed in before local storage was populated, e.g. another tab
                None => spawn_local(async move {
                    if let Ok(Some(session)) = current_session().await {
                        setRole.set(Some(session.role));
                    }
                }),
            }
        }
    });

    let clearLocalToken = move |_| {
        #[cfg(feature = "hydrate")]
        {
            use crate::session::LocalStorageTokenStore;
            use eyes_client::TokenStore;
            LocalStorageTokenStore.clear();
        }
    };

    view! {
        <nav class="nav-sidebar">
            <div class="nav-brand">
                <div class="brand-icon">"E"</div>
                <span class="brand-text">"Eyes Console"</span>
            </div>
            <ul class="nav-links">
                <NavLink href="/app/dashboard" icon="\u{25A3}" label="Dashboard" />
                <NavLink href="/app/patients" icon="\u{263A}" label="Patients" />
                <NavLink href="/app/cases" icon="\u{2338}" label="Cases" />
                <Show when=move || can_see_calc_queue(role.get())>
                    <NavLink href="/app/calc-queue" icon="\u{2211}" label="Calc queue" />
                </Show>
            </ul>
            <div class="nav-footer">
                <span class="nav-role">{move || role.get().map(|r| r.label()).unwrap_or("")}</span>
                <form method="post" action="/api/v1/session/logout" on:submit=clearLocalToken>
                    <button type="submit" class="btn btn-secondary">"Sign out"</button>
                </form>
            </div>
        </nav>
    }
}

#[component]
fn NavLink(href: &'static str, icon: &'static str, label: &'static str) -> impl IntoView {
    view! {
        <li class="nav-item">
            <a href=href rel="external">
                <span class="nav-icon">{icon}</span>
                <span>{label}</span>
            </a>
        </li>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn calc_queue_link_is_for_surgeons_and_admins() {
        assert!(can_see_calc_queue(Some(Role::Surgeon)));
        assert!(can_see_calc_queue(Some(Role::Admin)));
        assert!(!can_see_calc_queue(Some(Role::Feldsher)));
        assert!(!can_see_calc_queue(None));
    }

    #[test]
    fn stored_role_ignores_missing_and_broken_tokens() {
        assert_eq!(stored_role(None), None);
        assert_eq!(stored_role(Some("")), None);
        assert_eq!(stored_role(Some("abc.def")), None);

        let payload = base64::Engine::encode(
            &base64::engine::general_purpose::URL_SAFE_NO_PAD,
            r#"{"sub":"s@example.com","role":"SURGEON","exp":1}"#,
        );
        let token = format!("h.{payload}.s");
        assert_eq!(stored_role(Some(&token)), Some(Role::Surgeon));
        assert!(can_see_calc_queue(stored_role(Some(&token))));
    }
}
