pub mod calc_queue;
pub mod case_detail;
pub mod cases;
pub mod dashboard;
pub mod login;
pub mod patient_detail;
pub mod patient_home;
pub mod patients;

use leptos::prelude::*;

/// Message text of a failed server call, without the transport prefix.
pub(crate) fn error_text(e: ServerFnError) -> String {
    match e {
        ServerFnError::ServerError(message) => message,
        other => other.to_string(),
    }
}

#[component]
pub(crate) fn Loading(#[prop(into)] what: String) -> impl IntoView {
    view! {
        <div class="loading">
            <div class="spinner"></div>
            {format!("Loading {what}...")}
        </div>
    }
}

#[component]
pub(crate) fn LoadError(#[prop(into)] what: String, #[prop(into)] message: String) -> impl IntoView {
    view! {
        <div class="card">
            <p class="login-error">{format!("Failed to load {what}: {message}")}</p>
        </div>
    }
}
