use leptos::prelude::*;

/// Titled panel wrapping a block of page content.
#[component]
pub fn Card(
    #[prop(into)] title: String,
    #[prop(optional, into)] class: String,
    children: Children,
) -> impl IntoView {
    view! {
        <section class=format!("card {class}")>
            <div class="card-title">{title}</div>
            {children()}
        </section>
    }
}

/// One label/value row inside a card.
#[component]
pub fn Field(#[prop(into)] label: String, #[prop(into)] value: String) -> impl IntoView {
    view! {
        <div class="metric-row">
            <span class="metric-label">{label}</span>
            <span class="metric-value">{value}</span>
        </div>
    }
}

/// Pretty-printed JSON for blobs the page does not interpret.
#[component]
pub fn JsonBlock(value: serde_json::Value) -> impl IntoView {
    let text = serde_json::to_string_pretty(&value).unwrap_or_else(|_| value.to_string());
    view! { <pre class="json-block">{text}</pre> }
}
