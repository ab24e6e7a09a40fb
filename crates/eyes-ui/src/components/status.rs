use leptos::prelude::*;

use crate::format::humanize_status;

pub fn status_class(status: &str) -> &'static str {
    match status {
        "CALCULATED" | "APPROVED" | "SURGERY_DONE" => "status-done",
        "ON_REVIEW" | "READY_FOR_REVIEW" | "IN_CALC_QUEUE" | "SURGERY_SCHEDULED" => "status-review",
        "REVISION_REQUIRED" | "NEED_DATA" => "status-attention",
        _ => "status-other",
    }
}

#[component]
pub fn StatusBadge(#[prop(into)] status: String) -> impl IntoView {
    let cls = status_class(&status);
    view! {
        <span class=format!("status-badge {cls}") title=status.clone()>
            {humanize_status(&status)}
        </span>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn review_states_share_a_class() {
        assert_eq!(status_class("ON_REVIEW"), status_class("READY_FOR_REVIEW"));
        assert_eq!(status_class("CALCULATED"), "status-done");
        assert_eq!(status_class("DRAFT"), "status-other");
    }
}
