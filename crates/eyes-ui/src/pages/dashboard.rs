use eyes_types::DashboardSummary;
use leptos::prelude::*;

use super::{error_text, LoadError, Loading};
use crate::components::card::{Card, Field};
use crate::components::status::StatusBadge;

#[server]
async fn get_dashboard() -> Result<DashboardSummary, ServerFnError> {
    use crate::server::{backend, page_error};

    backend()
        .await?
        .dashboard_summary()
        .await
        .map_err(page_error)
}

#[component]
pub fn DashboardPage() -> impl IntoView {
    #[allow(unused_variables)]
    let (summary, setSummary) = signal(Option::<Result<DashboardSummary, String>>::None);

    #[cfg(feature = "hydrate")]
    {
        use wasm_bindgen_futures::spawn_local;

        spawn_local(async move {
            let result = get_dashboard().await.map_err(error_text);
            setSummary.set(Some(result));
        });
    }

    view! {
        <div class="dashboard-header">
            <h1>"Dashboard"</h1>
            <p class="subtitle">"Patients and cases across the organization"</p>
        </div>
        {move || match summary.get() {
            None => view! { <Loading what="summary" /> }.into_any(),
            Some(Err(e)) => view! { <LoadError what="summary" message=e /> }.into_any(),
            Some(Ok(summary)) => {
                let totalCases = summary.total_cases();
                view! {
                    <div class="dashboard-grid">
                        <Card title="Totals">
                            <Field label="Patients" value=summary.total_patients.to_string() />
                            <Field label="Cases" value=totalCases.to_string() />
                        </Card>
                        <Card title="Cases by status">
                            {if summary.cases_by_status.is_empty() {
                                view! { <p class="muted">"No cases yet"</p> }.into_any()
                            } else {
                                summary
                                    .cases_by_status
                                    .into_iter()
                                    .map(|(status, count)| {
                                        view! {
                                            <div class="metric-row">
                                                <StatusBadge status=status />
                                                <span class="metric-value">{count}</span>
                                            </div>
                                        }
                                    })
                                    .collect_view()
                                    .into_any()
                            }}
                        </Card>
                    </div>
                }
                    .into_any()
            }
        }}
    }
}
