use eyes_types::{CaseSummary, CASE_STATUSES};
use leptos::prelude::*;

use super::{error_text, LoadError, Loading};
use crate::components::status::StatusBadge;
use crate::format::{format_timestamp, humanize_status};

#[server]
async fn get_cases(status: Option<String>) -> Result<Vec<CaseSummary>, ServerFnError> {
    use eyes_types::CaseQuery;

    use crate::server::{backend, page_error};

    backend()
        .await?
        .list_cases(&CaseQuery {
            status,
            ..CaseQuery::default()
        })
        .await
        .map_err(page_error)
}

#[component]
pub fn CasesPage() -> impl IntoView {
    #[allow(unused_variables)]
    let (cases, setCases) = signal(Option::<Result<Vec<CaseSummary>, String>>::None);
    #[allow(unused_variables)]
    let (status, setStatus) = signal(String::new());

    #[cfg(feature = "hydrate")]
    {
        use wasm_bindgen_futures::spawn_local;

        Effect::new(move |_| {
            let filter = Some(status.get()).filter(|s| !s.is_empty());
            setCases.set(None);
            spawn_local(async move {
                let result = get_cases(filter).await.map_err(error_text);
                setCases.set(Some(result));
            });
        });
    }

    view! {
        <div class="dashboard-header">
            <h1>"Cases"</h1>
            <div class="toolbar">
                <label for="case-status">"Status"</label>
                <select id="case-status" on:change=move |ev| setStatus.set(event_target_value(&ev))>
                    <option value="">"All"</option>
                    {CASE_STATUSES
                        .iter()
                        .map(|s| view! { <option value=*s>{humanize_status(s)}</option> })
                        .collect_view()}
                </select>
            </div>
        </div>
        {move || match cases.get() {
            None => view! { <Loading what="cases" /> }.into_any(),
            Some(Err(e)) => view! { <LoadError what="cases" message=e /> }.into_any(),
            Some(Ok(list)) if list.is_empty() => {
                view! { <div class="container-empty"><p>"No cases found"</p></div> }.into_any()
            }
            Some(Ok(list)) => {
                view! {
                    <table class="data-table">
                        <thead>
                            <tr>
                                <th>"Case"</th>
                                <th>"Patient"</th>
                                <th>"Status"</th>
                                <th>"Progress"</th>
                                <th>"Updated"</th>
                            </tr>
                        </thead>
                        <tbody>
                            {list
                                .into_iter()
                                .map(|c| {
                                    view! {
                                        <tr>
                                            <td>
                                                <a href=format!("/app/cases/{}", c.id) rel="external">
                                                    {format!("#{}", c.id)}
                                                </a>
                                            </td>
                                            <td>
                                                <a href=format!("/app/patients/{}", c.patient_id) rel="external">
                                                    {format!("Patient #{}", c.patient_id)}
                                                </a>
                                            </td>
                                            <td><StatusBadge status=c.status /></td>
                                            <td>
                                                <progress max="100" value=c.progress_percent.to_string()></progress>
                                            </td>
                                            <td>{format_timestamp(c.updated_at.as_deref())}</td>
                                        </tr>
                                    }
                                })
                                .collect_view()}
                        </tbody>
                    </table>
                }
                    .into_any()
            }
        }}
    }
}
