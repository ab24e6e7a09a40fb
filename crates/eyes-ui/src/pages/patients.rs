use eyes_types::{Patient, PatientStatus};
use leptos::prelude::*;

use super::{error_text, LoadError, Loading};
use crate::components::status::StatusBadge;
use crate::format::or_dash;

#[server]
async fn get_patients(status: Option<String>) -> Result<Vec<Patient>, ServerFnError> {
    use eyes_types::PatientQuery;

    use crate::server::{backend, page_error};

    let query = PatientQuery {
        status: status.as_deref().and_then(PatientStatus::parse),
        ..PatientQuery::default()
    };
    backend()
        .await?
        .list_patients(&query)
        .await
        .map_err(page_error)
}

#[component]
pub fn PatientsPage() -> impl IntoView {
    #[allow(unused_variables)]
    let (patients, setPatients) = signal(Option::<Result<Vec<Patient>, String>>::None);
    #[allow(unused_variables)]
    let (status, setStatus) = signal(String::new());

    #[cfg(feature = "hydrate")]
    {
        use wasm_bindgen_futures::spawn_local;

        Effect::new(move |_| {
            let filter = Some(status.get()).filter(|s| !s.is_empty());
            setPatients.set(None);
            spawn_local(async move {
                let result = get_patients(filter).await.map_err(error_text);
                setPatients.set(Some(result));
            });
        });
    }

    view! {
        <div class="dashboard-header">
            <h1>"Patients"</h1>
            <div class="toolbar">
                <label for="status-filter">"Status"</label>
                <select id="status-filter" on:change=move |ev| setStatus.set(event_target_value(&ev))>
                    <option value="">"All"</option>
                    {PatientStatus::ALL
                        .into_iter()
                        .map(|s| view! { <option value=s.as_str()>{s.label()}</option> })
                        .collect_view()}
                </select>
            </div>
        </div>
        {move || match patients.get() {
            None => view! { <Loading what="patients" /> }.into_any(),
            Some(Err(e)) => view! { <LoadError what="patients" message=e /> }.into_any(),
            Some(Ok(list)) if list.is_empty() => {
                view! { <div class="container-empty"><p>"No patients found"</p></div> }.into_any()
            }
            Some(Ok(list)) => view! { <PatientTable patients=list /> }.into_any(),
        }}
    }
}

#[component]
fn PatientTable(patients: Vec<Patient>) -> impl IntoView {
    view! {
        <table class="data-table">
            <thead>
                <tr>
                    <th>"Name"</th>
                    <th>"Birth date"</th>
                    <th>"Diagnosis"</th>
                    <th>"Operation"</th>
                    <th>"Status"</th>
                </tr>
            </thead>
            <tbody>
                {patients
                    .into_iter()
                    .map(|p| {
                        view! {
                            <tr>
                                <td>
                                    <a href=format!("/app/patients/{}", p.id) rel="external">{p.fio}</a>
                                </td>
                                <td>{or_dash(p.birth_date.as_deref())}</td>
                                <td>{or_dash(p.diagnosis_text.as_deref())}</td>
                                <td>{or_dash(p.operation_type.as_deref())}</td>
                                <td><StatusBadge status=p.status.as_str() /></td>
                            </tr>
                        }
                    })
                    .collect_view()}
            </tbody>
        </table>
    }
}
