use eyes_types::{CaseSummary, CreatedCase, Patient};
use leptos::prelude::*;
use leptos_router::hooks::use_params_map;
use serde::{Deserialize, Serialize};

use super::{error_text, LoadError, Loading};
use crate::components::card::{Card, Field};
use crate::components::status::StatusBadge;
use crate::format::{format_timestamp, or_dash, pluralize};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PatientOverview {
    pub patient: Patient,
    pub cases: Vec<CaseSummary>,
}

#[server]
async fn get_patient_overview(id: i64) -> Result<PatientOverview, ServerFnError> {
    use eyes_types::CaseQuery;

    use crate::server::{backend, page_error};

    let client = backend().await?;
    let patient = client.get_patient(id).await.map_err(page_error)?;
    let cases = client
        .list_cases(&CaseQuery {
            patient_id: Some(id),
            ..CaseQuery::default()
        })
        .await
        .map_err(page_error)?;

    Ok(PatientOverview { patient, cases })
}

#[server]
async fn open_case(patient_id: i64) -> Result<CreatedCase, ServerFnError> {
    use eyes_types::NewCase;

    use crate::server::{backend, page_error};

    let created = backend()
        .await?
        .create_case(&NewCase {
            patient_id,
            template_id: None,
            status: None,
        })
        .await
        .map_err(page_error)?;
    tracing::info!(patient_id, case_id = created.id, "case opened");
    Ok(created)
}

#[component]
pub fn PatientDetailPage() -> impl IntoView {
    let params = use_params_map();
    #[allow(unused_variables)]
    let patientId = params
        .read_untracked()
        .get("id")
        .and_then(|raw| raw.parse::<i64>().ok());

    #[allow(unused_variables)]
    let (overview, setOverview) = signal(Option::<Result<PatientOverview, String>>::None);
    #[allow(unused_variables)]
    let (openError, setOpenError) = signal(Option::<String>::None);

    Effect::new(move |_| {
        #[cfg(feature = "hydrate")]
        {
            use wasm_bindgen_futures::spawn_local;

            match patientId {
                Some(id) => spawn_local(async move {
                    let result = get_patient_overview(id).await.map_err(error_text);
                    setOverview.set(Some(result));
                }),
                None => setOverview.set(Some(Err("invalid patient id".into()))),
            }
        }
    });

    let handleOpenCase = move |_| {
        #[cfg(feature = "hydrate")]
        {
            use wasm_bindgen_futures::spawn_local;

            let Some(id) = patientId else { return };
            setOpenError.set(None);
            spawn_local(async move {
                match open_case(id).await {
                    Ok(created) => crate::session::navigate_full(&format!("/app/cases/{}", created.id)),
                    Err(e) => setOpenError.set(Some(error_text(e))),
                }
            });
        }
    };

    view! {
        {move || match overview.get() {
            None => view! { <Loading what="patient" /> }.into_any(),
            Some(Err(e)) => view! { <LoadError what="patient" message=e /> }.into_any(),
            Some(Ok(PatientOverview { patient, cases })) => {
                view! {
                    <div class="dashboard-header">
                        <h1>{patient.fio.clone()}</h1>
                        <StatusBadge status=patient.status.as_str() />
                    </div>
                    <div class="dashboard-grid">
                        <Card title="Patient">
                            <Field label="Birth date" value=or_dash(patient.birth_date.as_deref()) />
                            <Field label="Sex" value=or_dash(patient.sex.as_deref()) />
                            <Field label="Diagnosis" value=or_dash(patient.diagnosis_text.as_deref()) />
                            <Field label="Operation" value=or_dash(patient.operation_type.as_deref()) />
                            <Field label="Registered" value=format_timestamp(Some(patient.created_at.as_str())) />
                        </Card>
                        <Card title="Identifiers">
                            <Field label="SNILS" value=or_dash(patient.snils.as_deref()) />
                            <Field label="Policy" value=or_dash(patient.polis.as_deref()) />
                            <Field label="Passport" value=or_dash(patient.passport.as_deref()) />
                            <Field label="FHIR id" value=or_dash(patient.fhir_id.as_deref()) />
                            <Field label="External id" value=or_dash(patient.external_system_id.as_deref()) />
                        </Card>
                    </div>
                    <Card title=pluralize(cases.len(), "case", "cases") class="cases-card">
                        <CaseRows cases=cases />
                        <button type="button" class="btn btn-primary" on:click=handleOpenCase>
                            "Open new case"
                        </button>
                        {move || openError.get().map(|e| view! { <p class="login-error">{e}</p> })}
                    </Card>
                }
                    .into_any()
            }
        }}
    }
}

#[component]
fn CaseRows(cases: Vec<CaseSummary>) -> impl IntoView {
    cases
        .into_iter()
        .map(|c| {
            view! {
                <div class="metric-row">
                    <a href=format!("/app/cases/{}", c.id) rel="external">{format!("Case #{}", c.id)}</a>
                    <StatusBadge status=c.status />
                    <span class="metric-value">{format!("{}%", c.progress_percent)}</span>
                </div>
            }
        })
        .collect_view()
}
