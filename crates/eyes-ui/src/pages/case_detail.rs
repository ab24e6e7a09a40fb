use eyes_types::{
    Ack, CalculateResponse, CaseComment, CaseDetail, CaseItem, HistoryEntry, Measurements,
};
use leptos::prelude::*;
use leptos_router::hooks::use_params_map;

use super::{error_text, LoadError, Loading};
use crate::components::card::{Card, Field, JsonBlock};
use crate::components::gauge::ProgressGauge;
use crate::components::status::StatusBadge;
use crate::components::toast::use_toasts;
use crate::format::{format_timestamp, humanize_status, number_field, or_dash, parse_optional_number};

#[server]
async fn get_case(case_id: i64) -> Result<CaseDetail, ServerFnError> {
    use crate::server::{backend, page_error};

    backend().await?.get_case(case_id).await.map_err(page_error)
}

/// Fields arrive as the raw form strings; blank means "not measured".
#[server]
async fn save_measurements(
    case_id: i64,
    axial_length_mm: String,
    k1_d: String,
    k2_d: String,
    note: String,
) -> Result<Ack, ServerFnError> {
    use crate::server::{backend, page_error};

    let measurements = read_measurements(&axial_length_mm, &k1_d, &k2_d, &note)
        .map_err(ServerFnError::new)?;
    backend()
        .await?
        .save_measurements(case_id, &measurements)
        .await
        .map_err(page_error)
}

#[server]
async fn run_calculation(case_id: i64) -> Result<CalculateResponse, ServerFnError> {
    use crate::server::{backend, page_error};

    let response = backend()
        .await?
        .calculate(case_id)
        .await
        .map_err(page_error)?;
    tracing::info!(
        case_id,
        power = ?response.result.recommended_iol_power,
        "calculation finished"
    );
    Ok(response)
}

pub fn read_measurements(
    axialLength: &str,
    k1: &str,
    k2: &str,
    note: &str,
) -> Result<Measurements, String> {
    Ok(Measurements {
        axial_length_mm: parse_optional_number("Axial length", axialLength)?,
        k1_d: parse_optional_number("K1", k1)?,
        k2_d: parse_optional_number("K2", k2)?,
        note: Some(note.trim().to_string()).filter(|n| !n.is_empty()),
    })
}

#[component]
pub fn CaseDetailPage() -> impl IntoView {
    let params = use_params_map();
    #[allow(unused_variables)]
    let caseId = params
        .read_untracked()
        .get("id")
        .and_then(|raw| raw.parse::<i64>().ok());

    #[allow(unused_variables)]
    let (detail, setDetail) = signal(Option::<Result<CaseDetail, String>>::None);
    let saveAction = ServerAction::<SaveMeasurements>::new();
    let calcAction = ServerAction::<RunCalculation>::new();
    let toasts = use_toasts();

    // Reload after every completed save or calculation.
    Effect::new(move |_| {
        let _ = (saveAction.version().get(), calcAction.version().get());

        #[cfg(feature = "hydrate")]
        {
            use wasm_bindgen_futures::spawn_local;

            match caseId {
                Some(id) => spawn_local(async move {
                    let result = get_case(id).await.map_err(error_text);
                    setDetail.set(Some(result));
                }),
                None => setDetail.set(Some(Err("invalid case id".into()))),
            }
        }
    });

    Effect::new(move |_| {
        if let Some(Ok(_)) = saveAction.value().get() {
            toasts.success("Measurements saved");
        }
    });
    Effect::new(move |_| {
        if let Some(Ok(response)) = calcAction.value().get() {
            match response.result.recommended_iol_power {
                Some(power) => toasts.success(format!("Recommended IOL: {power:.2} D")),
                None => toasts.info("Calculation finished without a recommendation"),
            }
        }
    });

    let saveError = move || saveAction.value().get().and_then(|r| r.err()).map(error_text);
    let calcError = move || calcAction.value().get().and_then(|r| r.err()).map(error_text);

    view! {
        {move || match detail.get() {
            None => view! { <Loading what="case" /> }.into_any(),
            Some(Err(e)) => view! { <LoadError what="case" message=e /> }.into_any(),
            Some(Ok(case)) => {
                let measurements = case.measurements().unwrap_or_default();
                let calculation = case.calculation();
                let rawResult = case.calc_result.clone();
                let checklist: Vec<CaseItem> = case.checklist().cloned().collect();
                let doneCount = checklist.iter().filter(|item| item.done).count();
                let totalCount = checklist.len();
                let id = case.id;

                view! {
                    <div class="dashboard-header">
                        <h1>{format!("Case #{id}")}</h1>
                        <StatusBadge status=case.status.clone() />
                        <a href=format!("/app/patients/{}", case.patient_id) rel="external">
                            {format!("Patient #{}", case.patient_id)}
                        </a>
                    </div>
                    <div class="dashboard-grid">
                        <Card title="Progress">
                            <ProgressGauge
                                percent=case.progress_percent
                                label=format!("{doneCount} of {totalCount} items")
                            />
                            <Field label="Created" value=format_timestamp(case.created_at.as_deref()) />
                            <Field label="Updated" value=format_timestamp(case.updated_at.as_deref()) />
                        </Card>
                        <Card title="Measurements">
                            <ActionForm action=saveAction>
                                <input type="hidden" name="case_id" value=id.to_string() />
                                <div class="form-group">
                                    <label for="axial_length_mm">"Axial length, mm"</label>
                                    <input
                                        id="axial_length_mm"
                                        name="axial_length_mm"
                                        inputmode="decimal"
                                        value=number_field(measurements.axial_length_mm)
                                    />
                                </div>
                                <div class="form-group">
                                    <label for="k1_d">"K1, D"</label>
                                    <input id="k1_d" name="k1_d" inputmode="decimal" value=number_field(measurements.k1_d) />
                                </div>
                                <div class="form-group">
                                    <label for="k2_d">"K2, D"</label>
                                    <input id="k2_d" name="k2_d" inputmode="decimal" value=number_field(measurements.k2_d) />
                                </div>
                                <div class="form-group">
                                    <label for="note">"Note"</label>
                                    <input id="note" name="note" value=measurements.note.clone().unwrap_or_default() />
                                </div>
                                <button type="submit" class="btn btn-primary" disabled=move || saveAction.pending().get()>
                                    "Save"
                                </button>
                            </ActionForm>
                            {move || saveError().map(|e| view! { <p class="login-error">{e}</p> })}
                        </Card>
                        <Card title="Calculation">
                            {match calculation {
                                Some(result) if result.recommended_iol_power.is_some() => {
                                    view! {
                                        <Field
                                            label="Recommended IOL"
                                            value=result
                                                .recommended_iol_power
                                                .map(|p| format!("{p:.2} D"))
                                                .unwrap_or_default()
                                        />
                                        <Field label="Axial length" value=number_field(result.input.axial_length_mm) />
                                        <Field label="K1" value=number_field(result.input.k1_d) />
                                        <Field label="K2" value=number_field(result.input.k2_d) />
                                        <ul class="warnings">
                                            {result
                                                .warnings
                                                .into_iter()
                                                .map(|w| view! { <li>{w}</li> })
                                                .collect_view()}
                                        </ul>
                                    }
                                        .into_any()
                                }
                                _ => match rawResult {
                                    Some(raw) if !raw.is_null() => view! { <JsonBlock value=raw /> }.into_any(),
                                    _ => view! { <p class="muted">"Not calculated yet"</p> }.into_any(),
                                },
                            }}
                            <button
                                type="button"
                                class="btn btn-primary"
                                disabled=move || calcAction.pending().get()
                                on:click=move |_| {
                                    calcAction.dispatch(RunCalculation { case_id: id });
                                }
                            >
                                {move || if calcAction.pending().get() { "Calculating..." } else { "Calculate" }}
                            </button>
                            {move || calcError().map(|e| view! { <p class="login-error">{e}</p> })}
                        </Card>
                    </div>
                    <Card title="Checklist">
                        <ChecklistRows items=checklist />
                    </Card>
                    <div class="dashboard-grid">
                        <Card title="History">
                            <HistoryRows entries=case.history />
                        </Card>
                        <Card title="Comments">
                            <CommentRows comments=case.comments />
                        </Card>
                    </div>
                }
                    .into_any()
            }
        }}
    }
}

#[component]
fn ChecklistRows(items: Vec<CaseItem>) -> impl IntoView {
    if items.is_empty() {
        return view! { <p class="muted">"No checklist items"</p> }.into_any();
    }
    items
        .into_iter()
        .map(|item| {
            let mark = if item.done { "\u{2611}" } else { "\u{2610}" };
            let detail = item.value_text.clone().or(item.note.clone());
            view! {
                <div class="metric-row">
                    <span class="metric-label">{format!("{mark} {}", or_dash(item.title.as_deref()))}</span>
                    <span class="metric-value">{or_dash(detail.as_deref())}</span>
                    <span class="muted">{format_timestamp(item.done_at.as_deref())}</span>
                </div>
            }
        })
        .collect_view()
        .into_any()
}

#[component]
fn HistoryRows(entries: Vec<HistoryEntry>) -> impl IntoView {
    if entries.is_empty() {
        return view! { <p class="muted">"No history"</p> }.into_any();
    }
    entries
        .into_iter()
        .map(|entry| {
            view! {
                <div class="history-entry">
                    <div class="metric-row">
                        <span class="metric-label">{humanize_status(&entry.action)}</span>
                        <span class="muted">{format_timestamp(entry.created_at.as_deref())}</span>
                    </div>
                    {(!entry.payload.is_null()).then(|| view! { <JsonBlock value=entry.payload /> })}
                </div>
            }
        })
        .collect_view()
        .into_any()
}

#[component]
fn CommentRows(comments: Vec<CaseComment>) -> impl IntoView {
    if comments.is_empty() {
        return view! { <p class="muted">"No comments"</p> }.into_any();
    }
    comments
        .into_iter()
        .map(|comment| {
            view! {
                <div class="comment">
                    <span class="muted">{format_timestamp(comment.created_at.as_deref())}</span>
                    <p>{comment.text}</p>
                </div>
            }
        })
        .collect_view()
        .into_any()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_fields_are_not_measured() {
        let m = read_measurements("23,5", "", " 44 ", "  ").unwrap();
        assert_eq!(m.axial_length_mm, Some(23.5));
        assert_eq!(m.k1_d, None);
        assert_eq!(m.k2_d, Some(44.0));
        assert_eq!(m.note, None);
    }

    #[test]
    fn first_bad_field_is_reported() {
        assert_eq!(
            read_measurements("23", "forty", "x", "").unwrap_err(),
            "K1 must be a number"
        );
    }
}
