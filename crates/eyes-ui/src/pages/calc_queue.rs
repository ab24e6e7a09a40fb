use eyes_types::QueueEntry;
use leptos::prelude::*;

use super::{error_text, LoadError, Loading};
use crate::components::status::StatusBadge;

/// Cases waiting for an IOL calculation. Surgeons and admins only; the
/// route filter turns everyone else away before this renders.
#[server]
async fn get_calc_queue() -> Result<Vec<QueueEntry>, ServerFnError> {
    use crate::server::{backend, page_error};

    backend()
        .await?
        .calc_queue(None, None)
        .await
        .map_err(page_error)
}

#[component]
pub fn CalcQueuePage() -> impl IntoView {
    #[allow(unused_variables)]
    let (queue, setQueue) = signal(Option::<Result<Vec<QueueEntry>, String>>::None);

    #[cfg(feature = "hydrate")]
    {
        use wasm_bindgen_futures::spawn_local;

        spawn_local(async move {
            let result = get_calc_queue().await.map_err(error_text);
            setQueue.set(Some(result));
        });
    }

    view! {
        <div class="dashboard-header">
            <h1>"Calculation queue"</h1>
            <p class="subtitle">"Cases with complete biometry awaiting IOL calculation"</p>
        </div>
        {move || match queue.get() {
            None => view! { <Loading what="queue" /> }.into_any(),
            Some(Err(e)) => view! { <LoadError what="queue" message=e /> }.into_any(),
            Some(Ok(entries)) if entries.is_empty() => {
                view! { <div class="container-empty"><p>"Queue is empty"</p></div> }.into_any()
            }
            Some(Ok(entries)) => {
                entries
                    .into_iter()
                    .map(|entry| {
                        view! {
                            <div class="card queue-entry">
                                <a href=format!("/app/cases/{}", entry.id) rel="external">
                                    {format!("Case #{}", entry.id)}
                                </a>
                                <span class="muted">{format!("Patient #{}", entry.patient_id)}</span>
                                <StatusBadge status=entry.status />
                                <span class="metric-value">{format!("{}%", entry.progress_percent)}</span>
                            </div>
                        }
                    })
                    .collect_view()
                    .into_any()
            }
        }}
    }
}
