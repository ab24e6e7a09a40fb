use eyes_types::CurrentUser;
use leptos::prelude::*;

use super::{error_text, LoadError, Loading};
use crate::components::card::{Card, Field};

#[server]
async fn get_me() -> Result<CurrentUser, ServerFnError> {
    use crate::server::{backend, page_error};

    backend().await?.me().await.map_err(page_error)
}

#[component]
pub fn PatientHomePage() -> impl IntoView {
    #[allow(unused_variables)]
    let (me, setMe) = signal(Option::<Result<CurrentUser, String>>::None);

    #[cfg(feature = "hydrate")]
    {
        use wasm_bindgen_futures::spawn_local;

        spawn_local(async move {
            let result = get_me().await.map_err(error_text);
            setMe.set(Some(result));
        });
    }

    let clearLocalToken = move |_| {
        #[cfg(feature = "hydrate")]
        {
            use crate::session::LocalStorageTokenStore;
            use eyes_client::TokenStore;
            LocalStorageTokenStore.clear();
        }
    };

    view! {
        <div class="portal-layout">
            <div class="dashboard-header">
                <h1>"Patient portal"</h1>
                <form method="post" action="/api/v1/session/logout" on:submit=clearLocalToken>
                    <button type="submit" class="btn btn-secondary">"Sign out"</button>
                </form>
            </div>
            {move || match me.get() {
                None => view! { <Loading what="profile" /> }.into_any(),
                Some(Err(e)) => view! { <LoadError what="profile" message=e /> }.into_any(),
                Some(Ok(user)) => {
                    view! {
                        <Card title="Your account">
                            <Field label="Name" value=user.full_name />
                            <Field label="Email" value=user.email />
                            <Field label="Role" value=user.role.label() />
                        </Card>
                    }
                        .into_any()
                }
            }}
        </div>
    }
}
