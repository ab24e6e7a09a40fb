use leptos::prelude::*;
use leptos_meta::*;
use leptos_router::{
    components::{Route, Router, Routes},
    ParamSegment, StaticSegment,
};

use crate::components::nav::Nav;
use crate::components::toast::ToastProvider;
use crate::pages::calc_queue::CalcQueuePage;
use crate::pages::case_detail::CaseDetailPage;
use crate::pages::cases::CasesPage;
use crate::pages::dashboard::DashboardPage;
use crate::pages::login::LoginPage;
use crate::pages::patient_detail::PatientDetailPage;
use crate::pages::patient_home::PatientHomePage;
use crate::pages::patients::PatientsPage;

pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8" />
                <meta name="viewport" content="width=device-width, initial-scale=1" />
                <link rel="icon" href="/favicon.svg" type="image/svg+xml" />
                <AutoReload options=options.clone() />
                <HydrationScripts options />
                <MetaTags />
            </head>
            <body>
                <App />
            </body>
        </html>
    }
}

#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    view! {
        <Stylesheet id="leptos" href="/pkg/eyes-console.css" />
        <Title text="Eyes Console" />
        <ToastProvider>
            <Router>
                <Routes fallback=|| view! { <p class="not-found">"Page not found."</p> }.into_any()>
                    <Route path=StaticSegment("login") view=LoginPage />
                    <Route path=StaticSegment("patient") view=PatientHomePage />
                    <Route
                        path=(StaticSegment("app"), StaticSegment("dashboard"))
                        view=|| view! { <Staff><DashboardPage /></Staff> }
                    />
                    <Route
                        path=(StaticSegment("app"), StaticSegment("patients"))
                        view=|| view! { <Staff><PatientsPage /></Staff> }
                    />
                    <Route
                        path=(StaticSegment("app"), StaticSegment("patients"), ParamSegment("id"))
                        view=|| view! { <Staff><PatientDetailPage /></Staff> }
                    />
                    <Route
                        path=(StaticSegment("app"), StaticSegment("cases"))
                        view=|| view! { <Staff><CasesPage /></Staff> }
                    />
                    <Route
                        path=(StaticSegment("app"), StaticSegment("cases"), ParamSegment("id"))
                        view=|| view! { <Staff><CaseDetailPage /></Staff> }
                    />
                    <Route
                        path=(StaticSegment("app"), StaticSegment("calc-queue"))
                        view=|| view! { <Staff><CalcQueuePage /></Staff> }
                    />
                </Routes>
            </Router>
        </ToastProvider>
    }
}

/// Sidebar layout shared by the staff pages under `/app`.
#[component]
fn Staff(children: Children) -> impl IntoView {
    view! {
        <div class="app-layout">
            <Nav />
            <main class="main-content">{children()}</main>
        </div>
    }
}
