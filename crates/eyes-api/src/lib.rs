#![allow(non_snake_case)]

pub mod middleware;
pub mod routes;

use axum::Router;

use crate::middleware::access::AppState;

pub fn api_router(state: AppState) -> Router {
    let sessionRoutes = routes::session::routes(state.clone());

    Router::new().merge(sessionRoutes).with_state(state)
}
