// SPDX-License-Identifier: Apache-2.0

//! HTTP server for the clinic: axum routes over a [`ClinicStore`], with
//! server-rendered pages that htmx progressively swaps as fragments.

pub mod config;
pub mod error;
pub mod extract;
pub mod http;
pub mod middleware;
pub mod views;

pub use config::{validate_startup_config, ServerConfig};
pub use error::AppError;

use axum::extract::DefaultBodyLimit;
use axum::routing::get;
use axum::Router;
use petclinic_store::ClinicStore;
use std::sync::atomic::AtomicU64;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn ClinicStore>,
    pub config: Arc<ServerConfig>,
    pub request_id_seed: Arc<AtomicU64>,
}

impl AppState {
    #[must_use]
    pub fn new(store: Arc<dyn ClinicStore>, config: ServerConfig) -> Self {
        Self {
            store,
            config: Arc::new(config),
            request_id_seed: Arc::new(AtomicU64::new(1)),
        }
    }
}

#[must_use]
pub fn build_router(state: AppState) -> Router {
    let max_body_bytes = state.config.max_body_bytes;
    Router::new()
        .route("/", get(http::system::welcome))
        .route("/oups", get(http::system::crash))
        .route("/owners/find", get(http::owners::find_form))
        .route("/owners", get(http::owners::list))
        .route(
            "/owners/new",
            get(http::owners::new_form).post(http::owners::create),
        )
        .route("/owners/:owner_id", get(http::owners::details))
        .route(
            "/owners/:owner_id/edit",
            get(http::owners::edit_form).post(http::owners::update),
        )
        .route(
            "/owners/:owner_id/pets/new",
            get(http::pets::new_form).post(http::pets::create),
        )
        .route(
            "/owners/:owner_id/pets/:pet_id/edit",
            get(http::pets::edit_form).post(http::pets::update),
        )
        .route(
            "/owners/:owner_id/pets/:pet_id/visits/new",
            get(http::visits::new_form).post(http::visits::create),
        )
        .route("/vets.html", get(http::vets::list_html))
        .route("/vets", get(http::vets::list_json))
        .route("/static/petclinic.css", get(http::system::stylesheet))
        .fallback(http::system::fallback)
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            middleware::timeout_middleware,
        ))
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            middleware::error_view_middleware,
        ))
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            middleware::request_tracing_middleware,
        ))
        .layer(DefaultBodyLimit::max(max_body_bytes))
        .with_state(state)
}
