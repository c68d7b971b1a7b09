pub mod calculator;
pub mod fees;
pub mod health;
pub mod inputs;
pub mod lots;

use crate::orchestration::Session;
use axum::{
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

#[derive(Clone)]
pub struct AppState {
    pub session: Arc<Session>,
}

impl AppState {
    pub fn new(session: Arc<Session>) -> Self {
        Self { session }
    }
}

pub fn create_router(state: AppState) -> Router {
    // A locally served page may call the calculator from another origin.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health::health))
        .route("/ready", get(health::ready))
        .route("/v1/calculator", get(calculator::get_calculator))
        .route("/v1/projection", get(calculator::get_projection))
        .route("/v1/lots", post(lots::add_lot).delete(lots::clear_lots))
        .route(
            "/v1/lots/:index",
            put(lots::update_lot).delete(lots::remove_lot),
        )
        .route("/v1/fees", get(fees::get_fees).put(fees::update_fees))
        .route("/v1/custom-profit", put(inputs::set_custom_profit))
        .route("/v1/desired-price", put(inputs::set_desired_price))
        .layer(cors)
        .with_state(state)
}
