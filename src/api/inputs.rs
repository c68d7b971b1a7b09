//! The two persisted auxiliary inputs: custom profit % and desired price.

use crate::api::AppState;
use crate::engine::CalculatorReport;
use axum::extract::State;
use axum::Json;
use serde::Deserialize;

/// Raw form value; blank or non-numeric text is accepted and reads as absent.
#[derive(Debug, Deserialize)]
pub struct InputValue {
    pub value: String,
}

pub async fn set_custom_profit(
    State(state): State<AppState>,
    Json(body): Json<InputValue>,
) -> Json<CalculatorReport> {
    Json(state.session.set_custom_profit(body.value).await)
}

pub async fn set_desired_price(
    State(state): State<AppState>,
    Json(body): Json<InputValue>,
) -> Json<CalculatorReport> {
    Json(state.session.set_desired_price(body.value).await)
}
