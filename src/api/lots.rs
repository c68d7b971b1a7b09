use crate::api::AppState;
use crate::engine::CalculatorReport;
use crate::error::AppError;
use axum::extract::{Path, State};
use axum::Json;
use serde::Deserialize;

/// Partial edit of one lot; omitted fields are left unchanged.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateLotRequest {
    pub price: Option<String>,
    pub quantity: Option<String>,
}

pub async fn add_lot(State(state): State<AppState>) -> Json<CalculatorReport> {
    Json(state.session.add_lot().await)
}

pub async fn clear_lots(State(state): State<AppState>) -> Json<CalculatorReport> {
    Json(state.session.clear_lots().await)
}

pub async fn update_lot(
    State(state): State<AppState>,
    Path(index): Path<usize>,
    Json(body): Json<UpdateLotRequest>,
) -> Result<Json<CalculatorReport>, AppError> {
    if body.price.is_none() && body.quantity.is_none() {
        return Err(AppError::BadRequest(
            "at least one of price or quantity is required".into(),
        ));
    }

    let report = state
        .session
        .update_lot_fields(index, body.price, body.quantity)
        .await?;
    Ok(Json(report))
}

pub async fn remove_lot(
    State(state): State<AppState>,
    Path(index): Path<usize>,
) -> Result<Json<CalculatorReport>, AppError> {
    Ok(Json(state.session.remove_lot(index).await?))
}
