use crate::api::AppState;
use crate::config::is_valid_fee_percent;
use crate::domain::FeeConfig;
use crate::engine::CalculatorReport;
use crate::error::AppError;
use axum::extract::State;
use axum::Json;
use serde::Serialize;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeesResponse {
    pub fees: FeeConfig,
    pub label: String,
}

pub async fn get_fees(State(state): State<AppState>) -> Json<FeesResponse> {
    let fees = state.session.fees().await;
    Json(FeesResponse {
        label: fees.label(),
        fees,
    })
}

pub async fn update_fees(
    State(state): State<AppState>,
    Json(fees): Json<FeeConfig>,
) -> Result<Json<CalculatorReport>, AppError> {
    if !is_valid_fee_percent(fees.buy_fee_percent) {
        return Err(AppError::BadRequest(
            "buyFeePercent must be between 0 and 100".into(),
        ));
    }
    if !is_valid_fee_percent(fees.sell_fee_percent) {
        return Err(AppError::BadRequest(
            "sellFeePercent must be between 0 and 100".into(),
        ));
    }

    Ok(Json(state.session.set_fees(fees).await))
}
