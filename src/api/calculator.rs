use crate::api::AppState;
use crate::domain::Decimal;
use crate::engine::{CalculatorReport, ProfitProjection};
use crate::error::AppError;
use axum::extract::{Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct ProjectionQuery {
    pub percentage: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectionResponse {
    pub percentage: Decimal,
    pub projection: Option<ProfitProjection>,
}

pub async fn get_calculator(State(state): State<AppState>) -> Json<CalculatorReport> {
    Json(state.session.report().await)
}

/// Projection at any markup, without touching the persisted custom input.
pub async fn get_projection(
    Query(params): Query<ProjectionQuery>,
    State(state): State<AppState>,
) -> Result<Json<ProjectionResponse>, AppError> {
    let percentage = Decimal::parse_lenient(&params.percentage)
        .ok_or_else(|| AppError::BadRequest("percentage must be a number".into()))?;

    let projection = state.session.projection_at(percentage).await;

    Ok(Json(ProjectionResponse {
        percentage,
        projection,
    }))
}
