use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::forecast::{
    types::{Area, ForecastRecord, Province},
    ForecastService,
};

// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub forecast_service: Arc<ForecastService>,
}

#[derive(Debug, Deserialize)]
pub struct AreaRequest {
    pub province: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastRequest {
    pub province_id: String,
    #[serde(default)]
    pub area_id: String,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
    pub version: String,
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        timestamp: chrono::Utc::now(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

pub async fn list_provinces(State(state): State<AppState>) -> Json<Vec<Province>> {
    Json(state.forecast_service.provinces())
}

pub async fn list_areas(
    State(state): State<AppState>,
    payload: Result<Json<AreaRequest>, JsonRejection>,
) -> Result<Json<Vec<Area>>, StatusCode> {
    let Json(request) = payload.map_err(reject_body)?;
    Ok(Json(state.forecast_service.areas(&request.province)))
}

pub async fn search_by_province(
    State(state): State<AppState>,
    payload: Result<Json<ForecastRequest>, JsonRejection>,
) -> Result<Json<Vec<ForecastRecord>>, StatusCode> {
    let Json(request) = payload.map_err(reject_body)?;

    match state
        .forecast_service
        .forecast_by_province(&request.province_id)
        .await
    {
        Ok(records) => Ok(Json(records)),
        Err(e) => {
            tracing::error!(province = %request.province_id, "Province forecast failed: {}", e);
            Err(StatusCode::BAD_REQUEST)
        }
    }
}

pub async fn search_by_area(
    State(state): State<AppState>,
    payload: Result<Json<ForecastRequest>, JsonRejection>,
) -> Result<Json<ForecastRecord>, StatusCode> {
    let Json(request) = payload.map_err(reject_body)?;

    match state
        .forecast_service
        .forecast_by_area(&request.province_id, &request.area_id)
        .await
    {
        Ok(record) => Ok(Json(record)),
        Err(e) => {
            tracing::error!(
                province = %request.province_id,
                area = %request.area_id,
                "Area forecast failed: {}",
                e
            );
            Err(StatusCode::BAD_REQUEST)
        }
    }
}

fn reject_body(rejection: JsonRejection) -> StatusCode {
    tracing::debug!("Rejected request body: {}", rejection);
    StatusCode::BAD_REQUEST
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/v1/forecasting/province", get(list_provinces))
        .route("/v1/forecasting/area", post(list_areas))
        .route("/v1/forecasting/search/province", post(search_by_province))
        .route("/v1/forecasting/search/area", post(search_by_area))
        .with_state(state)
}
