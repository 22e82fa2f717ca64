use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use chrono::NaiveDate;
use serde::Deserialize;
use shared::ServiceListResponse;
use tracing::info;

use super::mappers;
use super::AppState;

/// Axum handler for GET /api/services
pub async fn list_services(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/services");
    let services = state
        .catalog
        .services()
        .iter()
        .map(mappers::service_to_dto)
        .collect();
    (StatusCode::OK, Json(ServiceListResponse { services }))
}

/// Query parameters for the slot availability endpoint
#[derive(Deserialize, Debug)]
pub struct SlotQuery {
    /// "YYYY-MM-DD"
    pub date: String,
    pub service_id: String,
}

/// Axum handler for GET /api/slots
pub async fn list_slots(
    State(state): State<AppState>,
    Query(query): Query<SlotQuery>,
) -> impl IntoResponse {
    info!("GET /api/slots - query: {:?}", query);

    let Ok(date) = NaiveDate::parse_from_str(&query.date, "%Y-%m-%d") else {
        return (
            StatusCode::BAD_REQUEST,
            format!("Invalid date '{}', expected YYYY-MM-DD", query.date),
        )
            .into_response();
    };
    let Some(service) = state.catalog.find(&query.service_id) else {
        return (
            StatusCode::BAD_REQUEST,
            format!("Unknown service '{}'", query.service_id),
        )
            .into_response();
    };

    match state
        .slot_service
        .slots_for_day(date, service, state.store.as_ref())
        .await
    {
        Ok(day) => (StatusCode::OK, Json(mappers::slot_day_to_dto(&day))).into_response(),
        Err(e) => {
            tracing::error!("Error generating slots: {:?}", e);
            (StatusCode::BAD_GATEWAY, "Error fetching availability").into_response()
        }
    }
}
