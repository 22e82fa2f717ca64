use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use chrono::NaiveDate;
use shared::{
    BookingStepDto, ClientDetailsRequest, NavigateRequest, SelectScheduleRequest,
    SelectServiceRequest,
};
use tracing::info;
use uuid::Uuid;

use super::{mappers, session_error_status, AppState};
use crate::domain::{NavTarget, SessionError};

/// Axum handler for POST /api/sessions
pub async fn create_session(State(state): State<AppState>) -> impl IntoResponse {
    let session_id = state.flow_service.create_session().await;
    match state.flow_service.snapshot(session_id).await {
        Ok(snapshot) => {
            (StatusCode::CREATED, Json(mappers::snapshot_to_dto(&snapshot))).into_response()
        }
        Err(e) => (session_error_status(&e), e.to_string()).into_response(),
    }
}

/// Axum handler for GET /api/sessions/:id
pub async fn get_session(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> impl IntoResponse {
    respond(state.flow_service.snapshot(session_id).await)
}

/// Axum handler for POST /api/sessions/:id/navigate
pub async fn navigate(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Json(request): Json<NavigateRequest>,
) -> impl IntoResponse {
    info!("POST /api/sessions/{}/navigate - {:?}", session_id, request.target);
    let target = match request.target {
        BookingStepDto::Login => NavTarget::Login,
        BookingStepDto::Register => NavTarget::Register,
        BookingStepDto::Services => NavTarget::Services,
        BookingStepDto::ManageList => NavTarget::ManageList,
        BookingStepDto::ClientRegistry => NavTarget::ClientRegistry,
        BookingStepDto::Home => NavTarget::Home,
        other => {
            return (
                StatusCode::UNPROCESSABLE_ENTITY,
                format!("{:?} is not a navigation target", other),
            )
                .into_response()
        }
    };
    respond(state.flow_service.navigate(session_id, target).await)
}

/// Axum handler for POST /api/sessions/:id/service
pub async fn select_service(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Json(request): Json<SelectServiceRequest>,
) -> impl IntoResponse {
    info!(
        "POST /api/sessions/{}/service - {}",
        session_id, request.service_id
    );
    respond(
        state
            .flow_service
            .select_service(session_id, &request.service_id)
            .await,
    )
}

/// Axum handler for POST /api/sessions/:id/schedule
pub async fn select_schedule(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Json(request): Json<SelectScheduleRequest>,
) -> impl IntoResponse {
    info!(
        "POST /api/sessions/{}/schedule - {} {}",
        session_id, request.date, request.time
    );
    let Ok(date) = NaiveDate::parse_from_str(&request.date, "%Y-%m-%d") else {
        return (
            StatusCode::BAD_REQUEST,
            format!("Invalid date '{}', expected YYYY-MM-DD", request.date),
        )
            .into_response();
    };
    respond(
        state
            .flow_service
            .select_schedule(session_id, date, &request.time)
            .await,
    )
}

/// Axum handler for POST /api/sessions/:id/details
pub async fn set_details(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Json(request): Json<ClientDetailsRequest>,
) -> impl IntoResponse {
    respond(
        state
            .flow_service
            .set_details(
                session_id,
                &request.name,
                &request.phone,
                request.email.as_deref(),
            )
            .await,
    )
}

/// Axum handler for POST /api/sessions/:id/submit
pub async fn submit(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> impl IntoResponse {
    info!("POST /api/sessions/{}/submit", session_id);
    match state.flow_service.submit(session_id).await {
        Ok(outcome) => {
            (StatusCode::OK, Json(mappers::submit_outcome_to_dto(&outcome))).into_response()
        }
        Err(e) => {
            tracing::error!("Submit failed for session {}: {}", session_id, e);
            (session_error_status(&e), e.to_string()).into_response()
        }
    }
}

/// Axum handler for POST /api/sessions/:id/reset
pub async fn reset(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> impl IntoResponse {
    respond(state.flow_service.reset(session_id).await)
}

fn respond(
    result: Result<crate::domain::commands::flow::SessionSnapshot, SessionError>,
) -> axum::response::Response {
    match result {
        Ok(snapshot) => {
            (StatusCode::OK, Json(mappers::snapshot_to_dto(&snapshot))).into_response()
        }
        Err(e) => (session_error_status(&e), e.to_string()).into_response(),
    }
}
