use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use shared::{AuthResponse, LoginRequest, RegisterRequest, ResendConfirmationRequest};
use tracing::info;
use uuid::Uuid;

use super::{identity_error_status, session_error_status, AppState};

/// Axum handler for POST /api/sessions/:id/register
///
/// Registers against the identity provider and, unless the provider wants
/// an email confirmation first, signs the fresh account straight in.
pub async fn register(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Json(request): Json<RegisterRequest>,
) -> impl IntoResponse {
    info!("POST /api/sessions/{}/register - {}", session_id, request.email);

    let outcome = match state
        .identity_service
        .register(&request.email, &request.password, &request.name, &request.phone)
        .await
    {
        Ok(outcome) => outcome,
        Err(e) => return (identity_error_status(&e), e.to_string()).into_response(),
    };

    if outcome.confirmation_pending {
        return (
            StatusCode::OK,
            Json(AuthResponse {
                user_id: Some(outcome.user_id),
                email: request.email,
                confirmation_pending: true,
                message: "Check your inbox to confirm your email, then log in".to_string(),
            }),
        )
            .into_response();
    }

    // No confirmation step: log the new account in and advance the flow
    let user = match state
        .identity_service
        .login(&request.email, &request.password)
        .await
    {
        Ok(user) => user,
        Err(e) => return (identity_error_status(&e), e.to_string()).into_response(),
    };
    if let Err(e) = state.flow_service.signed_in(session_id, &user).await {
        return (session_error_status(&e), e.to_string()).into_response();
    }

    (
        StatusCode::CREATED,
        Json(AuthResponse {
            user_id: Some(user.id),
            email: user.email,
            confirmation_pending: false,
            message: "Welcome!".to_string(),
        }),
    )
        .into_response()
}

/// Axum handler for POST /api/sessions/:id/login
pub async fn login(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Json(request): Json<LoginRequest>,
) -> impl IntoResponse {
    info!("POST /api/sessions/{}/login - {}", session_id, request.email);

    let user = match state
        .identity_service
        .login(&request.email, &request.password)
        .await
    {
        Ok(user) => user,
        Err(e) => return (identity_error_status(&e), e.to_string()).into_response(),
    };
    if let Err(e) = state.flow_service.signed_in(session_id, &user).await {
        return (session_error_status(&e), e.to_string()).into_response();
    }

    (
        StatusCode::OK,
        Json(AuthResponse {
            user_id: Some(user.id),
            email: user.email,
            confirmation_pending: false,
            message: "Logged in".to_string(),
        }),
    )
        .into_response()
}

/// Axum handler for POST /api/sessions/:id/logout
pub async fn logout(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> impl IntoResponse {
    info!("POST /api/sessions/{}/logout", session_id);

    // End the provider session first, then drop the flow back to welcome
    let snapshot = match state.flow_service.snapshot(session_id).await {
        Ok(snapshot) => snapshot,
        Err(e) => return (session_error_status(&e), e.to_string()).into_response(),
    };
    if let Some(client_id) = snapshot.client_id {
        if let Err(e) = state.identity_service.logout(client_id).await {
            tracing::error!("Provider logout failed for {}: {}", client_id, e);
            return (identity_error_status(&e), e.to_string()).into_response();
        }
    }
    match state.flow_service.logout(session_id).await {
        Ok(snapshot) => {
            (StatusCode::OK, Json(super::mappers::snapshot_to_dto(&snapshot))).into_response()
        }
        Err(e) => (session_error_status(&e), e.to_string()).into_response(),
    }
}

/// Axum handler for POST /api/auth/resend-confirmation
pub async fn resend_confirmation(
    State(state): State<AppState>,
    Json(request): Json<ResendConfirmationRequest>,
) -> impl IntoResponse {
    match state.identity_service.resend_confirmation(&request.email).await {
        Ok(()) => (StatusCode::OK, "Confirmation email sent").into_response(),
        Err(e) => (identity_error_status(&e), e.to_string()).into_response(),
    }
}
