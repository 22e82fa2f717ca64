use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use shared::{BookingListResponse, CancelBookingResponse, ClientListResponse};
use tracing::info;
use uuid::Uuid;

use super::{mappers, session_error_status, AppState};

/// Axum handler for GET /api/sessions/:id/bookings
///
/// The signed-in client's appointments for the manage-list screen.
pub async fn list_session_bookings(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> impl IntoResponse {
    let snapshot = match state.flow_service.snapshot(session_id).await {
        Ok(snapshot) => snapshot,
        Err(e) => return (session_error_status(&e), e.to_string()).into_response(),
    };
    let Some(client_id) = snapshot.client_id else {
        return (StatusCode::UNAUTHORIZED, "Not signed in").into_response();
    };

    match state.booking_service.bookings_for_client(client_id).await {
        Ok(bookings) => {
            let bookings = bookings.iter().map(mappers::booking_to_dto).collect();
            (StatusCode::OK, Json(BookingListResponse { bookings })).into_response()
        }
        Err(e) => {
            tracing::error!("Error listing bookings: {:?}", e);
            (StatusCode::BAD_GATEWAY, "Error listing bookings").into_response()
        }
    }
}

/// Axum handler for DELETE /api/bookings/:id
pub async fn cancel_booking(
    State(state): State<AppState>,
    Path(booking_id): Path<Uuid>,
) -> impl IntoResponse {
    info!("DELETE /api/bookings/{}", booking_id);
    match state.booking_service.cancel(booking_id).await {
        Ok(true) => (
            StatusCode::OK,
            Json(CancelBookingResponse {
                success: true,
                message: "Appointment cancelled".to_string(),
            }),
        )
            .into_response(),
        Ok(false) => (StatusCode::NOT_FOUND, "Booking not found").into_response(),
        Err(e) => {
            tracing::error!("Error cancelling booking: {:?}", e);
            (StatusCode::BAD_GATEWAY, "Error cancelling booking").into_response()
        }
    }
}

/// Axum handler for GET /api/clients — the staff registry
pub async fn list_clients(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/clients");
    match state.identity_service.list_clients().await {
        Ok(clients) => {
            let clients = clients.iter().map(mappers::client_to_dto).collect();
            (StatusCode::OK, Json(ClientListResponse { clients })).into_response()
        }
        Err(e) => {
            tracing::error!("Error listing clients: {:?}", e);
            (StatusCode::BAD_GATEWAY, "Error listing clients").into_response()
        }
    }
}
