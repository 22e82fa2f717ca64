//! REST delivery layer.
//!
//! Thin axum handlers that map the shared DTOs onto domain services and
//! translate classified domain errors to HTTP statuses. No business
//! logic lives here.

use std::sync::Arc;

use axum::http::StatusCode;
use axum::routing::{delete, get, post};
use axum::Router;

use crate::domain::{
    BookingService, FlowError, FlowService, IdentityService, ServiceCatalog, SessionError,
    SlotService,
};
use crate::storage::traits::{BookingStore, IdentityError, StoreError};

pub mod auth_apis;
pub mod booking_apis;
pub mod mappers;
pub mod session_apis;
pub mod slot_apis;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<ServiceCatalog>,
    pub store: Arc<dyn BookingStore>,
    pub slot_service: SlotService,
    pub flow_service: FlowService,
    pub identity_service: IdentityService,
    pub booking_service: BookingService,
}

/// All /api routes
pub fn api_router() -> Router<AppState> {
    Router::new()
        .route("/services", get(slot_apis::list_services))
        .route("/slots", get(slot_apis::list_slots))
        .route("/auth/resend-confirmation", post(auth_apis::resend_confirmation))
        .route("/sessions", post(session_apis::create_session))
        .route("/sessions/:id", get(session_apis::get_session))
        .route("/sessions/:id/register", post(auth_apis::register))
        .route("/sessions/:id/login", post(auth_apis::login))
        .route("/sessions/:id/logout", post(auth_apis::logout))
        .route("/sessions/:id/navigate", post(session_apis::navigate))
        .route("/sessions/:id/service", post(session_apis::select_service))
        .route("/sessions/:id/schedule", post(session_apis::select_schedule))
        .route("/sessions/:id/details", post(session_apis::set_details))
        .route("/sessions/:id/submit", post(session_apis::submit))
        .route("/sessions/:id/reset", post(session_apis::reset))
        .route("/sessions/:id/bookings", get(booking_apis::list_session_bookings))
        .route("/bookings/:id", delete(booking_apis::cancel_booking))
        .route("/clients", get(booking_apis::list_clients))
}

/// HTTP status for a classified session/flow error
pub(crate) fn session_error_status(err: &SessionError) -> StatusCode {
    match err {
        SessionError::UnknownSession(_) => StatusCode::NOT_FOUND,
        SessionError::UnknownService(_) => StatusCode::BAD_REQUEST,
        SessionError::InvalidSlot { .. } => StatusCode::UNPROCESSABLE_ENTITY,
        SessionError::Flow(FlowError::SubmissionInFlight) => StatusCode::CONFLICT,
        SessionError::Flow(FlowError::StaleSubmission) => StatusCode::CONFLICT,
        SessionError::Flow(_) => StatusCode::UNPROCESSABLE_ENTITY,
        SessionError::Store(StoreError::Unavailable(_)) => StatusCode::BAD_GATEWAY,
        SessionError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// HTTP status for a classified identity error
pub(crate) fn identity_error_status(err: &IdentityError) -> StatusCode {
    match err {
        IdentityError::Invalid(_) => StatusCode::BAD_REQUEST,
        IdentityError::InvalidCredentials => StatusCode::UNAUTHORIZED,
        IdentityError::EmailTaken(_) => StatusCode::CONFLICT,
        IdentityError::ConfirmationPending => StatusCode::FORBIDDEN,
        IdentityError::Unavailable(_) => StatusCode::BAD_GATEWAY,
        IdentityError::Other(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}
