//! Collaborator seams for the booking core.
//!
//! The hosted booking store and identity provider are external services;
//! the domain layer only ever sees these traits, so the backends can be
//! swapped (hosted API, in-memory double for tests/demo) without touching
//! business logic.

use async_trait::async_trait;
use chrono::NaiveDate;
use thiserror::Error;
use uuid::Uuid;

use crate::domain::models::{
    AuthenticatedUser, BookedRange, BookingDraft, ClientProfile, SavedBooking,
};

/// Classified failures from the booking store.
///
/// `PolicyRejection` is the one the booking flow cares about: a save
/// denied by the store's access policy degrades to a demo-mode success
/// instead of blocking the client. The classification is a typed variant
/// here, never a string match on error messages.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("rejected by storage access policy: {0}")]
    PolicyRejection(String),
    #[error("booking store unavailable: {0}")]
    Unavailable(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("booking store error: {0}")]
    Other(String),
}

/// Persistence collaborator for appointments
#[async_trait]
pub trait BookingStore: Send + Sync {
    /// All booked ranges on the given day, waiting-list entries excluded
    /// (they hold no slot units)
    async fn fetch_booked_ranges(&self, date: NaiveDate) -> Result<Vec<BookedRange>, StoreError>;

    /// Persist a completed draft as an appointment
    async fn save_booking(&self, draft: &BookingDraft) -> Result<SavedBooking, StoreError>;

    /// Cancel an appointment; true when it existed and was removed
    async fn cancel_booking(&self, booking_id: Uuid) -> Result<bool, StoreError>;

    /// Appointments belonging to one client, newest first
    async fn fetch_bookings_for_client(
        &self,
        client_id: Uuid,
    ) -> Result<Vec<SavedBooking>, StoreError>;
}

/// Classified failures from the identity provider
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum IdentityError {
    #[error("{0}")]
    Invalid(String),
    #[error("invalid email or password")]
    InvalidCredentials,
    #[error("an account already exists for {0}")]
    EmailTaken(String),
    #[error("email not confirmed yet")]
    ConfirmationPending,
    #[error("identity provider unavailable: {0}")]
    Unavailable(String),
    #[error("identity provider error: {0}")]
    Other(String),
}

/// Outcome of a registration attempt
#[derive(Debug, Clone, PartialEq)]
pub struct RegistrationOutcome {
    pub user_id: Uuid,
    /// True when the provider requires email confirmation before login
    pub confirmation_pending: bool,
}

/// Authentication/session collaborator.
///
/// Credentials live exclusively on the provider side; nothing behind this
/// trait ever hands plaintext secrets back to the application.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    async fn register(
        &self,
        email: &str,
        password: &str,
        name: &str,
        phone: &str,
    ) -> Result<RegistrationOutcome, IdentityError>;

    async fn login(&self, email: &str, password: &str)
        -> Result<AuthenticatedUser, IdentityError>;

    async fn resend_confirmation(&self, email: &str) -> Result<(), IdentityError>;

    async fn logout(&self, user_id: Uuid) -> Result<(), IdentityError>;

    /// Session accessor; `None` when the session has expired
    async fn current_user(&self, user_id: Uuid) -> Result<Option<AuthenticatedUser>, IdentityError>;

    /// Registered client profiles for the staff registry, no credentials
    async fn list_profiles(&self) -> Result<Vec<ClientProfile>, IdentityError>;
}
