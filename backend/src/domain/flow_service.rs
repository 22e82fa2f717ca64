//! Per-session booking flow orchestration.
//!
//! Owns the live `BookingFlow` instances (one per client session) and the
//! two points where the flow talks to collaborators: validating a slot
//! selection against freshly generated availability, and submitting the
//! final draft. The flows map is locked only for state mutation; store
//! calls happen outside the lock so one slow save cannot stall every
//! session.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::NaiveDate;
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::{info, warn};
use uuid::Uuid;

use crate::domain::booking_flow::{BookingFlow, BookingStep, FlowError};
use crate::domain::catalog::ServiceCatalog;
use crate::domain::commands::flow::{SessionSnapshot, SubmitOutcome};
use crate::domain::models::AuthenticatedUser;
use crate::domain::slot_service::SlotService;
use crate::storage::traits::{BookingStore, StoreError};

/// Free navigation targets (the transitions that carry no payload)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavTarget {
    Login,
    Register,
    Services,
    ManageList,
    ClientRegistry,
    Home,
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("unknown session {0}")]
    UnknownSession(Uuid),
    #[error("unknown service '{0}'")]
    UnknownService(String),
    #[error("{time} on {date} is not a bookable slot")]
    InvalidSlot { date: NaiveDate, time: String },
    #[error(transparent)]
    Flow(#[from] FlowError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

#[derive(Clone)]
pub struct FlowService {
    flows: Arc<Mutex<HashMap<Uuid, BookingFlow>>>,
    store: Arc<dyn BookingStore>,
    slot_service: SlotService,
    catalog: Arc<ServiceCatalog>,
}

impl FlowService {
    pub fn new(
        store: Arc<dyn BookingStore>,
        slot_service: SlotService,
        catalog: Arc<ServiceCatalog>,
    ) -> Self {
        Self {
            flows: Arc::new(Mutex::new(HashMap::new())),
            store,
            slot_service,
            catalog,
        }
    }

    /// Open a fresh session on the welcome step
    pub async fn create_session(&self) -> Uuid {
        let session_id = Uuid::new_v4();
        self.flows.lock().await.insert(session_id, BookingFlow::new());
        info!("Created booking session {}", session_id);
        session_id
    }

    pub async fn snapshot(&self, session_id: Uuid) -> Result<SessionSnapshot, SessionError> {
        let flows = self.flows.lock().await;
        let flow = flows
            .get(&session_id)
            .ok_or(SessionError::UnknownSession(session_id))?;
        Ok(Self::snapshot_of(session_id, flow))
    }

    pub async fn navigate(
        &self,
        session_id: Uuid,
        target: NavTarget,
    ) -> Result<SessionSnapshot, SessionError> {
        let mut flows = self.flows.lock().await;
        let flow = flows
            .get_mut(&session_id)
            .ok_or(SessionError::UnknownSession(session_id))?;
        match target {
            NavTarget::Login => flow.open_login()?,
            NavTarget::Register => flow.open_register()?,
            NavTarget::Services => flow.open_services()?,
            NavTarget::ManageList => flow.open_manage_list()?,
            NavTarget::ClientRegistry => flow.open_client_registry()?,
            NavTarget::Home => flow.back_home()?,
        }
        Ok(Self::snapshot_of(session_id, flow))
    }

    /// Identity provider confirmed a session; land the flow on home
    pub async fn signed_in(
        &self,
        session_id: Uuid,
        user: &AuthenticatedUser,
    ) -> Result<SessionSnapshot, SessionError> {
        let mut flows = self.flows.lock().await;
        let flow = flows
            .get_mut(&session_id)
            .ok_or(SessionError::UnknownSession(session_id))?;
        flow.signed_in(user)?;
        Ok(Self::snapshot_of(session_id, flow))
    }

    pub async fn select_service(
        &self,
        session_id: Uuid,
        service_id: &str,
    ) -> Result<SessionSnapshot, SessionError> {
        let service = self
            .catalog
            .find(service_id)
            .cloned()
            .ok_or_else(|| SessionError::UnknownService(service_id.to_string()))?;

        let mut flows = self.flows.lock().await;
        let flow = flows
            .get_mut(&session_id)
            .ok_or(SessionError::UnknownSession(session_id))?;
        flow.select_service(service)?;
        Ok(Self::snapshot_of(session_id, flow))
    }

    /// Validate a date/time choice against freshly generated availability
    /// and advance to the details step. A blocked slot is a legal choice
    /// that turns the draft into a waiting-list booking.
    pub async fn select_schedule(
        &self,
        session_id: Uuid,
        date: NaiveDate,
        time: &str,
    ) -> Result<SessionSnapshot, SessionError> {
        let service = {
            let flows = self.flows.lock().await;
            let flow = flows
                .get(&session_id)
                .ok_or(SessionError::UnknownSession(session_id))?;
            flow.draft()
                .service
                .clone()
                .ok_or(FlowError::MissingService)?
        };

        let day = self
            .slot_service
            .slots_for_day(date, &service, self.store.as_ref())
            .await
            .map_err(|e| StoreError::Unavailable(e.to_string()))?;
        let slot = day.slots.iter().find(|s| s.time == time);
        let slot = match slot {
            Some(slot) if day.working_day => slot,
            _ => {
                warn!("Session {} picked invalid slot {} {}", session_id, date, time);
                return Err(SessionError::InvalidSlot {
                    date,
                    time: time.to_string(),
                });
            }
        };
        let available = slot.available;

        let mut flows = self.flows.lock().await;
        let flow = flows
            .get_mut(&session_id)
            .ok_or(SessionError::UnknownSession(session_id))?;
        flow.select_slot(date, time.to_string(), available)?;
        flow.continue_to_details()?;
        Ok(Self::snapshot_of(session_id, flow))
    }

    pub async fn set_details(
        &self,
        session_id: Uuid,
        name: &str,
        phone: &str,
        email: Option<&str>,
    ) -> Result<SessionSnapshot, SessionError> {
        let mut flows = self.flows.lock().await;
        let flow = flows
            .get_mut(&session_id)
            .ok_or(SessionError::UnknownSession(session_id))?;
        flow.set_details(name, phone, email)?;
        Ok(Self::snapshot_of(session_id, flow))
    }

    /// Submit the draft through the booking store.
    ///
    /// The busy flag is flipped under the lock before the store call and
    /// cleared after it resolves, so a second submit while the first is
    /// in flight fails fast with `SubmissionInFlight`.
    pub async fn submit(&self, session_id: Uuid) -> Result<SubmitOutcome, SessionError> {
        let (draft, ticket) = {
            let mut flows = self.flows.lock().await;
            let flow = flows
                .get_mut(&session_id)
                .ok_or(SessionError::UnknownSession(session_id))?;
            flow.begin_submit()?
        };

        info!(
            "Submitting booking for session {}: {:?} on {:?} at {:?} (waiting list: {})",
            session_id,
            draft.service.as_ref().map(|s| s.name.as_str()),
            draft.date,
            draft.time,
            draft.is_waiting_list
        );
        let result = self.store.save_booking(&draft).await;
        if let Err(err) = &result {
            warn!("Save failed for session {}: {}", session_id, err);
        }

        let mut flows = self.flows.lock().await;
        let flow = flows
            .get_mut(&session_id)
            .ok_or(SessionError::UnknownSession(session_id))?;
        if !flow.finish_submit(ticket, result) {
            warn!(
                "Session {} changed while its save was in flight, verdict dropped",
                session_id
            );
            return Err(FlowError::StaleSubmission.into());
        }

        let step = flow.step();
        let is_demo = flow.draft().is_demo_mode;
        let message = match step {
            BookingStep::Confirmation if is_demo => {
                "Appointment accepted in demo mode; it was not durably stored".to_string()
            }
            BookingStep::Confirmation => "Your appointment is booked".to_string(),
            BookingStep::WaitingListConfirmed if is_demo => {
                "Waiting-list request accepted in demo mode; it was not durably stored".to_string()
            }
            BookingStep::WaitingListConfirmed => {
                "You are on the waiting list for this time".to_string()
            }
            _ => flow
                .error()
                .unwrap_or("Could not save the appointment, please try again")
                .to_string(),
        };

        Ok(SubmitOutcome {
            step,
            booking_id: flow.last_booking_id(),
            is_waiting_list: flow.draft().is_waiting_list,
            is_demo_mode: is_demo,
            message,
        })
    }

    pub async fn reset(&self, session_id: Uuid) -> Result<SessionSnapshot, SessionError> {
        let mut flows = self.flows.lock().await;
        let flow = flows
            .get_mut(&session_id)
            .ok_or(SessionError::UnknownSession(session_id))?;
        flow.reset()?;
        Ok(Self::snapshot_of(session_id, flow))
    }

    /// Logout or session loss: back to welcome, state discarded
    pub async fn logout(&self, session_id: Uuid) -> Result<SessionSnapshot, SessionError> {
        let mut flows = self.flows.lock().await;
        let flow = flows
            .get_mut(&session_id)
            .ok_or(SessionError::UnknownSession(session_id))?;
        flow.logout();
        Ok(Self::snapshot_of(session_id, flow))
    }

    fn snapshot_of(session_id: Uuid, flow: &BookingFlow) -> SessionSnapshot {
        let draft = flow.draft();
        SessionSnapshot {
            session_id,
            client_id: draft.client_id,
            step: flow.step(),
            service_id: draft.service.as_ref().map(|s| s.id.clone()),
            date: draft.date,
            time: draft.time.clone(),
            is_waiting_list: draft.is_waiting_list,
            is_demo_mode: draft.is_demo_mode,
            error: flow.error().map(|e| e.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SalonConfig;
    use crate::domain::models::{BookedRange, BookingDraft, SavedBooking};
    use crate::storage::memory::MemoryBookingStore;

    fn service_for(store: Arc<MemoryBookingStore>) -> FlowService {
        let catalog = Arc::new(ServiceCatalog::default());
        let slot_service = SlotService::new(SalonConfig::default(), catalog.clone());
        FlowService::new(store, slot_service, catalog)
    }

    fn dana() -> AuthenticatedUser {
        AuthenticatedUser {
            id: Uuid::new_v4(),
            email: "dana@example.com".to_string(),
            name: "Dana".to_string(),
            phone: "050-1234567".to_string(),
        }
    }

    /// Sunday within business days
    fn sunday() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 2).unwrap()
    }

    async fn session_at_date_time(service: &FlowService) -> Uuid {
        let session = service.create_session().await;
        service.navigate(session, NavTarget::Login).await.unwrap();
        service.signed_in(session, &dana()).await.unwrap();
        service.navigate(session, NavTarget::Services).await.unwrap();
        service.select_service(session, "lash-lift").await.unwrap();
        session
    }

    #[tokio::test]
    async fn end_to_end_booking_reaches_confirmation() {
        let store = Arc::new(MemoryBookingStore::new());
        let service = service_for(store.clone());
        let session = session_at_date_time(&service).await;

        let snap = service
            .select_schedule(session, sunday(), "10:00")
            .await
            .unwrap();
        assert_eq!(snap.step, BookingStep::Details);
        assert!(!snap.is_waiting_list);

        service
            .set_details(session, "Dana", "050-1234567", None)
            .await
            .unwrap();
        let outcome = service.submit(session).await.unwrap();
        assert_eq!(outcome.step, BookingStep::Confirmation);
        assert!(outcome.booking_id.is_some());
        assert!(!outcome.is_demo_mode);

        // The booking now blocks its units for the next query
        let ranges = store.fetch_booked_ranges(sunday()).await.unwrap();
        assert_eq!(ranges.len(), 1);
    }

    #[tokio::test]
    async fn picking_a_blocked_slot_becomes_a_waiting_list_booking() {
        let store = Arc::new(MemoryBookingStore::new());
        // Seed an existing 60-minute appointment at 10:00
        store.seed(crate::domain::models::SavedBooking {
            id: Uuid::new_v4(),
            client_id: None,
            service_name: "Brow Lamination".to_string(),
            date: sunday(),
            time: "10:00".to_string(),
            client_name: "Noa".to_string(),
            client_phone: "050-9999999".to_string(),
            client_email: None,
            is_waiting_list: false,
            created_at: chrono::Utc::now(),
        });
        let service = service_for(store);
        let session = session_at_date_time(&service).await;

        let snap = service
            .select_schedule(session, sunday(), "10:30")
            .await
            .unwrap();
        assert!(snap.is_waiting_list);

        service
            .set_details(session, "Dana", "050-1234567", None)
            .await
            .unwrap();
        let outcome = service.submit(session).await.unwrap();
        assert_eq!(outcome.step, BookingStep::WaitingListConfirmed);
        assert!(outcome.is_waiting_list);
    }

    #[tokio::test]
    async fn policy_rejected_save_reports_demo_mode() {
        let store = Arc::new(MemoryBookingStore::with_policy_rejection());
        let service = service_for(store);
        let session = session_at_date_time(&service).await;

        service
            .select_schedule(session, sunday(), "11:00")
            .await
            .unwrap();
        service
            .set_details(session, "Dana", "050-1234567", None)
            .await
            .unwrap();
        let outcome = service.submit(session).await.unwrap();

        assert_eq!(outcome.step, BookingStep::Confirmation);
        assert!(outcome.is_demo_mode);
        assert!(outcome.booking_id.is_none());
        assert!(outcome.message.contains("demo mode"));
    }

    #[tokio::test]
    async fn slot_outside_the_grid_is_rejected() {
        let store = Arc::new(MemoryBookingStore::new());
        let service = service_for(store);
        let session = session_at_date_time(&service).await;

        let err = service
            .select_schedule(session, sunday(), "10:15")
            .await
            .unwrap_err();
        assert!(matches!(err, SessionError::InvalidSlot { .. }));

        // Friday is outside working days entirely
        let friday = NaiveDate::from_ymd_opt(2025, 3, 7).unwrap();
        let err = service
            .select_schedule(session, friday, "10:00")
            .await
            .unwrap_err();
        assert!(matches!(err, SessionError::InvalidSlot { .. }));
    }

    /// Store that parks save calls until released, to race an in-flight
    /// submission against other session activity
    struct GatedStore {
        inner: MemoryBookingStore,
        entered: tokio::sync::Notify,
        release: tokio::sync::Notify,
    }

    impl GatedStore {
        fn new() -> Self {
            Self {
                inner: MemoryBookingStore::new(),
                entered: tokio::sync::Notify::new(),
                release: tokio::sync::Notify::new(),
            }
        }
    }

    #[async_trait::async_trait]
    impl BookingStore for GatedStore {
        async fn fetch_booked_ranges(
            &self,
            date: NaiveDate,
        ) -> Result<Vec<BookedRange>, StoreError> {
            self.inner.fetch_booked_ranges(date).await
        }

        async fn save_booking(&self, draft: &BookingDraft) -> Result<SavedBooking, StoreError> {
            self.entered.notify_one();
            self.release.notified().await;
            self.inner.save_booking(draft).await
        }

        async fn cancel_booking(&self, booking_id: Uuid) -> Result<bool, StoreError> {
            self.inner.cancel_booking(booking_id).await
        }

        async fn fetch_bookings_for_client(
            &self,
            client_id: Uuid,
        ) -> Result<Vec<SavedBooking>, StoreError> {
            self.inner.fetch_bookings_for_client(client_id).await
        }
    }

    #[tokio::test]
    async fn logout_during_submit_leaves_the_session_on_welcome() {
        let store = Arc::new(GatedStore::new());
        let catalog = Arc::new(ServiceCatalog::default());
        let slot_service = SlotService::new(SalonConfig::default(), catalog.clone());
        let service = FlowService::new(store.clone(), slot_service, catalog);
        let session = session_at_date_time(&service).await;

        service
            .select_schedule(session, sunday(), "10:00")
            .await
            .unwrap();
        service
            .set_details(session, "Dana", "050-1234567", None)
            .await
            .unwrap();

        let submitting = service.clone();
        let handle = tokio::spawn(async move { submitting.submit(session).await });
        // Wait until the save is parked inside the store
        store.entered.notified().await;

        let snap = service.logout(session).await.unwrap();
        assert_eq!(snap.step, BookingStep::Welcome);

        store.release.notify_one();
        let outcome = handle.await.unwrap();
        assert!(matches!(
            outcome,
            Err(SessionError::Flow(FlowError::StaleSubmission))
        ));

        // The resolved save must not pull the logged-out session forward
        let snap = service.snapshot(session).await.unwrap();
        assert_eq!(snap.step, BookingStep::Welcome);
        assert!(snap.service_id.is_none());
        assert!(snap.date.is_none());
    }

    #[tokio::test]
    async fn unknown_session_and_service_are_classified() {
        let store = Arc::new(MemoryBookingStore::new());
        let service = service_for(store);

        let missing = Uuid::new_v4();
        assert!(matches!(
            service.snapshot(missing).await.unwrap_err(),
            SessionError::UnknownSession(_)
        ));

        let session = service.create_session().await;
        service.navigate(session, NavTarget::Login).await.unwrap();
        service.signed_in(session, &dana()).await.unwrap();
        service.navigate(session, NavTarget::Services).await.unwrap();
        assert!(matches!(
            service.select_service(session, "nope").await.unwrap_err(),
            SessionError::UnknownService(_)
        ));
    }

    #[tokio::test]
    async fn draft_is_cleared_after_reset_but_profile_survives() {
        let store = Arc::new(MemoryBookingStore::new());
        let service = service_for(store);
        let session = session_at_date_time(&service).await;

        service
            .select_schedule(session, sunday(), "09:30")
            .await
            .unwrap();
        service
            .set_details(session, "Dana", "050-1234567", None)
            .await
            .unwrap();
        service.submit(session).await.unwrap();
        let snap = service.reset(session).await.unwrap();

        assert_eq!(snap.step, BookingStep::Home);
        assert!(snap.service_id.is_none());
        assert!(snap.date.is_none());
        assert!(!snap.is_waiting_list);
        assert!(!snap.is_demo_mode);
    }

    // Sanity check that BookingDraft default is a truly empty draft; the
    // flow relies on this when rebuilding drafts on reset
    #[test]
    fn default_draft_is_empty() {
        let draft = BookingDraft::default();
        assert!(draft.service.is_none());
        assert!(!draft.schedule_complete());
    }
}
