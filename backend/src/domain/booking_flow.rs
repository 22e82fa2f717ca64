//! Booking flow state machine.
//!
//! One `BookingFlow` per client session. The step is an explicit tagged
//! enum and every transition is a method that checks the current step, so
//! an illegal jump is a compile- or run-time error instead of a silently
//! wrong screen. The two store calls (fetching ranges, submitting) live
//! outside this type; submission is split into `begin_submit` /
//! `finish_submit` so the in-flight guard works without holding a lock
//! across the await.

use thiserror::Error;
use uuid::Uuid;

use crate::domain::models::{AuthenticatedUser, BookingDraft, SavedBooking, Service};
use crate::storage::traits::StoreError;

/// Screen the session is currently on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingStep {
    Welcome,
    Login,
    Register,
    Home,
    Services,
    DateTime,
    Details,
    Confirmation,
    WaitingListConfirmed,
    ManageList,
    ClientRegistry,
}

impl BookingStep {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStep::Welcome => "welcome",
            BookingStep::Login => "login",
            BookingStep::Register => "register",
            BookingStep::Home => "home",
            BookingStep::Services => "services",
            BookingStep::DateTime => "date-time",
            BookingStep::Details => "details",
            BookingStep::Confirmation => "confirmation",
            BookingStep::WaitingListConfirmed => "waiting-list-confirmed",
            BookingStep::ManageList => "manage-list",
            BookingStep::ClientRegistry => "client-registry",
        }
    }
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FlowError {
    #[error("cannot {action} from the {step} step")]
    WrongStep { step: &'static str, action: &'static str },
    #[error("no service selected")]
    MissingService,
    #[error("pick a date and time first")]
    MissingSchedule,
    #[error("{0} is required")]
    MissingField(&'static str),
    #[error("a submission is already in progress")]
    SubmissionInFlight,
    #[error("the session changed before the submission resolved")]
    StaleSubmission,
}

/// Profile fields retained across bookings within one session
#[derive(Debug, Clone, Default, PartialEq)]
struct RetainedProfile {
    name: String,
    phone: String,
}

#[derive(Debug, Clone)]
pub struct BookingFlow {
    step: BookingStep,
    draft: BookingDraft,
    profile: RetainedProfile,
    busy: bool,
    /// Ticket of the submission currently awaited; monotonic across
    /// logouts so a stale verdict can never match a later submission
    submit_seq: u64,
    error: Option<String>,
    last_booking_id: Option<Uuid>,
}

impl Default for BookingFlow {
    fn default() -> Self {
        Self::new()
    }
}

impl BookingFlow {
    pub fn new() -> Self {
        Self {
            step: BookingStep::Welcome,
            draft: BookingDraft::default(),
            profile: RetainedProfile::default(),
            busy: false,
            submit_seq: 0,
            error: None,
            last_booking_id: None,
        }
    }

    pub fn step(&self) -> BookingStep {
        self.step
    }

    pub fn draft(&self) -> &BookingDraft {
        &self.draft
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn last_booking_id(&self) -> Option<Uuid> {
        self.last_booking_id
    }

    fn expect_step(&self, wanted: &[BookingStep], action: &'static str) -> Result<(), FlowError> {
        if wanted.contains(&self.step) {
            Ok(())
        } else {
            Err(FlowError::WrongStep {
                step: self.step.as_str(),
                action,
            })
        }
    }

    pub fn open_login(&mut self) -> Result<(), FlowError> {
        self.expect_step(&[BookingStep::Welcome, BookingStep::Register], "open login")?;
        self.step = BookingStep::Login;
        Ok(())
    }

    pub fn open_register(&mut self) -> Result<(), FlowError> {
        self.expect_step(&[BookingStep::Welcome, BookingStep::Login], "open registration")?;
        self.step = BookingStep::Register;
        Ok(())
    }

    /// Identity provider reported a live session; land on home and prefill
    /// the draft's contact fields from the profile.
    pub fn signed_in(&mut self, user: &AuthenticatedUser) -> Result<(), FlowError> {
        self.expect_step(
            &[BookingStep::Welcome, BookingStep::Login, BookingStep::Register],
            "sign in",
        )?;
        self.profile = RetainedProfile {
            name: user.name.clone(),
            phone: user.phone.clone(),
        };
        self.draft = BookingDraft {
            client_id: Some(user.id),
            client_name: user.name.clone(),
            client_phone: user.phone.clone(),
            client_email: Some(user.email.clone()),
            ..BookingDraft::default()
        };
        self.error = None;
        self.step = BookingStep::Home;
        Ok(())
    }

    pub fn open_services(&mut self) -> Result<(), FlowError> {
        self.expect_step(&[BookingStep::Home], "browse services")?;
        self.step = BookingStep::Services;
        Ok(())
    }

    pub fn open_manage_list(&mut self) -> Result<(), FlowError> {
        self.expect_step(&[BookingStep::Home], "open appointment list")?;
        self.step = BookingStep::ManageList;
        Ok(())
    }

    pub fn open_client_registry(&mut self) -> Result<(), FlowError> {
        self.expect_step(&[BookingStep::Home], "open client registry")?;
        self.step = BookingStep::ClientRegistry;
        Ok(())
    }

    pub fn back_home(&mut self) -> Result<(), FlowError> {
        self.expect_step(
            &[BookingStep::Services, BookingStep::ManageList, BookingStep::ClientRegistry],
            "return home",
        )?;
        self.step = BookingStep::Home;
        Ok(())
    }

    /// Pick a service and move to the date/time picker. Any previously
    /// selected date, time or waiting-list flag is cleared.
    pub fn select_service(&mut self, service: Service) -> Result<(), FlowError> {
        self.expect_step(&[BookingStep::Services], "select a service")?;
        self.draft.service = Some(service);
        self.draft.clear_schedule();
        self.step = BookingStep::DateTime;
        Ok(())
    }

    /// Record a slot selection. Picking a blocked slot is a valid choice,
    /// not an error: it flags the draft as a waiting-list booking.
    pub fn select_slot(
        &mut self,
        date: chrono::NaiveDate,
        time: String,
        slot_available: bool,
    ) -> Result<(), FlowError> {
        self.expect_step(&[BookingStep::DateTime], "select a slot")?;
        if self.draft.service.is_none() {
            return Err(FlowError::MissingService);
        }
        self.draft.date = Some(date);
        self.draft.time = Some(time);
        self.draft.is_waiting_list = !slot_available;
        Ok(())
    }

    /// Gate to the details step: valid only once date AND time are chosen
    pub fn continue_to_details(&mut self) -> Result<(), FlowError> {
        self.expect_step(&[BookingStep::DateTime], "continue to details")?;
        if !self.draft.schedule_complete() {
            return Err(FlowError::MissingSchedule);
        }
        self.step = BookingStep::Details;
        Ok(())
    }

    pub fn set_details(
        &mut self,
        name: &str,
        phone: &str,
        email: Option<&str>,
    ) -> Result<(), FlowError> {
        self.expect_step(&[BookingStep::Details], "enter contact details")?;
        if name.trim().is_empty() {
            return Err(FlowError::MissingField("name"));
        }
        if phone.trim().is_empty() {
            return Err(FlowError::MissingField("phone"));
        }
        self.draft.client_name = name.trim().to_string();
        self.draft.client_phone = phone.trim().to_string();
        self.draft.client_email = email.map(|e| e.trim().to_string()).filter(|e| !e.is_empty());
        Ok(())
    }

    /// First half of submission: validates the draft, flips the busy flag
    /// and hands back a copy for the store call plus the ticket that
    /// `finish_submit` must present. Re-entry while busy is rejected,
    /// which is the double-submit guard.
    pub fn begin_submit(&mut self) -> Result<(BookingDraft, u64), FlowError> {
        self.expect_step(&[BookingStep::Details], "submit")?;
        if self.busy {
            return Err(FlowError::SubmissionInFlight);
        }
        if self.draft.service.is_none() {
            return Err(FlowError::MissingService);
        }
        if !self.draft.schedule_complete() {
            return Err(FlowError::MissingSchedule);
        }
        if self.draft.client_name.is_empty() {
            return Err(FlowError::MissingField("name"));
        }
        if self.draft.client_phone.is_empty() {
            return Err(FlowError::MissingField("phone"));
        }
        self.busy = true;
        self.submit_seq += 1;
        self.error = None;
        Ok((self.draft.clone(), self.submit_seq))
    }

    /// Second half of submission, fed the store's verdict. Returns false
    /// when the verdict was dropped because the flow is no longer awaiting
    /// this ticket (the session logged out while the save was in flight).
    ///
    /// A policy rejection is a soft success: the booking intent was
    /// already validated locally, so the draft is marked demo-mode and
    /// the flow proceeds to the same success branch. Every other failure
    /// keeps the session on the details step with the draft intact so the
    /// client can retry without re-entering anything.
    pub fn finish_submit(&mut self, ticket: u64, result: Result<SavedBooking, StoreError>) -> bool {
        if !self.busy || ticket != self.submit_seq {
            return false;
        }
        self.busy = false;
        match result {
            Ok(booking) => {
                self.last_booking_id = Some(booking.id);
                self.error = None;
                self.step = self.success_step();
            }
            Err(StoreError::PolicyRejection(_)) => {
                self.draft.is_demo_mode = true;
                self.last_booking_id = None;
                self.error = None;
                self.step = self.success_step();
            }
            Err(err) => {
                self.error = Some(err.to_string());
            }
        }
        true
    }

    fn success_step(&self) -> BookingStep {
        if self.draft.is_waiting_list {
            BookingStep::WaitingListConfirmed
        } else {
            BookingStep::Confirmation
        }
    }

    /// Back to home after a confirmation screen. Service, schedule and
    /// flags are cleared; the client's name and phone carry over into the
    /// next draft.
    pub fn reset(&mut self) -> Result<(), FlowError> {
        self.expect_step(
            &[BookingStep::Confirmation, BookingStep::WaitingListConfirmed],
            "start over",
        )?;
        let client_id = self.draft.client_id;
        let email = self.draft.client_email.clone();
        self.draft = BookingDraft {
            client_id,
            client_name: self.profile.name.clone(),
            client_phone: self.profile.phone.clone(),
            client_email: email,
            ..BookingDraft::default()
        };
        self.last_booking_id = None;
        self.error = None;
        self.step = BookingStep::Home;
        Ok(())
    }

    /// Session loss or explicit logout returns to welcome from any step.
    /// The submission counter survives so a save still in flight cannot
    /// land its verdict on the fresh state.
    pub fn logout(&mut self) {
        let submit_seq = self.submit_seq;
        *self = BookingFlow::new();
        self.submit_seq = submit_seq;
    }
}
