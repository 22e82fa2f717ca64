use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::service::Service;

/// The in-progress appointment owned by a single client session.
///
/// Mutated only by the booking flow in response to user input; discarded
/// on reset or after a successful submission.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BookingDraft {
    pub client_id: Option<Uuid>,
    pub service: Option<Service>,
    pub date: Option<NaiveDate>,
    /// Selected start time, "HH:MM"
    pub time: Option<String>,
    pub client_name: String,
    pub client_phone: String,
    pub client_email: Option<String>,
    /// Set when the client picked a slot that was already blocked
    pub is_waiting_list: bool,
    /// Set when the store rejected the save on policy grounds and the
    /// booking was accepted client-side only
    pub is_demo_mode: bool,
}

impl BookingDraft {
    /// Drop any date/time selection along with the waiting-list flag.
    /// Called when the client picks a (new) service.
    pub fn clear_schedule(&mut self) {
        self.date = None;
        self.time = None;
        self.is_waiting_list = false;
    }

    /// True once both a date and a time have been chosen
    pub fn schedule_complete(&self) -> bool {
        self.date.is_some() && self.time.is_some()
    }
}
