use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An already-booked time range on a given day, as read back from the
/// booking store. The occupied slot units are derived from the service
/// duration, not stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookedRange {
    pub date: NaiveDate,
    /// Start time, "HH:MM"
    pub time: String,
    pub service_name: String,
}

/// A persisted appointment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedBooking {
    pub id: Uuid,
    pub client_id: Option<Uuid>,
    pub service_name: String,
    pub date: NaiveDate,
    /// Start time, "HH:MM"
    pub time: String,
    pub client_name: String,
    pub client_phone: String,
    pub client_email: Option<String>,
    pub is_waiting_list: bool,
    pub created_at: DateTime<Utc>,
}
