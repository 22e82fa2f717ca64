//! In-memory booking store double.
//!
//! Stands in for the hosted store in tests and demo runs. Policy-rejection
//! mode models the hosted store denying inserts through its row-level
//! access policy, which is what drives the demo-mode booking path.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use tracing::info;
use uuid::Uuid;

use crate::domain::models::{BookedRange, BookingDraft, SavedBooking};
use crate::storage::traits::{BookingStore, StoreError};

#[derive(Debug, Clone)]
pub struct MemoryBookingStore {
    bookings: Arc<Mutex<Vec<SavedBooking>>>,
    /// When set, every save is denied the way the hosted store's access
    /// policy would deny it
    reject_writes: bool,
}

impl MemoryBookingStore {
    pub fn new() -> Self {
        Self {
            bookings: Arc::new(Mutex::new(Vec::new())),
            reject_writes: false,
        }
    }

    /// A store whose writes are denied by policy, for exercising the
    /// demo-mode path
    pub fn with_policy_rejection() -> Self {
        Self {
            bookings: Arc::new(Mutex::new(Vec::new())),
            reject_writes: true,
        }
    }

    /// Seed an existing appointment, e.g. to block slots in tests
    pub fn seed(&self, booking: SavedBooking) {
        self.bookings.lock().expect("booking store lock").push(booking);
    }
}

impl Default for MemoryBookingStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BookingStore for MemoryBookingStore {
    async fn fetch_booked_ranges(&self, date: NaiveDate) -> Result<Vec<BookedRange>, StoreError> {
        let bookings = self.bookings.lock().expect("booking store lock");
        let ranges: Vec<BookedRange> = bookings
            .iter()
            .filter(|b| b.date == date && !b.is_waiting_list)
            .map(|b| BookedRange {
                date: b.date,
                time: b.time.clone(),
                service_name: b.service_name.clone(),
            })
            .collect();
        Ok(ranges)
    }

    async fn save_booking(&self, draft: &BookingDraft) -> Result<SavedBooking, StoreError> {
        if self.reject_writes {
            return Err(StoreError::PolicyRejection(
                "insert denied by row-level access policy".to_string(),
            ));
        }

        let service = draft
            .service
            .as_ref()
            .ok_or_else(|| StoreError::Other("draft has no service".to_string()))?;
        let date = draft
            .date
            .ok_or_else(|| StoreError::Other("draft has no date".to_string()))?;
        let time = draft
            .time
            .clone()
            .ok_or_else(|| StoreError::Other("draft has no time".to_string()))?;

        let booking = SavedBooking {
            id: Uuid::new_v4(),
            client_id: draft.client_id,
            service_name: service.name.clone(),
            date,
            time,
            client_name: draft.client_name.clone(),
            client_phone: draft.client_phone.clone(),
            client_email: draft.client_email.clone(),
            is_waiting_list: draft.is_waiting_list,
            created_at: Utc::now(),
        };

        self.bookings
            .lock()
            .expect("booking store lock")
            .push(booking.clone());
        info!(
            "Stored booking {} for {} on {} at {}",
            booking.id, booking.client_name, booking.date, booking.time
        );
        Ok(booking)
    }

    async fn cancel_booking(&self, booking_id: Uuid) -> Result<bool, StoreError> {
        let mut bookings = self.bookings.lock().expect("booking store lock");
        let before = bookings.len();
        bookings.retain(|b| b.id != booking_id);
        Ok(bookings.len() < before)
    }

    async fn fetch_bookings_for_client(
        &self,
        client_id: Uuid,
    ) -> Result<Vec<SavedBooking>, StoreError> {
        let bookings = self.bookings.lock().expect("booking store lock");
        let mut result: Vec<SavedBooking> = bookings
            .iter()
            .filter(|b| b.client_id == Some(client_id))
            .cloned()
            .collect();
        result.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::{Service, ServiceCategory};

    fn draft_for(date: NaiveDate, time: &str) -> BookingDraft {
        BookingDraft {
            client_id: Some(Uuid::new_v4()),
            service: Some(Service {
                id: "lash-lift".to_string(),
                name: "Lash Lift & Tint".to_string(),
                price: 65.0,
                duration_minutes: 60,
                description: String::new(),
                category: ServiceCategory::Lashes,
            }),
            date: Some(date),
            time: Some(time.to_string()),
            client_name: "Dana".to_string(),
            client_phone: "050-1234567".to_string(),
            client_email: None,
            is_waiting_list: false,
            is_demo_mode: false,
        }
    }

    #[tokio::test]
    async fn save_then_fetch_ranges_for_day() {
        let store = MemoryBookingStore::new();
        let date = NaiveDate::from_ymd_opt(2025, 3, 2).unwrap();
        store.save_booking(&draft_for(date, "10:00")).await.unwrap();

        let ranges = store.fetch_booked_ranges(date).await.unwrap();
        assert_eq!(ranges.len(), 1);
        assert_eq!(ranges[0].time, "10:00");

        let other_day = NaiveDate::from_ymd_opt(2025, 3, 3).unwrap();
        assert!(store.fetch_booked_ranges(other_day).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn waiting_list_entries_hold_no_slot_units() {
        let store = MemoryBookingStore::new();
        let date = NaiveDate::from_ymd_opt(2025, 3, 2).unwrap();
        let mut draft = draft_for(date, "10:00");
        draft.is_waiting_list = true;
        store.save_booking(&draft).await.unwrap();

        assert!(store.fetch_booked_ranges(date).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn policy_rejection_mode_denies_saves() {
        let store = MemoryBookingStore::with_policy_rejection();
        let date = NaiveDate::from_ymd_opt(2025, 3, 2).unwrap();
        let err = store.save_booking(&draft_for(date, "10:00")).await.unwrap_err();
        assert!(matches!(err, StoreError::PolicyRejection(_)));
    }

    #[tokio::test]
    async fn cancel_removes_booking() {
        let store = MemoryBookingStore::new();
        let date = NaiveDate::from_ymd_opt(2025, 3, 2).unwrap();
        let saved = store.save_booking(&draft_for(date, "11:00")).await.unwrap();

        assert!(store.cancel_booking(saved.id).await.unwrap());
        assert!(!store.cancel_booking(saved.id).await.unwrap());
    }

    #[tokio::test]
    async fn bookings_for_client_newest_first() {
        let store = MemoryBookingStore::new();
        let date = NaiveDate::from_ymd_opt(2025, 3, 2).unwrap();
        let client = Uuid::new_v4();
        for time in ["09:00", "11:00"] {
            let mut draft = draft_for(date, time);
            draft.client_id = Some(client);
            store.save_booking(&draft).await.unwrap();
        }
        let mut other = draft_for(date, "13:00");
        other.client_id = Some(Uuid::new_v4());
        store.save_booking(&other).await.unwrap();

        let bookings = store.fetch_bookings_for_client(client).await.unwrap();
        assert_eq!(bookings.len(), 2);
    }
}
