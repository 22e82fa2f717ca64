//! Appointment management for the manage-list screen: listing a client's
//! bookings and cancelling one.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use crate::domain::models::SavedBooking;
use crate::storage::traits::{BookingStore, StoreError};

#[derive(Clone)]
pub struct BookingService {
    store: Arc<dyn BookingStore>,
}

impl BookingService {
    pub fn new(store: Arc<dyn BookingStore>) -> Self {
        Self { store }
    }

    /// A client's appointments, newest first
    pub async fn bookings_for_client(
        &self,
        client_id: Uuid,
    ) -> Result<Vec<SavedBooking>, StoreError> {
        let bookings = self.store.fetch_bookings_for_client(client_id).await?;
        info!("Client {} has {} bookings", client_id, bookings.len());
        Ok(bookings)
    }

    /// Cancel an appointment; false when it no longer exists
    pub async fn cancel(&self, booking_id: Uuid) -> Result<bool, StoreError> {
        let cancelled = self.store.cancel_booking(booking_id).await?;
        if cancelled {
            info!("Cancelled booking {}", booking_id);
        } else {
            info!("Cancel requested for unknown booking {}", booking_id);
        }
        Ok(cancelled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::{BookingDraft, Service, ServiceCategory};
    use crate::storage::memory::MemoryBookingStore;
    use chrono::NaiveDate;

    #[tokio::test]
    async fn list_and_cancel_round_trip() {
        let store = Arc::new(MemoryBookingStore::new());
        let service = BookingService::new(store.clone());
        let client = Uuid::new_v4();

        let draft = BookingDraft {
            client_id: Some(client),
            service: Some(Service {
                id: "brow-shaping".to_string(),
                name: "Brow Shaping & Tint".to_string(),
                price: 35.0,
                duration_minutes: 30,
                description: String::new(),
                category: ServiceCategory::Brows,
            }),
            date: Some(NaiveDate::from_ymd_opt(2025, 3, 2).unwrap()),
            time: Some("09:00".to_string()),
            client_name: "Dana".to_string(),
            client_phone: "050-1234567".to_string(),
            client_email: None,
            is_waiting_list: false,
            is_demo_mode: false,
        };
        let saved = store.save_booking(&draft).await.unwrap();

        let bookings = service.bookings_for_client(client).await.unwrap();
        assert_eq!(bookings.len(), 1);

        assert!(service.cancel(saved.id).await.unwrap());
        assert!(service.bookings_for_client(client).await.unwrap().is_empty());
        assert!(!service.cancel(saved.id).await.unwrap());
    }
}
