//! Slot availability engine.
//!
//! Turns a day's business hours, a service duration, and the day's
//! existing bookings into the ordered list of candidate slots the UI
//! renders. The only inputs are the arguments; output is byte-for-byte
//! deterministic, so the UI grid can rely on the enumeration order.

use std::collections::HashSet;
use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use tracing::{info, warn};

use crate::config::SalonConfig;
use crate::domain::catalog::ServiceCatalog;
use crate::domain::commands::slots::SlotDay;
use crate::domain::models::{BookedRange, Service, TimeSlot};
use crate::domain::time_utils::{add_minutes, is_working_day, waiting_count};
use crate::storage::traits::BookingStore;

#[derive(Clone)]
pub struct SlotService {
    config: SalonConfig,
    catalog: Arc<ServiceCatalog>,
}

impl SlotService {
    pub fn new(config: SalonConfig, catalog: Arc<ServiceCatalog>) -> Self {
        Self { config, catalog }
    }

    /// Full availability query for one day: fetches the day's booked
    /// ranges from the store, then generates the slot list.
    pub async fn slots_for_day(
        &self,
        date: NaiveDate,
        service: &Service,
        store: &dyn BookingStore,
    ) -> Result<SlotDay> {
        if !is_working_day(date, &self.config.working_days) {
            info!("{} is not a working day, no slots", date);
            return Ok(SlotDay {
                date,
                working_day: false,
                slots: Vec::new(),
            });
        }

        let booked = store
            .fetch_booked_ranges(date)
            .await
            .context("Failed to fetch booked ranges")?;
        info!(
            "Generating slots for {} ({}, {} min) against {} bookings",
            date,
            service.name,
            service.duration_minutes,
            booked.len()
        );

        Ok(SlotDay {
            date,
            working_day: true,
            slots: self.generate_slots(service.duration_minutes, &booked),
        })
    }

    /// Enumerate candidate slots for a service of the given duration.
    ///
    /// Slots whose service would run past closing are absent from the
    /// output entirely. Slots colliding with an existing booking stay in
    /// the output with `available = false` so the caller can offer a
    /// waiting-list booking at that exact time.
    pub fn generate_slots(&self, duration_minutes: u32, booked: &[BookedRange]) -> Vec<TimeSlot> {
        let granularity = self.config.slot_minutes;
        let blocked = self.blocked_units(booked);
        let units_needed = Self::units_for(duration_minutes, granularity);

        let mut slots = Vec::new();
        let closing = self.config.closing_minutes();
        let mut start = self.config.opening_minutes();

        while start + duration_minutes <= closing {
            let time = format!("{:02}:{:02}", start / 60, start % 60);

            let mut available = true;
            let mut unit = time.clone();
            for _ in 0..units_needed {
                if blocked.contains(&unit) {
                    available = false;
                    break;
                }
                unit = add_minutes(&unit, granularity as i64);
            }

            slots.push(TimeSlot {
                waiting_count: waiting_count(&time),
                time,
                available,
            });
            start += granularity;
        }
        slots
    }

    /// Every slot-unit start time occupied by the day's bookings.
    ///
    /// Each booking blocks `ceil(duration / granularity)` consecutive
    /// units from its start time; duration derives from the service name
    /// via the catalog. A name the catalog no longer knows blocks one
    /// unit rather than failing the whole query.
    fn blocked_units(&self, booked: &[BookedRange]) -> HashSet<String> {
        let granularity = self.config.slot_minutes;
        let mut blocked = HashSet::new();
        for range in booked {
            let duration = self
                .catalog
                .duration_for_name(&range.service_name)
                .unwrap_or_else(|| {
                    warn!(
                        "Unknown service name '{}' on booked range, blocking one unit",
                        range.service_name
                    );
                    granularity
                });
            let mut unit = range.time.clone();
            for _ in 0..Self::units_for(duration, granularity) {
                blocked.insert(unit.clone());
                unit = add_minutes(&unit, granularity as i64);
            }
        }
        blocked
    }

    fn units_for(duration_minutes: u32, granularity: u32) -> u32 {
        duration_minutes.div_ceil(granularity).max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::time_utils::time_to_minutes;
    use crate::storage::memory::MemoryBookingStore;

    fn service_under_test() -> SlotService {
        SlotService::new(SalonConfig::default(), Arc::new(ServiceCatalog::default()))
    }

    fn booked(time: &str, service_name: &str) -> BookedRange {
        BookedRange {
            date: NaiveDate::from_ymd_opt(2025, 3, 2).unwrap(),
            time: time.to_string(),
            service_name: service_name.to_string(),
        }
    }

    fn slot<'a>(slots: &'a [TimeSlot], time: &str) -> &'a TimeSlot {
        slots.iter().find(|s| s.time == time).unwrap()
    }

    #[test]
    fn open_day_thirty_minute_service_fills_the_grid() {
        let slots = service_under_test().generate_slots(30, &[]);
        assert_eq!(slots[0].time, "09:00");
        assert_eq!(slots.last().unwrap().time, "17:30");
        assert_eq!(slots.len(), 18);
        assert!(slots.iter().all(|s| s.available));
    }

    #[test]
    fn no_slot_runs_past_closing() {
        for duration in [30u32, 45, 60, 90, 120] {
            let slots = service_under_test().generate_slots(duration, &[]);
            for s in &slots {
                let start = time_to_minutes(&s.time).unwrap();
                assert!(
                    start + duration <= 18 * 60,
                    "{} + {} min runs past closing",
                    s.time,
                    duration
                );
            }
            // Late candidates are dropped entirely, not marked unavailable
            assert_eq!(slots.last().unwrap().time, {
                let last = 18 * 60 - duration;
                // Last slot start on the 30-minute grid that still fits
                let last = last - last % 30;
                format!("{:02}:{:02}", last / 60, last % 60)
            });
        }
    }

    #[test]
    fn sixty_minute_booking_blocks_two_units() {
        // Brow Lamination is 60 minutes, so 10:00 and 10:30 are taken
        let slots = service_under_test().generate_slots(30, &[booked("10:00", "Brow Lamination")]);
        assert!(!slot(&slots, "10:00").available);
        assert!(!slot(&slots, "10:30").available);
        assert!(slot(&slots, "09:30").available);
        assert!(slot(&slots, "11:00").available);
    }

    #[test]
    fn long_candidate_collides_with_later_booking() {
        // A 120-minute candidate at 09:00 occupies 09:00-11:00 and must
        // collide with a 30-minute booking at 10:30
        let slots =
            service_under_test().generate_slots(120, &[booked("10:30", "Brow Shaping & Tint")]);
        assert!(!slot(&slots, "09:00").available);
        assert!(!slot(&slots, "09:30").available);
        assert!(!slot(&slots, "10:00").available);
        assert!(!slot(&slots, "10:30").available);
        assert!(slot(&slots, "11:00").available);
    }

    #[test]
    fn odd_duration_rounds_up_to_whole_units() {
        // Lash Refill is 90 minutes -> 3 units from 12:00
        let slots = service_under_test().generate_slots(30, &[booked("12:00", "Lash Refill")]);
        assert!(!slot(&slots, "12:00").available);
        assert!(!slot(&slots, "12:30").available);
        assert!(!slot(&slots, "13:00").available);
        assert!(slot(&slots, "13:30").available);
    }

    #[test]
    fn unknown_service_blocks_one_unit() {
        let slots = service_under_test().generate_slots(30, &[booked("14:00", "Mystery")]);
        assert!(!slot(&slots, "14:00").available);
        assert!(slot(&slots, "14:30").available);
    }

    #[test]
    fn unknown_service_blocks_one_unit_on_a_finer_grid() {
        let config = SalonConfig {
            slot_minutes: 15,
            ..SalonConfig::default()
        };
        let svc = SlotService::new(config, Arc::new(ServiceCatalog::default()));
        let slots = svc.generate_slots(15, &[booked("14:00", "Mystery")]);
        assert!(!slot(&slots, "14:00").available);
        assert!(slot(&slots, "14:15").available);
    }

    #[test]
    fn unavailable_slots_keep_waiting_count_in_range() {
        let slots = service_under_test().generate_slots(30, &[booked("10:00", "Brow Lamination")]);
        let taken = slot(&slots, "10:00");
        assert!((1..=4).contains(&taken.waiting_count));
    }

    #[test]
    fn output_is_deterministic_and_ordered() {
        let svc = service_under_test();
        let ranges = vec![booked("10:00", "Brow Lamination"), booked("15:00", "Lash Refill")];
        let first = svc.generate_slots(60, &ranges);
        let second = svc.generate_slots(60, &ranges);
        assert_eq!(first, second);

        let starts: Vec<u32> = first
            .iter()
            .map(|s| time_to_minutes(&s.time).unwrap())
            .collect();
        let mut sorted = starts.clone();
        sorted.sort_unstable();
        assert_eq!(starts, sorted, "slots must be in ascending order");
    }

    #[tokio::test]
    async fn closed_day_yields_empty_slot_list() {
        let svc = service_under_test();
        let store = MemoryBookingStore::new();
        let catalog = ServiceCatalog::default();
        let lash_lift = catalog.find("lash-lift").unwrap();

        // 2025-03-07 is a Friday, outside Sunday-Thursday hours
        let friday = NaiveDate::from_ymd_opt(2025, 3, 7).unwrap();
        let day = svc.slots_for_day(friday, lash_lift, &store).await.unwrap();
        assert!(!day.working_day);
        assert!(day.slots.is_empty());

        let sunday = NaiveDate::from_ymd_opt(2025, 3, 2).unwrap();
        let day = svc.slots_for_day(sunday, lash_lift, &store).await.unwrap();
        assert!(day.working_day);
        assert!(!day.slots.is_empty());
    }
}
