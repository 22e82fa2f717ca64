//! Domain-level query/result types.
//!
//! Used between services inside the domain layer; the REST layer maps
//! these to the public DTOs in the `shared` crate.

pub mod slots {
    use chrono::NaiveDate;

    use crate::domain::models::TimeSlot;

    /// Result of a slot availability query for one day
    #[derive(Debug, Clone, PartialEq)]
    pub struct SlotDay {
        pub date: NaiveDate,
        /// False when the salon is closed that day; `slots` is empty then
        pub working_day: bool,
        pub slots: Vec<TimeSlot>,
    }
}

pub mod flow {
    use chrono::NaiveDate;
    use uuid::Uuid;

    use crate::domain::booking_flow::BookingStep;

    /// Snapshot of one session's flow state for the UI
    #[derive(Debug, Clone, PartialEq)]
    pub struct SessionSnapshot {
        pub session_id: Uuid,
        /// Signed-in client, when the session got past login
        pub client_id: Option<Uuid>,
        pub step: BookingStep,
        pub service_id: Option<String>,
        pub date: Option<NaiveDate>,
        pub time: Option<String>,
        pub is_waiting_list: bool,
        pub is_demo_mode: bool,
        pub error: Option<String>,
    }

    /// Result of submitting a booking draft
    #[derive(Debug, Clone, PartialEq)]
    pub struct SubmitOutcome {
        pub step: BookingStep,
        /// Absent for demo-mode acceptances, which are not durably stored
        pub booking_id: Option<Uuid>,
        pub is_waiting_list: bool,
        pub is_demo_mode: bool,
        pub message: String,
    }
}
