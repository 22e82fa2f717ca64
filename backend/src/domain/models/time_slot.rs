use serde::{Deserialize, Serialize};

/// A candidate appointment slot, recomputed per date/service query and
/// never persisted
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSlot {
    /// Slot start, "HH:MM" 24-hour
    pub time: String,
    pub available: bool,
    /// Cosmetic "N people waiting" figure, deterministic per time string
    pub waiting_count: u32,
}
