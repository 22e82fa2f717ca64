use serde::{Deserialize, Serialize};

/// Category a service belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceCategory {
    Brows,
    Lashes,
    Combo,
}

/// Immutable catalog entry for a bookable service
///
/// The duration determines how many contiguous 30-minute slot units a
/// booking for this service occupies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Service {
    pub id: String,
    pub name: String,
    pub price: f64,
    pub duration_minutes: u32,
    pub description: String,
    pub category: ServiceCategory,
}
