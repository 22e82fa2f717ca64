use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A registered client as exposed to the staff registry.
///
/// Deliberately carries no credentials of any kind; credential custody
/// belongs to the identity provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientProfile {
    pub id: Uuid,
    pub name: String,
    pub phone: String,
    pub email: String,
    pub registered_at: DateTime<Utc>,
}

/// The signed-in user as reported by the identity provider session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthenticatedUser {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub phone: String,
}
