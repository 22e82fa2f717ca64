use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Category a salon service belongs to, used for grouping in the UI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceCategory {
    Brows,
    Lashes,
    Combo,
}

/// A bookable salon service from the static catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceDto {
    pub id: String,
    pub name: String,
    /// Price in the salon's local currency
    pub price: f64,
    /// How long the service takes; determines how many 30-minute slots a booking occupies
    pub duration_minutes: u32,
    pub description: String,
    pub category: ServiceCategory,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceListResponse {
    pub services: Vec<ServiceDto>,
}

/// A single candidate appointment slot for a given date and service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeSlotDto {
    /// Slot start time, "HH:MM" 24-hour
    pub time: String,
    pub available: bool,
    /// Cosmetic "N people waiting" figure shown on unavailable slots
    pub waiting_count: u32,
}

/// Response for a slot availability query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlotListResponse {
    /// Date the slots were generated for, "YYYY-MM-DD"
    pub date: String,
    /// False when the salon is closed that day; `slots` is then empty
    pub working_day: bool,
    pub slots: Vec<TimeSlotDto>,
}

/// Request to register a new client account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    /// Forwarded to the identity provider, never stored by this backend
    pub password: String,
    pub name: String,
    pub phone: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Response from login/register; `confirmation_pending` means the provider
/// sent a confirmation email and the session is not yet active
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthResponse {
    pub user_id: Option<Uuid>,
    pub email: String,
    pub confirmation_pending: bool,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResendConfirmationRequest {
    pub email: String,
}

/// A registered client as shown in the staff registry (no credentials)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientProfileDto {
    pub id: Uuid,
    pub name: String,
    pub phone: String,
    pub email: String,
    /// Registration time, RFC 3339
    pub registered_at: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientListResponse {
    pub clients: Vec<ClientProfileDto>,
}

/// Step names mirrored to the UI so it knows which screen to render
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BookingStepDto {
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

/// Snapshot of one client's booking session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionStateResponse {
    pub session_id: Uuid,
    pub step: BookingStepDto,
    pub service_id: Option<String>,
    /// Selected date, "YYYY-MM-DD"
    pub date: Option<String>,
    /// Selected start time, "HH:MM"
    pub time: Option<String>,
    pub is_waiting_list: bool,
    /// True when the booking was accepted client-side but not durably stored
    pub is_demo_mode: bool,
    /// Last submit error, cleared on the next successful transition
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectServiceRequest {
    pub service_id: String,
}

/// Request for the payload-free screen changes (login, register,
/// services, manage-list, client-registry, home)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NavigateRequest {
    pub target: BookingStepDto,
}

/// Date/time selection for the slot picker step. The backend re-derives
/// slot availability itself; a blocked slot becomes a waiting-list draft.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectScheduleRequest {
    /// "YYYY-MM-DD"
    pub date: String,
    /// Slot start time, "HH:MM"
    pub time: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientDetailsRequest {
    pub name: String,
    pub phone: String,
    pub email: Option<String>,
}

/// Outcome of submitting a booking draft
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmitResponse {
    pub step: BookingStepDto,
    pub booking_id: Option<Uuid>,
    pub is_waiting_list: bool,
    pub is_demo_mode: bool,
    pub message: String,
}

/// A stored appointment as returned to the manage-list screen
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookingDto {
    pub id: Uuid,
    pub service_name: String,
    /// "YYYY-MM-DD"
    pub date: String,
    /// "HH:MM"
    pub time: String,
    pub client_name: String,
    pub client_phone: String,
    pub is_waiting_list: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookingListResponse {
    pub bookings: Vec<BookingDto>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CancelBookingResponse {
    pub success: bool,
    pub message: String,
}
