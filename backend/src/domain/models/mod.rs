pub mod booking;
pub mod client;
pub mod draft;
pub mod service;
pub mod time_slot;

pub use booking::{BookedRange, SavedBooking};
pub use client::{AuthenticatedUser, ClientProfile};
pub use draft::BookingDraft;
pub use service::{Service, ServiceCategory};
pub use time_slot::TimeSlot;
