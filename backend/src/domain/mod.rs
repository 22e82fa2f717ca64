//! Business logic for the salon booking application.
//!
//! The two pieces with real invariants live here: the slot availability
//! engine ([`slot_service`]) and the booking flow state machine
//! ([`booking_flow`] driven per session by [`flow_service`]). Everything
//! else is supporting cast: the static service catalog, pure time
//! helpers, and thin wrappers over the external collaborators.

pub mod booking_flow;
pub mod booking_service;
pub mod catalog;
pub mod commands;
pub mod flow_service;
pub mod identity_service;
pub mod models;
pub mod slot_service;
pub mod time_utils;

pub use booking_flow::{BookingFlow, BookingStep, FlowError};
pub use booking_service::BookingService;
pub use catalog::ServiceCatalog;
pub use flow_service::{FlowService, NavTarget, SessionError};
pub use identity_service::IdentityService;
pub use slot_service::SlotService;
