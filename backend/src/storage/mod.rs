//! Storage and collaborator abstraction.
//!
//! The domain layer depends on the traits in [`traits`] only. The
//! [`memory`] module provides the doubles used by tests and demo runs;
//! production deployments wire in adapters for the hosted booking store
//! and identity provider instead.

pub mod memory;
pub mod traits;

pub use traits::{
    BookingStore, IdentityError, IdentityProvider, RegistrationOutcome, StoreError,
};
