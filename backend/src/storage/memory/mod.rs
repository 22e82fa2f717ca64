pub mod booking_store;
pub mod identity;

pub use booking_store::MemoryBookingStore;
pub use identity::MemoryIdentity;
