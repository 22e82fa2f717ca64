//! Salon appointment booking backend.
//!
//! Core: the slot availability engine and the per-session booking flow
//! state machine. Persistence and authentication are external
//! collaborators behind the traits in [`storage`]; the REST layer in
//! [`rest`] is the delivery surface.

pub mod config;
pub mod domain;
pub mod rest;
pub mod storage;
