//! Domain layer containing the booking wizard's types and pure transitions.
//!
//! # Module Organization
//!
//! - `foundation` - Shared primitives (ids, dates, booking status, errors)
//! - `vehicle` - Vehicle catalogue and availability rules
//! - `booking` - Form state, step rules, cascade and the wizard step machine

pub mod booking;
pub mod foundation;
pub mod vehicle;
