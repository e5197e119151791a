//! Booking Wizard - Multi-step vehicle rental booking controller
//!
//! This crate drives a rental booking form through an ordered sequence of
//! steps: it validates each step, keeps the dependent vehicle lists in sync
//! with the wheel count, selected type and rental period, and submits the
//! completed form to a booking service.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
pub mod telemetry;
