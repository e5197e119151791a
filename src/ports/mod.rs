//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the wizard and the outside world. Adapters implement these ports.
//!
//! - `VehicleCatalog` - vehicle types, models and availability
//! - `BookingService` - booking creation
//! - `UserDirectory` - user registration and lookup by email
//! - `NotificationSink` - transient success/error messages

mod booking_service;
mod notification_sink;
mod service_error;
mod user_directory;
mod vehicle_catalog;

pub use booking_service::{BookingService, CreateBookingRequest};
pub use notification_sink::NotificationSink;
pub use service_error::ServiceError;
pub use user_directory::{NewUser, UserDirectory, UserRecord};
pub use vehicle_catalog::VehicleCatalog;
