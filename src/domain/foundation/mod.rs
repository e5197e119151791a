//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, enums, and error types
//! that form the vocabulary of the booking domain.

mod booking_status;
mod date_range;
mod errors;
mod ids;
mod state_machine;
mod timestamp;

pub use booking_status::BookingStatus;
pub use date_range::{parse_date, DateRange};
pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::{BookingId, NotificationId, UserId, VehicleModelId, VehicleTypeId};
pub use state_machine::StateMachine;
pub use timestamp::Timestamp;
