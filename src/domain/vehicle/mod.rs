//! Vehicle catalogue types and availability rules.

mod availability;
mod catalog;

pub use availability::{check_availability, AvailabilityReport, BookedPeriod};
pub use catalog::{filter_types_by_wheels, VehicleModel, VehicleType};
