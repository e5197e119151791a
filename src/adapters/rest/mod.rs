//! REST adapters for the rental backend (`reqwest`).

pub(crate) mod client;

mod bookings;
mod catalog;
mod users;

pub use bookings::RestBookingService;
pub use catalog::RestVehicleCatalog;
pub use client::{RestClient, RestConfig};
pub use users::RestUserDirectory;
