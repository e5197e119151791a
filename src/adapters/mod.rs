//! Adapters - Implementations of port interfaces.
//!
//! - `memory` - In-process rental backend and notification centre
//! - `rest` - HTTP clients for the rental backend's REST API

pub mod memory;
pub mod rest;

pub use memory::{InMemoryNotificationCenter, InMemoryRentalBackend};
pub use rest::{RestBookingService, RestClient, RestConfig, RestUserDirectory, RestVehicleCatalog};
