//! In-process adapters for tests, demos and offline development.

mod backend;
mod notifications;

pub use backend::InMemoryRentalBackend;
pub use notifications::{InMemoryNotificationCenter, DEFAULT_TTL_MS};
