//! Booking wizard.
//!
//! The controller that drives the multi-step rental form, the loader for
//! its dependent vehicle lists and the gateway that turns a completed form
//! into a booking.

mod controller;
mod resource_loader;
mod submission;

pub use controller::{
    // Controller
    BookingWizard,
    WizardSettings,
    // Outcomes
    AdvanceOutcome,
    LoadOutcome,
    WizardSnapshot,
    // Messages
    BOOKING_CREATED,
    MODELS_LOAD_FAILED,
    TYPES_LOAD_FAILED,
};
pub use resource_loader::{DependentResourceLoader, ResourceSlot, WheelFilter};
pub use submission::{SubmissionContract, SubmissionGateway};
