//! Application layer - Use cases over the domain and its ports.
//!
//! The wizard controller owns all mutable form state; collaborators are
//! reached only through the traits in `ports`.

pub mod wizard;

pub use wizard::{
    AdvanceOutcome, BookingWizard, DependentResourceLoader, LoadOutcome, ResourceSlot,
    SubmissionContract, SubmissionGateway, WheelFilter, WizardSettings, WizardSnapshot,
};
