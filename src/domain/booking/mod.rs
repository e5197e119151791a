//! Booking wizard domain.
//!
//! Everything here is pure: form values and errors, the per-step rule table,
//! the cascade of stale fields, and the step machine. IO lives behind the
//! ports and is driven from `application::wizard`.

mod cascade;
mod field_store;
mod form;
mod notification;
mod steps;
mod submission;
mod validator;
mod wizard;

pub use cascade::{DateChangeReset, DependencyGraph, ResetPolicy};
pub use field_store::FieldStore;
pub use form::{ErrorKey, FormData, FormErrors, FormField};
pub use notification::{Notification, NotificationKind};
pub use steps::{StepKind, StepSequence};
pub use submission::{
    Booker, BookingConfirmation, BookingDraft, BookingError, UserResolution,
    INVALID_DATA_MESSAGE, SUBMISSION_FAILED_MESSAGE, UNAVAILABLE_MESSAGE,
    VEHICLE_NOT_FOUND_MESSAGE,
};
pub use validator::{Check, FieldRule, RuleTable, StepValidator};
pub use wizard::{WizardEvent, WizardPhase, WizardState};
