//! Submission vocabulary: the draft sent to the booking service, the
//! confirmation it returns, and the user-facing error classes.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::foundation::{
    BookingId, BookingStatus, DateRange, UserId, ValidationError, VehicleModelId,
};

use super::{FormData, FormField};

pub const UNAVAILABLE_MESSAGE: &str =
    "Vehicle is not available for the selected dates. Please choose different dates.";
pub const INVALID_DATA_MESSAGE: &str = "Invalid booking data. Please check your inputs.";
pub const VEHICLE_NOT_FOUND_MESSAGE: &str =
    "Selected vehicle not found. Please refresh and try again.";
pub const SUBMISSION_FAILED_MESSAGE: &str = "Failed to create booking. Please try again later.";

/// Why a submission attempt failed. `Display` is the message shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BookingError {
    /// The vehicle is already booked for an overlapping period.
    #[error("{}", UNAVAILABLE_MESSAGE)]
    Unavailable,

    /// The booking service rejected the data, optionally saying why.
    #[error("{}", .0.as_deref().unwrap_or(INVALID_DATA_MESSAGE))]
    InvalidData(Option<String>),

    #[error("{}", VEHICLE_NOT_FOUND_MESSAGE)]
    VehicleNotFound,

    /// Anything else, including timeouts and network failures.
    #[error("{}", SUBMISSION_FAILED_MESSAGE)]
    Failed,
}

impl BookingError {
    /// Maps an HTTP-like status class and optional backend message.
    pub fn from_status(status: u16, backend_message: Option<String>) -> Self {
        match status {
            409 => BookingError::Unavailable,
            400 => BookingError::InvalidData(
                backend_message.filter(|m| !m.trim().is_empty()),
            ),
            404 => BookingError::VehicleNotFound,
            _ => BookingError::Failed,
        }
    }

    pub fn user_message(&self) -> String {
        self.to_string()
    }
}

impl From<ValidationError> for BookingError {
    fn from(err: ValidationError) -> Self {
        BookingError::InvalidData(Some(err.to_string()))
    }
}

/// Who the booking is for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Booker {
    #[serde(rename_all = "camelCase")]
    Named { first_name: String, last_name: String },
    #[serde(rename_all = "camelCase")]
    User { user_id: UserId },
}

/// Typed view of a completed form, ready to be sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingDraft {
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub vehicle_id: VehicleModelId,
    pub period: DateRange,
}

impl BookingDraft {
    /// Parses the form values; blank optional contact fields become `None`.
    pub fn from_form(data: &FormData) -> Result<Self, ValidationError> {
        let required = |field: FormField| -> Result<String, ValidationError> {
            let value = data.get(field).trim();
            if value.is_empty() {
                return Err(ValidationError::empty_field(field.as_str()));
            }
            Ok(value.to_string())
        };
        let optional = |field: FormField| {
            let value = data.get(field).trim();
            (!value.is_empty()).then(|| value.to_string())
        };

        Ok(Self {
            first_name: required(FormField::FirstName)?,
            last_name: required(FormField::LastName)?,
            email: optional(FormField::Email),
            phone: optional(FormField::Phone),
            vehicle_id: VehicleModelId::new(data.get(FormField::VehicleModel).trim())?,
            period: DateRange::parse(data.get(FormField::StartDate), data.get(FormField::EndDate))?,
        })
    }

    pub fn named_booker(&self) -> Booker {
        Booker::Named {
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
        }
    }
}

/// What the booking service returns for a created booking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingConfirmation {
    pub booking_id: BookingId,
    pub vehicle_id: VehicleModelId,
    pub period: DateRange,
    #[serde(default)]
    pub status: BookingStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<UserId>,
}

/// Outcome of the create-user-or-find-existing step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserResolution {
    Created(UserId),
    /// Creation hit a duplicate email and the existing user was found.
    FoundExisting(UserId),
    Failed(BookingError),
}

impl UserResolution {
    pub fn into_result(self) -> Result<UserId, BookingError> {
        match self {
            UserResolution::Created(id) | UserResolution::FoundExisting(id) => Ok(id),
            UserResolution::Failed(err) => Err(err),
        }
    }
}
