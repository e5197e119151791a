//! SubmissionGateway - turns a completed form into a booking.

use serde::Deserialize;
use std::str::FromStr;
use std::sync::Arc;

use crate::domain::booking::{
    Booker, BookingConfirmation, BookingDraft, BookingError, FormData, UserResolution,
};
use crate::domain::foundation::ValidationError;
use crate::ports::{BookingService, CreateBookingRequest, NewUser, UserDirectory};

/// Which booking-creation contract the backend speaks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionContract {
    /// One call carrying the booker's name.
    #[default]
    Direct,
    /// Register (or find) the user by email first, then book for the user id.
    UpsertUser,
}

impl FromStr for SubmissionContract {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "direct" => Ok(SubmissionContract::Direct),
            "upsert_user" | "upsert-user" => Ok(SubmissionContract::UpsertUser),
            other => Err(ValidationError::invalid_format(
                "submission",
                format!("expected direct or upsert_user, got '{}'", other),
            )),
        }
    }
}

pub struct SubmissionGateway {
    bookings: Arc<dyn BookingService>,
    users: Option<Arc<dyn UserDirectory>>,
}

impl SubmissionGateway {
    /// Books directly by name.
    pub fn direct(bookings: Arc<dyn BookingService>) -> Self {
        Self {
            bookings,
            users: None,
        }
    }

    /// Resolves a user in `users` before booking.
    pub fn upsert_user(bookings: Arc<dyn BookingService>, users: Arc<dyn UserDirectory>) -> Self {
        Self {
            bookings,
            users: Some(users),
        }
    }

    pub fn contract(&self) -> SubmissionContract {
        match self.users {
            Some(_) => SubmissionContract::UpsertUser,
            None => SubmissionContract::Direct,
        }
    }

    pub async fn submit(&self, data: &FormData) -> Result<BookingConfirmation, BookingError> {
        let draft = BookingDraft::from_form(data)?;

        let booker = match &self.users {
            None => draft.named_booker(),
            Some(users) => {
                let user_id = Self::resolve_user(users.as_ref(), &draft).await.into_result()?;
                Booker::User { user_id }
            }
        };

        let request = CreateBookingRequest::new(booker, draft.vehicle_id.clone(), draft.period);
        self.bookings.create_booking(request).await.map_err(|e| {
            tracing::warn!(
                vehicle_id = %draft.vehicle_id,
                period = %draft.period,
                error = %e,
                "booking creation failed"
            );
            BookingError::from(e)
        })
    }

    /// Creates the user; a duplicate email falls back to looking it up.
    async fn resolve_user(users: &dyn UserDirectory, draft: &BookingDraft) -> UserResolution {
        let email = match &draft.email {
            Some(email) => email.clone(),
            None => {
                return UserResolution::Failed(BookingError::InvalidData(Some(
                    "Email is required".to_string(),
                )))
            }
        };

        let new_user = NewUser {
            first_name: draft.first_name.clone(),
            last_name: draft.last_name.clone(),
            email: email.clone(),
            phone: draft.phone.clone(),
        };

        match users.create_user(new_user).await {
            Ok(user) => UserResolution::Created(user.id),
            Err(e) if e.is_duplicate() => match users.find_by_email(&email).await {
                Ok(Some(user)) => {
                    tracing::debug!(user_id = %user.id, "reusing existing user");
                    UserResolution::FoundExisting(user.id)
                }
                Ok(None) => {
                    tracing::warn!("duplicate email reported but no user found");
                    UserResolution::Failed(BookingError::Failed)
                }
                Err(lookup) => UserResolution::Failed(lookup.into()),
            },
            Err(e) => UserResolution::Failed(e.into()),
        }
    }
}
