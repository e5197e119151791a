//! User Directory Port - Users that bookings can be attached to.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::UserId;

use super::ServiceError;

/// Data sent to register a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

/// A registered user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    pub id: UserId,
    #[serde(alias = "first_name")]
    pub first_name: String,
    #[serde(alias = "last_name")]
    pub last_name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
}

impl UserRecord {
    /// True when the stored email equals `email`, ignoring case and
    /// surrounding whitespace. Users without an email never match.
    pub fn has_email(&self, email: &str) -> bool {
        self.email
            .as_deref()
            .is_some_and(|own| own.trim().eq_ignore_ascii_case(email.trim()))
    }
}

/// Port for the user directory.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Registers a user. A duplicate email fails with a 409 status.
    async fn create_user(&self, user: NewUser) -> Result<UserRecord, ServiceError>;

    /// Looks a user up by email, ignoring case.
    async fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>, ServiceError>;
}
