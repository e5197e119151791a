//! REST implementation of [`UserDirectory`].

use async_trait::async_trait;

use crate::ports::{NewUser, ServiceError, UserDirectory, UserRecord};

use super::RestClient;

pub struct RestUserDirectory {
    client: RestClient,
}

impl RestUserDirectory {
    pub fn new(client: RestClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl UserDirectory for RestUserDirectory {
    async fn create_user(&self, user: NewUser) -> Result<UserRecord, ServiceError> {
        self.client.post("users", &user).await
    }

    /// The backend has no lookup route, so the full list is scanned.
    async fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>, ServiceError> {
        let users: Vec<UserRecord> = self.client.get("users", &[]).await?;
        Ok(users
            .into_iter()
            .find(|u| u.has_email(email)))
    }
}
