//! Registration and account maintenance.

use domain::{Email, User, UserError, UserInput};
use store::{StoreError, UserRepository};

use super::parse_id;
use crate::error::{Result, ServiceError};

/// Service for managing users.
pub struct UserService<R: UserRepository> {
    users: R,
}

impl<R: UserRepository> UserService<R> {
    pub fn new(users: R) -> Self {
        Self { users }
    }

    /// Returns a reference to the underlying repository.
    pub fn repository(&self) -> &R {
        &self.users
    }

    /// Validates and stores a new user. Emails are unique.
    #[tracing::instrument(skip(self, input))]
    pub async fn register(&self, input: UserInput) -> Result<User> {
        let user = User::create(input, None)?;

        if self.users.exists_by_email(user.email()).await? {
            return Err(ServiceError::UserAlreadyExists);
        }

        // The repository rechecks under its lock; a racing registration
        // surfaces as a conflict.
        self.users.save(&user).await.map_err(|e| match e {
            StoreError::Conflict { .. } => ServiceError::UserAlreadyExists,
            other => other.into(),
        })?;

        metrics::counter!("users_registered_total", "role" => user.role().as_str()).increment(1);
        tracing::info!(user_id = %user.id(), "user registered");
        Ok(user)
    }

    #[tracing::instrument(skip(self))]
    pub async fn get_user(&self, user_id: &str) -> Result<User> {
        let id = parse_id(user_id)?;
        self.users
            .find_by_id(&id)
            .await?
            .ok_or_else(|| ServiceError::UserNotFound(user_id.to_string()))
    }

    /// Looks a user up by email, normalized the same way registration does.
    #[tracing::instrument(skip(self))]
    pub async fn get_by_email(&self, email: &str) -> Result<User> {
        let email = Email::create(email).map_err(UserError::from)?;
        self.users
            .find_by_email(&email)
            .await?
            .ok_or_else(|| ServiceError::UserNotFound(email.to_string()))
    }

    /// Replaces the refresh token; `None` or an empty token clears it.
    #[tracing::instrument(skip(self, token))]
    pub async fn store_refresh_token(&self, user_id: &str, token: Option<&str>) -> Result<User> {
        let mut user = self.get_user(user_id).await?;
        match token {
            Some(token) => user.set_refresh_token(token),
            None => user.clear_refresh_token(),
        }
        self.users.save(&user).await?;
        Ok(user)
    }

    /// Replaces the password after checking the current one.
    #[tracing::instrument(skip(self, current, new))]
    pub async fn change_password(&self, user_id: &str, current: &str, new: &str) -> Result<()> {
        let mut user = self.get_user(user_id).await?;
        if !user.password().matches(current) {
            return Err(ServiceError::InvalidCredentials);
        }
        user.change_password(new).map_err(UserError::from)?;
        self.users.save(&user).await?;
        tracing::info!(user_id = %user.id(), "password changed");
        Ok(())
    }
}
