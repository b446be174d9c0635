//! User aggregate implementation.

use serde::{Deserialize, Serialize};

use common::{Combine, UniqueEntityId};

use super::UserError;
use super::value_objects::{Email, EmailError, FirstName, LastName, Password, PasswordError};
use crate::entity::{AggregateRoot, Entity};
use crate::error::Exception;

/// What a user is allowed to do.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    Customer,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Customer => "customer",
            Role::Admin => "admin",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raw, unvalidated input for [`User::create`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserInput {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub role: Role,
    #[serde(default)]
    pub refresh_token: Option<String>,
}

impl UserInput {
    /// A customer with no refresh token.
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            email: email.into(),
            password: password.into(),
            ..Default::default()
        }
    }

    pub fn with_role(mut self, role: Role) -> Self {
        self.role = role;
        self
    }

    pub fn with_refresh_token(mut self, token: impl Into<String>) -> Self {
        self.refresh_token = Some(token.into());
        self
    }
}

/// Validated state of a user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserProps {
    pub first_name: FirstName,
    pub last_name: LastName,
    pub email: Email,
    pub password: Password,
    pub role: Role,
    pub refresh_token: Option<String>,
}

/// A registered shop user.
pub type User = Entity<UserProps>;

impl Entity<UserProps> {
    /// Validates every field and builds the user.
    ///
    /// All four value objects are checked; the first failure in field order
    /// (first name, last name, email, password) is returned.
    #[tracing::instrument(level = "debug", skip_all)]
    pub fn create(input: UserInput, id: Option<UniqueEntityId>) -> Result<User, UserError> {
        let validated: Result<_, UserError> = (
            FirstName::create(&input.first_name),
            LastName::create(&input.last_name),
            Email::create(&input.email),
            Password::create(&input.password),
        )
            .combine();

        let (first_name, last_name, email, password) = validated.inspect_err(|error| {
            tracing::debug!(code = error.code(), "user rejected");
        })?;

        Ok(Entity::new(
            UserProps {
                first_name,
                last_name,
                email,
                password,
                role: input.role,
                refresh_token: input.refresh_token.filter(|token| !token.is_empty()),
            },
            id,
        ))
    }

    // Queries

    pub fn first_name(&self) -> &FirstName {
        &self.props().first_name
    }

    pub fn last_name(&self) -> &LastName {
        &self.props().last_name
    }

    pub fn email(&self) -> &Email {
        &self.props().email
    }

    pub fn password(&self) -> &Password {
        &self.props().password
    }

    pub fn role(&self) -> Role {
        self.props().role
    }

    pub fn refresh_token(&self) -> Option<&str> {
        self.props().refresh_token.as_deref()
    }

    pub fn is_admin(&self) -> bool {
        self.role() == Role::Admin
    }

    /// "First Last".
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name(), self.last_name())
    }

    // Commands

    pub fn set_refresh_token(&mut self, token: impl Into<String>) {
        let token = token.into();
        self.props_mut().refresh_token = (!token.is_empty()).then_some(token);
    }

    pub fn clear_refresh_token(&mut self) {
        self.props_mut().refresh_token = None;
    }

    /// Replaces the password. The old one stays on failure.
    pub fn change_password(&mut self, raw: &str) -> Result<(), PasswordError> {
        self.props_mut().password = Password::create(raw)?;
        Ok(())
    }

    /// Replaces the email. The old one stays on failure.
    pub fn change_email(&mut self, raw: &str) -> Result<(), EmailError> {
        self.props_mut().email = Email::create(raw)?;
        Ok(())
    }

    pub fn set_role(&mut self, role: Role) {
        self.props_mut().role = role;
    }
}

impl AggregateRoot for User {
    fn aggregate_type() -> &'static str {
        "User"
    }

    fn root_id(&self) -> &UniqueEntityId {
        self.id()
    }
}
