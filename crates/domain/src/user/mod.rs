//! User aggregate and its value objects.

mod aggregate;
mod value_objects;

pub use aggregate::{Role, User, UserInput, UserProps};
pub use value_objects::{
    Email, EmailError, FirstName, FirstNameError, LastName, LastNameError, Password, PasswordError,
};

use thiserror::Error;

use crate::macros::exception_codes;

/// Errors that can occur while building or changing a user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum UserError {
    /// The first name was rejected.
    #[error(transparent)]
    FirstName(#[from] FirstNameError),

    /// The last name was rejected.
    #[error(transparent)]
    LastName(#[from] LastNameError),

    /// The email was rejected.
    #[error(transparent)]
    Email(#[from] EmailError),

    /// The password was rejected.
    #[error(transparent)]
    Password(#[from] PasswordError),
}

exception_codes!(UserError {} forwards [FirstName, LastName, Email, Password]);
