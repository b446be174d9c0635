//! Date value objects for the Cart aggregate.
//!
//! Both dates accept nothing (meaning "now"), an already built [`DateTime`]
//! or ISO-8601 text, and refuse instants later than the clock's now.

use serde::Serialize;
use thiserror::Error;

use common::Either;
use common::time::{Clock, DateTime, SystemClock};

use crate::macros::exception_codes;
use crate::value_object::ValueObject;

/// A date given as a parsed instant or as text; absent means now.
pub type DateInput = Option<Either<DateTime, String>>;

/// Reasons a cart creation date can be rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CartCreationDateError {
    #[error("Cart creation date is not a valid date")]
    InvalidDate,
    #[error("Cart creation date cannot be in the future")]
    CannotBeInTheFuture,
}

exception_codes!(CartCreationDateError {
    InvalidDate => "CART_CREATION_DATE_INVALID_DATE",
    CannotBeInTheFuture => "CART_CREATION_DATE_CANNOT_BE_IN_THE_FUTURE",
});

/// Reasons a cart update date can be rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CartUpdateDateError {
    #[error("Cart update date is not a valid date")]
    InvalidDate,
    #[error("Cart update date cannot be in the future")]
    CannotBeInTheFuture,
}

exception_codes!(CartUpdateDateError {
    InvalidDate => "CART_UPDATE_DATE_INVALID_DATE",
    CannotBeInTheFuture => "CART_UPDATE_DATE_CANNOT_BE_IN_THE_FUTURE",
});

enum PastDateRejection {
    Invalid,
    Future,
}

fn resolve_past_date(input: DateInput, clock: &dyn Clock) -> Result<DateTime, PastDateRejection> {
    let now = clock.now();
    let date = match input {
        None => now,
        Some(Either::Left(date)) => date,
        Some(Either::Right(text)) => {
            DateTime::parse(&text).map_err(|_| PastDateRejection::Invalid)?
        }
    };

    if date.is_after(&now) {
        return Err(PastDateRejection::Future);
    }
    Ok(date)
}

/// When a cart was created. Never in the future.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct CartCreationDate(DateTime);

impl CartCreationDate {
    pub fn create(input: DateInput) -> Result<Self, CartCreationDateError> {
        Self::create_at(input, &SystemClock)
    }

    /// Same as [`CartCreationDate::create`] with `clock` as the source of now.
    pub fn create_at(input: DateInput, clock: &dyn Clock) -> Result<Self, CartCreationDateError> {
        resolve_past_date(input, clock).map(Self).map_err(|rejection| match rejection {
            PastDateRejection::Invalid => CartCreationDateError::InvalidDate,
            PastDateRejection::Future => CartCreationDateError::CannotBeInTheFuture,
        })
    }

    pub fn value(&self) -> DateTime {
        self.0
    }
}

impl ValueObject for CartCreationDate {
    type Props = DateTime;

    fn props(&self) -> &DateTime {
        &self.0
    }
}

/// When a cart last changed. Never in the future.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct CartUpdateDate(DateTime);

impl CartUpdateDate {
    pub fn create(input: DateInput) -> Result<Self, CartUpdateDateError> {
        Self::create_at(input, &SystemClock)
    }

    /// Same as [`CartUpdateDate::create`] with `clock` as the source of now.
    pub fn create_at(input: DateInput, clock: &dyn Clock) -> Result<Self, CartUpdateDateError> {
        resolve_past_date(input, clock).map(Self).map_err(|rejection| match rejection {
            PastDateRejection::Invalid => CartUpdateDateError::InvalidDate,
            PastDateRejection::Future => CartUpdateDateError::CannotBeInTheFuture,
        })
    }

    /// The clock's now, but never earlier than `floor`.
    pub(crate) fn touched(clock: &dyn Clock, floor: DateTime) -> Self {
        Self(clock.now().max(floor))
    }

    pub fn value(&self) -> DateTime {
        self.0
    }
}

impl ValueObject for CartUpdateDate {
    type Props = DateTime;

    fn props(&self) -> &DateTime {
        &self.0
    }
}
