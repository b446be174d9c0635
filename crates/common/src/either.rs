//! A value that is one of two unrelated shapes.

use serde::{Deserialize, Serialize};

/// Either a `Left(L)` or a `Right(R)`.
///
/// Unlike [`Result`], neither side means failure. It is used where an input
/// may legitimately arrive in two forms, e.g. a date that is already parsed
/// (`Left(DateTime)`) or still raw text (`Right(String)`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "side", content = "value", rename_all = "lowercase")]
pub enum Either<L, R> {
    Left(L),
    Right(R),
}

impl<L, R> Either<L, R> {
    /// Builds the left variant.
    pub fn from_left(value: L) -> Self {
        Either::Left(value)
    }

    /// Builds the right variant.
    pub fn from_right(value: R) -> Self {
        Either::Right(value)
    }

    pub fn is_left(&self) -> bool {
        matches!(self, Either::Left(_))
    }

    pub fn is_right(&self) -> bool {
        matches!(self, Either::Right(_))
    }

    /// Total eliminator: exactly one of the two callbacks runs.
    pub fn either<T>(self, on_left: impl FnOnce(L) -> T, on_right: impl FnOnce(R) -> T) -> T {
        match self {
            Either::Left(l) => on_left(l),
            Either::Right(r) => on_right(r),
        }
    }

    /// Transforms the left value, leaving a right value untouched.
    pub fn map_left<T>(self, f: impl FnOnce(L) -> T) -> Either<T, R> {
        match self {
            Either::Left(l) => Either::Left(f(l)),
            Either::Right(r) => Either::Right(r),
        }
    }

    /// Transforms the right value, leaving a left value untouched.
    pub fn map_right<T>(self, f: impl FnOnce(R) -> T) -> Either<L, T> {
        match self {
            Either::Left(l) => Either::Left(l),
            Either::Right(r) => Either::Right(f(r)),
        }
    }

    /// Transforms whichever side is inhabited; the side itself never changes.
    pub fn map_either<A, B>(
        self,
        on_left: impl FnOnce(L) -> A,
        on_right: impl FnOnce(R) -> B,
    ) -> Either<A, B> {
        match self {
            Either::Left(l) => Either::Left(on_left(l)),
            Either::Right(r) => Either::Right(on_right(r)),
        }
    }

    /// Swaps the roles of the two sides.
    pub fn flip(self) -> Either<R, L> {
        match self {
            Either::Left(l) => Either::Right(l),
            Either::Right(r) => Either::Left(r),
        }
    }

    /// Projects the left side into an `Option`.
    pub fn left(self) -> Option<L> {
        match self {
            Either::Left(l) => Some(l),
            Either::Right(_) => None,
        }
    }

    /// Projects the right side into an `Option`.
    pub fn right(self) -> Option<R> {
        match self {
            Either::Left(_) => None,
            Either::Right(r) => Some(r),
        }
    }

    pub fn as_ref(&self) -> Either<&L, &R> {
        match self {
            Either::Left(l) => Either::Left(l),
            Either::Right(r) => Either::Right(r),
        }
    }

    /// Returns the left value.
    ///
    /// # Panics
    ///
    /// Panics when called on a `Right`. Check the variant first or use
    /// [`Either::either`].
    pub fn unwrap_left(self) -> L {
        match self {
            Either::Left(l) => l,
            Either::Right(_) => panic!("EitherCannotUnwrapLeftOfRight"),
        }
    }

    /// Returns the right value.
    ///
    /// # Panics
    ///
    /// Panics when called on a `Left`.
    pub fn unwrap_right(self) -> R {
        match self {
            Either::Left(_) => panic!("EitherCannotUnwrapRightOfLeft"),
            Either::Right(r) => r,
        }
    }
}
