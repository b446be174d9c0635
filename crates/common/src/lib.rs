//! Shared building blocks for the shop crates.
//!
//! - [`Either`] for inputs that arrive in one of two shapes
//! - [`ResultExt`], [`OptionExt`], [`combine`] and [`Combine`] for threading
//!   validation failures through plain `Result`s
//! - [`UniqueEntityId`] for entity identity
//! - [`time`] for UTC date-times, durations and clocks

pub mod either;
pub mod option;
pub mod result;
pub mod time;
pub mod types;

pub use either::Either;
pub use option::OptionExt;
pub use result::{Combine, ResultExt, ResultHandlers, combine};
pub use types::{UniqueEntityId, UniqueEntityIdError};
