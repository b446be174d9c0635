//! Eliminator for [`Option`].
//!
//! The standard `Option` already provides the presence/absence algebra the
//! shop relies on (`map`, `map_or`, `and_then`, `ok_or`, `and`, `or`,
//! `filter`, `zip`, `unzip`, `unwrap_or`, `expect`). Only a named total
//! eliminator is missing.

/// Extension methods for [`Option`].
pub trait OptionExt<T> {
    /// Total eliminator: runs `on_some` with the value or `on_none`.
    fn fold<U>(self, on_some: impl FnOnce(T) -> U, on_none: impl FnOnce() -> U) -> U;
}

impl<T> OptionExt<T> for Option<T> {
    fn fold<U>(self, on_some: impl FnOnce(T) -> U, on_none: impl FnOnce() -> U) -> U {
        match self {
            Some(value) => on_some(value),
            None => on_none(),
        }
    }
}
