//! Value object abstraction.

use std::fmt::Debug;

/// An immutable value defined only by its properties.
///
/// Value objects are built through a validating factory that returns
/// `Result<Self, _>`; a constructed value is always valid. Two value objects
/// are equal when their properties are equal.
pub trait ValueObject: Clone + PartialEq + Debug {
    /// The validated properties carried by the value.
    type Props: ?Sized;

    fn props(&self) -> &Self::Props;
}
