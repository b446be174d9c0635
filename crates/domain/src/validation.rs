//! Small guards shared by the value object factories.
//!
//! Each guard returns `Ok(())` or the supplied error so a factory can run
//! every rule up front and hand the outcomes to `combine`.

pub(crate) fn ensure<E>(condition: bool, error: E) -> Result<(), E> {
    if condition { Ok(()) } else { Err(error) }
}

/// Length in characters, not bytes.
pub(crate) fn char_count(value: &str) -> usize {
    value.chars().count()
}

pub(crate) fn ensure_min_chars<E>(value: &str, min: usize, error: E) -> Result<(), E> {
    ensure(char_count(value) >= min, error)
}

pub(crate) fn ensure_max_chars<E>(value: &str, max: usize, error: E) -> Result<(), E> {
    ensure(char_count(value) <= max, error)
}
