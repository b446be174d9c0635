//! Eliminators and aggregation for [`Result`].
//!
//! Every fallible domain operation returns a plain `Result<T, E>` whose error
//! is a closed enum. This module adds the pieces the standard type does not
//! ship with: a failure-first total eliminator, an eliminator with optional
//! handlers, accessor guards with fixed panic messages, and `combine` for
//! folding several independent validations into one outcome.

/// Panic message used when the value of a failed result is read.
pub const CANNOT_GET_VALUE_OF_FAILURE: &str = "ResultCannotGetValueOfFailure";

/// Panic message used when the error of a successful result is read.
pub const CANNOT_GET_ERROR_OF_SUCCESS: &str = "ResultCannotGetErrorOfSuccess";

/// Optional per-outcome callbacks for [`ResultExt::match_with`].
pub struct ResultHandlers<'a, T, E, U> {
    ok: Option<Box<dyn FnOnce(T) -> U + 'a>>,
    fail: Option<Box<dyn FnOnce(E) -> U + 'a>>,
}

impl<'a, T, E, U> ResultHandlers<'a, T, E, U> {
    pub fn new() -> Self {
        Self {
            ok: None,
            fail: None,
        }
    }

    /// Sets the callback run on success.
    pub fn on_ok(mut self, f: impl FnOnce(T) -> U + 'a) -> Self {
        self.ok = Some(Box::new(f));
        self
    }

    /// Sets the callback run on failure.
    pub fn on_fail(mut self, f: impl FnOnce(E) -> U + 'a) -> Self {
        self.fail = Some(Box::new(f));
        self
    }
}

impl<T, E, U> Default for ResultHandlers<'_, T, E, U> {
    fn default() -> Self {
        Self::new()
    }
}

/// Extension methods for [`Result`].
pub trait ResultExt<T, E> {
    /// Total eliminator with the failure branch first.
    fn fold<U>(self, on_failure: impl FnOnce(E) -> U, on_success: impl FnOnce(T) -> U) -> U;

    /// Runs the handler matching the outcome.
    ///
    /// Returns `None` when no handler was registered for that outcome.
    fn match_with<U>(self, handlers: ResultHandlers<'_, T, E, U>) -> Option<U>;

    /// Returns the success value.
    ///
    /// # Panics
    ///
    /// Panics with [`CANNOT_GET_VALUE_OF_FAILURE`] on a failure. Reading the
    /// value without checking the outcome first is a caller bug.
    fn value(self) -> T;

    /// Returns the failure value.
    ///
    /// # Panics
    ///
    /// Panics with [`CANNOT_GET_ERROR_OF_SUCCESS`] on a success.
    fn error(self) -> E;
}

impl<T, E> ResultExt<T, E> for Result<T, E> {
    fn fold<U>(self, on_failure: impl FnOnce(E) -> U, on_success: impl FnOnce(T) -> U) -> U {
        match self {
            Ok(value) => on_success(value),
            Err(error) => on_failure(error),
        }
    }

    fn match_with<U>(self, handlers: ResultHandlers<'_, T, E, U>) -> Option<U> {
        match self {
            Ok(value) => handlers.ok.map(|f| f(value)),
            Err(error) => handlers.fail.map(|f| f(error)),
        }
    }

    #[track_caller]
    fn value(self) -> T {
        match self {
            Ok(value) => value,
            Err(_) => panic!("{CANNOT_GET_VALUE_OF_FAILURE}"),
        }
    }

    #[track_caller]
    fn error(self) -> E {
        match self {
            Ok(_) => panic!("{CANNOT_GET_ERROR_OF_SUCCESS}"),
            Err(error) => error,
        }
    }
}

/// Folds homogeneous results into one.
///
/// Results are scanned left to right. The first failure is returned as is;
/// if every result succeeded, the values come back in input order.
pub fn combine<T, E, I>(results: I) -> Result<Vec<T>, E>
where
    I: IntoIterator<Item = Result<T, E>>,
{
    results.into_iter().collect()
}

/// Folds a tuple of independently computed results into one.
///
/// Elements may carry different value and error types; each error must
/// convert into the target error `Err`. As with [`combine`], the leftmost
/// failure wins.
///
/// ```
/// use common::Combine;
///
/// #[derive(Debug, PartialEq)]
/// enum FormError { Name, Age }
///
/// let combined: Result<_, FormError> =
///     (Ok::<_, FormError>("ada"), Err::<u8, _>(FormError::Age)).combine();
/// assert_eq!(combined, Err(FormError::Age));
/// ```
pub trait Combine<Err> {
    type Output;

    fn combine(self) -> Result<Self::Output, Err>;
}

macro_rules! impl_combine_for_tuple {
    ($($T:ident $E:ident $v:ident),+) => {
        impl<Err, $($T, $E),+> Combine<Err> for ($(Result<$T, $E>,)+)
        where
            $(Err: From<$E>,)+
        {
            type Output = ($($T,)+);

            fn combine(self) -> Result<Self::Output, Err> {
                let ($($v,)+) = self;
                Ok(($($v.map_err(Err::from)?,)+))
            }
        }
    };
}

impl_combine_for_tuple!(A EA a, B EB b);
impl_combine_for_tuple!(A EA a, B EB b, C EC c);
impl_combine_for_tuple!(A EA a, B EB b, C EC c, D ED d);
impl_combine_for_tuple!(A EA a, B EB b, C EC c, D ED d, F EF f);
impl_combine_for_tuple!(A EA a, B EB b, C EC c, D ED d, F EF f, G EG g);

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Failure {
        A,
        B,
    }

    #[derive(Debug, PartialEq, Eq)]
    enum Wrapped {
        Failure(Failure),
        Code(u8),
    }

    impl From<Failure> for Wrapped {
        fn from(f: Failure) -> Self {
            Wrapped::Failure(f)
        }
    }

    impl From<u8> for Wrapped {
        fn from(code: u8) -> Self {
            Wrapped::Code(code)
        }
    }

    #[test]
    fn combine_keeps_values_in_input_order() {
        let results: Vec<Result<i32, Failure>> = vec![Ok(3), Ok(1), Ok(2)];
        assert_eq!(combine(results), Ok(vec![3, 1, 2]));
    }

    #[test]
    fn combine_returns_first_failure_scanning_left_to_right() {
        let results = vec![Ok(1), Err(Failure::A), Err(Failure::B)];
        assert_eq!(combine(results), Err(Failure::A));

        let results = vec![Err(Failure::B), Ok(1), Err(Failure::A)];
        assert_eq!(combine(results), Err(Failure::B));
    }

    #[test]
    fn combine_of_nothing_is_an_empty_success() {
        let results: Vec<Result<u8, Failure>> = Vec::new();
        assert_eq!(combine(results), Ok(vec![]));
    }

    #[test]
    fn tuple_combine_with_heterogeneous_types() {
        let combined: Result<_, Wrapped> =
            (Ok::<_, Failure>("a"), Ok::<_, u8>(2_i64), Ok::<_, Failure>('c')).combine();
        assert_eq!(combined, Ok(("a", 2, 'c')));
    }

    #[test]
    fn tuple_combine_reports_leftmost_failure() {
        let combined: Result<(u8, u8, u8), Wrapped> =
            (Ok::<u8, Failure>(1), Err::<u8, u8>(7), Err::<u8, Failure>(Failure::A)).combine();
        assert_eq!(combined, Err(Wrapped::Code(7)));
    }

    #[test]
    fn fold_is_failure_first() {
        let ok: Result<u8, Failure> = Ok(2);
        let err: Result<u8, Failure> = Err(Failure::B);

        assert_eq!(ok.fold(|_| "failed", |_| "worked"), "worked");
        assert_eq!(err.fold(|_| "failed", |_| "worked"), "failed");
    }

    #[test]
    fn match_with_missing_handler_yields_none() {
        let err: Result<u8, Failure> = Err(Failure::A);
        let out = err.match_with(ResultHandlers::new().on_ok(|v: u8| v * 2));
        assert_eq!(out, None);

        let ok: Result<u8, Failure> = Ok(4);
        let out = ok.match_with(ResultHandlers::new().on_ok(|v: u8| v * 2));
        assert_eq!(out, Some(8));
    }

    #[test]
    fn match_with_runs_failure_handler() {
        let err: Result<u8, Failure> = Err(Failure::B);
        let out = err.match_with(
            ResultHandlers::new()
                .on_ok(|_: u8| "ok")
                .on_fail(|f: Failure| if f == Failure::B { "b" } else { "other" }),
        );
        assert_eq!(out, Some("b"));
    }

    #[test]
    fn accessors_return_the_inhabited_side() {
        assert_eq!(Ok::<u8, Failure>(5).value(), 5);
        assert_eq!(Err::<u8, Failure>(Failure::A).error(), Failure::A);
    }

    #[test]
    #[should_panic(expected = "ResultCannotGetErrorOfSuccess")]
    fn reading_error_of_success_panics() {
        Ok::<u8, Failure>(1).error();
    }

    #[test]
    #[should_panic(expected = "ResultCannotGetValueOfFailure")]
    fn reading_value_of_failure_panics() {
        Err::<u8, Failure>(Failure::A).value();
    }
}
