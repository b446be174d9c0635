/// Implements [`Exception`](crate::Exception) for an error enum.
///
/// Unit variants map to a literal code. Variants listed under `forwards`
/// wrap another exception and report its code.
///
/// ```ignore
/// exception_codes!(FirstNameError {
///     TooShort => "FIRST_NAME_TOO_SHORT",
///     TooLong => "FIRST_NAME_TOO_LONG",
/// });
///
/// exception_codes!(UserError {} forwards [FirstName, LastName, Email, Password]);
/// ```
macro_rules! exception_codes {
    ($name:ident { $($variant:ident => $code:literal),* $(,)? }) => {
        $crate::macros::exception_codes!($name { $($variant => $code),* } forwards []);
    };
    ($name:ident { $($variant:ident => $code:literal),* $(,)? } forwards [$($wrapper:ident),* $(,)?]) => {
        impl $crate::error::Exception for $name {
            fn code(&self) -> &'static str {
                match self {
                    $($name::$variant => $code,)*
                    $($name::$wrapper(inner) => $crate::error::Exception::code(inner),)*
                }
            }
        }
    };
}

pub(crate) use exception_codes;
