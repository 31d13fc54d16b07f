//! Early-return propagation and fatal-error macros

/// Unwraps a [`Success`](crate::Success) or returns the converted
/// [`Failure`](crate::Failure) from the enclosing function.
///
/// The failure payload converts through [`From`] on the way out, so a
/// narrow error type propagates into a caller with a wider one. The
/// operand is evaluated exactly once.
///
/// # Examples
///
/// ```
/// use upshot_core::{try_success, Success, Upshot};
///
/// fn parse(digits: &str) -> Upshot<u32, String> {
///     digits
///         .parse()
///         .map_err(|_| format!("not a number: {}", digits))
///         .into()
/// }
///
/// fn parse_pair(a: &str, b: &str) -> Upshot<(u32, u32), String> {
///     let left = try_success!(parse(a));
///     let right = try_success!(parse(b));
///     Success((left, right))
/// }
///
/// assert_eq!(parse_pair("1", "2"), Success((1, 2)));
/// assert!(parse_pair("1", "x").is_failure());
/// ```
#[macro_export]
macro_rules! try_success {
    ($upshot:expr) => {
        match $upshot {
            $crate::Upshot::Success(value) => value,
            $crate::Upshot::Failure(error) => {
                return $crate::Upshot::Failure(::core::convert::From::from(error))
            }
        }
    };
}

/// Unwraps a [`Present`](crate::Present) or returns
/// [`Absent`](crate::Absent) from the enclosing function.
///
/// The operand is evaluated exactly once.
///
/// # Examples
///
/// ```
/// use upshot_core::{try_present, Maybe, Present};
///
/// fn doubled_head(values: &[u32]) -> Maybe<u32> {
///     let head = try_present!(Maybe::from(values.first().copied()));
///     Present(head * 2)
/// }
///
/// assert_eq!(doubled_head(&[3, 9]), Present(6));
/// assert!(doubled_head(&[]).is_absent());
/// ```
#[macro_export]
macro_rules! try_present {
    ($maybe:expr) => {
        match $maybe {
            $crate::Maybe::Present(value) => value,
            $crate::Maybe::Absent => return $crate::Maybe::Absent,
        }
    };
}

/// Raises a fatal error through the installed panic handler.
///
/// Formats like `format!`, captures the caller's source location, and
/// never returns. The default handler prints the report and aborts; see
/// [`crate::panic`] for installing a different one.
///
/// # Examples
///
/// ```should_panic
/// use upshot_core::fatal;
/// use upshot_core::panic::{set_panic_handler, UnwindHandler};
///
/// let _ = set_panic_handler(&UnwindHandler);
/// fatal!("frame {} extends beyond stream window", 9);
/// ```
#[macro_export]
macro_rules! fatal {
    ($($arg:tt)*) => {
        $crate::panic::panic_fmt(::core::format_args!($($arg)*))
    };
}
