//! Fallible outcomes with loud failure diagnostics
//!
//! [`Upshot<T, E>`] is the result of an operation that either succeeded
//! with a `T` or failed with an `E`. Both channels are first-class:
//! combinators transform either side, and projections move either side
//! out. Accessors that assume one channel raise a fatal error through
//! [`crate::panic`] when the other is occupied, embedding the discarded
//! payload's debug form so the diagnostic names what was thrown away.

use core::fmt;
use core::ops::Deref;

use crate::maybe::{Absent, Maybe, Present};

/// A fallible outcome: every `Upshot` is either [`Success`] or [`Failure`].
///
/// Like [`Maybe`](crate::Maybe), extraction is move-oriented and misuse
/// is fatal rather than silent. Fatal diagnostics on the wrong-channel
/// accessors include the value that was actually there, which is why
/// those accessors bound the opposite channel with [`fmt::Debug`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[must_use]
pub enum Upshot<T, E> {
    /// The operation succeeded.
    Success(T),
    /// The operation failed.
    Failure(E),
}

pub use Upshot::{Failure, Success};

impl<T, E> Upshot<T, E> {
    /// Returns `true` if the outcome is a success.
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, Success(_))
    }

    /// Returns `true` if the outcome is a failure.
    #[must_use]
    pub fn is_failure(&self) -> bool {
        !self.is_success()
    }

    /// Returns `true` if the outcome is a success equal to `probe`.
    #[must_use]
    pub fn contains<U>(&self, probe: &U) -> bool
    where
        U: PartialEq<T>,
    {
        match self {
            Success(value) => probe == value,
            Failure(_) => false,
        }
    }

    /// Returns `true` if the outcome is a failure equal to `probe`.
    #[must_use]
    pub fn contains_err<F>(&self, probe: &F) -> bool
    where
        F: PartialEq<E>,
    {
        match self {
            Success(_) => false,
            Failure(error) => probe == error,
        }
    }

    /// Returns `true` if the outcome is a success satisfying `predicate`.
    #[must_use]
    pub fn exists<P>(&self, predicate: P) -> bool
    where
        P: FnOnce(&T) -> bool,
    {
        match self {
            Success(value) => predicate(value),
            Failure(_) => false,
        }
    }

    /// Returns `true` if the outcome is a failure satisfying `predicate`.
    #[must_use]
    pub fn exists_err<P>(&self, predicate: P) -> bool
    where
        P: FnOnce(&E) -> bool,
    {
        match self {
            Success(_) => false,
            Failure(error) => predicate(error),
        }
    }

    /// Converts from `&Upshot<T, E>` to `Upshot<&T, &E>`.
    pub fn as_ref(&self) -> Upshot<&T, &E> {
        match self {
            Success(value) => Success(value),
            Failure(error) => Failure(error),
        }
    }

    /// Converts from `&mut Upshot<T, E>` to `Upshot<&mut T, &mut E>`.
    pub fn as_mut(&mut self) -> Upshot<&mut T, &mut E> {
        match self {
            Success(value) => Success(value),
            Failure(error) => Failure(error),
        }
    }

    /// Borrows the success value.
    ///
    /// Raises a fatal error naming the failure payload if the outcome
    /// is a failure.
    #[track_caller]
    pub fn value(&self) -> &T
    where
        E: fmt::Debug,
    {
        match self {
            Success(value) => value,
            Failure(error) => wrong_channel_fatal("Upshot::value()", "Failure", error),
        }
    }

    /// Mutably borrows the success value.
    ///
    /// Raises a fatal error naming the failure payload if the outcome
    /// is a failure.
    #[track_caller]
    pub fn value_mut(&mut self) -> &mut T
    where
        E: fmt::Debug,
    {
        match self {
            Success(value) => value,
            Failure(error) => wrong_channel_fatal("Upshot::value_mut()", "Failure", error),
        }
    }

    /// Borrows the failure value.
    ///
    /// Raises a fatal error naming the success payload if the outcome
    /// is a success.
    #[track_caller]
    pub fn error_value(&self) -> &E
    where
        T: fmt::Debug,
    {
        match self {
            Success(value) => wrong_channel_fatal("Upshot::error_value()", "Success", value),
            Failure(error) => error,
        }
    }

    /// Mutably borrows the failure value.
    ///
    /// Raises a fatal error naming the success payload if the outcome
    /// is a success.
    #[track_caller]
    pub fn error_value_mut(&mut self) -> &mut E
    where
        T: fmt::Debug,
    {
        match self {
            Success(value) => {
                wrong_channel_fatal("Upshot::error_value_mut()", "Success", value)
            }
            Failure(error) => error,
        }
    }

    /// Moves the success value out.
    ///
    /// Raises a fatal error with `message` and the failure payload if
    /// the outcome is a failure.
    #[track_caller]
    pub fn expect(self, message: &str) -> T
    where
        E: fmt::Debug,
    {
        match self {
            Success(value) => value,
            Failure(error) => expect_fatal(message, &error),
        }
    }

    /// Moves the success value out.
    ///
    /// Raises a fatal error naming the failure payload if the outcome
    /// is a failure.
    #[track_caller]
    pub fn unwrap(self) -> T
    where
        E: fmt::Debug,
    {
        match self {
            Success(value) => value,
            Failure(error) => wrong_channel_fatal("Upshot::unwrap()", "Failure", &error),
        }
    }

    /// Moves the failure value out.
    ///
    /// Raises a fatal error with `message` and the success payload if
    /// the outcome is a success.
    #[track_caller]
    pub fn expect_err(self, message: &str) -> E
    where
        T: fmt::Debug,
    {
        match self {
            Success(value) => expect_fatal(message, &value),
            Failure(error) => error,
        }
    }

    /// Moves the failure value out.
    ///
    /// Raises a fatal error naming the success payload if the outcome
    /// is a success.
    #[track_caller]
    pub fn unwrap_err(self) -> E
    where
        T: fmt::Debug,
    {
        match self {
            Success(value) => wrong_channel_fatal("Upshot::unwrap_err()", "Success", &value),
            Failure(error) => error,
        }
    }

    /// Moves the success value out, or returns `default` on failure.
    pub fn unwrap_or(self, default: T) -> T {
        match self {
            Success(value) => value,
            Failure(_) => default,
        }
    }

    /// Moves the success value out, or computes one from the failure.
    pub fn unwrap_or_else<F>(self, default: F) -> T
    where
        F: FnOnce(E) -> T,
    {
        match self {
            Success(value) => value,
            Failure(error) => default(error),
        }
    }

    /// Moves the success value out, or returns `T::default()` on failure.
    pub fn unwrap_or_default(self) -> T
    where
        T: Default,
    {
        self.unwrap_or_else(|_| T::default())
    }

    /// Discards the failure channel, keeping success as [`Present`].
    pub fn ok(self) -> Maybe<T> {
        match self {
            Success(value) => Present(value),
            Failure(_) => Absent,
        }
    }

    /// Discards the success channel, keeping failure as [`Present`].
    pub fn err(self) -> Maybe<E> {
        match self {
            Success(_) => Absent,
            Failure(error) => Present(error),
        }
    }

    /// Transforms the success value with `map`, passing failures through.
    ///
    /// # Examples
    ///
    /// ```
    /// use upshot_core::{Failure, Success, Upshot};
    ///
    /// let parsed: Upshot<u32, &str> = Success(21);
    /// assert_eq!(parsed.map(|n| n * 2), Success(42));
    ///
    /// let torn: Upshot<u32, &str> = Failure("torn frame");
    /// assert_eq!(torn.map(|n| n * 2), Failure("torn frame"));
    /// ```
    pub fn map<U, F>(self, map: F) -> Upshot<U, E>
    where
        F: FnOnce(T) -> U,
    {
        match self {
            Success(value) => Success(map(value)),
            Failure(error) => Failure(error),
        }
    }

    /// Applies `map` to the success value, or returns `default`.
    pub fn map_or<U, F>(self, default: U, map: F) -> U
    where
        F: FnOnce(T) -> U,
    {
        match self {
            Success(value) => map(value),
            Failure(_) => default,
        }
    }

    /// Applies `map` to the success value, or derives a default from
    /// the failure.
    pub fn map_or_else<U, D, F>(self, default: D, map: F) -> U
    where
        D: FnOnce(E) -> U,
        F: FnOnce(T) -> U,
    {
        match self {
            Success(value) => map(value),
            Failure(error) => default(error),
        }
    }

    /// Transforms the failure value with `map`, passing successes through.
    pub fn map_err<F2, O>(self, map: O) -> Upshot<T, F2>
    where
        O: FnOnce(E) -> F2,
    {
        match self {
            Success(value) => Success(value),
            Failure(error) => Failure(map(error)),
        }
    }

    /// Returns `other` on success, otherwise the converted failure.
    ///
    /// The failure channel widens through [`Into`], so an `Upshot<_, u8>`
    /// can be sequenced before an `Upshot<_, u64>`.
    pub fn and<U, F>(self, other: Upshot<U, F>) -> Upshot<U, F>
    where
        E: Into<F>,
    {
        match self {
            Success(_) => other,
            Failure(error) => Failure(error.into()),
        }
    }

    /// Chains a success-dependent computation.
    ///
    /// Returns the failure untouched without invoking `chain` when the
    /// outcome is a failure; the first failure short-circuits the
    /// pipeline.
    pub fn and_then<U, F>(self, chain: F) -> Upshot<U, E>
    where
        F: FnOnce(T) -> Upshot<U, E>,
    {
        match self {
            Success(value) => chain(value),
            Failure(error) => Failure(error),
        }
    }

    /// Returns the converted success, otherwise `other`.
    ///
    /// The success channel widens through [`Into`], mirroring
    /// [`and`](Upshot::and) on the failure channel.
    pub fn or<U, F>(self, other: Upshot<U, F>) -> Upshot<U, F>
    where
        T: Into<U>,
    {
        match self {
            Success(value) => Success(value.into()),
            Failure(_) => other,
        }
    }

    /// Returns the success untouched, otherwise recovers from the
    /// failure with `fallback`.
    pub fn or_else<F2, O>(self, fallback: O) -> Upshot<T, F2>
    where
        O: FnOnce(E) -> Upshot<T, F2>,
    {
        match self {
            Success(value) => Success(value),
            Failure(error) => fallback(error),
        }
    }

    /// Consumes the outcome, dispatching on its channel.
    pub fn match_owned<R, S, F>(self, success: S, failure: F) -> R
    where
        S: FnOnce(T) -> R,
        F: FnOnce(E) -> R,
    {
        match self {
            Success(value) => success(value),
            Failure(error) => failure(error),
        }
    }

    /// Dispatches on the outcome's channel by reference.
    pub fn match_ref<R, S, F>(&self, success: S, failure: F) -> R
    where
        S: FnOnce(&T) -> R,
        F: FnOnce(&E) -> R,
    {
        match self {
            Success(value) => success(value),
            Failure(error) => failure(error),
        }
    }
}

impl<T, E> Upshot<T, E>
where
    T: Deref,
{
    /// Converts from `&Upshot<T, E>` to `Upshot<&T::Target, &E>`.
    pub fn as_deref(&self) -> Upshot<&T::Target, &E> {
        match self {
            Success(value) => Success(&**value),
            Failure(error) => Failure(error),
        }
    }
}

impl<T, E> Upshot<T, E>
where
    E: Deref,
{
    /// Converts from `&Upshot<T, E>` to `Upshot<&T, &E::Target>`.
    pub fn as_deref_err(&self) -> Upshot<&T, &E::Target> {
        match self {
            Success(value) => Success(value),
            Failure(error) => Failure(&**error),
        }
    }
}

impl<T, E> From<Result<T, E>> for Upshot<T, E> {
    fn from(result: Result<T, E>) -> Self {
        match result {
            Ok(value) => Success(value),
            Err(error) => Failure(error),
        }
    }
}

impl<T, E> From<Upshot<T, E>> for Result<T, E> {
    fn from(upshot: Upshot<T, E>) -> Self {
        match upshot {
            Success(value) => Ok(value),
            Failure(error) => Err(error),
        }
    }
}

#[cold]
#[inline(never)]
#[track_caller]
fn wrong_channel_fatal(accessor: &str, channel: &str, discarded: &dyn fmt::Debug) -> ! {
    crate::panic::panic_fmt(format_args!(
        "called `{}` on a `{}` value: {:?}",
        accessor, channel, discarded
    ))
}

#[cold]
#[inline(never)]
#[track_caller]
fn expect_fatal(message: &str, discarded: &dyn fmt::Debug) -> ! {
    crate::panic::panic_fmt(format_args!("{}: {:?}", message, discarded))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::panic::test_support;
    use std::panic::catch_unwind;

    fn checked_div(dividend: u32, divisor: u32) -> Upshot<u32, &'static str> {
        if divisor == 0 {
            Failure("division by zero")
        } else {
            Success(dividend / divisor)
        }
    }

    #[test]
    fn test_channel_queries() {
        assert!(checked_div(6, 3).is_success());
        assert!(!checked_div(6, 3).is_failure());
        assert!(checked_div(6, 0).is_failure());
        assert!(!checked_div(6, 0).is_success());
    }

    #[test]
    fn test_contains_both_channels() {
        assert!(checked_div(6, 3).contains(&2));
        assert!(!checked_div(6, 3).contains(&3));
        assert!(!checked_div(6, 0).contains(&2));

        assert!(checked_div(6, 0).contains_err(&"division by zero"));
        assert!(!checked_div(6, 3).contains_err(&"division by zero"));
    }

    #[test]
    fn test_exists_both_channels() {
        assert!(checked_div(9, 3).exists(|n| *n == 3));
        assert!(!checked_div(9, 0).exists(|_| true));
        assert!(checked_div(9, 0).exists_err(|e| e.contains("zero")));
        assert!(!checked_div(9, 3).exists_err(|_| true));
    }

    #[test]
    fn test_value_borrows_success() {
        let outcome = checked_div(8, 2);
        assert_eq!(*outcome.value(), 4);
        assert!(outcome.is_success());
    }

    #[test]
    fn test_value_mut_and_error_value_mut() {
        let mut outcome = checked_div(8, 2);
        *outcome.value_mut() += 1;
        assert_eq!(outcome, Success(5));

        let mut torn: Upshot<u32, String> = Failure(String::from("short read"));
        error_suffix(&mut torn);
        assert_eq!(torn, Failure(String::from("short read (frame 9)")));
    }

    fn error_suffix(outcome: &mut Upshot<u32, String>) {
        outcome.error_value_mut().push_str(" (frame 9)");
    }

    #[test]
    fn test_unwrap_and_unwrap_err_happy_paths() {
        assert_eq!(checked_div(10, 5).unwrap(), 2);
        assert_eq!(checked_div(10, 0).unwrap_err(), "division by zero");
        assert_eq!(checked_div(10, 5).expect("divisor checked"), 2);
        assert_eq!(
            checked_div(10, 0).expect_err("divisor was zero"),
            "division by zero"
        );
    }

    #[test]
    fn test_unwrap_fallbacks() {
        assert_eq!(checked_div(9, 3).unwrap_or(0), 3);
        assert_eq!(checked_div(9, 0).unwrap_or(0), 0);
        assert_eq!(checked_div(9, 0).unwrap_or_else(|e| e.len() as u32), 16);
        assert_eq!(checked_div(9, 0).unwrap_or_default(), 0);
    }

    #[test]
    fn test_projections() {
        assert_eq!(checked_div(4, 2).ok(), crate::Present(2));
        assert_eq!(checked_div(4, 0).ok(), crate::Absent);
        assert_eq!(checked_div(4, 0).err(), crate::Present("division by zero"));
        assert_eq!(checked_div(4, 2).err(), crate::Absent);
    }

    #[test]
    fn test_map_and_map_err() {
        assert_eq!(checked_div(6, 2).map(|n| n * 10), Success(30));
        assert_eq!(
            checked_div(6, 0).map(|n| n * 10),
            Failure("division by zero")
        );
        assert_eq!(
            checked_div(6, 0).map_err(|e| e.len()),
            Failure("division by zero".len())
        );
        assert_eq!(checked_div(6, 2).map_err(|e| e.len()), Success(3));
    }

    #[test]
    fn test_map_or_variants() {
        assert_eq!(checked_div(6, 2).map_or(99, |n| n + 1), 4);
        assert_eq!(checked_div(6, 0).map_or(99, |n| n + 1), 99);
        assert_eq!(
            checked_div(6, 0).map_or_else(|e| e.len() as u32, |n| n + 1),
            16
        );
    }

    #[test]
    fn test_and_widens_failure_channel() {
        let first: Upshot<u32, u8> = Success(1);
        let second: Upshot<&str, u64> = Success("two");
        assert_eq!(first.and(second), Success("two"));

        let torn: Upshot<u32, u8> = Failure(7);
        let second: Upshot<&str, u64> = Success("two");
        assert_eq!(torn.and(second), Failure(7u64));
    }

    #[test]
    fn test_and_then_short_circuits_on_failure() {
        let mut invoked = false;
        let chained = checked_div(5, 0).and_then(|n| {
            invoked = true;
            checked_div(n, 1)
        });
        assert_eq!(chained, Failure("division by zero"));
        assert!(!invoked);
    }

    #[test]
    fn test_or_widens_success_channel() {
        let narrow: Upshot<u8, &str> = Success(5);
        let alt: Upshot<u64, &str> = Success(9);
        assert_eq!(narrow.or(alt), Success(5u64));

        let torn: Upshot<u8, &str> = Failure("gone");
        let alt: Upshot<u64, &str> = Success(9);
        assert_eq!(torn.or(alt), Success(9));
    }

    #[test]
    fn test_or_else_recovers_with_failure_payload() {
        let recovered = checked_div(5, 0).or_else(|e| -> Upshot<u32, usize> {
            assert_eq!(e, "division by zero");
            Success(0)
        });
        assert_eq!(recovered, Success(0));
    }

    #[test]
    fn test_match_dispatch() {
        let summary = checked_div(9, 3).match_owned(
            |n| format!("quotient {}", n),
            |e| format!("failed: {}", e),
        );
        assert_eq!(summary, "quotient 3");

        let outcome = checked_div(9, 0);
        let verdict = outcome.match_ref(|_| "ok", |_| "torn");
        assert_eq!(verdict, "torn");
        assert!(outcome.is_failure());
    }

    #[test]
    fn test_as_ref_and_as_deref() {
        let owned: Upshot<String, String> = Success(String::from("frame"));
        assert_eq!(owned.as_ref().map(|s| s.len()), Success(5));
        assert_eq!(owned.as_deref(), Success("frame"));

        let torn: Upshot<u32, String> = Failure(String::from("late marker"));
        assert_eq!(torn.as_deref_err(), Failure("late marker"));
    }

    #[test]
    fn test_result_bridges() {
        let ok: Result<u32, &str> = Ok(3);
        assert_eq!(Upshot::from(ok), Success(3));
        let err: Result<u32, &str> = Err("gap");
        assert_eq!(Upshot::from(err), Failure("gap"));

        let back: Result<u32, &str> = Success(3).into();
        assert_eq!(back, Ok(3));
        let torn: Result<u32, &str> = Failure("gap").into();
        assert_eq!(torn, Err("gap"));
    }

    #[test]
    #[should_panic(expected = "called `Upshot::unwrap()` on a `Failure` value: \"torn frame\"")]
    fn test_unwrap_on_failure_names_payload() {
        test_support::install();
        let torn: Upshot<u32, &str> = Failure("torn frame");
        let _ = torn.unwrap();
    }

    #[test]
    #[should_panic(expected = "called `Upshot::unwrap_err()` on a `Success` value: 33")]
    fn test_unwrap_err_on_success_names_payload() {
        test_support::install();
        let fine: Upshot<u32, &str> = Success(33);
        let _ = fine.unwrap_err();
    }

    #[test]
    #[should_panic(expected = "called `Upshot::value()` on a `Failure` value")]
    fn test_value_on_failure_is_fatal() {
        test_support::install();
        let torn: Upshot<u32, &str> = Failure("bad length");
        let _ = torn.value();
    }

    #[test]
    #[should_panic(expected = "called `Upshot::error_value()` on a `Success` value")]
    fn test_error_value_on_success_is_fatal() {
        test_support::install();
        let fine: Upshot<u32, &str> = Success(1);
        let _ = fine.error_value();
    }

    #[test]
    #[should_panic(expected = "header must parse: \"bad magic\"")]
    fn test_expect_prepends_caller_message() {
        test_support::install();
        let torn: Upshot<u32, &str> = Failure("bad magic");
        let _ = torn.expect("header must parse");
    }

    #[test]
    fn test_fatal_location_points_at_misuse_site() {
        test_support::install();

        let outcome = catch_unwind(|| {
            let torn: Upshot<u32, &str> = Failure("upshot location probe");
            torn.unwrap()
        });
        assert!(outcome.is_err());

        let (message, location) =
            test_support::report_containing("upshot location probe").unwrap();
        assert!(message.contains("Upshot::unwrap()"));
        assert!(location.contains("upshot.rs"), "location was {}", location);
    }
}
