//! Optional values with loud absence diagnostics
//!
//! [`Maybe<T>`] holds either a present value or nothing at all, and makes
//! the caller say which case they expect. Accessors that assume presence
//! ([`value`](Maybe::value), [`unwrap`](Maybe::unwrap)) raise a fatal
//! error through [`crate::panic`] when the assumption is wrong, carrying
//! the call site of the misuse. Everything else is total: combinators
//! transform, query, or swap state without ever faulting.

use core::fmt;
use core::mem;
use core::ops::{Deref, DerefMut};

use crate::upshot::{Failure, Success, Upshot};

/// An optional value: every `Maybe` is either [`Present`] or [`Absent`].
///
/// Extraction is move-oriented: consuming accessors take `self` and leave
/// nothing behind, while [`take`](Maybe::take) and
/// [`replace`](Maybe::replace) swap state in place through `&mut self`.
/// There is no silent null path; asking a [`Present`] container to be
/// absent (or the reverse) is a fatal error, not a sentinel.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[must_use]
pub enum Maybe<T> {
    /// A value is present.
    Present(T),
    /// No value.
    Absent,
}

pub use Maybe::{Absent, Present};

impl<T> Maybe<T> {
    /// Returns `true` if a value is present.
    #[must_use]
    pub fn is_present(&self) -> bool {
        matches!(self, Present(_))
    }

    /// Returns `true` if no value is present.
    #[must_use]
    pub fn is_absent(&self) -> bool {
        !self.is_present()
    }

    /// Returns `true` if a value is present and equal to `probe`.
    #[must_use]
    pub fn contains<U>(&self, probe: &U) -> bool
    where
        U: PartialEq<T>,
    {
        match self {
            Present(value) => probe == value,
            Absent => false,
        }
    }

    /// Returns `true` if a value is present and satisfies `predicate`.
    #[must_use]
    pub fn exists<P>(&self, predicate: P) -> bool
    where
        P: FnOnce(&T) -> bool,
    {
        match self {
            Present(value) => predicate(value),
            Absent => false,
        }
    }

    /// Converts from `&Maybe<T>` to `Maybe<&T>`.
    pub fn as_ref(&self) -> Maybe<&T> {
        match self {
            Present(value) => Present(value),
            Absent => Absent,
        }
    }

    /// Converts from `&mut Maybe<T>` to `Maybe<&mut T>`.
    pub fn as_mut(&mut self) -> Maybe<&mut T> {
        match self {
            Present(value) => Present(value),
            Absent => Absent,
        }
    }

    /// Borrows the contained value.
    ///
    /// Raises a fatal error if no value is present.
    #[track_caller]
    pub fn value(&self) -> &T {
        match self {
            Present(value) => value,
            Absent => absent_fatal("Maybe::value()"),
        }
    }

    /// Mutably borrows the contained value.
    ///
    /// Raises a fatal error if no value is present.
    #[track_caller]
    pub fn value_mut(&mut self) -> &mut T {
        match self {
            Present(value) => value,
            Absent => absent_fatal("Maybe::value_mut()"),
        }
    }

    /// Moves the contained value out.
    ///
    /// Raises a fatal error with `message` if no value is present. Use
    /// this over [`unwrap`](Maybe::unwrap) when the caller can say what
    /// the absence means.
    #[track_caller]
    pub fn expect(self, message: &str) -> T {
        match self {
            Present(value) => value,
            Absent => expect_fatal(message),
        }
    }

    /// Moves the contained value out.
    ///
    /// Raises a fatal error if no value is present.
    #[track_caller]
    pub fn unwrap(self) -> T {
        match self {
            Present(value) => value,
            Absent => absent_fatal("Maybe::unwrap()"),
        }
    }

    /// Moves the contained value out, or returns `default` if absent.
    pub fn unwrap_or(self, default: T) -> T {
        match self {
            Present(value) => value,
            Absent => default,
        }
    }

    /// Moves the contained value out, or computes one from `default`.
    pub fn unwrap_or_else<F>(self, default: F) -> T
    where
        F: FnOnce() -> T,
    {
        match self {
            Present(value) => value,
            Absent => default(),
        }
    }

    /// Moves the contained value out, or returns `T::default()`.
    pub fn unwrap_or_default(self) -> T
    where
        T: Default,
    {
        self.unwrap_or_else(T::default)
    }

    /// Transforms the contained value with `map`, leaving `Absent` as is.
    ///
    /// # Examples
    ///
    /// ```
    /// use upshot_core::{Absent, Maybe, Present};
    ///
    /// let length = Present("frame").map(|name| name.len());
    /// assert_eq!(length, Present(5));
    ///
    /// let nothing: Maybe<&str> = Absent;
    /// assert_eq!(nothing.map(|name| name.len()), Absent);
    /// ```
    pub fn map<U, F>(self, map: F) -> Maybe<U>
    where
        F: FnOnce(T) -> U,
    {
        match self {
            Present(value) => Present(map(value)),
            Absent => Absent,
        }
    }

    /// Applies `map` to the contained value, or returns `default`.
    pub fn map_or<U, F>(self, default: U, map: F) -> U
    where
        F: FnOnce(T) -> U,
    {
        match self {
            Present(value) => map(value),
            Absent => default,
        }
    }

    /// Applies `map` to the contained value, or computes a default.
    pub fn map_or_else<U, D, F>(self, default: D, map: F) -> U
    where
        D: FnOnce() -> U,
        F: FnOnce(T) -> U,
    {
        match self {
            Present(value) => map(value),
            Absent => default(),
        }
    }

    /// Converts presence into [`Success`], absence into `Failure(error)`.
    ///
    /// # Examples
    ///
    /// ```
    /// use upshot_core::{Absent, Failure, Maybe, Present, Success};
    ///
    /// let found = Present(12).ok_or("missing");
    /// assert_eq!(found, Success(12));
    ///
    /// let lost: Maybe<i32> = Absent;
    /// assert_eq!(lost.ok_or("missing"), Failure("missing"));
    /// ```
    pub fn ok_or<E>(self, error: E) -> Upshot<T, E> {
        match self {
            Present(value) => Success(value),
            Absent => Failure(error),
        }
    }

    /// Converts presence into [`Success`], absence into a computed failure.
    pub fn ok_or_else<E, F>(self, error: F) -> Upshot<T, E>
    where
        F: FnOnce() -> E,
    {
        match self {
            Present(value) => Success(value),
            Absent => Failure(error()),
        }
    }

    /// Returns `other` if a value is present, otherwise `Absent`.
    pub fn and<U>(self, other: Maybe<U>) -> Maybe<U> {
        match self {
            Present(_) => other,
            Absent => Absent,
        }
    }

    /// Chains a presence-dependent computation.
    ///
    /// Returns `Absent` without invoking `chain` when no value is
    /// present; absence short-circuits the whole pipeline.
    ///
    /// # Examples
    ///
    /// ```
    /// use upshot_core::{Absent, Maybe, Present};
    ///
    /// fn half(n: u32) -> Maybe<u32> {
    ///     if n % 2 == 0 { Present(n / 2) } else { Absent }
    /// }
    ///
    /// assert_eq!(Present(8).and_then(half).and_then(half), Present(2));
    /// assert_eq!(Present(6).and_then(half).and_then(half), Absent);
    /// ```
    pub fn and_then<U, F>(self, chain: F) -> Maybe<U>
    where
        F: FnOnce(T) -> Maybe<U>,
    {
        match self {
            Present(value) => chain(value),
            Absent => Absent,
        }
    }

    /// Keeps the value only if it satisfies `predicate`.
    pub fn filter<P>(self, predicate: P) -> Maybe<T>
    where
        P: FnOnce(&T) -> bool,
    {
        match self {
            Present(value) if predicate(&value) => Present(value),
            _ => Absent,
        }
    }

    /// Keeps the value only if it fails `predicate`.
    pub fn filter_not<P>(self, predicate: P) -> Maybe<T>
    where
        P: FnOnce(&T) -> bool,
    {
        match self {
            Present(value) if !predicate(&value) => Present(value),
            _ => Absent,
        }
    }

    /// Returns self if a value is present, otherwise `other`.
    pub fn or(self, other: Maybe<T>) -> Maybe<T> {
        match self {
            Present(value) => Present(value),
            Absent => other,
        }
    }

    /// Returns self if a value is present, otherwise computes a fallback.
    pub fn or_else<F>(self, fallback: F) -> Maybe<T>
    where
        F: FnOnce() -> Maybe<T>,
    {
        match self {
            Present(value) => Present(value),
            Absent => fallback(),
        }
    }

    /// Returns whichever of self and `other` is present, or `Absent` if
    /// neither or both are.
    pub fn xor(self, other: Maybe<T>) -> Maybe<T> {
        match (self, other) {
            (Present(value), Absent) => Present(value),
            (Absent, Present(value)) => Present(value),
            _ => Absent,
        }
    }

    /// Moves the value out, leaving `Absent` in its place.
    ///
    /// # Examples
    ///
    /// ```
    /// use upshot_core::{Absent, Present};
    ///
    /// let mut slot = Present(3);
    /// assert_eq!(slot.take(), Present(3));
    /// assert_eq!(slot, Absent);
    /// assert_eq!(slot.take(), Absent);
    /// ```
    pub fn take(&mut self) -> Maybe<T> {
        mem::replace(self, Absent)
    }

    /// Swaps in `value`, returning the previous state.
    pub fn replace(&mut self, value: T) -> Maybe<T> {
        mem::replace(self, Present(value))
    }

    /// Consumes the container, dispatching on its state.
    pub fn match_owned<R, P, A>(self, present: P, absent: A) -> R
    where
        P: FnOnce(T) -> R,
        A: FnOnce() -> R,
    {
        match self {
            Present(value) => present(value),
            Absent => absent(),
        }
    }

    /// Dispatches on the container's state by reference.
    pub fn match_ref<R, P, A>(&self, present: P, absent: A) -> R
    where
        P: FnOnce(&T) -> R,
        A: FnOnce() -> R,
    {
        match self {
            Present(value) => present(value),
            Absent => absent(),
        }
    }

    /// Asserts that no value is present.
    ///
    /// Raises a fatal error with `message` and the discarded value's
    /// debug form if one is.
    #[track_caller]
    pub fn expect_absent(self, message: &str)
    where
        T: fmt::Debug,
    {
        if let Present(value) = self {
            expect_present_fatal(message, &value)
        }
    }

    /// Asserts that no value is present.
    ///
    /// Raises a fatal error naming the discarded value if one is.
    #[track_caller]
    pub fn unwrap_absent(self)
    where
        T: fmt::Debug,
    {
        if let Present(value) = self {
            present_fatal("Maybe::unwrap_absent()", &value)
        }
    }
}

impl<T> Maybe<T>
where
    T: Deref,
{
    /// Converts from `&Maybe<T>` to `Maybe<&T::Target>`.
    ///
    /// Reaches through one layer of indirection, so a
    /// `&Maybe<String>` can be matched as a `Maybe<&str>`.
    pub fn as_deref(&self) -> Maybe<&T::Target> {
        self.as_ref().map(|value| &**value)
    }
}

impl<T> Maybe<T>
where
    T: DerefMut,
{
    /// Converts from `&mut Maybe<T>` to `Maybe<&mut T::Target>`.
    pub fn as_deref_mut(&mut self) -> Maybe<&mut T::Target> {
        self.as_mut().map(|value| &mut **value)
    }
}

impl<T> From<Option<T>> for Maybe<T> {
    fn from(option: Option<T>) -> Self {
        match option {
            Some(value) => Present(value),
            None => Absent,
        }
    }
}

impl<T> From<Maybe<T>> for Option<T> {
    fn from(maybe: Maybe<T>) -> Self {
        match maybe {
            Present(value) => Some(value),
            Absent => None,
        }
    }
}

#[cold]
#[inline(never)]
#[track_caller]
fn absent_fatal(accessor: &str) -> ! {
    crate::panic::panic_fmt(format_args!(
        "called `{}` on an `Absent` value",
        accessor
    ))
}

#[cold]
#[inline(never)]
#[track_caller]
fn present_fatal(accessor: &str, discarded: &dyn fmt::Debug) -> ! {
    crate::panic::panic_fmt(format_args!(
        "called `{}` on a `Present` value: {:?}",
        accessor, discarded
    ))
}

#[cold]
#[inline(never)]
#[track_caller]
fn expect_fatal(message: &str) -> ! {
    crate::panic::panic_fmt(format_args!("{}", message))
}

#[cold]
#[inline(never)]
#[track_caller]
fn expect_present_fatal(message: &str, discarded: &dyn fmt::Debug) -> ! {
    crate::panic::panic_fmt(format_args!("{}: {:?}", message, discarded))
}
