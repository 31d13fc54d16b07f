//! # Upshot Core
//!
//! Move-oriented outcome containers with loud, locatable failure reporting.
//!
//! `Maybe<T>` models a value that is either present or absent, and
//! `Upshot<T, E>` models an operation that either succeeded or failed.
//! Misusing an accessor (asking a `Failure` for its success value, for
//! example) does not return garbage or throw; it routes through a
//! process-wide fatal handler that receives the diagnostic message and
//! the caller's source location.
//!
//! ## Modules
//!
//! - `maybe`: Optional values (`Present` / `Absent`)
//! - `upshot`: Fallible outcomes (`Success` / `Failure`)
//! - `panic`: Fatal-error reporting and pluggable handlers
//! - `backtrace`: Call-stack capture for diagnostics (std only)
//!
//! The `try_present!`, `try_success!`, and `fatal!` macros live at the
//! crate root.

#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]

#[cfg(feature = "std")]
pub mod backtrace;
mod macros;
pub mod maybe;
pub mod panic;
pub mod upshot;

// Re-export commonly used types
pub use maybe::{Absent, Maybe, Present};
pub use panic::{set_panic_handler, PanicHandler, PanicReport, SetHandlerError};
pub use upshot::{Failure, Success, Upshot};
