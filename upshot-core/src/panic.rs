//! Fatal-error reporting for container misuse
//!
//! Accessor misuse on [`Maybe`](crate::Maybe) and [`Upshot`](crate::Upshot)
//! funnels through [`panic_fmt`], which builds a [`PanicReport`] carrying the
//! diagnostic message and the caller's source location, then hands it to the
//! process-wide [`PanicHandler`]. The handler never returns control to the
//! misusing code.
//!
//! The handler is installation-time configuration: [`set_panic_handler`]
//! accepts exactly one handler per process, before or after the first fatal
//! error. Without an installed handler the default prints the report and
//! aborts (with `std`) or halts the core (without `std`).

use core::fmt;
use core::panic::Location;
use core::sync::atomic::{AtomicUsize, Ordering};

#[cfg(not(feature = "std"))]
use core::sync::atomic::AtomicBool;

#[cfg(feature = "std")]
use core::cell::Cell;

#[cfg(feature = "logging")]
use tracing::{debug, warn};

/// A fatal error in flight: what went wrong and where.
///
/// Reports are built by [`panic_fmt`] and borrowed by the installed
/// [`PanicHandler`] for the duration of the call. The location is the
/// call site of the accessor or macro that raised the error, not the
/// container internals, so diagnostics point at the misusing code.
#[derive(Debug, Clone, Copy)]
pub struct PanicReport<'a> {
    message: fmt::Arguments<'a>,
    location: &'a Location<'a>,
}

impl<'a> PanicReport<'a> {
    /// The diagnostic message describing the misuse.
    pub fn message(&self) -> fmt::Arguments<'a> {
        self.message
    }

    /// Source file, line, and column of the call that raised the error.
    pub fn location(&self) -> &'a Location<'a> {
        self.location
    }
}

impl fmt::Display for PanicReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "fatal error at {}: {}", self.location, self.message)
    }
}

/// A terminal destination for fatal errors.
///
/// Implementations decide how the process winds down: printing and
/// aborting, unwinding for test harnesses, halting a bare-metal core.
/// `on_panic` must diverge; returning would hand control back to code
/// whose invariants are already known to be broken.
pub trait PanicHandler: Sync {
    /// Consume the report and terminate the current flow of execution.
    fn on_panic(&self, report: &PanicReport<'_>) -> !;
}

const UNINSTALLED: usize = 0;
const INSTALLING: usize = 1;
const INSTALLED: usize = 2;

static STATE: AtomicUsize = AtomicUsize::new(UNINSTALLED);

#[cfg(feature = "std")]
static mut HANDLER: &dyn PanicHandler = &AbortHandler;
#[cfg(not(feature = "std"))]
static mut HANDLER: &dyn PanicHandler = &HaltHandler;

fn default_handler() -> &'static dyn PanicHandler {
    #[cfg(feature = "std")]
    {
        &AbortHandler
    }
    #[cfg(not(feature = "std"))]
    {
        &HaltHandler
    }
}

/// Install the process-wide panic handler.
///
/// Succeeds at most once per process. A second call returns
/// [`SetHandlerError`] and leaves the installed handler untouched, so
/// no code path can yank the handler out from under a concurrent fatal
/// error.
///
/// # Examples
///
/// ```
/// use upshot_core::panic::{set_panic_handler, AbortHandler};
///
/// // First install wins; later installs are rejected.
/// let first = set_panic_handler(&AbortHandler);
/// let second = set_panic_handler(&AbortHandler);
/// assert!(first.is_ok() || second.is_err());
/// ```
pub fn set_panic_handler(handler: &'static dyn PanicHandler) -> Result<(), SetHandlerError> {
    match STATE.compare_exchange(
        UNINSTALLED,
        INSTALLING,
        Ordering::Acquire,
        Ordering::Relaxed,
    ) {
        Ok(_) => {
            unsafe { HANDLER = handler };
            STATE.store(INSTALLED, Ordering::Release);

            #[cfg(feature = "logging")]
            debug!("Panic handler installed");

            Ok(())
        }
        Err(_) => {
            #[cfg(feature = "logging")]
            warn!("Rejected panic handler install: a handler is already active");

            Err(SetHandlerError(()))
        }
    }
}

/// Returns the currently active panic handler.
///
/// Falls back to the default until an install has fully completed, so a
/// fatal error racing a concurrent [`set_panic_handler`] never observes
/// a half-written handler.
pub fn panic_handler() -> &'static dyn PanicHandler {
    if STATE.load(Ordering::Acquire) != INSTALLED {
        default_handler()
    } else {
        unsafe { HANDLER }
    }
}

/// A panic handler was already installed for this process.
#[cfg_attr(feature = "std", derive(thiserror::Error))]
#[cfg_attr(
    feature = "std",
    error("a panic handler is already installed for this process")
)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetHandlerError(());

#[cfg(feature = "std")]
std::thread_local! {
    static ENTERED: Cell<bool> = Cell::new(false);
}

// Clears the reentry flag when an unwinding handler blows back through
// `panic_fmt`, so the next fatal error on this thread starts clean.
#[cfg(feature = "std")]
struct ReentryReset;

#[cfg(feature = "std")]
impl Drop for ReentryReset {
    fn drop(&mut self) {
        ENTERED.with(|flag| flag.set(false));
    }
}

#[cfg(not(feature = "std"))]
static ENTERED: AtomicBool = AtomicBool::new(false);

/// Raise a fatal error with a preformatted message.
///
/// Captures the caller's source location, builds a [`PanicReport`], and
/// dispatches it to the installed handler. Never returns. The
/// [`fatal!`](crate::fatal) macro is the usual front door; the container
/// accessors call this directly.
///
/// A fatal error raised while a handler is already running on the same
/// thread is a handler bug; that path hard-stops the process rather than
/// recursing.
#[cold]
#[inline(never)]
#[track_caller]
pub fn panic_fmt(message: fmt::Arguments<'_>) -> ! {
    #[cfg(feature = "std")]
    let _reset = {
        if ENTERED.with(|flag| flag.replace(true)) {
            std::process::abort();
        }
        ReentryReset
    };

    #[cfg(not(feature = "std"))]
    if ENTERED.swap(true, Ordering::Relaxed) {
        loop {
            core::hint::spin_loop();
        }
    }

    let location = Location::caller();
    let report = PanicReport { message, location };
    panic_handler().on_panic(&report)
}

/// Prints the report to standard error and aborts the process.
///
/// The default handler under `std`. Aborting (rather than unwinding)
/// keeps a misuse diagnosis from being swallowed by a `catch_unwind`
/// higher up the stack.
#[cfg(feature = "std")]
#[derive(Debug, Clone, Copy, Default)]
pub struct AbortHandler;

#[cfg(feature = "std")]
impl PanicHandler for AbortHandler {
    fn on_panic(&self, report: &PanicReport<'_>) -> ! {
        eprintln!("{}", report);
        std::process::abort()
    }
}

/// Re-raises the report as a standard unwinding panic.
///
/// Meant for test harnesses: install it once per test binary and fatal
/// paths become observable through `#[should_panic]` or
/// `std::panic::catch_unwind` instead of killing the whole run.
#[cfg(feature = "std")]
#[derive(Debug, Clone, Copy, Default)]
pub struct UnwindHandler;

#[cfg(feature = "std")]
impl PanicHandler for UnwindHandler {
    fn on_panic(&self, report: &PanicReport<'_>) -> ! {
        std::panic!("{}", report.message())
    }
}

/// Parks the core in a spin loop.
///
/// The default handler without `std`, where there is no process to
/// abort. Embedders with a reset line or semihosting channel should
/// install their own handler instead.
#[derive(Debug, Clone, Copy, Default)]
pub struct HaltHandler;

impl PanicHandler for HaltHandler {
    fn on_panic(&self, _report: &PanicReport<'_>) -> ! {
        loop {
            core::hint::spin_loop();
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use std::panic::catch_unwind;

    #[test]
    fn test_second_install_is_rejected() {
        test_support::install();
        assert_eq!(set_panic_handler(&HaltHandler), Err(SetHandlerError(())));
    }

    #[test]
    fn test_report_carries_message_and_location() {
        test_support::install();

        let outcome = catch_unwind(|| crate::fatal!("checksum window slid past {}", 42));
        assert!(outcome.is_err());

        let (message, location) = test_support::report_containing("checksum window").unwrap();
        assert_eq!(message, "checksum window slid past 42");
        assert!(location.contains("panic.rs"), "location was {}", location);
    }

    #[test]
    fn test_fatal_dispatches_through_installed_handler() {
        test_support::install();

        let outcome = catch_unwind(|| crate::fatal!("handler dispatch probe"));
        assert!(outcome.is_err());
        assert!(test_support::report_containing("handler dispatch probe").is_some());
    }

    #[test]
    fn test_report_display_names_location_then_message() {
        fn render(report: &PanicReport<'_>) -> String {
            report.to_string()
        }

        let location = Location::caller();
        let rendered = render(&PanicReport {
            message: format_args!("wrong variant"),
            location,
        });
        assert!(rendered.starts_with("fatal error at "));
        assert!(rendered.ends_with(": wrong variant"));
        assert!(rendered.contains("panic.rs"));
    }
}
