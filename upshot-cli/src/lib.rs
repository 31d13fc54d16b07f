//! Library entry for upshot-cli used by integration tests and embedding.

pub mod commands;

// Re-export commands for convenience
pub use commands::*;

/// Container misuses demonstrable through `trip`
#[derive(Copy, Clone, Debug, clap::ValueEnum)]
pub enum FatalOp {
    /// Unwrap an absent optional
    UnwrapAbsent,
    /// Borrow the value of an absent optional
    ValueAbsent,
    /// Unwrap a failed outcome
    UnwrapFailure,
    /// Expect a failed outcome with a caller message
    ExpectFailure,
    /// Unwrap the failure channel of a successful outcome
    UnwrapErrSuccess,
}

/// Fatal handler backends installable by `trip`
#[derive(Copy, Clone, Debug, clap::ValueEnum)]
pub enum HandlerChoice {
    /// Print the report to stderr and abort the process
    Abort,
    /// Re-raise the report as a catchable unwinding panic
    Unwind,
}
