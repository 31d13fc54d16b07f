//! Call-stack capture for diagnostics
//!
//! Walks the current thread's stack innermost-first, resolving each
//! return address into a [`Frame`] record. Capture is best-effort:
//! every frame field is a [`Maybe`], and anything the unwinder or the
//! symbol tables cannot produce is [`Absent`] rather than a placeholder.
//!
//! The consumer drives the walk. It receives each frame together with
//! its zero-based index and steers with [`ControlFlow`], so a caller
//! pays for exactly as many frames as it inspects. Walks are reentrant
//! and safe to run from multiple threads.

use core::fmt;
use core::ops::ControlFlow;

use crate::maybe::{Absent, Maybe, Present};

#[cfg(feature = "logging")]
use tracing::debug;

/// A demangled symbol name resolved from a return address.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SymbolName(String);

impl SymbolName {
    fn new(name: String) -> Self {
        SymbolName(name)
    }

    /// The demangled name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SymbolName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Source file and line resolved from debug info.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SourceLocation {
    /// Path of the source file as recorded in debug info.
    pub file: String,
    /// Line number within `file`.
    pub line: u32,
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.file, self.line)
    }
}

/// One resolved entry of a stack walk.
///
/// The walk hands out borrows only; consumers that keep frames beyond
/// the callback clone them.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Frame {
    /// Instruction pointer at the captured call site.
    pub ip: Maybe<usize>,
    /// Base address of the enclosing symbol.
    pub symbol_address: Maybe<usize>,
    /// Demangled symbol name, when symbolization found one.
    pub symbol: Maybe<SymbolName>,
    /// Source file and line, when debug info was available.
    pub location: Maybe<SourceLocation>,
}

/// Walks the current thread's stack, innermost frame first.
///
/// `consumer` receives each resolved frame and its index, and returns
/// [`ControlFlow::Continue`] to keep walking or [`ControlFlow::Break`]
/// to stop early. The walk machinery itself contributes the innermost
/// few frames; use [`trace_from`] to skip past them.
///
/// # Examples
///
/// ```
/// use core::ops::ControlFlow;
///
/// let mut depth = 0;
/// upshot_core::backtrace::trace(|_, index| {
///     depth = index + 1;
///     if depth == 16 {
///         ControlFlow::Break(())
///     } else {
///         ControlFlow::Continue(())
///     }
/// });
/// assert!(depth >= 1);
/// ```
#[inline(never)]
pub fn trace<F>(consumer: F)
where
    F: FnMut(&Frame, usize) -> ControlFlow<()>,
{
    trace_from(0, consumer)
}

/// Walks the current thread's stack, skipping the innermost `skip`
/// raw frames before delivering any to `consumer`.
///
/// Indices still count delivered frames from zero. Skipping past the
/// bottom of the stack delivers nothing.
#[inline(never)]
pub fn trace_from<F>(skip: usize, mut consumer: F)
where
    F: FnMut(&Frame, usize) -> ControlFlow<()>,
{
    let mut remaining_skip = skip;
    let mut index = 0usize;

    ::backtrace::trace(|raw| {
        if remaining_skip > 0 {
            remaining_skip -= 1;
            return true;
        }

        let frame = resolve(raw);
        let verdict = consumer(&frame, index);
        index += 1;
        verdict.is_continue()
    });

    #[cfg(feature = "logging")]
    debug!("Stack walk delivered {} frames", index);
}

// Symbolization may report several symbols for one address when calls
// were inlined; the first-reported one wins and the rest are ignored so
// each raw frame maps to exactly one record.
fn resolve(raw: &::backtrace::Frame) -> Frame {
    let ip = raw.ip() as usize;
    let symbol_address = raw.symbol_address() as usize;

    let mut symbol = Absent;
    let mut location = Absent;
    ::backtrace::resolve(raw.ip(), |resolved| {
        if symbol.is_absent() {
            if let Some(name) = resolved.name() {
                symbol = Present(SymbolName::new(name.to_string()));
            }
        }
        if location.is_absent() {
            if let (Some(file), Some(line)) = (resolved.filename(), resolved.lineno()) {
                location = Present(SourceLocation {
                    file: file.display().to_string(),
                    line,
                });
            }
        }
    });

    Frame {
        ip: if ip == 0 { Absent } else { Present(ip) },
        symbol_address: if symbol_address == 0 {
            Absent
        } else {
            Present(symbol_address)
        },
        symbol,
        location,
    }
}
