//! Integration tests for the complete pipeline → fatal observation → stack walk flow

use core::ops::ControlFlow;
use std::panic::catch_unwind;

use upshot_core::backtrace::{trace, trace_from, Frame};
use upshot_core::panic::{set_panic_handler, UnwindHandler};
use upshot_core::{try_success, Absent, Failure, Maybe, Present, Success, Upshot};

/// Routes fatal errors through the unwinding backend so this binary can
/// observe them. The handler slot is process-wide and install-once, so
/// every test calls this and the first one wins.
fn observe_fatals() {
    let _ = set_panic_handler(&UnwindHandler);
}

fn field(record: &str, key: &str) -> Maybe<u32> {
    let entry = record.split(',').find(|part| part.starts_with(key));
    Maybe::from(entry).and_then(|part| {
        Maybe::from(part.split('=').nth(1)).and_then(|digits| match digits.parse() {
            Ok(value) => Present(value),
            Err(_) => Absent,
        })
    })
}

#[derive(Debug, Clone, PartialEq)]
struct BadDigits(String);

#[derive(Debug, Clone, PartialEq)]
enum RecordError {
    Missing(&'static str),
    Digits(BadDigits),
}

impl From<BadDigits> for RecordError {
    fn from(bad: BadDigits) -> Self {
        RecordError::Digits(bad)
    }
}

fn digits(part: &str) -> Upshot<u32, BadDigits> {
    match part.parse() {
        Ok(value) => Success(value),
        Err(_) => Failure(BadDigits(part.to_string())),
    }
}

fn raw_field<'a>(record: &'a str, key: &str) -> Maybe<&'a str> {
    let entry = record
        .split(',')
        .find(|part| part.starts_with(key))
        .and_then(|part| part.split('=').nth(1));
    Maybe::from(entry)
}

fn sequence(record: &str) -> Upshot<u32, RecordError> {
    let raw = try_success!(raw_field(record, "seq").ok_or(RecordError::Missing("seq")));
    let value = try_success!(digits(raw));
    Success(value)
}

#[test]
fn test_lookup_pipeline_short_circuits_and_recovers() {
    let record = "seq=4,len=512,crc=9";

    let doubled = field(record, "len").map(|n| n * 2).unwrap_or(0);
    assert_eq!(doubled, 1024);

    let missing = field(record, "offset")
        .map(|n| n + 1)
        .ok_or("offset column absent");
    assert_eq!(missing, Failure("offset column absent"));

    let fallback = field(record, "offset").or_else(|| field(record, "seq"));
    assert_eq!(fallback, Present(4));
}

#[test]
fn test_try_macros_propagate_and_convert_errors() {
    assert_eq!(sequence("seq=17,len=8"), Success(17));
    assert_eq!(
        sequence("len=8"),
        Failure(RecordError::Missing("seq"))
    );
    assert_eq!(
        sequence("seq=banana,len=8"),
        Failure(RecordError::Digits(BadDigits(String::from("banana"))))
    );
}

#[test]
fn test_slot_reuse_with_take_and_replace() {
    let mut slot: Maybe<Vec<u32>> = Present(vec![1, 2, 3]);

    let drained = slot.take().unwrap_or_default();
    assert_eq!(drained, vec![1, 2, 3]);
    assert!(slot.is_absent());

    assert_eq!(slot.replace(vec![9]), Absent);
    assert_eq!(slot.value().as_slice(), &[9]);
}

#[test]
fn test_result_bridges_compose_with_question_mark() {
    fn parse(text: &str) -> Result<u32, String> {
        let bridged: Result<u32, String> = digits(text).map_err(|bad| bad.0).into();
        Ok(bridged? * 2)
    }

    assert_eq!(parse("21"), Ok(42));
    assert_eq!(parse("x"), Err(String::from("x")));
}

#[test]
fn test_fatal_access_is_observable_not_silent() {
    observe_fatals();

    let outcome = catch_unwind(|| {
        let torn: Upshot<u32, String> = Failure(String::from("marker not found"));
        torn.unwrap()
    });

    let payload = outcome.unwrap_err();
    let message = payload.downcast_ref::<String>().unwrap();
    assert!(message.contains("called `Upshot::unwrap()` on a `Failure` value"));
    assert!(message.contains("marker not found"));
}

#[test]
#[should_panic(expected = "called `Maybe::unwrap()` on an `Absent` value")]
fn test_absent_unwrap_panics_under_unwind_handler() {
    observe_fatals();
    let absent: Maybe<u8> = Absent;
    let _ = absent.unwrap();
}

#[inline(never)]
fn level_one(frames: &mut Vec<Frame>) -> usize {
    level_two(frames) + 1
}

#[inline(never)]
fn level_two(frames: &mut Vec<Frame>) -> usize {
    level_three(frames) + 1
}

#[inline(never)]
fn level_three(frames: &mut Vec<Frame>) -> usize {
    level_four(frames) + 1
}

#[inline(never)]
fn level_four(frames: &mut Vec<Frame>) -> usize {
    trace(|frame, _| {
        frames.push(frame.clone());
        ControlFlow::Continue(())
    });
    frames.len()
}

#[test]
fn test_walk_reaches_through_four_call_levels() {
    let mut frames = Vec::new();
    let probe = level_one(&mut frames);
    assert_eq!(probe, frames.len() + 3);

    assert!(frames.len() >= 4, "only {} frames captured", frames.len());

    // Symbolization is best-effort; order-check whichever markers resolved.
    let positions: Vec<usize> = ["level_four", "level_three", "level_two", "level_one"]
        .iter()
        .filter_map(|marker| {
            frames.iter().position(|frame| {
                frame
                    .symbol
                    .as_ref()
                    .map(|name| name.as_str().contains(marker))
                    .unwrap_or(false)
            })
        })
        .collect();
    assert!(
        positions.windows(2).all(|pair| pair[0] < pair[1]),
        "markers out of innermost-first order: {:?}",
        positions
    );
}

#[test]
fn test_limited_walk_visits_prefix_only() {
    let mut all = 0usize;
    trace(|_, _| {
        all += 1;
        ControlFlow::Continue(())
    });
    assert!(all >= 4);

    let mut limited = 0usize;
    trace(|_, _| {
        limited += 1;
        if limited == 3 {
            ControlFlow::Break(())
        } else {
            ControlFlow::Continue(())
        }
    });
    assert_eq!(limited, 3);
}

#[test]
fn test_skipped_walk_never_grows() {
    let mut full = 0usize;
    trace(|_, _| {
        full += 1;
        ControlFlow::Continue(())
    });

    let mut trimmed = 0usize;
    trace_from(2, |_, _| {
        trimmed += 1;
        ControlFlow::Continue(())
    });

    assert!(trimmed <= full);
}
