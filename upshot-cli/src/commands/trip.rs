use anyhow::Result;
use colored::*;
use std::panic::catch_unwind;
use tracing::{info, warn};
use upshot_core::panic::{set_panic_handler, AbortHandler, UnwindHandler};
use upshot_core::{Absent, Failure, Maybe, Success, Upshot};

use crate::{FatalOp, HandlerChoice};

pub fn execute(op: FatalOp, handler: HandlerChoice) -> Result<()> {
    install(handler);

    info!("Tripping fatal path: {:?}", op);

    match handler {
        HandlerChoice::Abort => {
            println!(
                "Tripping {:?}; the report goes to stderr and the process aborts.",
                op
            );
            run(op);
            // run only comes back if a handler misbehaved and returned
            anyhow::bail!("fatal operation unexpectedly returned")
        }
        HandlerChoice::Unwind => {
            let payload = match catch_unwind(|| run(op)) {
                Err(payload) => payload,
                Ok(()) => anyhow::bail!("fatal operation unexpectedly returned"),
            };

            let message = payload
                .downcast_ref::<String>()
                .map(String::as_str)
                .unwrap_or("<non-string panic payload>");
            println!("{} {}", "caught fatal error:".red().bold(), message);
            Ok(())
        }
    }
}

fn install(choice: HandlerChoice) {
    let installed = match choice {
        HandlerChoice::Abort => set_panic_handler(&AbortHandler),
        HandlerChoice::Unwind => set_panic_handler(&UnwindHandler),
    };

    // The slot is install-once per process; repeated trips in one
    // process keep whichever handler won.
    if installed.is_err() {
        warn!("A panic handler is already installed; reusing the existing one");
    }
}

fn run(op: FatalOp) {
    match op {
        FatalOp::UnwrapAbsent => {
            let slot: Maybe<u32> = Absent;
            let _ = slot.unwrap();
        }
        FatalOp::ValueAbsent => {
            let slot: Maybe<u32> = Absent;
            let _ = *slot.value();
        }
        FatalOp::UnwrapFailure => {
            let outcome: Upshot<u32, String> = Failure(String::from("frame marker not found"));
            let _ = outcome.unwrap();
        }
        FatalOp::ExpectFailure => {
            let outcome: Upshot<u32, String> = Failure(String::from("trailing checksum torn"));
            let _ = outcome.expect("stream tail must decode");
        }
        FatalOp::UnwrapErrSuccess => {
            let outcome: Upshot<u32, String> = Success(12);
            let _ = outcome.unwrap_err();
        }
    }
}
