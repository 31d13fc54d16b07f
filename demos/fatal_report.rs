//! Example demonstrating fatal-path reporting and stack capture

use core::ops::ControlFlow;
use std::panic::catch_unwind;

use upshot_core::backtrace::trace;
use upshot_core::panic::{set_panic_handler, UnwindHandler};
use upshot_core::{Failure, Upshot};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("Upshot Fatal Reporting Example\n");

    // Step 1: Route fatal errors through the unwinding handler so this
    // example can catch and display them instead of aborting
    println!("Step 1: Installing the unwinding handler...");
    set_panic_handler(&UnwindHandler)?;

    // Step 2: Misuse a container on purpose
    println!("Step 2: Unwrapping a Failure...\n");
    let caught = catch_unwind(|| {
        let torn: Upshot<u32, String> = Failure(String::from("marker not found at offset 4096"));
        torn.unwrap()
    });

    match caught {
        Err(payload) => {
            let message = payload
                .downcast_ref::<String>()
                .map(String::as_str)
                .unwrap_or("<non-string payload>");
            println!("Caught fatal error: {}", message);
        }
        Ok(_) => println!("unreachable: the unwrap above always faults"),
    }

    // Step 3: Walk the stack the way a diagnostic sink would
    println!("\nStep 3: Capturing the current call stack...");
    let mut shown = 0;
    trace(|frame, index| {
        let symbol = frame
            .symbol
            .as_ref()
            .map(|name| name.as_str())
            .unwrap_or("<unresolved>");
        println!("  #{:>2} {}", index, symbol);
        shown = index + 1;
        if shown == 8 {
            ControlFlow::Break(())
        } else {
            ControlFlow::Continue(())
        }
    });
    println!("Displayed {} innermost frames", shown);

    println!("\nUse 'upshot trace --limit 8' to do the same from the CLI");

    Ok(())
}
