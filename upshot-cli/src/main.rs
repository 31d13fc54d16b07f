use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use upshot_cli::{commands, FatalOp, HandlerChoice};

#[derive(Parser)]
#[command(name = "upshot")]
#[command(about = "Upshot - Outcome containers with loud, locatable diagnostics", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Capture and display the current call stack
    Trace {
        /// Stop after this many frames
        #[arg(short, long)]
        limit: Option<usize>,

        /// Skip this many innermost frames before capturing
        #[arg(short, long, default_value = "0")]
        skip: usize,

        /// Output JSON file for captured frames
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Deliberately misuse a container to demonstrate the fatal path
    Trip {
        /// Which misuse to perform
        #[arg(value_enum)]
        op: FatalOp,

        /// Handler backend to install first
        #[arg(long, value_enum, default_value = "abort")]
        handler: HandlerChoice,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    // Execute command
    match cli.command {
        Commands::Trace {
            limit,
            skip,
            output,
        } => commands::trace::execute(limit, skip, output.as_deref()),

        Commands::Trip { op, handler } => commands::trip::execute(op, handler),
    }
}
