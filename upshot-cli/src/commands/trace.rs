use anyhow::{Context, Result};
use colored::*;
use core::ops::ControlFlow;
use serde::{Deserialize, Serialize};
use std::fs;
use tracing::info;
use upshot_core::backtrace::{trace_from, Frame};

/// JSON-friendly projection of a captured frame. Absent fields stay
/// `null` rather than inventing placeholder addresses.
#[derive(Serialize, Deserialize)]
struct CapturedFrame {
    index: usize,
    ip: Option<String>,
    symbol_address: Option<String>,
    symbol: Option<String>,
    file: Option<String>,
    line: Option<u32>,
}

impl CapturedFrame {
    fn from_walk(frame: &Frame, index: usize) -> Self {
        CapturedFrame {
            index,
            ip: frame.ip.as_ref().map(|ip| format!("{:#x}", ip)).into(),
            symbol_address: frame
                .symbol_address
                .as_ref()
                .map(|addr| format!("{:#x}", addr))
                .into(),
            symbol: frame
                .symbol
                .as_ref()
                .map(|name| name.as_str().to_string())
                .into(),
            file: frame.location.as_ref().map(|loc| loc.file.clone()).into(),
            line: frame.location.as_ref().map(|loc| loc.line).into(),
        }
    }
}

pub fn execute(limit: Option<usize>, skip: usize, output: Option<&str>) -> Result<()> {
    info!("Walking current stack (skip: {}, limit: {:?})", skip, limit);

    let mut captured: Vec<CapturedFrame> = Vec::new();
    trace_from(skip, |frame, index| {
        if limit.map_or(false, |limit| index >= limit) {
            return ControlFlow::Break(());
        }
        captured.push(CapturedFrame::from_walk(frame, index));
        ControlFlow::Continue(())
    });

    info!("Captured {} frames", captured.len());

    if let Some(output_path) = output {
        let json = serde_json::to_string_pretty(&captured)
            .with_context(|| "Failed to serialize captured frames")?;

        fs::write(output_path, json)
            .with_context(|| format!("Failed to write output file: {}", output_path))?;

        info!("Captured frames written to: {}", output_path);
    } else {
        println!("\n=== Call Stack (innermost first) ===");
        for frame in &captured {
            let ip = frame.ip.as_deref().unwrap_or("?");
            let symbol = frame.symbol.as_deref().unwrap_or("<unresolved>");
            println!("{:>4}  {}  {}", frame.index, ip.dimmed(), symbol.bold());
            if let (Some(file), Some(line)) = (&frame.file, frame.line) {
                println!("      {}", format!("at {}:{}", file, line).dimmed());
            }
        }
        println!();
    }

    Ok(())
}
