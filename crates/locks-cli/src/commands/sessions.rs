//! Sessions command for listing reconstructed sessions.

use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use locks_core::{process_events, reconstruct_sessions};

use crate::Config;

/// Runs the sessions command, outputting gap-merged sessions as JSONL.
pub fn run<R: BufRead, W: Write>(reader: R, writer: &mut W, config: &Config) -> Result<()> {
    let gap_threshold = config.gap_threshold();
    let sessions = process_events(reader, |events| {
        reconstruct_sessions(events, gap_threshold).collect::<Vec<_>>()
    })
    .context("failed to read lock events")?;

    for session in sessions {
        let json = serde_json::to_string(&session)?;
        writeln!(writer, "{json}")?;
    }

    Ok(())
}
