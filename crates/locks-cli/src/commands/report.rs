//! Report command for printing session boundaries per day.
//!
//! This module implements `locks report` with human-readable (tab-separated)
//! and JSON output.

use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use chrono::NaiveDate;
use locks_core::{
    DayReport, FormatProfile, Session, group_by_day, process_events, reconstruct_sessions,
};
use serde::Serialize;

use crate::Config;

/// JSON report entry for a single day.
#[derive(Debug, Serialize)]
pub struct JsonDay<'a> {
    pub day: NaiveDate,
    pub sessions: &'a [Session],
    pub total_minutes: i64,
}

/// Reads the whole log and computes the per-day reports.
///
/// Nothing is returned when the log contains a malformed state line.
pub fn generate_report_data<R: BufRead>(reader: R, config: &Config) -> Result<Vec<DayReport>> {
    let gap_threshold = config.gap_threshold();
    let days = process_events(reader, |events| {
        group_by_day(reconstruct_sessions(events, gap_threshold)).collect::<Vec<_>>()
    })
    .context("failed to read lock events")?;

    tracing::debug!(
        days = days.len(),
        sessions = days.iter().map(|d| d.sessions.len()).sum::<usize>(),
        "reconstructed sessions"
    );
    Ok(days)
}

/// Formats the human-readable report, one line per day.
pub fn format_report(days: &[DayReport], profile: &FormatProfile) -> String {
    days.iter()
        .map(|day| profile.render_day(day) + "\n")
        .collect()
}

/// Formats report data as JSON.
pub fn format_report_json(days: &[DayReport]) -> Result<String> {
    let report: Vec<_> = days
        .iter()
        .map(|day| JsonDay {
            day: day.day,
            sessions: &day.sessions,
            total_minutes: day.total().num_minutes(),
        })
        .collect();

    Ok(serde_json::to_string_pretty(&report)?)
}

pub fn run<R: BufRead, W: Write>(
    reader: R,
    writer: &mut W,
    config: &Config,
    json: bool,
) -> Result<()> {
    let days = generate_report_data(reader, config)?;

    if json {
        writeln!(writer, "{}", format_report_json(&days)?)?;
    } else {
        write!(writer, "{}", format_report(&days, &config.profile()))?;
    }

    Ok(())
}
