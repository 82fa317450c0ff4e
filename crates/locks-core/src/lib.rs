//! Core domain logic for the lock log reporter.
//!
//! This crate contains the fundamental types and logic for:
//! - Extraction: classifying `logind` session state lines into events
//! - Reconstruction: collapsing lock/unlock events into gap-merged sessions
//! - Reporting: grouping sessions by day and rendering them with an explicit profile

pub mod event;
pub mod extract;
pub mod format;
pub mod reconstruct;
pub mod report;
pub mod session;

pub use event::{Event, EventKind};
pub use extract::{Events, ExtractError, extract_events, parse_line, process_events};
pub use format::{FormatError, FormatProfile, Locale, Style};
pub use reconstruct::{DEFAULT_GAP_THRESHOLD_MINUTES, default_gap_threshold, reconstruct_sessions};
pub use report::{ByDay, DayReport, group_by_day};
pub use session::Session;
