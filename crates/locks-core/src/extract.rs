//! Event extraction from `log show` output.
//!
//! Only lines written by the `logind` session agent when the session state
//! changes are recognized. Everything else in the log is skipped.

use std::io::BufRead;
use std::sync::LazyLock;

use chrono::{DateTime, NaiveDateTime};
use regex::Regex;
use thiserror::Error;

use crate::event::{Event, EventKind};

/// Session agent state change line, e.g.
/// `2021-08-31 22:28:00.841 Df logind[132:54af3a] [com.apple.login:Logind_General] -[SessionAgent SA_SetSessionStateForUser:state:reply:]:536: state set to: 3`
static STATE_LINE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"(?P<at>[\d-]+ [\d:.]+)(?P<offset>[+-]\d{4})?",
        r" Df logind\[\d+:[[:xdigit:]]+\] \[com\.apple\.login:Logind_General\]",
        r" -\[SessionAgent SA_SetSessionStateForUser:state:reply:\]:\d+: state set to: (?P<code>\d+)$",
    ))
    .unwrap()
});

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f";
const TIMESTAMP_WITH_OFFSET_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f%z";

/// Errors that abort extraction.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// Reading the input failed.
    #[error("failed to read log input: {0}")]
    Io(#[from] std::io::Error),
    /// A state change line carried a timestamp that is not a valid date-time.
    #[error("invalid timestamp {value:?} on line {line}")]
    InvalidTimestamp {
        line: usize,
        value: String,
        #[source]
        source: chrono::ParseError,
    },
}

/// Classifies a single log line.
///
/// Returns `Ok(None)` for lines that are not session state changes.
pub fn parse_line(line: &str, line_no: usize) -> Result<Option<Event>, ExtractError> {
    let Some(caps) = STATE_LINE_RE.captures(line.trim_end()) else {
        return Ok(None);
    };

    let (raw, parsed) = match caps.name("offset") {
        Some(offset) => {
            let raw = format!("{}{}", &caps["at"], offset.as_str());
            let parsed = DateTime::parse_from_str(&raw, TIMESTAMP_WITH_OFFSET_FORMAT)
                .map(|dt| dt.naive_local());
            (raw, parsed)
        }
        None => {
            let raw = caps["at"].to_string();
            let parsed = NaiveDateTime::parse_from_str(&raw, TIMESTAMP_FORMAT);
            (raw, parsed)
        }
    };
    let at = parsed.map_err(|source| ExtractError::InvalidTimestamp {
        line: line_no,
        value: raw,
        source,
    })?;

    Ok(Some(Event::new(at, EventKind::from_code(&caps["code"]))))
}

/// Lazily extracts events from a line-oriented reader.
///
/// Lines are decoded lossily, so invalid UTF-8 in unrelated lines is skipped
/// like any other noise.
pub fn extract_events<R: BufRead>(reader: R) -> Events<R> {
    Events {
        reader,
        buf: Vec::new(),
        line_no: 0,
        last_at: None,
        done: false,
    }
}

/// Runs `consume` over the events of `reader`, failing if extraction failed.
///
/// `consume` sees a plain event iterator that ends early on the first
/// extraction error. Its result is discarded in that case, so callers never
/// act on a partial log.
pub fn process_events<R, T, F>(reader: R, consume: F) -> Result<T, ExtractError>
where
    R: BufRead,
    F: FnOnce(&mut dyn Iterator<Item = Event>) -> T,
{
    let mut error = None;
    let output = {
        let mut events = extract_events(reader).map_while(|result| match result {
            Ok(event) => Some(event),
            Err(e) => {
                error = Some(e);
                None
            }
        });
        consume(&mut events)
    };

    match error {
        Some(e) => Err(e),
        None => Ok(output),
    }
}

/// Iterator returned by [`extract_events`].
///
/// Yields one event per recognized line in input order. The first error ends
/// the iteration.
pub struct Events<R> {
    reader: R,
    buf: Vec<u8>,
    line_no: usize,
    last_at: Option<NaiveDateTime>,
    done: bool,
}

impl<R: BufRead> Iterator for Events<R> {
    type Item = Result<Event, ExtractError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        loop {
            self.buf.clear();
            match self.reader.read_until(b'\n', &mut self.buf) {
                Ok(0) => return None,
                Ok(_) => {}
                Err(e) => {
                    self.done = true;
                    return Some(Err(e.into()));
                }
            }
            self.line_no += 1;

            let line = String::from_utf8_lossy(&self.buf);
            match parse_line(&line, self.line_no) {
                Ok(Some(event)) => {
                    if self.last_at.is_some_and(|last| event.at < last) {
                        tracing::debug!(
                            line = self.line_no,
                            at = %event.at,
                            "event is older than its predecessor"
                        );
                    }
                    self.last_at = Some(event.at);
                    return Some(Ok(event));
                }
                Ok(None) => {
                    tracing::trace!(line = self.line_no, "skipping unrecognized line");
                }
                Err(e) => {
                    self.done = true;
                    return Some(Err(e));
                }
            }
        }
    }
}
