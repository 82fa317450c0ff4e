//! Lock state events extracted from log lines.

use std::fmt;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// A classified lock state transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    /// Wall clock time written in the log line (UTC offset discarded).
    pub at: NaiveDateTime,
    /// What the transition means for the user session.
    pub kind: EventKind,
}

impl Event {
    pub const fn new(at: NaiveDateTime, kind: EventKind) -> Self {
        Self { at, kind }
    }

    pub fn is_lock(&self) -> bool {
        self.kind == EventKind::Lock
    }

    pub fn is_unlock(&self) -> bool {
        self.kind == EventKind::Unlock
    }
}

/// Meaning of a session agent state code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    /// The screen was locked (codes 3 and 5).
    Lock,
    /// The screen was unlocked (code 2).
    Unlock,
    /// Any other state code.
    Ignored,
}

impl EventKind {
    /// Classifies the raw `state set to:` code.
    pub fn from_code(code: &str) -> Self {
        match code {
            "2" => Self::Unlock,
            "3" | "5" => Self::Lock,
            _ => Self::Ignored,
        }
    }

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Lock => "lock",
            Self::Unlock => "unlock",
            Self::Ignored => "ignored",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use chrono::NaiveDate;

    #[test]
    fn state_codes_map_to_kinds() {
        assert_eq!(EventKind::from_code("2"), EventKind::Unlock);
        assert_eq!(EventKind::from_code("3"), EventKind::Lock);
        assert_eq!(EventKind::from_code("5"), EventKind::Lock);
    }

    #[test]
    fn unknown_codes_are_ignored() {
        for code in ["0", "1", "4", "6", "9", "23", ""] {
            assert_eq!(
                EventKind::from_code(code),
                EventKind::Ignored,
                "code {code:?} should be ignored"
            );
        }
    }

    #[test]
    fn event_serializes_kind_lowercase() {
        let at = NaiveDate::from_ymd_opt(2021, 8, 31)
            .unwrap()
            .and_hms_milli_opt(22, 28, 0, 841)
            .unwrap();
        let json = serde_json::to_string(&Event::new(at, EventKind::Lock)).unwrap();
        assert_eq!(json, r#"{"at":"2021-08-31T22:28:00.841","kind":"lock"}"#);
    }
}
