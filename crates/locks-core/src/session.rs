//! Reconstructed user sessions.

use chrono::{NaiveDate, NaiveDateTime, TimeDelta};
use serde::{Deserialize, Serialize};

/// An interval from an unlock to the lock that ended it.
///
/// After gap merging a single session may span several unlock/lock pairs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub start: NaiveDateTime,
    pub stop: NaiveDateTime,
}

impl Session {
    pub const fn new(start: NaiveDateTime, stop: NaiveDateTime) -> Self {
        Self { start, stop }
    }

    /// Calendar day the session is reported under.
    pub fn day(&self) -> NaiveDate {
        self.start.date()
    }

    pub fn length(&self) -> TimeDelta {
        self.stop - self.start
    }

    /// Time between the end of this session and the start of `next`.
    ///
    /// Negative when the sessions overlap.
    pub fn gap_until(&self, next: &Self) -> TimeDelta {
        next.start - self.stop
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2021, 8, 2)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    #[test]
    fn gap_and_length() {
        let first = Session::new(at(10, 0), at(11, 0));
        let second = Session::new(at(11, 10), at(12, 0));

        assert_eq!(first.length(), TimeDelta::hours(1));
        assert_eq!(first.gap_until(&second), TimeDelta::minutes(10));
        assert_eq!(second.gap_until(&first), TimeDelta::minutes(-120));
    }

    #[test]
    fn day_is_taken_from_start() {
        let start = at(23, 30);
        let stop = start + TimeDelta::hours(1);

        assert_eq!(Session::new(start, stop).day(), start.date());
    }
}
