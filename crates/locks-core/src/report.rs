//! Per-day grouping and rendering of sessions.

use std::iter::Peekable;

use chrono::{NaiveDate, TimeDelta};
use serde::Serialize;

use crate::format::FormatProfile;
use crate::session::Session;

/// Sessions that started on the same calendar day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DayReport {
    pub day: NaiveDate,
    pub sessions: Vec<Session>,
}

impl DayReport {
    /// Sum of session lengths.
    pub fn total(&self) -> TimeDelta {
        self.sessions.iter().map(Session::length).sum()
    }
}

/// Partitions ordered sessions into consecutive days.
///
/// Sessions are grouped by the date of their start. The input is expected in
/// start order, so days are not re-sorted.
pub fn group_by_day<I>(sessions: I) -> ByDay<I::IntoIter>
where
    I: IntoIterator<Item = Session>,
{
    ByDay {
        sessions: sessions.into_iter().peekable(),
    }
}

/// Iterator returned by [`group_by_day`].
pub struct ByDay<I: Iterator<Item = Session>> {
    sessions: Peekable<I>,
}

impl<I: Iterator<Item = Session>> Iterator for ByDay<I> {
    type Item = DayReport;

    fn next(&mut self) -> Option<DayReport> {
        let first = self.sessions.next()?;
        let day = first.day();
        let mut sessions = vec![first];
        while let Some(session) = self.sessions.next_if(|s| s.day() == day) {
            sessions.push(session);
        }
        Some(DayReport { day, sessions })
    }
}

impl FormatProfile {
    /// Renders `<date>\t\t<start>\t<stop>\t<start>\t<stop>...`.
    pub fn render_day(&self, report: &DayReport) -> String {
        let times = report
            .sessions
            .iter()
            .flat_map(|s| [self.time(s.start), self.time(s.stop)])
            .collect::<Vec<_>>()
            .join("\t");
        format!("{}\t\t{times}", self.date(report.day))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::format::{Locale, Style};

    fn duration(day: NaiveDate, start_hour: u32, stop_hour: u32) -> Session {
        Session::new(
            day.and_hms_opt(start_hour, 0, 0).unwrap(),
            day.and_hms_opt(stop_hour, 0, 0).unwrap(),
        )
    }

    fn render(profile: FormatProfile, sessions: Vec<Session>) -> Vec<String> {
        group_by_day(sessions)
            .map(|day| profile.render_day(&day))
            .collect()
    }

    #[test]
    fn formats_one_line_per_day() {
        let day1 = NaiveDate::from_ymd_opt(2021, 8, 2).unwrap();
        let day2 = NaiveDate::from_ymd_opt(2021, 8, 31).unwrap();
        let sessions = vec![
            duration(day1, 10, 11),
            duration(day1, 12, 13),
            duration(day2, 10, 11),
        ];

        assert_eq!(
            render(FormatProfile::default(), sessions),
            vec![
                "02.08.21\t\t10:00\t11:00\t12:00\t13:00",
                "31.08.21\t\t10:00\t11:00",
            ]
        );
    }

    #[test]
    fn no_sessions_no_lines() {
        assert!(render(FormatProfile::default(), vec![]).is_empty());
    }

    #[test]
    fn session_past_midnight_belongs_to_start_day() {
        let day = NaiveDate::from_ymd_opt(2021, 8, 2).unwrap();
        let late = Session::new(
            day.and_hms_opt(23, 0, 0).unwrap(),
            day.succ_opt().unwrap().and_hms_opt(1, 30, 0).unwrap(),
        );

        let days: Vec<_> = group_by_day([late]).collect();

        assert_eq!(days.len(), 1);
        assert_eq!(days[0].day, day);
        assert_eq!(days[0].total(), TimeDelta::minutes(150));
    }

    #[test]
    fn renders_with_explicit_profile() {
        let day = NaiveDate::from_ymd_opt(2021, 8, 2).unwrap();
        let profile = FormatProfile::new(Locale::EnUs, Style::Medium, Style::Short);

        insta::assert_snapshot!(
            render(profile, vec![duration(day, 9, 12), duration(day, 13, 17)]).join("\n"),
            @"Aug 2, 2021		9:00 AM	12:00 PM	1:00 PM	5:00 PM"
        );
    }

    #[test]
    fn day_total_sums_sessions() {
        let day = NaiveDate::from_ymd_opt(2021, 8, 2).unwrap();
        let report = DayReport {
            day,
            sessions: vec![duration(day, 9, 12), duration(day, 13, 17)],
        };

        assert_eq!(report.total(), TimeDelta::hours(7));
    }
}
