//! Session reconstruction.
//!
//! Turns a noisy, chronologically ordered event stream into non-overlapping
//! sessions. Every stage is a single-pass iterator adapter with at most one
//! element of lookahead:
//!
//! 1. drop `Ignored` events
//! 2. drop locks seen before the first unlock
//! 3. collapse unlock runs to their first event
//! 4. collapse lock runs to their last event
//! 5. pair each unlock with the following lock
//! 6. merge sessions separated by less than the gap threshold
//!
//! Input order is trusted. Out-of-order events produce unspecified sessions.

use std::iter::Peekable;

use chrono::{NaiveDateTime, TimeDelta};

use crate::event::{Event, EventKind};
use crate::session::Session;

/// Sessions closer than this are merged by default.
pub const DEFAULT_GAP_THRESHOLD_MINUTES: i64 = 15;

pub fn default_gap_threshold() -> TimeDelta {
    TimeDelta::minutes(DEFAULT_GAP_THRESHOLD_MINUTES)
}

/// Reconstructs gap-merged sessions from ordered events.
pub fn reconstruct_sessions<I>(
    events: I,
    gap_threshold: TimeDelta,
) -> impl Iterator<Item = Session>
where
    I: IntoIterator<Item = Event>,
{
    let events = events
        .into_iter()
        .filter(|event| event.kind != EventKind::Ignored)
        .skip_while(Event::is_lock);
    let events = CollapseRuns::new(events, EventKind::Unlock, Keep::First);
    let events = CollapseRuns::new(events, EventKind::Lock, Keep::Last);

    MergeGaps::new(PairSessions::new(events), gap_threshold)
}

/// Which event of a run survives collapsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Keep {
    First,
    Last,
}

/// Collapses each maximal run of `kind` events into one event.
///
/// Events of other kinds pass through unchanged.
pub struct CollapseRuns<I: Iterator<Item = Event>> {
    events: Peekable<I>,
    kind: EventKind,
    keep: Keep,
}

impl<I: Iterator<Item = Event>> CollapseRuns<I> {
    pub fn new(events: I, kind: EventKind, keep: Keep) -> Self {
        Self {
            events: events.peekable(),
            kind,
            keep,
        }
    }
}

impl<I: Iterator<Item = Event>> Iterator for CollapseRuns<I> {
    type Item = Event;

    fn next(&mut self) -> Option<Event> {
        let first = self.events.next()?;
        if first.kind != self.kind {
            return Some(first);
        }

        let kind = self.kind;
        let mut kept = first;
        while let Some(event) = self.events.next_if(|e| e.kind == kind) {
            if self.keep == Keep::Last {
                kept = event;
            }
        }
        Some(kept)
    }
}

#[derive(Debug, Clone, Copy)]
enum PairState {
    AwaitingUnlock,
    OpenSession { start: NaiveDateTime },
}

/// Pairs every unlock with the next lock.
///
/// An unlock still open when the input ends is dropped.
pub struct PairSessions<I> {
    events: I,
    state: PairState,
}

impl<I: Iterator<Item = Event>> PairSessions<I> {
    pub const fn new(events: I) -> Self {
        Self {
            events,
            state: PairState::AwaitingUnlock,
        }
    }
}

impl<I: Iterator<Item = Event>> Iterator for PairSessions<I> {
    type Item = Session;

    fn next(&mut self) -> Option<Session> {
        loop {
            let Some(event) = self.events.next() else {
                if let PairState::OpenSession { start } = self.state {
                    tracing::debug!(%start, "dropping session that was never locked");
                    self.state = PairState::AwaitingUnlock;
                }
                return None;
            };

            match (self.state, event.kind) {
                (PairState::AwaitingUnlock, EventKind::Unlock) => {
                    self.state = PairState::OpenSession { start: event.at };
                }
                (PairState::OpenSession { start }, EventKind::Lock) => {
                    self.state = PairState::AwaitingUnlock;
                    return Some(Session::new(start, event.at));
                }
                // A stray lock has nothing to close; a repeated unlock keeps the earliest start.
                (PairState::AwaitingUnlock, EventKind::Lock)
                | (PairState::OpenSession { .. }, EventKind::Unlock)
                | (_, EventKind::Ignored) => {}
            }
        }
    }
}

/// Merges consecutive sessions whose gap is below a threshold.
pub struct MergeGaps<I: Iterator<Item = Session>> {
    sessions: Peekable<I>,
    threshold: TimeDelta,
}

impl<I: Iterator<Item = Session>> MergeGaps<I> {
    pub fn new(sessions: I, threshold: TimeDelta) -> Self {
        Self {
            sessions: sessions.peekable(),
            threshold,
        }
    }
}

impl<I: Iterator<Item = Session>> Iterator for MergeGaps<I> {
    type Item = Session;

    fn next(&mut self) -> Option<Session> {
        let mut merged = self.sessions.next()?;
        let threshold = self.threshold;
        while let Some(next) = self
            .sessions
            .next_if(|next| merged.gap_until(next) < threshold)
        {
            merged = Session::new(merged.start, merged.stop.max(next.stop));
        }
        Some(merged)
    }
}
