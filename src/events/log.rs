//! events::log — time-sorted, validated sequence of relational events.
//!
//! Purpose
//! -------
//! Hold the ordered event history that the network state replays and the
//! sampler walks. This is the ingestion boundary of the core: weights and
//! time ordering are validated here so that downstream components can rely
//! on them.
//!
//! Key behaviors
//! -------------
//! - [`EventLog::from_events`] validates and stably sorts an arbitrary batch.
//! - [`EventLog::push`] appends and rejects events earlier than the tail.
//! - [`EventLog::insert`] places an event after every event with an equal or
//!   earlier time, so the log only ever grows in time order.
//! - Derived actor and event-type sets are maintained incrementally.
//!
//! Invariants & assumptions
//! ------------------------
//! - `events[i].time() <= events[i + 1].time()` for all `i`.
//! - Every stored weight is finite and `>= 0`.
//! - Every stored time is comparable with itself (no NaN floats).
//!
//! Conventions
//! -----------
//! - Indices are 0-based and stable under `push`; `insert` shifts later
//!   events by one.
//! - Simultaneous events keep their insertion order.
use crate::events::{
    errors::{EventError, EventResult},
    event::{ActorId, Event},
    time::EventTime,
};
use std::cmp::Ordering;
use std::collections::BTreeSet;

/// EventLog — ordered, immutable-by-element sequence of [`Event`]s.
///
/// Fields
/// ------
/// - `events`: `Vec<Event<T>>`
///   Events in non-decreasing time order.
/// - `actors`: `BTreeSet<ActorId>`
///   Every sender and receiver seen so far.
/// - `event_types`: `BTreeSet<String>`
///   Every type tag seen so far.
#[derive(Debug, Clone, PartialEq)]
pub struct EventLog<T> {
    events: Vec<Event<T>>,
    actors: BTreeSet<ActorId>,
    event_types: BTreeSet<String>,
}

impl<T: EventTime> Default for EventLog<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: EventTime> EventLog<T> {
    /// Empty log.
    pub fn new() -> Self {
        EventLog { events: Vec::new(), actors: BTreeSet::new(), event_types: BTreeSet::new() }
    }

    /// Build a log from an unsorted batch of events.
    ///
    /// Parameters
    /// ----------
    /// - `events`: `impl IntoIterator<Item = Event<T>>`
    ///   Events in any order.
    ///
    /// Returns
    /// -------
    /// `EventResult<EventLog<T>>`
    ///   The events stably sorted by time (ties keep input order).
    ///
    /// Errors
    /// ------
    /// - `EventError::InvalidWeight`
    ///   A weight is negative or non-finite; `index` refers to input order.
    /// - `EventError::IncomparableTime`
    ///   A timestamp cannot be ordered (e.g. NaN).
    pub fn from_events(events: impl IntoIterator<Item = Event<T>>) -> EventResult<Self> {
        let mut events: Vec<Event<T>> = events.into_iter().collect();
        for (index, event) in events.iter().enumerate() {
            validate_event(index, event)?;
        }
        events.sort_by(|a, b| a.time().partial_cmp(&b.time()).unwrap_or(Ordering::Equal));

        let mut log = EventLog::new();
        for event in events {
            log.track(&event);
            log.events.push(event);
        }
        Ok(log)
    }

    /// Append an event at the tail.
    ///
    /// # Errors
    /// - `EventError::InvalidWeight` / `EventError::IncomparableTime` as in
    ///   [`EventLog::from_events`].
    /// - `EventError::OutOfOrder` if `event` is earlier than the last event.
    pub fn push(&mut self, event: Event<T>) -> EventResult<()> {
        let index = self.events.len();
        validate_event(index, &event)?;
        if let Some(last) = self.events.last() {
            if event.time() < last.time() {
                return Err(EventError::OutOfOrder { index });
            }
        }
        self.track(&event);
        self.events.push(event);
        Ok(())
    }

    /// Insert an event at its time position, after all events with an equal
    /// or earlier time. Returns the index it landed at.
    ///
    /// # Errors
    /// `EventError::InvalidWeight` / `EventError::IncomparableTime`.
    pub fn insert(&mut self, event: Event<T>) -> EventResult<usize> {
        let t = event.time();
        let index = self.events.partition_point(|e| e.time() <= t);
        validate_event(index, &event)?;
        self.track(&event);
        self.events.insert(index, event);
        Ok(index)
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Event<T>> {
        self.events.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Event<T>> {
        self.events.iter()
    }

    pub fn events(&self) -> &[Event<T>] {
        &self.events
    }

    /// Actors appearing as sender or receiver.
    pub fn actors(&self) -> &BTreeSet<ActorId> {
        &self.actors
    }

    pub fn event_types(&self) -> &BTreeSet<String> {
        &self.event_types
    }

    /// Sub-log containing only events of one type, in the same order.
    pub fn filter_type(&self, event_type: &str) -> EventLog<T> {
        let mut log = EventLog::new();
        for event in self.events.iter().filter(|e| e.event_type() == event_type) {
            log.track(event);
            log.events.push(event.clone());
        }
        log
    }

    /// Seconds between the first and last event; `0.0` for fewer than two.
    pub fn time_span_seconds(&self) -> EventResult<f64> {
        match (self.events.first(), self.events.last()) {
            (Some(first), Some(last)) => last.time().seconds_since(&first.time()),
            _ => Ok(0.0),
        }
    }

    fn track(&mut self, event: &Event<T>) {
        self.actors.insert(event.sender());
        self.actors.insert(event.receiver());
        if !self.event_types.contains(event.event_type()) {
            self.event_types.insert(event.event_type().to_string());
        }
    }
}

impl<'a, T> IntoIterator for &'a EventLog<T> {
    type Item = &'a Event<T>;
    type IntoIter = std::slice::Iter<'a, Event<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.events.iter()
    }
}

fn validate_event<T: EventTime>(index: usize, event: &Event<T>) -> EventResult<()> {
    let weight = event.weight();
    if !weight.is_finite() {
        return Err(EventError::InvalidWeight {
            index,
            value: weight,
            reason: "Weight must be finite.",
        });
    }
    if weight < 0.0 {
        return Err(EventError::InvalidWeight {
            index,
            value: weight,
            reason: "Weight must be non-negative.",
        });
    }
    let t = event.time();
    if t.partial_cmp(&t).is_none() {
        return Err(EventError::IncomparableTime { index });
    }
    Ok(())
}
