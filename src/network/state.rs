//! network::state — incremental, optionally decayed network aggregates.
//!
//! Purpose
//! -------
//! Maintain the network state that every statistic reads: weighted directed
//! and undirected dyad counts, weighted in/out degrees, last-event times per
//! dyad, neighbor sets, and the full event history, all as of the current
//! replay time.
//!
//! Key behaviors
//! -------------
//! - [`NetworkState::advance`] moves the clock forward and, when `λ > 0`,
//!   multiplies every stored aggregate by `exp(-λ·Δt)` with `Δt` in seconds.
//! - [`NetworkState::record`] advances to the event time, then adds the
//!   event weight to the dyad, undirected-pair, out-degree and in-degree
//!   aggregates and appends the event to the history.
//! - Neighbor sets are indexed as events are recorded, so closure queries
//!   never rescan the history.
//!
//! Invariants & assumptions
//! ------------------------
//! - `current_time` never decreases; a regression is a [`StateError`].
//! - All stored counts and degrees are `>= 0`: `record` rejects negative
//!   or non-finite weights, and decay factors lie in `(0, 1]`.
//! - Decay is applied once per distinct timestamp advance. Simultaneous
//!   events never compound decay.
//! - `undirected_count(a, b) == dyad_count(a, b) + dyad_count(b, a)` up to
//!   rounding, for `a != b`.
//!
//! Conventions
//! -----------
//! - Missing entries read as `0.0` / empty sets / `None`.
//! - A state is exclusively owned by one replay driver; readers borrow it
//!   immutably. Clone it to obtain an independent snapshot.
//!
//! Performance
//! -----------
//! - `record` is O(log d) in the neighbor-set size.
//! - `advance` with decay is O(#dyads + #actors); it is skipped entirely for
//!   simultaneous events and when `λ == 0`.
use crate::events::{
    event::{ActorId, Dyad, Event},
    log::EventLog,
    time::EventTime,
};
use crate::network::{
    decay::{decay_factor, halflife_to_decay, validate_decay_rate},
    errors::{StateError, StateResult},
};
use std::cmp::Ordering;
use std::collections::{BTreeSet, HashMap};

static EMPTY_NEIGHBORS: BTreeSet<ActorId> = BTreeSet::new();

/// Key of the unordered pair `{a, b}`.
#[inline]
pub fn undirected_key(a: ActorId, b: ActorId) -> Dyad {
    if a <= b { (a, b) } else { (b, a) }
}

/// NetworkState — decayed aggregates over a replayed event log.
///
/// Fields
/// ------
/// - `decay_rate`: `f64`
///   Exponential decay rate `λ >= 0` per second.
/// - `current_time`: `Option<T>`
///   Time of the last `advance`; `None` before the first event.
/// - `dyad_counts`, `undirected_counts`: weighted (decayed) event counts.
/// - `out_degree`, `in_degree`: weighted (decayed) degrees.
/// - `last_event`: time of the most recent event per directed dyad.
/// - `out_adj`, `in_adj`: neighbor indices.
/// - `history`: every recorded event in order.
/// - `actors`: every actor recorded so far.
#[derive(Debug, Clone)]
pub struct NetworkState<T> {
    decay_rate: f64,
    current_time: Option<T>,
    dyad_counts: HashMap<Dyad, f64>,
    undirected_counts: HashMap<Dyad, f64>,
    out_degree: HashMap<ActorId, f64>,
    in_degree: HashMap<ActorId, f64>,
    last_event: HashMap<Dyad, T>,
    out_adj: HashMap<ActorId, BTreeSet<ActorId>>,
    in_adj: HashMap<ActorId, BTreeSet<ActorId>>,
    history: Vec<Event<T>>,
    actors: BTreeSet<ActorId>,
}

impl<T: EventTime> NetworkState<T> {
    /// Empty state with decay rate `decay_rate` (per second).
    ///
    /// # Errors
    /// [`StateError::InvalidDecayRate`] if the rate is negative or non-finite.
    pub fn new(decay_rate: f64) -> StateResult<Self> {
        let decay_rate = validate_decay_rate(decay_rate)?;
        Ok(NetworkState {
            decay_rate,
            current_time: None,
            dyad_counts: HashMap::new(),
            undirected_counts: HashMap::new(),
            out_degree: HashMap::new(),
            in_degree: HashMap::new(),
            last_event: HashMap::new(),
            out_adj: HashMap::new(),
            in_adj: HashMap::new(),
            history: Vec::new(),
            actors: BTreeSet::new(),
        })
    }

    /// Empty state with no decay.
    pub fn without_decay() -> Self {
        NetworkState {
            decay_rate: 0.0,
            current_time: None,
            dyad_counts: HashMap::new(),
            undirected_counts: HashMap::new(),
            out_degree: HashMap::new(),
            in_degree: HashMap::new(),
            last_event: HashMap::new(),
            out_adj: HashMap::new(),
            in_adj: HashMap::new(),
            history: Vec::new(),
            actors: BTreeSet::new(),
        }
    }

    /// Empty state whose decay is given as a half-life in seconds.
    pub fn with_half_life(half_life: f64) -> StateResult<Self> {
        Self::new(halflife_to_decay(half_life)?)
    }

    // ---- Mutation ----

    /// Move the clock to `t`, decaying every aggregate if `t` is later than
    /// the current time and `λ > 0`.
    ///
    /// # Errors
    /// - [`StateError::TimeRegression`] if `t` is earlier than the current
    ///   time.
    /// - [`StateError::Time`] if the elapsed time is not a finite number of
    ///   seconds.
    pub fn advance(&mut self, t: T) -> StateResult<()> {
        let current = match self.current_time {
            None => {
                self.current_time = Some(t);
                return Ok(());
            }
            Some(current) => current,
        };
        match t.partial_cmp(&current) {
            Some(Ordering::Equal) => Ok(()),
            Some(Ordering::Less) => Err(StateError::TimeRegression {
                current: format!("{current:?}"),
                requested: format!("{t:?}"),
            }),
            Some(Ordering::Greater) | None => {
                let elapsed = t.seconds_since(&current)?;
                if elapsed < 0.0 {
                    return Err(StateError::TimeRegression {
                        current: format!("{current:?}"),
                        requested: format!("{t:?}"),
                    });
                }
                if self.decay_rate > 0.0 {
                    self.apply_decay(decay_factor(self.decay_rate, elapsed), elapsed);
                }
                self.current_time = Some(t);
                Ok(())
            }
        }
    }

    /// Advance to the event time, then add the event to every aggregate.
    ///
    /// # Errors
    /// - [`StateError::InvalidWeight`] if the weight is negative or not
    ///   finite. The state is left untouched.
    /// - Errors from [`NetworkState::advance`].
    pub fn record(&mut self, event: &Event<T>) -> StateResult<()> {
        let w = event.weight();
        if !w.is_finite() || w < 0.0 {
            return Err(StateError::InvalidWeight { value: w });
        }
        self.advance(event.time())?;
        let (s, r) = event.dyad();

        *self.dyad_counts.entry((s, r)).or_insert(0.0) += w;
        *self.undirected_counts.entry(undirected_key(s, r)).or_insert(0.0) += w;
        *self.out_degree.entry(s).or_insert(0.0) += w;
        *self.in_degree.entry(r).or_insert(0.0) += w;
        self.last_event.insert((s, r), event.time());
        self.out_adj.entry(s).or_default().insert(r);
        self.in_adj.entry(r).or_default().insert(s);
        self.actors.insert(s);
        self.actors.insert(r);
        self.history.push(event.clone());
        Ok(())
    }

    /// Record every event of `log` in order.
    pub fn replay(&mut self, log: &EventLog<T>) -> StateResult<()> {
        for event in log {
            self.record(event)?;
        }
        Ok(())
    }

    /// Drop all aggregates and history, keeping the decay rate.
    pub fn reset(&mut self) {
        self.current_time = None;
        self.dyad_counts.clear();
        self.undirected_counts.clear();
        self.out_degree.clear();
        self.in_degree.clear();
        self.last_event.clear();
        self.out_adj.clear();
        self.in_adj.clear();
        self.history.clear();
        self.actors.clear();
    }

    fn apply_decay(&mut self, factor: f64, elapsed: f64) {
        tracing::trace!(factor, elapsed, dyads = self.dyad_counts.len(), "applying decay");
        self.dyad_counts.values_mut().for_each(|v| *v *= factor);
        self.undirected_counts.values_mut().for_each(|v| *v *= factor);
        self.out_degree.values_mut().for_each(|v| *v *= factor);
        self.in_degree.values_mut().for_each(|v| *v *= factor);
    }

    // ---- Queries ----

    pub fn decay_rate(&self) -> f64 {
        self.decay_rate
    }

    pub fn current_time(&self) -> Option<T> {
        self.current_time
    }

    /// Number of recorded events.
    pub fn n_events(&self) -> usize {
        self.history.len()
    }

    pub fn history(&self) -> &[Event<T>] {
        &self.history
    }

    pub fn actors(&self) -> &BTreeSet<ActorId> {
        &self.actors
    }

    /// Weighted count of `sender → receiver` events.
    pub fn dyad_count(&self, sender: ActorId, receiver: ActorId) -> f64 {
        self.dyad_counts.get(&(sender, receiver)).copied().unwrap_or(0.0)
    }

    /// Weighted count of events between `a` and `b` in either direction.
    pub fn undirected_count(&self, a: ActorId, b: ActorId) -> f64 {
        self.undirected_counts.get(&undirected_key(a, b)).copied().unwrap_or(0.0)
    }

    pub fn out_degree(&self, actor: ActorId) -> f64 {
        self.out_degree.get(&actor).copied().unwrap_or(0.0)
    }

    pub fn in_degree(&self, actor: ActorId) -> f64 {
        self.in_degree.get(&actor).copied().unwrap_or(0.0)
    }

    /// Actors `actor` has sent at least one event to.
    pub fn out_neighbors(&self, actor: ActorId) -> &BTreeSet<ActorId> {
        self.out_adj.get(&actor).unwrap_or(&EMPTY_NEIGHBORS)
    }

    /// Actors that have sent at least one event to `actor`.
    pub fn in_neighbors(&self, actor: ActorId) -> &BTreeSet<ActorId> {
        self.in_adj.get(&actor).unwrap_or(&EMPTY_NEIGHBORS)
    }

    /// Whether any `sender → receiver` event has been recorded.
    pub fn has_edge(&self, sender: ActorId, receiver: ActorId) -> bool {
        self.out_adj.get(&sender).is_some_and(|set| set.contains(&receiver))
    }

    /// Time of the most recent `sender → receiver` event.
    pub fn last_event_time(&self, sender: ActorId, receiver: ActorId) -> Option<T> {
        self.last_event.get(&(sender, receiver)).copied()
    }

    /// Time of the most recent event between `a` and `b` in either direction.
    pub fn last_event_time_undirected(&self, a: ActorId, b: ActorId) -> Option<T> {
        match (self.last_event_time(a, b), self.last_event_time(b, a)) {
            (Some(x), Some(y)) => Some(if y > x { y } else { x }),
            (x, None) => x,
            (None, y) => y,
        }
    }

    /// Seconds from the last event on the dyad to the current time.
    ///
    /// Returns `Ok(None)` when the dyad has no history. With `undirected`,
    /// the most recent event in either direction is used.
    pub fn elapsed_since_last(
        &self, sender: ActorId, receiver: ActorId, undirected: bool,
    ) -> StateResult<Option<f64>> {
        let last = if undirected {
            self.last_event_time_undirected(sender, receiver)
        } else {
            self.last_event_time(sender, receiver)
        };
        match (last, self.current_time) {
            (Some(last), Some(now)) => Ok(Some(now.seconds_since(&last)?)),
            _ => Ok(None),
        }
    }
}
