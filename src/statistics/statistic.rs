//! statistics::statistic — the uniform statistic interface and its closed
//! variant set.
//!
//! Purpose
//! -------
//! Give every statistic family one calling convention,
//! `compute(state, sender, receiver) -> f64`, and a deterministic display
//! name, so that the sampler and ad-hoc evaluation can treat a list of
//! heterogeneous statistics as one feature vector.
//!
//! Key behaviors
//! -------------
//! - [`ComputeStatistic`] is implemented by each configuration struct
//!   (`Repetition`, `TriadicClosure`, ...).
//! - [`StatisticKind`] is the closed set of those structs; [`Statistic`]
//!   wraps a kind with an optional display-name override and dispatches by
//!   `match`.
//!
//! Invariants & assumptions
//! ------------------------
//! - `compute` never mutates the state, so two calls without an
//!   intervening mutation return identical values.
//! - Configuration is validated by each struct's constructor; a
//!   [`Statistic`] only ever holds valid configuration.
//!
//! Downstream usage
//! ----------------
//! - Build statistics with `Statistic::from(config)` (or `.into()`), then
//!   optionally `.with_name("...")`.
use crate::events::{event::ActorId, time::EventTime};
use crate::network::state::NetworkState;
use crate::statistics::{
    attribute::NodeAttribute,
    degree::{Degree, DegreeDifference},
    dyad::{Inertia, Recency, Reciprocity, Repetition},
    errors::StatResult,
    four_cycle::FourCycle,
    triadic::TriadicClosure,
};

/// ComputeStatistic — a pure feature of a dyad given the network state.
pub trait ComputeStatistic {
    /// Value of the statistic for `sender → receiver` as of the state's
    /// current time.
    fn compute<T: EventTime>(
        &self, state: &NetworkState<T>, sender: ActorId, receiver: ActorId,
    ) -> StatResult<f64>;

    /// Name derived from the configuration.
    fn default_name(&self) -> String;
}

/// StatisticKind — closed set of statistic configurations.
#[derive(Debug, Clone, PartialEq)]
pub enum StatisticKind {
    // ---- Dyad history ----
    Repetition(Repetition),
    Reciprocity(Reciprocity),
    Inertia(Inertia),
    Recency(Recency),

    // ---- Degree ----
    Degree(Degree),
    DegreeDifference(DegreeDifference),

    // ---- Closure ----
    TriadicClosure(TriadicClosure),
    FourCycle(FourCycle),

    // ---- Node attributes ----
    NodeAttribute(NodeAttribute),
}

impl ComputeStatistic for StatisticKind {
    fn compute<T: EventTime>(
        &self, state: &NetworkState<T>, sender: ActorId, receiver: ActorId,
    ) -> StatResult<f64> {
        match self {
            StatisticKind::Repetition(s) => s.compute(state, sender, receiver),
            StatisticKind::Reciprocity(s) => s.compute(state, sender, receiver),
            StatisticKind::Inertia(s) => s.compute(state, sender, receiver),
            StatisticKind::Recency(s) => s.compute(state, sender, receiver),
            StatisticKind::Degree(s) => s.compute(state, sender, receiver),
            StatisticKind::DegreeDifference(s) => s.compute(state, sender, receiver),
            StatisticKind::TriadicClosure(s) => s.compute(state, sender, receiver),
            StatisticKind::FourCycle(s) => s.compute(state, sender, receiver),
            StatisticKind::NodeAttribute(s) => s.compute(state, sender, receiver),
        }
    }

    fn default_name(&self) -> String {
        match self {
            StatisticKind::Repetition(s) => s.default_name(),
            StatisticKind::Reciprocity(s) => s.default_name(),
            StatisticKind::Inertia(s) => s.default_name(),
            StatisticKind::Recency(s) => s.default_name(),
            StatisticKind::Degree(s) => s.default_name(),
            StatisticKind::DegreeDifference(s) => s.default_name(),
            StatisticKind::TriadicClosure(s) => s.default_name(),
            StatisticKind::FourCycle(s) => s.default_name(),
            StatisticKind::NodeAttribute(s) => s.default_name(),
        }
    }
}

/// Statistic — a configured statistic with its display name.
#[derive(Debug, Clone, PartialEq)]
pub struct Statistic {
    kind: StatisticKind,
    name: Option<String>,
}

impl Statistic {
    pub fn new(kind: StatisticKind) -> Self {
        Statistic { kind, name: None }
    }

    /// Override the display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn kind(&self) -> &StatisticKind {
        &self.kind
    }

    /// Override if set, otherwise the configuration-derived name.
    pub fn name(&self) -> String {
        match &self.name {
            Some(name) => name.clone(),
            None => self.kind.default_name(),
        }
    }

    pub fn compute<T: EventTime>(
        &self, state: &NetworkState<T>, sender: ActorId, receiver: ActorId,
    ) -> StatResult<f64> {
        self.kind.compute(state, sender, receiver)
    }
}

macro_rules! impl_from_config {
    ($($config:ident),* $(,)?) => {
        $(
            impl From<$config> for StatisticKind {
                fn from(config: $config) -> Self {
                    StatisticKind::$config(config)
                }
            }

            impl From<$config> for Statistic {
                fn from(config: $config) -> Self {
                    Statistic::new(StatisticKind::$config(config))
                }
            }
        )*
    };
}

impl_from_config!(
    Repetition,
    Reciprocity,
    Inertia,
    Recency,
    Degree,
    DegreeDifference,
    TriadicClosure,
    FourCycle,
    NodeAttribute,
);

impl From<StatisticKind> for Statistic {
    fn from(kind: StatisticKind) -> Self {
        Statistic::new(kind)
    }
}

/// Feature vector of one dyad: one value per statistic, in order.
pub fn compute_all<T: EventTime>(
    statistics: &[Statistic], state: &NetworkState<T>, sender: ActorId, receiver: ActorId,
) -> StatResult<Vec<f64>> {
    statistics.iter().map(|stat| stat.compute(state, sender, receiver)).collect()
}

/// Display names of a statistic list, in order.
pub fn names(statistics: &[Statistic]) -> Vec<String> {
    statistics.iter().map(Statistic::name).collect()
}
