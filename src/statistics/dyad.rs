//! statistics::dyad — dyad-history statistics.
//!
//! Purpose
//! -------
//! Statistics that look only at the history of the focal pair itself:
//! repetition, reciprocity, their weighted sum (inertia), and recency of the
//! last event on the pair.
//!
//! Conventions
//! -----------
//! - Counts are the (decayed) weighted counts held by the network state.
//! - In undirected mode, repetition sums both directions and recency uses the
//!   latest event in either direction.
use crate::events::{event::ActorId, time::EventTime};
use crate::network::state::NetworkState;
use crate::statistics::{
    errors::{StatError, StatResult},
    statistic::ComputeStatistic,
    transforms::RecencyTransform,
};
use std::str::FromStr;

/// Whether a dyad statistic distinguishes `s → r` from `r → s`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DyadDirection {
    #[default]
    Directed,
    Undirected,
}

impl FromStr for DyadDirection {
    type Err = StatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "directed" => Ok(DyadDirection::Directed),
            "undirected" | "symmetric" => Ok(DyadDirection::Undirected),
            _ => Err(StatError::InvalidMode { field: "dyad direction", value: s.to_string() }),
        }
    }
}

impl DyadDirection {
    fn suffix(&self) -> &'static str {
        match self {
            DyadDirection::Directed => "",
            DyadDirection::Undirected => "_undirected",
        }
    }
}

/// Repetition — historical count on the focal dyad.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Repetition {
    pub direction: DyadDirection,
}

impl Repetition {
    pub fn new(direction: DyadDirection) -> Self {
        Repetition { direction }
    }
}

impl ComputeStatistic for Repetition {
    fn compute<T: EventTime>(
        &self, state: &NetworkState<T>, sender: ActorId, receiver: ActorId,
    ) -> StatResult<f64> {
        Ok(match self.direction {
            DyadDirection::Directed => state.dyad_count(sender, receiver),
            DyadDirection::Undirected => state.undirected_count(sender, receiver),
        })
    }

    fn default_name(&self) -> String {
        format!("repetition{}", self.direction.suffix())
    }
}

/// Reciprocity — historical count in the reverse direction `r → s`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Reciprocity;

impl ComputeStatistic for Reciprocity {
    fn compute<T: EventTime>(
        &self, state: &NetworkState<T>, sender: ActorId, receiver: ActorId,
    ) -> StatResult<f64> {
        Ok(state.dyad_count(receiver, sender))
    }

    fn default_name(&self) -> String {
        "reciprocity".to_string()
    }
}

/// Inertia — `w_rep · count(s→r) + w_rec · count(r→s)`.
///
/// Both weights must be finite; the default is `(1, 1)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Inertia {
    repetition_weight: f64,
    reciprocity_weight: f64,
}

impl Inertia {
    pub fn new(repetition_weight: f64, reciprocity_weight: f64) -> StatResult<Self> {
        for (name, value) in
            [("repetition_weight", repetition_weight), ("reciprocity_weight", reciprocity_weight)]
        {
            if !value.is_finite() {
                return Err(StatError::InvalidParameter {
                    name,
                    value,
                    reason: "Inertia weights must be finite.",
                });
            }
        }
        Ok(Inertia { repetition_weight, reciprocity_weight })
    }

    pub fn repetition_weight(&self) -> f64 {
        self.repetition_weight
    }

    pub fn reciprocity_weight(&self) -> f64 {
        self.reciprocity_weight
    }
}

impl Default for Inertia {
    fn default() -> Self {
        Inertia { repetition_weight: 1.0, reciprocity_weight: 1.0 }
    }
}

impl ComputeStatistic for Inertia {
    fn compute<T: EventTime>(
        &self, state: &NetworkState<T>, sender: ActorId, receiver: ActorId,
    ) -> StatResult<f64> {
        Ok(self.repetition_weight * state.dyad_count(sender, receiver)
            + self.reciprocity_weight * state.dyad_count(receiver, sender))
    }

    fn default_name(&self) -> String {
        if *self == Inertia::default() {
            "inertia".to_string()
        } else {
            format!("inertia_{}_{}", self.repetition_weight, self.reciprocity_weight)
        }
    }
}

/// Recency — transform of the seconds since the last event on the dyad.
///
/// Returns `0` when the dyad has no history or the elapsed time is not
/// positive.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Recency {
    pub transform: RecencyTransform,
    pub direction: DyadDirection,
}

impl Recency {
    pub fn new(transform: RecencyTransform, direction: DyadDirection) -> Self {
        Recency { transform, direction }
    }
}

impl ComputeStatistic for Recency {
    fn compute<T: EventTime>(
        &self, state: &NetworkState<T>, sender: ActorId, receiver: ActorId,
    ) -> StatResult<f64> {
        let undirected = self.direction == DyadDirection::Undirected;
        match state.elapsed_since_last(sender, receiver, undirected)? {
            Some(elapsed) => Ok(self.transform.apply(elapsed)),
            None => Ok(0.0),
        }
    }

    fn default_name(&self) -> String {
        format!("recency_{}{}", self.transform.label(), self.direction.suffix())
    }
}
