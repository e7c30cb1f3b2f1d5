//! statistics::degree — actor activity and popularity statistics.
//!
//! Degrees are the (decayed) weighted degrees held by the network state.
//! `Total` is `out + in`. The optional `log1p` damping tames heavy-tailed
//! hubs.
use crate::events::{event::ActorId, time::EventTime};
use crate::network::state::NetworkState;
use crate::statistics::{
    errors::{StatError, StatResult},
    statistic::ComputeStatistic,
    transforms::log1p,
};
use std::str::FromStr;

/// Which focal actor a degree is read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Role {
    #[default]
    Sender,
    Receiver,
}

impl FromStr for Role {
    type Err = StatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "sender" => Ok(Role::Sender),
            "receiver" => Ok(Role::Receiver),
            _ => Err(StatError::InvalidMode { field: "role", value: s.to_string() }),
        }
    }
}

/// Which edges a degree counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DegreeDirection {
    #[default]
    Out,
    In,
    Total,
}

impl FromStr for DegreeDirection {
    type Err = StatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "out" | "outdegree" => Ok(DegreeDirection::Out),
            "in" | "indegree" => Ok(DegreeDirection::In),
            "total" | "totaldegree" => Ok(DegreeDirection::Total),
            _ => Err(StatError::InvalidMode { field: "degree direction", value: s.to_string() }),
        }
    }
}

impl DegreeDirection {
    fn label(&self) -> &'static str {
        match self {
            DegreeDirection::Out => "outdegree",
            DegreeDirection::In => "indegree",
            DegreeDirection::Total => "totaldegree",
        }
    }
}

fn degree_of<T: EventTime>(state: &NetworkState<T>, actor: ActorId, direction: DegreeDirection) -> f64 {
    match direction {
        DegreeDirection::Out => state.out_degree(actor),
        DegreeDirection::In => state.in_degree(actor),
        DegreeDirection::Total => state.out_degree(actor) + state.in_degree(actor),
    }
}

/// Degree — out/in/total degree of the sender or receiver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Degree {
    pub role: Role,
    pub direction: DegreeDirection,
    pub log1p: bool,
}

impl Degree {
    pub fn new(role: Role, direction: DegreeDirection) -> Self {
        Degree { role, direction, log1p: false }
    }

    /// Same statistic on the `ln(1 + degree)` scale.
    pub fn log_scaled(mut self) -> Self {
        self.log1p = true;
        self
    }
}

impl ComputeStatistic for Degree {
    fn compute<T: EventTime>(
        &self, state: &NetworkState<T>, sender: ActorId, receiver: ActorId,
    ) -> StatResult<f64> {
        let actor = match self.role {
            Role::Sender => sender,
            Role::Receiver => receiver,
        };
        let degree = degree_of(state, actor, self.direction);
        Ok(if self.log1p { log1p(degree) } else { degree })
    }

    fn default_name(&self) -> String {
        let role = match self.role {
            Role::Sender => "sender",
            Role::Receiver => "receiver",
        };
        let prefix = if self.log1p { "log_" } else { "" };
        format!("{prefix}{role}_{}", self.direction.label())
    }
}

/// DegreeDifference — `degree(sender) − degree(receiver)`, optionally
/// absolute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DegreeDifference {
    pub direction: DegreeDirection,
    pub absolute: bool,
}

impl DegreeDifference {
    pub fn new(direction: DegreeDirection, absolute: bool) -> Self {
        DegreeDifference { direction, absolute }
    }
}

impl ComputeStatistic for DegreeDifference {
    fn compute<T: EventTime>(
        &self, state: &NetworkState<T>, sender: ActorId, receiver: ActorId,
    ) -> StatResult<f64> {
        let diff = degree_of(state, sender, self.direction) - degree_of(state, receiver, self.direction);
        Ok(if self.absolute { diff.abs() } else { diff })
    }

    fn default_name(&self) -> String {
        let suffix = if self.absolute { "_absdiff" } else { "_diff" };
        format!("{}{suffix}", self.direction.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::event::Event;
    use approx::assert_relative_eq;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Degree per role and direction, with and without log damping.
    // - Signed and absolute degree differences.
    // - Parsing and default names.
    // -------------------------------------------------------------------------

    fn hub_state() -> NetworkState<f64> {
        let mut state = NetworkState::without_decay();
        for (i, r) in [2, 3, 4].into_iter().enumerate() {
            state.record(&Event::new(1, r, i as f64)).unwrap();
        }
        state.record(&Event::new(2, 1, 5.0)).unwrap();
        state
    }

    #[test]
    // Purpose
    // -------
    // Each role/direction pair reads the intended degree.
    //
    // Given
    // -----
    // - Actor 1 sends to 2, 3, 4 and receives from 2.
    //
    // Expect
    // ------
    // - sender out = 3, sender in = 1, sender total = 4, receiver (2) in = 1,
    //   log-scaled sender out = ln 4.
    fn degree_reads_role_and_direction() {
        let state = hub_state();

        assert_eq!(Degree::new(Role::Sender, DegreeDirection::Out).compute(&state, 1, 2).unwrap(), 3.0);
        assert_eq!(Degree::new(Role::Sender, DegreeDirection::In).compute(&state, 1, 2).unwrap(), 1.0);
        assert_eq!(Degree::new(Role::Sender, DegreeDirection::Total).compute(&state, 1, 2).unwrap(), 4.0);
        assert_eq!(Degree::new(Role::Receiver, DegreeDirection::In).compute(&state, 1, 2).unwrap(), 1.0);
        assert_relative_eq!(
            Degree::new(Role::Sender, DegreeDirection::Out).log_scaled().compute(&state, 1, 2).unwrap(),
            4f64.ln()
        );
    }

    #[test]
    // Purpose
    // -------
    // Differences are sender minus receiver, optionally absolute.
    //
    // Given
    // -----
    // - Out-degrees: actor 1 → 3, actor 3 → 0.
    //
    // Expect
    // ------
    // - diff(3, 1) = -3, absdiff(3, 1) = 3.
    fn degree_difference_sign() {
        let state = hub_state();

        assert_eq!(DegreeDifference::new(DegreeDirection::Out, false).compute(&state, 3, 1).unwrap(), -3.0);
        assert_eq!(DegreeDifference::new(DegreeDirection::Out, true).compute(&state, 3, 1).unwrap(), 3.0);
    }

    #[test]
    // Purpose
    // -------
    // Names and selector parsing.
    //
    // Given
    // -----
    // - A log-scaled receiver in-degree and an absolute total difference.
    //
    // Expect
    // ------
    // - "log_receiver_indegree", "totaldegree_absdiff"; "sideways" fails.
    fn names_and_parsing() {
        assert_eq!(
            Degree::new(Role::Receiver, DegreeDirection::In).log_scaled().default_name(),
            "log_receiver_indegree"
        );
        assert_eq!(DegreeDifference::new(DegreeDirection::Total, true).default_name(), "totaldegree_absdiff");
        assert_eq!("IN".parse::<DegreeDirection>(), Ok(DegreeDirection::In));
        assert!("sideways".parse::<DegreeDirection>().is_err());
        assert!("broker".parse::<Role>().is_err());
    }
}
