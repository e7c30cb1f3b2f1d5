//! statistics::four_cycle — closure through two distinct intermediaries.
//!
//! Purpose
//! -------
//! Count the paths `s — j — k — r` of a given directed shape, where `j` and
//! `k` are distinct actors different from both focal actors.
//!
//! Key behaviors
//! -------------
//! | kind           | edges                     |
//! |----------------|---------------------------|
//! | `Chain`        | `s→j`, `j→k`, `k→r`       |
//! | `ReverseChain` | `r→k`, `k→j`, `j→s`       |
//! | `SharedOut`    | `s→j`, `k→j`, `k→r`       |
//! | `SharedIn`     | `j→s`, `j→k`, `r→k`       |
//! | `Mixed`        | sum of the four above     |
//!
//! With `alpha = Some(α)` the count `n` is replaced by
//! `geometric_weight(n, α)`; for `Mixed` the transform applies to the sum.
//!
//! Performance
//! -----------
//! - Two nested neighbor scans plus one edge probe per candidate `k`, so the
//!   worst case is `O(deg(s) · max deg(j) · log deg)`. This is the most
//!   expensive statistic in the catalog.
use crate::events::{event::ActorId, time::EventTime};
use crate::network::state::NetworkState;
use crate::statistics::{
    errors::{StatError, StatResult},
    statistic::ComputeStatistic,
    transforms::{geometric_weight, validate_alpha},
};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FourCycleKind {
    SharedOut,
    SharedIn,
    Chain,
    ReverseChain,
    #[default]
    Mixed,
}

impl FromStr for FourCycleKind {
    type Err = StatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "shared_out" | "sharedout" => Ok(FourCycleKind::SharedOut),
            "shared_in" | "sharedin" => Ok(FourCycleKind::SharedIn),
            "chain" => Ok(FourCycleKind::Chain),
            "reverse_chain" | "reversechain" => Ok(FourCycleKind::ReverseChain),
            "mixed" | "all" => Ok(FourCycleKind::Mixed),
            _ => Err(StatError::InvalidMode { field: "four-cycle kind", value: s.to_string() }),
        }
    }
}

impl FourCycleKind {
    fn label(&self) -> &'static str {
        match self {
            FourCycleKind::SharedOut => "shared_out",
            FourCycleKind::SharedIn => "shared_in",
            FourCycleKind::Chain => "chain",
            FourCycleKind::ReverseChain => "reverse_chain",
            FourCycleKind::Mixed => "mixed",
        }
    }
}

/// FourCycle — count of four-node paths of one shape, optionally
/// geometrically weighted.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FourCycle {
    kind: FourCycleKind,
    alpha: Option<f64>,
}

impl FourCycle {
    /// # Errors
    /// [`StatError::InvalidParameter`] if `alpha` is given and not a finite
    /// value `> 0`.
    pub fn new(kind: FourCycleKind, alpha: Option<f64>) -> StatResult<Self> {
        if let Some(alpha) = alpha {
            validate_alpha(alpha)?;
        }
        Ok(FourCycle { kind, alpha })
    }

    pub fn kind(&self) -> FourCycleKind {
        self.kind
    }

    pub fn alpha(&self) -> Option<f64> {
        self.alpha
    }
}

/// Number of `(j, k)` pairs with `j ∈ first(s)`, `k ∈ second(j)` and
/// `closes(k)`, where `j ≠ k` and neither is a focal actor.
fn count_paths<'a, T, F, G, C>(
    state: &'a NetworkState<T>, s: ActorId, r: ActorId, first: F, second: G, closes: C,
) -> usize
where
    T: EventTime,
    F: Fn(&'a NetworkState<T>, ActorId) -> &'a std::collections::BTreeSet<ActorId>,
    G: Fn(&'a NetworkState<T>, ActorId) -> &'a std::collections::BTreeSet<ActorId>,
    C: Fn(ActorId) -> bool,
{
    let focal = |a: ActorId| a == s || a == r;
    let mut n = 0;
    for &j in first(state, s) {
        if focal(j) {
            continue;
        }
        n += second(state, j).iter().filter(|&&k| k != j && !focal(k) && closes(k)).count();
    }
    n
}

fn count_kind<T: EventTime>(state: &NetworkState<T>, kind: FourCycleKind, s: ActorId, r: ActorId) -> usize {
    match kind {
        // s→j, j→k, k→r
        FourCycleKind::Chain => count_paths(
            state, s, r, NetworkState::out_neighbors, NetworkState::out_neighbors,
            |k| state.has_edge(k, r),
        ),
        // j→s, k→j, r→k
        FourCycleKind::ReverseChain => count_paths(
            state, s, r, NetworkState::in_neighbors, NetworkState::in_neighbors,
            |k| state.has_edge(r, k),
        ),
        // s→j, k→j, k→r
        FourCycleKind::SharedOut => count_paths(
            state, s, r, NetworkState::out_neighbors, NetworkState::in_neighbors,
            |k| state.has_edge(k, r),
        ),
        // j→s, j→k, r→k
        FourCycleKind::SharedIn => count_paths(
            state, s, r, NetworkState::in_neighbors, NetworkState::out_neighbors,
            |k| state.has_edge(r, k),
        ),
        FourCycleKind::Mixed => [
            FourCycleKind::Chain,
            FourCycleKind::ReverseChain,
            FourCycleKind::SharedOut,
            FourCycleKind::SharedIn,
        ]
        .into_iter()
        .map(|k| count_kind(state, k, s, r))
        .sum(),
    }
}

impl ComputeStatistic for FourCycle {
    fn compute<T: EventTime>(
        &self, state: &NetworkState<T>, sender: ActorId, receiver: ActorId,
    ) -> StatResult<f64> {
        let n = count_kind(state, self.kind, sender, receiver) as f64;
        Ok(match self.alpha {
            Some(alpha) => geometric_weight(n, alpha),
            None => n,
        })
    }

    fn default_name(&self) -> String {
        match self.alpha {
            None => format!("four_cycle_{}", self.kind.label()),
            Some(alpha) => format!("gw_four_cycle_{}_{alpha}", self.kind.label()),
        }
    }
}
