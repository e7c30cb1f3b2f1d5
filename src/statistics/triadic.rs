//! statistics::triadic — triadic closure through a shared third actor.
//!
//! Purpose
//! -------
//! Count (or weigh) the third actors `k` that connect the focal sender `s`
//! and receiver `r` through a two-path of a given shape.
//!
//! Key behaviors
//! -------------
//! For each [`TriadKind`] the partner set is the intersection of two
//! neighbor sets, with `s` and `r` removed:
//!
//! | kind             | partners `k`              | edges           |
//! |------------------|---------------------------|-----------------|
//! | `Transitive`     | `out(s) ∩ in(r)`          | `s→k`, `k→r`    |
//! | `Cyclic`         | `in(s) ∩ out(r)`          | `k→s`, `r→k`    |
//! | `SharedSender`   | `in(s) ∩ in(r)`           | `k→s`, `k→r`    |
//! | `SharedReceiver` | `out(s) ∩ out(r)`         | `s→k`, `r→k`    |
//!
//! - `Unweighted`: number of partners.
//! - `Weighted`: sum over partners of the smaller of the two edge weights.
//! - `Geometric { alpha }`: `geometric_weight(n, alpha)` of the unweighted
//!   count.
//!
//! Performance
//! -----------
//! - The smaller of the two sets is scanned and probed against the other,
//!   so the cost is `O(min(|A|, |B|) · log max(|A|, |B|))`.
use crate::events::{event::ActorId, time::EventTime};
use crate::network::state::NetworkState;
use crate::statistics::{
    errors::{StatError, StatResult},
    statistic::ComputeStatistic,
    transforms::{geometric_weight, validate_alpha},
};
use std::collections::BTreeSet;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TriadKind {
    #[default]
    Transitive,
    Cyclic,
    SharedSender,
    SharedReceiver,
}

impl FromStr for TriadKind {
    type Err = StatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "transitive" | "otp" => Ok(TriadKind::Transitive),
            "cyclic" | "itp" => Ok(TriadKind::Cyclic),
            "shared_sender" | "shared_in" | "isp" => Ok(TriadKind::SharedSender),
            "shared_receiver" | "shared_out" | "osp" => Ok(TriadKind::SharedReceiver),
            _ => Err(StatError::InvalidMode { field: "triad kind", value: s.to_string() }),
        }
    }
}

impl TriadKind {
    fn label(&self) -> &'static str {
        match self {
            TriadKind::Transitive => "transitive_closure",
            TriadKind::Cyclic => "cyclic_closure",
            TriadKind::SharedSender => "shared_sender",
            TriadKind::SharedReceiver => "shared_receiver",
        }
    }

    fn partner_sets<'a, T: EventTime>(
        &self, state: &'a NetworkState<T>, s: ActorId, r: ActorId,
    ) -> (&'a BTreeSet<ActorId>, &'a BTreeSet<ActorId>) {
        match self {
            TriadKind::Transitive => (state.out_neighbors(s), state.in_neighbors(r)),
            TriadKind::Cyclic => (state.in_neighbors(s), state.out_neighbors(r)),
            TriadKind::SharedSender => (state.in_neighbors(s), state.in_neighbors(r)),
            TriadKind::SharedReceiver => (state.out_neighbors(s), state.out_neighbors(r)),
        }
    }

    /// Weights of the two edges linking `k` to `s` and to `r`.
    fn edge_weights<T: EventTime>(
        &self, state: &NetworkState<T>, s: ActorId, r: ActorId, k: ActorId,
    ) -> (f64, f64) {
        match self {
            TriadKind::Transitive => (state.dyad_count(s, k), state.dyad_count(k, r)),
            TriadKind::Cyclic => (state.dyad_count(k, s), state.dyad_count(r, k)),
            TriadKind::SharedSender => (state.dyad_count(k, s), state.dyad_count(k, r)),
            TriadKind::SharedReceiver => (state.dyad_count(s, k), state.dyad_count(r, k)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum TriadWeighting {
    #[default]
    Unweighted,
    Weighted,
    Geometric { alpha: f64 },
}

/// TriadicClosure — shared-partner statistic of a given shape and weighting.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TriadicClosure {
    kind: TriadKind,
    weighting: TriadWeighting,
}

impl TriadicClosure {
    /// # Errors
    /// [`StatError::InvalidParameter`] for a geometric weighting with
    /// `alpha <= 0` or non-finite.
    pub fn new(kind: TriadKind, weighting: TriadWeighting) -> StatResult<Self> {
        if let TriadWeighting::Geometric { alpha } = weighting {
            validate_alpha(alpha)?;
        }
        Ok(TriadicClosure { kind, weighting })
    }

    /// Unweighted count of partners of the given shape.
    pub fn unweighted(kind: TriadKind) -> Self {
        TriadicClosure { kind, weighting: TriadWeighting::Unweighted }
    }

    pub fn kind(&self) -> TriadKind {
        self.kind
    }

    pub fn weighting(&self) -> TriadWeighting {
        self.weighting
    }

    /// Call `visit` on every partner `k` of the focal pair.
    fn for_each_partner<T: EventTime>(
        &self, state: &NetworkState<T>, s: ActorId, r: ActorId, mut visit: impl FnMut(ActorId),
    ) {
        let (a, b) = self.kind.partner_sets(state, s, r);
        let (small, large) = if a.len() <= b.len() { (a, b) } else { (b, a) };
        for &k in small {
            if k != s && k != r && large.contains(&k) {
                visit(k);
            }
        }
    }

    fn partner_count<T: EventTime>(&self, state: &NetworkState<T>, s: ActorId, r: ActorId) -> f64 {
        let mut n = 0usize;
        self.for_each_partner(state, s, r, |_| n += 1);
        n as f64
    }
}

impl ComputeStatistic for TriadicClosure {
    fn compute<T: EventTime>(
        &self, state: &NetworkState<T>, sender: ActorId, receiver: ActorId,
    ) -> StatResult<f64> {
        let value = match self.weighting {
            TriadWeighting::Unweighted => self.partner_count(state, sender, receiver),
            TriadWeighting::Weighted => {
                let mut total = 0.0;
                self.for_each_partner(state, sender, receiver, |k| {
                    let (w1, w2) = self.kind.edge_weights(state, sender, receiver, k);
                    total += w1.min(w2);
                });
                total
            }
            TriadWeighting::Geometric { alpha } => {
                geometric_weight(self.partner_count(state, sender, receiver), alpha)
            }
        };
        Ok(value)
    }

    fn default_name(&self) -> String {
        match self.weighting {
            TriadWeighting::Unweighted => self.kind.label().to_string(),
            TriadWeighting::Weighted => format!("weighted_{}", self.kind.label()),
            TriadWeighting::Geometric { alpha } => format!("gw_{}_{alpha}", self.kind.label()),
        }
    }
}
