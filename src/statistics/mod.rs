//! statistics — catalog of relational-event statistics.
//!
//! Purpose
//! -------
//! Provide the feature computations of the model: pure functions of the
//! network state and a focal dyad, grouped into five families.
//!
//! Key behaviors
//! -------------
//! - Dyad history ([`dyad`]): repetition, reciprocity, inertia, recency.
//! - Degree ([`degree`]): in/out/total degree of either focal actor,
//!   differences, `log1p` damping.
//! - Triadic closure ([`triadic`]): transitive, cyclic, shared sender,
//!   shared receiver; unweighted, min-edge weighted or geometrically
//!   weighted.
//! - Four-cycle ([`four_cycle`]): paths through two distinct intermediaries.
//! - Node attributes ([`attribute`]): homophily, combinations, numeric
//!   effects, categorical indicators.
//!
//! Invariants & assumptions
//! ------------------------
//! - Statistics never mutate the state; they read it as of its current
//!   time. The caller is responsible for advancing the state to the right
//!   moment (and not yet recording the focal event).
//! - Enumerated configuration is validated at construction or parse time,
//!   never at compute time.
//!
//! Downstream usage
//! ----------------
//! - The sampler evaluates a `&[Statistic]` for each case and control.
//! - [`evaluate_events`] evaluates the observed events only.

pub mod attribute;
pub mod degree;
pub mod dyad;
pub mod errors;
pub mod evaluate;
pub mod four_cycle;
pub mod statistic;
pub mod transforms;
pub mod triadic;

// ---- Re-exports (primary surface) -----------------------------------------

pub use self::attribute::{AttributeKind, AttributeTable, AttributeValue, NodeAttribute};
pub use self::degree::{Degree, DegreeDifference, DegreeDirection, Role};
pub use self::dyad::{DyadDirection, Inertia, Recency, Reciprocity, Repetition};
pub use self::errors::{StatError, StatResult};
pub use self::evaluate::{evaluate_dyads, evaluate_events};
pub use self::four_cycle::{FourCycle, FourCycleKind};
pub use self::statistic::{ComputeStatistic, Statistic, StatisticKind, compute_all};
pub use self::transforms::{RecencyTransform, geometric_weight};
pub use self::triadic::{TriadKind, TriadWeighting, TriadicClosure};

pub mod prelude {
    pub use super::attribute::{AttributeKind, AttributeTable, NodeAttribute};
    pub use super::degree::{Degree, DegreeDifference, DegreeDirection, Role};
    pub use super::dyad::{DyadDirection, Inertia, Recency, Reciprocity, Repetition};
    pub use super::errors::{StatError, StatResult};
    pub use super::four_cycle::{FourCycle, FourCycleKind};
    pub use super::statistic::{ComputeStatistic, Statistic};
    pub use super::transforms::RecencyTransform;
    pub use super::triadic::{TriadKind, TriadWeighting, TriadicClosure};
}
