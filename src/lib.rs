//! rust_relational_events — relational event modeling for timestamped
//! interaction data.
//!
//! Purpose
//! -------
//! Serve as the crate root for the relational-event pipeline: ingest a
//! time-ordered log of directed sender→receiver events, replay it against a
//! (optionally decayed) network state, compute endogenous and exogenous
//! statistics for the observed event and for sampled non-events, and fit a
//! stratified conditional-logit model by maximum partial likelihood.
//!
//! Key behaviors
//! -------------
//! - `events`: actors, events, timestamps and the validated, time-sorted
//!   [`EventLog`](events::EventLog).
//! - `network`: [`NetworkState`](network::NetworkState) with dyad counts,
//!   degrees, neighbor sets, last-event times and exponential decay.
//! - `statistics`: dyadic, degree, triadic, four-cycle and attribute
//!   statistics behind the [`Statistic`](statistics::Statistic) enum.
//! - `sampling`: the [`CaseControlSampler`](sampling::CaseControlSampler)
//!   that pairs each event with uniformly drawn non-event dyads.
//! - `optimization`: the generic MLE layer (Newton-Raphson and L-BFGS) and
//!   its numerical primitives.
//! - `inference`: standard errors, z-scores and normal p-values from the
//!   observed information.
//! - `model`: [`RemEstimator`](model::RemEstimator) and its
//!   [`FitResult`](model::FitResult).
//!
//! Invariants & assumptions
//! ------------------------
//! - Statistics for the event at time `t` only see events strictly before
//!   `t`; simultaneous events never inform each other.
//! - Each module reports its own error enum; degenerate numerics
//!   (singular information, exhausted control draws) are reported in data,
//!   not as errors.
//!
//! Conventions
//! -----------
//! - Progress and diagnostics are emitted as `tracing` events. The crate
//!   never installs a subscriber.
//! - Sampling is reproducible given `SamplerOptions::with_seed`.
//!
//! Downstream usage
//! ----------------
//! ```no_run
//! use rust_relational_events::prelude::*;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let log = EventLog::from_events(vec![
//!     Event::new(1, 2, 1.0),
//!     Event::new(2, 1, 2.0),
//!     Event::new(1, 2, 3.0),
//! ])?;
//! let sampler = CaseControlSampler::new(
//!     vec![Repetition::default().into(), Statistic::from(Reciprocity)],
//!     SamplerOptions::new(5)?.with_seed(7),
//! )?;
//! let sample = sampler.sample(&log)?;
//! let fit = RemEstimator::default().fit_sample(&sample)?;
//! println!("{:?} (converged: {})", fit.coefficients, fit.converged);
//! # Ok(())
//! # }
//! ```
//!
//! Testing notes
//! -------------
//! - Unit tests live next to each module; `tests/` holds the end-to-end
//!   pipeline tests (log → sample → fit).

pub mod events;
pub mod inference;
pub mod model;
pub mod network;
pub mod optimization;
pub mod sampling;
pub mod statistics;

pub mod prelude {
    pub use crate::events::prelude::*;
    pub use crate::inference::prelude::*;
    pub use crate::model::prelude::*;
    pub use crate::network::prelude::*;
    pub use crate::optimization::prelude::*;
    pub use crate::sampling::prelude::*;
    pub use crate::statistics::prelude::*;
}
