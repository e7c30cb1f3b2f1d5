//! sampling — case-control sampling of relational events.
//!
//! Purpose
//! -------
//! Build the stratified dataset that the conditional-logit estimator fits:
//! each observed event becomes a stratum holding the event itself (the
//! case) and a sample of dyads that could have occurred instead (controls).
//!
//! Key behaviors
//! -------------
//! - [`CaseControlSampler`] replays the log once, evaluating case and
//!   controls on the state as of just before each event.
//! - [`SamplerOptions`] configures the control count, self-loop policy,
//!   seed, decay, risk-set universe, event range and rejection budget.
//! - Under-delivered strata are reported through [`StratumSummary`] and
//!   [`SampledData::n_exhausted`], never silently.
//!
//! Downstream usage
//! ----------------
//! - `RemEstimator::fit_sample` consumes [`SampledData`] directly; external
//!   writers use [`SampledData::header`] and [`SampledData::to_rows`].

pub mod errors;
pub mod observation;
pub mod options;
pub mod sampler;

// ---- Re-exports (primary surface) -----------------------------------------

pub use self::errors::{SamplingError, SamplingResult};
pub use self::observation::{DesignParts, Observation, SampledData, StratumSummary};
pub use self::options::{DEFAULT_ATTEMPT_FACTOR, DEFAULT_CONTROLS, SamplerOptions};
pub use self::sampler::CaseControlSampler;

pub mod prelude {
    pub use super::errors::{SamplingError, SamplingResult};
    pub use super::observation::{SampledData, StratumSummary};
    pub use super::options::SamplerOptions;
    pub use super::sampler::CaseControlSampler;
}
