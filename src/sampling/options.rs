//! sampling::options — validated configuration for case-control sampling.
use crate::events::event::ActorId;
use crate::network::decay::halflife_to_decay;
use crate::sampling::errors::{SamplingError, SamplingResult};

/// Default number of controls drawn per case.
pub const DEFAULT_CONTROLS: usize = 10;

/// Default rejection budget multiplier: a stratum stops after
/// `attempt_factor × n_controls` rejected draws.
pub const DEFAULT_ATTEMPT_FACTOR: usize = 20;

/// SamplerOptions — configuration of [`CaseControlSampler`].
///
/// Fields
/// ------
/// - `n_controls`: controls requested per case (`> 0`).
/// - `exclude_self_loops`: reject `(a, a)` controls.
/// - `seed`: seed of the control-pair RNG; equal seeds give equal samples.
/// - `decay_rate`: `λ >= 0` of the replayed network state.
/// - `actors`: risk-set universe; `None` uses the log's actor set.
/// - `start`, `end`: half-open range of event indices that produce strata.
///   Earlier events are replayed as warm-up history; later ones are
///   ignored.
/// - `attempt_factor`: rejection budget multiplier (`> 0`).
///
/// [`CaseControlSampler`]: crate::sampling::sampler::CaseControlSampler
#[derive(Debug, Clone, PartialEq)]
pub struct SamplerOptions {
    pub n_controls: usize,
    pub exclude_self_loops: bool,
    pub seed: u64,
    pub decay_rate: f64,
    pub actors: Option<Vec<ActorId>>,
    pub start: Option<usize>,
    pub end: Option<usize>,
    pub attempt_factor: usize,
}

impl SamplerOptions {
    /// Options with `n_controls` controls per case and defaults elsewhere.
    ///
    /// # Errors
    /// [`SamplingError::InvalidControlCount`] if `n_controls == 0`.
    pub fn new(n_controls: usize) -> SamplingResult<Self> {
        if n_controls == 0 {
            return Err(SamplingError::InvalidControlCount { value: n_controls });
        }
        Ok(SamplerOptions { n_controls, ..SamplerOptions::default() })
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Keep `(a, a)` pairs as eligible controls.
    pub fn include_self_loops(mut self) -> Self {
        self.exclude_self_loops = false;
        self
    }

    pub fn with_decay_rate(mut self, decay_rate: f64) -> SamplingResult<Self> {
        if !decay_rate.is_finite() || decay_rate < 0.0 {
            return Err(SamplingError::InvalidDecayRate { value: decay_rate });
        }
        self.decay_rate = decay_rate;
        Ok(self)
    }

    /// Configure decay through a half-life in seconds.
    pub fn with_half_life(self, half_life: f64) -> SamplingResult<Self> {
        let decay_rate = halflife_to_decay(half_life)?;
        self.with_decay_rate(decay_rate)
    }

    /// Restrict the risk set to `actors` (deduplicated and sorted).
    pub fn with_actors(mut self, actors: impl IntoIterator<Item = ActorId>) -> Self {
        let mut actors: Vec<ActorId> = actors.into_iter().collect();
        actors.sort_unstable();
        actors.dedup();
        self.actors = Some(actors);
        self
    }

    /// Only events with index in `[start, end)` produce strata.
    pub fn with_range(mut self, start: Option<usize>, end: Option<usize>) -> SamplingResult<Self> {
        if let (Some(start), Some(end)) = (start, end) {
            if start > end {
                return Err(SamplingError::InvalidRange { start, end });
            }
        }
        self.start = start;
        self.end = end;
        Ok(self)
    }

    pub fn with_attempt_factor(mut self, attempt_factor: usize) -> SamplingResult<Self> {
        if attempt_factor == 0 {
            return Err(SamplingError::InvalidAttemptFactor { value: attempt_factor });
        }
        self.attempt_factor = attempt_factor;
        Ok(self)
    }

    /// Maximum rejected draws per stratum.
    pub fn rejection_budget(&self) -> usize {
        self.attempt_factor.saturating_mul(self.n_controls)
    }

    /// Re-check every field; used when options were built by struct literal.
    pub(crate) fn validate(&self) -> SamplingResult<()> {
        if self.n_controls == 0 {
            return Err(SamplingError::InvalidControlCount { value: self.n_controls });
        }
        if !self.decay_rate.is_finite() || self.decay_rate < 0.0 {
            return Err(SamplingError::InvalidDecayRate { value: self.decay_rate });
        }
        if self.attempt_factor == 0 {
            return Err(SamplingError::InvalidAttemptFactor { value: self.attempt_factor });
        }
        if let (Some(start), Some(end)) = (self.start, self.end) {
            if start > end {
                return Err(SamplingError::InvalidRange { start, end });
            }
        }
        Ok(())
    }
}

impl Default for SamplerOptions {
    fn default() -> Self {
        SamplerOptions {
            n_controls: DEFAULT_CONTROLS,
            exclude_self_loops: true,
            seed: 0,
            decay_rate: 0.0,
            actors: None,
            start: None,
            end: None,
            attempt_factor: DEFAULT_ATTEMPT_FACTOR,
        }
    }
}
