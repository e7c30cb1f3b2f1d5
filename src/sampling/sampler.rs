//! sampling::sampler — case-control sampling over a replayed event log.
//!
//! Purpose
//! -------
//! Turn an event log into a stratified dataset for the conditional-logit
//! estimator. Every observed event (the case) is paired with up to `N`
//! sampled non-events (controls) from the same risk set, and all of them are
//! evaluated against the same network state.
//!
//! Key behaviors
//! -------------
//! - For event `i` in `[start, end)`:
//!   1. advance the state to the event time (decay applies) without
//!      recording the event;
//!   2. compute the case features on that pre-event state;
//!   3. draw ordered pairs uniformly from `universe × universe`, rejecting
//!      self-loops (if configured), the case dyad and duplicates, until `N`
//!      controls are accepted or `attempt_factor × N` draws were rejected;
//!   4. compute control features on the same pre-event state;
//!   5. record the event.
//! - Events before `start` are recorded as warm-up history only.
//! - With self-loops excluded, a self-loop event in range is recorded as
//!   history without producing a stratum and counted in
//!   `SampledData::n_skipped_self_loops`.
//! - Strata that fall short of `N` controls are kept, flagged in their
//!   [`StratumSummary`] and logged at `warn` level.
//!
//! Invariants & assumptions
//! ------------------------
//! - A stratum never sees its own case event or any later event.
//! - Each stratum has exactly one case row, at most `N` distinct controls,
//!   none equal to the case dyad, and no self-loops when excluded.
//! - Sampling is deterministic given the seed, the log and the options.
use crate::events::{
    event::{ActorId, Dyad},
    log::EventLog,
    time::EventTime,
};
use crate::network::state::NetworkState;
use crate::sampling::{
    errors::{SamplingError, SamplingResult},
    observation::{Observation, SampledData, StratumSummary},
    options::SamplerOptions,
};
use crate::statistics::statistic::{Statistic, compute_all, names};
use rand::{Rng, SeedableRng, rngs::StdRng};
use std::collections::HashSet;

/// CaseControlSampler — configured statistics plus sampling options.
#[derive(Debug, Clone)]
pub struct CaseControlSampler {
    statistics: Vec<Statistic>,
    options: SamplerOptions,
}

impl CaseControlSampler {
    /// # Errors
    /// - [`SamplingError::EmptyStatistics`] for an empty statistic list.
    /// - Any option validation error.
    pub fn new(statistics: Vec<Statistic>, options: SamplerOptions) -> SamplingResult<Self> {
        if statistics.is_empty() {
            return Err(SamplingError::EmptyStatistics);
        }
        options.validate()?;
        Ok(CaseControlSampler { statistics, options })
    }

    pub fn statistics(&self) -> &[Statistic] {
        &self.statistics
    }

    pub fn options(&self) -> &SamplerOptions {
        &self.options
    }

    /// Sample the whole log.
    ///
    /// # Errors
    /// - [`SamplingError::EmptyRiskSet`] if the actor universe is empty.
    /// - [`SamplingError::InvalidRange`] if `start` exceeds the clamped end.
    /// - Replay or statistic errors from the lower layers.
    pub fn sample<T: EventTime>(&self, log: &EventLog<T>) -> SamplingResult<SampledData> {
        let universe = self.universe(log)?;
        let start = self.options.start.unwrap_or(0);
        let end = self.options.end.map_or(log.len(), |end| end.min(log.len()));
        if start > end {
            return Err(SamplingError::InvalidRange { start, end });
        }

        tracing::debug!(
            events = log.len(),
            strata = end - start,
            universe = universe.len(),
            n_controls = self.options.n_controls,
            "starting case-control sampling"
        );

        let mut rng = StdRng::seed_from_u64(self.options.seed);
        let mut state = NetworkState::new(self.options.decay_rate)?;
        let mut observations = Vec::with_capacity((end - start) * (self.options.n_controls + 1));
        let mut strata = Vec::with_capacity(end - start);
        let mut n_skipped_self_loops = 0usize;

        for (index, event) in log.iter().enumerate().take(end) {
            if index < start {
                state.record(event)?;
                continue;
            }
            let case = event.dyad();
            if self.options.exclude_self_loops && case.0 == case.1 {
                tracing::debug!(stratum = index, actor = case.0, "skipping self-loop event");
                n_skipped_self_loops += 1;
                state.record(event)?;
                continue;
            }
            state.advance(event.time())?;

            observations.push(Observation {
                stratum: index,
                sender: case.0,
                receiver: case.1,
                features: compute_all(&self.statistics, &state, case.0, case.1)?,
                is_case: true,
            });

            let controls = self.draw_controls(&mut rng, &universe, case);
            for &(s, r) in &controls {
                observations.push(Observation {
                    stratum: index,
                    sender: s,
                    receiver: r,
                    features: compute_all(&self.statistics, &state, s, r)?,
                    is_case: false,
                });
            }

            let summary = StratumSummary {
                stratum: index,
                requested: self.options.n_controls,
                achieved: controls.len(),
                exhausted: controls.len() < self.options.n_controls,
            };
            if summary.exhausted {
                tracing::warn!(
                    stratum = index,
                    requested = summary.requested,
                    achieved = summary.achieved,
                    "control sampling exhausted its rejection budget"
                );
            }
            strata.push(summary);

            state.record(event)?;
        }

        let data = SampledData {
            observations,
            statistic_names: names(&self.statistics),
            strata,
            n_events: log.len(),
            n_skipped_self_loops,
        };
        tracing::debug!(
            observations = data.n_observations(),
            strata = data.n_strata(),
            exhausted = data.n_exhausted(),
            skipped_self_loops = data.n_skipped_self_loops,
            "finished case-control sampling"
        );
        Ok(data)
    }

    fn universe<T: EventTime>(&self, log: &EventLog<T>) -> SamplingResult<Vec<ActorId>> {
        let universe: Vec<ActorId> = match &self.options.actors {
            Some(actors) => actors.clone(),
            None => log.actors().iter().copied().collect(),
        };
        if universe.is_empty() {
            return Err(SamplingError::EmptyRiskSet);
        }
        Ok(universe)
    }

    /// Draw up to `n_controls` distinct eligible pairs.
    fn draw_controls(&self, rng: &mut StdRng, universe: &[ActorId], case: Dyad) -> Vec<Dyad> {
        let wanted = self.options.n_controls;
        let budget = self.options.rejection_budget();
        let mut chosen = Vec::with_capacity(wanted);
        let mut seen: HashSet<Dyad> = HashSet::with_capacity(wanted);
        let mut rejected = 0usize;

        while chosen.len() < wanted && rejected < budget {
            let s = universe[rng.gen_range(0..universe.len())];
            let r = universe[rng.gen_range(0..universe.len())];
            let pair = (s, r);
            if (self.options.exclude_self_loops && s == r) || pair == case || !seen.insert(pair) {
                rejected += 1;
                continue;
            }
            chosen.push(pair);
        }
        chosen
    }
}
