//! sampling::observation — labeled rows produced by the sampler.
//!
//! Purpose
//! -------
//! Hold the stratified dataset: one case row and up to `N` control rows per
//! observed event, a per-stratum summary of how many controls were
//! delivered, and conversions to the estimator's design and to flat rows
//! for external writers.
//!
//! Invariants & assumptions
//! ------------------------
//! - Observations are grouped by stratum in increasing stratum order, the
//!   case row first.
//! - Every feature vector has `statistic_names.len()` entries.
//! - No row is a self-loop when self-loops are excluded; skipped
//!   self-loop events are counted in `n_skipped_self_loops`.
//! - `strata[i].achieved <= strata[i].requested`; `exhausted` is set exactly
//!   when `achieved < requested`.
use crate::events::event::ActorId;
use ndarray::Array2;

/// One labeled dyad of a stratum.
#[derive(Debug, Clone, PartialEq)]
pub struct Observation {
    /// Index of the case event in the log.
    pub stratum: usize,
    pub sender: ActorId,
    pub receiver: ActorId,
    pub features: Vec<f64>,
    pub is_case: bool,
}

/// Control delivery of one stratum.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StratumSummary {
    pub stratum: usize,
    pub requested: usize,
    pub achieved: usize,
    pub exhausted: bool,
}

/// Design-matrix view of a sample: features, case labels, stratum ids.
#[derive(Debug, Clone, PartialEq)]
pub struct DesignParts {
    pub x: Array2<f64>,
    pub is_case: Vec<bool>,
    pub strata: Vec<usize>,
}

/// SampledData — the output of a sampling run.
#[derive(Debug, Clone, PartialEq)]
pub struct SampledData {
    pub observations: Vec<Observation>,
    pub statistic_names: Vec<String>,
    pub strata: Vec<StratumSummary>,
    /// Events in the log, including warm-up and ignored tail events.
    pub n_events: usize,
    /// Self-loop events in range that produced no stratum because
    /// self-loops were excluded.
    pub n_skipped_self_loops: usize,
}

impl SampledData {
    pub fn n_observations(&self) -> usize {
        self.observations.len()
    }

    pub fn n_strata(&self) -> usize {
        self.strata.len()
    }

    /// Strata that received fewer controls than requested.
    pub fn n_exhausted(&self) -> usize {
        self.strata.iter().filter(|s| s.exhausted).count()
    }

    /// Observations of one stratum.
    pub fn stratum(&self, stratum: usize) -> impl Iterator<Item = &Observation> {
        self.observations.iter().filter(move |o| o.stratum == stratum)
    }

    /// Feature matrix (rows = observations), labels and stratum ids.
    pub fn design(&self) -> DesignParts {
        let p = self.statistic_names.len();
        let mut x = Array2::zeros((self.observations.len(), p));
        for (i, obs) in self.observations.iter().enumerate() {
            for (j, &value) in obs.features.iter().enumerate().take(p) {
                x[[i, j]] = value;
            }
        }
        DesignParts {
            x,
            is_case: self.observations.iter().map(|o| o.is_case).collect(),
            strata: self.observations.iter().map(|o| o.stratum).collect(),
        }
    }

    /// Column names matching [`SampledData::to_rows`].
    pub fn header(&self) -> Vec<String> {
        let mut header: Vec<String> =
            ["stratum", "sender", "receiver", "is_case"].iter().map(|s| s.to_string()).collect();
        header.extend(self.statistic_names.iter().cloned());
        header
    }

    /// Flat text rows: stratum, sender, receiver, case flag (0/1), then one
    /// value per statistic.
    ///
    /// Cells are rendered as text so that actor ids above 2^53 stay exact;
    /// feature values use the shortest representation that parses back to
    /// the same `f64`.
    pub fn to_rows(&self) -> Vec<Vec<String>> {
        self.observations
            .iter()
            .map(|o| {
                let mut row = Vec::with_capacity(4 + o.features.len());
                row.push(o.stratum.to_string());
                row.push(o.sender.to_string());
                row.push(o.receiver.to_string());
                row.push(if o.is_case { "1" } else { "0" }.to_string());
                row.extend(o.features.iter().map(f64::to_string));
                row
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Counting helpers, the design view and flat rows on a tiny sample.
    // -------------------------------------------------------------------------

    fn tiny() -> SampledData {
        let obs = |stratum, sender, receiver, x: f64, is_case| Observation {
            stratum,
            sender,
            receiver,
            features: vec![x],
            is_case,
        };
        SampledData {
            observations: vec![obs(0, 1, 2, 1.0, true), obs(0, 2, 3, 0.0, false), obs(1, 2, 1, 2.0, true)],
            statistic_names: vec!["repetition".into()],
            strata: vec![
                StratumSummary { stratum: 0, requested: 1, achieved: 1, exhausted: false },
                StratumSummary { stratum: 1, requested: 1, achieved: 0, exhausted: true },
            ],
            n_events: 2,
            n_skipped_self_loops: 0,
        }
    }

    #[test]
    // Purpose
    // -------
    // Summary counts and the design view agree with the observations.
    //
    // Given
    // -----
    // - Two strata, the second without controls.
    //
    // Expect
    // ------
    // - 3 observations, 2 strata, 1 exhausted; x column [1, 0, 2];
    //   labels [T, F, T]; strata [0, 0, 1].
    fn counts_and_design() {
        let data = tiny();
        let design = data.design();

        assert_eq!(data.n_observations(), 3);
        assert_eq!(data.n_strata(), 2);
        assert_eq!(data.n_exhausted(), 1);
        assert_eq!(data.stratum(0).count(), 2);
        assert_eq!(design.x.column(0).to_vec(), vec![1.0, 0.0, 2.0]);
        assert_eq!(design.is_case, vec![true, false, true]);
        assert_eq!(design.strata, vec![0, 0, 1]);
    }

    #[test]
    // Purpose
    // -------
    // Flat rows line up with the header.
    //
    // Given
    // -----
    // - The tiny sample.
    //
    // Expect
    // ------
    // - Header of 5 columns; second row ["0", "2", "3", "0", "0"].
    fn rows_match_header() {
        let data = tiny();
        let rows = data.to_rows();

        assert_eq!(data.header(), vec!["stratum", "sender", "receiver", "is_case", "repetition"]);
        assert_eq!(rows[1], vec!["0", "2", "3", "0", "0"]);
    }

    #[test]
    // Purpose
    // -------
    // Actor ids beyond f64 integer precision are written exactly.
    //
    // Given
    // -----
    // - A case row from actor 2^53 + 1 to `u64::MAX` with feature 0.1.
    //
    // Expect
    // ------
    // - Sender and receiver cells equal the decimal ids; the feature cell
    //   parses back to 0.1.
    fn rows_keep_large_actor_ids_exact() {
        let mut data = tiny();
        let big = (1u64 << 53) + 1;
        data.observations = vec![Observation {
            stratum: 0,
            sender: big,
            receiver: u64::MAX,
            features: vec![0.1],
            is_case: true,
        }];
        let rows = data.to_rows();

        assert_eq!(rows[0][1], "9007199254740993");
        assert_eq!(rows[0][2], u64::MAX.to_string());
        assert_eq!(rows[0][4].parse::<f64>().unwrap(), 0.1);
    }
}
