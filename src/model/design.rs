//! model::design — validated, stratum-grouped design for conditional logit.
//!
//! Purpose
//! -------
//! Hold the feature matrix of a case-control sample grouped by stratum,
//! with the position of each stratum's case row, so that the likelihood
//! can iterate strata without re-grouping on every evaluation.
//!
//! Key behaviors
//! -------------
//! - [`StratifiedDesign::new`] validates shapes and finiteness, groups rows
//!   by stratum id (ascending), rejects strata with several cases and skips
//!   strata without one. Skipped strata are counted and logged at debug
//!   level.
//! - Strata consisting of the case alone are kept; they contribute zero to
//!   the log-likelihood and its derivatives.
//!
//! Invariants & assumptions
//! ------------------------
//! - Every kept stratum has exactly one case row and `case < rows.len()`.
//! - Row indices refer to the stored feature matrix, which keeps all input
//!   rows (including rows of skipped strata).
use crate::model::errors::{ModelError, ModelResult};
use crate::sampling::observation::{DesignParts, SampledData};
use ndarray::{Array2, ArrayView1};
use std::collections::BTreeMap;
use tracing::debug;

/// Rows of one stratum and the position of its case among them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stratum {
    pub id: usize,
    pub rows: Vec<usize>,
    /// Index into `rows` of the case row.
    pub case: usize,
}

impl Stratum {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn case_row(&self) -> usize {
        self.rows[self.case]
    }
}

/// StratifiedDesign — feature matrix grouped into case-bearing strata.
#[derive(Debug, Clone, PartialEq)]
pub struct StratifiedDesign {
    x: Array2<f64>,
    strata: Vec<Stratum>,
    n_skipped: usize,
}

impl StratifiedDesign {
    /// Validate and group a design.
    ///
    /// # Errors
    /// - [`ModelError::ShapeMismatch`] if lengths disagree.
    /// - [`ModelError::NonFiniteFeature`] for NaN or infinite features.
    /// - [`ModelError::MultipleCases`] if a stratum holds several cases.
    pub fn new(x: Array2<f64>, is_case: &[bool], strata: &[usize]) -> ModelResult<Self> {
        if x.nrows() != is_case.len() || x.nrows() != strata.len() {
            return Err(ModelError::ShapeMismatch {
                rows: x.nrows(),
                labels: is_case.len(),
                strata: strata.len(),
            });
        }
        if let Some(((row, col), &value)) = x.indexed_iter().find(|(_, v)| !v.is_finite()) {
            return Err(ModelError::NonFiniteFeature { row, col, value });
        }

        let mut groups: BTreeMap<usize, Vec<usize>> = BTreeMap::new();
        for (row, &id) in strata.iter().enumerate() {
            groups.entry(id).or_default().push(row);
        }

        let mut kept = Vec::with_capacity(groups.len());
        let mut n_skipped = 0;
        for (id, rows) in groups {
            let cases: Vec<usize> =
                rows.iter().enumerate().filter(|(_, &r)| is_case[r]).map(|(pos, _)| pos).collect();
            match cases.as_slice() {
                [] => {
                    debug!(stratum = id, rows = rows.len(), "skipping stratum without a case row");
                    n_skipped += 1;
                }
                [case] => kept.push(Stratum { id, rows, case: *case }),
                _ => return Err(ModelError::MultipleCases { stratum: id, count: cases.len() }),
            }
        }
        Ok(StratifiedDesign { x, strata: kept, n_skipped })
    }

    /// Design of a sampler output.
    pub fn from_sample(data: &SampledData) -> ModelResult<Self> {
        Self::from_parts(data.design())
    }

    pub fn from_parts(parts: DesignParts) -> ModelResult<Self> {
        Self::new(parts.x, &parts.is_case, &parts.strata)
    }

    pub fn n_features(&self) -> usize {
        self.x.ncols()
    }

    /// Strata with a case row.
    pub fn n_strata(&self) -> usize {
        self.strata.len()
    }

    /// Rows belonging to kept strata.
    pub fn n_observations(&self) -> usize {
        self.strata.iter().map(Stratum::len).sum()
    }

    pub fn n_skipped(&self) -> usize {
        self.n_skipped
    }

    pub fn strata(&self) -> &[Stratum] {
        &self.strata
    }

    pub fn x(&self) -> &Array2<f64> {
        &self.x
    }

    pub fn row(&self, row: usize) -> ArrayView1<'_, f64> {
        self.x.row(row)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Grouping, case positions and skip counting.
    // - Rejection of malformed designs.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Rows are grouped by stratum id and caseless strata are skipped.
    //
    // Given
    // -----
    // - Stratum 7 (control, case), stratum 2 (case, control), stratum 5
    //   (control only), interleaved.
    //
    // Expect
    // ------
    // - Kept strata [2, 7] in that order with case positions 0 and 1;
    //   one skipped stratum; 4 observations.
    fn groups_and_skips() {
        let x = array![[0.0], [1.0], [2.0], [3.0], [4.0]];
        let is_case = [false, true, false, true, false];
        let strata = [7, 2, 5, 7, 2];
        let design = StratifiedDesign::new(x, &is_case, &strata).unwrap();

        assert_eq!(design.n_strata(), 2);
        assert_eq!(design.n_skipped(), 1);
        assert_eq!(design.n_observations(), 4);
        let s = design.strata();
        assert_eq!((s[0].id, s[0].rows.clone(), s[0].case), (2, vec![1, 4], 0));
        assert_eq!((s[1].id, s[1].rows.clone(), s[1].case), (7, vec![0, 3], 1));
        assert_eq!(design.row(s[1].case_row())[0], 3.0);
    }

    #[test]
    // Purpose
    // -------
    // Malformed inputs are rejected before fitting.
    //
    // Given
    // -----
    // - Short labels, a NaN feature, a stratum with two cases.
    //
    // Expect
    // ------
    // - `ShapeMismatch`, `NonFiniteFeature`, `MultipleCases`.
    fn rejects_malformed() {
        let x = array![[0.0], [1.0]];
        assert!(matches!(
            StratifiedDesign::new(x.clone(), &[true], &[0, 0]),
            Err(ModelError::ShapeMismatch { .. })
        ));
        assert!(matches!(
            StratifiedDesign::new(array![[0.0], [f64::NAN]], &[true, false], &[0, 0]),
            Err(ModelError::NonFiniteFeature { row: 1, col: 0, .. })
        ));
        assert_eq!(
            StratifiedDesign::new(x, &[true, true], &[3, 3]),
            Err(ModelError::MultipleCases { stratum: 3, count: 2 })
        );
    }
}
