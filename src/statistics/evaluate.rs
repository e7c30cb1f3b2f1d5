//! statistics::evaluate — ad-hoc statistic evaluation without sampling.
//!
//! Replays a log and evaluates every statistic on each observed event
//! against the state as of just before that event, producing one row per
//! event. This is the case half of a case-control design and is useful for
//! descriptive analysis of the observed sequence.
use crate::events::{event::ActorId, log::EventLog, time::EventTime};
use crate::network::state::NetworkState;
use crate::statistics::{
    errors::StatResult,
    statistic::{Statistic, compute_all},
};
use ndarray::Array2;

/// Feature matrix of the observed events.
///
/// Parameters
/// ----------
/// - `log`: events to replay.
/// - `statistics`: one column per statistic.
/// - `decay_rate`: `λ >= 0` for the replayed state.
///
/// Returns
/// -------
/// `StatResult<Array2<f64>>` of shape `(log.len(), statistics.len())`; row
/// `i` holds the statistics of event `i` on the pre-event state.
pub fn evaluate_events<T: EventTime>(
    log: &EventLog<T>, statistics: &[Statistic], decay_rate: f64,
) -> StatResult<Array2<f64>> {
    let mut state = NetworkState::new(decay_rate)?;
    let mut out = Array2::zeros((log.len(), statistics.len()));
    for (i, event) in log.iter().enumerate() {
        state.advance(event.time())?;
        let (s, r) = event.dyad();
        for (j, stat) in statistics.iter().enumerate() {
            out[[i, j]] = stat.compute(&state, s, r)?;
        }
        state.record(event)?;
    }
    Ok(out)
}

/// Feature matrix of arbitrary dyads against one state.
pub fn evaluate_dyads<T: EventTime>(
    state: &NetworkState<T>, statistics: &[Statistic], dyads: &[(ActorId, ActorId)],
) -> StatResult<Array2<f64>> {
    let mut out = Array2::zeros((dyads.len(), statistics.len()));
    for (i, &(s, r)) in dyads.iter().enumerate() {
        let row = compute_all(statistics, state, s, r)?;
        for (j, value) in row.into_iter().enumerate() {
            out[[i, j]] = value;
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::event::Event;
    use crate::statistics::dyad::{Reciprocity, Repetition};

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Pre-event evaluation along a replayed log.
    // - Evaluation of arbitrary dyads against a fixed state.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Each row sees only the events before it.
    //
    // Given
    // -----
    // - Events 1→2 @1, 2→1 @2, 1→2 @3; repetition and reciprocity.
    //
    // Expect
    // ------
    // - Rows [0,0], [0,1], [1,1].
    fn rows_use_pre_event_state() {
        let log = EventLog::from_events(vec![
            Event::new(1, 2, 1.0),
            Event::new(2, 1, 2.0),
            Event::new(1, 2, 3.0),
        ])
        .unwrap();
        let stats = vec![Statistic::from(Repetition::default()), Statistic::from(Reciprocity)];

        let x = evaluate_events(&log, &stats, 0.0).unwrap();

        assert_eq!(x.shape(), &[3, 2]);
        assert_eq!(x.row(0).to_vec(), vec![0.0, 0.0]);
        assert_eq!(x.row(1).to_vec(), vec![0.0, 1.0]);
        assert_eq!(x.row(2).to_vec(), vec![1.0, 1.0]);
    }

    #[test]
    // Purpose
    // -------
    // Arbitrary dyads are evaluated against the same state.
    //
    // Given
    // -----
    // - A state holding 1→2 twice; dyads (1,2), (2,1), (3,4).
    //
    // Expect
    // ------
    // - Repetition column [2, 0, 0]; reciprocity column [0, 2, 0].
    fn dyads_share_one_state() {
        let mut state = NetworkState::without_decay();
        state.record(&Event::new(1, 2, 0.0)).unwrap();
        state.record(&Event::new(1, 2, 1.0)).unwrap();
        let stats = vec![Statistic::from(Repetition::default()), Statistic::from(Reciprocity)];

        let x = evaluate_dyads(&state, &stats, &[(1, 2), (2, 1), (3, 4)]).unwrap();

        assert_eq!(x.column(0).to_vec(), vec![2.0, 0.0, 0.0]);
        assert_eq!(x.column(1).to_vec(), vec![0.0, 2.0, 0.0]);
    }
}
