//! State-to-state transition matrix over the full round history.
//!
//! The transition of interest is the inter-round carry-over: for each
//! consecutive pair of rounds, the source is the earlier round's `state2`
//! and the destination is the later round's `state1`. The intra-round
//! state1→state2 move is deliberately not counted.

use serde::Serialize;

use crate::round::{Round, State};

/// Per-destination-state transition percentages for a single source state.
///
/// Each cell is rounded independently to the nearest integer percent; a row
/// may sum to 99 or 101 and is not re-normalized.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub struct StatePercents {
    pub low: u32,
    pub mid: u32,
    pub high: u32,
    pub extreme: u32,
}

impl StatePercents {
    /// Percentage for one destination state; 0 for `Unknown`.
    pub fn get(&self, state: State) -> u32 {
        match state {
            State::Low => self.low,
            State::Mid => self.mid,
            State::High => self.high,
            State::Extreme => self.extreme,
            State::Unknown => 0,
        }
    }
}

/// 4×4 count matrix of observed state transitions, indexed by the four
/// in-range states in band order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TransitionMatrix {
    counts: [[u32; 4]; 4],
}

impl TransitionMatrix {
    /// Observed transition count from one state to another; 0 for `Unknown`.
    pub fn count(&self, from: State, to: State) -> u32 {
        match (from.index(), to.index()) {
            (Some(i), Some(j)) => self.counts[i][j],
            _ => 0,
        }
    }

    /// Total observed transitions leaving `from`.
    pub fn row_total(&self, from: State) -> u32 {
        from.index()
            .map(|i| self.counts[i].iter().sum())
            .unwrap_or(0)
    }

    /// Transition probability distribution out of `from`, as rounded
    /// integer percentages. `None` when no transition from `from` was ever
    /// observed (or `from` is `Unknown`).
    pub fn probabilities(&self, from: State) -> Option<StatePercents> {
        let i = from.index()?;
        let total: u32 = self.counts[i].iter().sum();
        if total == 0 {
            return None;
        }
        let pct = |j: usize| {
            (100.0 * f64::from(self.counts[i][j]) / f64::from(total)).round() as u32
        };
        Some(StatePercents {
            low: pct(0),
            mid: pct(1),
            high: pct(2),
            extreme: pct(3),
        })
    }
}

/// Build the transition count matrix from the entire ordered log.
///
/// Requires at least two rounds; returns `None` otherwise. Transitions
/// touching an `Unknown` state are skipped (they cannot occur for
/// range-validated input).
pub fn build_matrix(rounds: &[Round]) -> Option<TransitionMatrix> {
    if rounds.len() < 2 {
        return None;
    }
    let mut counts = [[0u32; 4]; 4];
    for pair in rounds.windows(2) {
        if let (Some(from), Some(to)) = (pair[0].state2.index(), pair[1].state1.index()) {
            counts[from][to] += 1;
        }
    }
    Some(TransitionMatrix { counts })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::round::Round;

    fn rounds(pairs: &[(u8, u8)]) -> Vec<Round> {
        pairs
            .iter()
            .enumerate()
            .map(|(i, &(r1, r2))| Round::new(i as u64 + 1, 0, r1, r2))
            .collect()
    }

    #[test]
    fn test_matrix_requires_two_rounds() {
        assert!(build_matrix(&[]).is_none());
        assert!(build_matrix(&rounds(&[(10, 10)])).is_none());
    }

    #[test]
    fn test_matrix_counts_state2_to_state1() {
        // state2 sequence: LOW, HIGH, HIGH; state1 sequence: LOW, MID, HIGH.
        // Two transitions: LOW→MID and HIGH→HIGH.
        let log = rounds(&[(10, 10), (20, 35), (40, 40)]);
        let m = build_matrix(&log).unwrap();

        assert_eq!(m.count(State::Low, State::Mid), 1);
        assert_eq!(m.count(State::High, State::High), 1);

        let mut total = 0;
        for from in State::ALL {
            for to in State::ALL {
                total += m.count(from, to);
            }
        }
        assert_eq!(total, 2);
    }

    #[test]
    fn test_probabilities_round_independently() {
        // LOW→LOW once, LOW→MID three times: 25% / 75%.
        let log = rounds(&[
            (10, 10),
            (10, 10), // LOW→LOW
            (20, 10), // LOW→MID
            (20, 10), // LOW→MID
            (20, 10), // LOW→MID
        ]);
        let m = build_matrix(&log).unwrap();
        let p = m.probabilities(State::Low).unwrap();
        assert_eq!(p.low, 25);
        assert_eq!(p.mid, 75);
        assert_eq!(p.high, 0);
        assert_eq!(p.extreme, 0);
    }

    #[test]
    fn test_probabilities_may_not_sum_to_100() {
        // Three equally likely destinations: 33/33/33 sums to 99 and stays so.
        let log = rounds(&[
            (10, 10),
            (10, 10), // LOW→LOW
            (20, 10), // LOW→MID
            (35, 10), // LOW→HIGH
        ]);
        let m = build_matrix(&log).unwrap();
        let p = m.probabilities(State::Low).unwrap();
        assert_eq!((p.low, p.mid, p.high, p.extreme), (33, 33, 33, 0));
        assert_eq!(p.low + p.mid + p.high + p.extreme, 99);
    }

    #[test]
    fn test_probabilities_empty_row_is_none() {
        let log = rounds(&[(10, 10), (10, 10)]);
        let m = build_matrix(&log).unwrap();
        assert!(m.probabilities(State::Extreme).is_none());
        assert!(m.probabilities(State::Unknown).is_none());
    }

    #[test]
    fn test_row_total() {
        let log = rounds(&[(10, 10), (20, 10), (35, 10)]);
        let m = build_matrix(&log).unwrap();
        assert_eq!(m.row_total(State::Low), 2);
        assert_eq!(m.row_total(State::Extreme), 0);
    }
}
