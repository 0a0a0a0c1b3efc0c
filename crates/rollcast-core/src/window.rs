//! Recent-window aggregation: outcome frequency and state dominance.
//!
//! The window is the trailing N rounds of the log (default 20), oldest
//! first. It feeds the trend and dominance signals of the forecast; the
//! transition matrix and the roll2 average deliberately use the full log
//! instead.

use serde::Serialize;

use crate::round::{Outcome, Round, State};

/// Default recent-window length in rounds.
pub const DEFAULT_WINDOW: usize = 20;

/// The trailing `n` rounds of the log, oldest first. The whole log when it
/// is shorter than `n`.
pub fn recent_window(rounds: &[Round], n: usize) -> &[Round] {
    &rounds[rounds.len().saturating_sub(n)..]
}

/// KECIL/BESAR tallies over a window. Zero-filled on empty input.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub struct OutcomeFrequency {
    pub kecil: u32,
    pub besar: u32,
}

/// Per-state tallies over a window, one field per in-range state.
///
/// Always zero-filled with every key present, including on an empty window.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub struct StateCounts {
    pub low: u32,
    pub mid: u32,
    pub high: u32,
    pub extreme: u32,
}

impl StateCounts {
    /// Count for one state; 0 for `Unknown`.
    pub fn get(&self, state: State) -> u32 {
        match state {
            State::Low => self.low,
            State::Mid => self.mid,
            State::High => self.high,
            State::Extreme => self.extreme,
            State::Unknown => 0,
        }
    }

    /// Sum of all four state counts.
    pub fn total(&self) -> u32 {
        self.low + self.mid + self.high + self.extreme
    }

    fn bump(&mut self, state: State) {
        match state {
            State::Low => self.low += 1,
            State::Mid => self.mid += 1,
            State::High => self.high += 1,
            State::Extreme => self.extreme += 1,
            State::Unknown => {}
        }
    }
}

/// Tally each round's precomputed binary outcome.
pub fn outcome_frequency(window: &[Round]) -> OutcomeFrequency {
    let mut freq = OutcomeFrequency::default();
    for round in window {
        match round.outcome {
            Outcome::Kecil => freq.kecil += 1,
            Outcome::Besar => freq.besar += 1,
        }
    }
    freq
}

/// Tally each round's `state2` — the second roll's bucket only.
pub fn state_dominance(window: &[Round]) -> StateCounts {
    let mut counts = StateCounts::default();
    for round in window {
        counts.bump(round.state2);
    }
    counts
}

/// `state2` of the most recently appended round, `None` on an empty log.
pub fn last_state(rounds: &[Round]) -> Option<State> {
    rounds.last().map(|r| r.state2)
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
    fn test_recent_window_short_log() {
        let log = rounds(&[(10, 10), (20, 20), (35, 35)]);
        assert_eq!(recent_window(&log, 20).len(), 3);
    }

    #[test]
    fn test_recent_window_trims_oldest_first() {
        let log: Vec<Round> = (0..25).map(|i| Round::new(i + 1, 0, 10, 10)).collect();
        let window = recent_window(&log, 20);
        assert_eq!(window.len(), 20);
        assert_eq!(window[0].id, 6);
        assert_eq!(window[19].id, 25);
    }

    #[test]
    fn test_outcome_frequency_empty_is_zeroed() {
        let freq = outcome_frequency(&[]);
        assert_eq!(freq, OutcomeFrequency { kecil: 0, besar: 0 });
    }

    #[test]
    fn test_outcome_frequency_counts() {
        let log = rounds(&[(10, 10), (10, 31), (10, 32), (10, 54)]);
        let freq = outcome_frequency(&log);
        assert_eq!(freq.kecil, 2);
        assert_eq!(freq.besar, 2);
    }

    #[test]
    fn test_state_dominance_uses_state2_only() {
        // state1 values are all LOW; only state2 should be tallied.
        let log = rounds(&[(10, 10), (10, 25), (10, 40), (10, 50)]);
        let counts = state_dominance(&log);
        assert_eq!(counts.low, 1);
        assert_eq!(counts.mid, 1);
        assert_eq!(counts.high, 1);
        assert_eq!(counts.extreme, 1);
        assert_eq!(counts.total(), 4);
    }

    #[test]
    fn test_state_dominance_empty_is_zeroed() {
        // Uniform zero-filled convention; see DESIGN.md for the deviation note.
        assert_eq!(state_dominance(&[]), StateCounts::default());
    }

    #[test]
    fn test_last_state() {
        assert_eq!(last_state(&[]), None);
        let log = rounds(&[(10, 10), (10, 45)]);
        assert_eq!(last_state(&log), Some(State::Extreme));
    }
}
