//! The append-only round log and its analytics facade.
//!
//! A `RoundLog` owns the ordered history: insertion order is chronological
//! order and is the only order the analytics ever use. Rounds are never
//! edited or removed individually; the single destructive operation wipes
//! the whole log. Every query recomputes from the current slice, so repeated
//! calls between mutations return identical results.

use serde::{Deserialize, Serialize};

use crate::predict::{Forecast, PredictError, predict};
use crate::round::{ROLL_MAX, ROLL_MIN, Round, State, TrendDirection};
use crate::transition::{StatePercents, TransitionMatrix, build_matrix};
use crate::trend::{TrendAggregate, aggregate_trend};
use crate::window::{
    DEFAULT_WINDOW, OutcomeFrequency, StateCounts, last_state, outcome_frequency, recent_window,
    state_dominance,
};

/// A roll outside the valid [6, 54] range was rejected at the log boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RollRangeError(pub u8);

impl std::fmt::Display for RollRangeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "roll {} outside the valid range {ROLL_MIN}-{ROLL_MAX}",
            self.0
        )
    }
}

impl std::error::Error for RollRangeError {}

/// The ordered, append-only game log.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoundLog {
    rounds: Vec<Round>,
    #[serde(skip, default = "default_window")]
    window: usize,
}

fn default_window() -> usize {
    DEFAULT_WINDOW
}

impl Default for RoundLog {
    fn default() -> Self {
        Self::new()
    }
}

impl RoundLog {
    /// Empty log with the default recent-window length.
    pub fn new() -> Self {
        Self::with_window(DEFAULT_WINDOW)
    }

    /// Empty log with a custom recent-window length.
    pub fn with_window(window: usize) -> Self {
        RoundLog {
            rounds: Vec::new(),
            window,
        }
    }

    /// Rebuild a log from previously persisted rounds (stored order kept).
    pub fn from_rounds(rounds: Vec<Round>) -> Self {
        RoundLog {
            rounds,
            window: DEFAULT_WINDOW,
        }
    }

    /// Full ordered history, oldest first.
    pub fn rounds(&self) -> &[Round] {
        &self.rounds
    }

    pub fn len(&self) -> usize {
        self.rounds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rounds.is_empty()
    }

    /// Recent-window length used by the window-based queries.
    pub fn window(&self) -> usize {
        self.window
    }

    /// Validate a pair of rolls, derive the full round record, and append
    /// it. The record is constructed completely before insertion; readers
    /// never observe a partial round.
    pub fn append(&mut self, roll1: u8, roll2: u8) -> Result<Round, RollRangeError> {
        for roll in [roll1, roll2] {
            if !(ROLL_MIN..=ROLL_MAX).contains(&roll) {
                return Err(RollRangeError(roll));
            }
        }

        let timestamp = now_ms();
        // Timestamp-based ids, forced strictly monotonic even when two
        // rounds land within the same millisecond.
        let id = match self.rounds.last() {
            Some(prev) => timestamp.max(prev.id + 1),
            None => timestamp,
        };

        let round = Round::new(id, timestamp, roll1, roll2);
        log::debug!(
            "append round id={} rolls=({}, {}) outcome={}",
            round.id,
            roll1,
            roll2,
            round.outcome
        );
        self.rounds.push(round);
        Ok(round)
    }

    /// Empty the entire log. The only destructive operation.
    pub fn clear(&mut self) {
        log::info!("clearing round log ({} rounds)", self.rounds.len());
        self.rounds.clear();
    }

    // -----------------------------------------------------------------------
    // Analytics facade — pure recomputation over the current history
    // -----------------------------------------------------------------------

    /// The trailing window of rounds, oldest first.
    pub fn recent(&self) -> &[Round] {
        recent_window(&self.rounds, self.window)
    }

    /// Trend direction counts over the recent window.
    pub fn trend_aggregate(&self) -> Option<TrendAggregate> {
        aggregate_trend(self.recent())
    }

    /// Strictly dominant trend direction over the recent window.
    pub fn dominant_trend(&self) -> Option<TrendDirection> {
        self.trend_aggregate().map(|agg| agg.dominant())
    }

    /// Transition count matrix over the full history.
    pub fn transition_matrix(&self) -> Option<TransitionMatrix> {
        build_matrix(&self.rounds)
    }

    /// Transition percentages out of `from`, over the full history.
    pub fn transition_probability(&self, from: State) -> Option<StatePercents> {
        self.transition_matrix()
            .and_then(|m| m.probabilities(from))
    }

    /// KECIL/BESAR tallies over the recent window.
    pub fn outcome_frequency(&self) -> OutcomeFrequency {
        outcome_frequency(self.recent())
    }

    /// Per-state `state2` tallies over the recent window.
    pub fn state_dominance(&self) -> StateCounts {
        state_dominance(self.recent())
    }

    /// `state2` of the most recent round.
    pub fn last_state(&self) -> Option<State> {
        last_state(&self.rounds)
    }

    /// Forecast the next round's outcome.
    pub fn predict(&self) -> Result<Forecast, PredictError> {
        predict(&self.rounds, self.window)
    }
}

fn now_ms() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::round::Outcome;

    fn filled(pairs: &[(u8, u8)]) -> RoundLog {
        let mut log = RoundLog::new();
        for &(r1, r2) in pairs {
            log.append(r1, r2).unwrap();
        }
        log
    }

    #[test]
    fn test_append_rejects_out_of_range() {
        let mut log = RoundLog::new();
        assert_eq!(log.append(5, 20), Err(RollRangeError(5)));
        assert_eq!(log.append(20, 55), Err(RollRangeError(55)));
        assert!(log.is_empty());
    }

    #[test]
    fn test_append_accepts_range_edges() {
        let mut log = RoundLog::new();
        assert!(log.append(6, 54).is_ok());
        assert_eq!(log.len(), 1);
    }

    #[test]
    fn test_append_derives_fields() {
        let mut log = RoundLog::new();
        let round = log.append(12, 40).unwrap();
        assert_eq!(round.state1, State::Low);
        assert_eq!(round.state2, State::High);
        assert_eq!(round.outcome, Outcome::Besar);
    }

    #[test]
    fn test_ids_strictly_increase() {
        let mut log = RoundLog::new();
        let mut prev = 0u64;
        for _ in 0..50 {
            let round = log.append(10, 10).unwrap();
            assert!(round.id > prev);
            prev = round.id;
        }
    }

    #[test]
    fn test_clear_empties_log() {
        let mut log = filled(&[(10, 10), (20, 20)]);
        log.clear();
        assert!(log.is_empty());
        assert_eq!(log.last_state(), None);
        assert_eq!(log.trend_aggregate(), None);
    }

    #[test]
    fn test_facade_matches_free_functions() {
        let log = filled(&[(10, 40), (20, 30), (15, 25), (40, 12), (30, 18)]);
        assert_eq!(
            log.trend_aggregate(),
            aggregate_trend(log.recent())
        );
        assert_eq!(log.state_dominance(), state_dominance(log.recent()));
        assert_eq!(log.last_state(), Some(State::Low));
        assert!(log.transition_matrix().is_some());
    }

    #[test]
    fn test_queries_idempotent_between_mutations() {
        let log = filled(&[(10, 40), (20, 30), (15, 25), (40, 12), (30, 18)]);
        let first = log.predict().unwrap();
        let second = log.predict().unwrap();
        assert_eq!(first.kecil_percent, second.kecil_percent);
        assert_eq!(log.outcome_frequency(), log.outcome_frequency());
    }

    #[test]
    fn test_window_drops_oldest_round() {
        let mut log = filled(&[(50, 50)]);
        for _ in 0..20 {
            log.append(10, 10).unwrap();
        }
        // 21 rounds: the EXTREME opener falls out of the recent window...
        assert_eq!(log.state_dominance().extreme, 0);
        assert_eq!(log.outcome_frequency().besar, 0);
        // ...but the full-log transition matrix still counts it.
        let m = log.transition_matrix().unwrap();
        assert_eq!(m.count(State::Extreme, State::Low), 1);
    }

    #[test]
    fn test_custom_window_size() {
        let mut log = RoundLog::with_window(3);
        for &(r1, r2) in &[(10, 10), (10, 10), (45, 45), (45, 45), (45, 45)] {
            log.append(r1, r2).unwrap();
        }
        let counts = log.state_dominance();
        assert_eq!(counts.low, 0);
        assert_eq!(counts.extreme, 3);
    }

    #[test]
    fn test_roll_range_error_display() {
        let msg = RollRangeError(55).to_string();
        assert!(msg.contains("55"));
        assert!(msg.contains("6-54"));
    }
}
