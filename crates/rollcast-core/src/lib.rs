//! # rollcast-core
//!
//! **Track paired dice rolls, forecast the next round.**
//!
//! `rollcast-core` records game rounds — one pair of rolls in [6, 54] each —
//! classifies them into state buckets and a binary KECIL/BESAR outcome, and
//! produces a heuristic forecast of the next round's outcome from recent
//! history.
//!
//! ## Quick Start
//!
//! ```
//! use rollcast_core::RoundLog;
//!
//! let mut log = RoundLog::new();
//! for (roll1, roll2) in [(12, 30), (28, 15), (9, 22), (31, 18), (14, 26)] {
//!     log.append(roll1, roll2).unwrap();
//! }
//!
//! let forecast = log.predict().unwrap();
//! assert_eq!(forecast.kecil_percent + forecast.besar_percent, 100);
//! ```
//!
//! ## Architecture
//!
//! Input pairs → classified round records (append-only log) → analytics →
//! forecast
//!
//! Four signals feed the forecast:
//! - **Trend**: direction counts over the recent window (last 20 rounds).
//! - **State dominance**: per-state tallies of the second roll over the same
//!   window.
//! - **Transitions**: a Markov-style count matrix of state carry-over across
//!   consecutive rounds, built from the full history.
//! - **Center distance**: how far the full-history roll2 average sits from
//!   the range midpoint.
//!
//! Every query is a pure recomputation over the in-memory log; there is no
//! cached analytics state to drift. The forecast is a weighted heuristic,
//! not a calibrated probability estimate.

pub mod log;
pub mod predict;
pub mod round;
pub mod store;
pub mod transition;
pub mod trend;
pub mod window;

pub use crate::log::{RollRangeError, RoundLog};
pub use predict::{Forecast, MIN_PREDICT_ROUNDS, PredictError, Reasoning, predict};
pub use round::{
    Outcome, ROLL_MAX, ROLL_MIN, Round, State, Trend, TrendDirection, classify_outcome,
    classify_state, compute_trend,
};
pub use store::{LogMeta, LogStore};
pub use transition::{StatePercents, TransitionMatrix, build_matrix};
pub use trend::{TrendAggregate, aggregate_trend};
pub use window::{
    DEFAULT_WINDOW, OutcomeFrequency, StateCounts, last_state, outcome_frequency, recent_window,
    state_dominance,
};

/// Library version (from Cargo.toml).
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
