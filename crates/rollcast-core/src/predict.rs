//! Hybrid forecast of the next round's binary outcome.
//!
//! Four independently weighted signals accumulate into a KECIL score and a
//! BESAR score, which are then normalized into a percent split summing to
//! exactly 100:
//!
//! - recent trend direction counts (weight 0.25, inner lean 0.6)
//! - recent state dominance ratios (weight 0.30)
//! - transition probabilities out of the last observed state (weight 0.25)
//! - distance of the full-log roll2 average from the range center (0.20)
//!
//! The weights are fixed empirical constants, not fitted parameters. The
//! output is a heuristic, not a calibrated estimator.

use serde::Serialize;

use crate::round::{Round, State, TrendDirection};
use crate::transition::{StatePercents, build_matrix};
use crate::trend::{TrendAggregate, aggregate_trend};
use crate::window::{StateCounts, last_state, recent_window, state_dominance};

/// Minimum log length before a forecast is attempted.
pub const MIN_PREDICT_ROUNDS: usize = 5;

const TREND_WEIGHT: f64 = 0.25;
/// Confidence lean applied inside the trend component.
const TREND_LEAN: f64 = 0.6;
const DOMINANCE_WEIGHT: f64 = 0.30;
const TRANSITION_WEIGHT: f64 = 0.25;
const CENTER_WEIGHT: f64 = 0.20;
/// Center of the valid roll range used by the distance component.
const ROLL_CENTER: f64 = 30.0;
/// Largest possible distance of a valid average from the center.
const MAX_CENTER_DISTANCE: f64 = 24.0;

/// Why a forecast could not be produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PredictError {
    /// Not enough recorded rounds. The caller-facing "cannot predict" case.
    InsufficientData { have: usize, need: usize },
    /// Both accumulated scores were zero at normalization time. Cannot occur
    /// with the current weight constants; reported as an invariant violation
    /// rather than silently dividing by zero.
    DegenerateScore,
}

impl std::fmt::Display for PredictError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PredictError::InsufficientData { have, need } => write!(
                f,
                "not enough data: {have} round(s) recorded, {need} required"
            ),
            PredictError::DegenerateScore => {
                write!(f, "scoring invariant violated: total score is zero")
            }
        }
    }
}

impl std::error::Error for PredictError {}

/// Everything that went into a forecast, for explainability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Reasoning {
    /// Trend direction counts over the recent window.
    pub trend: TrendAggregate,
    pub dominant_trend: TrendDirection,
    /// Per-state `state2` tallies over the recent window.
    pub state_dominance: StateCounts,
    /// `state2` of the most recent round.
    pub last_state: Option<State>,
    /// Transition percentages out of `last_state`, when observed.
    pub transition: Option<StatePercents>,
    /// Mean of `roll2` over the entire log, rounded to the nearest integer.
    pub avg_roll2: i64,
}

/// A produced forecast. `kecil_percent + besar_percent == 100` always.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Forecast {
    pub kecil_percent: u32,
    pub besar_percent: u32,
    pub reasoning: Reasoning,
}

impl Forecast {
    /// The favored outcome label ("KECIL" or "BESAR"); BESAR on a 50/50 split.
    pub fn favored(&self) -> &'static str {
        if self.kecil_percent > self.besar_percent {
            "KECIL"
        } else {
            "BESAR"
        }
    }
}

/// Forecast the next round's outcome from the full ordered log.
///
/// `window_size` bounds the trend and dominance signals; the transition
/// matrix and the roll2 average always use the entire log.
pub fn predict(rounds: &[Round], window_size: usize) -> Result<Forecast, PredictError> {
    if rounds.len() < MIN_PREDICT_ROUNDS {
        return Err(PredictError::InsufficientData {
            have: rounds.len(),
            need: MIN_PREDICT_ROUNDS,
        });
    }

    let window = recent_window(rounds, window_size);
    // The window is non-empty here; the zero aggregate default is unreachable.
    let trend = aggregate_trend(window).unwrap_or_default();
    let dominance = state_dominance(window);
    let last = last_state(rounds);
    let transition =
        build_matrix(rounds).and_then(|m| last.and_then(|from| m.probabilities(from)));
    let avg_roll2 =
        rounds.iter().map(|r| f64::from(r.roll2)).sum::<f64>() / rounds.len() as f64;

    let mut kecil = 0.0_f64;
    let mut besar = 0.0_f64;

    // Trend: a strict down-majority leans KECIL, everything else leans BESAR.
    if trend.down > trend.up {
        kecil += TREND_WEIGHT * TREND_LEAN;
    } else {
        besar += TREND_WEIGHT * TREND_LEAN;
    }

    // State dominance: split by low/mid vs high/extreme share of the window.
    let dom_total = f64::from(dominance.total());
    if dom_total > 0.0 {
        kecil += DOMINANCE_WEIGHT * f64::from(dominance.low + dominance.mid) / dom_total;
        besar += DOMINANCE_WEIGHT * f64::from(dominance.high + dominance.extreme) / dom_total;
    }

    // Transitions out of the last state; contributes nothing when unobserved.
    if let Some(p) = transition {
        kecil += TRANSITION_WEIGHT * f64::from(p.low + p.mid) / 100.0;
        besar += TRANSITION_WEIGHT * f64::from(p.high + p.extreme) / 100.0;
    }

    // Distance from center. The factor is intentionally left unclamped; a
    // distance beyond MAX_CENTER_DISTANCE cannot arise from valid rolls.
    let distance = (avg_roll2 - ROLL_CENTER).abs();
    let center_factor = CENTER_WEIGHT * (1.0 - distance / MAX_CENTER_DISTANCE);
    if avg_roll2 < ROLL_CENTER {
        kecil += center_factor;
    } else {
        besar += center_factor;
    }

    let total = kecil + besar;
    if total == 0.0 {
        return Err(PredictError::DegenerateScore);
    }

    // Besar is the exact complement so the split always sums to 100.
    let kecil_percent = (100.0 * kecil / total).round() as u32;
    let besar_percent = 100 - kecil_percent;

    Ok(Forecast {
        kecil_percent,
        besar_percent,
        reasoning: Reasoning {
            trend,
            dominant_trend: trend.dominant(),
            state_dominance: dominance,
            last_state: last,
            transition,
            avg_roll2: avg_roll2.round() as i64,
        },
    })
}
