//! Trend aggregation over a window of rounds.
//!
//! Each round carries its own precomputed intra-round trend; this module
//! only tallies those directions and picks a dominant one.

use serde::Serialize;

use crate::round::{Round, TrendDirection};

/// Direction counts over a window of rounds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TrendAggregate {
    pub up: u32,
    pub down: u32,
    pub stable: u32,
}

impl TrendAggregate {
    /// The strictly dominant direction.
    ///
    /// A direction must strictly exceed both others to win; any tie — and
    /// the all-zero aggregate — resolves to `Stable`.
    pub fn dominant(&self) -> TrendDirection {
        if self.up > self.down && self.up > self.stable {
            TrendDirection::Up
        } else if self.down > self.up && self.down > self.stable {
            TrendDirection::Down
        } else {
            TrendDirection::Stable
        }
    }
}

/// Count trend directions across a window of rounds.
///
/// Returns `None` on an empty window: there is no data to aggregate, which
/// callers treat as an "insufficient data" sentinel.
pub fn aggregate_trend(window: &[Round]) -> Option<TrendAggregate> {
    if window.is_empty() {
        return None;
    }
    let mut agg = TrendAggregate::default();
    for round in window {
        match round.trend.direction {
            TrendDirection::Up => agg.up += 1,
            TrendDirection::Down => agg.down += 1,
            TrendDirection::Stable => agg.stable += 1,
        }
    }
    Some(agg)
}
