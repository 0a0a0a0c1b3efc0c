//! Round records and roll classification.
//!
//! A round is one submitted pair of rolls plus everything derived from it:
//! per-roll state buckets, the intra-round trend, and the binary KECIL/BESAR
//! outcome. All derived fields are computed once at construction and never
//! change afterwards — the analytics modules only ever read them back.

use serde::{Deserialize, Serialize};

/// Smallest valid roll value.
pub const ROLL_MIN: u8 = 6;
/// Largest valid roll value.
pub const ROLL_MAX: u8 = 54;

// ---------------------------------------------------------------------------
// State buckets
// ---------------------------------------------------------------------------

/// Discrete bucket for a single roll value.
///
/// The four in-range states partition [6, 54] into contiguous bands.
/// `Unknown` is a defensive fallback for out-of-range values; validated
/// input never produces it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum State {
    /// [6, 18]
    Low,
    /// [19, 31]
    Mid,
    /// [32, 43]
    High,
    /// [44, 54]
    Extreme,
    /// Anything outside [6, 54].
    Unknown,
}

impl State {
    /// The four in-range states, in band order.
    pub const ALL: [State; 4] = [State::Low, State::Mid, State::High, State::Extreme];

    /// Table index for the in-range states; `None` for `Unknown`.
    pub fn index(self) -> Option<usize> {
        match self {
            State::Low => Some(0),
            State::Mid => Some(1),
            State::High => Some(2),
            State::Extreme => Some(3),
            State::Unknown => None,
        }
    }
}

impl std::fmt::Display for State {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            State::Low => write!(f, "LOW"),
            State::Mid => write!(f, "MID"),
            State::High => write!(f, "HIGH"),
            State::Extreme => write!(f, "EXTREME"),
            State::Unknown => write!(f, "UNKNOWN"),
        }
    }
}

/// Binary outcome label, derived from the second roll only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Outcome {
    Kecil,
    Besar,
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::Kecil => write!(f, "KECIL"),
            Outcome::Besar => write!(f, "BESAR"),
        }
    }
}

/// Map a roll value to its state bucket.
pub fn classify_state(roll: u8) -> State {
    match roll {
        6..=18 => State::Low,
        19..=31 => State::Mid,
        32..=43 => State::High,
        44..=54 => State::Extreme,
        _ => State::Unknown,
    }
}

/// Map a roll value to its binary outcome: KECIL iff roll ≤ 31.
///
/// The 31/32 split is a fixed design constant. It sits near the range
/// midpoint (30) but does not coincide with the MID/HIGH state boundary.
pub fn classify_outcome(roll: u8) -> Outcome {
    if roll <= 31 {
        Outcome::Kecil
    } else {
        Outcome::Besar
    }
}

// ---------------------------------------------------------------------------
// Trend
// ---------------------------------------------------------------------------

/// Direction of change between a round's two rolls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    Up,
    Down,
    Stable,
}

impl std::fmt::Display for TrendDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TrendDirection::Up => write!(f, "up"),
            TrendDirection::Down => write!(f, "down"),
            TrendDirection::Stable => write!(f, "stable"),
        }
    }
}

/// Direction and magnitude of change within one round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trend {
    pub direction: TrendDirection,
    /// `roll2 - roll1`, signed.
    pub diff: i32,
}

/// Compute the intra-round trend from a pair of rolls.
pub fn compute_trend(roll1: u8, roll2: u8) -> Trend {
    let diff = i32::from(roll2) - i32::from(roll1);
    let direction = match diff {
        d if d > 0 => TrendDirection::Up,
        d if d < 0 => TrendDirection::Down,
        _ => TrendDirection::Stable,
    };
    Trend { direction, diff }
}

// ---------------------------------------------------------------------------
// Round record
// ---------------------------------------------------------------------------

/// One recorded game round. Immutable once created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Round {
    /// Unique, strictly increasing identifier (millisecond timestamp base).
    pub id: u64,
    pub roll1: u8,
    pub roll2: u8,
    pub state1: State,
    pub state2: State,
    pub trend: Trend,
    pub outcome: Outcome,
    /// Creation time, milliseconds since Unix epoch. Informational only.
    pub timestamp: u64,
}

impl Round {
    /// Build a round record, deriving every classified field from the rolls.
    pub fn new(id: u64, timestamp: u64, roll1: u8, roll2: u8) -> Self {
        Round {
            id,
            roll1,
            roll2,
            state1: classify_state(roll1),
            state2: classify_state(roll2),
            trend: compute_trend(roll1, roll2),
            outcome: classify_outcome(roll2),
            timestamp,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
