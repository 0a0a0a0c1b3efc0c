//! `rollcast stats` — window summaries and the transition matrix.

use serde::Serialize;

use rollcast_core::{
    LogStore, OutcomeFrequency, State, StateCounts, StatePercents, TrendAggregate, TrendDirection,
};

use super::{load_log, write_json};

#[derive(Serialize)]
struct TransitionRow {
    from: State,
    observed: u32,
    percents: Option<StatePercents>,
}

#[derive(Serialize)]
struct StatsReport {
    total_rounds: usize,
    window: usize,
    trend: Option<TrendAggregate>,
    dominant_trend: Option<TrendDirection>,
    outcome_frequency: OutcomeFrequency,
    state_dominance: StateCounts,
    last_state: Option<State>,
    transitions: Vec<TransitionRow>,
}

pub fn run(data: &str, output: Option<&str>) {
    let store = LogStore::new(data);
    let log = load_log(&store);

    let matrix = log.transition_matrix();
    let transitions: Vec<TransitionRow> = State::ALL
        .iter()
        .map(|&from| TransitionRow {
            from,
            observed: matrix.map(|m| m.row_total(from)).unwrap_or(0),
            percents: matrix.and_then(|m| m.probabilities(from)),
        })
        .collect();

    let report = StatsReport {
        total_rounds: log.len(),
        window: log.window(),
        trend: log.trend_aggregate(),
        dominant_trend: log.dominant_trend(),
        outcome_frequency: log.outcome_frequency(),
        state_dominance: log.state_dominance(),
        last_state: log.last_state(),
        transitions,
    };

    if let Some(path) = output {
        write_json(path, &report);
        return;
    }

    println!("Rollcast stats — {} round(s) recorded", report.total_rounds);
    println!(
        "Window: last {} round(s) ({} in window)",
        report.window,
        log.recent().len()
    );
    println!();

    match report.trend {
        Some(trend) => {
            println!(
                "Trend       up {}  down {}  stable {}   dominant: {}",
                trend.up,
                trend.down,
                trend.stable,
                trend.dominant()
            );
        }
        None => println!("Trend       (no data)"),
    }

    let freq = report.outcome_frequency;
    println!("Outcomes    KECIL {}  BESAR {}", freq.kecil, freq.besar);

    let dom = report.state_dominance;
    println!(
        "Dominance   LOW {}  MID {}  HIGH {}  EXTREME {}  (by second roll)",
        dom.low, dom.mid, dom.high, dom.extreme
    );

    match report.last_state {
        Some(state) => println!("Last state  {state}"),
        None => println!("Last state  (none)"),
    }

    println!();
    println!("Transition matrix (state2 of round n-1 → state1 of round n, full log)");
    println!("  {:<10} {:>5} {:>5} {:>5} {:>8}   observed", "from", "LOW", "MID", "HIGH", "EXTREME");
    for row in &report.transitions {
        match row.percents {
            Some(p) => println!(
                "  {:<10} {:>4}% {:>4}% {:>4}% {:>7}%   {}",
                row.from.to_string(),
                p.low,
                p.mid,
                p.high,
                p.extreme,
                row.observed
            ),
            None => println!(
                "  {:<10} {:>5} {:>5} {:>5} {:>8}   0",
                row.from.to_string(),
                "-",
                "-",
                "-",
                "-"
            ),
        }
    }
}
