//! `rollcast predict` — forecast the next round with the reasoning trace.

use serde::Serialize;

use rollcast_core::{Forecast, LogStore, PredictError};

use super::{load_log, write_json};

#[derive(Serialize)]
struct PredictReport {
    can_predict: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    forecast: Option<Forecast>,
    #[serde(skip_serializing_if = "Option::is_none")]
    favored: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    reason: Option<String>,
}

pub fn run(data: &str, output: Option<&str>) {
    let store = LogStore::new(data);
    let log = load_log(&store);

    match log.predict() {
        Ok(forecast) => {
            if let Some(path) = output {
                write_json(
                    path,
                    &PredictReport {
                        can_predict: true,
                        favored: Some(forecast.favored().to_string()),
                        forecast: Some(forecast),
                        reason: None,
                    },
                );
                return;
            }
            print_forecast(&forecast, log.len());
        }
        Err(e) => {
            if let Some(path) = output {
                write_json(
                    path,
                    &PredictReport {
                        can_predict: false,
                        forecast: None,
                        favored: None,
                        reason: Some(e.to_string()),
                    },
                );
                return;
            }
            match e {
                PredictError::InsufficientData { .. } => println!("Cannot predict yet: {e}"),
                // Unreachable by construction; surfaced loudly if it ever is.
                PredictError::DegenerateScore => {
                    eprintln!("Internal error: {e}");
                    std::process::exit(1);
                }
            }
        }
    }
}

fn print_forecast(forecast: &Forecast, total_rounds: usize) {
    let r = &forecast.reasoning;

    println!("Next-round forecast ({total_rounds} rounds of history)");
    println!();
    println!(
        "  KECIL {:>3}%   BESAR {:>3}%   → leaning {}",
        forecast.kecil_percent,
        forecast.besar_percent,
        forecast.favored()
    );
    println!();
    println!("Reasoning:");
    println!(
        "  trend (window)      up {}  down {}  stable {}   dominant: {}",
        r.trend.up, r.trend.down, r.trend.stable, r.dominant_trend
    );
    println!(
        "  dominance (window)  LOW {}  MID {}  HIGH {}  EXTREME {}",
        r.state_dominance.low, r.state_dominance.mid, r.state_dominance.high,
        r.state_dominance.extreme
    );
    match r.last_state {
        Some(state) => println!("  last state          {state}"),
        None => println!("  last state          (none)"),
    }
    match r.transition {
        Some(p) => println!(
            "  transitions out     LOW {}%  MID {}%  HIGH {}%  EXTREME {}%",
            p.low, p.mid, p.high, p.extreme
        ),
        None => println!("  transitions out     (no observations from last state)"),
    }
    println!("  avg roll2 (full)    {}", r.avg_roll2);
}
