//! `rollcast add` — record one round.

use rollcast_core::LogStore;

use super::{format_round_line, load_log, save_log};

pub fn run(data: &str, roll1: u8, roll2: u8) {
    let store = LogStore::new(data);
    let mut log = load_log(&store);

    let round = match log.append(roll1, roll2) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };
    save_log(&store, &log);

    println!("Recorded ({} rounds total)", log.len());
    println!("  {}", format_round_line(&round));

    // A quick forecast once there is enough history; silence is fine below
    // the threshold.
    if let Ok(forecast) = log.predict() {
        println!();
        println!(
            "  Next round: KECIL {}% / BESAR {}%  (leaning {})",
            forecast.kecil_percent,
            forecast.besar_percent,
            forecast.favored()
        );
    }
}
