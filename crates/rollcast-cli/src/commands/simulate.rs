//! `rollcast simulate` — append uniformly random valid rounds.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use rollcast_core::{LogStore, ROLL_MAX, ROLL_MIN};

use super::{load_log, save_log};

pub fn run(data: &str, rounds: usize, seed: Option<u64>) {
    let store = LogStore::new(data);
    let mut log = load_log(&store);

    let mut rng = match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_os_rng(),
    };

    let mut kecil = 0usize;
    for _ in 0..rounds {
        let roll1 = rng.random_range(ROLL_MIN..=ROLL_MAX);
        let roll2 = rng.random_range(ROLL_MIN..=ROLL_MAX);
        // Generated within [ROLL_MIN, ROLL_MAX]; append cannot reject.
        if let Ok(round) = log.append(roll1, roll2)
            && round.outcome == rollcast_core::Outcome::Kecil
        {
            kecil += 1;
        }
    }
    save_log(&store, &log);

    println!(
        "Simulated {rounds} round(s): {kecil} KECIL, {} BESAR ({} total in log)",
        rounds - kecil,
        log.len()
    );

    if let Ok(forecast) = log.predict() {
        println!(
            "Next round: KECIL {}% / BESAR {}%  (leaning {})",
            forecast.kecil_percent,
            forecast.besar_percent,
            forecast.favored()
        );
    }
}
