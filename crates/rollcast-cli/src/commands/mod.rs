pub mod add;
pub mod clear;
pub mod history;
pub mod predict;
pub mod serve;
pub mod simulate;
pub mod stats;

use rollcast_core::{LogStore, Round, RoundLog};

/// Load the round log from the data path, exiting on unreadable data.
pub fn load_log(store: &LogStore) -> RoundLog {
    match store.load() {
        Ok(log) => log,
        Err(e) => {
            eprintln!("Error reading {}: {e}", store.path().display());
            std::process::exit(1);
        }
    }
}

/// Persist the round log, exiting on failure.
pub fn save_log(store: &LogStore, log: &RoundLog) {
    if let Err(e) = store.save(log) {
        eprintln!("Error saving {}: {e}", store.path().display());
        std::process::exit(1);
    }
}

/// One-line human rendering of a round.
///
/// Example: `#42  12 → 40   LOW→HIGH   up (+28)   BESAR`
pub fn format_round_line(round: &Round) -> String {
    let diff = if round.trend.diff > 0 {
        format!("+{}", round.trend.diff)
    } else {
        round.trend.diff.to_string()
    };
    format!(
        "#{}  {:>2} → {:>2}   {}→{}   {} ({})   {}",
        round.id,
        round.roll1,
        round.roll2,
        round.state1,
        round.state2,
        round.trend.direction,
        diff,
        round.outcome
    )
}

/// Write a serializable value as pretty JSON to `path`, exiting on failure.
pub fn write_json<T: serde::Serialize>(path: &str, value: &T) {
    let json = match serde_json::to_string_pretty(value) {
        Ok(j) => j,
        Err(e) => {
            eprintln!("Error serializing output: {e}");
            std::process::exit(1);
        }
    };
    if let Err(e) = std::fs::write(path, json) {
        eprintln!("Error writing {path}: {e}");
        std::process::exit(1);
    }
    println!("Wrote {path}");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_round_line_up() {
        let line = format_round_line(&Round::new(42, 0, 12, 40));
        assert!(line.contains("#42"));
        assert!(line.contains("12 → 40"));
        assert!(line.contains("LOW→HIGH"));
        assert!(line.contains("up (+28)"));
        assert!(line.contains("BESAR"));
    }

    #[test]
    fn test_format_round_line_down() {
        let line = format_round_line(&Round::new(1, 0, 40, 12));
        assert!(line.contains("down (-28)"));
        assert!(line.contains("KECIL"));
    }

    #[test]
    fn test_format_round_line_stable() {
        let line = format_round_line(&Round::new(1, 0, 20, 20));
        assert!(line.contains("stable (0)"));
    }
}
