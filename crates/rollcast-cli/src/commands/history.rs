//! `rollcast log` — list recorded rounds.

use serde::Serialize;

use rollcast_core::{LogStore, Round};

use super::{format_round_line, load_log, write_json};

#[derive(Serialize)]
struct HistoryReport<'a> {
    total: usize,
    shown: usize,
    rounds: &'a [Round],
}

pub fn run(data: &str, limit: usize, output: Option<&str>) {
    let store = LogStore::new(data);
    let log = load_log(&store);

    if log.is_empty() {
        println!("No rounds recorded yet. Use `rollcast add <roll1> <roll2>`.");
        return;
    }

    let all = log.rounds();
    let shown = limit.min(all.len());
    let slice = &all[all.len() - shown..];

    if let Some(path) = output {
        write_json(
            path,
            &HistoryReport {
                total: all.len(),
                shown,
                rounds: slice,
            },
        );
        return;
    }

    println!(
        "Round log — showing {shown} of {} round(s), oldest first",
        all.len()
    );
    println!();
    for round in slice {
        println!("  {}", format_round_line(round));
    }
}
