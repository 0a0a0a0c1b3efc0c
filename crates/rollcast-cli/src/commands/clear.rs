//! `rollcast clear` — wipe the entire round log.

use rollcast_core::LogStore;

use super::{load_log, save_log};

pub fn run(data: &str, yes: bool) {
    let store = LogStore::new(data);
    let mut log = load_log(&store);

    if log.is_empty() {
        println!("Round log is already empty.");
        return;
    }

    if !yes {
        eprintln!(
            "This would erase all {} round(s) in {}. Re-run with --yes to confirm.",
            log.len(),
            store.path().display()
        );
        std::process::exit(1);
    }

    let cleared = log.len();
    log.clear();
    save_log(&store, &log);
    println!("Cleared {cleared} round(s).");
}
