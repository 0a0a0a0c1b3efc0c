//! `rollcast serve` — start the HTTP API server.

use rollcast_core::LogStore;

use super::load_log;

pub fn run(data: &str, host: &str, port: u16) {
    let store = LogStore::new(data);
    let log = load_log(&store);

    let base = format!("http://{host}:{port}");
    println!("Rollcast server v{}", rollcast_core::VERSION);
    println!("   {base}");
    println!("   {} round(s) loaded from {}", log.len(), store.path().display());
    println!();
    println!("   Endpoints:");
    println!("     GET    /                  API index (try: curl {base})");
    println!("     GET    /api/v1/rounds     Recent rounds (?limit=N)");
    println!("     POST   /api/v1/rounds     Append a round {{\"roll1\": 12, \"roll2\": 40}}");
    println!("     DELETE /api/v1/rounds     Clear the log");
    println!("     GET    /api/v1/stats      Window and transition summaries");
    println!("     GET    /api/v1/predict    Next-outcome forecast with reasoning");
    println!("     GET    /health            Server health");
    println!();
    println!("   Examples:");
    println!("     curl {base}/api/v1/predict");
    println!("     curl -X POST {base}/api/v1/rounds -H 'content-type: application/json' \\");
    println!("          -d '{{\"roll1\": 12, \"roll2\": 40}}'");
    println!();

    let rt = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("Error creating runtime: {e}");
            std::process::exit(1);
        }
    };
    if let Err(e) = rt.block_on(rollcast_server::run_server(log, store, host, port)) {
        eprintln!("Server error: {e}");
        std::process::exit(1);
    }
}
