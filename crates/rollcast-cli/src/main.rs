//! CLI for rollcast — record rounds, inspect stats, forecast the next outcome.

mod commands;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "rollcast")]
#[command(about = "rollcast — track paired dice rolls and forecast the next round")]
#[command(version = rollcast_core::VERSION)]
struct Cli {
    /// Path to the round log file
    #[arg(long, global = true, default_value = "rollcast.json")]
    data: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Record one round: two rolls, each in [6, 54]
    Add {
        roll1: u8,
        roll2: u8,
    },

    /// List recorded rounds, most recent last
    Log {
        /// Maximum number of rounds to show
        #[arg(long, default_value = "20")]
        limit: usize,

        /// Write the listed rounds as JSON
        #[arg(long)]
        output: Option<String>,
    },

    /// Window summaries: trend counts, outcome frequency, state dominance,
    /// and the full transition matrix
    Stats {
        /// Write the full stats report as JSON
        #[arg(long)]
        output: Option<String>,
    },

    /// Forecast the next round's outcome with the full reasoning trace
    Predict {
        /// Write the forecast as JSON
        #[arg(long)]
        output: Option<String>,
    },

    /// Append uniformly random valid rounds (for exercising the analytics)
    Simulate {
        /// Number of rounds to append
        #[arg(long, default_value = "20")]
        rounds: usize,

        /// Seed for reproducible simulation
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Wipe the entire round log
    Clear {
        /// Confirm the wipe
        #[arg(long)]
        yes: bool,
    },

    /// Start the HTTP API server
    Serve {
        /// Bind address
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Port to listen on
        #[arg(long, default_value = "8070")]
        port: u16,
    },
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Add { roll1, roll2 } => commands::add::run(&cli.data, roll1, roll2),
        Commands::Log { limit, output } => {
            commands::history::run(&cli.data, limit, output.as_deref())
        }
        Commands::Stats { output } => commands::stats::run(&cli.data, output.as_deref()),
        Commands::Predict { output } => commands::predict::run(&cli.data, output.as_deref()),
        Commands::Simulate { rounds, seed } => commands::simulate::run(&cli.data, rounds, seed),
        Commands::Clear { yes } => commands::clear::run(&cli.data, yes),
        Commands::Serve { host, port } => commands::serve::run(&cli.data, &host, port),
    }
}
