use clap::Parser;
use log::info;
use server::config::ServerConfig;
use server::network::Server;
use server::shutdown::{trigger_on_signal, ShutdownController};
use std::time::Duration;

/// Command line arguments
#[derive(Parser, Debug)]
#[clap(author, version, about)]
struct Args {
    /// Server IP address to bind to
    #[clap(short = 'H', long, default_value = "127.0.0.1")]
    host: String,
    /// Server port to listen on
    #[clap(short, long, default_value = "5555")]
    port: u16,
    /// Maximum number of games kept by the server
    #[clap(short = 'g', long, default_value_t = shared::MAX_GAMES)]
    max_games: usize,
    /// Maximum number of requests handled at once
    #[clap(short = 'w', long, default_value = "50")]
    max_workers: usize,
    /// Receive timeout between shutdown checks, in milliseconds
    #[clap(long, default_value = "1000")]
    poll_interval_ms: u64,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    if std::env::var("RUST_LOG").is_err() {
        eprintln!("Set RUST_LOG=info for detailed logging");
    }

    let args = Args::parse();

    let config = ServerConfig {
        bind_addr: format!("{}:{}", args.host, args.port),
        max_games: args.max_games,
        max_workers: args.max_workers,
        poll_interval: Duration::from_millis(args.poll_interval_ms),
    };

    info!("Starting Bulls and Cows server...");
    let server = Server::new(config).await?;

    let (controller, signal) = ShutdownController::new();
    tokio::spawn(trigger_on_signal(controller));

    server.run(signal).await?;

    info!("Server stopped");
    Ok(())
}
