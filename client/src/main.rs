use clap::Parser;
use client::input::Prompt;
use client::network::Client;
use log::info;
use shared::MAX_USERNAME;
use std::time::Duration;
use tokio::io::BufReader;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Server address to connect to
    #[arg(short = 's', long, default_value = "127.0.0.1:5555")]
    server: String,

    /// Player name (asked interactively when omitted)
    #[arg(short = 'n', long)]
    name: Option<String>,

    /// How long to wait for each server response, in milliseconds
    #[arg(short = 't', long, default_value = "3000")]
    timeout_ms: u64,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let args = Args::parse();

    println!("==============================");
    println!("  CLIENT: BULLS AND COWS");
    println!("==============================");

    let mut prompt = Prompt::new(BufReader::new(tokio::io::stdin()));

    let name = match args.name {
        Some(name) => name.trim().to_string(),
        None => prompt.ask("\nYour name: ").await?.unwrap_or_default(),
    };

    if name.is_empty() || name.len() > MAX_USERNAME {
        eprintln!("Name must be 1-{} characters", MAX_USERNAME);
        std::process::exit(1);
    }

    println!("Welcome, {}!", name);
    info!("Connecting to: {}", args.server);

    let client = Client::new(&args.server, &name, Duration::from_millis(args.timeout_ms)).await?;

    client::game::run_menu(&client, &mut prompt).await?;

    Ok(())
}
