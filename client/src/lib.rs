//! # Bulls and Cows Client Library
//!
//! Terminal client for the Bulls and Cows game server. It talks to the
//! server with one request datagram and one response datagram per action,
//! so there is no connection to keep alive between menu choices.
//!
//! ## Module Organization
//!
//! ### Network Module (`network`)
//! The UDP request/reply client:
//! - Packet encoding and response matching by server address
//! - Response timeouts
//! - Typed helpers for each game command
//!
//! ### Input Module (`input`)
//! Prompting and parsing of everything the player types:
//! - Menu selections and roster sizes
//! - Guess normalisation with the server's own validation rules
//!
//! ### Game Module (`game`)
//! The interactive flow tying both together: the main menu, game creation
//! and joining, and the guess loop.
//!
//! ## Usage Example
//!
//! ```rust,no_run
//! use client::input::Prompt;
//! use client::network::Client;
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = Client::new("127.0.0.1:5555", "alice", Duration::from_secs(3)).await?;
//!     let mut prompt = Prompt::new(tokio::io::BufReader::new(tokio::io::stdin()));
//!
//!     client::game::run_menu(&client, &mut prompt).await?;
//!     Ok(())
//! }
//! ```

pub mod game;
pub mod input;
pub mod network;
