//! # Bulls and Cows Game Server Library
//!
//! This library provides the server side of a networked multiplayer
//! "Bulls and Cows" word game. Clients create or join named sessions, submit
//! five-letter guesses, and receive bulls/cows feedback until someone matches
//! the secret word.
//!
//! ## Core Responsibilities
//!
//! ### Session Management
//! The server owns every game session and is the only place game state
//! changes. Sessions are keyed by a unique title and keep a roster of the
//! players who joined them, in join order.
//!
//! ### Request Handling
//! Every client message is a single request answered by a single response.
//! There is no persistent connection: a client is identified by the address
//! its datagrams come from.
//!
//! ## Architecture Design
//!
//! ### One Endpoint, Many Workers
//! A single UDP socket receives requests from all clients. The accept loop
//! hands each datagram to a short-lived worker task, which decodes it,
//! dispatches it against the registry and sends the response back to the
//! sender's address. Workers are bounded by a fixed pool; when the pool is
//! exhausted new requests are dropped rather than queued.
//!
//! ### Coarse Locking
//! The registry sits behind one mutex. Each operation (create, join, try,
//! quit, list) runs entirely under that lock, and the lock is released
//! before any network I/O.
//!
//! ### Cooperative Shutdown
//! A shutdown signal is checked once per accept-loop iteration; receives
//! time out after a configurable poll interval so the check happens even
//! when the server is idle.
//!
//! ## Module Organization
//!
//! ### Registry Module (`registry`)
//! Sessions, rosters and the five game operations.
//!
//! ### Dispatch Module (`dispatch`)
//! Stateless translation from request packets to registry calls and back.
//!
//! ### Network Module (`network`)
//! Socket ownership, the accept loop and the worker pool.
//!
//! ### Words Module (`words`)
//! The secret-word dictionary and the random source that draws from it.
//!
//! ## Usage Example
//!
//! ```rust,no_run
//! use server::config::ServerConfig;
//! use server::network::Server;
//! use server::shutdown::{trigger_on_signal, ShutdownController};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let server = Server::new(ServerConfig::default()).await?;
//!
//!     let (controller, signal) = ShutdownController::new();
//!     tokio::spawn(trigger_on_signal(controller));
//!
//!     server.run(signal).await?;
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod dispatch;
pub mod error;
pub mod network;
pub mod registry;
pub mod shutdown;
pub mod words;
