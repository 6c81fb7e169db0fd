//! Runtime settings for the game server.

use shared::MAX_GAMES;
use std::time::Duration;

pub const DEFAULT_ADDR: &str = "127.0.0.1:5555";
pub const DEFAULT_MAX_WORKERS: usize = 50;
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(1000);

/// A setting that would leave the server unable to make progress
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("max_games must be at least 1")]
    NoGames,

    #[error("max_workers must be at least 1")]
    NoWorkers,

    #[error("poll_interval must be greater than zero")]
    ZeroPollInterval,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address the single UDP endpoint binds to
    pub bind_addr: String,
    /// Session limit for the registry
    pub max_games: usize,
    /// Requests handled concurrently before new ones are dropped
    pub max_workers: usize,
    /// How long one receive waits before the shutdown flag is checked again
    pub poll_interval: Duration,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: DEFAULT_ADDR.to_string(),
            max_games: MAX_GAMES,
            max_workers: DEFAULT_MAX_WORKERS,
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }
}

impl ServerConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_games == 0 {
            return Err(ConfigError::NoGames);
        }
        if self.max_workers == 0 {
            return Err(ConfigError::NoWorkers);
        }
        if self.poll_interval.is_zero() {
            return Err(ConfigError::ZeroPollInterval);
        }
        Ok(())
    }
}
