//! Session registry: the process-wide table of game sessions
//!
//! This module owns every session the server has ever created, including:
//! - Session creation with a freshly drawn secret word
//! - Roster management (join, quit) with capacity enforcement
//! - Guess scoring and win detection
//! - The active-session count reported to clients
//!
//! Sessions are never removed. Once a session stops running it stays in the
//! table so that its title can never be reused, and it simply drops out of
//! the active count.

use crate::error::GameError;
use crate::words::WordSource;
use log::{debug, info};
use shared::{score, validate_guess, MAX_PLAYERS};
use std::collections::HashMap;

/// One participant in a session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    /// Name chosen by the client, unique within the roster
    pub name: String,
    /// False once the player has quit or guessed the word
    pub active: bool,
    /// Number of validated guesses submitted
    pub attempts: u32,
}

impl Player {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            active: true,
            attempts: 0,
        }
    }
}

/// One running (or finished) game
///
/// The roster keeps join order and never shrinks: players who leave or win
/// stay in it with `active` cleared, so `roster.len()` is also the number of
/// slots consumed.
#[derive(Debug, Clone)]
pub struct Session {
    pub title: String,
    pub secret: String,
    pub capacity: u32,
    pub roster: Vec<Player>,
    pub active: bool,
}

impl Session {
    fn new(title: &str, secret: String, capacity: u32, creator: &str) -> Self {
        Self {
            title: title.to_string(),
            secret,
            capacity,
            roster: vec![Player::new(creator)],
            active: true,
        }
    }

    pub fn active_players(&self) -> usize {
        self.roster.iter().filter(|p| p.active).count()
    }

    pub fn player(&self, name: &str) -> Option<&Player> {
        self.roster.iter().find(|p| p.name == name)
    }

    fn is_full(&self) -> bool {
        self.roster.len() >= self.capacity as usize
    }

    /// Ends the session when nobody is left playing. Termination is permanent.
    fn finish_if_abandoned(&mut self) {
        if self.active && self.active_players() == 0 {
            self.active = false;
            info!("Game '{}' finished (no active players)", self.title);
        }
    }
}

/// Result of a successful create or join
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Joined {
    pub title: String,
    /// Roster size after the operation
    pub players: u32,
    pub secret: String,
}

/// Result of a scored guess
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attempt {
    pub bulls: u32,
    pub cows: u32,
    pub try_num: u32,
    pub who: String,
    pub won: bool,
}

/// Owns all sessions and enforces the server-wide session limit
///
/// Callers serialise access to a registry themselves (the network layer
/// keeps it behind a single mutex), so every method here is a complete,
/// atomic state transition.
pub struct Registry {
    /// Sessions keyed by title
    sessions: HashMap<String, Session>,
    /// Maximum number of sessions, finished ones included
    max_games: usize,
    /// Where secret words come from
    words: Box<dyn WordSource>,
}

impl Registry {
    pub fn new(max_games: usize, words: Box<dyn WordSource>) -> Self {
        Self {
            sessions: HashMap::new(),
            max_games,
            words,
        }
    }

    /// Creates a session with `creator` as its first, active player
    ///
    /// Fails when the registry is at capacity, when any session (running or
    /// not) already uses `title`, or when `capacity` is outside
    /// `1..=MAX_PLAYERS`.
    pub fn create(&mut self, title: &str, capacity: u32, creator: &str) -> Result<Joined, GameError> {
        if self.sessions.len() >= self.max_games {
            return Err(GameError::ServerFull);
        }
        if self.sessions.contains_key(title) {
            return Err(GameError::DuplicateTitle);
        }
        if !(1..=MAX_PLAYERS).contains(&capacity) {
            return Err(GameError::InvalidCapacity);
        }

        let secret = self.words.draw();
        let session = Session::new(title, secret, capacity, creator);

        info!(
            "Game '{}' created by '{}' for {} players",
            title, creator, capacity
        );
        debug!("Game '{}' secret: {}", title, session.secret);

        let joined = Joined {
            title: session.title.clone(),
            players: session.roster.len() as u32,
            secret: session.secret.clone(),
        };
        self.sessions.insert(title.to_string(), session);
        Ok(joined)
    }

    /// Appends `player` to the roster of a running session
    pub fn join(&mut self, title: &str, player: &str) -> Result<Joined, GameError> {
        let session = self.sessions.get_mut(title).ok_or(GameError::NotFound)?;

        if !session.active {
            return Err(GameError::GameEnded);
        }
        if session.is_full() {
            return Err(GameError::Full);
        }
        if session.player(player).is_some() {
            return Err(GameError::AlreadyJoined);
        }

        session.roster.push(Player::new(player));

        info!(
            "Player '{}' joined '{}' ({}/{})",
            player,
            title,
            session.roster.len(),
            session.capacity
        );

        Ok(Joined {
            title: session.title.clone(),
            players: session.roster.len() as u32,
            secret: session.secret.clone(),
        })
    }

    /// Scores a guess from `player`
    ///
    /// The guess is validated after the session and player are resolved, and
    /// only validated guesses count as attempts. A winning guess retires the
    /// player; the session ends once no active player remains.
    pub fn attempt(&mut self, title: &str, player: &str, guess: &str) -> Result<Attempt, GameError> {
        let session = self.sessions.get_mut(title).ok_or(GameError::NotFound)?;

        if !session.active {
            return Err(GameError::GameEnded);
        }

        let secret = session.secret.clone();
        let entry = session
            .roster
            .iter_mut()
            .find(|p| p.name == player)
            .ok_or(GameError::PlayerNotInSession)?;

        validate_guess(guess)?;

        entry.attempts += 1;
        let result = score(&secret, guess);
        let won = result.is_win();

        debug!(
            "Player '{}' in '{}': try {} - {} -> {}B {}C",
            player, title, entry.attempts, guess, result.bulls, result.cows
        );

        let attempt = Attempt {
            bulls: result.bulls,
            cows: result.cows,
            try_num: entry.attempts,
            who: entry.name.clone(),
            won,
        };

        if won {
            entry.active = false;
            info!("Player '{}' won '{}' in {} tries", player, title, attempt.try_num);
            session.finish_if_abandoned();
        }

        Ok(attempt)
    }

    /// Marks `player` as gone
    ///
    /// A name that is not on the roster is ignored. Returns the roster size.
    pub fn quit(&mut self, title: &str, player: &str) -> Result<u32, GameError> {
        let session = self.sessions.get_mut(title).ok_or(GameError::NotFound)?;

        if let Some(entry) = session.roster.iter_mut().find(|p| p.name == player) {
            entry.active = false;
            info!("Player '{}' left '{}'", player, title);
            session.finish_if_abandoned();
        }

        Ok(session.roster.len() as u32)
    }

    /// Number of sessions still running
    pub fn list(&self) -> usize {
        self.sessions.values().filter(|s| s.active).count()
    }

    pub fn get(&self, title: &str) -> Option<&Session> {
        self.sessions.get(title)
    }

    /// Number of sessions ever created
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}
