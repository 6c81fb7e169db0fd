//! Failure kinds for registry operations.
//!
//! Every variant is recovered at the dispatcher and sent back to the caller
//! as a `Fail` packet whose `error_message` is the variant's `Display` text.

use shared::GuessError;

/// Broad classification used in log lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    /// The server or the session has run out of room.
    Capacity,
    /// The caller picked a name that is already taken.
    IdentityConflict,
    /// The caller's view of a session is stale.
    Lifecycle,
    /// The request itself is malformed and must be corrected.
    Validation,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    #[error("Server full")]
    ServerFull,

    #[error("Game exists")]
    DuplicateTitle,

    #[error("Bad players count")]
    InvalidCapacity,

    #[error("Game not found")]
    NotFound,

    #[error("Game full")]
    Full,

    #[error("Game ended")]
    GameEnded,

    #[error("Already in")]
    AlreadyJoined,

    #[error("User not in game")]
    PlayerNotInSession,

    #[error("Bad length")]
    BadLength,

    #[error("Bad chars")]
    BadChars,

    #[error("Bad {0}")]
    InvalidName(&'static str),
}

impl GameError {
    pub fn class(&self) -> ErrorClass {
        match self {
            GameError::ServerFull | GameError::Full => ErrorClass::Capacity,
            GameError::DuplicateTitle | GameError::AlreadyJoined => ErrorClass::IdentityConflict,
            GameError::NotFound | GameError::GameEnded | GameError::PlayerNotInSession => {
                ErrorClass::Lifecycle
            }
            GameError::InvalidCapacity
            | GameError::BadLength
            | GameError::BadChars
            | GameError::InvalidName(_) => ErrorClass::Validation,
        }
    }
}

impl From<GuessError> for GameError {
    fn from(err: GuessError) -> Self {
        match err {
            GuessError::BadLength => GameError::BadLength,
            GuessError::BadChars => GameError::BadChars,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guess_error_conversion() {
        let err: GameError = GuessError::BadLength.into();
        assert_eq!(err, GameError::BadLength);
        let err: GameError = GuessError::BadChars.into();
        assert_eq!(err, GameError::BadChars);
    }

    #[test]
    fn test_error_classes() {
        assert_eq!(GameError::ServerFull.class(), ErrorClass::Capacity);
        assert_eq!(GameError::Full.class(), ErrorClass::Capacity);
        assert_eq!(GameError::AlreadyJoined.class(), ErrorClass::IdentityConflict);
        assert_eq!(GameError::GameEnded.class(), ErrorClass::Lifecycle);
        assert_eq!(GameError::InvalidName("game id").class(), ErrorClass::Validation);
    }

    #[test]
    fn test_display_is_client_facing_message() {
        assert_eq!(GameError::NotFound.to_string(), "Game not found");
        assert_eq!(GameError::InvalidName("user name").to_string(), "Bad user name");
    }
}
