//! Wire protocol and scoring rules shared by the game server and client.
//!
//! Every request and response travels as a single [`Packet`] encoded with
//! `bincode`. The scoring engine lives here too so that the client can
//! validate a guess with exactly the rules the server applies.

use serde::{Deserialize, Serialize};

/// Length of every secret word and every accepted guess.
pub const WORD_LENGTH: usize = 5;
/// Largest roster a single session may be created with.
pub const MAX_PLAYERS: u32 = 10;
/// Default number of sessions the registry will hold.
pub const MAX_GAMES: usize = 50;
/// Upper bound on `game_id` length in bytes.
pub const MAX_GAME_ID: usize = 64;
/// Upper bound on `user_name` length in bytes.
pub const MAX_USERNAME: usize = 32;
/// Upper bound on `error_message` length in bytes.
pub const MAX_ERROR_MESSAGE: usize = 256;
/// Receive buffer size for a single datagram.
pub const MAX_PACKET_SIZE: usize = 2048;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub enum Packet {
    NewGame {
        game_id: String,
        user_name: String,
        player_cnt: u32,
    },
    JoinById {
        game_id: String,
        user_name: String,
    },
    MakeTry {
        game_id: String,
        user_name: String,
        word: String,
    },
    QuitGame {
        game_id: String,
        user_name: String,
    },
    GetGames,

    GameOk {
        game_id: String,
        player_cnt: u32,
        word: Option<String>,
    },
    JoinedOk {
        game_id: String,
        player_cnt: u32,
        word: String,
    },
    TryResult {
        game_id: String,
        result: TryOutcome,
    },
    Win {
        game_id: String,
        result: TryOutcome,
    },
    GamesList {
        total_games: u32,
    },
    Fail {
        error_message: String,
    },
}

impl Packet {
    /// Builds a `Fail` response, truncating the message to `MAX_ERROR_MESSAGE` bytes.
    pub fn fail(message: impl Into<String>) -> Self {
        let mut error_message = message.into();
        truncate_on_char_boundary(&mut error_message, MAX_ERROR_MESSAGE);
        Packet::Fail { error_message }
    }

    /// True for the five commands a client may send.
    pub fn is_request(&self) -> bool {
        matches!(
            self,
            Packet::NewGame { .. }
                | Packet::JoinById { .. }
                | Packet::MakeTry { .. }
                | Packet::QuitGame { .. }
                | Packet::GetGames
        )
    }

    /// Command tag name, used in log lines.
    pub fn command(&self) -> &'static str {
        match self {
            Packet::NewGame { .. } => "NEW_GAME",
            Packet::JoinById { .. } => "JOIN_BY_ID",
            Packet::MakeTry { .. } => "MAKE_TRY",
            Packet::QuitGame { .. } => "QUIT_GAME",
            Packet::GetGames => "GET_GAMES",
            Packet::GameOk { .. } => "GAME_OK",
            Packet::JoinedOk { .. } => "JOINED_OK",
            Packet::TryResult { .. } => "TRY_RESULT",
            Packet::Win { .. } => "WIN",
            Packet::GamesList { .. } => "GAMES_LIST",
            Packet::Fail { .. } => "FAIL",
        }
    }
}

/// Scoring feedback for one guess, carried by `TryResult` and `Win`.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct TryOutcome {
    pub bulls: u32,
    pub cows: u32,
    pub try_num: u32,
    pub who: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Score {
    pub bulls: u32,
    pub cows: u32,
}

impl Score {
    pub fn is_win(&self) -> bool {
        self.bulls as usize == WORD_LENGTH
    }
}

/// Scores `guess` against `secret`.
///
/// Bulls are positions holding the same letter. Cows are the size of the
/// multiset intersection of the letters left over once bulls are removed,
/// so `bulls + cows` never exceeds the word length.
///
/// Both words must have the same length; callers check this with
/// [`validate_guess`] before scoring.
pub fn score(secret: &str, guess: &str) -> Score {
    let mut bulls = 0;
    let mut secret_left = [0u32; 256];
    let mut guess_left = [0u32; 256];

    for (s, g) in secret.bytes().zip(guess.bytes()) {
        if s == g {
            bulls += 1;
        } else {
            secret_left[s as usize] += 1;
            guess_left[g as usize] += 1;
        }
    }

    let cows = secret_left
        .iter()
        .zip(guess_left.iter())
        .map(|(s, g)| (*s).min(*g))
        .sum();

    Score { bulls, cows }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum GuessError {
    #[error("Bad length")]
    BadLength,
    #[error("Bad chars")]
    BadChars,
}

/// Checks that a guess is exactly `WORD_LENGTH` lowercase ASCII letters.
pub fn validate_guess(word: &str) -> Result<(), GuessError> {
    if word.chars().count() != WORD_LENGTH {
        return Err(GuessError::BadLength);
    }
    if !word.chars().all(|c| c.is_ascii_lowercase()) {
        return Err(GuessError::BadChars);
    }
    Ok(())
}

fn truncate_on_char_boundary(s: &mut String, max: usize) {
    if s.len() <= max {
        return;
    }
    let mut end = max;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    s.truncate(end);
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_WORDS: [&str; 12] = [
        "house", "horse", "heart", "earth", "hello", "llama", "aaaaa", "abcde", "edcba", "sugar",
        "zebra", "queen",
    ];

    #[test]
    fn test_score_documented_examples() {
        assert_eq!(score("house", "heart"), Score { bulls: 1, cows: 1 });
        assert_eq!(score("house", "horse"), Score { bulls: 4, cows: 0 });
        assert_eq!(score("house", "house"), Score { bulls: 5, cows: 0 });
    }

    #[test]
    fn test_score_repeated_letters_use_leftover_multiset() {
        // secret has a single 'l' left over, guess offers two
        assert_eq!(score("world", "llama"), Score { bulls: 0, cows: 1 });
        // bulls consume letters before cows are counted
        assert_eq!(score("aabbb", "ababa"), Score { bulls: 2, cows: 2 });
        assert_eq!(score("aaaaa", "abcde"), Score { bulls: 1, cows: 0 });
    }

    #[test]
    fn test_score_no_overlap() {
        assert_eq!(score("abcde", "fghij"), Score { bulls: 0, cows: 0 });
    }

    #[test]
    fn test_score_anagram_is_all_cows() {
        assert_eq!(score("abcde", "eabcd"), Score { bulls: 0, cows: 5 });
        assert_eq!(score("abcde", "edcba"), Score { bulls: 1, cows: 4 });
    }

    #[test]
    fn test_score_properties_hold_for_all_pairs() {
        for a in SAMPLE_WORDS {
            assert_eq!(score(a, a), Score { bulls: 5, cows: 0 });
            for b in SAMPLE_WORDS {
                let ab = score(a, b);
                let ba = score(b, a);
                assert!(ab.bulls as usize <= WORD_LENGTH);
                assert!((ab.bulls + ab.cows) as usize <= WORD_LENGTH, "{a} vs {b}");
                assert_eq!(ab, ba, "{a} vs {b} not symmetric");
            }
        }
    }

    #[test]
    fn test_score_properties_exhaustive_small_alphabet() {
        // every five-letter word over {a, b, c}
        let letters = ['a', 'b', 'c'];
        let mut words = Vec::new();
        for i in 0..3usize.pow(5) {
            let mut n = i;
            let mut w = String::new();
            for _ in 0..5 {
                w.push(letters[n % 3]);
                n /= 3;
            }
            words.push(w);
        }

        for a in &words {
            for b in &words {
                let s = score(a, b);
                assert!((s.bulls + s.cows) as usize <= WORD_LENGTH);
                assert_eq!(s, score(b, a));
                assert_eq!(s.is_win(), a == b);
            }
        }
    }

    #[test]
    fn test_validate_guess() {
        assert_eq!(validate_guess("house"), Ok(()));
        assert_eq!(validate_guess("hous"), Err(GuessError::BadLength));
        assert_eq!(validate_guess("houses"), Err(GuessError::BadLength));
        assert_eq!(validate_guess(""), Err(GuessError::BadLength));
        assert_eq!(validate_guess("House"), Err(GuessError::BadChars));
        assert_eq!(validate_guess("ho1se"), Err(GuessError::BadChars));
        assert_eq!(validate_guess("héllo"), Err(GuessError::BadChars));
    }

    #[test]
    fn test_guess_error_messages() {
        assert_eq!(GuessError::BadLength.to_string(), "Bad length");
        assert_eq!(GuessError::BadChars.to_string(), "Bad chars");
    }

    #[test]
    fn test_fail_truncates_long_messages() {
        let long = "x".repeat(MAX_ERROR_MESSAGE + 40);
        match Packet::fail(long) {
            Packet::Fail { error_message } => assert_eq!(error_message.len(), MAX_ERROR_MESSAGE),
            other => panic!("Expected Fail, got {:?}", other),
        }

        // multi-byte char straddling the limit is dropped, not split
        let mut tricky = "y".repeat(MAX_ERROR_MESSAGE - 1);
        tricky.push('é');
        match Packet::fail(tricky) {
            Packet::Fail { error_message } => {
                assert_eq!(error_message.len(), MAX_ERROR_MESSAGE - 1)
            }
            other => panic!("Expected Fail, got {:?}", other),
        }
    }

    #[test]
    fn test_request_classification() {
        assert!(Packet::GetGames.is_request());
        assert!(Packet::QuitGame {
            game_id: "g".into(),
            user_name: "u".into()
        }
        .is_request());
        assert!(!Packet::GamesList { total_games: 3 }.is_request());
        assert!(!Packet::fail("nope").is_request());
        assert_eq!(Packet::GetGames.command(), "GET_GAMES");
        assert_eq!(Packet::fail("x").command(), "FAIL");
    }

    #[test]
    fn test_packet_serialization_try_result() {
        let packet = Packet::Win {
            game_id: "ABC".to_string(),
            result: TryOutcome {
                bulls: 5,
                cows: 0,
                try_num: 3,
                who: "alice".to_string(),
            },
        };

        let serialized = bincode::serialize(&packet).unwrap();
        assert!(serialized.len() < MAX_PACKET_SIZE);
        let deserialized: Packet = bincode::deserialize(&serialized).unwrap();
        assert_eq!(deserialized, packet);
    }

    #[test]
    fn test_largest_request_fits_in_one_datagram() {
        let packet = Packet::MakeTry {
            game_id: "g".repeat(MAX_GAME_ID),
            user_name: "u".repeat(MAX_USERNAME),
            word: "w".repeat(WORD_LENGTH),
        };
        let serialized = bincode::serialize(&packet).unwrap();
        assert!(serialized.len() < MAX_PACKET_SIZE);
    }

    #[test]
    fn test_truncated_packet_fails_to_decode() {
        let packet = Packet::JoinById {
            game_id: "ABC".to_string(),
            user_name: "bob".to_string(),
        };
        let serialized = bincode::serialize(&packet).unwrap();
        let result: Result<Packet, _> = bincode::deserialize(&serialized[..serialized.len() - 2]);
        assert!(result.is_err());
    }
}
