//! Terminal input: prompts, menu choices and guess normalisation

use shared::{validate_guess, GuessError, MAX_PLAYERS};
use std::io::Write;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

/// Typing this instead of a guess leaves the game.
pub const QUIT_KEYWORD: &str = "quit";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Create,
    Join,
    List,
    Exit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuessInput {
    Word(String),
    Quit,
    Invalid(GuessError),
}

/// Reads answers to prompts from any async line source
pub struct Prompt<R> {
    reader: R,
}

impl<R: AsyncBufRead + Unpin> Prompt<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }

    /// Prints `question` and returns the trimmed answer, or `None` at end of input
    pub async fn ask(&mut self, question: &str) -> std::io::Result<Option<String>> {
        print!("{}", question);
        std::io::stdout().flush()?;

        let mut line = String::new();
        if self.reader.read_line(&mut line).await? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }
}

pub fn parse_menu_choice(line: &str) -> Option<MenuChoice> {
    match line.trim() {
        "1" => Some(MenuChoice::Create),
        "2" => Some(MenuChoice::Join),
        "3" => Some(MenuChoice::List),
        "4" => Some(MenuChoice::Exit),
        _ => None,
    }
}

/// Accepts a roster size in `1..=MAX_PLAYERS`
pub fn parse_player_count(line: &str) -> Option<u32> {
    line.trim()
        .parse::<u32>()
        .ok()
        .filter(|n| (1..=MAX_PLAYERS).contains(n))
}

/// Lowercases a guess and applies the same checks the server does
pub fn parse_guess(line: &str) -> GuessInput {
    let word = line.trim().to_lowercase();
    if word == QUIT_KEYWORD {
        return GuessInput::Quit;
    }
    match validate_guess(&word) {
        Ok(()) => GuessInput::Word(word),
        Err(e) => GuessInput::Invalid(e),
    }
}
