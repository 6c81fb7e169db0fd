//! Interactive flow: main menu, game creation/joining and the guess loop

use crate::input::{parse_guess, parse_menu_choice, parse_player_count, GuessInput, MenuChoice, Prompt};
use crate::network::{Client, ClientError, GameInfo};
use log::{info, warn};
use shared::MAX_PLAYERS;
use tokio::io::AsyncBufRead;

pub const RULES: &str = "\
==============================
   GAME: GUESS THE WORD
==============================
Goal: guess the 5-letter word

BULL - right letter, right position
COW  - right letter, wrong position

Example:
  Secret: house
  Guess:  heart -> 1 bull, 1 cow
  Guess:  horse -> 4 bulls, 0 cows
  Guess:  house -> 5 bulls (win)
==============================";

const MENU: &str = "\
==============================
  BULLS AND COWS (WORDS)
==============================
1. Create game
2. Join game
3. List games
4. Exit
==============================";

/// How a single game ended for this player
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEnd {
    Won { tries: u32 },
    Quit,
    InputClosed,
    Rejected(String),
}

/// Runs the main menu until the player exits or input ends
pub async fn run_menu<R: AsyncBufRead + Unpin>(
    client: &Client,
    prompt: &mut Prompt<R>,
) -> Result<(), ClientError> {
    loop {
        println!("\n{}", MENU);
        let Some(line) = prompt.ask("Choose: ").await? else {
            return Ok(());
        };

        match parse_menu_choice(&line) {
            Some(MenuChoice::Create) => {
                if let Some(game) = create_game(client, prompt).await? {
                    play(client, prompt, &game).await?;
                }
            }
            Some(MenuChoice::Join) => {
                if let Some(game) = join_game(client, prompt).await? {
                    play(client, prompt, &game).await?;
                }
            }
            Some(MenuChoice::List) => match client.list_games().await {
                Ok(total) => println!("\nActive games: {}", total),
                Err(e) => println!("Error: {}", e),
            },
            Some(MenuChoice::Exit) => {
                println!("Goodbye!");
                return Ok(());
            }
            None => println!("Invalid choice"),
        }
    }
}

/// Asks for a title and roster size, then creates the game
pub async fn create_game<R: AsyncBufRead + Unpin>(
    client: &Client,
    prompt: &mut Prompt<R>,
) -> Result<Option<GameInfo>, ClientError> {
    let Some(title) = prompt.ask("\nGame name: ").await? else {
        return Ok(None);
    };

    let question = format!("Max players (1-{}): ", MAX_PLAYERS);
    let Some(count) = prompt.ask(&question).await? else {
        return Ok(None);
    };
    let Some(player_cnt) = parse_player_count(&count) else {
        println!("Invalid number of players");
        return Ok(None);
    };

    match client.new_game(&title, player_cnt).await {
        Ok(game) => {
            println!("\nGame '{}' created!", game.game_id);
            print_game(&game);
            Ok(Some(game))
        }
        Err(ClientError::Server(message)) => {
            println!("Error: {}", message);
            Ok(None)
        }
        Err(e) => Err(e),
    }
}

/// Asks for a title and joins that game
pub async fn join_game<R: AsyncBufRead + Unpin>(
    client: &Client,
    prompt: &mut Prompt<R>,
) -> Result<Option<GameInfo>, ClientError> {
    let Some(title) = prompt.ask("\nGame name: ").await? else {
        return Ok(None);
    };

    match client.join_game(&title).await {
        Ok(game) => {
            println!("\nYou joined '{}'!", game.game_id);
            print_game(&game);
            Ok(Some(game))
        }
        Err(ClientError::Server(message)) => {
            println!("Error: {}", message);
            Ok(None)
        }
        Err(e) => Err(e),
    }
}

fn print_game(game: &GameInfo) {
    println!("Players: {}", game.players);
    if let Some(secret) = &game.secret {
        println!("[DEBUG] Secret: {}", secret);
    }
}

/// Guess loop for one game
///
/// Leaves the game on the server afterwards however the loop ended.
pub async fn play<R: AsyncBufRead + Unpin>(
    client: &Client,
    prompt: &mut Prompt<R>,
    game: &GameInfo,
) -> Result<GameEnd, ClientError> {
    println!("\n{}", RULES);
    println!("Game on! Type 'quit' to leave.\n");

    let end = guess_loop(client, prompt, &game.game_id).await;

    if let Err(e) = client.quit_game(&game.game_id).await {
        warn!("Failed to leave '{}': {}", game.game_id, e);
    }
    println!("\nGame over.");

    let end = end?;
    info!("Game '{}' ended: {:?}", game.game_id, end);
    Ok(end)
}

async fn guess_loop<R: AsyncBufRead + Unpin>(
    client: &Client,
    prompt: &mut Prompt<R>,
    game_id: &str,
) -> Result<GameEnd, ClientError> {
    let mut tries = 0;

    loop {
        println!("\n--- Try {} ---", tries + 1);
        let Some(line) = prompt.ask("Enter a word (or 'quit' to leave): ").await? else {
            return Ok(GameEnd::InputClosed);
        };

        let word = match parse_guess(&line) {
            GuessInput::Quit => return Ok(GameEnd::Quit),
            GuessInput::Invalid(e) => {
                println!("{}: use exactly 5 letters a-z. Try again", e);
                continue;
            }
            GuessInput::Word(word) => word,
        };

        let guess = match client.make_try(game_id, &word).await {
            Ok(guess) => guess,
            Err(ClientError::Server(message)) => {
                println!("Error: {}", message);
                return Ok(GameEnd::Rejected(message));
            }
            Err(e) => return Err(e),
        };

        tries = guess.outcome.try_num;
        println!(
            "\nResult: {} bulls, {} cows",
            guess.outcome.bulls, guess.outcome.cows
        );

        if guess.won {
            println!("\n========================");
            println!("   YOU WIN!");
            println!("   {} tries", tries);
            println!("========================");
            return Ok(GameEnd::Won { tries });
        }

        println!("Tries: {}", tries);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rules_match_scoring() {
        // the worked examples in the rules text must agree with the engine
        assert_eq!(shared::score("house", "heart"), shared::Score { bulls: 1, cows: 1 });
        assert_eq!(shared::score("house", "horse"), shared::Score { bulls: 4, cows: 0 });
        assert!(shared::score("house", "house").is_win());
        assert!(RULES.contains("heart -> 1 bull, 1 cow"));
    }

    #[test]
    fn test_menu_lists_every_choice() {
        for (i, label) in ["Create", "Join", "List", "Exit"].iter().enumerate() {
            assert!(MENU.contains(&format!("{}. {}", i + 1, label)));
        }
    }
}
