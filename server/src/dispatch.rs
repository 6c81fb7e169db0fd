//! Routes a decoded request to the matching registry operation.
//!
//! The dispatcher holds no state and takes no locks: the caller hands it an
//! exclusive borrow of the registry for the duration of one request.

use crate::error::GameError;
use crate::registry::Registry;
use log::debug;
use shared::{Packet, TryOutcome, MAX_GAME_ID, MAX_USERNAME};

/// Produces the response for one request. Failures become `Fail` packets.
pub fn dispatch(registry: &mut Registry, request: Packet) -> Packet {
    let command = request.command();
    match handle(registry, request) {
        Ok(response) => response,
        Err(err) => {
            debug!("{} failed ({:?}): {}", command, err.class(), err);
            Packet::fail(err.to_string())
        }
    }
}

fn handle(registry: &mut Registry, request: Packet) -> Result<Packet, GameError> {
    match request {
        Packet::NewGame {
            game_id,
            user_name,
            player_cnt,
        } => {
            check_names(&game_id, &user_name)?;
            let joined = registry.create(&game_id, player_cnt, &user_name)?;
            Ok(Packet::GameOk {
                game_id: joined.title,
                player_cnt: joined.players,
                word: Some(joined.secret),
            })
        }

        Packet::JoinById { game_id, user_name } => {
            check_names(&game_id, &user_name)?;
            let joined = registry.join(&game_id, &user_name)?;
            Ok(Packet::JoinedOk {
                game_id: joined.title,
                player_cnt: joined.players,
                word: joined.secret,
            })
        }

        Packet::MakeTry {
            game_id,
            user_name,
            word,
        } => {
            check_names(&game_id, &user_name)?;
            let attempt = registry.attempt(&game_id, &user_name, &word)?;
            let result = TryOutcome {
                bulls: attempt.bulls,
                cows: attempt.cows,
                try_num: attempt.try_num,
                who: attempt.who,
            };
            if attempt.won {
                Ok(Packet::Win { game_id, result })
            } else {
                Ok(Packet::TryResult { game_id, result })
            }
        }

        Packet::QuitGame { game_id, user_name } => {
            check_names(&game_id, &user_name)?;
            let players = registry.quit(&game_id, &user_name)?;
            Ok(Packet::GameOk {
                game_id,
                player_cnt: players,
                word: None,
            })
        }

        Packet::GetGames => {
            let total_games = registry.list() as u32;
            debug!("Active games: {}", total_games);
            Ok(Packet::GamesList { total_games })
        }

        _ => Ok(unknown_command()),
    }
}

/// Response for anything that is not one of the five request commands.
pub fn unknown_command() -> Packet {
    Packet::fail("Unknown command")
}

fn check_names(game_id: &str, user_name: &str) -> Result<(), GameError> {
    if game_id.is_empty() || game_id.len() > MAX_GAME_ID {
        return Err(GameError::InvalidName("game id"));
    }
    if user_name.is_empty() || user_name.len() > MAX_USERNAME {
        return Err(GameError::InvalidName("user name"));
    }
    Ok(())
}
