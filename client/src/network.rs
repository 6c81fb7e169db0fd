//! Request/reply client for the game server

use bincode::{deserialize, serialize};
use log::{debug, warn};
use shared::{Packet, TryOutcome, MAX_PACKET_SIZE};
use std::net::SocketAddr;
use std::time::Duration;
use tokio::net::UdpSocket;
use tokio::time::timeout;

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("network error: {0}")]
    Io(#[from] std::io::Error),

    #[error("encoding error: {0}")]
    Codec(#[from] bincode::Error),

    #[error("no response from server within {0:?}")]
    Timeout(Duration),

    /// The server answered with `Fail`
    #[error("{0}")]
    Server(String),

    #[error("unexpected {0} response")]
    Unexpected(&'static str),
}

/// Session details returned by a successful create or join
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameInfo {
    pub game_id: String,
    pub players: u32,
    /// Secret word echoed by the server for debugging
    pub secret: Option<String>,
}

/// Feedback for one guess
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuessResult {
    pub outcome: TryOutcome,
    pub won: bool,
}

pub struct Client {
    socket: UdpSocket,
    server_addr: SocketAddr,
    user_name: String,
    timeout: Duration,
}

impl Client {
    pub async fn new(
        server_addr: &str,
        user_name: &str,
        timeout: Duration,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        let server_addr: SocketAddr = server_addr.parse()?;
        let local = if server_addr.is_ipv4() {
            "0.0.0.0:0"
        } else {
            "[::]:0"
        };
        let socket = UdpSocket::bind(local).await?;
        debug!("Client socket bound to {}", socket.local_addr()?);

        Ok(Client {
            socket,
            server_addr,
            user_name: user_name.to_string(),
            timeout,
        })
    }

    pub fn user_name(&self) -> &str {
        &self.user_name
    }

    /// Sends one packet and waits for the server's reply
    ///
    /// Datagrams from any other address are ignored. Anything already queued
    /// on the socket (a late reply to a request that timed out) is discarded
    /// before sending, so the reply returned always belongs to `packet`.
    pub async fn request(&self, packet: &Packet) -> Result<Packet, ClientError> {
        let mut buffer = [0u8; MAX_PACKET_SIZE];
        self.discard_stale_replies(&mut buffer)?;

        let data = serialize(packet)?;
        self.socket.send_to(&data, self.server_addr).await?;

        loop {
            let (len, from) = timeout(self.timeout, self.socket.recv_from(&mut buffer))
                .await
                .map_err(|_| ClientError::Timeout(self.timeout))??;

            if from != self.server_addr {
                warn!("Ignoring datagram from unexpected address {}", from);
                continue;
            }

            let response: Packet = deserialize(&buffer[..len])?;
            debug!("{} -> {}", packet.command(), response.command());
            return Ok(response);
        }
    }

    fn discard_stale_replies(&self, buffer: &mut [u8]) -> std::io::Result<()> {
        loop {
            match self.socket.try_recv_from(buffer) {
                Ok((len, from)) => debug!("Discarding stale {} byte datagram from {}", len, from),
                Err(e) if e.kind() == std::io::ErrorKind::WouldBlock => return Ok(()),
                Err(e) => return Err(e),
            }
        }
    }

    pub async fn new_game(&self, game_id: &str, player_cnt: u32) -> Result<GameInfo, ClientError> {
        let packet = Packet::NewGame {
            game_id: game_id.to_string(),
            user_name: self.user_name.clone(),
            player_cnt,
        };

        match self.request(&packet).await? {
            Packet::GameOk {
                game_id,
                player_cnt,
                word,
            } => Ok(GameInfo {
                game_id,
                players: player_cnt,
                secret: word,
            }),
            other => Err(unexpected(other)),
        }
    }

    pub async fn join_game(&self, game_id: &str) -> Result<GameInfo, ClientError> {
        let packet = Packet::JoinById {
            game_id: game_id.to_string(),
            user_name: self.user_name.clone(),
        };

        match self.request(&packet).await? {
            Packet::JoinedOk {
                game_id,
                player_cnt,
                word,
            } => Ok(GameInfo {
                game_id,
                players: player_cnt,
                secret: Some(word),
            }),
            other => Err(unexpected(other)),
        }
    }

    pub async fn make_try(&self, game_id: &str, word: &str) -> Result<GuessResult, ClientError> {
        let packet = Packet::MakeTry {
            game_id: game_id.to_string(),
            user_name: self.user_name.clone(),
            word: word.to_string(),
        };

        match self.request(&packet).await? {
            Packet::TryResult { result, .. } => Ok(GuessResult {
                outcome: result,
                won: false,
            }),
            Packet::Win { result, .. } => Ok(GuessResult {
                outcome: result,
                won: true,
            }),
            other => Err(unexpected(other)),
        }
    }

    pub async fn quit_game(&self, game_id: &str) -> Result<(), ClientError> {
        let packet = Packet::QuitGame {
            game_id: game_id.to_string(),
            user_name: self.user_name.clone(),
        };

        match self.request(&packet).await? {
            Packet::GameOk { .. } => Ok(()),
            other => Err(unexpected(other)),
        }
    }

    /// Number of games still running on the server
    pub async fn list_games(&self) -> Result<u32, ClientError> {
        match self.request(&Packet::GetGames).await? {
            Packet::GamesList { total_games } => Ok(total_games),
            other => Err(unexpected(other)),
        }
    }
}

fn unexpected(packet: Packet) -> ClientError {
    match packet {
        Packet::Fail { error_message } => ClientError::Server(error_message),
        other => ClientError::Unexpected(other.command()),
    }
}
