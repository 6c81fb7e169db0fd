//! Server network layer: one UDP endpoint multiplexing every client
//!
//! Each datagram is one request. The peer address reported by `recv_from`
//! identifies the client, and the response is sent back to that address.
//! The accept loop never does game work itself: it hands each datagram to a
//! short-lived worker task, bounded by a fixed number of permits.

use crate::config::ServerConfig;
use crate::dispatch::{dispatch, unknown_command};
use crate::registry::Registry;
use crate::shutdown::ShutdownSignal;
use crate::words::{RandomWords, WordSource};
use bincode::{deserialize, serialize};
use log::{debug, error, info, warn};
use shared::{Packet, MAX_PACKET_SIZE};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::UdpSocket;
use tokio::sync::{Mutex, OwnedSemaphorePermit, Semaphore};
use tokio::time::{sleep, timeout};

/// Fixed-size pool of worker slots
///
/// A request that finds no free slot is dropped instead of waiting, so a
/// burst of traffic can never stall the accept loop.
#[derive(Debug, Clone)]
pub struct WorkerPool {
    permits: Arc<Semaphore>,
    size: usize,
}

impl WorkerPool {
    pub fn new(size: usize) -> Self {
        Self {
            permits: Arc::new(Semaphore::new(size)),
            size,
        }
    }

    /// Claims a slot, or `None` when every worker is busy
    pub fn try_acquire(&self) -> Option<OwnedSemaphorePermit> {
        Arc::clone(&self.permits).try_acquire_owned().ok()
    }

    pub fn available(&self) -> usize {
        self.permits.available_permits()
    }

    pub fn size(&self) -> usize {
        self.size
    }
}

/// Game server owning the socket, the registry and the worker pool
pub struct Server {
    socket: Arc<UdpSocket>,
    registry: Arc<Mutex<Registry>>,
    workers: WorkerPool,
    poll_interval: Duration,
}

impl Server {
    pub async fn new(config: ServerConfig) -> Result<Self, Box<dyn std::error::Error>> {
        Self::with_word_source(config, Box::new(RandomWords::new())).await
    }

    pub async fn with_word_source(
        config: ServerConfig,
        words: Box<dyn WordSource>,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        config.validate()?;

        let socket = Arc::new(UdpSocket::bind(&config.bind_addr).await?);
        info!("Server listening on {}", socket.local_addr()?);
        info!(
            "Up to {} games, {} concurrent requests",
            config.max_games, config.max_workers
        );

        Ok(Server {
            socket,
            registry: Arc::new(Mutex::new(Registry::new(config.max_games, words))),
            workers: WorkerPool::new(config.max_workers),
            poll_interval: config.poll_interval,
        })
    }

    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.socket.local_addr()
    }

    /// Shared handle to the registry, mainly for inspection in tests
    pub fn registry(&self) -> Arc<Mutex<Registry>> {
        Arc::clone(&self.registry)
    }

    pub fn workers(&self) -> &WorkerPool {
        &self.workers
    }

    /// Accept loop
    ///
    /// Waits up to `poll_interval` for a datagram, then checks `shutdown`
    /// again. A failed or timed-out receive just means no request this
    /// cycle. Workers already running are left to finish.
    pub async fn run(&self, shutdown: ShutdownSignal) -> std::io::Result<()> {
        let mut buffer = [0u8; MAX_PACKET_SIZE];

        info!("Server started successfully");

        while !shutdown.is_triggered() {
            let (len, addr) =
                match timeout(self.poll_interval, self.socket.recv_from(&mut buffer)).await {
                    Err(_) => continue,
                    Ok(Err(e)) => {
                        error!("Error receiving packet: {}", e);
                        sleep(Duration::from_millis(10)).await;
                        continue;
                    }
                    Ok(Ok(received)) => received,
                };

            let Some(permit) = self.workers.try_acquire() else {
                warn!(
                    "All {} workers busy, dropping request from {}",
                    self.workers.size(),
                    addr
                );
                continue;
            };

            self.spawn_worker(permit, buffer[..len].to_vec(), addr);
        }

        info!("Server shutting down");
        Ok(())
    }

    /// Handles one request end to end on its own task
    fn spawn_worker(&self, permit: OwnedSemaphorePermit, payload: Vec<u8>, addr: SocketAddr) {
        let socket = Arc::clone(&self.socket);
        let registry = Arc::clone(&self.registry);

        tokio::spawn(async move {
            let response = match decode_request(&payload) {
                Some(request) => {
                    debug!("{} from {}", request.command(), addr);
                    let mut registry = registry.lock().await;
                    dispatch(&mut registry, request)
                }
                None => {
                    warn!("Unrecognised request from {}", addr);
                    unknown_command()
                }
            };

            if let Err(e) = send_packet(&socket, &response, addr).await {
                warn!("Failed to send {} to {}: {}", response.command(), addr, e);
            }

            drop(permit);
        });
    }
}

/// Decodes one datagram payload
///
/// `None` for anything that is not a `Packet`, and for response packets
/// sent back to the server.
pub fn decode_request(payload: &[u8]) -> Option<Packet> {
    deserialize::<Packet>(payload)
        .ok()
        .filter(Packet::is_request)
}

async fn send_packet(
    socket: &UdpSocket,
    packet: &Packet,
    addr: SocketAddr,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let data = serialize(packet)?;
    socket.send_to(&data, addr).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shutdown::ShutdownController;
    use crate::words::FixedWord;

    fn test_config() -> ServerConfig {
        ServerConfig {
            bind_addr: "127.0.0.1:0".to_string(),
            max_games: 4,
            max_workers: 4,
            poll_interval: Duration::from_millis(20),
        }
    }

    async fn request(socket: &UdpSocket, server: SocketAddr, packet: &Packet) -> Packet {
        let data = serialize(packet).unwrap();
        socket.send_to(&data, server).await.unwrap();

        let mut buf = [0u8; MAX_PACKET_SIZE];
        let (len, _) = timeout(Duration::from_secs(2), socket.recv_from(&mut buf))
            .await
            .expect("no response from server")
            .unwrap();
        deserialize(&buf[..len]).unwrap()
    }

    #[test]
    fn test_worker_pool_drops_when_saturated() {
        let pool = WorkerPool::new(2);
        assert_eq!(pool.size(), 2);

        let first = pool.try_acquire();
        let second = pool.try_acquire();
        assert!(first.is_some());
        assert!(second.is_some());
        assert_eq!(pool.available(), 0);
        assert!(pool.try_acquire().is_none());

        drop(first);
        assert_eq!(pool.available(), 1);
        assert!(pool.try_acquire().is_some());
    }

    #[test]
    fn test_worker_pool_clones_share_slots() {
        let pool = WorkerPool::new(1);
        let cloned = pool.clone();
        let _held = pool.try_acquire().unwrap();
        assert!(cloned.try_acquire().is_none());
    }

    #[test]
    fn test_decode_request() {
        let packet = Packet::GetGames;
        let data = serialize(&packet).unwrap();
        assert_eq!(decode_request(&data), Some(Packet::GetGames));

        assert_eq!(decode_request(&[]), None);
        assert_eq!(decode_request(&[0xff, 0xff, 0xff, 0xff]), None);
    }

    #[test]
    fn test_decode_request_rejects_responses() {
        let data = serialize(&Packet::GamesList { total_games: 2 }).unwrap();
        assert_eq!(decode_request(&data), None);

        let data = serialize(&Packet::fail("Game full")).unwrap();
        assert_eq!(decode_request(&data), None);
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let config = ServerConfig {
            max_workers: 0,
            ..test_config()
        };
        let result = tokio_test::block_on(Server::new(config));
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_server_answers_on_ephemeral_port() {
        let server = Server::with_word_source(test_config(), Box::new(FixedWord("house".into())))
            .await
            .unwrap();
        let addr = server.local_addr().unwrap();
        assert_ne!(addr.port(), 0);

        let (controller, signal) = ShutdownController::new();
        let server = Arc::new(server);
        let handle = {
            let server = Arc::clone(&server);
            tokio::spawn(async move { server.run(signal).await })
        };

        let client = UdpSocket::bind("127.0.0.1:0").await.unwrap();
        let response = request(&client, addr, &Packet::GetGames).await;
        assert_eq!(response, Packet::GamesList { total_games: 0 });

        let response = request(
            &client,
            addr,
            &Packet::NewGame {
                game_id: "ABC".into(),
                user_name: "alice".into(),
                player_cnt: 2,
            },
        )
        .await;
        assert!(matches!(response, Packet::GameOk { .. }));
        assert_eq!(server.registry().lock().await.list(), 1);

        controller.trigger();
        let result = timeout(Duration::from_secs(2), handle).await;
        assert!(result.is_ok(), "accept loop did not stop");
    }

    #[tokio::test]
    async fn test_garbage_datagram_gets_unknown_command() {
        let server = Server::with_word_source(test_config(), Box::new(FixedWord("house".into())))
            .await
            .unwrap();
        let addr = server.local_addr().unwrap();
        let (controller, signal) = ShutdownController::new();
        let server = Arc::new(server);
        let handle = {
            let server = Arc::clone(&server);
            tokio::spawn(async move { server.run(signal).await })
        };

        let client = UdpSocket::bind("127.0.0.1:0").await.unwrap();
        client.send_to(&[1, 2, 3], addr).await.unwrap();

        let mut buf = [0u8; MAX_PACKET_SIZE];
        let (len, from) = timeout(Duration::from_secs(2), client.recv_from(&mut buf))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(from, addr);
        let response: Packet = deserialize(&buf[..len]).unwrap();
        assert_eq!(response, unknown_command());

        controller.trigger();
        let _ = timeout(Duration::from_secs(2), handle).await;
    }

    #[tokio::test]
    async fn test_run_returns_when_already_shut_down() {
        let server = Server::new(test_config()).await.unwrap();
        let (controller, signal) = ShutdownController::new();
        controller.trigger();

        let result = timeout(Duration::from_millis(500), server.run(signal)).await;
        assert!(matches!(result, Ok(Ok(()))));
    }
}
