//! Server network layer: TCP listener and per-connection session loop

use crate::config::ServerConfig;
use crate::error::SessionError;
use crate::identity::IdentityScheme;
use crate::store::GameStore;
use log::{debug, error, info, warn};
use shared::{Command, PlayerId, COMMAND_BUFFER_SIZE};
use std::net::SocketAddr;
use std::time::Duration;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio::net::TcpListener;

/// Accepts connections and spawns one session task per client
pub struct Server {
    listener: TcpListener,
    store: GameStore,
    id_scheme: IdentityScheme,
    idle_timeout: Option<Duration>,
}

impl Server {
    pub async fn bind(config: &ServerConfig) -> Result<Self, Box<dyn std::error::Error>> {
        let listener = TcpListener::bind(config.address()).await?;
        info!(
            "Server listening on {} ({}x{} grid)",
            listener.local_addr()?,
            config.grid_size,
            config.grid_size
        );

        Ok(Server {
            listener,
            store: GameStore::new(config.grid_size),
            id_scheme: config.id_scheme,
            idle_timeout: config.idle_timeout(),
        })
    }

    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Handle to the shared board, mainly for inspection in tests
    pub fn store(&self) -> GameStore {
        self.store.clone()
    }

    /// Accept loop; runs until the task is dropped
    pub async fn run(self) -> Result<(), Box<dyn std::error::Error>> {
        loop {
            let (stream, peer) = match self.listener.accept().await {
                Ok(accepted) => accepted,
                Err(e) => {
                    error!("Failed to accept connection: {}", e);
                    tokio::time::sleep(Duration::from_millis(10)).await;
                    continue;
                }
            };

            let player_id = self.id_scheme.assign(peer);
            let session = Session {
                player_id,
                peer,
                store: self.store.clone(),
                idle_timeout: self.idle_timeout,
            };

            tokio::spawn(async move {
                session.run(stream).await;
            });
        }
    }
}

/// One client connection, from accept to close
pub struct Session {
    pub player_id: PlayerId,
    pub peer: SocketAddr,
    pub store: GameStore,
    pub idle_timeout: Option<Duration>,
}

impl Session {
    /// Drives the request/response loop, then removes the player from the board
    pub async fn run<S>(self, mut stream: S)
    where
        S: AsyncRead + AsyncWrite + Unpin,
    {
        info!("New connection from {} as player {}", self.peer, self.player_id);
        self.store.join(&self.player_id).await;

        match self.serve(&mut stream).await {
            Ok(()) => info!("Connection closed from {}", self.peer),
            Err(SessionError::Decode(e)) => {
                warn!("Undecodable command from {}: {}", self.peer, e)
            }
            Err(SessionError::IdleTimeout(after)) => {
                warn!("Closing idle connection from {} after {:?}", self.peer, after)
            }
            Err(SessionError::Serialize(e)) => {
                error!("Failed to encode snapshot for {}: {}", self.peer, e)
            }
            Err(SessionError::Io(e)) => info!("Connection from {} lost: {}", self.peer, e),
        }

        self.store.leave(&self.player_id).await;
        let _ = stream.shutdown().await;
    }

    async fn serve<S>(&self, stream: &mut S) -> Result<(), SessionError>
    where
        S: AsyncRead + AsyncWrite + Unpin,
    {
        let mut buffer = [0u8; COMMAND_BUFFER_SIZE];

        loop {
            let len = self.read_command(stream, &mut buffer).await?;
            if len == 0 {
                return Ok(());
            }

            let text = std::str::from_utf8(&buffer[..len])?;
            let command = Command::parse(text);
            debug!("{} -> {:?}", self.player_id, command);

            // Lock is released before encoding and writing
            let view = self.store.execute(&self.player_id, command).await;
            let response = view.to_json()?;
            stream.write_all(&response).await?;
        }
    }

    async fn read_command<S>(&self, stream: &mut S, buffer: &mut [u8]) -> Result<usize, SessionError>
    where
        S: AsyncRead + Unpin,
    {
        match self.idle_timeout {
            Some(limit) => tokio::time::timeout(limit, stream.read(buffer))
                .await
                .map_err(|_| SessionError::IdleTimeout(limit))?
                .map_err(SessionError::from),
            None => Ok(stream.read(buffer).await?),
        }
    }
}
