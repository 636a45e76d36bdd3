//! TCP protocol client: one command out, one JSON snapshot back

use log::debug;
use shared::{Command, GameStateView};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpStream, ToSocketAddrs};

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("socket error: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed snapshot: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("server closed the connection")]
    Closed,
}

pub struct GameClient {
    stream: TcpStream,
    buffer: Vec<u8>,
}

impl GameClient {
    pub async fn connect(addr: impl ToSocketAddrs) -> Result<Self, ClientError> {
        let stream = TcpStream::connect(addr).await?;
        stream.set_nodelay(true)?;
        Ok(GameClient {
            stream,
            buffer: Vec::with_capacity(4096),
        })
    }

    /// Sends a command and waits for its snapshot.
    ///
    /// The response is unframed, so bytes are accumulated until they form one complete
    /// JSON document; a large board may arrive in several segments.
    pub async fn send_command(&mut self, command: Command) -> Result<GameStateView, ClientError> {
        let wire = command.to_wire();
        debug!("Sending {}", wire);
        self.stream.write_all(wire.as_bytes()).await?;

        self.buffer.clear();
        let mut chunk = [0u8; 4096];
        loop {
            let len = self.stream.read(&mut chunk).await?;
            if len == 0 {
                return Err(ClientError::Closed);
            }
            self.buffer.extend_from_slice(&chunk[..len]);

            match GameStateView::from_json(&self.buffer) {
                Ok(view) => return Ok(view),
                Err(e) if e.is_eof() => continue,
                Err(e) => return Err(e.into()),
            }
        }
    }
}
