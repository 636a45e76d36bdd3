//! Errors that end a single client session.
//!
//! None of these affect other connections; the session loop logs them, removes the
//! player and drops the socket.

use std::time::Duration;

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("socket error: {0}")]
    Io(#[from] std::io::Error),

    #[error("command is not valid UTF-8: {0}")]
    Decode(#[from] std::str::Utf8Error),

    #[error("failed to encode snapshot: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("no command received for {0:?}")]
    IdleTimeout(Duration),
}
