//! Command-line configuration for the server binary.

use crate::identity::IdentityScheme;
use clap::Parser;
use shared::GRID_SIZE;
use std::time::Duration;

#[derive(Parser, Debug, Clone)]
#[command(author, version, about = "Authoritative server for the grid claiming game")]
pub struct ServerConfig {
    /// Server IP address to bind to
    #[arg(short = 'H', long, default_value = "0.0.0.0")]
    pub host: String,

    /// Server port to listen on
    #[arg(short, long, default_value_t = 8080)]
    pub port: u16,

    /// Side length of the square board
    #[arg(short, long, default_value_t = GRID_SIZE, value_parser = clap::value_parser!(u32).range(1..=1024))]
    pub grid_size: u32,

    /// Close sessions that send nothing for this many seconds (disabled when unset)
    #[arg(long)]
    pub idle_timeout_secs: Option<u64>,

    /// How player ids are derived from the peer address
    #[arg(long, value_enum, default_value_t = IdentityScheme::Endpoint)]
    pub id_scheme: IdentityScheme,
}

impl ServerConfig {
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn idle_timeout(&self) -> Option<Duration> {
        self.idle_timeout_secs
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            grid_size: GRID_SIZE,
            idle_timeout_secs: None,
            id_scheme: IdentityScheme::Endpoint,
        }
    }
}
