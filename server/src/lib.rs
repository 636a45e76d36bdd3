//! # Grid Server Library
//!
//! Authoritative server for the grid claiming game. Every connected player moves a token
//! around a square board and permanently claims each tile it lands on first. When the
//! whole board is claimed the player owning the most tiles wins, and any player may
//! restart the round.
//!
//! ## Architecture
//!
//! ### Game State Store
//! [`game::GameState`] holds player positions and claimed tiles together with the pure
//! rules (join, move, restart, leave, winner). [`store::GameStore`] wraps the one instance
//! in a single `tokio::sync::Mutex`; each operation is one critical section, so concurrent
//! sessions observe a total order of state transitions.
//!
//! ### Sessions
//! [`network::Server`] accepts TCP connections and spawns a [`network::Session`] task for
//! each. A session reads one text command, applies it through the store, and writes one
//! JSON snapshot back before reading again. There are no server-initiated pushes.
//!
//! ### Identity
//! Player ids are derived from the peer address by [`identity::IdentityScheme`], kept
//! separate from game logic so a real session layer could replace it.
//!
//! ## Protocol
//!
//! | Command | Effect |
//! |---|---|
//! | `HELLO`, `PING` | snapshot only |
//! | `MOVE UP/DOWN/LEFT/RIGHT` | move one cell (clamped), claim the tile if free |
//! | `RESTART` | reset the board, only once it is fully claimed |
//! | anything else | snapshot only |
//!
//! Commands are case-insensitive. Malformed or illegal commands never produce an error
//! response; a connection is only closed on transport or decoding failure.
//!
//! ## Usage Example
//!
//! ```rust,no_run
//! use server::config::ServerConfig;
//! use server::network::Server;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ServerConfig {
//!         host: "127.0.0.1".to_string(),
//!         ..ServerConfig::default()
//!     };
//!
//!     let server = Server::bind(&config).await?;
//!     server.run().await?;
//!
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod game;
pub mod identity;
pub mod network;
pub mod store;
