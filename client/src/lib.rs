//! # Game Client Library
//!
//! Thin client for the grid claiming game. The server is fully authoritative, so the
//! client keeps no game state of its own: it sends one command, receives one snapshot,
//! and draws it.
//!
//! ## Module Organization
//!
//! - [`network`]: TCP connection and snapshot decoding
//! - [`input`]: maps typed keys (WASD, arrow words, raw commands) to protocol commands
//! - [`rendering`]: draws a snapshot as a text grid with a score table
//!
//! ## Usage Example
//!
//! ```rust,no_run
//! use client::network::GameClient;
//! use client::rendering::Renderer;
//! use shared::{Command, Direction, GRID_SIZE};
//!
//! # async fn demo() -> Result<(), Box<dyn std::error::Error>> {
//! let mut client = GameClient::connect("127.0.0.1:8080").await?;
//! let renderer = Renderer::new(GRID_SIZE);
//!
//! client.send_command(Command::Hello).await?;
//! let view = client.send_command(Command::Move(Direction::Right)).await?;
//! print!("{}", renderer.render(&view));
//! # Ok(())
//! # }
//! ```

pub mod input;
pub mod network;
pub mod rendering;
