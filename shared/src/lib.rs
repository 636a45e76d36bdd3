//! Protocol types shared by the grid server and its clients.
//!
//! The wire protocol is deliberately small: clients send one short ASCII command per write
//! and receive one JSON-encoded [`GameStateView`] per command.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;

/// Default side length of the square board.
pub const GRID_SIZE: u32 = 10;

/// Maximum number of bytes read for a single inbound command.
pub const COMMAND_BUFFER_SIZE: usize = 1024;

/// Opaque handle for a connected player.
///
/// Ordering is lexicographic on the underlying string and is used to break winner ties.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(String);

impl PlayerId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PlayerId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// A cell coordinate. Encoded on the wire as `[x, y]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(from = "(u32, u32)", into = "(u32, u32)")]
pub struct Position {
    pub x: u32,
    pub y: u32,
}

impl Position {
    pub const ORIGIN: Position = Position { x: 0, y: 0 };

    pub fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }

    pub fn in_bounds(&self, grid_size: u32) -> bool {
        self.x < grid_size && self.y < grid_size
    }

    /// Moves one cell in `direction`, clamped to `[0, grid_size - 1]` on both axes.
    pub fn step(self, direction: Direction, grid_size: u32) -> Self {
        let max = grid_size.saturating_sub(1);
        match direction {
            Direction::Up => Self::new(self.x, self.y.saturating_sub(1)),
            Direction::Down => Self::new(self.x, (self.y + 1).min(max)),
            Direction::Left => Self::new(self.x.saturating_sub(1), self.y),
            Direction::Right => Self::new((self.x + 1).min(max), self.y),
        }
    }

    /// Key used for this tile in the `claimed` map of a snapshot.
    pub fn tile_key(&self) -> String {
        format!("{},{}", self.x, self.y)
    }

    /// Parses an `"x,y"` tile key back into a position.
    pub fn from_tile_key(key: &str) -> Option<Self> {
        let (x, y) = key.split_once(',')?;
        Some(Self::new(x.trim().parse().ok()?, y.trim().parse().ok()?))
    }
}

impl From<(u32, u32)> for Position {
    fn from((x, y): (u32, u32)) -> Self {
        Self::new(x, y)
    }
}

impl From<Position> for (u32, u32) {
    fn from(pos: Position) -> Self {
        (pos.x, pos.y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    fn parse(word: &str) -> Option<Self> {
        match word {
            "UP" => Some(Self::Up),
            "DOWN" => Some(Self::Down),
            "LEFT" => Some(Self::Left),
            "RIGHT" => Some(Self::Right),
            _ => None,
        }
    }

    fn as_str(&self) -> &'static str {
        match self {
            Self::Up => "UP",
            Self::Down => "DOWN",
            Self::Left => "LEFT",
            Self::Right => "RIGHT",
        }
    }
}

/// A client request.
///
/// Parsing never fails: anything that is not a known command becomes [`Command::Unknown`],
/// which the server answers with a plain snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Hello,
    Ping,
    Move(Direction),
    Restart,
    Unknown,
}

impl Command {
    /// Parses a command case-insensitively, ignoring surrounding whitespace.
    pub fn parse(text: &str) -> Self {
        let normalized = text.trim().to_ascii_uppercase();
        match normalized.as_str() {
            "HELLO" => Self::Hello,
            "PING" => Self::Ping,
            "RESTART" => Self::Restart,
            other => other
                .strip_prefix("MOVE ")
                .and_then(Direction::parse)
                .map(Self::Move)
                .unwrap_or(Self::Unknown),
        }
    }

    /// Wire text for this command. `Unknown` encodes as a ping.
    pub fn to_wire(&self) -> String {
        match self {
            Self::Hello => "HELLO".to_string(),
            Self::Ping | Self::Unknown => "PING".to_string(),
            Self::Restart => "RESTART".to_string(),
            Self::Move(direction) => format!("MOVE {}", direction.as_str()),
        }
    }
}

/// Snapshot of the whole board, addressed to one player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameStateView {
    pub your_id: PlayerId,
    pub players: BTreeMap<PlayerId, Position>,
    pub claimed: BTreeMap<String, PlayerId>,
    pub winner: Option<PlayerId>,
}

impl GameStateView {
    pub fn to_json(&self) -> serde_json::Result<Vec<u8>> {
        serde_json::to_vec(self)
    }

    pub fn from_json(bytes: &[u8]) -> serde_json::Result<Self> {
        serde_json::from_slice(bytes)
    }

    pub fn owner_of(&self, pos: Position) -> Option<&PlayerId> {
        self.claimed.get(&pos.tile_key())
    }

    /// Tiles owned per player, as seen in this snapshot.
    pub fn scores(&self) -> HashMap<&PlayerId, usize> {
        let mut scores = HashMap::new();
        for owner in self.claimed.values() {
            *scores.entry(owner).or_insert(0) += 1;
        }
        scores
    }
}
