//! Shared handle to the single authoritative [`GameState`].
//!
//! Every operation takes the one mutex for its whole duration, so state transitions are
//! linearizable across connections. Callers get value copies back and must not do I/O
//! while a guard is alive; no guard ever escapes this module.

use crate::game::GameState;
use shared::{Command, Direction, GameStateView, PlayerId, Position};
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::Mutex;

#[derive(Debug, Clone)]
pub struct GameStore {
    state: Arc<Mutex<GameState>>,
}

impl GameStore {
    pub fn new(grid_size: u32) -> Self {
        Self {
            state: Arc::new(Mutex::new(GameState::new(grid_size))),
        }
    }

    pub async fn join(&self, player_id: &PlayerId) {
        self.state.lock().await.join(player_id);
    }

    pub async fn apply_move(&self, player_id: &PlayerId, direction: Direction) -> Position {
        self.state.lock().await.apply_move(player_id, direction)
    }

    pub async fn restart(&self, player_id: &PlayerId) -> bool {
        self.state.lock().await.restart(player_id)
    }

    pub async fn leave(&self, player_id: &PlayerId) -> bool {
        self.state.lock().await.leave(player_id)
    }

    pub async fn is_game_over(&self) -> bool {
        self.state.lock().await.is_game_over()
    }

    pub async fn winner(&self) -> Option<PlayerId> {
        self.state.lock().await.winner()
    }

    pub async fn scores(&self) -> BTreeMap<PlayerId, usize> {
        self.state.lock().await.scores()
    }

    pub async fn snapshot(&self, player_id: &PlayerId) -> GameStateView {
        self.state.lock().await.snapshot(player_id)
    }

    /// Runs one request (join, apply, snapshot) as a single critical section.
    pub async fn execute(&self, player_id: &PlayerId, command: Command) -> GameStateView {
        self.state.lock().await.execute(player_id, command)
    }

    pub async fn player_count(&self) -> usize {
        self.state.lock().await.players.len()
    }
}
