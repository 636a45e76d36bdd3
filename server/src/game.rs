//! Authoritative board state and the pure rules applied to it.
//!
//! Nothing in here performs I/O or locking; [`crate::store::GameStore`] owns the single
//! instance and serializes access to it.

use log::info;
use shared::{Command, Direction, GameStateView, PlayerId, Position, GRID_SIZE};
use std::collections::{BTreeMap, HashMap};

#[derive(Debug, Clone)]
pub struct GameState {
    grid_size: u32,
    pub players: HashMap<PlayerId, Position>,
    pub claimed: HashMap<Position, PlayerId>,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(GRID_SIZE)
    }
}

impl GameState {
    pub fn new(grid_size: u32) -> Self {
        assert!(grid_size > 0, "grid must have at least one tile");
        Self {
            grid_size,
            players: HashMap::new(),
            claimed: HashMap::new(),
        }
    }

    pub fn grid_size(&self) -> u32 {
        self.grid_size
    }

    pub fn tile_count(&self) -> usize {
        (self.grid_size as usize).pow(2)
    }

    /// Places a new player on the origin and claims it if nobody owns it yet.
    /// Joining twice leaves the existing position untouched.
    pub fn join(&mut self, player_id: &PlayerId) {
        if self.players.contains_key(player_id) {
            return;
        }
        self.players.insert(player_id.clone(), Position::ORIGIN);
        self.claim(Position::ORIGIN, player_id);
        info!("Player {} joined at (0, 0)", player_id);
    }

    /// Moves a player one cell, clamped to the board, and claims the landing tile.
    ///
    /// A player missing from `players` (discarded by another player's restart) moves from
    /// the origin and is re-inserted.
    pub fn apply_move(&mut self, player_id: &PlayerId, direction: Direction) -> Position {
        let current = self
            .players
            .get(player_id)
            .copied()
            .unwrap_or(Position::ORIGIN);
        let next = current.step(direction, self.grid_size);
        debug_assert!(next.in_bounds(self.grid_size));

        self.players.insert(player_id.clone(), next);
        self.claim(next, player_id);
        next
    }

    /// Resets the round, keeping only the requester. Returns `false` and changes nothing
    /// unless the board is fully claimed.
    pub fn restart(&mut self, player_id: &PlayerId) -> bool {
        if !self.is_game_over() {
            return false;
        }

        let discarded = self.players.len();
        self.players.clear();
        self.claimed.clear();
        self.join(player_id);

        info!(
            "Game restarted by {} ({} player entries discarded)",
            player_id, discarded
        );
        true
    }

    /// Removes the player's token. Tiles it claimed stay claimed.
    pub fn leave(&mut self, player_id: &PlayerId) -> bool {
        self.players.remove(player_id).is_some()
    }

    pub fn is_game_over(&self) -> bool {
        self.claimed.len() >= self.tile_count()
    }

    /// Claimed tiles per owner, including owners that have since disconnected.
    pub fn scores(&self) -> BTreeMap<PlayerId, usize> {
        let mut scores = BTreeMap::new();
        for owner in self.claimed.values() {
            *scores.entry(owner.clone()).or_insert(0) += 1;
        }
        scores
    }

    /// Owner of the most tiles once the board is full.
    ///
    /// Ties go to the smallest `PlayerId`: scores are scanned in ascending id order and
    /// only a strictly greater count replaces the current leader.
    pub fn winner(&self) -> Option<PlayerId> {
        if !self.is_game_over() {
            return None;
        }

        let mut leader: Option<(PlayerId, usize)> = None;
        for (player_id, count) in self.scores() {
            match &leader {
                Some((_, best)) if count <= *best => {}
                _ => leader = Some((player_id, count)),
            }
        }
        leader.map(|(player_id, _)| player_id)
    }

    pub fn snapshot(&self, requesting: &PlayerId) -> GameStateView {
        GameStateView {
            your_id: requesting.clone(),
            players: self
                .players
                .iter()
                .map(|(id, pos)| (id.clone(), *pos))
                .collect(),
            claimed: self
                .claimed
                .iter()
                .map(|(pos, owner)| (pos.tile_key(), owner.clone()))
                .collect(),
            winner: self.winner(),
        }
    }

    /// Applies one client command and returns the snapshot to send back.
    ///
    /// Every command first re-joins the player so that an entry discarded by a restart
    /// comes back on the next interaction. Restarts during play are ignored.
    pub fn execute(&mut self, player_id: &PlayerId, command: Command) -> GameStateView {
        self.join(player_id);

        match command {
            Command::Move(direction) => {
                self.apply_move(player_id, direction);
            }
            Command::Restart => {
                self.restart(player_id);
            }
            Command::Hello | Command::Ping | Command::Unknown => {}
        }

        self.snapshot(player_id)
    }

    fn claim(&mut self, pos: Position, player_id: &PlayerId) {
        let was_over = self.is_game_over();
        self.claimed.entry(pos).or_insert_with(|| player_id.clone());
        if !was_over && self.is_game_over() {
            info!("Board fully claimed; game over");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(name: &str) -> PlayerId {
        PlayerId::from(name)
    }

    /// Claims every tile on the board, assigning row `y` to `owners[y % owners.len()]`.
    fn fill_board(state: &mut GameState, owners: &[&str]) {
        for y in 0..state.grid_size() {
            for x in 0..state.grid_size() {
                let owner = id(owners[y as usize % owners.len()]);
                state.claimed.entry(Position::new(x, y)).or_insert(owner);
            }
        }
    }

    #[test]
    fn test_join_claims_origin() {
        let mut state = GameState::new(10);
        state.join(&id("A"));

        assert_eq!(state.players[&id("A")], Position::ORIGIN);
        assert_eq!(state.claimed[&Position::ORIGIN], id("A"));
    }

    #[test]
    fn test_join_is_idempotent() {
        let mut state = GameState::new(10);
        state.join(&id("A"));
        state.apply_move(&id("A"), Direction::Right);
        state.join(&id("A"));

        assert_eq!(state.players[&id("A")], Position::new(1, 0));
        assert_eq!(state.players.len(), 1);
        assert_eq!(state.claimed.len(), 2);
    }

    #[test]
    fn test_second_player_does_not_reclaim_origin() {
        let mut state = GameState::new(10);
        state.join(&id("A"));
        state.join(&id("B"));

        assert_eq!(state.players[&id("B")], Position::ORIGIN);
        assert_eq!(state.claimed[&Position::ORIGIN], id("A"));
    }

    #[test]
    fn test_moves_claim_tiles() {
        let mut state = GameState::new(10);
        state.join(&id("A"));
        for _ in 0..3 {
            state.apply_move(&id("A"), Direction::Right);
        }

        assert_eq!(state.players[&id("A")], Position::new(3, 0));
        for x in 0..=3 {
            assert_eq!(state.claimed[&Position::new(x, 0)], id("A"));
        }
    }

    #[test]
    fn test_moves_clamp_at_edges() {
        let mut state = GameState::new(3);
        state.join(&id("A"));

        state.apply_move(&id("A"), Direction::Up);
        state.apply_move(&id("A"), Direction::Left);
        assert_eq!(state.players[&id("A")], Position::ORIGIN);
        assert_eq!(state.claimed.len(), 1);

        for _ in 0..5 {
            state.apply_move(&id("A"), Direction::Down);
            state.apply_move(&id("A"), Direction::Right);
        }
        assert_eq!(state.players[&id("A")], Position::new(2, 2));
    }

    #[test]
    fn test_positions_stay_in_bounds_for_all_move_sequences() {
        let mut state = GameState::new(4);
        state.join(&id("A"));

        // Cycle through directions with uneven run lengths to hit every edge.
        for step in 0..200u32 {
            let direction = Direction::ALL[((step * 7) / 3) as usize % 4];
            let pos = state.apply_move(&id("A"), direction);
            assert!(pos.in_bounds(4), "out of bounds at step {}: {:?}", step, pos);
        }
    }

    #[test]
    fn test_claims_are_never_reassigned() {
        let mut state = GameState::new(10);
        state.join(&id("A"));
        state.apply_move(&id("A"), Direction::Right);

        state.join(&id("B"));
        state.apply_move(&id("B"), Direction::Right);
        state.apply_move(&id("B"), Direction::Left);

        assert_eq!(state.claimed[&Position::new(0, 0)], id("A"));
        assert_eq!(state.claimed[&Position::new(1, 0)], id("A"));
        assert_eq!(state.players[&id("B")], Position::ORIGIN);
    }

    #[test]
    fn test_move_without_join_starts_from_origin() {
        let mut state = GameState::new(10);
        let pos = state.apply_move(&id("ghost"), Direction::Down);

        assert_eq!(pos, Position::new(0, 1));
        assert_eq!(state.players[&id("ghost")], Position::new(0, 1));
        assert_eq!(state.claimed[&Position::new(0, 1)], id("ghost"));
    }

    #[test]
    fn test_game_over_only_when_full() {
        let mut state = GameState::new(2);
        state.join(&id("A"));
        assert!(!state.is_game_over());

        state.apply_move(&id("A"), Direction::Right);
        state.apply_move(&id("A"), Direction::Down);
        assert_eq!(state.claimed.len(), 3);
        assert!(!state.is_game_over());
        assert_eq!(state.winner(), None);

        state.apply_move(&id("A"), Direction::Left);
        assert_eq!(state.claimed.len(), 4);
        assert!(state.is_game_over());
        assert_eq!(state.winner(), Some(id("A")));
    }

    #[test]
    fn test_winner_has_most_tiles() {
        let mut state = GameState::new(3);
        // Rows 0 and 2 go to A, row 1 to B.
        fill_board(&mut state, &["A", "B"]);

        assert_eq!(state.scores()[&id("A")], 6);
        assert_eq!(state.scores()[&id("B")], 3);
        assert_eq!(state.winner(), Some(id("A")));
    }

    #[test]
    fn test_winner_tie_goes_to_smallest_id() {
        let mut state = GameState::new(2);
        fill_board(&mut state, &["zed", "amy"]);

        assert_eq!(state.scores()[&id("zed")], 2);
        assert_eq!(state.scores()[&id("amy")], 2);
        assert_eq!(state.winner(), Some(id("amy")));
    }

    #[test]
    fn test_winner_counts_disconnected_owners() {
        let mut state = GameState::new(2);
        state.join(&id("A"));
        fill_board(&mut state, &["B"]);
        state.leave(&id("B"));

        assert_eq!(state.scores()[&id("A")], 1);
        assert_eq!(state.winner(), Some(id("B")));
    }

    #[test]
    fn test_restart_ignored_while_playing() {
        let mut state = GameState::new(3);
        state.join(&id("A"));
        state.join(&id("B"));
        state.apply_move(&id("B"), Direction::Down);

        let players_before = state.players.clone();
        let claimed_before = state.claimed.clone();

        assert!(!state.restart(&id("A")));
        assert_eq!(state.players, players_before);
        assert_eq!(state.claimed, claimed_before);
    }

    #[test]
    fn test_restart_after_game_over_resets_to_requester() {
        let mut state = GameState::new(2);
        state.join(&id("A"));
        state.join(&id("B"));
        fill_board(&mut state, &["A", "B"]);
        assert!(state.is_game_over());

        assert!(state.restart(&id("B")));

        assert_eq!(state.players.len(), 1);
        assert_eq!(state.players[&id("B")], Position::ORIGIN);
        assert_eq!(state.claimed.len(), 1);
        assert_eq!(state.claimed[&Position::ORIGIN], id("B"));
        assert!(!state.is_game_over());
        assert_eq!(state.winner(), None);
    }

    #[test]
    fn test_leave_keeps_claims() {
        let mut state = GameState::new(10);
        state.join(&id("A"));
        state.apply_move(&id("A"), Direction::Down);

        assert!(state.leave(&id("A")));
        assert!(!state.leave(&id("A")));
        assert!(state.players.is_empty());
        assert_eq!(state.claimed[&Position::new(0, 1)], id("A"));
    }

    #[test]
    fn test_snapshot_contents() {
        let mut state = GameState::new(10);
        state.join(&id("A"));
        state.apply_move(&id("A"), Direction::Right);
        state.join(&id("B"));

        let view = state.snapshot(&id("B"));
        assert_eq!(view.your_id, id("B"));
        assert_eq!(view.players[&id("A")], Position::new(1, 0));
        assert_eq!(view.players[&id("B")], Position::ORIGIN);
        assert_eq!(view.claimed["0,0"], id("A"));
        assert_eq!(view.claimed["1,0"], id("A"));
        assert_eq!(view.winner, None);
    }

    #[test]
    fn test_execute_rejoins_after_foreign_restart() {
        let mut state = GameState::new(1);
        state.join(&id("A"));
        state.join(&id("B"));
        assert!(state.is_game_over());

        state.execute(&id("A"), Command::Restart);
        assert!(!state.players.contains_key(&id("B")));

        // 1x1 board is full again right after the restart.
        let view = state.execute(&id("B"), Command::Ping);
        assert_eq!(view.players[&id("B")], Position::ORIGIN);
        assert_eq!(view.claimed["0,0"], id("A"));
        assert_eq!(view.winner, Some(id("A")));
    }

    #[test]
    fn test_execute_unknown_is_query_only() {
        let mut state = GameState::new(10);
        state.execute(&id("A"), Command::Move(Direction::Down));

        let before = state.snapshot(&id("A"));
        let after = state.execute(&id("A"), Command::Unknown);
        assert_eq!(before, after);
    }
}
