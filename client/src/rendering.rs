use shared::{GameStateView, PlayerId, Position};
use std::collections::BTreeMap;
use std::fmt::Write;

/// Draws snapshots as plain text.
///
/// Every player seen in a snapshot gets a letter in id order. Claimed tiles show the
/// owner's letter in lowercase, tokens show it in uppercase, and free tiles show `.`.
pub struct Renderer {
    grid_size: u32,
}

impl Renderer {
    pub fn new(grid_size: u32) -> Self {
        Renderer { grid_size }
    }

    pub fn render(&self, view: &GameStateView) -> String {
        let glyphs = Self::assign_glyphs(view);
        let mut out = String::new();

        for y in 0..self.grid_size {
            for x in 0..self.grid_size {
                out.push(self.cell(view, &glyphs, Position::new(x, y)));
            }
            out.push('\n');
        }

        self.draw_scores(view, &glyphs, &mut out);

        if let Some(winner) = &view.winner {
            if *winner == view.your_id {
                out.push_str("Game over: you win! Type 'r' to play again.\n");
            } else {
                let _ = writeln!(out, "Game over: {} wins. Type 'r' to play again.", winner);
            }
        }

        out
    }

    fn cell(&self, view: &GameStateView, glyphs: &BTreeMap<&PlayerId, char>, pos: Position) -> char {
        let token = view
            .players
            .iter()
            .filter(|(_, p)| **p == pos)
            .map(|(id, _)| id)
            // Own token drawn on top when players share a cell
            .max_by_key(|id| **id == view.your_id);

        if let Some(id) = token {
            return glyphs[id];
        }

        match view.owner_of(pos) {
            Some(owner) => glyphs[owner].to_ascii_lowercase(),
            None => '.',
        }
    }

    fn draw_scores(&self, view: &GameStateView, glyphs: &BTreeMap<&PlayerId, char>, out: &mut String) {
        let scores = view.scores();
        let mut rows: Vec<(&PlayerId, usize)> = glyphs
            .keys()
            .map(|id| (*id, scores.get(id).copied().unwrap_or(0)))
            .collect();
        rows.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));

        for (id, score) in rows {
            let marker = if *id == view.your_id { " (you)" } else { "" };
            let _ = writeln!(out, "{} {:>4}  {}{}", glyphs[id], score, id, marker);
        }
    }

    fn assign_glyphs(view: &GameStateView) -> BTreeMap<&PlayerId, char> {
        let mut ids: Vec<&PlayerId> = view
            .players
            .keys()
            .chain(view.claimed.values())
            .chain(std::iter::once(&view.your_id))
            .collect();
        ids.sort();
        ids.dedup();

        ids.into_iter()
            .enumerate()
            .map(|(i, id)| {
                let glyph = (b'A' + (i % 26) as u8) as char;
                (id, glyph)
            })
            .collect()
    }
}
