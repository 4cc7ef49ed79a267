use anyhow::Context;
use polysweep_core::{Coord, Game, GameError};
use serde::Deserialize;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Action {
    Reveal,
    Chord,
    Flag,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct Move {
    pub action: Action,
    pub row: Coord,
    pub col: Coord,
}

/// Scripted moves, read from TOML as a list of `[[moves]]` tables.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct MoveScript {
    #[serde(default)]
    pub moves: Vec<Move>,
}

impl MoveScript {
    pub fn parse(text: &str) -> anyhow::Result<Self> {
        toml::from_str(text).context("Could not parse move script")
    }

    /// Plays moves in order until the game ends, returning how many were applied.
    pub fn apply(&self, game: &mut Game) -> anyhow::Result<usize> {
        for (index, mv) in self.moves.iter().enumerate() {
            let coords = (mv.row, mv.col);
            let result = match mv.action {
                Action::Reveal => game.reveal(coords).map(|outcome| outcome.has_update()),
                Action::Chord => game.chord(coords).map(|outcome| outcome.has_update()),
                Action::Flag => game.cycle_flag(coords).map(|outcome| outcome.has_update()),
            };

            match result {
                Ok(changed) => log::debug!("move {}: {:?} changed: {}", index, mv, changed),
                Err(GameError::AlreadyEnded) => {
                    log::info!("Game ended, skipping {} remaining moves", self.moves.len() - index);
                    return Ok(index);
                }
                Err(err) => return Err(err).with_context(|| format!("move {index}: {mv:?}")),
            }
        }
        Ok(self.moves.len())
    }
}
