use rand::prelude::*;
use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameState {
    #[default]
    Ready,
    Active,
    Won,
    Lost,
}

impl GameState {
    pub const fn is_ready(self) -> bool {
        matches!(self, Self::Ready)
    }

    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

/// One game from generation to win or loss: a board, the variant it is played under, and the
/// random source for lying numbers and first-move protection.
#[derive(Clone, Debug)]
pub struct Game {
    config: VariantConfig,
    board: Board,
    rng: SmallRng,
    start_tile: StartTile,
    state: GameState,
}

impl Game {
    pub fn new(config: VariantConfig, seed: u64, start_tile: StartTile) -> Result<Self> {
        let mut rng = SmallRng::seed_from_u64(seed);
        let layout = place_mines(&config, None, &mut rng)?;
        log::debug!("New game, seed: {}, config: {:?}", seed, config);

        Ok(Self {
            config,
            board: Board::from_layout(layout),
            rng,
            start_tile,
            state: GameState::Ready,
        })
    }

    /// Replays a stored layout. The first move is never altered.
    pub fn from_layout(config: VariantConfig, layout: MineLayout, seed: u64) -> Result<Self> {
        config.validate()?;
        config.check_layout(&layout)?;

        Ok(Self {
            config,
            board: Board::from_layout(layout),
            rng: SmallRng::seed_from_u64(seed),
            start_tile: StartTile::Random,
            state: GameState::Ready,
        })
    }

    pub fn config(&self) -> &VariantConfig {
        &self.config
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn is_finished(&self) -> bool {
        self.state.is_finished()
    }

    pub fn size(&self) -> Coord2 {
        self.config.size
    }

    pub fn cell_at(&self, coords: Coord2) -> Option<Cell> {
        self.board.get(coords)
    }

    pub fn outcome(&self) -> GameOutcome {
        self.board.evaluate()
    }

    pub fn triggered_mine(&self) -> Option<Coord2> {
        self.board.triggered_mine()
    }

    pub fn remaining_flags(&self) -> RemainingFlags {
        self.board.remaining_flags()
    }

    pub fn mine_layout(&self) -> MineLayout {
        self.board.mine_layout()
    }

    pub fn can_chord_at(&self, coords: Coord2) -> bool {
        !self.state.is_finished() && self.board.can_chord_at(coords, &self.config)
    }

    pub fn reveal(&mut self, coords: Coord2) -> Result<RevealOutcome> {
        self.check_not_finished()?;

        if self.state.is_ready()
            && self
                .board
                .get(coords)
                .is_some_and(|cell| cell.visibility.is_hidden())
        {
            self.protect_first_move(coords)?;
        }

        let outcome = self.board.reveal(coords, &self.config, &mut self.rng);
        Ok(self.update_state(outcome))
    }

    pub fn chord(&mut self, coords: Coord2) -> Result<RevealOutcome> {
        self.check_not_finished()?;

        let outcome = self.board.chord(coords, &self.config, &mut self.rng);
        Ok(self.update_state(outcome))
    }

    pub fn cycle_flag(&mut self, coords: Coord2) -> Result<MarkOutcome> {
        self.check_not_finished()?;

        Ok(self.board.cycle_flag(coords, &self.config))
    }

    fn protect_first_move(&mut self, coords: Coord2) -> Result<()> {
        use StartTile::*;

        if !self.board[coords].has_mine() {
            return Ok(());
        }

        match self.start_tile {
            Random => {}
            Relocate => {
                self.board.relocate_mine(coords, &mut self.rng);
            }
            SimpleSafe => {
                log::debug!("First move on a mine, placing mines again around {:?}", coords);
                let layout = place_mines(&self.config, Some(coords), &mut self.rng)?;
                self.board.set_mines(layout);
            }
        }
        Ok(())
    }

    fn update_state(&mut self, outcome: RevealOutcome) -> RevealOutcome {
        if !outcome.has_update() {
            return outcome;
        }

        match self.board.evaluate() {
            GameOutcome::Ongoing => self.mark_started(),
            GameOutcome::Win => self.end_game(true),
            GameOutcome::Loss { trigger } => {
                log::debug!("Mine triggered at {:?}", trigger);
                self.end_game(false);
            }
        }
        outcome
    }

    fn mark_started(&mut self) {
        if matches!(self.state, GameState::Ready) {
            self.state = GameState::Active;
        }
    }

    fn end_game(&mut self, won: bool) {
        if self.state.is_finished() {
            return;
        }

        self.state = if won { GameState::Won } else { GameState::Lost };
        log::debug!("Game ended: {:?}", self.state);
    }

    fn check_not_finished(&self) -> Result<()> {
        if self.state.is_finished() {
            Err(GameError::AlreadyEnded)
        } else {
            Ok(())
        }
    }
}
