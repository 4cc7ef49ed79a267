#![no_std]

extern crate alloc;

use alloc::vec::Vec;
use core::ops::{BitOr, Index};
use ndarray::Array2;
use serde::{Deserialize, Serialize};

pub use board::*;
pub use cell::*;
pub use config::*;
pub use engine::*;
pub use error::*;
pub use generator::*;
pub use preset::*;
pub use types::*;

mod board;
mod cell;
mod config;
mod engine;
mod error;
mod generator;
mod number;
mod preset;
mod types;

/// Signed mine values of a whole board, the solution of one game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MineLayout {
    mines: Array2<MineValue>,
    mine_tiles: CellCount,
}

impl MineLayout {
    pub fn from_mine_values(mines: Array2<MineValue>) -> Self {
        let mine_tiles = mines
            .iter()
            .filter(|&&mine| mine != 0)
            .count()
            .try_into()
            .unwrap_or(CellCount::MAX);
        Self { mines, mine_tiles }
    }

    pub fn from_mine_coords(size: Coord2, mine_coords: &[(Coord2, MineValue)]) -> Result<Self> {
        let mut mines: Array2<MineValue> = Array2::zeros(size.to_nd_index());

        for &(coords, mine) in mine_coords {
            if coords.0 >= size.0 || coords.1 >= size.1 {
                return Err(GameError::InvalidCoords);
            }
            mines[coords.to_nd_index()] = mine;
        }

        Ok(Self::from_mine_values(mines))
    }

    /// Builds a layout from row-major nested rows, as stored in game records.
    pub fn from_rows(rows: &[Vec<MineValue>]) -> Result<Self> {
        let height = rows.len();
        let width = rows.first().map_or(0, Vec::len);
        if height == 0 || width == 0 || rows.iter().any(|row| row.len() != width) {
            return Err(GameError::InvalidBoardShape);
        }
        if height > Coord::MAX.into() || width > Coord::MAX.into() {
            return Err(GameError::InvalidBoardShape);
        }

        let mines = Array2::from_shape_fn((height, width), |(row, col)| rows[row][col]);
        Ok(Self::from_mine_values(mines))
    }

    pub fn to_rows(&self) -> Vec<Vec<MineValue>> {
        self.mines.rows().into_iter().map(|row| row.to_vec()).collect()
    }

    /// `(height, width)`
    pub fn size(&self) -> Coord2 {
        let (rows, cols) = self.mines.dim();
        (
            rows.try_into().unwrap_or(Coord::MAX),
            cols.try_into().unwrap_or(Coord::MAX),
        )
    }

    pub fn mine_tiles(&self) -> CellCount {
        self.mine_tiles
    }

    pub fn contains_mine(&self, coords: Coord2) -> bool {
        self[coords] != 0
    }

    /// Total magnitude of positive mines.
    pub fn positive_total(&self) -> CellCount {
        self.mines
            .iter()
            .filter(|&&mine| mine > 0)
            .fold(0, |total: CellCount, &mine| {
                total.saturating_add(mine.unsigned_abs().into())
            })
    }

    /// Total magnitude of negative mines.
    pub fn negative_total(&self) -> CellCount {
        self.mines
            .iter()
            .filter(|&&mine| mine < 0)
            .fold(0, |total: CellCount, &mine| {
                total.saturating_add(mine.unsigned_abs().into())
            })
    }

    pub fn iter(&self) -> impl Iterator<Item = (Coord2, MineValue)> + '_ {
        self.mines
            .indexed_iter()
            .map(|((row, col), &mine)| ((row as Coord, col as Coord), mine))
    }

    pub(crate) fn into_values(self) -> Array2<MineValue> {
        self.mines
    }
}

impl Index<Coord2> for MineLayout {
    type Output = MineValue;

    fn index(&self, (row, col): Coord2) -> &Self::Output {
        &self.mines[(row as usize, col as usize)]
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum MarkOutcome {
    NoChange,
    Changed,
}

impl MarkOutcome {
    pub const fn has_update(self) -> bool {
        match self {
            Self::NoChange => false,
            Self::Changed => true,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum RevealOutcome {
    NoChange,
    Revealed,
    HitMine,
}

impl RevealOutcome {
    pub const fn has_update(self) -> bool {
        use RevealOutcome::*;
        match self {
            NoChange => false,
            Revealed => true,
            HitMine => true,
        }
    }
}

/// Used to merge outcomes when chording opens several cells
impl BitOr for RevealOutcome {
    type Output = RevealOutcome;

    fn bitor(self, rhs: Self) -> Self::Output {
        use RevealOutcome::*;
        match (self, rhs) {
            (HitMine, _) => HitMine,
            (_, HitMine) => HitMine,
            (Revealed, _) => Revealed,
            (_, Revealed) => Revealed,
            (NoChange, NoChange) => NoChange,
        }
    }
}

/// Terminal condition of a board, derived on demand.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameOutcome {
    Ongoing,
    Win,
    Loss { trigger: Coord2 },
}

impl GameOutcome {
    pub const fn is_finished(self) -> bool {
        !matches!(self, Self::Ongoing)
    }
}

/// Flags still to be placed per polarity, negative when over-flagged.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemainingFlags {
    pub positive: isize,
    pub negative: isize,
}
