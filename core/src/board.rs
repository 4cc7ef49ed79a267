use alloc::collections::VecDeque;
use alloc::vec::Vec;
use core::ops::Index;
use ndarray::{Array2, Zip};
use rand::Rng;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::*;

/// Grid of cells for one game, indexed `(row, col)`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    pub(crate) cells: Array2<Cell>,
}

impl Board {
    pub fn from_layout(layout: MineLayout) -> Self {
        Self {
            cells: layout.into_values().mapv(Cell::hidden),
        }
    }

    /// `(height, width)`
    pub fn size(&self) -> Coord2 {
        let (rows, cols) = self.cells.dim();
        (
            rows.try_into().unwrap_or(Coord::MAX),
            cols.try_into().unwrap_or(Coord::MAX),
        )
    }

    pub fn contains(&self, (row, col): Coord2) -> bool {
        let (height, width) = self.size();
        row < height && col < width
    }

    pub fn get(&self, coords: Coord2) -> Option<Cell> {
        self.contains(coords).then(|| self[coords])
    }

    /// Every cell in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = (Coord2, Cell)> + '_ {
        self.cells
            .indexed_iter()
            .map(|((row, col), &cell)| ((row as Coord, col as Coord), cell))
    }

    pub fn neighbors(&self, coords: Coord2, config: &VariantConfig) -> NeighborIter {
        self.cells.iter_neighbors(coords, config.neighborhood)
    }

    /// Signed solution of this board.
    pub fn mine_layout(&self) -> MineLayout {
        MineLayout::from_mine_values(self.cells.mapv(|cell| cell.mine))
    }

    /// Replaces the mine values, keeping every cell's visibility.
    pub(crate) fn set_mines(&mut self, layout: MineLayout) {
        Zip::from(&mut self.cells)
            .and(&layout.into_values())
            .for_each(|cell, &mine| cell.mine = mine);
    }

    fn check_config(&self, config: &VariantConfig) {
        assert_eq!(
            self.size(),
            config.size,
            "board size does not match the variant config"
        );
    }

    /// Reveals a hidden cell, cascading through cells without any neighboring mine.
    pub fn reveal<R: Rng + ?Sized>(
        &mut self,
        coords: Coord2,
        config: &VariantConfig,
        rng: &mut R,
    ) -> RevealOutcome {
        self.check_config(config);

        if !self.contains(coords) || !self[coords].visibility.is_hidden() {
            return RevealOutcome::NoChange;
        }

        let number = self.reveal_single_cell(coords, config, rng);
        if self[coords].has_mine() {
            log::debug!("Revealed mine at {:?}", coords);
            return RevealOutcome::HitMine;
        }
        log::debug!("Revealed cell at {:?}, number: {:?}", coords, number);

        if opens_neighbors(number, config) {
            let mut to_visit: VecDeque<_> = self.cascade_targets(coords, config).collect();
            log::trace!(
                "Starting flood-fill from {:?}, initial neighbors: {:?}",
                coords,
                to_visit
            );

            while let Some(visit_coords) = to_visit.pop_front() {
                // reached earlier through another path
                if !self[visit_coords].visibility.is_hidden() {
                    continue;
                }

                let visit_number = self.reveal_single_cell(visit_coords, config, rng);
                log::trace!(
                    "Flood revealed cell at {:?}, number: {:?}",
                    visit_coords,
                    visit_number
                );

                if opens_neighbors(visit_number, config) {
                    to_visit.extend(self.cascade_targets(visit_coords, config));
                }
            }
        }

        RevealOutcome::Revealed
    }

    fn reveal_single_cell<R: Rng + ?Sized>(
        &mut self,
        coords: Coord2,
        config: &VariantConfig,
        rng: &mut R,
    ) -> Option<Number> {
        let number = self.displayed_number(coords, config, rng);
        self.cells[coords.to_nd_index()].visibility = Visibility::Revealed(number);
        number
    }

    /// Hidden mine-free neighbors, the only cells a cascade may open.
    fn cascade_targets(
        &self,
        coords: Coord2,
        config: &VariantConfig,
    ) -> impl Iterator<Item = Coord2> + '_ {
        self.neighbors(coords, config).filter(move |&pos| {
            let cell = self[pos];
            cell.visibility.is_hidden() && !cell.has_mine()
        })
    }

    fn hidden_neighbors(&self, coords: Coord2, config: &VariantConfig) -> SmallVec<[Coord2; 8]> {
        self.neighbors(coords, config)
            .filter(|&pos| self[pos].visibility.is_hidden())
            .collect()
    }

    /// Whether the flags around a revealed number allow opening the rest of its neighbors.
    pub fn can_chord_at(&self, coords: Coord2, config: &VariantConfig) -> bool {
        if !self.contains(coords) {
            return false;
        }
        let Visibility::Revealed(Some(number)) = self[coords].visibility else {
            return false;
        };

        let flag_sum = self.flag_sum(coords, config);
        let hidden = self.hidden_neighbors(coords, config);

        if config.is_liar() {
            number == flag_sum - 1 || (hidden.len() == 1 && number == flag_sum + 1)
        } else if config.neg_mines.is_available() {
            hidden.len() == 1 && flag_sum == number
        } else if matches!(config.transform, NumberTransform::Contrast) {
            let odd_hidden = hidden.iter().any(|&pos| is_odd_cell(pos));
            let even_hidden = hidden.iter().any(|&pos| !is_odd_cell(pos));
            flag_sum == number && !(odd_hidden && even_hidden)
        } else {
            flag_sum == number
        }
    }

    /// Reveals every hidden neighbor of a satisfied revealed number.
    pub fn chord<R: Rng + ?Sized>(
        &mut self,
        coords: Coord2,
        config: &VariantConfig,
        rng: &mut R,
    ) -> RevealOutcome {
        self.check_config(config);

        if !self.can_chord_at(coords, config) {
            return RevealOutcome::NoChange;
        }
        log::debug!("Chording at {:?}", coords);

        let mut outcome = RevealOutcome::NoChange;
        for pos in self.hidden_neighbors(coords, config) {
            outcome = outcome | self.reveal(pos, config, rng);
        }
        outcome
    }

    /// Steps a cell through `Hidden → +1 … +max → -1 … -max → Hidden`, skipping the arms whose
    /// polarity has no mines.
    pub fn cycle_flag(&mut self, coords: Coord2, config: &VariantConfig) -> MarkOutcome {
        use Visibility::*;

        self.check_config(config);

        if !self.contains(coords) {
            return MarkOutcome::NoChange;
        }

        let max = config.max_mines_per_cell.min(MAX_MINES_PER_CELL);
        let next = match self[coords].visibility {
            Revealed(_) => return MarkOutcome::NoChange,
            Hidden if config.pos_mines.is_available() => Flagged(1),
            Hidden if config.neg_mines.is_available() => Flagged(-1),
            Hidden => return MarkOutcome::NoChange,
            Flagged(flag) if flag > 0 => {
                if flag.unsigned_abs() < max {
                    Flagged(flag + 1)
                } else if config.neg_mines.is_available() {
                    Flagged(-1)
                } else {
                    Hidden
                }
            }
            Flagged(flag) => {
                if flag.unsigned_abs() < max {
                    Flagged(flag - 1)
                } else {
                    Hidden
                }
            }
        };

        log::debug!("Flag at {:?} set to {:?}", coords, next);
        self.cells[coords.to_nd_index()].visibility = next;
        MarkOutcome::Changed
    }

    /// First revealed mine in row-major order.
    pub fn triggered_mine(&self) -> Option<Coord2> {
        self.cells()
            .find(|(_, cell)| cell.is_exploded())
            .map(|(coords, _)| coords)
    }

    pub fn evaluate(&self) -> GameOutcome {
        if let Some(trigger) = self.triggered_mine() {
            GameOutcome::Loss { trigger }
        } else if self
            .cells
            .iter()
            .all(|cell| cell.has_mine() || cell.visibility.is_revealed())
        {
            GameOutcome::Win
        } else {
            GameOutcome::Ongoing
        }
    }

    pub fn remaining_flags(&self) -> RemainingFlags {
        let mut remaining = RemainingFlags::default();

        for cell in self.cells.iter() {
            let mine = isize::from(cell.mine);
            let flag = isize::from(cell.visibility.flag_value());
            if mine > 0 {
                remaining.positive += mine;
            } else {
                remaining.negative -= mine;
            }
            if flag > 0 {
                remaining.positive -= flag;
            } else {
                remaining.negative += flag;
            }
        }

        remaining
    }

    /// Moves the mines of `coords` to a random hidden mine-free cell. Tile count and
    /// per-polarity totals are unchanged.
    pub fn relocate_mine<R: Rng + ?Sized>(&mut self, coords: Coord2, rng: &mut R) -> MarkOutcome {
        if !self.contains(coords) || !self[coords].has_mine() {
            return MarkOutcome::NoChange;
        }

        let candidates: Vec<Coord2> = self
            .cells()
            .filter(|&(pos, cell)| pos != coords && !cell.has_mine() && cell.visibility.is_hidden())
            .map(|(pos, _)| pos)
            .collect();

        if candidates.is_empty() {
            log::warn!("No free cell to move the mine at {:?} to", coords);
            return MarkOutcome::NoChange;
        }

        let target = candidates[rng.random_range(0..candidates.len())];
        let mine = self[coords].mine;
        self.cells[target.to_nd_index()].mine = mine;
        self.cells[coords.to_nd_index()].mine = 0;
        log::debug!("Moved mine {} from {:?} to {:?}", mine, coords, target);

        MarkOutcome::Changed
    }
}

impl Index<Coord2> for Board {
    type Output = Cell;

    fn index(&self, (row, col): Coord2) -> &Self::Output {
        &self.cells[(row as usize, col as usize)]
    }
}

/// Blank cells cascade, and so do zeros unless they may be lies.
fn opens_neighbors(number: Option<Number>, config: &VariantConfig) -> bool {
    match number {
        None => true,
        Some(0) => !config.is_liar(),
        Some(_) => false,
    }
}
