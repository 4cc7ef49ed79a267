use alloc::vec::Vec;
use ndarray::Array2;
use rand::prelude::*;

use super::*;

/// Purely random placement, optionally keeping one cell free of mines.
#[derive(Clone, Debug, PartialEq)]
pub struct RandomLayoutGenerator {
    seed: u64,
    excluded: Option<Coord2>,
}

impl RandomLayoutGenerator {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            excluded: None,
        }
    }

    /// Never place a mine at `coords`.
    pub fn excluding(mut self, coords: Coord2) -> Self {
        self.excluded = Some(coords);
        self
    }
}

impl LayoutGenerator for RandomLayoutGenerator {
    fn generate(self, config: &VariantConfig) -> Result<MineLayout> {
        let mut rng = SmallRng::seed_from_u64(self.seed);
        place_mines(config, self.excluded, &mut rng)
    }
}

/// Picks the mine tiles by rejection sampling, then splits each tile's mine count between the
/// polarities. Tiles drawn earlier consume the positive budget first.
pub fn place_mines<R: Rng + ?Sized>(
    config: &VariantConfig,
    excluded: Option<Coord2>,
    rng: &mut R,
) -> Result<MineLayout> {
    config.validate()?;

    let excluded = match excluded {
        Some(coords) if !config.contains(coords) => None,
        Some(_) if config.mine_tiles >= config.total_cells() => {
            log::warn!("Cannot keep start cell free, fallback to random");
            None
        }
        other => other,
    };

    let (height, width) = config.size;
    let mut chosen: Array2<bool> = Array2::default(config.size.to_nd_index());
    let mut order: Vec<Coord2> = Vec::with_capacity(config.mine_tiles.into());

    while order.len() < usize::from(config.mine_tiles) {
        let coords: Coord2 = (rng.random_range(0..height), rng.random_range(0..width));
        if Some(coords) == excluded || chosen[coords.to_nd_index()] {
            continue;
        }
        chosen[coords.to_nd_index()] = true;
        order.push(coords);
    }

    let mut mines: Array2<MineValue> = Array2::zeros(config.size.to_nd_index());
    let mut placed_pos: CellCount = 0;
    let mut placed_neg: CellCount = 0;

    for &coords in &order {
        let total: u8 = rng.random_range(1..=config.max_mines_per_cell);
        let total = CellCount::from(total);
        let pos = total.min(config.pos_mines.remaining(placed_pos));
        let neg = (total - pos).min(config.neg_mines.remaining(placed_neg));
        placed_pos += pos;
        placed_neg += neg;

        // both parts are bounded by max_mines_per_cell, which fits in a MineValue
        mines[coords.to_nd_index()] = pos as MineValue - neg as MineValue;
    }

    let layout = MineLayout::from_mine_values(mines);
    if layout.mine_tiles() != config.mine_tiles {
        log::warn!(
            "Generated mine tile count mismatch, actual: {}, requested: {}",
            layout.mine_tiles(),
            config.mine_tiles
        );
    }
    log::debug!(
        "Placed {} mine tiles, {} positive and {} negative mines",
        layout.mine_tiles(),
        placed_pos,
        placed_neg
    );

    Ok(layout)
}
