use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::*;
pub use random::*;

mod random;

pub trait LayoutGenerator {
    fn generate(self, config: &VariantConfig) -> Result<MineLayout>;
}

/// What happens when the very first reveal of a game lands on a mine.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StartTile {
    /// No protection, the first click may lose.
    #[default]
    Random,
    /// Move the clicked cell's mines to another random empty cell.
    Relocate,
    /// Place every mine again with the clicked cell excluded.
    SimpleSafe,
}

/// Builds a fresh all-hidden board for `config`.
pub fn generate_board<R: Rng + ?Sized>(config: &VariantConfig, rng: &mut R) -> Result<Board> {
    let layout = place_mines(config, None, rng)?;
    Ok(Board::from_layout(layout))
}
