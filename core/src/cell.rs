use serde::{Deserialize, Serialize};

use crate::*;

/// Player-visible state of a cell.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Visibility {
    #[default]
    Hidden,
    /// `None` means no neighbor holds a mine, which is distinct from a displayed `0`.
    Revealed(Option<Number>),
    Flagged(FlagValue),
}

impl Visibility {
    pub const fn is_hidden(self) -> bool {
        matches!(self, Self::Hidden)
    }

    pub const fn is_revealed(self) -> bool {
        matches!(self, Self::Revealed(_))
    }

    /// Signed flag count, zero when the cell carries no flag.
    pub const fn flag_value(self) -> FlagValue {
        match self {
            Self::Flagged(value) => value,
            _ => 0,
        }
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub mine: MineValue,
    pub visibility: Visibility,
}

impl Cell {
    pub const fn hidden(mine: MineValue) -> Self {
        Self {
            mine,
            visibility: Visibility::Hidden,
        }
    }

    pub const fn has_mine(self) -> bool {
        self.mine != 0
    }

    /// A mine cell that has been revealed, which loses the game.
    pub const fn is_exploded(self) -> bool {
        self.has_mine() && self.visibility.is_revealed()
    }
}
