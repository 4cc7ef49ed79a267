use serde::{Deserialize, Serialize};

use crate::*;

/// Upper bound on how many mines of one polarity may be placed.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "CapRepr", into = "CapRepr")]
pub enum MineCap {
    Unbounded,
    AtMost(CellCount),
}

impl MineCap {
    /// Whether at least one mine of this polarity may exist.
    pub const fn is_available(self) -> bool {
        match self {
            Self::Unbounded => true,
            Self::AtMost(limit) => limit > 0,
        }
    }

    /// How many more mines fit once `placed` have been used.
    pub const fn remaining(self, placed: CellCount) -> CellCount {
        match self {
            Self::Unbounded => CellCount::MAX,
            Self::AtMost(limit) => limit.saturating_sub(placed),
        }
    }

    pub const fn admits(self, total: CellCount) -> bool {
        match self {
            Self::Unbounded => true,
            Self::AtMost(limit) => total <= limit,
        }
    }
}

impl Default for MineCap {
    fn default() -> Self {
        Self::AtMost(0)
    }
}

/// Config files spell a cap as a plain count or the word `unbounded`.
#[derive(Copy, Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum CapRepr {
    Count(CellCount),
    Keyword(CapKeyword),
}

#[derive(Copy, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
enum CapKeyword {
    Unbounded,
}

impl From<CapRepr> for MineCap {
    fn from(repr: CapRepr) -> Self {
        match repr {
            CapRepr::Count(limit) => Self::AtMost(limit),
            CapRepr::Keyword(CapKeyword::Unbounded) => Self::Unbounded,
        }
    }
}

impl From<MineCap> for CapRepr {
    fn from(cap: MineCap) -> Self {
        match cap {
            MineCap::Unbounded => Self::Keyword(CapKeyword::Unbounded),
            MineCap::AtMost(limit) => Self::Count(limit),
        }
    }
}

/// How neighbor mine values are folded into a displayed number.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NumberTransform {
    /// Plain signed sum.
    #[default]
    None,
    /// Plain sum shifted by one in a random direction when revealed.
    Lie,
    /// Odd-parity neighbors count double.
    Amplified,
    /// Odd-parity neighbors add, even-parity ones subtract, absolute value shown.
    Contrast,
}

/// Largest per-cell mine count representable by [`MineValue`].
pub const MAX_MINES_PER_CELL: u8 = MineValue::MAX as u8;

/// Geometry and rule deviations of one board, fixed for a whole game.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariantConfig {
    /// `(height, width)`
    pub size: Coord2,
    pub mine_tiles: CellCount,
    pub pos_mines: MineCap,
    pub neg_mines: MineCap,
    pub max_mines_per_cell: u8,
    #[serde(default)]
    pub neighborhood: NeighborhoodKind,
    #[serde(default)]
    pub transform: NumberTransform,
}

impl VariantConfig {
    pub const fn new_unchecked(size: Coord2, mine_tiles: CellCount) -> Self {
        Self {
            size,
            mine_tiles,
            pos_mines: MineCap::AtMost(mine_tiles),
            neg_mines: MineCap::AtMost(0),
            max_mines_per_cell: 1,
            neighborhood: NeighborhoodKind::Moore,
            transform: NumberTransform::None,
        }
    }

    /// Classic single-mine rules, validated.
    pub fn classic(size: Coord2, mine_tiles: CellCount) -> Result<Self> {
        let config = Self::new_unchecked(size, mine_tiles);
        config.validate()?;
        Ok(config)
    }

    pub const fn with_polarity(mut self, pos_mines: MineCap, neg_mines: MineCap) -> Self {
        self.pos_mines = pos_mines;
        self.neg_mines = neg_mines;
        self
    }

    pub const fn with_max_mines_per_cell(mut self, max_mines_per_cell: u8) -> Self {
        self.max_mines_per_cell = max_mines_per_cell;
        self
    }

    pub const fn with_neighborhood(mut self, neighborhood: NeighborhoodKind) -> Self {
        self.neighborhood = neighborhood;
        self
    }

    pub const fn with_transform(mut self, transform: NumberTransform) -> Self {
        self.transform = transform;
        self
    }

    pub const fn height(&self) -> Coord {
        self.size.0
    }

    pub const fn width(&self) -> Coord {
        self.size.1
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.size.0, self.size.1)
    }

    pub const fn contains(&self, (row, col): Coord2) -> bool {
        row < self.size.0 && col < self.size.1
    }

    pub const fn is_liar(&self) -> bool {
        matches!(self.transform, NumberTransform::Lie)
    }

    /// Checks the config can produce a well-formed board.
    pub fn validate(&self) -> Result<()> {
        if self.size.0 == 0 || self.size.1 == 0 {
            return Err(GameError::EmptyBoard);
        }
        if self.max_mines_per_cell == 0 || self.max_mines_per_cell > MAX_MINES_PER_CELL {
            return Err(GameError::InvalidMaxMines);
        }
        if self.mine_tiles > self.total_cells() {
            return Err(GameError::TooManyMines);
        }
        Ok(())
    }

    /// Checks that a stored layout could have been generated under this config.
    pub fn check_layout(&self, layout: &MineLayout) -> Result<()> {
        if layout.size() != self.size {
            return Err(GameError::InvalidBoardShape);
        }
        if layout
            .iter()
            .any(|(_, mine)| mine.unsigned_abs() > self.max_mines_per_cell)
        {
            return Err(GameError::LayoutBreaksConfig);
        }
        if !self.pos_mines.admits(layout.positive_total())
            || !self.neg_mines.admits(layout.negative_total())
        {
            return Err(GameError::LayoutBreaksConfig);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_rejects_too_many_tiles() {
        let config = VariantConfig::new_unchecked((3, 3), 10);

        assert_eq!(config.validate(), Err(GameError::TooManyMines));
    }

    #[test]
    fn validate_rejects_zero_max_mines() {
        let config = VariantConfig::new_unchecked((3, 3), 1).with_max_mines_per_cell(0);

        assert_eq!(config.validate(), Err(GameError::InvalidMaxMines));
    }

    #[test]
    fn validate_rejects_empty_board() {
        assert_eq!(VariantConfig::classic((0, 5), 0), Err(GameError::EmptyBoard));
    }

    #[test]
    fn full_board_is_valid() {
        assert!(VariantConfig::classic((3, 3), 9).is_ok());
    }

    #[test]
    fn check_layout_enforces_caps() {
        fn layout(mines: &[(Coord2, MineValue)]) -> MineLayout {
            MineLayout::from_mine_coords((2, 2), mines).unwrap()
        }
        let config = VariantConfig::classic((2, 2), 2)
            .unwrap()
            .with_polarity(MineCap::AtMost(2), MineCap::AtMost(1));

        assert_eq!(config.check_layout(&layout(&[((0, 0), 1), ((1, 1), -1)])), Ok(()));
        assert_eq!(
            config.check_layout(&layout(&[((0, 0), 2)])),
            Err(GameError::LayoutBreaksConfig)
        );
        assert_eq!(
            config.check_layout(&layout(&[((0, 0), 1), ((0, 1), 1), ((1, 0), 1)])),
            Err(GameError::LayoutBreaksConfig)
        );
        assert_eq!(
            config.check_layout(&layout(&[((0, 0), -1), ((0, 1), -1)])),
            Err(GameError::LayoutBreaksConfig)
        );
        assert_eq!(
            config.check_layout(&MineLayout::from_mine_coords((3, 2), &[]).unwrap()),
            Err(GameError::InvalidBoardShape)
        );
    }

    #[test]
    fn cap_remaining_saturates() {
        assert_eq!(MineCap::AtMost(5).remaining(3), 2);
        assert_eq!(MineCap::AtMost(5).remaining(7), 0);
        assert_eq!(MineCap::Unbounded.remaining(1000), CellCount::MAX);
        assert!(!MineCap::AtMost(0).is_available());
        assert!(MineCap::Unbounded.is_available());
    }

    #[test]
    fn config_json_spells_unbounded_caps() {
        let config = VariantConfig::new_unchecked((9, 9), 10)
            .with_polarity(MineCap::Unbounded, MineCap::AtMost(0))
            .with_max_mines_per_cell(4);

        let json = serde_json::to_string(&config).unwrap();
        assert!(json.contains("\"pos_mines\":\"unbounded\""));
        assert!(json.contains("\"neg_mines\":0"));

        let parsed: VariantConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn topology_and_transform_default_when_missing() {
        let json = r#"{"size":[4,5],"mine_tiles":3,"pos_mines":3,"neg_mines":0,"max_mines_per_cell":1}"#;

        let parsed: VariantConfig = serde_json::from_str(json).unwrap();

        assert_eq!(parsed.neighborhood, NeighborhoodKind::Moore);
        assert_eq!(parsed.transform, NumberTransform::None);
        assert_eq!(parsed.height(), 4);
        assert_eq!(parsed.width(), 5);
    }
}
