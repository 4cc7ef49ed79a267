use core::fmt;
use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Variant {
    Classic,
    Multimines,
    Liar,
    Omega,
    Amplified,
    Contrast,
    Crossed,
    Knight,
}

impl Variant {
    pub const ALL: [Variant; 8] = [
        Variant::Classic,
        Variant::Multimines,
        Variant::Liar,
        Variant::Omega,
        Variant::Amplified,
        Variant::Contrast,
        Variant::Crossed,
        Variant::Knight,
    ];

    pub const fn key(self) -> &'static str {
        use Variant::*;
        match self {
            Classic => "classic",
            Multimines => "multimines",
            Liar => "liar",
            Omega => "omega",
            Amplified => "amplified",
            Contrast => "contrast",
            Crossed => "crossed",
            Knight => "knight",
        }
    }

    pub const fn name(self) -> &'static str {
        use Variant::*;
        match self {
            Classic => "Classic",
            Multimines => "Multimines",
            Liar => "Liar",
            Omega => "Omega",
            Amplified => "Amplified",
            Contrast => "Contrast",
            Crossed => "Crossed",
            Knight => "Knight",
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Variant {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|variant| variant.key().eq_ignore_ascii_case(s))
            .ok_or(GameError::UnknownVariant)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    #[serde(rename = "beg")]
    Beginner,
    #[serde(rename = "int")]
    Intermediate,
    #[serde(rename = "exp")]
    Expert,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [
        Difficulty::Beginner,
        Difficulty::Intermediate,
        Difficulty::Expert,
    ];

    pub const fn key(self) -> &'static str {
        match self {
            Self::Beginner => "beg",
            Self::Intermediate => "int",
            Self::Expert => "exp",
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Beginner => "Beginner",
            Self::Intermediate => "Intermediate",
            Self::Expert => "Expert",
        }
    }

    pub const fn short_name(self) -> &'static str {
        match self {
            Self::Beginner => "Beg",
            Self::Intermediate => "Int",
            Self::Expert => "Exp",
        }
    }

    /// `(height, width)` shared by every variant at this difficulty.
    pub const fn size(self) -> Coord2 {
        match self {
            Self::Beginner => (9, 9),
            Self::Intermediate => (16, 16),
            Self::Expert => (16, 30),
        }
    }

    const fn classic_mines(self) -> CellCount {
        match self {
            Self::Beginner => 10,
            Self::Intermediate => 40,
            Self::Expert => 99,
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Difficulty {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|difficulty| {
                difficulty.key().eq_ignore_ascii_case(s) || difficulty.name().eq_ignore_ascii_case(s)
            })
            .ok_or(GameError::UnknownDifficulty)
    }
}

impl VariantConfig {
    pub const fn preset(variant: Variant, difficulty: Difficulty) -> Self {
        use Variant::*;

        let size = difficulty.size();
        let mines = difficulty.classic_mines();
        let classic = Self::new_unchecked(size, mines);

        match variant {
            Classic => classic,
            Multimines => classic
                .with_polarity(MineCap::Unbounded, MineCap::AtMost(0))
                .with_max_mines_per_cell(4),
            Liar => classic.with_transform(NumberTransform::Lie),
            Omega => {
                let tiles = match difficulty {
                    Difficulty::Beginner => 10,
                    Difficulty::Intermediate => 36,
                    Difficulty::Expert => 90,
                };
                Self::new_unchecked(size, tiles)
                    .with_polarity(MineCap::AtMost(tiles / 2), MineCap::AtMost(tiles / 2))
            }
            Amplified => classic.with_transform(NumberTransform::Amplified),
            Contrast => classic.with_transform(NumberTransform::Contrast),
            Crossed => classic.with_neighborhood(NeighborhoodKind::Cross),
            Knight => classic.with_neighborhood(NeighborhoodKind::Knight),
        }
    }
}
