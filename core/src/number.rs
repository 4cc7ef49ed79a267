use rand::Rng;

use crate::*;

/// Contribution multiplier of a neighbor at `coords`.
const fn parity_weight(coords: Coord2, transform: NumberTransform) -> Number {
    match transform {
        NumberTransform::Amplified if is_odd_cell(coords) => 2,
        NumberTransform::Contrast if is_odd_cell(coords) => 1,
        NumberTransform::Contrast => -1,
        _ => 1,
    }
}

/// Folds signed neighbor values into a number, `None` when every value is zero. Flags fold the
/// same way since [`FlagValue`] shares the mine representation.
fn weighted_sum(
    values: impl Iterator<Item = (Coord2, MineValue)>,
    transform: NumberTransform,
) -> Option<Number> {
    let sum = values
        .filter(|&(_, value)| value != 0)
        .fold(None, |sum: Option<Number>, (coords, value)| {
            Some(sum.unwrap_or(0) + parity_weight(coords, transform) * Number::from(value))
        });

    match transform {
        NumberTransform::Contrast => sum.map(Number::abs),
        _ => sum,
    }
}

impl Board {
    /// True number of a cell before any lying.
    pub fn compute_number(&self, coords: Coord2, config: &VariantConfig) -> Option<Number> {
        weighted_sum(
            self.neighbors(coords, config)
                .map(|pos| (pos, self[pos].mine)),
            config.transform,
        )
    }

    /// Number as it will be shown once revealed. Liar boards shift a present number by one,
    /// blank cells are never shifted.
    pub fn displayed_number<R: Rng + ?Sized>(
        &self,
        coords: Coord2,
        config: &VariantConfig,
        rng: &mut R,
    ) -> Option<Number> {
        let number = self.compute_number(coords, config)?;
        if config.is_liar() {
            Some(if rng.random_bool(0.5) {
                number + 1
            } else {
                number - 1
            })
        } else {
            Some(number)
        }
    }

    /// Flag values around a cell, weighted like [`Board::compute_number`].
    pub fn flag_sum(&self, coords: Coord2, config: &VariantConfig) -> Number {
        weighted_sum(
            self.neighbors(coords, config)
                .map(|pos| (pos, self[pos].visibility.flag_value())),
            config.transform,
        )
        .unwrap_or(0)
    }
}
