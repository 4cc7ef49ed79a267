use ndarray::Array2;
use serde::{Deserialize, Serialize};

/// Single coordinate axis used for board height, width, and positions.
pub type Coord = u8;

/// Count type used for mine counts and total-cell counts.
pub type CellCount = u16;

/// Two-dimensional coordinates `(row, col)`.
pub type Coord2 = (Coord, Coord);

/// Signed mine count stored on a cell, negative values are anti-mines.
pub type MineValue = i8;

/// Signed flag count placed by the player, same polarity rules as [`MineValue`].
pub type FlagValue = i8;

/// Number displayed on a revealed cell.
pub type Number = i16;

pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

impl ToNdIndex for Coord2 {
    type Output = [usize; 2];

    fn to_nd_index(self) -> Self::Output {
        [self.0.into(), self.1.into()]
    }
}

pub const fn mult(a: Coord, b: Coord) -> CellCount {
    let a = a as CellCount;
    let b = b as CellCount;
    a.saturating_mul(b)
}

/// Checkerboard parity of a cell, `true` when `row + col` is odd.
pub const fn is_odd_cell((row, col): Coord2) -> bool {
    (row as u16 + col as u16) % 2 == 1
}

/// Offset pattern deciding which cells count toward a cell's number.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NeighborhoodKind {
    /// The 8 cells at Chebyshev distance 1.
    #[default]
    Moore,
    /// Orthogonal cells at distance 1 or 2.
    Cross,
    /// Chess knight moves.
    Knight,
}

const MOORE: [(isize, isize); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

const CROSS: [(isize, isize); 8] = [
    (-2, 0),
    (-1, 0),
    (1, 0),
    (2, 0),
    (0, -2),
    (0, -1),
    (0, 1),
    (0, 2),
];

const KNIGHT: [(isize, isize); 8] = [
    (-2, -1),
    (-2, 1),
    (-1, -2),
    (-1, 2),
    (1, -2),
    (1, 2),
    (2, -1),
    (2, 1),
];

impl NeighborhoodKind {
    pub const fn displacements(self) -> &'static [(isize, isize); 8] {
        match self {
            Self::Moore => &MOORE,
            Self::Cross => &CROSS,
            Self::Knight => &KNIGHT,
        }
    }
}

pub trait NeighborIterExt {
    fn iter_neighbors(&self, index: Coord2, kind: NeighborhoodKind) -> NeighborIter;
}

impl<T> NeighborIterExt for Array2<T> {
    fn iter_neighbors(&self, index: Coord2, kind: NeighborhoodKind) -> NeighborIter {
        let (rows, cols) = self.dim();
        let bounds = (
            rows.try_into().unwrap_or(Coord::MAX),
            cols.try_into().unwrap_or(Coord::MAX),
        );
        NeighborIter::new(index, bounds, kind)
    }
}

/// Applies `delta` to `coords`, returning a value only when it remains in bounds.
fn apply_delta(coords: Coord2, delta: (isize, isize), bounds: Coord2) -> Option<Coord2> {
    let (row, col) = coords;
    let (d_row, d_col) = delta;
    let (max_row, max_col) = bounds;

    let next_row = row.checked_add_signed(d_row.try_into().ok()?)?;
    if next_row >= max_row {
        return None;
    }

    let next_col = col.checked_add_signed(d_col.try_into().ok()?)?;
    if next_col >= max_col {
        return None;
    }

    Some((next_row, next_col))
}

/// In-bounds neighbors of a cell for one [`NeighborhoodKind`], never yielding the center.
#[derive(Debug)]
pub struct NeighborIter {
    center: Coord2,
    bounds: Coord2,
    displacements: &'static [(isize, isize); 8],
    index: u8,
}

impl NeighborIter {
    pub fn new(center: Coord2, bounds: Coord2, kind: NeighborhoodKind) -> Self {
        Self {
            center,
            bounds,
            displacements: kind.displacements(),
            index: 0,
        }
    }
}

impl Iterator for NeighborIter {
    type Item = Coord2;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let delta = *self.displacements.get(usize::from(self.index))?;
            self.index += 1;

            if let Some(next_item) = apply_delta(self.center, delta, self.bounds) {
                return Some(next_item);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    fn collect(center: Coord2, bounds: Coord2, kind: NeighborhoodKind) -> Vec<Coord2> {
        let mut cells: Vec<_> = NeighborIter::new(center, bounds, kind).collect();
        cells.sort();
        cells
    }

    #[test]
    fn moore_interior_has_eight_neighbors() {
        let cells = collect((4, 4), (9, 9), NeighborhoodKind::Moore);

        assert_eq!(cells.len(), 8);
        assert!(!cells.contains(&(4, 4)));
        assert!(cells.iter().all(|&(r, c)| r.abs_diff(4) <= 1 && c.abs_diff(4) <= 1));
    }

    #[test]
    fn moore_corner_drops_out_of_bounds() {
        let cells = collect((0, 0), (9, 9), NeighborhoodKind::Moore);

        assert_eq!(cells, [(0, 1), (1, 0), (1, 1)]);
    }

    #[test]
    fn cross_reaches_two_cells_orthogonally() {
        let cells = collect((4, 4), (9, 9), NeighborhoodKind::Cross);

        assert_eq!(
            cells,
            [(2, 4), (3, 4), (4, 2), (4, 3), (4, 5), (4, 6), (5, 4), (6, 4)]
        );
    }

    #[test]
    fn cross_near_edge() {
        let cells = collect((1, 0), (3, 3), NeighborhoodKind::Cross);

        assert_eq!(cells, [(0, 0), (1, 1), (1, 2), (2, 0)]);
    }

    #[test]
    fn knight_moves_only() {
        let cells = collect((4, 4), (9, 9), NeighborhoodKind::Knight);

        assert_eq!(cells.len(), 8);
        assert!(cells.iter().all(|&(r, c)| {
            let dr = r.abs_diff(4);
            let dc = c.abs_diff(4);
            dr * dc == 2
        }));
    }

    #[test]
    fn knight_corner_has_two_moves() {
        let cells = collect((0, 0), (8, 8), NeighborhoodKind::Knight);

        assert_eq!(cells, [(1, 2), (2, 1)]);
    }

    #[test]
    fn parity_is_checkerboard() {
        assert!(!is_odd_cell((0, 0)));
        assert!(is_odd_cell((0, 1)));
        assert!(is_odd_cell((1, 0)));
        assert!(!is_odd_cell((1, 1)));
    }
}
