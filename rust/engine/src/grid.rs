//! Board geometry: row/column coordinates and the bounded lines through them.
//!
//! Places are stored row-major (`index = row * 10 + col`), but every
//! neighbour lookup goes through [`Coord::step`], which bounds-checks the
//! row and column separately. A walk therefore stops at the grid edge
//! instead of wrapping into the adjacent row.

use serde::{Deserialize, Serialize};

/// Length of a row or column.
pub const BOARD_SIDE: usize = 10;
/// Number of places on the board.
pub const BOARD_CELLS: usize = BOARD_SIDE * BOARD_SIDE;
/// Contiguous cells needed for a sequence.
pub const RUN_LENGTH: usize = 5;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct Coord {
    pub row: usize,
    pub col: usize,
}

impl Coord {
    pub fn new(row: usize, col: usize) -> Option<Self> {
        (row < BOARD_SIDE && col < BOARD_SIDE).then_some(Self { row, col })
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::new(index / BOARD_SIDE, index % BOARD_SIDE)
    }

    pub fn index(self) -> usize {
        self.row * BOARD_SIDE + self.col
    }

    /// Neighbour one stride away along `direction`; `forward == false` walks backwards.
    pub fn step(self, direction: Direction, forward: bool) -> Option<Coord> {
        let (dr, dc) = direction.stride();
        let (dr, dc) = if forward { (dr, dc) } else { (-dr, -dc) };
        let row = self.row.checked_add_signed(dr)?;
        let col = self.col.checked_add_signed(dc)?;
        Coord::new(row, col)
    }
}

/// The four run orientations checked by the win detector.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Left to right along a row
    Row,
    /// Top to bottom along a column
    Column,
    /// Top-left to bottom-right
    Diagonal,
    /// Top-right to bottom-left
    AntiDiagonal,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Row,
        Direction::Column,
        Direction::Diagonal,
        Direction::AntiDiagonal,
    ];

    /// (row, col) delta of one forward step.
    pub fn stride(self) -> (isize, isize) {
        match self {
            Direction::Row => (0, 1),
            Direction::Column => (1, 0),
            Direction::Diagonal => (1, 1),
            Direction::AntiDiagonal => (1, -1),
        }
    }
}

/// Every place on the line through `origin`, ordered from the backward
/// edge to the forward edge.
pub fn segment(origin: Coord, direction: Direction) -> Vec<Coord> {
    let mut start = origin;
    while let Some(prev) = start.step(direction, false) {
        start = prev;
    }
    let mut cells = Vec::with_capacity(BOARD_SIDE);
    let mut cur = Some(start);
    while let Some(c) = cur {
        cells.push(c);
        cur = c.step(direction, true);
    }
    cells
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn indices(cells: &[Coord]) -> Vec<usize> {
        cells.iter().map(|c| c.index()).collect()
    }

    #[test]
    fn index_round_trip() {
        assert_eq!(Coord::from_index(0), Coord::new(0, 0));
        assert_eq!(Coord::from_index(99), Coord::new(9, 9));
        assert_eq!(Coord::from_index(100), None);
        assert_eq!(Coord::new(3, 7).map(Coord::index), Some(37));
    }

    #[test]
    fn row_and_column_segments_span_the_side() {
        let c = Coord::new(4, 6).unwrap();
        assert_eq!(indices(&segment(c, Direction::Row)), (40..50).collect::<Vec<_>>());
        assert_eq!(
            indices(&segment(c, Direction::Column)),
            (0..10).map(|r| r * 10 + 6).collect::<Vec<_>>()
        );
    }

    #[test]
    fn top_right_corner_does_not_wrap() {
        let corner = Coord::from_index(9).unwrap();
        assert_eq!(indices(&segment(corner, Direction::Diagonal)), vec![9]);
        assert_eq!(
            indices(&segment(corner, Direction::AntiDiagonal)),
            vec![9, 18, 27, 36, 45, 54, 63, 72, 81, 90]
        );
        assert_eq!(corner.step(Direction::Row, true), None);
        assert_eq!(corner.step(Direction::Diagonal, true), None);
    }

    #[test]
    fn short_diagonal_is_bounded_by_first_edge() {
        let c = Coord::new(1, 7).unwrap();
        assert_eq!(indices(&segment(c, Direction::Diagonal)), vec![6, 17, 28, 39]);
        assert_eq!(
            indices(&segment(c, Direction::AntiDiagonal)),
            vec![8, 17, 26, 35, 44, 53, 62, 71, 80]
        );
    }

    proptest! {
        #[test]
        fn segments_stay_on_one_line(index in 0usize..BOARD_CELLS, d in 0usize..4) {
            let origin = Coord::from_index(index).unwrap();
            let direction = Direction::ALL[d];
            let cells = segment(origin, direction);
            prop_assert!(cells.contains(&origin));
            prop_assert!(cells.len() <= BOARD_SIDE);
            let (dr, dc) = direction.stride();
            for pair in cells.windows(2) {
                prop_assert_eq!(pair[1].row as isize - pair[0].row as isize, dr);
                prop_assert_eq!(pair[1].col as isize - pair[0].col as isize, dc);
            }
        }
    }
}
