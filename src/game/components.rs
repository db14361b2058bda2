//! Grid primitives shared by every part of the game.

use std::fmt;

/// A cell on the board. Row 0 is the top row.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub struct GridPosition {
    pub col: i32,
    pub row: i32,
}

impl GridPosition {
    pub const fn new(col: i32, row: i32) -> Self {
        GridPosition { col, row }
    }

    /// The neighbouring cell one step towards `direction`.
    pub fn step(self, direction: Direction) -> Self {
        let (dc, dr) = direction.unit();
        GridPosition::new(self.col + dc, self.row + dr)
    }
}

impl fmt::Display for GridPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.col, self.row)
    }
}

/// Direction enum for snake movement.
#[derive(PartialEq, Eq, Copy, Clone, Debug, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Returns the opposite direction.
    pub fn opposite(&self) -> Self {
        match self {
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
        }
    }

    /// `(col, row)` offset of one step.
    pub fn unit(&self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    /// Clockwise compass angle in degrees, `Up` being 0. Sprite assets are
    /// drawn facing up, so this is the rotation that makes them face `self`.
    pub fn angle(&self) -> u16 {
        match self {
            Direction::Up => 0,
            Direction::Right => 90,
            Direction::Down => 180,
            Direction::Left => 270,
        }
    }

    /// Direction of a single step from `from` to `to`, taking wrap-around on
    /// `board` into account. `None` if the cells are not neighbours.
    pub fn between(from: GridPosition, to: GridPosition, board: Board) -> Option<Self> {
        let width = board.width as i32;
        let height = board.height as i32;
        let dc = to.col - from.col;
        let dr = to.row - from.row;

        match (dc, dr) {
            (1, 0) => Some(Direction::Right),
            (-1, 0) => Some(Direction::Left),
            (0, 1) => Some(Direction::Down),
            (0, -1) => Some(Direction::Up),
            (dc, 0) if width > 2 && dc == -(width - 1) => Some(Direction::Right),
            (dc, 0) if width > 2 && dc == width - 1 => Some(Direction::Left),
            (0, dr) if height > 2 && dr == -(height - 1) => Some(Direction::Down),
            (0, dr) if height > 2 && dr == height - 1 => Some(Direction::Up),
            _ => None,
        }
    }
}

/// Board dimensions in cells.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Board {
    pub width: u32,
    pub height: u32,
}

impl Board {
    pub const fn new(width: u32, height: u32) -> Self {
        Board { width, height }
    }

    pub fn contains(&self, pos: GridPosition) -> bool {
        pos.col >= 0 && pos.row >= 0 && (pos.col as u32) < self.width && (pos.row as u32) < self.height
    }

    /// Folds `pos` back onto the board, so leaving one edge re-enters from
    /// the opposite one.
    pub fn wrap(&self, pos: GridPosition) -> GridPosition {
        GridPosition::new(
            pos.col.rem_euclid(self.width as i32),
            pos.row.rem_euclid(self.height as i32),
        )
    }

    pub fn cell_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    pub fn center(&self) -> GridPosition {
        GridPosition::new((self.width / 2) as i32, (self.height / 2) as i32)
    }

    /// All cells, row by row.
    pub fn cells(&self) -> impl Iterator<Item = GridPosition> + '_ {
        (0..self.height as i32)
            .flat_map(move |row| (0..self.width as i32).map(move |col| GridPosition::new(col, row)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opposite_is_an_involution() {
        for dir in [Direction::Up, Direction::Down, Direction::Left, Direction::Right] {
            assert_ne!(dir, dir.opposite());
            assert_eq!(dir, dir.opposite().opposite());
        }
    }

    #[test]
    fn wrap_folds_both_edges() {
        let board = Board::new(20, 10);
        assert_eq!(board.wrap(GridPosition::new(20, 3)), GridPosition::new(0, 3));
        assert_eq!(board.wrap(GridPosition::new(-1, 3)), GridPosition::new(19, 3));
        assert_eq!(board.wrap(GridPosition::new(4, -1)), GridPosition::new(4, 9));
        assert_eq!(board.wrap(GridPosition::new(4, 10)), GridPosition::new(4, 0));
    }

    #[test]
    fn contains_rejects_out_of_bounds() {
        let board = Board::new(5, 5);
        assert!(board.contains(GridPosition::new(0, 0)));
        assert!(board.contains(GridPosition::new(4, 4)));
        assert!(!board.contains(GridPosition::new(5, 0)));
        assert!(!board.contains(GridPosition::new(0, -1)));
    }

    #[test]
    fn between_understands_wrapped_neighbours() {
        let board = Board::new(10, 10);
        let edge = GridPosition::new(9, 4);
        let wrapped = GridPosition::new(0, 4);
        assert_eq!(Direction::between(edge, wrapped, board), Some(Direction::Right));
        assert_eq!(Direction::between(wrapped, edge, board), Some(Direction::Left));
        assert_eq!(
            Direction::between(GridPosition::new(3, 0), GridPosition::new(3, 9), board),
            Some(Direction::Up)
        );
        assert_eq!(Direction::between(edge, GridPosition::new(7, 4), board), None);
    }

    #[test]
    fn cells_cover_the_board_once() {
        let board = Board::new(4, 3);
        let cells: Vec<_> = board.cells().collect();
        assert_eq!(cells.len(), board.cell_count());
        assert_eq!(cells[0], GridPosition::new(0, 0));
        assert_eq!(cells[4], GridPosition::new(0, 1));
    }
}
