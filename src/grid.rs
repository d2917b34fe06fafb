use core::fmt;
use core::str::FromStr;

use enum_map::Enum;

/// Side length of the square board.
pub const GRID_SIZE: usize = 4;

/// `(row, col)`, row 0 at the top.
pub type Position = (usize, usize);

#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy, Enum)]
#[cfg_attr(feature = "persist", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "persist", serde(rename_all = "lowercase"))]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Row and column step for one move in this direction.
    pub fn offset(self) -> (isize, isize) {
        match self {
            Direction::Up => (-1, 0),
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
            Direction::Right => (0, 1),
        }
    }

    pub fn invert(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Direction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "up" | "w" => Ok(Direction::Up),
            "down" | "s" => Ok(Direction::Down),
            "left" | "a" => Ok(Direction::Left),
            "right" | "d" => Ok(Direction::Right),
            _ => Err(format!("invalid direction: {}", s)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid<T> {
    data: Vec<T>,
    rows: usize,
    cols: usize,
}

pub struct GridIter<'a, T> {
    grid: &'a Grid<T>,
    pos: usize,
}

impl<T> Grid<T> {
    pub fn new<F: FnMut(usize, usize) -> T>(rows: usize, cols: usize, initializer: &mut F) -> Self {
        let mut data = Vec::with_capacity(rows * cols);

        for row in 0..rows {
            for col in 0..cols {
                data.push(initializer(row, col));
            }
        }

        Self { data, rows, cols }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn iter(&self) -> GridIter<T> {
        GridIter { grid: self, pos: 0 }
    }

    pub fn contains(&self, row: usize, col: usize) -> bool {
        row < self.rows && col < self.cols
    }

    pub fn get(&self, row: usize, col: usize) -> Option<&T> {
        if !self.contains(row, col) {
            return None;
        }

        self.data.get(col + row * self.cols)
    }

    pub fn get_mut(&mut self, row: usize, col: usize) -> Option<&mut T> {
        if !self.contains(row, col) {
            return None;
        }

        self.data.get_mut(col + row * self.cols)
    }

    /// Position one step away in `direction`, or `None` past the wall.
    pub fn neighbor_position(&self, row: usize, col: usize, direction: Direction) -> Option<Position> {
        let (dr, dc) = direction.offset();
        let row = row.checked_add_signed(dr)?;
        let col = col.checked_add_signed(dc)?;

        if self.contains(row, col) {
            Some((row, col))
        } else {
            None
        }
    }

    pub fn get_neighbor(&self, row: usize, col: usize, direction: Direction) -> Option<&T> {
        let (row, col) = self.neighbor_position(row, col, direction)?;

        self.get(row, col)
    }
}

impl<'a, T> IntoIterator for &'a Grid<T> {
    type Item = (usize, usize, &'a T);
    type IntoIter = GridIter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T> Iterator for GridIter<'a, T> {
    type Item = (usize, usize, &'a T);

    fn next(&mut self) -> Option<Self::Item> {
        if self.pos >= self.grid.data.len() {
            None
        } else {
            let row = self.pos / self.grid.cols;
            let col = self.pos % self.grid.cols;
            let value = &self.grid.data[self.pos];

            self.pos += 1;

            Some((row, col, value))
        }
    }
}
