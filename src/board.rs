use core::fmt;

use crate::grid::{Direction, Grid, Position, GRID_SIZE};
use crate::tile::{Tile, TileFlags, TileIds, MAX_TILE_VALUE};

/// All live tiles at a point in time. Tile order is the order renderers
/// receive them in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Board {
    tiles: Vec<Tile>,
}

impl Board {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a board from loose tiles, rejecting positions outside the grid,
    /// shared cells and values that are not powers of two up to
    /// `MAX_TILE_VALUE`.
    pub fn from_tiles(tiles: Vec<Tile>) -> Result<Self, String> {
        let mut seen = Grid::new(GRID_SIZE, GRID_SIZE, &mut |_, _| false);

        for tile in &tiles {
            if tile.value < 2 || tile.value > MAX_TILE_VALUE || !tile.value.is_power_of_two() {
                return Err(format!("invalid tile value: {}", tile.value));
            }

            match seen.get_mut(tile.row, tile.col) {
                None => return Err(format!("tile out of range: {:?}", tile.position())),
                Some(true) => return Err(format!("cell occupied twice: {:?}", tile.position())),
                Some(cell) => *cell = true,
            }
        }

        Ok(Self { tiles })
    }

    /// Builds a board from a row-major value table where `0` is empty.
    pub fn from_rows(rows: [[u32; GRID_SIZE]; GRID_SIZE], ids: &mut TileIds) -> Result<Self, String> {
        let mut tiles = Vec::new();

        for (row, values) in rows.iter().enumerate() {
            for (col, &value) in values.iter().enumerate() {
                if value != 0 {
                    tiles.push(Tile {
                        id: ids.next_id(),
                        value,
                        row,
                        col,
                        flags: TileFlags::default(),
                    });
                }
            }
        }

        Self::from_tiles(tiles)
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    pub fn tile_at(&self, row: usize, col: usize) -> Option<&Tile> {
        self.tiles.iter().find(|t| t.row == row && t.col == col)
    }

    /// Index into `tiles()` of the tile on each cell.
    pub fn occupancy(&self) -> Grid<Option<usize>> {
        let mut grid = Grid::new(GRID_SIZE, GRID_SIZE, &mut |_, _| None);

        for (index, tile) in self.tiles.iter().enumerate() {
            let cell = grid.get_mut(tile.row, tile.col);
            debug_assert!(cell.is_some(), "tile {} off the board", tile.id);

            if let Some(cell) = cell {
                *cell = Some(index);
            }
        }

        grid
    }

    pub fn values(&self) -> Grid<Option<u32>> {
        let occupancy = self.occupancy();

        Grid::new(GRID_SIZE, GRID_SIZE, &mut |row, col| {
            occupancy
                .get(row, col)
                .copied()
                .flatten()
                .map(|index| self.tiles[index].value)
        })
    }

    pub fn empty_cells(&self) -> Vec<Position> {
        self.occupancy()
            .iter()
            .filter(|(_, _, cell)| cell.is_none())
            .map(|(row, col, _)| (row, col))
            .collect()
    }

    /// True when no cell is empty and no two adjacent tiles could merge.
    ///
    /// Every horizontally or vertically adjacent pair has exactly one left or
    /// upper member, so comparing each cell with its right and lower
    /// neighbour covers the whole 4-neighbourhood once.
    pub fn is_terminal(&self) -> bool {
        if !self.empty_cells().is_empty() {
            return false;
        }

        let values = self.values();

        for (row, col, value) in &values {
            for direction in [Direction::Right, Direction::Down] {
                if let (Some(value), Some(Some(neighbor))) = (value, values.get_neighbor(row, col, direction)) {
                    if value == neighbor && *value < MAX_TILE_VALUE {
                        return false;
                    }
                }
            }
        }

        true
    }

    pub fn max_value(&self) -> u32 {
        self.tiles.iter().map(|t| t.value).max().unwrap_or(0)
    }

    pub(crate) fn push(&mut self, tile: Tile) {
        debug_assert!(self.tile_at(tile.row, tile.col).is_none(), "cell {:?} occupied", tile.position());
        self.tiles.push(tile);
    }

    pub(crate) fn clear_flags(&mut self) {
        for tile in &mut self.tiles {
            tile.flags = TileFlags::default();
        }
    }
}

impl From<Board> for Vec<Tile> {
    fn from(board: Board) -> Self {
        board.tiles
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let values = self.values();

        for row in 0..values.rows() {
            for col in 0..values.cols() {
                match values.get(row, col).copied().flatten() {
                    Some(value) => write!(f, "{:>6}", value)?,
                    None => write!(f, "{:>6}", ".")?,
                }
            }
            writeln!(f)?;
        }

        Ok(())
    }
}
