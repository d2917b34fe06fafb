use std::collections::HashSet;

use log::{debug, trace};

use crate::board::Board;
use crate::grid::{Direction, Position, GRID_SIZE};
use crate::spawn::Spawner;
use crate::tile::{Tile, TileFlags, TileId, MAX_TILE_VALUE};

/// Result of a fully resolved move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveOutcome {
    pub board: Board,
    /// Whether any tile ended up on a different cell.
    pub moved: bool,
    /// Sum of the values created by merges.
    pub score_gained: u32,
    pub spawned: Option<TileId>,
}

/// Order in which cells are visited for `direction`.
///
/// Rows run bottom-up for `Down` and top-down otherwise; columns run
/// right-to-left for `Right` and left-to-right otherwise. A tile is thus
/// always visited after every tile standing between it and the wall.
pub fn traversal_order(direction: Direction) -> Vec<Position> {
    let rows: Vec<usize> = match direction {
        Direction::Down => (0..GRID_SIZE).rev().collect(),
        _ => (0..GRID_SIZE).collect(),
    };
    let cols: Vec<usize> = match direction {
        Direction::Right => (0..GRID_SIZE).rev().collect(),
        _ => (0..GRID_SIZE).collect(),
    };

    rows.iter()
        .flat_map(|&row| cols.iter().map(move |&col| (row, col)))
        .collect()
}

/// A board after sliding but before merges are collapsed and a tile spawns.
///
/// Every pre-move tile is still present at its slid position; tiles that
/// slid onto an equal tile carry the `merging` flag and share the cell with
/// the tile they absorb.
#[derive(Debug, Clone)]
pub struct Slide {
    direction: Direction,
    before: Board,
    tiles: Vec<Tile>,
    merged: HashSet<Position>,
    moved: bool,
}

pub fn slide(board: &Board, direction: Direction) -> Slide {
    let mut tiles: Vec<Tile> = board.tiles().to_vec();
    let mut occupancy = board.occupancy();
    let mut merged: HashSet<Position> = HashSet::new();
    let mut moved = false;

    for tile in &mut tiles {
        tile.flags = TileFlags::default();
    }

    for (row, col) in traversal_order(direction) {
        let index = match occupancy.get(row, col).copied().flatten() {
            Some(index) => index,
            None => continue,
        };

        let value = tiles[index].value;
        let mut target = (row, col);
        let mut merging = false;

        while let Some(next) = occupancy.neighbor_position(target.0, target.1, direction) {
            match occupancy.get(next.0, next.1).copied().flatten() {
                None => target = next,
                Some(other)
                    if value < MAX_TILE_VALUE
                        && tiles[other].value == value
                        && !merged.contains(&next) =>
                {
                    target = next;
                    merging = true;
                    merged.insert(next);
                    break;
                }
                Some(_) => break,
            }
        }

        if target == (row, col) {
            continue;
        }

        trace!("{} {} {:?} -> {:?}", tiles[index].id, value, (row, col), target);

        moved = true;

        // the absorbed tile keeps the cell until the slide is resolved
        if let Some(cell) = occupancy.get_mut(row, col) {
            *cell = None;
        }
        if !merging {
            if let Some(cell) = occupancy.get_mut(target.0, target.1) {
                *cell = Some(index);
            }
        }

        let tile = &mut tiles[index];
        tile.row = target.0;
        tile.col = target.1;
        tile.flags.merging = merging;
    }

    Slide {
        direction,
        before: board.clone(),
        tiles,
        merged,
        moved,
    }
}

impl Slide {
    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn moved(&self) -> bool {
        self.moved
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    /// Cells that absorbed a merge during this slide.
    pub fn merged_cells(&self) -> &HashSet<Position> {
        &self.merged
    }

    /// Collapses merges and spawns a tile when anything moved. A slide that
    /// moved nothing hands back the pre-move board untouched.
    pub fn resolve(self, spawner: &mut Spawner) -> MoveOutcome {
        if !self.moved {
            return MoveOutcome {
                board: self.before,
                moved: false,
                score_gained: 0,
                spawned: None,
            };
        }

        let mut board = Board::new();
        let mut created: HashSet<Position> = HashSet::with_capacity(self.merged.len());
        let mut score_gained: u32 = 0;

        for tile in self.tiles {
            let position = tile.position();

            if tile.flags.merging {
                if created.insert(position) {
                    let value = tile.value * 2;
                    let flags = TileFlags {
                        merged: true,
                        ..Default::default()
                    };

                    score_gained = score_gained.saturating_add(value);
                    board.push(spawner.tile(position, value).with_flags(flags));
                }
            } else if !self.merged.contains(&position) {
                board.push(tile);
            }
        }

        debug!(
            "Moved {}: {} merges, +{}",
            self.direction,
            created.len(),
            score_gained
        );

        let spawned = spawner.spawn(&board).map(|tile| {
            let id = tile.id;
            board.push(tile);
            id
        });

        MoveOutcome {
            board,
            moved: true,
            score_gained,
            spawned,
        }
    }
}

/// Slides, merges and spawns in one step.
pub fn apply_move(board: &Board, direction: Direction, spawner: &mut Spawner) -> MoveOutcome {
    slide(board, direction).resolve(spawner)
}

/// Whether moving in `direction` would change the board.
pub fn can_move(board: &Board, direction: Direction) -> bool {
    slide(board, direction).moved()
}
