use log::debug;
use rand::rngs::OsRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_xorshift::XorShiftRng;

use crate::board::Board;
use crate::grid::Position;
use crate::tile::{Tile, TileFlags, TileIds};

/// Chance that a spawned tile is a 2 rather than a 4.
pub const TWO_PROBABILITY: f64 = 0.9;

/// Number of tiles on a fresh board.
pub const INITIAL_TILES: usize = 2;

/// Source of new tiles: owns the random generator and the id counter so
/// that a seeded session replays identically.
#[derive(Debug, Clone)]
pub struct Spawner {
    rng: XorShiftRng,
    ids: TileIds,
}

impl Spawner {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: XorShiftRng::seed_from_u64(seed),
            ids: TileIds::new(),
        }
    }

    pub fn from_entropy() -> Self {
        Self::new(OsRng.gen())
    }

    pub fn ids(&mut self) -> &mut TileIds {
        &mut self.ids
    }

    pub fn random_value(&mut self) -> u32 {
        if self.rng.gen_bool(TWO_PROBABILITY) {
            2
        } else {
            4
        }
    }

    pub fn tile(&mut self, position: Position, value: u32) -> Tile {
        Tile::new(self.ids.next_id(), position, value)
    }

    /// Picks a uniformly random empty cell of `board` and creates a tile
    /// there, flagged as spawned. `None` when the board is full.
    pub fn spawn(&mut self, board: &Board) -> Option<Tile> {
        let empty = board.empty_cells();
        let &position = empty.choose(&mut self.rng)?;
        let value = self.random_value();

        debug!("Spawning {} at {:?}", value, position);

        let flags = TileFlags {
            spawned: true,
            ..Default::default()
        };

        Some(self.tile(position, value).with_flags(flags))
    }

    pub fn initial_board(&mut self) -> Board {
        let mut board = Board::new();

        for _ in 0..INITIAL_TILES {
            if let Some(tile) = self.spawn(&board) {
                board.push(tile);
            }
        }

        board
    }
}
