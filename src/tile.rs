use core::fmt;

use crate::grid::Position;

/// Largest value a tile may hold. Two tiles at this value do not merge, so
/// doubling never leaves `u32`.
pub const MAX_TILE_VALUE: u32 = 1 << 30;

/// Identity of a tile across moves, so renderers can animate continuity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "persist", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "persist", serde(transparent))]
pub struct TileId(u64);

impl fmt::Display for TileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Hands out fresh, never reused tile ids.
#[derive(Debug, Default, Clone)]
pub struct TileIds {
    next: u64,
}

impl TileIds {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes sure `id` is never handed out again.
    pub fn reserve(&mut self, id: TileId) {
        self.next = self.next.max(id.0 + 1);
    }

    pub fn next_id(&mut self) -> TileId {
        let id = TileId(self.next);
        self.next += 1;
        id
    }
}

/// Per-commit markers for renderers, cleared when the next move starts.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "persist", derive(serde::Serialize, serde::Deserialize))]
pub struct TileFlags {
    /// Placed on the board by this commit.
    pub spawned: bool,
    /// Result of a merge in this commit.
    pub merged: bool,
    /// Slid onto an equal tile and is about to be removed.
    pub merging: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "persist", derive(serde::Serialize, serde::Deserialize))]
pub struct Tile {
    pub id: TileId,
    pub value: u32,
    pub row: usize,
    pub col: usize,
    pub flags: TileFlags,
}

impl Tile {
    pub fn new(id: TileId, (row, col): Position, value: u32) -> Self {
        debug_assert!(
            value >= 2 && value <= MAX_TILE_VALUE && value.is_power_of_two(),
            "invalid tile value {}",
            value
        );

        Self {
            id,
            value,
            row,
            col,
            flags: TileFlags::default(),
        }
    }

    pub fn position(&self) -> Position {
        (self.row, self.col)
    }

    pub fn with_flags(mut self, flags: TileFlags) -> Self {
        self.flags = flags;
        self
    }
}
