use super::{Frame, RenderEvent, Renderer};
use crate::grid::{Grid, GRID_SIZE};
use crate::tile::Tile;

use log::warn;
use std::io::Write;

/// Draws the board as a text grid. Spawned tiles are marked `*` and merge
/// results `+`.
pub struct TextRenderer<W: Write> {
    out: W,
    frames: usize,
}

impl<W: Write> TextRenderer<W> {
    pub fn new(out: W) -> Self {
        Self { out, frames: 0 }
    }

    pub fn frames(&self) -> usize {
        self.frames
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn cells<'a>(tiles: &'a [Tile]) -> Grid<Option<&'a Tile>> {
        let mut grid = Grid::new(GRID_SIZE, GRID_SIZE, &mut |_, _| None);

        // a merging tile shares its cell with the tile it is absorbed into
        for tile in tiles.iter().filter(|t| !t.flags.merging) {
            match grid.get_mut(tile.row, tile.col) {
                Some(cell) => *cell = Some(tile),
                None => warn!("Skipping tile {} outside the board at {:?}", tile.id, tile.position()),
            }
        }

        grid
    }

    fn write_frame(&mut self, frame: &Frame) -> std::io::Result<()> {
        writeln!(self.out, "score: {}  best: {}", frame.score, frame.best_score)?;

        let cells = Self::cells(frame.tiles);

        for row in 0..cells.rows() {
            for col in 0..cells.cols() {
                match cells.get(row, col).copied().flatten() {
                    Some(tile) => {
                        let marker = if tile.flags.spawned {
                            '*'
                        } else if tile.flags.merged {
                            '+'
                        } else {
                            ' '
                        };
                        write!(self.out, "{:>6}{}", tile.value, marker)?;
                    }
                    None => write!(self.out, "{:>6} ", ".")?,
                }
            }
            writeln!(self.out)?;
        }

        if frame.moving {
            writeln!(self.out, "...")?;
        }

        self.out.flush()
    }
}

impl<W: Write> Renderer for TextRenderer<W> {
    type Error = String;

    fn handle_event(&mut self, event: &RenderEvent) -> Result<(), Self::Error> {
        let line = match event {
            RenderEvent::Started => "Use up/down/left/right (or w/a/s/d), r to restart, q to quit".to_string(),
            RenderEvent::Moved(direction) => format!("> {}", direction),
            RenderEvent::Settled { score_gained: 0 } => return Ok(()),
            RenderEvent::Settled { score_gained } => format!("+{}", score_gained),
            RenderEvent::NewBest(score) => format!("New best score: {}", score),
            RenderEvent::GameOver => "Game Over!".to_string(),
            RenderEvent::Reset => "New game".to_string(),
        };

        writeln!(self.out, "{}", line).map_err(|e| e.to_string())
    }

    fn update(&mut self, frame: &Frame) -> Result<(), Self::Error> {
        self.frames += 1;
        self.write_frame(frame).map_err(|e| e.to_string())
    }
}
