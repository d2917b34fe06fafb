pub mod events;
pub mod text_renderer;

pub use events::RenderEvent;
pub use text_renderer::TextRenderer;

use crate::tile::Tile;

/// Read-only snapshot of a session, handed to renderers once per commit.
#[derive(Debug, Clone, Copy)]
pub struct Frame<'a> {
    /// Ordered tiles; mid-move frames include tiles flagged `merging`.
    pub tiles: &'a [Tile],
    pub score: u32,
    pub best_score: u32,
    pub moving: bool,
    pub game_over: bool,
}

/// Core trait for presenting a game session
pub trait Renderer {
    type Error;

    /// Handle a lifecycle event
    fn handle_event(&mut self, event: &RenderEvent) -> Result<(), Self::Error>;

    /// Draw the current state of the session
    fn update(&mut self, frame: &Frame) -> Result<(), Self::Error>;

    /// Check if the user wants to leave (for interactive renderers)
    fn should_quit(&mut self) -> bool {
        false
    }
}
