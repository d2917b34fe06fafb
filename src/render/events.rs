use crate::grid::Direction;

/// Session lifecycle events that renderers can react to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderEvent {
    /// A session is on screen for the first time
    Started,

    /// Tiles are sliding; the next frame shows them mid-move
    Moved(Direction),

    /// A move was committed
    Settled { score_gained: u32 },

    /// The score passed the previous best
    NewBest(u32),

    /// No further move is possible
    GameOver,

    /// The board was replaced by a fresh one
    Reset,
}
