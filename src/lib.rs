//! A 2048 engine: tiles slide and merge on a 4x4 board, decoupled from
//! rendering and input.
//!
//! ```
//! use twenty48::{Direction, Session};
//!
//! let mut session = Session::with_seed(42);
//! assert_eq!(session.board().len(), 2);
//!
//! if let Some(report) = session.play(Direction::Left) {
//!     println!("+{} points", report.score_gained);
//! }
//! ```

pub mod autoplay;
pub mod board;
pub mod engine;
pub mod grid;
pub mod input;
pub mod render;
pub mod session;
pub mod spawn;
pub mod storage;
pub mod tile;

#[cfg(feature = "cli")]
pub mod app;
#[cfg(feature = "cli")]
pub mod cli;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use board::Board;
pub use engine::{apply_move, MoveOutcome};
pub use grid::{Direction, Position, GRID_SIZE};
pub use session::{MoveReport, MoveStatus, Session, SessionConfig};
pub use spawn::Spawner;
pub use storage::ScoreStore;
pub use tile::{Tile, TileFlags, TileId};
