use std::time::Duration;

use enum_map::EnumMap;
use log::{debug, info, warn};

use crate::board::Board;
use crate::engine::{self, Slide};
use crate::grid::Direction;
use crate::render::Frame;
use crate::spawn::Spawner;
use crate::storage::{MemoryStore, ScoreStore};
use crate::tile::{Tile, TileId};

/// Time a front end waits between starting a move and settling it.
pub const DEFAULT_SETTLE_DELAY: Duration = Duration::from_millis(200);

#[derive(Debug, Clone, Copy)]
pub struct SessionConfig {
    /// Seed for tile placement; drawn from the OS when absent.
    pub seed: Option<u64>,
    pub settle_delay: Duration,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            seed: None,
            settle_delay: DEFAULT_SETTLE_DELAY,
        }
    }
}

/// What happened to a move request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveStatus {
    /// Tiles are sliding; call `settle` to commit.
    Sliding,
    /// Nothing can move that way; the board is untouched.
    Unchanged,
    /// A previous move has not settled yet.
    Busy,
    GameOver,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveReport {
    pub direction: Direction,
    pub score_gained: u32,
    pub spawned: Option<TileId>,
    pub new_best: bool,
    pub game_over: bool,
}

/// One game: the board plus score bookkeeping. All board mutation goes
/// through `begin_move`/`settle`; everything else reads snapshots.
pub struct Session<S: ScoreStore = MemoryStore> {
    board: Board,
    pending: Option<Slide>,
    spawner: Spawner,
    store: S,
    score: u32,
    best_score: u32,
    game_over: bool,
    moves: u32,
    settle_delay: Duration,
}

impl Session<MemoryStore> {
    /// Seeded session without persistence and without a settle delay.
    pub fn with_seed(seed: u64) -> Self {
        let config = SessionConfig {
            seed: Some(seed),
            settle_delay: Duration::ZERO,
        };

        Self::new(config, MemoryStore::new())
    }
}

impl<S: ScoreStore> Session<S> {
    pub fn new(config: SessionConfig, store: S) -> Self {
        let mut spawner = Self::spawner(&config);
        let board = spawner.initial_board();

        Self::build(config, store, spawner, board)
    }

    /// Resumes from an existing board, e.g. a saved game or a test setup.
    /// Ids already on the board are never reused.
    pub fn from_board(config: SessionConfig, store: S, board: Board) -> Self {
        let mut spawner = Self::spawner(&config);

        for tile in board.tiles() {
            spawner.ids().reserve(tile.id);
        }

        Self::build(config, store, spawner, board)
    }

    fn spawner(config: &SessionConfig) -> Spawner {
        match config.seed {
            Some(seed) => Spawner::new(seed),
            None => Spawner::from_entropy(),
        }
    }

    fn build(config: SessionConfig, store: S, spawner: Spawner, board: Board) -> Self {
        let best_score = store.load_best_score();

        info!("New session, best score {}", best_score);

        Self {
            game_over: board.is_terminal(),
            board,
            pending: None,
            spawner,
            store,
            score: 0,
            best_score,
            moves: 0,
            settle_delay: config.settle_delay,
        }
    }

    /// Starts over with a fresh two-tile board. The best score is kept.
    pub fn reset(&mut self) {
        self.pending = None;
        self.board = self.spawner.initial_board();
        self.score = 0;
        self.moves = 0;
        self.game_over = self.board.is_terminal();

        info!("Session reset");
    }

    /// Slides the tiles and holds the result until `settle` is called.
    pub fn begin_move(&mut self, direction: Direction) -> MoveStatus {
        if self.game_over {
            return MoveStatus::GameOver;
        }

        if self.pending.is_some() {
            debug!("Ignoring {} while a move is settling", direction);
            return MoveStatus::Busy;
        }

        let slide = engine::slide(&self.board, direction);

        if !slide.moved() {
            return MoveStatus::Unchanged;
        }

        self.pending = Some(slide);
        MoveStatus::Sliding
    }

    /// Commits the pending move: merges, spawns, scores and checks for the
    /// end of the game. `None` when no move is pending.
    pub fn settle(&mut self) -> Option<MoveReport> {
        let slide = self.pending.take()?;
        let direction = slide.direction();
        let outcome = slide.resolve(&mut self.spawner);

        self.board = outcome.board;
        self.moves += 1;
        self.score = self.score.saturating_add(outcome.score_gained);

        let new_best = self.record_best();

        self.game_over = self.board.is_terminal();

        if self.game_over {
            info!("Game over after {} moves, score {}", self.moves, self.score);
        }

        Some(MoveReport {
            direction,
            score_gained: outcome.score_gained,
            spawned: outcome.spawned,
            new_best,
            game_over: self.game_over,
        })
    }

    /// `begin_move` and `settle` back to back.
    pub fn play(&mut self, direction: Direction) -> Option<MoveReport> {
        match self.begin_move(direction) {
            MoveStatus::Sliding => self.settle(),
            _ => None,
        }
    }

    fn record_best(&mut self) -> bool {
        if self.score <= self.best_score {
            return false;
        }

        self.best_score = self.score;

        if let Err(e) = self.store.save_best_score(self.best_score) {
            warn!("Could not save best score: {}", e);
        }

        true
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Tiles as they should be drawn: mid-slide while a move is pending,
    /// the committed board otherwise.
    pub fn tiles(&self) -> &[Tile] {
        match &self.pending {
            Some(slide) => slide.tiles(),
            None => self.board.tiles(),
        }
    }

    pub fn frame(&self) -> Frame<'_> {
        Frame {
            tiles: self.tiles(),
            score: self.score,
            best_score: self.best_score,
            moving: self.is_moving(),
            game_over: self.game_over,
        }
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn best_score(&self) -> u32 {
        self.best_score
    }

    pub fn moves(&self) -> u32 {
        self.moves
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    pub fn is_moving(&self) -> bool {
        self.pending.is_some()
    }

    /// Whether input should be decoded at all right now.
    pub fn accepts_input(&self) -> bool {
        !self.game_over && self.pending.is_none()
    }

    pub fn settle_delay(&self) -> Duration {
        self.settle_delay
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Directions that would change the committed board.
    pub fn available_moves(&self) -> EnumMap<Direction, bool> {
        EnumMap::from_fn(|direction| !self.game_over && engine::can_move(&self.board, direction))
    }
}
