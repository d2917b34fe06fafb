use std::collections::HashSet;
use std::time::Duration;

use twenty48::{
    board::Board,
    engine::apply_move,
    grid::{Direction, GRID_SIZE},
    input::SwipeTracker,
    session::{MoveStatus, Session, SessionConfig, DEFAULT_SETTLE_DELAY},
    spawn::Spawner,
    storage::{MemoryStore, ScoreStore},
    tile::TileIds,
};

// Fixed seed for deterministic tests
const TEST_SEED: u64 = 7;

fn config() -> SessionConfig {
    SessionConfig {
        seed: Some(TEST_SEED),
        settle_delay: Duration::ZERO,
    }
}

fn session_with(rows: [[u32; GRID_SIZE]; GRID_SIZE], store: MemoryStore) -> Session {
    let board = Board::from_rows(rows, &mut TileIds::new()).unwrap();

    Session::from_board(config(), store, board)
}

fn first_available(session: &Session) -> Direction {
    Direction::ALL
        .into_iter()
        .find(|&d| session.available_moves()[d])
        .expect("fresh board can always move")
}

#[test]
fn test_new_session_has_two_tiles() {
    for seed in 0..200 {
        let session = Session::with_seed(seed);
        let tiles = session.board().tiles();

        assert_eq!(tiles.len(), 2);
        assert_ne!(tiles[0].position(), tiles[1].position());
        assert_ne!(tiles[0].id, tiles[1].id);

        for tile in tiles {
            assert!(tile.value == 2 || tile.value == 4);
        }

        assert_eq!(session.score(), 0);
        assert!(!session.is_game_over());
        assert!(!session.is_moving());
    }
}

#[test]
fn test_default_config() {
    let config = SessionConfig::default();

    assert_eq!(config.seed, None);
    assert_eq!(config.settle_delay, DEFAULT_SETTLE_DELAY);
    assert_eq!(DEFAULT_SETTLE_DELAY, Duration::from_millis(200));
}

#[test]
fn test_move_in_progress_rejects_input() {
    let mut session = Session::with_seed(TEST_SEED);
    let direction = first_available(&session);

    assert_eq!(session.begin_move(direction), MoveStatus::Sliding);
    assert!(session.is_moving());
    assert!(!session.accepts_input());
    assert!(session.frame().moving);

    for other in Direction::ALL {
        assert_eq!(session.begin_move(other), MoveStatus::Busy);
    }

    let mut swipe = SwipeTracker::new();
    assert!(!swipe.start(0.0, 0.0, session.accepts_input()));

    let report = session.settle().expect("a move was pending");
    assert_eq!(report.direction, direction);
    assert!(report.spawned.is_some());
    assert_eq!(session.board().len(), 3 - if report.score_gained > 0 { 1 } else { 0 });

    assert!(session.settle().is_none());
    assert!(session.accepts_input());
    assert_eq!(session.moves(), 1);
}

#[test]
fn test_tiles_show_slide_until_settled() {
    let mut session = session_with([[2, 2, 0, 0], [0; 4], [0; 4], [0; 4]], MemoryStore::new());

    assert_eq!(session.begin_move(Direction::Left), MoveStatus::Sliding);

    let sliding = session.tiles();
    assert_eq!(sliding.len(), 2);
    assert!(sliding.iter().all(|t| t.position() == (0, 0)));
    assert_eq!(sliding.iter().filter(|t| t.flags.merging).count(), 1);
    assert_eq!(session.board().tile_at(0, 1).map(|t| t.value), Some(2));

    session.settle();

    let settled = session.tiles();
    assert_eq!(settled.len(), 2);
    assert_eq!(session.board().tile_at(0, 0).map(|t| t.value), Some(4));
    assert!(settled.iter().all(|t| !t.flags.merging));
}

#[test]
fn test_noop_moves_change_nothing() {
    let mut session = session_with([[2, 4, 8, 16], [0; 4], [0; 4], [0; 4]], MemoryStore::new());
    let before = session.board().clone();

    for _ in 0..10 {
        assert_eq!(session.begin_move(Direction::Up), MoveStatus::Unchanged);
        assert!(session.play(Direction::Left).is_none());
    }

    assert_eq!(session.board(), &before);
    assert_eq!(session.score(), 0);
    assert_eq!(session.moves(), 0);
    assert!(!session.is_moving());

    let moves = session.available_moves();
    assert!(!moves[Direction::Up]);
    assert!(!moves[Direction::Left]);
    assert!(!moves[Direction::Right]);
    assert!(moves[Direction::Down]);
}

#[test]
fn test_score_and_best_score() {
    let mut session = session_with([[2, 2, 4, 4], [0; 4], [0; 4], [0; 4]], MemoryStore::new());

    let report = session.play(Direction::Left).unwrap();

    assert_eq!(report.score_gained, 12);
    assert!(report.new_best);
    assert_eq!(session.score(), 12);
    assert_eq!(session.best_score(), 12);
    assert_eq!(session.store().load_best_score(), 12);
    assert_eq!(session.store().saves(), 1);
}

#[test]
fn test_best_score_saved_only_when_exceeded() {
    let mut session = session_with([[2, 2, 4, 4], [0; 4], [0; 4], [0; 4]], MemoryStore::with_best_score(100));

    assert_eq!(session.best_score(), 100);

    let report = session.play(Direction::Left).unwrap();

    assert!(!report.new_best);
    assert_eq!(session.score(), 12);
    assert_eq!(session.best_score(), 100);
    assert_eq!(session.store().saves(), 0);
}

#[test]
fn test_game_over() {
    let rows = [
        [2, 2, 8, 16],
        [32, 64, 128, 256],
        [512, 1024, 2048, 4096],
        [8192, 16384, 32768, 65536],
    ];
    let mut session = session_with(rows, MemoryStore::new());

    assert!(!session.is_game_over());

    let report = session.play(Direction::Left).unwrap();

    assert_eq!(report.score_gained, 4);
    assert!(report.game_over);
    assert!(session.is_game_over());
    assert!(!session.accepts_input());
    assert!(session.board().is_terminal());
    assert!(session.available_moves().values().all(|&available| !available));

    for direction in Direction::ALL {
        assert_eq!(session.begin_move(direction), MoveStatus::GameOver);
    }
}

#[test]
fn test_reset() {
    let mut session = session_with([[2, 2, 4, 4], [0; 4], [0; 4], [0; 4]], MemoryStore::new());

    session.play(Direction::Left);
    assert_eq!(session.begin_move(Direction::Down), MoveStatus::Sliding);

    session.reset();

    assert_eq!(session.board().len(), 2);
    assert_eq!(session.score(), 0);
    assert_eq!(session.moves(), 0);
    assert_eq!(session.best_score(), 12);
    assert!(!session.is_moving());
    assert!(!session.is_game_over());
}

#[test]
fn test_ids_never_collide_with_resumed_board() {
    let mut session = session_with([[2, 0, 0, 0], [0, 4, 0, 0], [0; 4], [0, 0, 0, 8]], MemoryStore::new());
    let mut seen: HashSet<_> = session.board().tiles().iter().map(|t| t.id).collect();

    for step in 0..20 {
        if let Some(report) = session.play(Direction::ALL[step % 4]) {
            let spawned = report.spawned.unwrap();
            assert!(seen.insert(spawned), "id {} reused", spawned);
        }
    }
}

#[test]
fn test_same_seed_replays_identically() {
    let mut a = Session::with_seed(TEST_SEED);
    let mut b = Session::with_seed(TEST_SEED);

    for step in 0..100 {
        let direction = Direction::ALL[(step * 3) % 4];

        assert_eq!(a.play(direction), b.play(direction));
        assert_eq!(a.board(), b.board());
    }

    assert_eq!(a.score(), b.score());
}

#[test]
fn test_resumed_session_draws_from_fresh_seed() {
    let rows = [[2, 2, 0, 4], [0, 8, 0, 0], [0; 4], [0, 0, 16, 0]];
    let board = Board::from_rows(rows, &mut TileIds::new()).unwrap();

    let mut spawner = Spawner::new(TEST_SEED);
    for tile in board.tiles() {
        spawner.ids().reserve(tile.id);
    }
    let expected = apply_move(&board, Direction::Down, &mut spawner);

    let mut session = Session::from_board(config(), MemoryStore::new(), board);
    let report = session.play(Direction::Down).unwrap();

    assert_eq!(session.board(), &expected.board);
    assert_eq!(report.spawned, expected.spawned);
    assert_eq!(session.score(), expected.score_gained);
}
