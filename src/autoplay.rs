use log::debug;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_xorshift::XorShiftRng;

#[cfg(feature = "threaded")]
use rayon::prelude::*;

use crate::grid::Direction;
use crate::session::Session;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameSummary {
    pub seed: u64,
    pub score: u32,
    pub max_tile: u32,
    pub moves: u32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BatchStats {
    pub games: usize,
    pub mean_score: f64,
    pub best: GameSummary,
    pub max_tile: u32,
}

impl BatchStats {
    pub fn from_summaries(summaries: &[GameSummary]) -> Option<Self> {
        let best = *summaries.iter().max_by_key(|s| s.score)?;
        let total: u64 = summaries.iter().map(|s| s.score as u64).sum();
        let max_tile = summaries.iter().map(|s| s.max_tile).max().unwrap_or(0);

        Some(Self {
            games: summaries.len(),
            mean_score: total as f64 / summaries.len() as f64,
            best,
            max_tile,
        })
    }
}

/// Plays one game to the end, picking uniformly among the moves that
/// change the board. Equal seeds give equal games.
pub fn play_random_game(seed: u64) -> GameSummary {
    let mut session = Session::with_seed(seed);
    let mut rng = XorShiftRng::seed_from_u64(seed.rotate_left(32));

    while !session.is_game_over() {
        let choices: Vec<Direction> = session
            .available_moves()
            .iter()
            .filter(|(_, available)| **available)
            .map(|(direction, _)| direction)
            .collect();

        match choices.choose(&mut rng) {
            Some(&direction) => {
                session.play(direction);
            }
            None => break,
        }
    }

    let summary = GameSummary {
        seed,
        score: session.score(),
        max_tile: session.board().max_value(),
        moves: session.moves(),
    };

    debug!("{:?}", summary);

    summary
}

/// Plays `count` games seeded `base_seed`, `base_seed + 1`, ... and calls
/// `on_done` as each one finishes. Results come back in seed order.
pub fn play_games<F>(base_seed: u64, count: usize, on_done: F) -> Vec<GameSummary>
where
    F: Fn(&GameSummary) + Sync + Send,
{
    let seeds: Vec<u64> = (0..count as u64).map(|i| base_seed.wrapping_add(i)).collect();

    let play = |seed: u64| {
        let summary = play_random_game(seed);
        on_done(&summary);
        summary
    };

    #[cfg(feature = "threaded")]
    {
        seeds.into_par_iter().map(play).collect()
    }

    #[cfg(not(feature = "threaded"))]
    {
        seeds.into_iter().map(play).collect()
    }
}
