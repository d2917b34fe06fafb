use crate::autoplay::{self, BatchStats};
use crate::cli::{AppConfig, Mode};
use crate::grid::Direction;
use crate::input::Command;
use crate::render::{RenderEvent, Renderer, TextRenderer};
use crate::session::{MoveStatus, Session, SessionConfig};
use crate::storage::{FileStore, ScoreStore};

use indicatif::{ProgressBar, ProgressStyle};
use log::{info, warn};
use rand::rngs::OsRng;
use rand::Rng;
use std::io::{self, BufRead};
use std::time::Duration;

pub struct GameApp {
    config: AppConfig,
}

impl GameApp {
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    pub fn run(&self) -> Result<(), Box<dyn std::error::Error>> {
        match self.config.mode {
            Mode::Interactive => self.run_interactive(),
            Mode::Autoplay { games } => self.run_autoplay(games),
        }
    }

    fn run_interactive(&self) -> Result<(), Box<dyn std::error::Error>> {
        let store = FileStore::new(&self.config.best_score_path);
        let session_config = SessionConfig {
            seed: self.config.seed,
            settle_delay: self.config.settle_delay,
        };

        let mut session = Session::new(session_config, store);
        let mut renderer = TextRenderer::new(io::stdout());

        renderer.handle_event(&RenderEvent::Started)?;
        renderer.update(&session.frame())?;

        for line in io::stdin().lock().lines() {
            let line = line?;

            if line.trim().is_empty() {
                continue;
            }

            let command = match line.parse::<Command>() {
                Ok(command) => command,
                Err(e) => {
                    warn!("{}", e);
                    continue;
                }
            };

            match command {
                Command::Quit => break,
                Command::Reset => {
                    session.reset();
                    renderer.handle_event(&RenderEvent::Reset)?;
                    renderer.update(&session.frame())?;
                }
                Command::Move(direction) => step(&mut session, &mut renderer, direction)?,
            }

            if renderer.should_quit() {
                break;
            }
        }

        info!("Final score {}, best {}", session.score(), session.best_score());
        Ok(())
    }

    fn run_autoplay(&self, games: usize) -> Result<(), Box<dyn std::error::Error>> {
        let base_seed = self.config.seed.unwrap_or_else(|| OsRng.gen());

        info!("Using seed: {}", base_seed);

        let progress = ProgressBar::new(games as u64);
        progress.enable_steady_tick(Duration::from_millis(200));
        progress.set_style(
            ProgressStyle::default_bar()
                .template(
                    "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos:>5}/{len} {per_sec:>12}",
                )?
                .progress_chars("#>-"),
        );

        let summaries = autoplay::play_games(base_seed, games, |_| progress.inc(1));

        progress.finish();

        let stats = BatchStats::from_summaries(&summaries).ok_or("No games played")?;

        println!(
            "games: {}  mean score: {:.1}  best: {} (seed {})  max tile: {}",
            stats.games, stats.mean_score, stats.best.score, stats.best.seed, stats.max_tile
        );

        let mut store = FileStore::new(&self.config.best_score_path);

        if stats.best.score > store.load_best_score() {
            store.save_best_score(stats.best.score)?;
            info!("New best score {} saved to {}", stats.best.score, store.path().display());
        }

        Ok(())
    }
}

/// Runs one move through both phases, pausing for the settle delay so the
/// mid-move frame stays visible.
fn step<S, R>(session: &mut Session<S>, renderer: &mut R, direction: Direction) -> Result<(), String>
where
    S: ScoreStore,
    R: Renderer<Error = String>,
{
    match session.begin_move(direction) {
        MoveStatus::Sliding => {}
        MoveStatus::Unchanged => {
            info!("Nothing moves {}", direction);
            return Ok(());
        }
        MoveStatus::Busy => return Ok(()),
        MoveStatus::GameOver => return renderer.handle_event(&RenderEvent::GameOver),
    }

    renderer.handle_event(&RenderEvent::Moved(direction))?;

    if !session.settle_delay().is_zero() {
        renderer.update(&session.frame())?;
        std::thread::sleep(session.settle_delay());
    }

    if let Some(report) = session.settle() {
        renderer.handle_event(&RenderEvent::Settled {
            score_gained: report.score_gained,
        })?;

        if report.new_best {
            renderer.handle_event(&RenderEvent::NewBest(session.best_score()))?;
        }

        renderer.update(&session.frame())?;

        if report.game_over {
            renderer.handle_event(&RenderEvent::GameOver)?;
        }
    }

    Ok(())
}
