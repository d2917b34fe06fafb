use std::path::PathBuf;
use std::time::Duration;
use structopt::clap::Shell;
use structopt::StructOpt;
use structopt_flags::QuietVerbose;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Interactive,
    Autoplay { games: usize },
}

#[derive(Debug)]
pub struct AppConfig {
    pub seed: Option<u64>,
    pub best_score_path: PathBuf,
    pub settle_delay: Duration,
    pub mode: Mode,
}

#[derive(Debug, StructOpt)]
#[structopt(
    name = "twenty48",
    about = "Slide and merge numbered tiles until you reach 2048"
)]
pub struct Opt {
    #[structopt(flatten)]
    pub verbose: QuietVerbose,

    #[structopt(parse(try_from_str), short, long, help = "Random seed")]
    seed: Option<u64>,

    #[structopt(
        parse(from_os_str),
        short,
        long,
        default_value = "best_score.json",
        help = "File holding the best score"
    )]
    best_score: PathBuf,

    #[structopt(
        parse(try_from_str),
        long,
        default_value = "200",
        help = "Milliseconds a move takes to settle"
    )]
    settle_ms: u64,

    #[structopt(
        parse(try_from_str),
        short,
        long,
        help = "Play n games with random moves and report the scores"
    )]
    autoplay: Option<usize>,

    #[structopt(long, possible_values= &Shell::variants(), case_insensitive = true, help = "Generate shell completions and exit")]
    pub completions: Option<Shell>,
}

impl Opt {
    pub fn to_app_config(self) -> Result<AppConfig, &'static str> {
        let mode = match self.autoplay {
            None => Mode::Interactive,
            Some(0) => return Err("Autoplay needs at least one game"),
            Some(games) => Mode::Autoplay { games },
        };

        Ok(AppConfig {
            seed: self.seed,
            best_score_path: self.best_score,
            settle_delay: Duration::from_millis(self.settle_ms),
            mode,
        })
    }
}
