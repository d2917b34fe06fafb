use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};
use std::io;
use structopt::StructOpt;
use structopt_flags::LogLevel;

use twenty48::app::GameApp;
use twenty48::cli::Opt;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let opt: Opt = Opt::from_args();

    if let Some(shell) = opt.completions {
        Opt::clap().gen_completions_to("twenty48", shell, &mut io::stdout());
        return Ok(());
    }

    TermLogger::init(
        opt.verbose.get_level_filter(),
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )?;

    let config = opt.to_app_config()?;

    GameApp::new(config).run()
}
