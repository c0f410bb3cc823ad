mod app;
mod command;
mod config;
mod consts;
mod game;
mod highscore;
mod logging;
mod util;
use crate::app::App;
use crate::command::KeyMap;
use crate::config::Config;
use crate::game::Game;
use crate::highscore::{ErrorChain, HighScoreFile, HighScoreStore, NoStore};
use lexopt::{Arg, Parser};
use std::io::{self, ErrorKind};
use std::path::PathBuf;
use std::process::ExitCode;

/// Parsed command-line arguments
#[derive(Clone, Debug, Default, Eq, PartialEq)]
struct Arguments {
    config: Option<PathBuf>,
    high_score_file: Option<PathBuf>,
    log_file: Option<PathBuf>,
}

#[derive(Clone, Debug, Eq, PartialEq)]
enum Mode {
    Run(Arguments),
    Help,
    Version,
}

impl Mode {
    fn from_parser(mut parser: Parser) -> Result<Mode, lexopt::Error> {
        let mut args = Arguments::default();
        while let Some(arg) = parser.next()? {
            match arg {
                Arg::Short('c') | Arg::Long("config") => {
                    args.config = Some(PathBuf::from(parser.value()?));
                }
                Arg::Long("high-score-file") => {
                    args.high_score_file = Some(PathBuf::from(parser.value()?));
                }
                Arg::Long("log-file") => {
                    args.log_file = Some(PathBuf::from(parser.value()?));
                }
                Arg::Short('h') | Arg::Long("help") => return Ok(Mode::Help),
                Arg::Short('V') | Arg::Long("version") => return Ok(Mode::Version),
                _ => return Err(arg.unexpected()),
            }
        }
        Ok(Mode::Run(args))
    }
}

const USAGE: &str = "\
Usage: turtlesnake [<options>]

Play snake on a grid that fills up with rotting food

Options:
  -c, --config <path>        Read configuration from the given file
      --high-score-file <path>
                             Keep the high score in the given file
      --log-file <path>      Write log messages to the given file
  -h, --help                 Show this help message and exit
  -V, --version              Show the program version and exit

Controls: arrow keys/WASD/HJKL turn, space or p pauses, q quits
";

fn main() -> ExitCode {
    match Mode::from_parser(Parser::from_env()) {
        Ok(Mode::Run(args)) => run(args),
        Ok(Mode::Help) => {
            print!("{USAGE}");
            ExitCode::SUCCESS
        }
        Ok(Mode::Version) => {
            println!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("turtlesnake: {e}");
            eprintln!("Run `turtlesnake --help` for usage");
            ExitCode::from(2)
        }
    }
}

fn run(args: Arguments) -> ExitCode {
    if let Some(path) = args.log_file.or_else(logging::default_path) {
        if let Err(e) = logging::init(&path) {
            eprintln!("turtlesnake: logging disabled: {e:#}");
        }
    }
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "Starting turtlesnake");
    let config = load_config(args.config);
    let store = open_store(
        args.high_score_file
            .or_else(|| config.files.high_score_file.clone()),
    );
    let game = Game::new(config, store);
    let terminal = ratatui::init();
    let r = App::new(game, KeyMap::default()).run(terminal);
    ratatui::restore();
    io_exit(r)
}

/// Load the configuration, falling back to defaults on any error.  A missing
/// file is only tolerated at the default location.
fn load_config(path: Option<PathBuf>) -> Config {
    let r = match path {
        Some(path) => Config::load(&path, false),
        None => Config::default_path().and_then(|path| Config::load(&path, true)),
    };
    match r {
        Ok(config) => config,
        Err(e) => {
            tracing::warn!(error = %ErrorChain(&e), "Using default configuration");
            Config::default()
        }
    }
}

fn open_store(path: Option<PathBuf>) -> Box<dyn HighScoreStore> {
    match path.or_else(HighScoreFile::default_path) {
        Some(path) => {
            let store = HighScoreFile::new(path);
            tracing::debug!(path = %store.path().display(), "Using high score file");
            Box::new(store)
        }
        None => {
            tracing::warn!("No location for high score file; high scores will not be kept");
            Box::new(NoStore)
        }
    }
}

fn io_exit(r: io::Result<()>) -> ExitCode {
    match r {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) if e.kind() == ErrorKind::BrokenPipe => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "Terminal error");
            eprintln!("{e}");
            ExitCode::from(2)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn parse(args: &[&str]) -> Result<Mode, lexopt::Error> {
        Mode::from_parser(Parser::from_args(args.iter().copied()))
    }

    #[test]
    fn no_args() {
        assert_eq!(parse(&[]).unwrap(), Mode::Run(Arguments::default()));
    }

    #[test]
    fn all_paths() {
        assert_eq!(
            parse(&[
                "-c",
                "snake.toml",
                "--high-score-file=scores.txt",
                "--log-file",
                "snake.log"
            ])
            .unwrap(),
            Mode::Run(Arguments {
                config: Some(PathBuf::from("snake.toml")),
                high_score_file: Some(PathBuf::from("scores.txt")),
                log_file: Some(PathBuf::from("snake.log")),
            })
        );
    }

    #[rstest]
    #[case(&["-h"], Mode::Help)]
    #[case(&["--help", "--bogus"], Mode::Help)]
    #[case(&["-V"], Mode::Version)]
    #[case(&["--config", "x.toml", "--version"], Mode::Version)]
    fn info_modes(#[case] args: &[&str], #[case] mode: Mode) {
        assert_eq!(parse(args).unwrap(), mode);
    }

    #[rstest]
    #[case(&["extra"])]
    #[case(&["--bogus"])]
    #[case(&["--config"])]
    fn bad_args(#[case] args: &[&str]) {
        assert!(parse(args).is_err());
    }

    #[test]
    fn explicit_missing_config_falls_back() {
        let tmp = tempfile::tempdir().unwrap();
        let config = load_config(Some(tmp.path().join("nonexistent.toml")));
        assert_eq!(config, Config::default());
    }
}
