use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use mine_core::{CellCount, Coord, GameConfig, RevealOutcome, Session};

use crate::command::{Command, HELP};
use crate::render::{render_grid, status_line};

mod command;
mod render;

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum Preset {
    Beginner,
    Intermediate,
    Expert,
}

impl Preset {
    fn config(self) -> GameConfig {
        match self {
            Self::Beginner => GameConfig::beginner(),
            Self::Intermediate => GameConfig::intermediate(),
            Self::Expert => GameConfig::expert(),
        }
    }
}

#[derive(Parser, Debug)]
#[command(version, about = "Play minesweeper in the terminal", long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    /// Board preset, individual values below override it
    #[arg(short, long, value_enum, default_value_t = Preset::Beginner)]
    preset: Preset,

    #[arg(long)]
    rows: Option<Coord>,

    #[arg(long)]
    cols: Option<Coord>,

    #[arg(short, long)]
    mines: Option<CellCount>,

    /// Force a seed instead of random
    #[arg(short, long)]
    seed: Option<u64>,
}

impl Args {
    fn game_config(&self) -> Result<GameConfig> {
        let preset = self.preset.config();
        let size = (
            self.rows.unwrap_or(preset.rows()),
            self.cols.unwrap_or(preset.cols()),
        );
        Ok(GameConfig::new(size, self.mines.unwrap_or(preset.mines()))?)
    }
}

fn clock_seed() -> u64 {
    use web_time::{SystemTime, UNIX_EPOCH};

    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_nanos() as u64)
        .unwrap_or_default()
}

fn print_session(session: &Session) -> Result<()> {
    println!("\n{}", status_line(session));
    print!("{}", render_grid(session.board())?);
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    env_logger::Builder::new()
        .filter_level(args.verbose.log_level_filter())
        .init();

    let config = args.game_config()?;
    let seed = args.seed.unwrap_or_else(clock_seed);
    log::debug!("seed: {}", seed);

    let mut session = Session::new(config, seed);
    println!("{HELP}");
    print_session(&session)?;

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        print!("> ");
        io::stdout().flush()?;

        let Some(line) = lines.next() else {
            break;
        };
        let line = line.context("Could not read from stdin")?;

        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(err) => {
                println!("{err}");
                continue;
            }
        };

        match command {
            Command::Reveal(coords) => match session.reveal(coords) {
                Ok(report) => {
                    match report.outcome {
                        RevealOutcome::HitMine => println!("Boom! Type `n` for a new game."),
                        RevealOutcome::Won => println!("Cleared! Type `n` for a new game."),
                        RevealOutcome::Revealed | RevealOutcome::NoChange => {}
                    }
                    log::debug!("{} cells changed", report.changed.len());
                }
                Err(err) => println!("{err}"),
            },
            Command::Flag(coords) => {
                if let Err(err) = session.toggle_flag(coords) {
                    println!("{err}");
                }
            }
            Command::NewGame => session.reset(),
            Command::Dump => {
                let json = serde_json::to_string_pretty(session.board())
                    .context("Could not serialize board")?;
                println!("{json}");
                continue;
            }
            Command::Help => {
                println!("{HELP}");
                continue;
            }
            Command::Quit => break,
        }

        print_session(&session)?;
    }

    Ok(())
}
