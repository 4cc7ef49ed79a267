use std::fs;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::Context;
use clap::{Parser, Subcommand};
use polysweep_core::*;
use serde::{Deserialize, Serialize};

mod render;
mod script;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List every built-in variant and difficulty
    Presets,
    /// Generate a board and print its mine layout as JSON
    Generate {
        #[command(flatten)]
        board: BoardArgs,

        /// Pretty-print the JSON output
        #[arg(long)]
        pretty: bool,
    },
    /// Play a scripted list of moves and print the resulting board
    Replay {
        #[command(flatten)]
        board: BoardArgs,

        /// TOML file with `[[moves]]` entries
        #[arg(short, long)]
        moves: PathBuf,

        /// Layout JSON written by `generate`, replaces generation
        #[arg(short, long)]
        layout: Option<PathBuf>,

        /// First move protection: random, relocate or simple-safe
        #[arg(long, default_value = "random", value_parser = parse_start_tile)]
        start: StartTile,
    },
}

#[derive(clap::Args, Debug)]
struct BoardArgs {
    /// Preset variant
    #[arg(long, default_value = "classic")]
    variant: Variant,

    /// Preset difficulty
    #[arg(long, default_value = "beg")]
    difficulty: Difficulty,

    /// TOML variant config, replaces the preset
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Force a seed instead of random
    #[arg(short, long)]
    seed: Option<u64>,
}

impl BoardArgs {
    fn variant_config(&self) -> anyhow::Result<VariantConfig> {
        let config = match &self.config {
            Some(path) => {
                let text = read(path)?;
                toml::from_str(&text)
                    .with_context(|| format!("Invalid variant config in {}", path.display()))?
            }
            None => VariantConfig::preset(self.variant, self.difficulty),
        };
        config.validate().context("Variant config cannot start a game")?;
        Ok(config)
    }

    fn seed(&self) -> u64 {
        self.seed.unwrap_or_else(|| {
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map_or(0, |elapsed| elapsed.as_nanos() as u64)
        })
    }
}

/// Solution of one generated board, as written by `generate`.
#[derive(Debug, Serialize, Deserialize)]
struct LayoutFile {
    config: VariantConfig,
    seed: u64,
    mines: Vec<Vec<MineValue>>,
}

fn parse_start_tile(value: &str) -> std::result::Result<StartTile, String> {
    match value {
        "random" => Ok(StartTile::Random),
        "relocate" => Ok(StartTile::Relocate),
        "simple-safe" => Ok(StartTile::SimpleSafe),
        other => Err(format!("unknown start tile policy: {other}")),
    }
}

fn read(path: &Path) -> anyhow::Result<String> {
    fs::read_to_string(path).with_context(|| format!("Could not read {}", path.display()))
}

fn presets() {
    for variant in Variant::ALL {
        for difficulty in Difficulty::ALL {
            let config = VariantConfig::preset(variant, difficulty);
            println!(
                "{:<11} {:<4} {:>2}x{:<2} tiles={:<3} max={} {:?}/{:?}",
                variant.key(),
                difficulty.key(),
                config.height(),
                config.width(),
                config.mine_tiles,
                config.max_mines_per_cell,
                config.neighborhood,
                config.transform,
            );
        }
    }
}

fn generate(board: &BoardArgs, pretty: bool) -> anyhow::Result<()> {
    let config = board.variant_config()?;
    let seed = board.seed();
    let layout = RandomLayoutGenerator::new(seed).generate(&config)?;
    log::debug!("generated {} mine tiles with seed {}", layout.mine_tiles(), seed);

    let file = LayoutFile {
        config,
        seed,
        mines: layout.to_rows(),
    };
    let json = if pretty {
        serde_json::to_string_pretty(&file)?
    } else {
        serde_json::to_string(&file)?
    };
    println!("{json}");
    Ok(())
}

fn replay(
    board: &BoardArgs,
    moves: &Path,
    layout: Option<&Path>,
    start: StartTile,
) -> anyhow::Result<()> {
    let script = script::MoveScript::parse(&read(moves)?)?;

    let mut game = match layout {
        Some(path) => {
            let file: LayoutFile = serde_json::from_str(&read(path)?)
                .with_context(|| format!("Invalid layout file {}", path.display()))?;
            let layout = MineLayout::from_rows(&file.mines)?;
            Game::from_layout(file.config, layout, file.seed)?
        }
        None => Game::new(board.variant_config()?, board.seed(), start)?,
    };

    let applied = script.apply(&mut game)?;
    let outcome = game.outcome();
    let remaining = game.remaining_flags();

    print!("{}", render::render(game.board(), outcome.is_finished()));
    println!("moves applied: {applied}/{}", script.moves.len());
    println!("outcome: {outcome:?}");
    println!("flags left: +{} / -{}", remaining.positive, remaining.negative);
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    env_logger::Builder::new()
        .filter_level(args.verbose.log_level_filter())
        .init();

    match &args.command {
        Command::Presets => presets(),
        Command::Generate { board, pretty } => generate(board, *pretty)?,
        Command::Replay {
            board,
            moves,
            layout,
            start,
        } => replay(board, moves, layout.as_deref(), *start)?,
    }
    Ok(())
}
