use anyhow::Result;
use clap::Parser;
use grid_snake::audio::{SoundMode, sound_effects};
use grid_snake::game::{GameConfig, GameEngine};
use grid_snake::logging::init_file_logging;
use grid_snake::modes::HumanMode;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "grid_snake")]
#[command(version, about = "Classic Snake on a fixed grid, in the terminal")]
struct Cli {
    /// JSON config file; flags below override its values
    #[arg(long)]
    config: Option<PathBuf>,

    /// Playfield width (a multiple of the cell size)
    #[arg(long)]
    width: Option<usize>,

    /// Playfield height (a multiple of the cell size)
    #[arg(long)]
    height: Option<usize>,

    /// Size of one grid cell
    #[arg(long)]
    cell_size: Option<usize>,

    /// Milliseconds between ticks
    #[arg(long)]
    tick_ms: Option<u64>,

    /// Segments the snake starts with
    #[arg(long)]
    initial_length: Option<usize>,

    /// Sound effects
    #[arg(long, value_enum)]
    sound: Option<SoundMode>,

    /// Seed for food placement, for reproducible games
    #[arg(long)]
    seed: Option<u64>,

    /// Skip the title card
    #[arg(long)]
    no_start_screen: bool,

    /// Write logs to this file
    #[arg(long)]
    log_file: Option<PathBuf>,
}

impl Cli {
    fn game_config(&self) -> Result<GameConfig> {
        let mut config = match &self.config {
            Some(path) => GameConfig::from_json_file(path)?,
            None => GameConfig::default(),
        };

        if let Some(width) = self.width {
            config.screen_width = width;
        }
        if let Some(height) = self.height {
            config.screen_height = height;
        }
        if let Some(cell_size) = self.cell_size {
            config.cell_size = cell_size;
        }
        if let Some(tick_ms) = self.tick_ms {
            config.tick_ms = tick_ms;
        }
        if let Some(length) = self.initial_length {
            config.initial_snake_length = length;
        }
        if let Some(sound) = self.sound {
            config.sound = sound;
        }
        if self.no_start_screen {
            config.start_screen_ms = 0;
        }

        config.validate()?;
        Ok(config)
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(path) = &cli.log_file {
        init_file_logging(path)?;
    }

    let config = cli.game_config()?;
    tracing::info!(?config, seed = ?cli.seed, "starting");

    let sound = sound_effects(config.sound);
    let engine = match cli.seed {
        Some(seed) => GameEngine::with_seed(config, seed)?,
        None => GameEngine::new(config)?,
    };

    let mut session = HumanMode::with_engine(engine, sound);
    session.run().await?;

    Ok(())
}
