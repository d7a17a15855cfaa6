use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use grid_snake::game::{GameConfig, GameError};
use grid_snake::logging;
use grid_snake::modes::{HeadlessConfig, HeadlessMode, HumanMode};
use tracing::info;

#[derive(Parser)]
#[command(name = "grid_snake")]
#[command(version, about = "Step-driven Snake simulation")]
struct Cli {
    /// Game mode
    #[arg(long, default_value = "human")]
    mode: Mode,

    /// JSON file with game configuration; flags below override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Board width in logical units
    #[arg(long)]
    width: Option<i32>,

    /// Board height in logical units
    #[arg(long)]
    height: Option<i32>,

    /// Cell size in logical units
    #[arg(long)]
    block_size: Option<i32>,

    /// Steps per second
    #[arg(long)]
    tick_rate: Option<u32>,

    /// Seed for food placement
    #[arg(long)]
    seed: Option<u64>,

    /// Episodes to play in headless mode
    #[arg(long, default_value = "10")]
    episodes: usize,

    /// Pace headless mode at the tick rate
    #[arg(long)]
    paced: bool,

    /// Write logs to this file (the only log sink in human mode)
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Clone, ValueEnum)]
enum Mode {
    /// Play snake with keyboard controls
    Human,
    /// Run episodes with the built-in agent and log the results
    Headless,
}

impl Cli {
    fn game_config(&self) -> Result<GameConfig> {
        let mut config = match &self.config {
            Some(path) => GameConfig::from_json_file(path)?,
            None => GameConfig::default(),
        };

        if let Some(width) = self.width {
            config.width = width;
        }
        if let Some(height) = self.height {
            config.height = height;
        }
        if let Some(block_size) = self.block_size {
            config.block_size = block_size;
        }
        if let Some(tick_rate) = self.tick_rate {
            config.tick_rate = tick_rate;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }

        config.validate().context("Invalid game configuration")?;
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match (&cli.log_file, &cli.mode) {
        (Some(path), _) => logging::init_file(cli.verbose, path)?,
        (None, Mode::Headless) => logging::init_stderr(cli.verbose)?,
        // Logging to the terminal would corrupt the UI
        (None, Mode::Human) => {}
    }

    let config = cli.game_config()?;

    // Dispatch to appropriate mode
    let result = match cli.mode {
        Mode::Human => {
            let mut human_mode = HumanMode::new(config);
            human_mode.run().await
        }
        Mode::Headless => {
            let mut headless = HeadlessConfig::new(cli.episodes, config);
            headless.paced = cli.paced;
            let mut headless_mode = HeadlessMode::new(headless);
            headless_mode.run().await
        }
    };

    match result {
        Err(err) if err.downcast_ref::<GameError>().is_some_and(GameError::is_quit) => {
            info!("stopped on quit request");
            std::process::exit(0);
        }
        other => other,
    }
}
