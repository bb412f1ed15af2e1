use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use env_logger::{Env, Target};
use snake_engine::game::GameConfig;
use snake_engine::modes::{AutoplayConfig, AutoplayMode, HumanMode};
use std::fs::File;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "snake_engine")]
#[command(version, about = "Snake on a wraparound grid")]
struct Cli {
    /// Game mode
    #[arg(long, default_value = "human")]
    mode: Mode,

    /// JSON game configuration; other flags override its values
    #[arg(long)]
    config: Option<PathBuf>,

    /// Grid width
    #[arg(long)]
    width: Option<usize>,

    /// Grid height
    #[arg(long)]
    height: Option<usize>,

    /// Starting snake length
    #[arg(long)]
    initial_length: Option<usize>,

    /// Seed for food placement
    #[arg(long)]
    seed: Option<u64>,

    /// Number of games to play (autoplay only)
    #[arg(long, default_value = "100")]
    games: usize,

    /// Cut a game off after this many ticks (autoplay only)
    #[arg(long, default_value = "10000")]
    max_ticks: u32,

    /// Write logs to this file (the terminal UI owns stderr)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

#[derive(Clone, Copy, ValueEnum)]
enum Mode {
    /// Play snake with keyboard controls
    Human,
    /// Let a greedy pilot play headless games and report statistics
    Autoplay,
}

impl Cli {
    fn game_config(&self) -> Result<GameConfig> {
        let mut config = match &self.config {
            Some(path) => GameConfig::load(path)?,
            None => GameConfig::default(),
        };

        if let Some(width) = self.width {
            config.grid_width = width;
        }
        if let Some(height) = self.height {
            config.grid_height = height;
        }
        if let Some(length) = self.initial_length {
            config.initial_snake_length = length;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }

        config.validate().context("Invalid game configuration")?;
        Ok(config)
    }
}

fn init_logging(cli: &Cli) -> Result<()> {
    let mut builder = env_logger::Builder::from_env(Env::default().default_filter_or("info"));

    match (&cli.log_file, cli.mode) {
        (Some(path), _) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create log file {:?}", path))?;
            builder.target(Target::Pipe(Box::new(file)));
        }
        // Without a log file the terminal UI would be overwritten by log lines.
        (None, Mode::Human) => return Ok(()),
        (None, Mode::Autoplay) => {
            builder.target(Target::Stderr);
        }
    }

    builder.init();
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli)?;

    let config = cli.game_config()?;

    // Dispatch to appropriate mode
    match cli.mode {
        Mode::Human => {
            let mut human_mode = HumanMode::new(config)?;
            human_mode.run().await?;
        }
        Mode::Autoplay => {
            let mut autoplay_config = AutoplayConfig::new(cli.games);
            autoplay_config.max_ticks = cli.max_ticks;
            autoplay_config.game_config = config;

            let mut autoplay = AutoplayMode::new(autoplay_config)?;
            let stats = autoplay.run();
            println!("{}", stats.format_summary());
        }
    }

    Ok(())
}
