use anyhow::{Context, Result};
use clap::Parser;
use neon_snake::game::GameConfig;
use neon_snake::modes::HumanMode;
use neon_snake::storage::HighScoreStore;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::info;

#[derive(Parser)]
#[command(name = "neon_snake")]
#[command(version, about = "Snake arcade game with speed and invincibility power-ups")]
struct Cli {
    /// JSON file with game settings; flags below override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Board side length (odd, at least 9)
    #[arg(long)]
    grid_size: Option<usize>,

    /// Starting tick interval in milliseconds
    #[arg(long)]
    base_speed: Option<u64>,

    /// Seed for food and power-up placement
    #[arg(long)]
    seed: Option<u64>,

    /// Where the high score is kept
    #[arg(long, default_value = "neon_snake_highscore.json")]
    high_score_file: PathBuf,

    /// Log destination; the terminal itself is taken by the game
    #[arg(long, default_value = "neon_snake.log")]
    log_file: PathBuf,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli.log_file)?;

    let mut config = match &cli.config {
        Some(path) => GameConfig::from_json_file(path)?,
        None => GameConfig::default(),
    };
    if let Some(grid_size) = cli.grid_size {
        config.grid_size = grid_size;
    }
    if let Some(base_speed) = cli.base_speed {
        config.base_speed_ms = base_speed;
    }
    config.validate().context("Invalid game configuration")?;

    let high_scores = HighScoreStore::open(&cli.high_score_file)?;
    info!(
        grid_size = config.grid_size,
        base_speed_ms = config.base_speed_ms,
        high_score = high_scores.best(),
        high_score_file = ?high_scores.path(),
        "starting neon snake"
    );

    let mut human_mode = HumanMode::new(config, cli.seed, high_scores);
    human_mode.run().await?;

    Ok(())
}

fn init_tracing(path: &Path) -> Result<()> {
    let file =
        File::create(path).with_context(|| format!("Failed to create log file {:?}", path))?;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init();
    Ok(())
}
