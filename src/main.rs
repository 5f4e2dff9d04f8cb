use anyhow::{Result, anyhow};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use term_snake::game::{Difficulty, GameConfig, GameEngine};
use term_snake::logging::{DEFAULT_LOG_FILE, init_file_logger};
use term_snake::modes::InteractiveMode;
use term_snake::session::{GameSession, PlayMode};
use term_snake::storage::{
    DEFAULT_HIGH_SCORE_FILE, HighScoreStore, JsonFileStore, MemoryStore, ScoreBoard,
};

#[derive(Parser)]
#[command(name = "term_snake")]
#[command(version, about = "Snake in the terminal, with an AI autoplay mode")]
struct Cli {
    /// What to run
    #[arg(long, default_value = "manual")]
    mode: Mode,

    /// Grid width (overrides the config file)
    #[arg(long)]
    width: Option<usize>,

    /// Grid height (overrides the config file)
    #[arg(long)]
    height: Option<usize>,

    /// Tick pacing (overrides the config file)
    #[arg(long)]
    difficulty: Option<Difficulty>,

    /// JSON game config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Where the high score is kept
    #[arg(long, default_value = DEFAULT_HIGH_SCORE_FILE)]
    high_score_file: PathBuf,

    /// Keep the high score in memory only
    #[arg(long)]
    no_persist: bool,

    /// Seed for food placement
    #[arg(long)]
    seed: Option<u64>,

    /// Log file
    #[arg(long, default_value = DEFAULT_LOG_FILE)]
    log_file: PathBuf,
}

#[derive(Clone, Copy, ValueEnum)]
enum Mode {
    /// Play snake with keyboard controls
    Manual,
    /// Watch the greedy AI play
    Autoplay,
    /// Print the stored high score and exit
    Scores,
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
        if let Some(difficulty) = self.difficulty {
            config.difficulty = difficulty;
        }

        config
            .validate()
            .map_err(|err| anyhow!("Invalid game config: {}", err))?;
        Ok(config)
    }
}

async fn play<S: HighScoreStore>(
    config: GameConfig,
    seed: Option<u64>,
    store: S,
    mode: PlayMode,
) -> Result<()> {
    let difficulty = config.difficulty;
    let engine = match seed {
        Some(seed) => GameEngine::with_seed(config, seed),
        None => GameEngine::new(config),
    };

    let session = GameSession::new(engine, store, mode);
    let mut interactive = InteractiveMode::new(session, difficulty);
    interactive.run().await
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_file_logger(&cli.log_file)?;

    let play_mode = match cli.mode {
        Mode::Manual => PlayMode::Manual,
        Mode::Autoplay => PlayMode::Autoplay,
        Mode::Scores => {
            let board = ScoreBoard::open(JsonFileStore::new(&cli.high_score_file));
            println!("High score: {}", board.high_score());
            return Ok(());
        }
    };

    let config = cli.game_config()?;

    if cli.no_persist {
        play(config, cli.seed, MemoryStore::new(), play_mode).await
    } else {
        let store = JsonFileStore::new(&cli.high_score_file);
        play(config, cli.seed, store, play_mode).await
    }
}
