pub mod high_score;

pub use high_score::{
    DEFAULT_HIGH_SCORE_FILE, HighScoreStore, JsonFileStore, MemoryStore, ScoreBoard,
};
