//! A play session: engine, live state and high score bookkeeping together.
//!
//! Front ends call [`GameSession::tick`] at their own pace. The session knows
//! nothing about time or terminals.

use log::info;

use crate::game::{
    Action, Direction, GameEngine, GameState, Outcome, Snapshot, StepResult, autoplay_direction,
};
use crate::storage::{HighScoreStore, ScoreBoard};

/// Who steers the snake
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlayMode {
    #[default]
    Manual,
    Autoplay,
}

impl PlayMode {
    pub fn toggled(&self) -> Self {
        match self {
            Self::Manual => Self::Autoplay,
            Self::Autoplay => Self::Manual,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Manual => "Manual",
            Self::Autoplay => "AI",
        }
    }
}

pub struct GameSession<S: HighScoreStore> {
    engine: GameEngine,
    state: GameState,
    scoreboard: ScoreBoard<S>,
    mode: PlayMode,
    new_record: bool,
}

impl<S: HighScoreStore> GameSession<S> {
    /// Open the score board and start the first session
    pub fn new(mut engine: GameEngine, store: S, mode: PlayMode) -> Self {
        let state = engine.reset();
        let scoreboard = ScoreBoard::open(store);
        info!(
            "Session started: {}x{} grid, {} mode, high score {}",
            state.grid_width,
            state.grid_height,
            mode.as_str(),
            scoreboard.high_score()
        );

        Self {
            engine,
            state,
            scoreboard,
            mode,
            new_record: false,
        }
    }

    /// Advance one tick.
    ///
    /// `pending` is the last direction the player asked for; autoplay ignores
    /// it. The final score is recorded on the tick that ends the session.
    pub fn tick(&mut self, pending: Option<Direction>) -> StepResult {
        let action = match self.mode {
            PlayMode::Manual => Action::from(pending),
            PlayMode::Autoplay => Action::Move(autoplay_direction(&self.state)),
        };

        let result = self.engine.step(&mut self.state, action);

        if let Some(outcome) = result.info.outcome {
            self.finish(outcome);
        }

        result
    }

    fn finish(&mut self, outcome: Outcome) {
        let score = self.state.score;
        self.new_record = self.scoreboard.record_final_score(score);
        info!(
            "Session over ({:?}) after {} steps: score {}, length {}",
            outcome,
            self.state.steps,
            score,
            self.state.snake.len()
        );
    }

    /// Throw away the current session and start a new one
    pub fn restart(&mut self) {
        self.state = self.engine.reset();
        self.new_record = false;
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Lets tests stage positions by hand
    #[cfg(test)]
    pub(crate) fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn snapshot(&self) -> Snapshot {
        self.state.snapshot()
    }

    pub fn mode(&self) -> PlayMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: PlayMode) {
        self.mode = mode;
    }

    pub fn high_score(&self) -> u32 {
        self.scoreboard.high_score()
    }

    /// True if the session that just ended set a new high score
    pub fn is_new_record(&self) -> bool {
        self.new_record
    }

    pub fn games_played(&self) -> u32 {
        self.scoreboard.games_played()
    }

    pub fn scoreboard(&self) -> &ScoreBoard<S> {
        &self.scoreboard
    }
}
