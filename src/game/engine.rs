use super::{
    action::{Action, Direction},
    config::GameConfig,
    state::{CollisionType, GameState, Outcome, Position, Snake},
};
use rand::{SeedableRng, rngs::StdRng, seq::SliceRandom};

/// Information about a step
#[derive(Debug, Clone, PartialEq)]
pub struct StepInfo {
    /// Whether the snake ate food this step
    pub ate_food: bool,
    /// Set only on the step that ended the session
    pub outcome: Option<Outcome>,
}

/// Result of a game step
#[derive(Debug, Clone, PartialEq)]
pub struct StepResult {
    /// Whether the session is terminal after this step
    pub terminated: bool,
    /// Additional information about the step
    pub info: StepInfo,
}

impl StepResult {
    fn moved(ate_food: bool) -> Self {
        Self {
            terminated: false,
            info: StepInfo {
                ate_food,
                outcome: None,
            },
        }
    }

    fn ended(ate_food: bool, outcome: Outcome) -> Self {
        Self {
            terminated: true,
            info: StepInfo {
                ate_food,
                outcome: Some(outcome),
            },
        }
    }

    fn already_over() -> Self {
        Self {
            terminated: true,
            info: StepInfo {
                ate_food: false,
                outcome: None,
            },
        }
    }

    /// True when this step moved the session from live to terminal
    pub fn ended_session(&self) -> bool {
        self.info.outcome.is_some()
    }
}

/// The game engine that applies the per-tick rules.
///
/// The engine holds the configuration and the food RNG; session data lives in
/// [`GameState`] so callers can inspect and construct states freely.
pub struct GameEngine {
    config: GameConfig,
    rng: StdRng,
}

impl GameEngine {
    /// Create a new game engine with the given configuration
    pub fn new(config: GameConfig) -> Self {
        Self {
            config,
            rng: StdRng::from_entropy(),
        }
    }

    /// Create an engine whose food placement is reproducible
    pub fn with_seed(config: GameConfig, seed: u64) -> Self {
        Self {
            config,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Start a new session: one segment at the grid centre heading right
    pub fn reset(&mut self) -> GameState {
        let center_row = (self.config.grid_height / 2) as i32;
        let center_col = (self.config.grid_width / 2) as i32;

        let mut state = GameState {
            snake: Snake::new(Position::new(center_row, center_col), Direction::Right, 1),
            food: None,
            grid_width: self.config.grid_width,
            grid_height: self.config.grid_height,
            score: 0,
            steps: 0,
            outcome: None,
        };

        state.food = self.generate_food(&state);
        if state.food.is_none() {
            state.outcome = Some(Outcome::BoardFull);
        }

        state
    }

    /// Pick a free cell uniformly at random, or `None` if the snake covers the grid
    pub fn generate_food(&mut self, state: &GameState) -> Option<Position> {
        if state.snake.len() >= state.cell_count() {
            return None;
        }

        let free: Vec<Position> = (0..state.grid_height as i32)
            .flat_map(|row| (0..state.grid_width as i32).map(move |col| Position::new(row, col)))
            .filter(|pos| !state.is_occupied_by_snake(*pos))
            .collect();

        free.choose(&mut self.rng).copied()
    }

    /// Execute one tick of the game
    pub fn step(&mut self, state: &mut GameState, action: Action) -> StepResult {
        if !state.is_alive() {
            return StepResult::already_over();
        }

        if let Action::Move(requested) = action {
            state.change_direction(requested);
        }

        let new_head = state.snake.head().moved_in_direction(state.snake.direction);

        if let Some(collision) = Self::check_collision(state, new_head) {
            let outcome = Outcome::Collision(collision);
            state.outcome = Some(outcome);
            return StepResult::ended(false, outcome);
        }

        let ate_food = state.food == Some(new_head);
        state.snake.advance(new_head, ate_food);
        state.steps += 1;

        if !ate_food {
            return StepResult::moved(false);
        }

        state.score = state.score.saturating_add(self.config.food_score);
        state.food = self.generate_food(state);

        match state.food {
            Some(_) => StepResult::moved(true),
            None => {
                state.outcome = Some(Outcome::BoardFull);
                StepResult::ended(true, Outcome::BoardFull)
            }
        }
    }

    /// Check if the new head position causes a collision
    fn check_collision(state: &GameState, pos: Position) -> Option<CollisionType> {
        if !state.is_in_bounds(pos) {
            return Some(CollisionType::Wall);
        }

        if state.is_occupied_by_snake(pos) {
            return Some(CollisionType::SelfCollision);
        }

        None
    }
}
