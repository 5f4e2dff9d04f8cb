use super::action::Direction;
use super::snapshot::{Cell, Snapshot};

/// A cell on the game grid, addressed by row and column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub row: i32,
    pub col: i32,
}

impl Position {
    pub fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// Move position by delta
    pub fn moved_by(&self, d_row: i32, d_col: i32) -> Self {
        Self {
            row: self.row + d_row,
            col: self.col + d_col,
        }
    }

    /// Move position in a direction
    pub fn moved_in_direction(&self, direction: Direction) -> Self {
        let (d_row, d_col) = direction.delta();
        self.moved_by(d_row, d_col)
    }

    /// Manhattan distance to another position
    pub fn manhattan_distance(&self, other: Position) -> u32 {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col)
    }
}

/// The snake in the game
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    /// Body segments, with head at index 0
    pub body: Vec<Position>,
    /// Current direction of movement
    pub direction: Direction,
}

impl Snake {
    /// Create a straight snake of `length` segments trailing behind `head`
    pub fn new(head: Position, direction: Direction, length: usize) -> Self {
        let mut body = vec![head];

        let (d_row, d_col) = direction.delta();
        for i in 1..length.max(1) {
            let prev = body[i - 1];
            body.push(prev.moved_by(-d_row, -d_col));
        }

        Self { body, direction }
    }

    /// Create a snake from explicit segments, head first.
    ///
    /// Panics if `body` is empty.
    pub fn from_segments(body: Vec<Position>, direction: Direction) -> Self {
        assert!(!body.is_empty(), "a snake needs at least one segment");
        Self { body, direction }
    }

    /// Get the head position
    pub fn head(&self) -> Position {
        self.body[0]
    }

    /// Get the tail position (last segment)
    pub fn tail(&self) -> Position {
        self.body[self.body.len() - 1]
    }

    /// Check if position is occupied by any segment, head included
    pub fn occupies(&self, pos: Position) -> bool {
        self.body.contains(&pos)
    }

    /// Advance to `new_head`, keeping the tail when growing
    pub fn advance(&mut self, new_head: Position, should_grow: bool) {
        self.body.insert(0, new_head);

        if !should_grow {
            self.body.pop();
        }
    }

    /// Get the length of the snake
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Check if the snake is empty (never true for a constructed snake)
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}

/// Type of collision that ended a session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionType {
    /// Snake left the grid
    Wall,
    /// Snake ran into its own body
    SelfCollision,
}

/// How a session reached its terminal state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Lost by collision
    Collision(CollisionType),
    /// Won: the snake fills every cell and no food can be placed
    BoardFull,
}

impl Outcome {
    pub fn is_win(&self) -> bool {
        matches!(self, Outcome::BoardFull)
    }
}

/// Complete state of one session
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    pub snake: Snake,
    /// `None` only once the board is full
    pub food: Option<Position>,
    pub grid_width: usize,
    pub grid_height: usize,
    pub score: u32,
    pub steps: u32,
    /// `Some` once the session is terminal
    pub outcome: Option<Outcome>,
}

impl GameState {
    /// Create a new live game state
    pub fn new(snake: Snake, food: Position, grid_width: usize, grid_height: usize) -> Self {
        Self {
            snake,
            food: Some(food),
            grid_width,
            grid_height,
            score: 0,
            steps: 0,
            outcome: None,
        }
    }

    /// True while the session accepts steps
    pub fn is_alive(&self) -> bool {
        self.outcome.is_none()
    }

    /// Check if a position is within the grid bounds
    pub fn is_in_bounds(&self, pos: Position) -> bool {
        pos.row >= 0
            && pos.row < self.grid_height as i32
            && pos.col >= 0
            && pos.col < self.grid_width as i32
    }

    /// Check if a position is occupied by the snake
    pub fn is_occupied_by_snake(&self, pos: Position) -> bool {
        self.snake.occupies(pos)
    }

    /// A position the snake can enter on the next step without dying
    pub fn is_safe(&self, pos: Position) -> bool {
        self.is_in_bounds(pos) && !self.is_occupied_by_snake(pos)
    }

    /// Turn the snake unless `requested` reverses it; reversals are dropped silently
    pub fn change_direction(&mut self, requested: Direction) {
        if !self.snake.direction.is_opposite(requested) {
            self.snake.direction = requested;
        }
    }

    /// Number of cells on the grid
    pub fn cell_count(&self) -> usize {
        self.grid_width * self.grid_height
    }

    /// Render-relevant view of this state
    pub fn snapshot(&self) -> Snapshot {
        let mut cells = vec![vec![Cell::Empty; self.grid_width]; self.grid_height];

        if let Some(food) = self.food {
            if self.is_in_bounds(food) {
                cells[food.row as usize][food.col as usize] = Cell::Food;
            }
        }

        for (i, segment) in self.snake.body.iter().enumerate() {
            if !self.is_in_bounds(*segment) {
                continue;
            }
            cells[segment.row as usize][segment.col as usize] =
                if i == 0 { Cell::Head } else { Cell::Body };
        }

        Snapshot {
            cells,
            score: self.score,
            length: self.snake.len(),
            steps: self.steps,
            outcome: self.outcome,
        }
    }
}
