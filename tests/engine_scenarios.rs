//! End-to-end behaviour of the engine, autoplay and high score bookkeeping.

use std::collections::HashSet;

use term_snake::game::{
    Action, CollisionType, Direction, GameConfig, GameEngine, GameState, Outcome, Position, Snake,
    autoplay_direction, safe_directions,
};
use term_snake::storage::{HighScoreStore, JsonFileStore, ScoreBoard};

fn segments_are_distinct(state: &GameState) -> bool {
    let unique: HashSet<Position> = state.snake.body.iter().copied().collect();
    unique.len() == state.snake.len()
}

#[test]
fn eats_food_two_cells_ahead() {
    let mut engine = GameEngine::with_seed(GameConfig::new(5, 5), 0);
    let mut state = GameState::new(
        Snake::new(Position::new(2, 2), Direction::Right, 1),
        Position::new(2, 4),
        5,
        5,
    );

    let first = engine.step(&mut state, Action::Continue);
    assert!(!first.info.ate_food);
    assert_eq!(state.snake.head(), Position::new(2, 3));

    let second = engine.step(&mut state, Action::Continue);
    assert!(second.info.ate_food);
    assert!(!second.terminated);
    assert_eq!(state.snake.head(), Position::new(2, 4));
    assert_eq!(state.score, 10);
    assert_eq!(state.snake.len(), 2);
}

#[test]
fn leaving_the_top_edge_ends_the_session() {
    let mut engine = GameEngine::with_seed(GameConfig::new(5, 5), 0);
    let mut state = GameState::new(
        Snake::new(Position::new(0, 0), Direction::Up, 1),
        Position::new(3, 3),
        5,
        5,
    );
    let before = state.clone();

    let result = engine.step(&mut state, Action::Continue);

    assert!(result.terminated);
    assert_eq!(
        result.info.outcome,
        Some(Outcome::Collision(CollisionType::Wall))
    );
    let mut expected = before;
    expected.outcome = Some(Outcome::Collision(CollisionType::Wall));
    assert_eq!(state, expected);

    // Further steps change nothing
    let frozen = state.clone();
    engine.step(&mut state, Action::Move(Direction::Right));
    assert_eq!(state, frozen);
}

#[test]
fn high_score_survives_a_lower_session() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("snake_high_score.json");

    let mut board = ScoreBoard::open(JsonFileStore::new(&path));
    assert_eq!(board.high_score(), 0);
    board.record_final_score(30);
    assert_eq!(JsonFileStore::new(&path).load().unwrap(), Some(30));

    let mut board = ScoreBoard::open(JsonFileStore::new(&path));
    assert_eq!(board.high_score(), 30);
    board.record_final_score(20);
    assert_eq!(JsonFileStore::new(&path).load().unwrap(), Some(30));
}

#[test]
fn reversal_requests_never_turn_the_snake() {
    let mut engine = GameEngine::with_seed(GameConfig::small(), 4);

    for direction in Direction::ALL {
        let mut state = GameState::new(
            Snake::new(Position::new(5, 5), direction, 3),
            Position::new(0, 0),
            10,
            10,
        );
        engine.step(&mut state, Action::Move(direction.opposite()));
        assert_eq!(state.snake.direction, direction);
    }
}

#[test]
fn autoplay_sessions_keep_invariants() {
    for seed in 0..200u64 {
        let mut engine = GameEngine::with_seed(GameConfig::new(8, 6), seed);
        let mut state = engine.reset();

        for _ in 0..500 {
            if !state.is_alive() {
                break;
            }

            let food = state.food.expect("live state has food");
            assert!(!state.snake.occupies(food), "seed {seed}: food on snake");
            assert!(segments_are_distinct(&state), "seed {seed}: overlap");

            let chosen = autoplay_direction(&state);
            let safe = safe_directions(&state);
            let head = state.snake.head();
            if !safe.is_empty() {
                assert!(safe.contains(&chosen));
                let best = head.moved_in_direction(chosen).manhattan_distance(food);
                for direction in &safe {
                    assert!(best <= head.moved_in_direction(*direction).manhattan_distance(food));
                }
            }

            let length = state.snake.len();
            let score = state.score;
            let result = engine.step(&mut state, Action::Move(chosen));

            if result.info.ate_food {
                assert_eq!(state.snake.len(), length + 1);
                assert_eq!(state.score, score + 10);
            } else if !result.terminated {
                assert_eq!(state.snake.len(), length);
                assert_eq!(state.score, score);
            }
        }
    }
}

#[test]
fn food_is_never_placed_on_the_snake() {
    // Snake covering the whole top half of a 6x4 grid
    let body: Vec<Position> = (0..2)
        .flat_map(|row| (0..6).map(move |col| Position::new(row, col)))
        .collect();
    let state = GameState::new(
        Snake::from_segments(body, Direction::Left),
        Position::new(3, 3),
        6,
        4,
    );

    for seed in 0..500u64 {
        let mut engine = GameEngine::with_seed(GameConfig::new(6, 4), seed);
        let food = engine.generate_food(&state).expect("free cells remain");
        assert!(!state.snake.occupies(food));
        assert!(state.is_in_bounds(food));
    }
}
