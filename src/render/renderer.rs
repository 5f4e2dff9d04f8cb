use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};

use crate::game::{Cell, CollisionType, Difficulty, Outcome, Snapshot};
use crate::session::PlayMode;

/// Session details shown around the grid
#[derive(Debug, Clone)]
pub struct Hud {
    pub high_score: u32,
    pub new_record: bool,
    pub mode: PlayMode,
    pub difficulty: Difficulty,
    pub paused: bool,
    pub elapsed: String,
}

pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, frame: &mut Frame, snapshot: &Snapshot, hud: &Hud) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(0),    // Game area
                Constraint::Length(3), // Footer
            ])
            .split(frame.area());

        frame.render_widget(self.render_stats(snapshot, hud), chunks[0]);

        let game_area = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(10),
                Constraint::Percentage(80),
                Constraint::Percentage(10),
            ])
            .split(chunks[1])[1];

        match snapshot.outcome {
            None => {
                let grid_area = Self::grid_area(snapshot, game_area);
                frame.render_widget(self.render_grid(snapshot, hud), grid_area)
            }
            Some(outcome) => {
                frame.render_widget(self.render_game_over(snapshot, hud, outcome), game_area)
            }
        }

        frame.render_widget(self.render_controls(hud.mode), chunks[2]);
    }

    /// Box just large enough for the grid (two columns per cell plus the border),
    /// centred in `area` and clipped to it
    fn grid_area(snapshot: &Snapshot, area: Rect) -> Rect {
        let width = (snapshot.width() * 2 + 2).min(area.width as usize) as u16;
        let height = (snapshot.height() + 2).min(area.height as usize) as u16;

        Rect {
            x: area.x + (area.width - width) / 2,
            y: area.y + (area.height - height) / 2,
            width,
            height,
        }
    }

    fn render_grid(&self, snapshot: &Snapshot, hud: &Hud) -> Paragraph<'static> {
        let lines: Vec<Line> = snapshot
            .cells
            .iter()
            .map(|row| Line::from(row.iter().map(|cell| Self::cell_span(*cell)).collect::<Vec<_>>()))
            .collect();

        let title = if hud.paused { " Snake (paused) " } else { " Snake " };

        Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Double)
                    .border_style(Style::default().fg(Color::White))
                    .title(title),
            )
            .alignment(Alignment::Center)
    }

    fn cell_span(cell: Cell) -> Span<'static> {
        match cell {
            Cell::Head => Span::styled(
                "■ ",
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Cell::Body => Span::styled("□ ", Style::default().fg(Color::Green)),
            Cell::Food => Span::styled(
                "O ",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            ),
            Cell::Empty => Span::styled(". ", Style::default().fg(Color::DarkGray)),
        }
    }

    fn render_stats(&self, snapshot: &Snapshot, hud: &Hud) -> Paragraph<'static> {
        let label = Style::default().fg(Color::Yellow);
        let value = Style::default().fg(Color::White);

        let text = vec![Line::from(vec![
            Span::styled("Score: ", label),
            Span::styled(snapshot.score.to_string(), value.add_modifier(Modifier::BOLD)),
            Span::raw("    "),
            Span::styled("High: ", label),
            Span::styled(hud.high_score.to_string(), value),
            Span::raw("    "),
            Span::styled("Mode: ", label),
            Span::styled(hud.mode.as_str(), value),
            Span::raw("    "),
            Span::styled("Speed: ", label),
            Span::styled(hud.difficulty.as_str(), value),
            Span::raw("    "),
            Span::styled("Time: ", label),
            Span::styled(hud.elapsed.clone(), value),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }

    fn render_game_over(&self, snapshot: &Snapshot, hud: &Hud, outcome: Outcome) -> Paragraph<'static> {
        let (banner, color) = match outcome {
            Outcome::BoardFull => ("BOARD CLEARED", Color::Green),
            Outcome::Collision(CollisionType::Wall) => ("GAME OVER - hit the wall", Color::Red),
            Outcome::Collision(CollisionType::SelfCollision) => {
                ("GAME OVER - ran into itself", Color::Red)
            }
        };

        let mut text = vec![
            Line::from(""),
            Line::from(Span::styled(
                banner,
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(vec![
                Span::styled("Final Score: ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    snapshot.score.to_string(),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled("   Length: ", Style::default().fg(Color::Yellow)),
                Span::styled(snapshot.length.to_string(), Style::default().fg(Color::White)),
            ]),
        ];

        if hud.new_record {
            text.push(Line::from(""));
            text.push(Line::from(Span::styled(
                "NEW HIGH SCORE!",
                Style::default()
                    .fg(Color::Magenta)
                    .add_modifier(Modifier::BOLD),
            )));
        }

        text.push(Line::from(""));
        text.push(Line::from(vec![
            Span::styled("Press ", Style::default().fg(Color::Gray)),
            Span::styled(
                "R",
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(" to restart or ", Style::default().fg(Color::Gray)),
            Span::styled(
                "Q",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            ),
            Span::styled(" to quit", Style::default().fg(Color::Gray)),
        ]));

        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(color)),
        )
    }

    fn render_controls(&self, mode: PlayMode) -> Paragraph<'static> {
        let mut spans = Vec::new();
        if mode == PlayMode::Manual {
            spans.push(Span::styled("↑↓←→/WASD", Style::default().fg(Color::Cyan)));
            spans.push(Span::raw(" move | "));
        }
        spans.extend([
            Span::styled("Space", Style::default().fg(Color::Cyan)),
            Span::raw(" pause | "),
            Span::styled("1-3", Style::default().fg(Color::Cyan)),
            Span::raw(" speed | "),
            Span::styled("M", Style::default().fg(Color::Cyan)),
            Span::raw(" manual/AI | "),
            Span::styled("Q", Style::default().fg(Color::Red)),
            Span::raw(" quit"),
        ]);

        Paragraph::new(Line::from(spans)).alignment(Alignment::Center)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Direction, GameState, Position, Snake};
    use ratatui::{Terminal, backend::TestBackend};

    fn hud() -> Hud {
        Hud {
            high_score: 40,
            new_record: false,
            mode: PlayMode::Manual,
            difficulty: Difficulty::Medium,
            paused: false,
            elapsed: "00:07".to_string(),
        }
    }

    fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_live_frame_shows_grid_and_stats() {
        let state = GameState::new(
            Snake::new(Position::new(1, 1), Direction::Right, 1),
            Position::new(0, 0),
            4,
            3,
        );
        let mut terminal = Terminal::new(TestBackend::new(100, 12)).unwrap();

        terminal
            .draw(|frame| Renderer::new().render(frame, &state.snapshot(), &hud()))
            .unwrap();

        let text = buffer_text(&terminal);
        assert!(text.contains("Score:"));
        assert!(text.contains("High:"));
        assert!(text.contains("Snake"));
        assert!(text.contains("■"));
    }

    #[test]
    fn test_grid_box_fits_the_board() {
        let state = GameState::new(
            Snake::new(Position::new(1, 1), Direction::Right, 1),
            Position::new(0, 0),
            4,
            3,
        );
        let area = Rect::new(0, 0, 40, 20);

        let grid = Renderer::grid_area(&state.snapshot(), area);

        assert_eq!(grid.width, 10);
        assert_eq!(grid.height, 5);
        assert_eq!(grid.x, 15);
        assert_eq!(grid.y, 7);

        let cramped = Renderer::grid_area(&state.snapshot(), Rect::new(2, 2, 6, 3));
        assert_eq!(cramped, Rect::new(2, 2, 6, 3));
    }

    #[test]
    fn test_terminal_frame_shows_banner() {
        let mut state = GameState::new(
            Snake::new(Position::new(0, 0), Direction::Up, 1),
            Position::new(2, 2),
            4,
            3,
        );
        state.outcome = Some(Outcome::Collision(CollisionType::Wall));
        let mut hud = hud();
        hud.new_record = true;
        let mut terminal = Terminal::new(TestBackend::new(100, 20)).unwrap();

        terminal
            .draw(|frame| Renderer::new().render(frame, &state.snapshot(), &hud))
            .unwrap();

        let text = buffer_text(&terminal);
        assert!(text.contains("GAME OVER"));
        assert!(text.contains("NEW HIGH SCORE!"));
    }
}
