use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};

use crate::game::{self, EndReason, GameEngine, GamePhase, Position};
use crate::metrics::{GameMetrics, HeadFlash};

/// Which screen the front end is showing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Menu,
    Playing,
    GameOver,
}

pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    pub fn render(
        &self,
        frame: &mut Frame,
        engine: &GameEngine,
        metrics: &GameMetrics,
        screen: Screen,
    ) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(0),    // Game area
                Constraint::Length(3), // Footer
            ])
            .split(frame.area());

        frame.render_widget(self.render_stats(engine, metrics), chunks[0]);

        // Center the game grid horizontally
        let game_area = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(10),
                Constraint::Percentage(80),
                Constraint::Percentage(10),
            ])
            .split(chunks[1])[1];

        let body = match screen {
            Screen::Menu => self.render_menu(engine),
            Screen::Playing => self.render_grid(engine, metrics),
            Screen::GameOver => self.render_game_over(engine, metrics),
        };
        frame.render_widget(body, game_area);

        frame.render_widget(self.render_controls(screen), chunks[2]);
    }

    fn render_grid(&self, engine: &GameEngine, metrics: &GameMetrics) -> Paragraph<'_> {
        let grid = engine.grid();
        let head = engine.head();
        let mut lines = Vec::with_capacity(grid.height());

        for y in 0..grid.height() {
            let mut spans = Vec::with_capacity(grid.width());

            for x in 0..grid.width() {
                let pos = Position::new(x as i32, y as i32);

                let cell = if pos == head {
                    Span::styled(head_glyph(engine.direction()), head_style(metrics.head_flash))
                } else if engine.occupies(pos) {
                    Span::styled("□ ", Style::default().fg(Color::Green))
                } else if engine.is_food_at(pos) {
                    Span::styled(
                        "O ",
                        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                    )
                } else {
                    Span::styled(". ", Style::default().fg(Color::DarkGray))
                };

                spans.push(cell);
            }

            lines.push(Line::from(spans));
        }

        Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Double)
                    .border_style(Style::default().fg(Color::White))
                    .title(" Snake "),
            )
            .alignment(Alignment::Center)
    }

    fn render_stats(&self, engine: &GameEngine, metrics: &GameMetrics) -> Paragraph<'_> {
        let label = Style::default().fg(Color::Yellow);
        let value = Style::default().fg(Color::White);

        let text = vec![Line::from(vec![
            Span::styled("Score: ", label),
            Span::styled(engine.score().to_string(), value.add_modifier(Modifier::BOLD)),
            Span::raw("   "),
            Span::styled("Length: ", label),
            Span::styled(
                format!("{}/{}", engine.length(), engine.capacity()),
                value,
            ),
            Span::raw("   "),
            Span::styled("High: ", label),
            Span::styled(metrics.high_score.to_string(), value),
            Span::raw("   "),
            Span::styled("Time: ", label),
            Span::styled(metrics.format_time(), value),
            Span::raw("   "),
            Span::styled("Eaten: ", label),
            Span::styled(metrics.foods_eaten.to_string(), value),
            Span::raw("   "),
            Span::styled("Wraps: ", label),
            Span::styled(metrics.wraps.to_string(), value),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }

    fn render_menu(&self, engine: &GameEngine) -> Paragraph<'_> {
        let grid = engine.grid();
        let text = vec![
            Line::from(""),
            Line::from(vec![Span::styled(
                "SNAKE",
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            )]),
            Line::from(""),
            Line::from(Span::styled(
                format!("{} x {} board, edges wrap around", grid.width(), grid.height()),
                Style::default().fg(Color::Gray),
            )),
            Line::from(""),
            Line::from(vec![
                Span::styled("Press ", Style::default().fg(Color::Gray)),
                Span::styled(
                    "Space",
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(" to start", Style::default().fg(Color::Gray)),
            ]),
        ];

        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Green)),
        )
    }

    fn render_game_over(&self, engine: &GameEngine, metrics: &GameMetrics) -> Paragraph<'_> {
        let (title, color) = match engine.phase() {
            GamePhase::Over(EndReason::BoardFilled) => ("BOARD CLEARED", Color::Green),
            _ => ("GAME OVER", Color::Red),
        };

        let text = vec![
            Line::from(""),
            Line::from(vec![Span::styled(
                title,
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            )]),
            Line::from(""),
            Line::from(vec![
                Span::styled("Final Score: ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    engine.score().to_string(),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::from(vec![
                Span::styled("Games played: ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    metrics.games_played.to_string(),
                    Style::default().fg(Color::White),
                ),
            ]),
            Line::from(""),
            Line::from(vec![
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
            ]),
        ];

        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(color)),
        )
    }

    fn render_controls(&self, screen: Screen) -> Paragraph<'_> {
        let text = match screen {
            Screen::Menu => Line::from(vec![
                Span::styled("Space", Style::default().fg(Color::Cyan)),
                Span::raw(" to start | "),
                Span::styled("Q", Style::default().fg(Color::Red)),
                Span::raw(" to quit"),
            ]),
            _ => Line::from(vec![
                Span::styled("↑↓←→", Style::default().fg(Color::Cyan)),
                Span::raw(" or "),
                Span::styled("WASD", Style::default().fg(Color::Cyan)),
                Span::raw(" to move | "),
                Span::styled("R", Style::default().fg(Color::Green)),
                Span::raw(" to restart | "),
                Span::styled("Esc", Style::default().fg(Color::Yellow)),
                Span::raw(" for menu | "),
                Span::styled("Q", Style::default().fg(Color::Red)),
                Span::raw(" to quit"),
            ]),
        };

        Paragraph::new(text).alignment(Alignment::Center)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

fn head_style(flash: Option<HeadFlash>) -> Style {
    let color = match flash {
        Some(HeadFlash::Ate) => Color::Yellow,
        Some(HeadFlash::Wrapped) => Color::Magenta,
        None => Color::Cyan,
    };
    Style::default().fg(color).add_modifier(Modifier::BOLD)
}

/// Head cell pointing where the snake is heading
fn head_glyph(direction: game::Direction) -> &'static str {
    match direction {
        game::Direction::Up => "▲ ",
        game::Direction::Right => "▶ ",
        game::Direction::Down => "▼ ",
        game::Direction::Left => "◀ ",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::GameConfig;
    use ratatui::{Terminal, backend::TestBackend, buffer::Cell};

    fn draw_cells(engine: &GameEngine, metrics: &GameMetrics, screen: Screen) -> Vec<Cell> {
        let backend = TestBackend::new(90, 30);
        let mut terminal = Terminal::new(backend).unwrap();
        let renderer = Renderer::new();

        terminal
            .draw(|frame| renderer.render(frame, engine, metrics, screen))
            .unwrap();

        terminal.backend().buffer().content.clone()
    }

    fn draw(engine: &GameEngine, screen: Screen) -> String {
        draw_cells(engine, &GameMetrics::new(), screen)
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_head_glyph_follows_direction() {
        assert_eq!(head_glyph(game::Direction::Up), "▲ ");
        assert_eq!(head_glyph(game::Direction::Left), "◀ ");
    }

    #[test]
    fn test_playing_screen_shows_snake_and_food() {
        let engine = GameEngine::new(GameConfig::small().with_seed(3)).unwrap();
        let screen = draw(&engine, Screen::Playing);

        assert!(screen.contains("Score:"));
        assert!(screen.contains('▶'));
        assert!(screen.contains('O'));
    }

    #[test]
    fn test_stats_show_eaten_and_wraps() {
        let engine = GameEngine::new(GameConfig::small().with_seed(3)).unwrap();
        let mut metrics = GameMetrics::new();
        metrics.foods_eaten = 2;
        metrics.wraps = 1;

        let screen: String = draw_cells(&engine, &metrics, Screen::Playing)
            .iter()
            .map(|cell| cell.symbol())
            .collect();

        assert!(screen.contains("Eaten: 2"));
        assert!(screen.contains("Wraps: 1"));
    }

    #[test]
    fn test_head_flashes_after_eating_or_wrapping() {
        let engine = GameEngine::new(GameConfig::small().with_seed(3)).unwrap();
        let head_fg = |flash| {
            let mut metrics = GameMetrics::new();
            metrics.head_flash = flash;
            draw_cells(&engine, &metrics, Screen::Playing)
                .into_iter()
                .find(|cell| cell.symbol() == "▶")
                .map(|cell| cell.fg)
        };

        assert_eq!(head_fg(None), Some(Color::Cyan));
        assert_eq!(head_fg(Some(HeadFlash::Ate)), Some(Color::Yellow));
        assert_eq!(head_fg(Some(HeadFlash::Wrapped)), Some(Color::Magenta));
    }

    #[test]
    fn test_menu_and_game_over_screens() {
        let engine = GameEngine::new(GameConfig::small().with_seed(3)).unwrap();

        assert!(draw(&engine, Screen::Menu).contains("SNAKE"));
        assert!(draw(&engine, Screen::GameOver).contains("GAME OVER"));
    }
}
