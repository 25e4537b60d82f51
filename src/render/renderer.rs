use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
};

use super::scene::{Fill, Overlay, Scene, compose};
use crate::audio::SoundMode;
use crate::game::{Direction as Heading, GameConfig, GameState};
use crate::metrics::GameMetrics;

pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, frame: &mut Frame, state: &GameState, metrics: &GameMetrics) {
        let scene = compose(state);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(0),    // Game area
                Constraint::Length(3), // Footer
            ])
            .split(frame.area());

        let stats = self.render_stats(state, metrics);
        frame.render_widget(stats, chunks[0]);

        let grid = self.render_grid(&scene);
        frame.render_widget(grid, chunks[1]);

        if let Some(overlay) = scene.overlay {
            let popup = centered(chunks[1], 40, 9);
            frame.render_widget(Clear, popup);
            frame.render_widget(self.render_overlay(overlay, metrics), popup);
        }

        let controls = self.render_controls();
        frame.render_widget(controls, chunks[2]);
    }

    /// Title card shown before the first tick
    pub fn render_start_screen(&self, frame: &mut Frame, config: &GameConfig) {
        let sound = match config.sound {
            SoundMode::Off => "off",
            SoundMode::Bell => "terminal bell",
        };

        let text = vec![
            Line::from(""),
            Line::from(Span::styled(
                "S N A K E",
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(vec![
                Span::styled("Grid: ", Style::default().fg(Color::Yellow)),
                Span::raw(format!("{} x {}", config.columns(), config.rows())),
                Span::raw("    "),
                Span::styled("Sound: ", Style::default().fg(Color::Yellow)),
                Span::raw(sound),
            ]),
            Line::from(""),
            controls_line(),
        ];

        let area = centered(frame.area(), 50, 8);
        let card = Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Double)
                .border_style(Style::default().fg(Color::Green)),
        );
        frame.render_widget(card, area);
    }

    fn render_grid(&self, scene: &Scene) -> Paragraph<'_> {
        let lines = paint_cells(scene)
            .into_iter()
            .map(|row| Line::from(row.into_iter().map(cell_span).collect::<Vec<_>>()))
            .collect::<Vec<_>>();

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

    fn render_stats(&self, state: &GameState, metrics: &GameMetrics) -> Paragraph<'_> {
        let label = Style::default().fg(Color::Yellow);
        let value = Style::default().fg(Color::White);

        let text = vec![Line::from(vec![
            Span::styled("Score: ", label),
            Span::styled(state.score.to_string(), value.add_modifier(Modifier::BOLD)),
            Span::raw("    "),
            Span::styled("Length: ", label),
            Span::styled(state.snake.len().to_string(), value),
            Span::raw("    "),
            Span::styled("Steps: ", label),
            Span::styled(state.steps.to_string(), value),
            Span::raw("    "),
            Span::styled("Time: ", label),
            Span::styled(metrics.format_time(), value),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }

    fn render_overlay(&self, overlay: Overlay, metrics: &GameMetrics) -> Paragraph<'_> {
        let Overlay::GameOver { score, reason } = overlay;
        let cause = reason
            .map(|r| format!("The snake {}", r))
            .unwrap_or_default();

        let text = vec![
            Line::from(""),
            Line::from(Span::styled(
                "GAME OVER",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(cause, Style::default().fg(Color::Gray))),
            Line::from(""),
            Line::from(vec![
                Span::styled("Final Score: ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    score.to_string(),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::raw("  "),
                Span::styled("Time: ", Style::default().fg(Color::Yellow)),
                Span::raw(metrics.format_time()),
            ]),
        ];

        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red)),
        )
    }

    fn render_controls(&self) -> Paragraph<'_> {
        Paragraph::new(vec![controls_line()]).alignment(Alignment::Center)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Rasterize the scene onto its cell grid. Rectangles outside the playfield
/// are clipped; later rectangles overwrite earlier ones.
pub fn paint_cells(scene: &Scene) -> Vec<Vec<Option<Fill>>> {
    let cell = scene.cell_size.max(1);
    let columns = (scene.width / cell).max(0) as usize;
    let rows = (scene.height / cell).max(0) as usize;
    let mut cells = vec![vec![None; columns]; rows];

    for rect in &scene.rects {
        let first_col = rect.x.div_euclid(cell);
        let first_row = rect.y.div_euclid(cell);
        let span_cols = (rect.width / cell).max(1);
        let span_rows = (rect.height / cell).max(1);

        for row in first_row..first_row + span_rows {
            for col in first_col..first_col + span_cols {
                if row < 0 || col < 0 || row as usize >= rows || col as usize >= columns {
                    continue;
                }
                cells[row as usize][col as usize] = Some(rect.fill);
            }
        }
    }

    cells
}

fn cell_span(fill: Option<Fill>) -> Span<'static> {
    match fill {
        Some(Fill::SnakeHead(heading)) => Span::styled(
            head_glyph(heading),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Some(Fill::SnakeBody) => Span::styled("■ ", Style::default().fg(Color::Green)),
        Some(Fill::Food) => Span::styled(
            "● ",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ),
        None => Span::styled(". ", Style::default().fg(Color::DarkGray)),
    }
}

fn head_glyph(heading: Heading) -> &'static str {
    match heading {
        Heading::Up => "▲ ",
        Heading::Down => "▼ ",
        Heading::Left => "◀ ",
        Heading::Right => "▶ ",
    }
}

fn controls_line() -> Line<'static> {
    Line::from(vec![
        Span::styled("↑↓←→", Style::default().fg(Color::Cyan)),
        Span::raw(" or "),
        Span::styled("WASD", Style::default().fg(Color::Cyan)),
        Span::raw(" to move | "),
        Span::styled("Q", Style::default().fg(Color::Red)),
        Span::raw(" to quit"),
    ])
}

/// A `width` x `height` rect centered in `area`, shrunk to fit
fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
