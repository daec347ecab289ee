//! Stateless drawing of a board view.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Paragraph},
};

use crate::board::{CELL_COUNT, Cell, CellIndex, Mark};
use crate::render::{BoardView, CellView};
use crate::session::Status;

const CELL_WIDTH: u16 = 7;
const CELL_HEIGHT: u16 = 3;
const HELP_TEXT: &str = "arrows/1-9 select · enter play · click play · n new game · q quit";

/// Screen rectangles of the drawn cells, for mouse hit-testing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardLayout {
    cells: [Rect; CELL_COUNT],
}

impl BoardLayout {
    /// Wraps cell rectangles in board order.
    pub fn new(cells: [Rect; CELL_COUNT]) -> Self {
        Self { cells }
    }

    /// Rectangle of `index`.
    pub fn cell(&self, index: CellIndex) -> Rect {
        self.cells[index.get()]
    }
}

/// Draws the whole screen and returns where each cell landed.
pub fn draw(
    frame: &mut Frame,
    view: &BoardView,
    status: &Status,
    cursor: CellIndex,
) -> BoardLayout {
    let area = frame.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title
            Constraint::Min(CELL_HEIGHT * 3),
            Constraint::Length(3), // Status
            Constraint::Length(1), // Help
        ])
        .split(area);

    let title = Paragraph::new("Tic Tac Toe")
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center);
    frame.render_widget(title, chunks[0]);

    let layout = draw_board(frame, chunks[1], view, cursor);

    let status_text = Paragraph::new(status.to_string())
        .style(status_style(status))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(status_text, chunks[2]);

    let help = Paragraph::new(HELP_TEXT)
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);
    frame.render_widget(help, chunks[3]);

    layout
}

fn draw_board(frame: &mut Frame, area: Rect, view: &BoardView, cursor: CellIndex) -> BoardLayout {
    let board_area = center_rect(area, CELL_WIDTH * 3, CELL_HEIGHT * 3);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(CELL_HEIGHT); 3])
        .split(board_area);

    let mut cells = [Rect::default(); CELL_COUNT];
    for (row, row_area) in rows.iter().enumerate() {
        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(CELL_WIDTH); 3])
            .split(*row_area);
        for (cell_view, col_area) in view.row(row).iter().zip(cols.iter()) {
            draw_cell(frame, *col_area, cell_view, cell_view.index() == cursor);
            cells[cell_view.index().get()] = *col_area;
        }
    }
    BoardLayout::new(cells)
}

fn draw_cell(frame: &mut Frame, area: Rect, cell: &CellView, has_cursor: bool) {
    let mut style = match cell.cell() {
        Cell::Empty => Style::default().fg(Color::DarkGray),
        Cell::Marked(Mark::Human) => {
            Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD)
        }
        Cell::Marked(Mark::Opponent) => {
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
        }
    };
    let mut border = Style::default().fg(Color::Gray);

    if cell.is_disabled() {
        border = border.add_modifier(Modifier::DIM);
    }
    if cell.is_highlighted() {
        style = style
            .bg(Color::Green)
            .fg(Color::Black)
            .add_modifier(Modifier::BOLD);
        border = border.fg(Color::Green);
    }
    if has_cursor {
        if cell.is_highlighted() {
            style = style.add_modifier(Modifier::UNDERLINED);
        } else {
            style = style.bg(Color::White).fg(Color::Black);
        }
        border = border.fg(Color::White).remove_modifier(Modifier::DIM);
    }

    let paragraph = Paragraph::new(cell.label())
        .style(style)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).border_style(border));
    frame.render_widget(paragraph, area);
}

fn status_style(status: &Status) -> Style {
    match status {
        Status::Won => Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        Status::Lost => Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        Status::Failed(_) => Style::default().fg(Color::Red),
        _ => Style::default().fg(Color::Yellow),
    }
}

fn center_rect(area: Rect, width: u16, height: u16) -> Rect {
    let vert = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length((area.height.saturating_sub(height)) / 2),
            Constraint::Length(height),
            Constraint::Length((area.height.saturating_sub(height)) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length((area.width.saturating_sub(width)) / 2),
            Constraint::Length(width),
            Constraint::Length((area.width.saturating_sub(width)) / 2),
        ])
        .split(vert[1])[1]
}
