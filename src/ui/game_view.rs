use crate::game::{Board, Cell, Game, Player, Seat};
use crate::setup;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Terminal color for a player's token. Tokens are validated at setup, so
/// the fallback only covers games built directly through the library.
pub fn player_color(player: &Player) -> Color {
    player.color().parse().unwrap_or(Color::White)
}

pub fn render(
    frame: &mut Frame,
    game: &Game,
    selected_column: usize,
    last_placed: Option<(usize, usize)>,
    message: &Option<String>,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),                      // Header
            Constraint::Min(board_rows(game.height())), // Board
            Constraint::Length(3),                      // Message
            Constraint::Length(3),                      // Controls
        ])
        .split(frame.area());

    render_header(frame, game, chunks[0]);
    render_board(frame, game, selected_column, last_placed, chunks[1]);
    render_message(frame, message, chunks[2]);
    render_controls(frame, chunks[3]);
}

/// Rows the board area needs: the cells plus labels, borders and indicator.
fn board_rows(height: usize) -> u16 {
    u16::try_from(height).unwrap_or(u16::MAX).saturating_add(4)
}

fn render_header(frame: &mut Frame, game: &Game, area: Rect) {
    let current = game.current_player();

    let status = if game.is_terminal() {
        format!("{}  |  Game Over", setup::matchup(game.players()))
    } else {
        format!(
            "{}  |  Current Player: {}",
            setup::matchup(game.players()),
            current.color()
        )
    };

    let header = Paragraph::new(status)
        .style(
            Style::default()
                .fg(player_color(current))
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Connect Four"),
        );

    frame.render_widget(header, area);
}

fn render_board(
    frame: &mut Frame,
    game: &Game,
    selected_column: usize,
    last_placed: Option<(usize, usize)>,
    area: Rect,
) {
    let board = game.board();
    let colors = [
        player_color(game.player(Seat::First)),
        player_color(game.player(Seat::Second)),
    ];
    let rule = "═".repeat(board.width() * 3 + 1);
    let mut lines = Vec::new();

    // Column numbers with selection indicator
    let mut col_line = vec![Span::raw("   ")]; // Padding (3 chars to match "  ║")
    for col in 0..board.width() {
        let label = format!("{:^3}", col + 1);
        if col == selected_column {
            col_line.push(Span::styled(
                label,
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
            ));
        } else {
            col_line.push(Span::raw(label));
        }
    }
    col_line.push(Span::raw("  ")); // Suffix padding to match " ║"
    lines.push(Line::from(col_line));

    lines.push(Line::from(format!("  ╔{rule}╗")));

    for row in 0..board.height() {
        lines.push(board_row(board, row, &colors, last_placed));
    }

    lines.push(Line::from(format!("  ╚{rule}╝")));

    // Selection indicator
    let mut indicator_line = vec![Span::raw("   ")];
    for col in 0..board.width() {
        if col == selected_column {
            indicator_line.push(Span::styled(" ▲ ", Style::default().fg(Color::Cyan)));
        } else {
            indicator_line.push(Span::raw("   "));
        }
    }
    indicator_line.push(Span::raw("  "));
    lines.push(Line::from(indicator_line));

    let board_widget = Paragraph::new(lines).alignment(Alignment::Center);
    frame.render_widget(board_widget, area);
}

fn board_row<'a>(
    board: &Board,
    row: usize,
    colors: &[Color; 2],
    last_placed: Option<(usize, usize)>,
) -> Line<'a> {
    let mut spans = vec![Span::raw("  ║")];

    for col in 0..board.width() {
        let span = match board.get(row, col) {
            Cell::Empty => Span::styled(" . ", Style::default().fg(Color::DarkGray)),
            Cell::Occupied(seat) => {
                let mut style = Style::default().fg(colors[seat.index()]);
                if last_placed == Some((row, col)) {
                    style = style.add_modifier(Modifier::BOLD | Modifier::REVERSED);
                }
                Span::styled(" ● ", style)
            }
        };
        spans.push(span);
    }

    spans.push(Span::raw(" ║"));
    Line::from(spans)
}

fn render_message(frame: &mut Frame, message: &Option<String>, area: Rect) {
    let text = message.as_deref().unwrap_or("");
    let msg_widget = Paragraph::new(text)
        .style(Style::default().fg(Color::Yellow))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));

    frame.render_widget(msg_widget, area);
}

fn render_controls(frame: &mut Frame, area: Rect) {
    let line = Line::from("←/→: Move  |  Enter: Drop  |  1-9: Drop in column  |  R: Restart  |  Q: Quit");

    let controls = Paragraph::new(line)
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Controls"),
        );

    frame.render_widget(controls, area);
}
