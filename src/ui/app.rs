use std::io;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{backend::Backend, Terminal};
use tracing::{debug, info};

use crate::error::InvalidSetup;
use crate::game::{EventSink, Game, GameEvent, Player};
use crate::setup;

/// Receives engine events and holds the end-of-game message back until
/// its delay has passed.
#[derive(Debug)]
struct Announcer {
    delay: Duration,
    pending: Option<(String, Instant)>,
    last_placed: Option<(usize, usize)>,
}

impl Announcer {
    fn new(delay: Duration) -> Self {
        Announcer {
            delay,
            pending: None,
            last_placed: None,
        }
    }

    /// The message, once its delay has elapsed.
    fn take_ready(&mut self, now: Instant) -> Option<String> {
        let due = self.pending.as_ref().is_some_and(|(_, due)| *due <= now);
        if due {
            self.pending.take().map(|(msg, _)| msg)
        } else {
            None
        }
    }

    fn reset(&mut self) {
        self.pending = None;
        self.last_placed = None;
    }
}

impl EventSink for Announcer {
    fn handle(&mut self, event: &GameEvent) {
        match event {
            GameEvent::PiecePlaced { row, column, .. } => {
                self.last_placed = Some((*row, *column));
            }
            GameEvent::GameEnded { message } => {
                self.pending = Some((setup::announce(message), Instant::now() + self.delay));
            }
        }
    }
}

pub struct App {
    game: Game,
    selected_column: usize,
    should_quit: bool,
    message: Option<String>,
    announcer: Announcer,
}

impl App {
    pub fn new(
        height: usize,
        width: usize,
        first: Player,
        second: Player,
        announce_delay: Duration,
    ) -> Result<Self, InvalidSetup> {
        let game = Game::new(height, width, first, second)?;
        Ok(App {
            selected_column: width / 2, // Start in middle
            game,
            should_quit: false,
            message: None,
            announcer: Announcer::new(announce_delay),
        })
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    /// Main application loop
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()>
    where
        B::Error: Into<io::Error>,
    {
        loop {
            if let Some(message) = self.announcer.take_ready(Instant::now()) {
                self.message = Some(message);
            }

            terminal
                .draw(|f| self.render(f))
                .map_err(Into::<io::Error>::into)?;

            if self.should_quit {
                break;
            }

            self.handle_events()?;
        }
        Ok(())
    }

    /// Handle keyboard events
    fn handle_events(&mut self) -> io::Result<()> {
        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    self.handle_key(key);
                }
            }
        }
        Ok(())
    }

    /// Handle key press
    fn handle_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Left => {
                self.selected_column = self.selected_column.saturating_sub(1);
            }
            KeyCode::Right => {
                if self.selected_column + 1 < self.game.width() {
                    self.selected_column += 1;
                }
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                self.drop_piece();
            }
            KeyCode::Char(c @ '1'..='9') => {
                let column = c as usize - '1' as usize;
                if column < self.game.width() {
                    self.selected_column = column;
                    self.drop_piece();
                }
            }
            KeyCode::Char('r') => self.restart(),
            _ => {}
        }
    }

    /// Drop piece in selected column. Rejected moves are ignored.
    fn drop_piece(&mut self) {
        match self.game.drop_piece(self.selected_column) {
            Ok(_) => self.game.dispatch_events(&mut self.announcer),
            Err(err) => debug!(%err, "Ignoring move"),
        }
    }

    /// Start a fresh game with the same players
    fn restart(&mut self) {
        let [first, second] = self.game.players().clone();
        match Game::new(self.game.height(), self.game.width(), first, second) {
            Ok(game) => {
                info!("Game restarted");
                self.selected_column = game.width() / 2;
                self.game = game;
                self.announcer.reset();
                self.message = None;
            }
            Err(err) => self.message = Some(err.to_string()),
        }
    }

    /// Render the UI
    fn render(&self, frame: &mut ratatui::Frame) {
        super::game_view::render(
            frame,
            &self.game,
            self.selected_column,
            self.announcer.last_placed,
            &self.message,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn app(delay: Duration) -> App {
        App::new(6, 7, Player::new("red"), Player::new("yellow"), delay).unwrap()
    }

    fn press(app: &mut App, code: KeyCode) {
        app.handle_key(KeyEvent::new(code, KeyModifiers::NONE));
    }

    #[test]
    fn test_starts_in_middle_column() {
        assert_eq!(app(Duration::ZERO).selected_column, 3);
    }

    #[test]
    fn test_column_selection_stays_on_board() {
        let mut app = app(Duration::ZERO);
        for _ in 0..10 {
            press(&mut app, KeyCode::Right);
        }
        assert_eq!(app.selected_column, 6);
        for _ in 0..10 {
            press(&mut app, KeyCode::Left);
        }
        assert_eq!(app.selected_column, 0);
        press(&mut app, KeyCode::Char('9'));
        assert_eq!(app.selected_column, 0);
    }

    #[test]
    fn test_win_is_announced_capitalized() {
        let mut app = app(Duration::ZERO);
        for _ in 0..3 {
            press(&mut app, KeyCode::Char('1'));
            press(&mut app, KeyCode::Char('2'));
        }
        press(&mut app, KeyCode::Char('1'));

        assert!(app.game().is_terminal());
        assert_eq!(app.announcer.last_placed, Some((2, 0)));
        assert_eq!(
            app.announcer.take_ready(Instant::now()),
            Some("Red wins!".to_string())
        );
    }

    #[test]
    fn test_announcement_waits_for_delay() {
        let mut app = app(Duration::from_secs(60));
        for _ in 0..3 {
            press(&mut app, KeyCode::Char('1'));
            press(&mut app, KeyCode::Char('2'));
        }
        press(&mut app, KeyCode::Char('1'));

        assert_eq!(app.announcer.take_ready(Instant::now()), None);
        let later = Instant::now() + Duration::from_secs(61);
        assert_eq!(app.announcer.take_ready(later), Some("Red wins!".to_string()));
    }

    #[test]
    fn test_full_column_is_ignored() {
        let mut app = app(Duration::ZERO);
        for _ in 0..7 {
            press(&mut app, KeyCode::Enter);
        }
        assert!(app.game().board().is_column_full(3));
        assert_eq!(app.message, None);
        assert!(!app.game().is_terminal());
    }

    #[test]
    fn test_restart_keeps_players() {
        let mut app = app(Duration::ZERO);
        press(&mut app, KeyCode::Enter);
        press(&mut app, KeyCode::Char('r'));

        assert_eq!(app.game().legal_columns().len(), 7);
        assert_eq!(app.game().find_open_row(3), Some(5));
        assert_eq!(app.game().players()[0].color(), "red");
        assert_eq!(app.announcer.last_placed, None);
    }

    #[test]
    fn test_quit() {
        let mut app = app(Duration::ZERO);
        press(&mut app, KeyCode::Char('q'));
        assert!(app.should_quit);
    }
}
