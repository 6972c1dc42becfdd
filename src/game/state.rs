use std::collections::VecDeque;

use tracing::{debug, info, instrument};

use super::board::{Board, LINE_LENGTH, MAX_CELLS};
use super::event::{EventSink, GameEvent};
use super::player::{Player, Seat};
use crate::error::{InvalidMove, InvalidSetup};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    InProgress,
    Won(Seat),
    Tied,
}

/// What a successful drop did to the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlacementResult {
    Continue,
    Win,
    Tie,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub row: usize,
    pub column: usize,
    pub result: PlacementResult,
}

/// One game session: board, the two players, whose turn it is, and the
/// events not yet collected by a renderer.
#[derive(Debug, Clone)]
pub struct Game {
    board: Board,
    players: [Player; 2],
    current: Seat,
    status: GameStatus,
    events: VecDeque<GameEvent>,
}

impl Game {
    /// Create a game on an empty `height` x `width` board. `first` moves first.
    #[instrument(skip(first, second), fields(first = first.color(), second = second.color()))]
    pub fn new(
        height: usize,
        width: usize,
        first: Player,
        second: Player,
    ) -> Result<Self, InvalidSetup> {
        if height < LINE_LENGTH || width < LINE_LENGTH {
            return Err(InvalidSetup::BoardTooSmall { height, width });
        }
        if height.checked_mul(width).is_none_or(|cells| cells > MAX_CELLS) {
            return Err(InvalidSetup::BoardTooLarge { height, width });
        }
        if first == second {
            return Err(InvalidSetup::DuplicatePlayers {
                color: first.color().to_string(),
            });
        }

        debug!("Game created");
        Ok(Game {
            board: Board::new(height, width),
            players: [first, second],
            current: Seat::First,
            status: GameStatus::InProgress,
            events: VecDeque::new(),
        })
    }

    pub fn height(&self) -> usize {
        self.board.height()
    }

    pub fn width(&self) -> usize {
        self.board.width()
    }

    /// Get reference to board
    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn players(&self) -> &[Player; 2] {
        &self.players
    }

    pub fn player(&self, seat: Seat) -> &Player {
        &self.players[seat.index()]
    }

    pub fn current_seat(&self) -> Seat {
        self.current
    }

    pub fn current_player(&self) -> &Player {
        self.player(self.current)
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// Check if game is over
    pub fn is_terminal(&self) -> bool {
        self.status != GameStatus::InProgress
    }

    /// Get list of legal columns (not full)
    pub fn legal_columns(&self) -> Vec<usize> {
        if self.is_terminal() {
            return Vec::new();
        }

        (0..self.width())
            .filter(|&col| !self.board.is_column_full(col))
            .collect()
    }

    /// Lowest open row of `column`, or `None` if it is full or off the board.
    pub fn find_open_row(&self, column: usize) -> Option<usize> {
        self.board.find_open_row(column)
    }

    pub fn check_for_win(&self, seat: Seat) -> bool {
        self.board.check_for_win(seat)
    }

    /// Drop the current player's piece into `column`.
    ///
    /// Either the piece lands and the game advances, or an [`InvalidMove`] is
    /// returned and nothing changes. Only the mover can complete a line, so
    /// the win check covers the current player alone, and it runs before
    /// the tie check: a last piece that both wins and fills the board is a
    /// win.
    #[instrument(skip(self), fields(player = self.current_player().color()))]
    pub fn drop_piece(&mut self, column: usize) -> Result<Placement, InvalidMove> {
        if self.is_terminal() {
            debug!("Move rejected, game over");
            return Err(InvalidMove::GameOver);
        }

        let row = self.board.drop_piece(column, self.current).inspect_err(|err| {
            debug!(%err, "Move rejected");
        })?;
        let mover = self.current_player().clone();
        debug!(row, "Piece placed");
        self.events.push_back(GameEvent::PiecePlaced {
            row,
            column,
            player: mover.clone(),
        });

        let result = if self.check_for_win(self.current) {
            self.status = GameStatus::Won(self.current);
            self.end_game(format!("{} wins!", mover.color()));
            PlacementResult::Win
        } else if self.board.is_full() {
            self.status = GameStatus::Tied;
            self.end_game("Tie!".to_string());
            PlacementResult::Tie
        } else {
            self.current = self.current.other();
            PlacementResult::Continue
        };

        Ok(Placement {
            row,
            column,
            result,
        })
    }

    /// Take the queued events, oldest first.
    pub fn drain_events(&mut self) -> impl Iterator<Item = GameEvent> + '_ {
        self.events.drain(..)
    }

    /// Push every queued event to `sink`, oldest first.
    pub fn dispatch_events<S: EventSink + ?Sized>(&mut self, sink: &mut S) {
        while let Some(event) = self.events.pop_front() {
            sink.handle(&event);
        }
    }

    fn end_game(&mut self, message: String) {
        info!(%message, "Game over");
        self.events.push_back(GameEvent::GameEnded { message });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Cell;

    fn new_game() -> Game {
        Game::new(6, 7, Player::new("red"), Player::new("yellow")).unwrap()
    }

    #[test]
    fn test_initial_state() {
        let game = new_game();
        assert_eq!(game.current_seat(), Seat::First);
        assert_eq!(game.current_player().color(), "red");
        assert_eq!(game.status(), GameStatus::InProgress);
        assert!(!game.is_terminal());
        assert_eq!(game.legal_columns().len(), 7);
    }

    #[test]
    fn test_rejects_small_boards() {
        for (height, width) in [(3, 7), (6, 3), (0, 0)] {
            let err = Game::new(height, width, Player::new("red"), Player::new("blue"))
                .unwrap_err();
            assert_eq!(err, InvalidSetup::BoardTooSmall { height, width });
        }
        assert!(Game::new(4, 4, Player::new("red"), Player::new("blue")).is_ok());
    }

    #[test]
    fn test_rejects_oversized_boards() {
        for (height, width) in [(usize::MAX / 2, 4), (4, usize::MAX), (65, 64)] {
            let err = Game::new(height, width, Player::new("red"), Player::new("blue"))
                .unwrap_err();
            assert_eq!(err, InvalidSetup::BoardTooLarge { height, width });
        }
        assert!(Game::new(64, 64, Player::new("red"), Player::new("blue")).is_ok());
    }

    #[test]
    fn test_rejects_duplicate_players() {
        let err = Game::new(6, 7, Player::new("red"), Player::new("red")).unwrap_err();
        assert_eq!(
            err,
            InvalidSetup::DuplicatePlayers {
                color: "red".to_string()
            }
        );
    }

    #[test]
    fn test_drop_piece_switches_player() {
        let mut game = new_game();
        let placement = game.drop_piece(3).unwrap();

        assert_eq!(
            placement,
            Placement {
                row: 5,
                column: 3,
                result: PlacementResult::Continue
            }
        );
        assert_eq!(game.current_seat(), Seat::Second);
        assert_eq!(game.board().get(5, 3), Cell::Occupied(Seat::First));
    }

    #[test]
    fn test_placement_event() {
        let mut game = new_game();
        game.drop_piece(2).unwrap();

        let events: Vec<_> = game.drain_events().collect();
        assert_eq!(
            events,
            vec![GameEvent::PiecePlaced {
                row: 5,
                column: 2,
                player: Player::new("red"),
            }]
        );
        assert_eq!(game.drain_events().count(), 0);
    }

    #[test]
    fn test_win_detection() {
        let mut game = new_game();

        // Red wins with horizontal line, yellow stacks on top
        for col in 0..4 {
            let placement = game.drop_piece(col).unwrap();
            if col < 3 {
                game.drop_piece(col).unwrap();
            } else {
                assert_eq!(placement.result, PlacementResult::Win);
            }
        }

        assert!(game.is_terminal());
        assert_eq!(game.status(), GameStatus::Won(Seat::First));
        // No switch after the winning move
        assert_eq!(game.current_seat(), Seat::First);
        assert_eq!(
            game.drain_events().last(),
            Some(GameEvent::GameEnded {
                message: "red wins!".to_string()
            })
        );
    }

    #[test]
    fn test_rejected_moves_leave_state_alone() {
        let mut game = new_game();
        for _ in 0..6 {
            game.drop_piece(0).unwrap();
        }
        game.drain_events().for_each(drop);
        let before = game.board().clone();

        assert_eq!(
            game.drop_piece(0),
            Err(InvalidMove::ColumnFull { column: 0 })
        );
        assert_eq!(
            game.drop_piece(7),
            Err(InvalidMove::ColumnOutOfRange { column: 7, width: 7 })
        );
        assert_eq!(game.board(), &before);
        assert_eq!(game.current_seat(), Seat::First);
        assert_eq!(game.drain_events().count(), 0);
        assert_eq!(game.legal_columns(), vec![1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_no_moves_after_game_over() {
        let mut game = new_game();
        for _ in 0..3 {
            game.drop_piece(0).unwrap();
            game.drop_piece(1).unwrap();
        }
        game.drop_piece(0).unwrap();
        assert!(game.is_terminal());

        assert_eq!(game.drop_piece(4), Err(InvalidMove::GameOver));
        assert!(game.legal_columns().is_empty());
    }

    #[test]
    fn test_dispatch_to_closure() {
        let mut game = new_game();
        game.drop_piece(0).unwrap();
        game.drop_piece(1).unwrap();

        let mut seen = Vec::new();
        game.dispatch_events(&mut |event: &GameEvent| seen.push(event.clone()));
        assert_eq!(seen.len(), 2);
        assert!(matches!(
            &seen[1],
            GameEvent::PiecePlaced { column: 1, player, .. } if player.color() == "yellow"
        ));
    }

    #[test]
    fn test_independent_games() {
        let mut a = new_game();
        let b = new_game();
        a.drop_piece(0).unwrap();
        assert_eq!(a.current_seat(), Seat::Second);
        assert_eq!(b.current_seat(), Seat::First);
        assert_eq!(b.board().get(5, 0), Cell::Empty);
    }
}
