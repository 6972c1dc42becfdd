//! Core Connect Four game logic: board representation, players, the game
//! engine and the events it emits for renderers.

mod board;
mod event;
mod player;
mod state;

pub use board::{Board, Cell, LINE_LENGTH, MAX_CELLS};
pub use event::{EventSink, GameEvent};
pub use player::{Player, Seat};
pub use state::{Game, GameStatus, Placement, PlacementResult};
