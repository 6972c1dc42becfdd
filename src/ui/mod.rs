//! Terminal UI: keyboard-driven board view that subscribes to game events.

mod app;
mod game_view;

pub use app::App;
pub use game_view::player_color;
