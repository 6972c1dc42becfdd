use super::player::Player;

/// Something a renderer needs to hear about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    PiecePlaced {
        row: usize,
        column: usize,
        player: Player,
    },
    /// `"<color> wins!"` or `"Tie!"`, uncapitalized.
    GameEnded { message: String },
}

/// A subscriber that has events pushed to it by [`super::Game::dispatch_events`].
pub trait EventSink {
    fn handle(&mut self, event: &GameEvent);
}

impl<F: FnMut(&GameEvent)> EventSink for F {
    fn handle(&mut self, event: &GameEvent) {
        self(event)
    }
}
