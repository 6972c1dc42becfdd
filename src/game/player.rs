/// One of the two competing players, identified by a color token.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Player {
    color: String,
}

impl Player {
    pub fn new(color: impl Into<String>) -> Self {
        Player {
            color: color.into(),
        }
    }

    /// The color token this player was created with
    pub fn color(&self) -> &str {
        &self.color
    }
}

/// Position of a player in the ordered pair held by a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Seat {
    First,
    Second,
}

impl Seat {
    /// Get the other seat
    pub fn other(self) -> Seat {
        match self {
            Seat::First => Seat::Second,
            Seat::Second => Seat::First,
        }
    }

    pub fn index(self) -> usize {
        match self {
            Seat::First => 0,
            Seat::Second => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_other_seat() {
        assert_eq!(Seat::First.other(), Seat::Second);
        assert_eq!(Seat::Second.other(), Seat::First);
    }

    #[test]
    fn test_player_color() {
        let player = Player::new("teal");
        assert_eq!(player.color(), "teal");
        assert_eq!(player, Player::new(String::from("teal")));
    }
}
