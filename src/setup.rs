//! Color selection performed before a game exists: normalising what the
//! players typed, rejecting unusable choices, and formatting messages for
//! display.

use ratatui::style::Color;
use tracing::debug;

use crate::error::SetupError;
use crate::game::Player;

/// Lowercase the token and strip all whitespace.
pub fn normalize_color(raw: &str) -> String {
    raw.chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

/// A token is valid when the terminal can draw it: a named color, `#rrggbb`,
/// or a palette index.
pub fn is_valid_color(token: &str) -> bool {
    match token.parse::<Color>() {
        Ok(Color::Reset) | Err(_) => false,
        Ok(_) => true,
    }
}

/// Normalise and check both choices, then build the two players.
pub fn validate_colors(first: &str, second: &str) -> Result<(Player, Player), SetupError> {
    let first = normalize_color(first);
    let second = normalize_color(second);

    match (first.is_empty(), second.is_empty()) {
        (true, true) => return Err(SetupError::BothEmpty),
        (true, false) => return Err(SetupError::FirstEmpty),
        (false, true) => return Err(SetupError::SecondEmpty),
        (false, false) => {}
    }

    if first == second {
        return Err(SetupError::SameColor);
    }

    match (is_valid_color(&first), is_valid_color(&second)) {
        (false, false) => return Err(SetupError::BothInvalid),
        (false, true) => return Err(SetupError::FirstInvalid),
        (true, false) => return Err(SetupError::SecondInvalid),
        (true, true) => {}
    }

    debug!(%first, %second, "Colors accepted");
    Ok((Player::new(first), Player::new(second)))
}

/// Capitalize the first letter of an end-of-game message.
pub fn announce(message: &str) -> String {
    let mut chars = message.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// `"<first> vs. <second>"`
pub fn matchup(players: &[Player; 2]) -> String {
    format!("{} vs. {}", players[0].color(), players[1].color())
}
