use crate::Direction;
use serde::Deserialize;
use std::collections::HashSet;

/// One pressed input, as seen by a player handler
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum InputToken {
    Up,
    Down,
    Left,
    Right,
    Start,
    Run,
    SpeedUp,
    SpeedDown,
    Quit,
}

pub type TokenSet = HashSet<InputToken>;

/// A polled input device (controller, keyboard)
pub trait InputSource {
    /// Tokens held down this frame
    fn pressed_tokens(&self) -> TokenSet;
}

impl InputSource for TokenSet {
    fn pressed_tokens(&self) -> TokenSet {
        self.clone()
    }
}

const DIAGONALS: [(InputToken, InputToken, Direction); 4] = [
    (InputToken::Up, InputToken::Left, Direction::UpperLeft),
    (InputToken::Up, InputToken::Right, Direction::UpperRight),
    (InputToken::Down, InputToken::Left, Direction::LowerLeft),
    (InputToken::Down, InputToken::Right, Direction::LowerRight),
];

const ORTHOGONALS: [(InputToken, Direction); 4] = [
    (InputToken::Left, Direction::Left),
    (InputToken::Down, Direction::Down),
    (InputToken::Up, Direction::Up),
    (InputToken::Right, Direction::Right),
];

/// Directions requested by `tokens`, in evaluation order.
///
/// With `diagonal` enabled, a pair like Up+Left becomes UpperLeft and neither
/// Up nor Left is reported on its own.
pub fn resolve_directions(tokens: &TokenSet, diagonal: bool) -> Vec<Direction> {
    let mut directions = Vec::new();
    let mut consumed: HashSet<InputToken> = HashSet::new();

    if diagonal {
        for (a, b, direction) in DIAGONALS {
            if tokens.contains(&a) && tokens.contains(&b) {
                directions.push(direction);
                consumed.insert(a);
                consumed.insert(b);
            }
        }
    }

    for (token, direction) in ORTHOGONALS {
        if tokens.contains(&token) && !consumed.contains(&token) {
            directions.push(direction);
        }
    }

    directions
}

/// Key names bound to one player's tokens
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct KeyBindings {
    pub up: String,
    pub down: String,
    pub left: String,
    pub right: String,
    pub start: String,
    #[serde(default)]
    pub run: Option<String>,
    #[serde(default)]
    pub speed_up: Option<String>,
    #[serde(default)]
    pub speed_down: Option<String>,
}

impl KeyBindings {
    fn bindings(&self) -> Vec<(&str, InputToken)> {
        let mut keys = vec![
            (self.up.as_str(), InputToken::Up),
            (self.down.as_str(), InputToken::Down),
            (self.left.as_str(), InputToken::Left),
            (self.right.as_str(), InputToken::Right),
            (self.start.as_str(), InputToken::Start),
        ];
        let optional = [
            (&self.run, InputToken::Run),
            (&self.speed_up, InputToken::SpeedUp),
            (&self.speed_down, InputToken::SpeedDown),
        ];
        for (key, token) in optional {
            if let Some(key) = key {
                keys.push((key.as_str(), token));
            }
        }
        keys
    }

    /// Tokens whose bound key `is_down` reports as held
    pub fn tokens<F: Fn(&str) -> bool>(&self, is_down: F) -> TokenSet {
        self.bindings()
            .into_iter()
            .filter(|(key, _)| is_down(key))
            .map(|(_, token)| token)
            .collect()
    }
}
