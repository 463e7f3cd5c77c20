//! Key-to-command mapping

use crate::settings::Settings;
use blockfall::Command;
use crossterm::event::KeyCode;

/// What a key press asks the host to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Game(Command),
    /// Ask before wiping the board
    RequestReset,
    Quit,
}

/// Key bindings configuration - supports multiple keys per action
#[derive(Debug, Clone)]
pub struct KeyBindings {
    pub move_left: Vec<KeyCode>,
    pub move_right: Vec<KeyCode>,
    pub soft_drop: Vec<KeyCode>,
    pub rotate: Vec<KeyCode>,
    pub pause: Vec<KeyCode>,
    pub reset: Vec<KeyCode>,
    pub quit: Vec<KeyCode>,
}

impl KeyBindings {
    /// Parse a key string into KeyCode
    fn parse_key(s: &str) -> Option<KeyCode> {
        let lower = s.to_lowercase();
        let code = match lower.as_str() {
            "left" => KeyCode::Left,
            "right" => KeyCode::Right,
            "up" => KeyCode::Up,
            "down" => KeyCode::Down,
            "space" => KeyCode::Char(' '),
            "enter" => KeyCode::Enter,
            "tab" => KeyCode::Tab,
            "esc" | "escape" => KeyCode::Esc,
            _ => {
                let mut chars = lower.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => KeyCode::Char(c),
                    _ => return None,
                }
            }
        };
        Some(code)
    }

    /// Parse a list of key strings, dropping names that mean nothing
    fn parse_keys(keys: &[String]) -> Vec<KeyCode> {
        keys.iter()
            .filter_map(|s| {
                let code = Self::parse_key(s);
                if code.is_none() {
                    tracing::warn!("Unknown key name {:?} in settings", s);
                }
                code
            })
            .collect()
    }

    /// Create keybindings from settings
    pub fn from_settings(settings: &Settings) -> Self {
        let keys = &settings.keys;
        Self {
            move_left: Self::parse_keys(&keys.move_left),
            move_right: Self::parse_keys(&keys.move_right),
            soft_drop: Self::parse_keys(&keys.soft_drop),
            rotate: Self::parse_keys(&keys.rotate),
            pause: Self::parse_keys(&keys.pause),
            reset: Self::parse_keys(&keys.reset),
            quit: Self::parse_keys(&keys.quit),
        }
    }

    /// Map a key to an action; letters match either case
    pub fn action_for(&self, code: KeyCode) -> Option<Action> {
        let code = match code {
            KeyCode::Char(c) => KeyCode::Char(c.to_ascii_lowercase()),
            other => other,
        };
        let table = [
            (&self.move_left, Action::Game(Command::MoveLeft)),
            (&self.move_right, Action::Game(Command::MoveRight)),
            (&self.soft_drop, Action::Game(Command::SoftDrop)),
            (&self.rotate, Action::Game(Command::Rotate)),
            (&self.pause, Action::Game(Command::TogglePause)),
            (&self.reset, Action::RequestReset),
            (&self.quit, Action::Quit),
        ];
        table
            .into_iter()
            .find(|(keys, _)| keys.contains(&code))
            .map(|(_, action)| action)
    }
}
