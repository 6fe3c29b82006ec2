//! Keyboard bindings.
//!
//! Terminal-agnostic: the UI layer converts its native key events into [`Key`]
//! and asks the [`KeyMap`] what they mean.

use std::fmt;

use zen_core::types::DecisionKind;

/// A key press, independent of any terminal backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Char(char),
    Left,
    Right,
    Esc,
    /// Ctrl plus a character.
    Ctrl(char),
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Char(c) => write!(f, "{c}"),
            Key::Left => write!(f, "←"),
            Key::Right => write!(f, "→"),
            Key::Esc => write!(f, "Esc"),
            Key::Ctrl(c) => write!(f, "Ctrl-{}", c.to_ascii_uppercase()),
        }
    }
}

/// What a key asks the application to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Decide(DecisionKind),
    ToggleHelp,
    Quit,
}

impl Command {
    pub fn description(&self) -> &'static str {
        match self {
            Command::Decide(DecisionKind::Approve) => "Approve the top card",
            Command::Decide(DecisionKind::Dismiss) => "Dismiss the top card",
            Command::ToggleHelp => "Show or hide this help",
            Command::Quit => "Quit",
        }
    }
}

/// Fixed binding table.
#[derive(Debug, Clone, Default)]
pub struct KeyMap;

impl KeyMap {
    pub fn new() -> Self {
        Self
    }

    /// Resolve a key press. Letters are matched case-insensitively.
    pub fn resolve(&self, key: Key) -> Option<Command> {
        match key {
            Key::Right => Some(Command::Decide(DecisionKind::Approve)),
            Key::Left => Some(Command::Decide(DecisionKind::Dismiss)),
            Key::Esc => Some(Command::Quit),
            Key::Ctrl(c) if c.eq_ignore_ascii_case(&'c') => Some(Command::Quit),
            Key::Ctrl(_) => None,
            Key::Char(c) => match c.to_ascii_lowercase() {
                'l' => Some(Command::Decide(DecisionKind::Approve)),
                'h' => Some(Command::Decide(DecisionKind::Dismiss)),
                '?' => Some(Command::ToggleHelp),
                'q' => Some(Command::Quit),
                _ => None,
            },
        }
    }

    /// Rows for the help overlay: key labels and what they do.
    pub fn bindings(&self) -> Vec<(&'static str, Command)> {
        vec![
            ("→ or L", Command::Decide(DecisionKind::Approve)),
            ("← or H", Command::Decide(DecisionKind::Dismiss)),
            ("?", Command::ToggleHelp),
            ("q / Esc / Ctrl-C", Command::Quit),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decision_keys() {
        let map = KeyMap::new();
        for key in [Key::Right, Key::Char('l'), Key::Char('L')] {
            assert_eq!(
                map.resolve(key),
                Some(Command::Decide(DecisionKind::Approve)),
                "{key}"
            );
        }
        for key in [Key::Left, Key::Char('h'), Key::Char('H')] {
            assert_eq!(
                map.resolve(key),
                Some(Command::Decide(DecisionKind::Dismiss)),
                "{key}"
            );
        }
    }

    #[test]
    fn test_help_and_quit() {
        let map = KeyMap::new();
        assert_eq!(map.resolve(Key::Char('?')), Some(Command::ToggleHelp));
        assert_eq!(map.resolve(Key::Char('q')), Some(Command::Quit));
        assert_eq!(map.resolve(Key::Esc), Some(Command::Quit));
        assert_eq!(map.resolve(Key::Ctrl('c')), Some(Command::Quit));
    }

    #[test]
    fn test_unbound_keys() {
        let map = KeyMap::new();
        assert_eq!(map.resolve(Key::Char('x')), None);
        assert_eq!(map.resolve(Key::Char(' ')), None);
        assert_eq!(map.resolve(Key::Ctrl('l')), None);
    }

    #[test]
    fn test_bindings_cover_every_command() {
        let commands: Vec<Command> = KeyMap::new().bindings().into_iter().map(|(_, c)| c).collect();
        assert!(commands.contains(&Command::Decide(DecisionKind::Approve)));
        assert!(commands.contains(&Command::Decide(DecisionKind::Dismiss)));
        assert!(commands.contains(&Command::ToggleHelp));
        assert!(commands.contains(&Command::Quit));
    }

    #[test]
    fn test_binding_labels() {
        let labels: Vec<&str> = KeyMap::new().bindings().into_iter().map(|(l, _)| l).collect();
        assert_eq!(labels[0], "→ or L");
        assert_eq!(labels[1], "← or H");
        assert_eq!(labels[2], "?");
    }

    #[test]
    fn test_key_display() {
        assert_eq!(Key::Ctrl('c').to_string(), "Ctrl-C");
        assert_eq!(Key::Char('?').to_string(), "?");
    }
}
