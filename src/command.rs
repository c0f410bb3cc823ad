use crate::game::Direction;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::collections::HashMap;

/// An action the player can take
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Command {
    Turn(Direction),
    TogglePause,
    Quit,
}

/// Table mapping key presses to commands.  Keys not in the table are ignored.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct KeyMap(HashMap<(KeyModifiers, KeyCode), Command>);

impl KeyMap {
    pub(crate) fn get(&self, ev: KeyEvent) -> Option<Command> {
        self.0.get(&(ev.modifiers, ev.code)).copied()
    }

    pub(crate) fn bind(&mut self, modifiers: KeyModifiers, code: KeyCode, cmd: Command) {
        let _ = self.0.insert((modifiers, code), cmd);
    }
}

impl Default for KeyMap {
    fn default() -> KeyMap {
        let mut keymap = KeyMap(HashMap::new());
        let none = KeyModifiers::NONE;
        for (dir, arrow, chars) in [
            (Direction::Up, KeyCode::Up, ['w', 'k']),
            (Direction::Down, KeyCode::Down, ['s', 'j']),
            (Direction::Left, KeyCode::Left, ['a', 'h']),
            (Direction::Right, KeyCode::Right, ['d', 'l']),
        ] {
            keymap.bind(none, arrow, Command::Turn(dir));
            for ch in chars {
                keymap.bind(none, KeyCode::Char(ch), Command::Turn(dir));
            }
        }
        keymap.bind(none, KeyCode::Char(' '), Command::TogglePause);
        keymap.bind(none, KeyCode::Char('p'), Command::TogglePause);
        keymap.bind(none, KeyCode::Char('q'), Command::Quit);
        keymap.bind(none, KeyCode::Esc, Command::Quit);
        keymap.bind(KeyModifiers::CONTROL, KeyCode::Char('c'), Command::Quit);
        keymap
    }
}
