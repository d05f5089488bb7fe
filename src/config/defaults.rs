use crossterm::event::KeyCode;

use crate::config::key::{Key, KeyBinding};
use crate::config::keybindings::{GlobalKeybindings, NavigationKeybindings, OverlayKeybindings};

impl Default for GlobalKeybindings {
    fn default() -> Self {
        Self {
            quit: Key::with_ctrl(KeyCode::Char('q')).into(),
            suspend: Key::with_ctrl(KeyCode::Char('z')).into(),
            title_screen: Key::with_ctrl(KeyCode::Char('t')).into(),
        }
    }
}

impl Default for OverlayKeybindings {
    fn default() -> Self {
        Self {
            talk: Key::new(KeyCode::Char('t')).into(),
            inventory: Key::new(KeyCode::Char('i')).into(),
            world_map: Key::new(KeyCode::Char('m')).into(),
            quest_log: Key::new(KeyCode::Char('q')).into(),
            settings: Key::new(KeyCode::Char('o')).into(),
            battle: Key::new(KeyCode::Char('b')).into(),
        }
    }
}

impl Default for NavigationKeybindings {
    fn default() -> Self {
        Self {
            up: KeyBinding::multiple(vec![Key::new(KeyCode::Char('k')), Key::new(KeyCode::Up)]),
            down: KeyBinding::multiple(vec![
                Key::new(KeyCode::Char('j')),
                Key::new(KeyCode::Down),
            ]),
            left: KeyBinding::multiple(vec![
                Key::new(KeyCode::Char('h')),
                Key::new(KeyCode::Left),
            ]),
            right: KeyBinding::multiple(vec![
                Key::new(KeyCode::Char('l')),
                Key::new(KeyCode::Right),
            ]),
            select: Key::new(KeyCode::Enter).into(),
        }
    }
}
