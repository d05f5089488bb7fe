use std::sync::Arc;

use crossterm::event::KeyEvent;

use crate::config::actions::{GlobalAction, NavAction, OverlayAction};
use crate::config::keybindings::KeybindingsConfig;

/// Maps key events to configured actions.
pub struct KeyResolver {
    pub keybindings: Arc<KeybindingsConfig>,
}

impl KeyResolver {
    #[must_use]
    pub const fn new(keybindings: Arc<KeybindingsConfig>) -> Self {
        Self { keybindings }
    }

    #[must_use]
    pub fn matches_global(&self, event: &KeyEvent, action: GlobalAction) -> bool {
        let kb = &self.keybindings.global;
        match action {
            GlobalAction::Quit => kb.quit.matches(event),
            GlobalAction::Suspend => kb.suspend.matches(event),
            GlobalAction::TitleScreen => kb.title_screen.matches(event),
        }
    }

    #[must_use]
    pub fn matches_overlay(&self, event: &KeyEvent, action: OverlayAction) -> bool {
        let kb = &self.keybindings.overlay;
        match action {
            OverlayAction::Talk => kb.talk.matches(event),
            OverlayAction::Inventory => kb.inventory.matches(event),
            OverlayAction::WorldMap => kb.world_map.matches(event),
            OverlayAction::QuestLog => kb.quest_log.matches(event),
            OverlayAction::Settings => kb.settings.matches(event),
            OverlayAction::Battle => kb.battle.matches(event),
        }
    }

    #[must_use]
    pub fn matches_nav(&self, event: &KeyEvent, action: NavAction) -> bool {
        let kb = &self.keybindings.navigation;
        match action {
            NavAction::Up => kb.up.matches(event),
            NavAction::Down => kb.down.matches(event),
            NavAction::Left => kb.left.matches(event),
            NavAction::Right => kb.right.matches(event),
            NavAction::Select => kb.select.matches(event),
        }
    }

    #[must_use]
    pub fn display_overlay(&self, action: OverlayAction) -> String {
        let kb = &self.keybindings.overlay;
        match action {
            OverlayAction::Talk => kb.talk.display(),
            OverlayAction::Inventory => kb.inventory.display(),
            OverlayAction::WorldMap => kb.world_map.display(),
            OverlayAction::QuestLog => kb.quest_log.display(),
            OverlayAction::Settings => kb.settings.display(),
            OverlayAction::Battle => kb.battle.display(),
        }
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyCode, KeyModifiers};

    use super::*;

    fn resolver() -> KeyResolver {
        KeyResolver::new(Arc::new(KeybindingsConfig::default()))
    }

    #[test]
    fn test_default_global_bindings() {
        let resolver = resolver();
        let ctrl_q = KeyEvent::new(KeyCode::Char('q'), KeyModifiers::CONTROL);
        assert!(resolver.matches_global(&ctrl_q, GlobalAction::Quit));
        assert!(!resolver.matches_global(&ctrl_q, GlobalAction::Suspend));
    }

    #[test]
    fn test_default_nav_bindings_accept_vim_and_arrows() {
        let resolver = resolver();
        let up = KeyEvent::new(KeyCode::Up, KeyModifiers::NONE);
        let k = KeyEvent::new(KeyCode::Char('k'), KeyModifiers::NONE);
        assert!(resolver.matches_nav(&up, NavAction::Up));
        assert!(resolver.matches_nav(&k, NavAction::Up));
    }
}
