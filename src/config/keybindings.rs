use serde::{Deserialize, Serialize};

use crate::config::key::KeyBinding;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GlobalKeybindings {
    pub quit: KeyBinding,
    pub suspend: KeyBinding,
    pub title_screen: KeyBinding,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OverlayKeybindings {
    pub talk: KeyBinding,
    pub inventory: KeyBinding,
    pub world_map: KeyBinding,
    pub quest_log: KeyBinding,
    pub settings: KeyBinding,
    pub battle: KeyBinding,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NavigationKeybindings {
    pub up: KeyBinding,
    pub down: KeyBinding,
    pub left: KeyBinding,
    pub right: KeyBinding,
    pub select: KeyBinding,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct KeybindingsConfig {
    #[serde(default)]
    pub global: GlobalKeybindings,
    #[serde(default)]
    pub overlay: OverlayKeybindings,
    #[serde(default)]
    pub navigation: NavigationKeybindings,
}
