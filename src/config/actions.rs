#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GlobalAction {
    Quit,
    Suspend,
    /// Hard reset back to the title screen, closing every overlay.
    TitleScreen,
}

/// Gameplay keys that open an overlay while none has consumed the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayAction {
    Talk,
    Inventory,
    WorldMap,
    QuestLog,
    Settings,
    Battle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavAction {
    Up,
    Down,
    Left,
    Right,
    Select,
}
