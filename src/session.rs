//! In-memory game session model.
//!
//! Game logic proper lives in the surrounding application layer; the
//! presentation code only needs enough state to build overlay contexts and
//! draw the scene backdrop. Nothing here is persisted.

/// Identifies an NPC within the current session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NpcId(pub u32);

/// Identifies a quest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct QuestId(pub u32);

/// Identifies the story arc a quest belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ArcId(pub u32);

/// Identifies an item kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ItemId(pub u32);

/// Identifies a map location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LocationId(pub u32);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Npc {
    pub id: NpcId,
    pub name: String,
    /// Lines spoken in order when the player talks to this NPC.
    pub dialogue: Vec<String>,
    /// Items offered for sale, empty for NPCs that do not trade.
    pub wares: Vec<ItemId>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    pub id: ItemId,
    pub name: String,
    pub price: u32,
    /// HP restored when used, zero for non-consumables.
    pub heal: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Quest {
    pub id: QuestId,
    pub arc: ArcId,
    pub title: String,
    pub completed: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    pub id: LocationId,
    pub name: String,
}

/// The live session owned by the app. Mutated only on the UI task, in direct
/// response to [`GameCommand`](crate::command::GameCommand)s.
#[derive(Debug, Clone)]
pub struct GameSession {
    pub player_name: String,
    pub hp: u32,
    pub max_hp: u32,
    pub gold: u32,
    pub location: LocationId,
    pub locations: Vec<Location>,
    pub npcs: Vec<Npc>,
    pub items: Vec<Item>,
    pub inventory: Vec<ItemId>,
    pub quests: Vec<Quest>,
}

impl GameSession {
    pub fn npc(&self, id: NpcId) -> Option<&Npc> {
        self.npcs.iter().find(|npc| npc.id == id)
    }

    pub fn item(&self, id: ItemId) -> Option<&Item> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn location_name(&self, id: LocationId) -> Option<&str> {
        self.locations
            .iter()
            .find(|location| location.id == id)
            .map(|location| location.name.as_str())
    }

    /// Snapshot handed to overlays as context payload. Rebuilt every frame
    /// for the fallback path; handlers copy what they need in `on_opening`.
    #[must_use]
    pub fn view(&self) -> SessionView {
        SessionView {
            player_name: self.player_name.clone(),
            hp: self.hp,
            max_hp: self.max_hp,
            gold: self.gold,
            location: self.location,
            locations: self.locations.clone(),
            npcs: self.npcs.clone(),
            items: self.items.clone(),
            inventory: self.inventory.clone(),
            quests: self.quests.clone(),
        }
    }

    /// Starting session for the demo campaign.
    #[must_use]
    pub fn demo() -> Self {
        let items = vec![
            Item {
                id: ItemId(1),
                name: "Minor Healing Draught".into(),
                price: 12,
                heal: 20,
            },
            Item {
                id: ItemId(2),
                name: "Ember Charm".into(),
                price: 45,
                heal: 0,
            },
            Item {
                id: ItemId(3),
                name: "Traveler's Bread".into(),
                price: 3,
                heal: 5,
            },
        ];
        let npcs = vec![
            Npc {
                id: NpcId(1),
                name: "Maren the Chandler".into(),
                dialogue: vec![
                    "Cold night for the road, isn't it?".into(),
                    "The pass to Greyfen is still snowed in, they say.".into(),
                    "Come back if you need candles. Or gossip.".into(),
                ],
                wares: vec![ItemId(1), ItemId(3)],
            },
            Npc {
                id: NpcId(2),
                name: "Old Tobbe".into(),
                dialogue: vec![
                    "Hmph. Another sellsword.".into(),
                    "Mind the barrow mounds east of here.".into(),
                ],
                wares: vec![],
            },
        ];
        Self {
            player_name: "Ashen".into(),
            hp: 34,
            max_hp: 40,
            gold: 68,
            location: LocationId(1),
            locations: vec![
                Location {
                    id: LocationId(1),
                    name: "Emberhall Commons".into(),
                },
                Location {
                    id: LocationId(2),
                    name: "Greyfen Pass".into(),
                },
                Location {
                    id: LocationId(3),
                    name: "The Barrow Fields".into(),
                },
            ],
            npcs,
            items,
            inventory: vec![ItemId(1), ItemId(3), ItemId(3)],
            quests: vec![
                Quest {
                    id: QuestId(1),
                    arc: ArcId(1),
                    title: "Embers in the Dark".into(),
                    completed: false,
                },
                Quest {
                    id: QuestId(2),
                    arc: ArcId(1),
                    title: "The Chandler's Debt".into(),
                    completed: true,
                },
                Quest {
                    id: QuestId(3),
                    arc: ArcId(2),
                    title: "Whispers from the Barrows".into(),
                    completed: false,
                },
            ],
        }
    }
}

/// Immutable snapshot of the session used as overlay context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionView {
    pub player_name: String,
    pub hp: u32,
    pub max_hp: u32,
    pub gold: u32,
    pub location: LocationId,
    pub locations: Vec<Location>,
    pub npcs: Vec<Npc>,
    pub items: Vec<Item>,
    pub inventory: Vec<ItemId>,
    pub quests: Vec<Quest>,
}

impl SessionView {
    pub fn npc(&self, id: NpcId) -> Option<&Npc> {
        self.npcs.iter().find(|npc| npc.id == id)
    }

    pub fn item(&self, id: ItemId) -> Option<&Item> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn quest(&self, id: QuestId) -> Option<&Quest> {
        self.quests.iter().find(|quest| quest.id == id)
    }

    pub fn location_name(&self, id: LocationId) -> Option<&str> {
        self.locations
            .iter()
            .find(|location| location.id == id)
            .map(|location| location.name.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_session_lookups() {
        let session = GameSession::demo();
        assert_eq!(session.npc(NpcId(1)).unwrap().name, "Maren the Chandler");
        assert!(session.npc(NpcId(99)).is_none());
        assert_eq!(
            session.location_name(session.location),
            Some("Emberhall Commons")
        );
    }

    #[test]
    fn test_view_matches_session() {
        let session = GameSession::demo();
        let view = session.view();
        assert_eq!(view.gold, session.gold);
        assert_eq!(view.npcs.len(), session.npcs.len());
        assert!(view.quest(QuestId(2)).unwrap().completed);
    }
}
