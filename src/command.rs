//! Commands dialogs issue to the surrounding application.
//!
//! Dialogs never mutate the session themselves; they send a [`GameCommand`]
//! over the app's unbounded channel and the app applies it between frames.
//! This keeps the overlay core free of game logic and lets one dialog open
//! another without holding a reference to the overlay manager.

use crate::session::{ArcId, ItemId, LocationId, NpcId, QuestId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameCommand {
    Quit,
    /// Open the dialogue overlay targeting an NPC.
    TalkTo(NpcId),
    /// Open the trade overlay targeting an NPC (cross-dialog transition).
    TradeWith(NpcId),
    /// Open the quest log focused on one quest.
    ShowQuest { quest: QuestId, arc: ArcId },
    TravelTo(LocationId),
    BuyItem { npc: NpcId, item: ItemId },
    UseItem(ItemId),
    /// The battle turn timer expired and the foe landed a free strike.
    EnemyStrike { damage: u32 },
    BattleEnded { victory: bool },
    SetTheme(String),
}
