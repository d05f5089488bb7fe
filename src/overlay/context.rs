//! Context payloads attached to open modals.

use crate::session::{ArcId, NpcId, QuestId, SessionView};

/// Data bundle supplied at open time describing what a modal should show.
///
/// Each dialog kind expects one shape and rejects the others in `can_open`;
/// the registry treats every variant as opaque. The registry owns the value
/// from open until close and discards it on close.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum ModalContext {
    /// Open-by-name with nothing attached. Render resolves to the
    /// host-supplied fallback context instead.
    #[default]
    None,
    /// A bare snapshot of the game session.
    Session(SessionView),
    /// A session snapshot plus the NPC the dialog targets.
    Npc { session: SessionView, npc: NpcId },
    /// A quest within a story arc, plus the session it belongs to.
    Quest {
        quest: QuestId,
        arc: ArcId,
        session: SessionView,
    },
}

impl ModalContext {
    #[must_use]
    pub const fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }

    /// The session snapshot, whatever the shape, if one is attached.
    #[must_use]
    pub const fn session(&self) -> Option<&SessionView> {
        match self {
            Self::None => None,
            Self::Session(session)
            | Self::Npc { session, .. }
            | Self::Quest { session, .. } => Some(session),
        }
    }

    #[must_use]
    pub const fn npc(&self) -> Option<NpcId> {
        match self {
            Self::Npc { npc, .. } => Some(*npc),
            _ => None,
        }
    }

    #[must_use]
    pub const fn quest(&self) -> Option<(QuestId, ArcId)> {
        match self {
            Self::Quest { quest, arc, .. } => Some((*quest, *arc)),
            _ => None,
        }
    }
}
