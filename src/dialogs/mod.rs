//! The client's dialog kinds and their startup registration.
//!
//! `dialogue`, `trade`, and `world_map` keep their original free-function
//! renderers and are bridged onto the registry by thin adapters; the rest
//! implement [`ModalHandler`](crate::overlay::ModalHandler) directly. All of
//! them talk back to the app through the [`GameCommand`] channel.

pub mod battle;
pub mod dialogue;
pub mod inventory;
pub mod quest_log;
pub mod settings;
pub mod trade;
pub mod world_map;

use std::sync::Arc;

use color_eyre::Result;
use tokio::sync::mpsc::UnboundedSender;

use crate::command::GameCommand;
use crate::config::KeyResolver;
use crate::overlay::Overlays;

/// Register one handler or adapter per dialog kind. Called once from app
/// wiring; a duplicate name here is a fatal configuration error.
///
/// # Errors
/// Returns an error if any dialog name is registered twice.
pub fn register_all(
    overlays: &mut Overlays,
    command_tx: &UnboundedSender<GameCommand>,
    resolver: &Arc<KeyResolver>,
) -> Result<()> {
    overlays.register(Box::new(dialogue::DialogueAdapter::new(
        command_tx.clone(),
        Arc::clone(resolver),
    )))?;
    overlays.register(Box::new(trade::TradeAdapter::new(
        command_tx.clone(),
        Arc::clone(resolver),
    )))?;
    overlays.register(Box::new(world_map::WorldMapAdapter::new(
        command_tx.clone(),
        Arc::clone(resolver),
    )))?;
    overlays.register(Box::new(inventory::Inventory::new(
        command_tx.clone(),
        Arc::clone(resolver),
    )))?;
    overlays.register(Box::new(quest_log::QuestLog::new(Arc::clone(resolver))))?;
    overlays.register(Box::new(settings::Settings::new(
        command_tx.clone(),
        Arc::clone(resolver),
    )))?;
    overlays.register(Box::new(battle::Battle::new(command_tx.clone())))?;
    Ok(())
}
