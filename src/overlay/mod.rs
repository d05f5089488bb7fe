//! Modal stack & registry.
//!
//! Every overlay dialog in the client (battle, dialogue, trade, quests,
//! inventory, world map, settings) is driven through this subsystem. The
//! [`ModalStack`] decides which overlay is active and in what nesting order,
//! the [`ModalRegistry`] owns the name-to-handler bindings and per-modal
//! context and dispatches lifecycle hooks in a guaranteed order, and
//! [`Overlays`] is the facade the app wires once at startup.
//!
//! Lifecycle for an open/close cycle, in dispatch order:
//!
//! 1. previous top's `on_obscured` (push only, if something was on top)
//! 2. `on_opening` with the stored context, before the first render
//! 3. per-frame `render` until the handler requests closure or the host
//!    closes it
//! 4. `on_closed` exactly once, then the new top's `on_revealed` if the
//!    popped entry was the top

mod context;
mod handler;
mod host;
mod registry;
mod stack;

pub use context::ModalContext;
pub use handler::{ModalHandler, RenderAction};
pub use host::Overlays;
pub use registry::ModalRegistry;
pub use stack::{ModalStack, StackListener};
