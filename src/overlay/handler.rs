//! The behavior contract every dialog kind implements.

use std::time::Duration;

use crossterm::event::KeyEvent;
use ratatui::Frame;
use ratatui::layout::Rect;

use crate::Theme;
use crate::overlay::ModalContext;
use crate::ui::EventResult;

/// What a handler wants done with its modal after a render call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderAction {
    /// Stay open.
    Keep,
    /// Request closure; the registry routes this back through `close` by the
    /// end of the same render pass.
    Close,
}

/// One dialog kind's capability set.
///
/// Handlers are stateful: they own whatever internal UI state they need
/// (selected row, cached fetch results) and must release it in `on_closed`.
/// The registry calls methods in this order for one open/close cycle:
///
/// 1. `can_open`: pure validation, run before the push is honored
/// 2. `on_opening`: one-time init, before the first render; copy whatever
///    is needed from the context, its lifetime is not guaranteed across
///    frames
/// 3. per frame: `handle_key` (top modal only), `update`, then `render`
/// 4. `on_closed`: release references, cancel in-flight background work
///
/// `on_obscured`/`on_revealed` fire when another modal opens above or closes
/// from above this one; use them to pause and resume per-frame work.
pub trait ModalHandler {
    /// Stable identity, unique per registered handler.
    fn name(&self) -> &'static str;

    /// Whether the supplied context has the shape this handler expects.
    fn can_open(&self, ctx: &ModalContext) -> bool;

    fn on_opening(&mut self, ctx: &ModalContext);

    fn on_closed(&mut self);

    fn on_obscured(&mut self) {}

    fn on_revealed(&mut self) {}

    /// Key input while this modal is top. Return `Ignored` to let the host
    /// process the key instead.
    fn handle_key(&mut self, key: KeyEvent) -> EventResult<()> {
        _ = key;
        EventResult::Ignored
    }

    /// Frame-time delta for timed behavior such as countdowns.
    fn update(&mut self, dt: Duration) {
        _ = dt;
    }

    /// Per-frame draw. `ctx` is the stored open context, or the host's
    /// fallback when the modal was opened by name only. A handler that
    /// cannot work with `ctx` renders nothing and returns
    /// [`RenderAction::Close`].
    fn render(
        &mut self,
        frame: &mut Frame,
        area: Rect,
        theme: &Theme,
        ctx: &ModalContext,
    ) -> RenderAction;
}
