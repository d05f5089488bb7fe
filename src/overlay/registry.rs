//! Handler registry and lifecycle hook dispatch.

use std::collections::HashMap;
use std::time::Duration;

use color_eyre::Result;
use color_eyre::eyre::bail;
use crossterm::event::KeyEvent;
use ratatui::Frame;
use ratatui::layout::Rect;
use tracing::{debug, trace};

use crate::Theme;
use crate::overlay::ModalContext;
use crate::overlay::handler::{ModalHandler, RenderAction};
use crate::overlay::stack::{ModalStack, StackListener};
use crate::ui::EventResult;

type HandlerMap = HashMap<&'static str, Box<dyn ModalHandler>>;
type ContextMap = HashMap<&'static str, ModalContext>;

/// Owns the name-to-handler bindings and per-modal context, and turns stack
/// notifications into lifecycle hook calls.
///
/// Hooks fire only in direct response to stack notifications, so hook
/// dispatch and stack truth can never diverge: `close` is the only path
/// through which `on_closed` ultimately fires.
pub struct ModalRegistry {
    stack: ModalStack,
    handlers: HandlerMap,
    contexts: ContextMap,
}

/// Stack listener borrowing the registry's maps while the stack mutates.
/// Dispatch order per transition: obscure the old top before opening the new
/// one; close the popped handler and discard its context before revealing
/// the new top.
struct HookDispatcher<'a> {
    handlers: &'a mut HandlerMap,
    contexts: &'a mut ContextMap,
}

impl StackListener for HookDispatcher<'_> {
    fn modal_pushed(&mut self, name: &'static str, obscured: Option<&'static str>) {
        if let Some(below) = obscured
            && let Some(handler) = self.handlers.get_mut(below)
        {
            handler.on_obscured();
        }
        let ctx = self.contexts.get(name).cloned().unwrap_or_default();
        if let Some(handler) = self.handlers.get_mut(name) {
            handler.on_opening(&ctx);
        }
    }

    fn modal_popped(&mut self, name: &'static str, revealed: Option<&'static str>) {
        self.contexts.remove(name);
        if let Some(handler) = self.handlers.get_mut(name) {
            handler.on_closed();
        }
        if let Some(top) = revealed
            && let Some(handler) = self.handlers.get_mut(top)
        {
            handler.on_revealed();
        }
    }
}

impl ModalRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self {
            stack: ModalStack::new(),
            handlers: HashMap::new(),
            contexts: HashMap::new(),
        }
    }

    /// Register a handler under its declared name. Setup-time only: a
    /// duplicate name is a wiring bug and fails hard.
    ///
    /// # Errors
    /// Returns an error if a handler with the same name is already
    /// registered.
    pub fn register(&mut self, handler: Box<dyn ModalHandler>) -> Result<()> {
        let name = handler.name();
        if self.handlers.contains_key(name) {
            bail!("modal handler {name:?} registered twice");
        }
        self.handlers.insert(name, handler);
        Ok(())
    }

    /// Open a modal. Silently ignored when the name is unregistered, the
    /// modal is already open, or the handler rejects the context. The stored
    /// context of an already-open modal is never overwritten.
    pub fn open(&mut self, name: &str, ctx: ModalContext) {
        let Some(handler) = self.handlers.get(name) else {
            trace!(name, "open ignored, no handler registered");
            return;
        };
        let name = handler.name();
        if self.stack.contains(name) {
            debug!(name, "open ignored, already open");
            return;
        }
        if !handler.can_open(&ctx) {
            debug!(name, "open ignored, handler rejected context");
            return;
        }
        self.contexts.insert(name, ctx);
        self.stack.push(
            name,
            &mut HookDispatcher {
                handlers: &mut self.handlers,
                contexts: &mut self.contexts,
            },
        );
        trace!(name, depth = self.stack.len(), "modal opened");
    }

    /// Close a modal if it is open; no-op otherwise.
    pub fn close(&mut self, name: &str) {
        self.stack.pop(
            name,
            &mut HookDispatcher {
                handlers: &mut self.handlers,
                contexts: &mut self.contexts,
            },
        );
    }

    /// Unconditional hard reset: everything open receives `on_closed`, top
    /// first, without obscured/revealed churn in between.
    pub fn close_all(&mut self) {
        self.stack.clear(&mut HookDispatcher {
            handlers: &mut self.handlers,
            contexts: &mut self.contexts,
        });
    }

    #[must_use]
    pub fn is_open(&self, name: &str) -> bool {
        self.stack.contains(name)
    }

    #[must_use]
    pub fn has_any_open(&self) -> bool {
        !self.stack.is_empty()
    }

    #[must_use]
    pub fn top(&self) -> Option<&'static str> {
        self.stack.top()
    }

    /// Open modals, top to bottom.
    #[must_use]
    pub fn open_stack(&self) -> Vec<&'static str> {
        self.stack.snapshot()
    }

    /// Route a key event to the top modal's handler.
    pub fn handle_key(&mut self, key: KeyEvent) -> EventResult<()> {
        let Some(top) = self.stack.top() else {
            return EventResult::Ignored;
        };
        match self.handlers.get_mut(top) {
            Some(handler) => handler.handle_key(key),
            None => EventResult::Ignored,
        }
    }

    /// Forward the frame delta to every open handler, top to bottom.
    pub fn update(&mut self, dt: Duration) {
        for name in self.stack.snapshot() {
            if let Some(handler) = self.handlers.get_mut(name) {
                handler.update(dt);
            }
        }
    }

    /// Drive one render pass over a snapshot taken at the start: painted
    /// bottom to top so the top modal draws last. Context resolves to the
    /// stored value, or `fallback` for modals opened by name only. Close
    /// requests are routed back through [`close`](Self::close) at the end of
    /// the pass, so opens issued mid-render (via the command channel) take
    /// effect on the next pass, never within the current snapshot.
    pub fn render_registered(
        &mut self,
        frame: &mut Frame,
        area: Rect,
        theme: &Theme,
        fallback: &ModalContext,
    ) {
        let snapshot = self.stack.snapshot();
        let mut closing: Vec<&'static str> = Vec::new();
        for name in snapshot.into_iter().rev() {
            let Some(handler) = self.handlers.get_mut(name) else {
                continue;
            };
            let ctx = match self.contexts.get(name) {
                Some(stored) if !stored.is_none() => stored,
                _ => fallback,
            };
            if handler.render(frame, area, theme, ctx) == RenderAction::Close {
                closing.push(name);
            }
        }
        for name in closing {
            self.close(name);
        }
    }

    /// See [`ModalStack::was_esc_just_pressed`]; poll once per frame.
    pub fn was_esc_just_pressed(&mut self, is_down: bool) -> bool {
        self.stack.was_esc_just_pressed(is_down)
    }
}

impl Default for ModalRegistry {
    fn default() -> Self {
        Self::new()
    }
}
