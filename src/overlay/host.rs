//! Host-facing facade over one stack and one registry.

use std::time::Duration;

use color_eyre::Result;
use crossterm::event::KeyEvent;
use ratatui::Frame;
use ratatui::layout::Rect;

use crate::Theme;
use crate::overlay::registry::ModalRegistry;
use crate::overlay::{ModalContext, ModalHandler};
use crate::ui::EventResult;

/// The surface the owning application talks to.
///
/// Constructed once at startup with one handler or adapter registered per
/// dialog kind; driven per frame with [`update`](Self::update) then
/// [`render`](Self::render). The host never touches the stack directly
/// except through these entry points.
pub struct Overlays {
    registry: ModalRegistry,
}

impl Overlays {
    #[must_use]
    pub fn new() -> Self {
        Self {
            registry: ModalRegistry::new(),
        }
    }

    /// Setup-time only; duplicate names are a fatal configuration error.
    ///
    /// # Errors
    /// Returns an error if a handler with the same name is already
    /// registered.
    pub fn register(&mut self, handler: Box<dyn ModalHandler>) -> Result<()> {
        self.registry.register(handler)
    }

    /// Open by name only; the modal renders against the per-frame fallback
    /// context. Legacy call sites use this path.
    pub fn open(&mut self, name: &str) {
        self.registry.open(name, ModalContext::None);
    }

    /// Open with a semantically relevant context value.
    pub fn open_with(&mut self, name: &str, ctx: ModalContext) {
        self.registry.open(name, ctx);
    }

    pub fn close(&mut self, name: &str) {
        self.registry.close(name);
    }

    /// Close the topmost modal, if any.
    pub fn close_top(&mut self) {
        if let Some(top) = self.registry.top() {
            self.registry.close(top);
        }
    }

    /// Unconditional hard reset, used when returning to the title screen.
    pub fn close_all(&mut self) {
        self.registry.close_all();
    }

    #[must_use]
    pub fn is_open(&self, name: &str) -> bool {
        self.registry.is_open(name)
    }

    #[must_use]
    pub fn has_any_open(&self) -> bool {
        self.registry.has_any_open()
    }

    /// Open modals, top to bottom.
    #[must_use]
    pub fn open_stack(&self) -> Vec<&'static str> {
        self.registry.open_stack()
    }

    /// Offer a key event to the top modal. `Ignored` means the host should
    /// process the key itself.
    pub fn handle_key(&mut self, key: KeyEvent) -> EventResult<()> {
        self.registry.handle_key(key)
    }

    pub fn update(&mut self, dt: Duration) {
        self.registry.update(dt);
    }

    pub fn render(
        &mut self,
        frame: &mut Frame,
        area: Rect,
        theme: &Theme,
        fallback: &ModalContext,
    ) {
        self.registry.render_registered(frame, area, theme, fallback);
    }

    /// Rising-edge escape detection; poll exactly once per frame from a
    /// single call site, since each call consumes the transition.
    pub fn was_esc_just_pressed(&mut self, is_down: bool) -> bool {
        self.registry.was_esc_just_pressed(is_down)
    }
}

impl Default for Overlays {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    use super::*;
    use crate::overlay::RenderAction;
    use crate::session::{GameSession, NpcId};

    type Log = Rc<RefCell<Vec<String>>>;

    struct Dialog {
        name: &'static str,
        log: Log,
        needs_npc: bool,
        renders: Rc<RefCell<Vec<ModalContext>>>,
    }

    impl Dialog {
        fn new(name: &'static str, log: &Log) -> Self {
            Self {
                name,
                log: Rc::clone(log),
                needs_npc: false,
                renders: Rc::new(RefCell::new(Vec::new())),
            }
        }

        fn needing_npc(mut self) -> Self {
            self.needs_npc = true;
            self
        }

        fn note(&self, hook: &str) {
            self.log.borrow_mut().push(format!("{}.{hook}", self.name));
        }
    }

    impl ModalHandler for Dialog {
        fn name(&self) -> &'static str {
            self.name
        }

        fn can_open(&self, ctx: &ModalContext) -> bool {
            !self.needs_npc || ctx.npc().is_some()
        }

        fn on_opening(&mut self, _ctx: &ModalContext) {
            self.note("opening");
        }

        fn on_closed(&mut self) {
            self.note("closed");
        }

        fn on_obscured(&mut self) {
            self.note("obscured");
        }

        fn on_revealed(&mut self) {
            self.note("revealed");
        }

        fn render(
            &mut self,
            _frame: &mut Frame,
            _area: Rect,
            _theme: &Theme,
            ctx: &ModalContext,
        ) -> RenderAction {
            self.note("render");
            self.renders.borrow_mut().push(ctx.clone());
            RenderAction::Keep
        }
    }

    fn render_once(overlays: &mut Overlays, fallback: &ModalContext) {
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        terminal
            .draw(|frame| {
                overlays.render(frame, frame.area(), &Theme::default(), fallback);
            })
            .unwrap();
    }

    #[test]
    fn test_scenario_open_with_context() {
        let log = Log::default();
        let dialogue = Dialog::new("dialogue", &log);
        let renders = Rc::clone(&dialogue.renders);
        let mut overlays = Overlays::new();
        overlays.register(Box::new(dialogue)).unwrap();

        let ctx = ModalContext::Npc {
            session: GameSession::demo().view(),
            npc: NpcId(1),
        };
        overlays.open_with("dialogue", ctx.clone());

        assert!(overlays.is_open("dialogue"));
        assert!(overlays.has_any_open());
        assert_eq!(*log.borrow(), vec!["dialogue.opening"]);

        render_once(&mut overlays, &ModalContext::None);
        assert_eq!(renders.borrow().clone(), vec![ctx]);
    }

    #[test]
    fn test_scenario_nested_trade_over_dialogue() {
        let log = Log::default();
        let mut overlays = Overlays::new();
        overlays
            .register(Box::new(Dialog::new("dialogue", &log)))
            .unwrap();
        overlays
            .register(Box::new(Dialog::new("trade", &log).needing_npc()))
            .unwrap();

        let ctx = ModalContext::Npc {
            session: GameSession::demo().view(),
            npc: NpcId(1),
        };
        overlays.open_with("dialogue", ctx.clone());
        log.borrow_mut().clear();

        overlays.open_with("trade", ctx);
        assert_eq!(overlays.open_stack(), vec!["trade", "dialogue"]);
        assert_eq!(*log.borrow(), vec!["dialogue.obscured", "trade.opening"]);

        log.borrow_mut().clear();
        render_once(&mut overlays, &ModalContext::None);
        assert_eq!(*log.borrow(), vec!["dialogue.render", "trade.render"]);

        log.borrow_mut().clear();
        overlays.close("trade");
        assert_eq!(*log.borrow(), vec!["trade.closed", "dialogue.revealed"]);
        assert_eq!(overlays.open_stack(), vec!["dialogue"]);
    }

    #[test]
    fn test_scenario_close_all() {
        let log = Log::default();
        let mut overlays = Overlays::new();
        overlays
            .register(Box::new(Dialog::new("dialogue", &log)))
            .unwrap();
        overlays
            .register(Box::new(Dialog::new("trade", &log)))
            .unwrap();
        overlays.open("dialogue");
        overlays.open("trade");
        log.borrow_mut().clear();

        overlays.close_all();

        assert!(!overlays.has_any_open());
        assert!(!overlays.is_open("dialogue"));
        assert!(!overlays.is_open("trade"));
        let notes = log.borrow();
        assert!(notes.contains(&"dialogue.closed".to_string()));
        assert!(notes.contains(&"trade.closed".to_string()));
    }

    #[test]
    fn test_open_by_name_renders_with_fallback() {
        let log = Log::default();
        let map = Dialog::new("world-map", &log);
        let renders = Rc::clone(&map.renders);
        let mut overlays = Overlays::new();
        overlays.register(Box::new(map)).unwrap();

        // Legacy call site: no context supplied at open.
        overlays.open("world-map");

        let fallback = ModalContext::Session(GameSession::demo().view());
        render_once(&mut overlays, &fallback);
        assert_eq!(renders.borrow().clone(), vec![fallback]);
    }

    #[test]
    fn test_close_top_follows_stack_order() {
        let log = Log::default();
        let mut overlays = Overlays::new();
        overlays
            .register(Box::new(Dialog::new("dialogue", &log)))
            .unwrap();
        overlays
            .register(Box::new(Dialog::new("inventory", &log)))
            .unwrap();
        overlays.open("dialogue");
        overlays.open("inventory");

        overlays.close_top();
        assert_eq!(overlays.open_stack(), vec!["dialogue"]);

        overlays.close_top();
        assert!(!overlays.has_any_open());

        // Nothing left: no-op.
        overlays.close_top();
    }

    #[test]
    fn test_esc_edge_passthrough() {
        let mut overlays = Overlays::new();
        assert!(!overlays.was_esc_just_pressed(false));
        assert!(overlays.was_esc_just_pressed(true));
        assert!(!overlays.was_esc_just_pressed(true));
    }
}
