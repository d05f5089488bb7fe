//! Trading overlay.

use std::sync::Arc;

use crossterm::event::KeyEvent;
use ratatui::Frame;
use ratatui::layout::{Constraint, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use tokio::sync::mpsc::UnboundedSender;

use crate::Theme;
use crate::command::GameCommand;
use crate::config::{KeyResolver, NavAction};
use crate::overlay::{ModalContext, ModalHandler, RenderAction};
use crate::session::{Npc, NpcId, SessionView};
use crate::ui::EventResult;

pub const NAME: &str = "trade";

/// Legacy trade-window renderer kept in its original shape: it needs the
/// target NPC on top of the session, plus the current selection.
pub fn draw_trade_window(
    frame: &mut Frame,
    area: Rect,
    theme: &Theme,
    session: &SessionView,
    npc: &Npc,
    selected: usize,
) {
    let height = npc.wares.len() as u16 + 6;
    let popup_area = area.centered(Constraint::Percentage(50), Constraint::Length(height));
    frame.render_widget(Clear, popup_area);

    let mut lines = vec![Line::from(Span::styled(
        format!("Your gold: {}", session.gold),
        Style::default().fg(theme.yellow()),
    ))];
    lines.push(Line::from(""));

    for (index, ware) in npc.wares.iter().enumerate() {
        let Some(item) = session.item(*ware) else {
            continue;
        };
        let marker = if index == selected { "> " } else { "  " };
        let style = if index == selected {
            Style::default().fg(theme.green()).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme.text())
        };
        lines.push(Line::from(Span::styled(
            format!("{marker}{} — {}g", item.name, item.price),
            style,
        )));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "[Enter] buy    [Esc] leave",
        Style::default().fg(theme.subtext0()),
    )));

    let block = Block::default()
        .title(format!(" Trading with {} ", npc.name))
        .title_style(Style::default().fg(theme.teal()).add_modifier(Modifier::BOLD))
        .borders(Borders::ALL)
        .border_type(theme.border_type())
        .border_style(Style::default().fg(theme.teal()))
        .style(Style::default().bg(theme.base()));

    frame.render_widget(Paragraph::new(lines).block(block), popup_area);
}

/// Bridges [`draw_trade_window`] onto the handler contract.
pub struct TradeAdapter {
    command_tx: UnboundedSender<GameCommand>,
    resolver: Arc<KeyResolver>,
    npc: Option<NpcId>,
    wares: Vec<crate::session::ItemId>,
    selected: usize,
}

impl TradeAdapter {
    #[must_use]
    pub const fn new(command_tx: UnboundedSender<GameCommand>, resolver: Arc<KeyResolver>) -> Self {
        Self {
            command_tx,
            resolver,
            npc: None,
            wares: Vec::new(),
            selected: 0,
        }
    }
}

impl ModalHandler for TradeAdapter {
    fn name(&self) -> &'static str {
        NAME
    }

    fn can_open(&self, ctx: &ModalContext) -> bool {
        match (ctx.npc(), ctx.session()) {
            (Some(npc), Some(session)) => {
                session.npc(npc).is_some_and(|npc| !npc.wares.is_empty())
            }
            _ => false,
        }
    }

    fn on_opening(&mut self, ctx: &ModalContext) {
        self.npc = ctx.npc();
        self.wares = ctx
            .npc()
            .and_then(|id| ctx.session().and_then(|s| s.npc(id)))
            .map_or_else(Vec::new, |npc| npc.wares.clone());
        self.selected = 0;
    }

    fn on_closed(&mut self) {
        self.npc = None;
        self.wares.clear();
        self.selected = 0;
    }

    fn handle_key(&mut self, key: KeyEvent) -> EventResult<()> {
        if self.resolver.matches_nav(&key, NavAction::Up) {
            self.selected = self.selected.saturating_sub(1);
            return EventResult::Consumed;
        }
        if self.resolver.matches_nav(&key, NavAction::Down) {
            if self.selected + 1 < self.wares.len() {
                self.selected += 1;
            }
            return EventResult::Consumed;
        }
        if self.resolver.matches_nav(&key, NavAction::Select)
            && let (Some(npc), Some(item)) = (self.npc, self.wares.get(self.selected).copied())
        {
            let _ = self.command_tx.send(GameCommand::BuyItem { npc, item });
            return EventResult::Consumed;
        }
        EventResult::Ignored
    }

    fn render(
        &mut self,
        frame: &mut Frame,
        area: Rect,
        theme: &Theme,
        ctx: &ModalContext,
    ) -> RenderAction {
        let (Some(id), Some(session)) = (ctx.npc(), ctx.session()) else {
            return RenderAction::Close;
        };
        let Some(npc) = session.npc(id) else {
            return RenderAction::Close;
        };
        draw_trade_window(frame, area, theme, session, npc, self.selected);
        RenderAction::Keep
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyCode, KeyModifiers};
    use tokio::sync::mpsc;

    use super::*;
    use crate::config::keybindings::KeybindingsConfig;
    use crate::session::{GameSession, ItemId};

    fn adapter() -> (
        TradeAdapter,
        tokio::sync::mpsc::UnboundedReceiver<GameCommand>,
    ) {
        let (tx, rx) = mpsc::unbounded_channel();
        let resolver = Arc::new(KeyResolver::new(Arc::new(KeybindingsConfig::default())));
        (TradeAdapter::new(tx, resolver), rx)
    }

    #[test]
    fn test_rejects_npc_without_wares() {
        let (adapter, _rx) = adapter();
        let view = GameSession::demo().view();
        // Old Tobbe sells nothing.
        assert!(!adapter.can_open(&ModalContext::Npc {
            session: view.clone(),
            npc: NpcId(2),
        }));
        assert!(adapter.can_open(&ModalContext::Npc {
            session: view,
            npc: NpcId(1),
        }));
    }

    #[test]
    fn test_buy_sends_selected_ware() {
        let (mut adapter, mut rx) = adapter();
        let view = GameSession::demo().view();
        adapter.on_opening(&ModalContext::Npc {
            session: view,
            npc: NpcId(1),
        });

        let down = KeyEvent::new(KeyCode::Down, KeyModifiers::NONE);
        let enter = KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE);
        adapter.handle_key(down);
        adapter.handle_key(enter);

        assert_eq!(
            rx.try_recv().unwrap(),
            GameCommand::BuyItem {
                npc: NpcId(1),
                item: ItemId(3),
            }
        );
    }

    #[test]
    fn test_selection_stays_in_bounds() {
        let (mut adapter, _rx) = adapter();
        let view = GameSession::demo().view();
        adapter.on_opening(&ModalContext::Npc {
            session: view,
            npc: NpcId(1),
        });

        let down = KeyEvent::new(KeyCode::Down, KeyModifiers::NONE);
        for _ in 0..10 {
            adapter.handle_key(down);
        }
        assert_eq!(adapter.selected, 1);

        let up = KeyEvent::new(KeyCode::Up, KeyModifiers::NONE);
        for _ in 0..10 {
            adapter.handle_key(up);
        }
        assert_eq!(adapter.selected, 0);
    }
}
