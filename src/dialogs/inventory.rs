//! Inventory overlay.

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
use crate::session::ItemId;
use crate::ui::EventResult;

pub const NAME: &str = "inventory";

pub struct Inventory {
    command_tx: UnboundedSender<GameCommand>,
    resolver: Arc<KeyResolver>,
    selected: usize,
    // Refreshed every render so indices stay valid after the app removes a
    // consumed item.
    carried: Vec<ItemId>,
}

impl Inventory {
    #[must_use]
    pub const fn new(command_tx: UnboundedSender<GameCommand>, resolver: Arc<KeyResolver>) -> Self {
        Self {
            command_tx,
            resolver,
            selected: 0,
            carried: Vec::new(),
        }
    }
}

impl ModalHandler for Inventory {
    fn name(&self) -> &'static str {
        NAME
    }

    fn can_open(&self, ctx: &ModalContext) -> bool {
        matches!(ctx, ModalContext::None | ModalContext::Session(_))
    }

    fn on_opening(&mut self, _ctx: &ModalContext) {
        self.selected = 0;
        self.carried.clear();
    }

    fn on_closed(&mut self) {
        self.selected = 0;
        self.carried.clear();
    }

    fn handle_key(&mut self, key: KeyEvent) -> EventResult<()> {
        if self.resolver.matches_nav(&key, NavAction::Up) {
            self.selected = self.selected.saturating_sub(1);
            return EventResult::Consumed;
        }
        if self.resolver.matches_nav(&key, NavAction::Down) {
            if self.selected + 1 < self.carried.len() {
                self.selected += 1;
            }
            return EventResult::Consumed;
        }
        if self.resolver.matches_nav(&key, NavAction::Select)
            && let Some(item) = self.carried.get(self.selected).copied()
        {
            let _ = self.command_tx.send(GameCommand::UseItem(item));
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
        let Some(session) = ctx.session() else {
            return RenderAction::Close;
        };
        self.carried = session.inventory.clone();
        if self.selected >= self.carried.len() {
            self.selected = self.carried.len().saturating_sub(1);
        }

        let height = (self.carried.len() as u16).max(1) + 5;
        let popup_area = area.centered(Constraint::Percentage(45), Constraint::Length(height));
        frame.render_widget(Clear, popup_area);

        let mut lines = Vec::new();
        if self.carried.is_empty() {
            lines.push(Line::from(Span::styled(
                "Your pack is empty.",
                Style::default().fg(theme.subtext0()),
            )));
        }
        for (index, id) in self.carried.iter().enumerate() {
            let Some(item) = session.item(*id) else {
                continue;
            };
            let marker = if index == self.selected { "> " } else { "  " };
            let detail = if item.heal > 0 {
                format!("  (+{} HP)", item.heal)
            } else {
                String::new()
            };
            let style = if index == self.selected {
                Style::default().fg(theme.green()).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(theme.text())
            };
            lines.push(Line::from(Span::styled(
                format!("{marker}{}{detail}", item.name),
                style,
            )));
        }
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "[Enter] use    [Esc] close",
            Style::default().fg(theme.subtext0()),
        )));

        let block = Block::default()
            .title(" Inventory ")
            .title_style(Style::default().fg(theme.peach()).add_modifier(Modifier::BOLD))
            .borders(Borders::ALL)
            .border_type(theme.border_type())
            .border_style(Style::default().fg(theme.peach()))
            .style(Style::default().bg(theme.base()));

        frame.render_widget(Paragraph::new(lines).block(block), popup_area);
        RenderAction::Keep
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyCode, KeyModifiers};
    use tokio::sync::mpsc;

    use super::*;
    use crate::config::keybindings::KeybindingsConfig;
    use crate::session::GameSession;

    #[test]
    fn test_use_sends_selected_item() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let resolver = Arc::new(KeyResolver::new(Arc::new(KeybindingsConfig::default())));
        let mut inventory = Inventory::new(tx, resolver);

        inventory.on_opening(&ModalContext::None);
        // Simulate what a render pass caches.
        inventory.carried = GameSession::demo().view().inventory;

        let enter = KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE);
        inventory.handle_key(enter);
        assert_eq!(rx.try_recv().unwrap(), GameCommand::UseItem(ItemId(1)));
    }

    #[test]
    fn test_select_with_empty_pack_is_ignored() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let resolver = Arc::new(KeyResolver::new(Arc::new(KeybindingsConfig::default())));
        let mut inventory = Inventory::new(tx, resolver);
        inventory.on_opening(&ModalContext::None);

        let enter = KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE);
        assert_eq!(inventory.handle_key(enter), EventResult::Ignored);
        assert!(rx.try_recv().is_err());
    }
}
