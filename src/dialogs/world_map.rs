//! World map overlay.

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
use crate::session::{LocationId, SessionView};
use crate::ui::EventResult;

pub const NAME: &str = "world-map";

/// Legacy map renderer: the oldest of the dialog functions, it only ever
/// needed top-level state. Call sites still open the map by name alone, so
/// the adapter leans on the per-frame fallback context.
pub fn draw_world_map(
    frame: &mut Frame,
    area: Rect,
    theme: &Theme,
    session: &SessionView,
    selected: usize,
) {
    let height = session.locations.len() as u16 + 5;
    let popup_area = area.centered(Constraint::Percentage(50), Constraint::Length(height));
    frame.render_widget(Clear, popup_area);

    let mut lines = Vec::new();
    for (index, location) in session.locations.iter().enumerate() {
        let here = location.id == session.location;
        let marker = if index == selected { "> " } else { "  " };
        let suffix = if here { "  (you are here)" } else { "" };
        let style = if index == selected {
            Style::default().fg(theme.green()).add_modifier(Modifier::BOLD)
        } else if here {
            Style::default().fg(theme.blue())
        } else {
            Style::default().fg(theme.text())
        };
        lines.push(Line::from(Span::styled(
            format!("{marker}{}{suffix}", location.name),
            style,
        )));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "[Enter] travel    [Esc] close",
        Style::default().fg(theme.subtext0()),
    )));

    let block = Block::default()
        .title(" World Map ")
        .title_style(Style::default().fg(theme.blue()).add_modifier(Modifier::BOLD))
        .borders(Borders::ALL)
        .border_type(theme.border_type())
        .border_style(Style::default().fg(theme.blue()))
        .style(Style::default().bg(theme.base()));

    frame.render_widget(Paragraph::new(lines).block(block), popup_area);
}

/// Bridges [`draw_world_map`] onto the handler contract.
pub struct WorldMapAdapter {
    command_tx: UnboundedSender<GameCommand>,
    resolver: Arc<KeyResolver>,
    selected: usize,
    // Refreshed every render; the map is usually opened by name only, so
    // the location list is not known at on_opening time.
    destinations: Vec<LocationId>,
}

impl WorldMapAdapter {
    #[must_use]
    pub const fn new(command_tx: UnboundedSender<GameCommand>, resolver: Arc<KeyResolver>) -> Self {
        Self {
            command_tx,
            resolver,
            selected: 0,
            destinations: Vec::new(),
        }
    }
}

impl ModalHandler for WorldMapAdapter {
    fn name(&self) -> &'static str {
        NAME
    }

    fn can_open(&self, ctx: &ModalContext) -> bool {
        matches!(ctx, ModalContext::None | ModalContext::Session(_))
    }

    fn on_opening(&mut self, _ctx: &ModalContext) {
        self.selected = 0;
        self.destinations.clear();
    }

    fn on_closed(&mut self) {
        self.selected = 0;
        self.destinations.clear();
    }

    fn handle_key(&mut self, key: KeyEvent) -> EventResult<()> {
        if self.resolver.matches_nav(&key, NavAction::Up) {
            self.selected = self.selected.saturating_sub(1);
            return EventResult::Consumed;
        }
        if self.resolver.matches_nav(&key, NavAction::Down) {
            if self.selected + 1 < self.destinations.len() {
                self.selected += 1;
            }
            return EventResult::Consumed;
        }
        if self.resolver.matches_nav(&key, NavAction::Select)
            && let Some(destination) = self.destinations.get(self.selected).copied()
        {
            let _ = self.command_tx.send(GameCommand::TravelTo(destination));
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
        self.destinations = session.locations.iter().map(|l| l.id).collect();
        if self.selected >= self.destinations.len() {
            self.selected = self.destinations.len().saturating_sub(1);
        }
        draw_world_map(frame, area, theme, session, self.selected);
        RenderAction::Keep
    }
}
