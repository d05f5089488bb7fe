//! Settings overlay with a display tab (theme picker) and a controls tab
//! (read-only keybinding reference).

use std::sync::Arc;

use crossterm::event::KeyEvent;
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Tabs};
use tokio::sync::mpsc::UnboundedSender;
use tracing::warn;

use crate::Theme;
use crate::command::GameCommand;
use crate::config::{KeyResolver, NavAction, OverlayAction};
use crate::overlay::{ModalContext, ModalHandler, RenderAction};
use crate::theme::THEME_NAMES;
use crate::ui::EventResult;

pub const NAME: &str = "settings";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tab {
    Display,
    Controls,
}

pub struct Settings {
    command_tx: UnboundedSender<GameCommand>,
    resolver: Arc<KeyResolver>,
    tab: Tab,
    selected_theme: usize,
}

impl Settings {
    #[must_use]
    pub fn new(command_tx: UnboundedSender<GameCommand>, resolver: Arc<KeyResolver>) -> Self {
        Self {
            command_tx,
            resolver,
            tab: Tab::Display,
            selected_theme: 0,
        }
    }

    fn send(&self, command: GameCommand) {
        if self.command_tx.send(command).is_err() {
            warn!("command channel closed, dropping settings command");
        }
    }

    fn render_display(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let mut lines = Vec::new();
        for (index, name) in THEME_NAMES.iter().enumerate() {
            let marker = if index == self.selected_theme { "> " } else { "  " };
            let style = if index == self.selected_theme {
                Style::default().fg(theme.green()).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(theme.text())
            };
            lines.push(Line::from(Span::styled(format!("{marker}{name}"), style)));
        }
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "[Enter] apply    [←/→] tab    [Esc] close",
            Style::default().fg(theme.subtext0()),
        )));
        frame.render_widget(Paragraph::new(lines), area);
    }

    fn render_controls(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let rows = [
            ("Talk", OverlayAction::Talk),
            ("Inventory", OverlayAction::Inventory),
            ("World map", OverlayAction::WorldMap),
            ("Quest log", OverlayAction::QuestLog),
            ("Settings", OverlayAction::Settings),
            ("Battle", OverlayAction::Battle),
        ];
        let mut lines = Vec::new();
        for (label, action) in rows {
            lines.push(Line::from(vec![
                Span::styled(
                    format!("{label:<12}"),
                    Style::default().fg(theme.text()),
                ),
                Span::styled(
                    self.resolver.display_overlay(action),
                    Style::default().fg(theme.lavender()),
                ),
            ]));
        }
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "[←/→] tab    [Esc] close",
            Style::default().fg(theme.subtext0()),
        )));
        frame.render_widget(Paragraph::new(lines), area);
    }
}

impl ModalHandler for Settings {
    fn name(&self) -> &'static str {
        NAME
    }

    fn can_open(&self, ctx: &ModalContext) -> bool {
        matches!(ctx, ModalContext::None | ModalContext::Session(_))
    }

    fn on_opening(&mut self, _ctx: &ModalContext) {
        self.tab = Tab::Display;
        self.selected_theme = 0;
    }

    fn on_closed(&mut self) {
        self.tab = Tab::Display;
        self.selected_theme = 0;
    }

    fn handle_key(&mut self, key: KeyEvent) -> EventResult<()> {
        if self.resolver.matches_nav(&key, NavAction::Left)
            || self.resolver.matches_nav(&key, NavAction::Right)
        {
            self.tab = match self.tab {
                Tab::Display => Tab::Controls,
                Tab::Controls => Tab::Display,
            };
            return EventResult::Consumed;
        }
        if self.tab != Tab::Display {
            return EventResult::Ignored;
        }
        if self.resolver.matches_nav(&key, NavAction::Up) {
            self.selected_theme = self.selected_theme.saturating_sub(1);
            return EventResult::Consumed;
        }
        if self.resolver.matches_nav(&key, NavAction::Down) {
            if self.selected_theme + 1 < THEME_NAMES.len() {
                self.selected_theme += 1;
            }
            return EventResult::Consumed;
        }
        if self.resolver.matches_nav(&key, NavAction::Select) {
            self.send(GameCommand::SetTheme(
                THEME_NAMES[self.selected_theme].to_string(),
            ));
            return EventResult::Consumed;
        }
        EventResult::Ignored
    }

    fn render(
        &mut self,
        frame: &mut Frame,
        area: Rect,
        theme: &Theme,
        _ctx: &ModalContext,
    ) -> RenderAction {
        let popup_area = area.centered(Constraint::Percentage(50), Constraint::Percentage(60));
        frame.render_widget(Clear, popup_area);

        let block = Block::default()
            .title(" Settings ")
            .title_style(Style::default().fg(theme.blue()).add_modifier(Modifier::BOLD))
            .borders(Borders::ALL)
            .border_type(theme.border_type())
            .border_style(Style::default().fg(theme.blue()))
            .style(Style::default().bg(theme.base()));
        let inner = block.inner(popup_area);
        frame.render_widget(block, popup_area);

        let [tabs_area, body_area] =
            Layout::vertical([Constraint::Length(2), Constraint::Fill(1)]).areas(inner);

        let selected = match self.tab {
            Tab::Display => 0,
            Tab::Controls => 1,
        };
        let tabs = Tabs::new(["Display", "Controls"])
            .select(selected)
            .style(Style::default().fg(theme.subtext0()))
            .highlight_style(Style::default().fg(theme.blue()).add_modifier(Modifier::BOLD));
        frame.render_widget(tabs, tabs_area);

        match self.tab {
            Tab::Display => self.render_display(frame, body_area, theme),
            Tab::Controls => self.render_controls(frame, body_area, theme),
        }
        RenderAction::Keep
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyCode, KeyModifiers};
    use tokio::sync::mpsc;

    use super::*;
    use crate::config::keybindings::KeybindingsConfig;

    fn settings() -> (Settings, mpsc::UnboundedReceiver<GameCommand>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let resolver = Arc::new(KeyResolver::new(Arc::new(KeybindingsConfig::default())));
        (Settings::new(tx, resolver), rx)
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_select_sends_theme_command() {
        let (mut settings, mut rx) = settings();
        assert!(settings.handle_key(key(KeyCode::Char('j'))).is_consumed());
        assert!(settings.handle_key(key(KeyCode::Enter)).is_consumed());
        assert_eq!(
            rx.try_recv().unwrap(),
            GameCommand::SetTheme(THEME_NAMES[1].to_string())
        );
    }

    #[test]
    fn test_controls_tab_ignores_theme_keys() {
        let (mut settings, mut rx) = settings();
        assert!(settings.handle_key(key(KeyCode::Right)).is_consumed());
        assert_eq!(settings.tab, Tab::Controls);
        assert!(matches!(
            settings.handle_key(key(KeyCode::Enter)),
            EventResult::Ignored
        ));
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_opening_starts_on_display_tab() {
        let (mut settings, _rx) = settings();
        settings.handle_key(key(KeyCode::Right));
        settings.selected_theme = 3;

        settings.on_opening(&ModalContext::None);
        assert_eq!(settings.tab, Tab::Display);
        assert_eq!(settings.selected_theme, 0);
    }

    #[test]
    fn test_close_resets_tab_and_selection() {
        let (mut settings, _rx) = settings();
        settings.handle_key(key(KeyCode::Right));
        settings.handle_key(key(KeyCode::Left));
        settings.selected_theme = 2;
        settings.on_closed();
        assert_eq!(settings.tab, Tab::Display);
        assert_eq!(settings.selected_theme, 0);
    }
}
