//! NPC dialogue overlay.

use std::sync::Arc;

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use tokio::sync::mpsc::UnboundedSender;

use crate::Theme;
use crate::command::GameCommand;
use crate::config::{KeyResolver, NavAction};
use crate::overlay::{ModalContext, ModalHandler, RenderAction};
use crate::session::{ArcId, Npc, NpcId, QuestId, SessionView};
use crate::ui::EventResult;

pub const NAME: &str = "dialogue";

/// Legacy dialogue-box renderer. Predates the handler contract and keeps its
/// original parameter shape; [`DialogueAdapter`] bridges it onto the
/// registry.
pub fn draw_dialogue_box(
    frame: &mut Frame,
    area: Rect,
    theme: &Theme,
    session: &SessionView,
    npc: &Npc,
    line: usize,
) {
    let popup_area = area.centered(Constraint::Percentage(60), Constraint::Length(8));
    frame.render_widget(Clear, popup_area);

    let spoken = npc.dialogue.get(line).map_or("...", String::as_str);
    let can_barter = !npc.wares.is_empty();
    let has_work = session.quests.iter().any(|q| !q.completed);

    let mut hint = vec![Span::styled(
        "[Enter]",
        Style::default().fg(theme.peach()).add_modifier(Modifier::BOLD),
    )];
    hint.push(Span::styled(" next", Style::default().fg(theme.subtext0())));
    if can_barter {
        hint.push(Span::styled(
            "    [b]",
            Style::default().fg(theme.peach()).add_modifier(Modifier::BOLD),
        ));
        hint.push(Span::styled(
            " barter",
            Style::default().fg(theme.subtext0()),
        ));
    }
    if has_work {
        hint.push(Span::styled(
            "    [w]",
            Style::default().fg(theme.peach()).add_modifier(Modifier::BOLD),
        ));
        hint.push(Span::styled(
            " ask about work",
            Style::default().fg(theme.subtext0()),
        ));
    }

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            format!("\"{spoken}\""),
            Style::default().fg(theme.text()),
        )),
        Line::from(""),
        Line::from(hint),
    ];

    let block = Block::default()
        .title(format!(" {} ", npc.name))
        .title_style(Style::default().fg(theme.lavender()).add_modifier(Modifier::BOLD))
        .borders(Borders::ALL)
        .border_type(theme.border_type())
        .border_style(Style::default().fg(theme.lavender()))
        .style(Style::default().bg(theme.base()));

    let paragraph = Paragraph::new(lines)
        .block(block)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });

    frame.render_widget(paragraph, popup_area);
}

/// Bridges [`draw_dialogue_box`] onto the handler contract.
pub struct DialogueAdapter {
    command_tx: UnboundedSender<GameCommand>,
    resolver: Arc<KeyResolver>,
    npc: Option<NpcId>,
    line_count: usize,
    line: usize,
    quest_hint: Option<(QuestId, ArcId)>,
    wants_close: bool,
}

impl DialogueAdapter {
    #[must_use]
    pub const fn new(command_tx: UnboundedSender<GameCommand>, resolver: Arc<KeyResolver>) -> Self {
        Self {
            command_tx,
            resolver,
            npc: None,
            line_count: 0,
            line: 0,
            quest_hint: None,
            wants_close: false,
        }
    }
}

impl ModalHandler for DialogueAdapter {
    fn name(&self) -> &'static str {
        NAME
    }

    fn can_open(&self, ctx: &ModalContext) -> bool {
        match (ctx.npc(), ctx.session()) {
            (Some(npc), Some(session)) => session.npc(npc).is_some(),
            _ => false,
        }
    }

    fn on_opening(&mut self, ctx: &ModalContext) {
        // Copy what we need; the context is not ours to keep.
        self.npc = ctx.npc();
        self.line_count = ctx
            .npc()
            .and_then(|id| ctx.session().and_then(|s| s.npc(id)))
            .map_or(0, |npc| npc.dialogue.len());
        self.quest_hint = ctx.session().and_then(|s| {
            s.quests
                .iter()
                .find(|q| !q.completed)
                .map(|q| (q.id, q.arc))
        });
        self.line = 0;
        self.wants_close = false;
    }

    fn on_closed(&mut self) {
        self.npc = None;
        self.line_count = 0;
        self.line = 0;
        self.quest_hint = None;
        self.wants_close = false;
    }

    fn handle_key(&mut self, key: KeyEvent) -> EventResult<()> {
        if self.resolver.matches_nav(&key, NavAction::Select) {
            if self.line + 1 < self.line_count {
                self.line += 1;
            } else {
                self.wants_close = true;
            }
            return EventResult::Consumed;
        }
        if key.code == KeyCode::Char('b')
            && let Some(npc) = self.npc
        {
            let _ = self.command_tx.send(GameCommand::TradeWith(npc));
            return EventResult::Consumed;
        }
        if key.code == KeyCode::Char('w')
            && let Some((quest, arc)) = self.quest_hint
        {
            let _ = self.command_tx.send(GameCommand::ShowQuest { quest, arc });
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
        if self.wants_close {
            return RenderAction::Close;
        }
        let (Some(id), Some(session)) = (ctx.npc(), ctx.session()) else {
            return RenderAction::Close;
        };
        let Some(npc) = session.npc(id) else {
            return RenderAction::Close;
        };
        draw_dialogue_box(frame, area, theme, session, npc, self.line);
        RenderAction::Keep
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::KeyModifiers;

    use super::*;
    use crate::config::keybindings::KeybindingsConfig;
    use crate::session::GameSession;
    use tokio::sync::mpsc;

    fn adapter() -> (
        DialogueAdapter,
        tokio::sync::mpsc::UnboundedReceiver<GameCommand>,
    ) {
        let (tx, rx) = mpsc::unbounded_channel();
        let resolver = Arc::new(KeyResolver::new(Arc::new(KeybindingsConfig::default())));
        (DialogueAdapter::new(tx, resolver), rx)
    }

    #[test]
    fn test_rejects_wrong_context_shape() {
        let (adapter, _rx) = adapter();
        let view = GameSession::demo().view();
        assert!(!adapter.can_open(&ModalContext::None));
        assert!(!adapter.can_open(&ModalContext::Session(view.clone())));
        assert!(adapter.can_open(&ModalContext::Npc {
            session: view,
            npc: NpcId(1),
        }));
    }

    #[test]
    fn test_rejects_unknown_npc() {
        let (adapter, _rx) = adapter();
        let view = GameSession::demo().view();
        assert!(!adapter.can_open(&ModalContext::Npc {
            session: view,
            npc: NpcId(99),
        }));
    }

    #[test]
    fn test_enter_past_last_line_requests_close() {
        let (mut adapter, _rx) = adapter();
        let view = GameSession::demo().view();
        let ctx = ModalContext::Npc {
            session: view,
            npc: NpcId(2), // Old Tobbe: two lines
        };
        adapter.on_opening(&ctx);

        let enter = KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE);
        assert!(adapter.handle_key(enter).is_consumed());
        assert!(!adapter.wants_close);
        assert!(adapter.handle_key(enter).is_consumed());
        assert!(adapter.wants_close);
    }

    #[test]
    fn test_barter_sends_trade_command() {
        let (mut adapter, mut rx) = adapter();
        let view = GameSession::demo().view();
        adapter.on_opening(&ModalContext::Npc {
            session: view,
            npc: NpcId(1),
        });

        let b = KeyEvent::new(KeyCode::Char('b'), KeyModifiers::NONE);
        adapter.handle_key(b);
        assert_eq!(rx.try_recv().unwrap(), GameCommand::TradeWith(NpcId(1)));
    }

    #[test]
    fn test_asking_about_work_opens_first_open_quest() {
        let (mut adapter, mut rx) = adapter();
        let view = GameSession::demo().view();
        let expected = view
            .quests
            .iter()
            .find(|q| !q.completed)
            .map(|q| (q.id, q.arc))
            .unwrap();
        adapter.on_opening(&ModalContext::Npc {
            session: view,
            npc: NpcId(2),
        });

        let w = KeyEvent::new(KeyCode::Char('w'), KeyModifiers::NONE);
        assert!(adapter.handle_key(w).is_consumed());
        assert_eq!(
            rx.try_recv().unwrap(),
            GameCommand::ShowQuest {
                quest: expected.0,
                arc: expected.1,
            }
        );
    }
}
