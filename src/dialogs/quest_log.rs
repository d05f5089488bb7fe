//! Quest log overlay.
//!
//! The list view is drawn straight from the context; focusing a quest kicks
//! off a background fetch of its archive entry. The fetch is fire-and-forget
//! relative to the frame loop: the handler keeps a cancellation token,
//! polls the receiver on later renders, and cancels in `on_closed` so a
//! closed log's fetch can never touch discarded state.

use std::sync::Arc;
use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Constraint, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use tokio::sync::oneshot;
use tokio_util::sync::CancellationToken;

use crate::Theme;
use crate::config::{KeyResolver, NavAction};
use crate::overlay::{ModalContext, ModalHandler, RenderAction};
use crate::session::{ArcId, QuestId};
use crate::ui::{EventResult, Spinner};

pub const NAME: &str = "quest-log";

/// Simulated archive round trip; the real lookup lives with the game-logic
/// layer.
const ARCHIVE_LATENCY: Duration = Duration::from_millis(350);

#[derive(Debug, Clone)]
pub struct QuestDetails {
    pub summary: String,
    pub steps: Vec<String>,
}

async fn fetch_quest_details(quest: QuestId, arc: ArcId, title: String) -> QuestDetails {
    tokio::time::sleep(ARCHIVE_LATENCY).await;
    QuestDetails {
        summary: format!("{title} — entry {} of arc {}.", quest.0, arc.0),
        steps: vec![
            "Speak with the townsfolk of Emberhall Commons.".to_string(),
            "Follow the trail east before the snows close the pass.".to_string(),
        ],
    }
}

pub struct QuestLog {
    resolver: Arc<KeyResolver>,
    focus: Option<(QuestId, ArcId, String)>,
    details: Option<QuestDetails>,
    pending: Option<oneshot::Receiver<QuestDetails>>,
    cancel: Option<CancellationToken>,
    spinner: Spinner,
    selected: usize,
    quests: Vec<(QuestId, ArcId, String, bool)>,
}

impl QuestLog {
    #[must_use]
    pub fn new(resolver: Arc<KeyResolver>) -> Self {
        Self {
            resolver,
            focus: None,
            details: None,
            pending: None,
            cancel: None,
            spinner: Spinner::new(Some("Consulting the archive...")),
            selected: 0,
            quests: Vec::new(),
        }
    }

    fn start_fetch(&mut self, quest: QuestId, arc: ArcId, title: String) {
        self.cancel_fetch();
        self.details = None;
        self.focus = Some((quest, arc, title.clone()));

        let (tx, rx) = oneshot::channel();
        let token = CancellationToken::new();
        let child = token.clone();
        tokio::spawn(async move {
            tokio::select! {
                () = child.cancelled() => {}
                details = fetch_quest_details(quest, arc, title) => {
                    let _ = tx.send(details);
                }
            }
        });
        self.pending = Some(rx);
        self.cancel = Some(token);
    }

    fn cancel_fetch(&mut self) {
        if let Some(token) = self.cancel.take() {
            token.cancel();
        }
        self.pending = None;
    }

    fn poll_fetch(&mut self) {
        if let Some(rx) = self.pending.as_mut()
            && let Ok(details) = rx.try_recv()
        {
            self.details = Some(details);
            self.pending = None;
            self.cancel = None;
        }
    }
}

impl ModalHandler for QuestLog {
    fn name(&self) -> &'static str {
        NAME
    }

    fn can_open(&self, ctx: &ModalContext) -> bool {
        matches!(
            ctx,
            ModalContext::None | ModalContext::Session(_) | ModalContext::Quest { .. }
        )
    }

    fn on_opening(&mut self, ctx: &ModalContext) {
        self.selected = 0;
        self.quests.clear();
        self.details = None;
        self.focus = None;
        if let ModalContext::Quest { quest, arc, session } = ctx {
            let title = session
                .quest(*quest)
                .map_or_else(|| "Unknown quest".to_string(), |q| q.title.clone());
            self.start_fetch(*quest, *arc, title);
        }
    }

    fn on_closed(&mut self) {
        // Cancel in-flight archive work so it cannot outlive the modal.
        self.cancel_fetch();
        self.focus = None;
        self.details = None;
        self.selected = 0;
        self.quests.clear();
    }

    fn handle_key(&mut self, key: KeyEvent) -> EventResult<()> {
        if self.focus.is_some() {
            if key.code == KeyCode::Backspace {
                self.cancel_fetch();
                self.focus = None;
                self.details = None;
                return EventResult::Consumed;
            }
            return EventResult::Ignored;
        }
        if self.resolver.matches_nav(&key, NavAction::Up) {
            self.selected = self.selected.saturating_sub(1);
            return EventResult::Consumed;
        }
        if self.resolver.matches_nav(&key, NavAction::Down) {
            if self.selected + 1 < self.quests.len() {
                self.selected += 1;
            }
            return EventResult::Consumed;
        }
        if self.resolver.matches_nav(&key, NavAction::Select)
            && let Some((quest, arc, title, _)) = self.quests.get(self.selected).cloned()
        {
            self.start_fetch(quest, arc, title);
            return EventResult::Consumed;
        }
        EventResult::Ignored
    }

    fn update(&mut self, _dt: Duration) {
        if self.pending.is_some() {
            self.spinner.tick();
        }
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
        self.poll_fetch();

        let popup_area = area.centered(Constraint::Percentage(60), Constraint::Percentage(60));
        frame.render_widget(Clear, popup_area);

        let block = Block::default()
            .title(" Quest Log ")
            .title_style(Style::default().fg(theme.mauve()).add_modifier(Modifier::BOLD))
            .borders(Borders::ALL)
            .border_type(theme.border_type())
            .border_style(Style::default().fg(theme.mauve()))
            .style(Style::default().bg(theme.base()));
        let inner = block.inner(popup_area);
        frame.render_widget(block, popup_area);

        if let Some((_, _, title)) = &self.focus {
            let mut lines = vec![
                Line::from(Span::styled(
                    title.clone(),
                    Style::default().fg(theme.text()).add_modifier(Modifier::BOLD),
                )),
                Line::from(""),
            ];
            if let Some(details) = &self.details {
                lines.push(Line::from(Span::styled(
                    details.summary.clone(),
                    Style::default().fg(theme.text()),
                )));
                lines.push(Line::from(""));
                for step in &details.steps {
                    lines.push(Line::from(Span::styled(
                        format!("• {step}"),
                        Style::default().fg(theme.subtext0()),
                    )));
                }
                lines.push(Line::from(""));
                lines.push(Line::from(Span::styled(
                    "[Backspace] back    [Esc] close",
                    Style::default().fg(theme.subtext0()),
                )));
                frame.render_widget(
                    Paragraph::new(lines).wrap(Wrap { trim: true }),
                    inner,
                );
            } else {
                frame.render_widget(Paragraph::new(lines), inner);
                self.spinner.render(frame, inner, theme);
            }
            return RenderAction::Keep;
        }

        self.quests = session
            .quests
            .iter()
            .map(|q| (q.id, q.arc, q.title.clone(), q.completed))
            .collect();
        if self.selected >= self.quests.len() {
            self.selected = self.quests.len().saturating_sub(1);
        }

        let mut lines = Vec::new();
        for (index, (_, _, title, completed)) in self.quests.iter().enumerate() {
            let marker = if index == self.selected { "> " } else { "  " };
            let check = if *completed { "✓ " } else { "  " };
            let style = if index == self.selected {
                Style::default().fg(theme.green()).add_modifier(Modifier::BOLD)
            } else if *completed {
                Style::default().fg(theme.subtext0())
            } else {
                Style::default().fg(theme.text())
            };
            lines.push(Line::from(Span::styled(
                format!("{marker}{check}{title}"),
                style,
            )));
        }
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "[Enter] details    [Esc] close",
            Style::default().fg(theme.subtext0()),
        )));
        frame.render_widget(Paragraph::new(lines), inner);
        RenderAction::Keep
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::keybindings::KeybindingsConfig;
    use crate::session::GameSession;

    fn quest_log() -> QuestLog {
        let resolver = Arc::new(KeyResolver::new(Arc::new(KeybindingsConfig::default())));
        QuestLog::new(resolver)
    }

    #[test]
    fn test_accepts_session_and_quest_shapes() {
        let log = quest_log();
        let view = GameSession::demo().view();
        assert!(log.can_open(&ModalContext::None));
        assert!(log.can_open(&ModalContext::Session(view.clone())));
        assert!(log.can_open(&ModalContext::Quest {
            quest: QuestId(1),
            arc: ArcId(1),
            session: view,
        }));
    }

    #[tokio::test]
    async fn test_quest_context_starts_focused_fetch() {
        let mut log = quest_log();
        let view = GameSession::demo().view();
        log.on_opening(&ModalContext::Quest {
            quest: QuestId(1),
            arc: ArcId(1),
            session: view,
        });

        assert!(log.focus.is_some());
        assert!(log.pending.is_some());
        assert!(log.cancel.is_some());

        tokio::time::sleep(ARCHIVE_LATENCY + Duration::from_millis(50)).await;
        log.poll_fetch();
        assert!(log.details.is_some());
        assert!(log.pending.is_none());
    }

    #[tokio::test]
    async fn test_close_cancels_pending_fetch() {
        let mut log = quest_log();
        let view = GameSession::demo().view();
        log.on_opening(&ModalContext::Quest {
            quest: QuestId(3),
            arc: ArcId(2),
            session: view,
        });
        let token = log.cancel.clone().unwrap();

        log.on_closed();

        assert!(token.is_cancelled());
        assert!(log.pending.is_none());
        assert!(log.focus.is_none());
        assert!(log.details.is_none());
    }
}
