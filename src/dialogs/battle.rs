//! Turn-based battle overlay.
//!
//! The foe strikes on a timer driven by `update`; stacking another modal on
//! top pauses the timer through the obscure/reveal hooks, so a player reading
//! their inventory mid-fight is never hit off-screen.

use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Gauge, Paragraph};
use tokio::sync::mpsc::UnboundedSender;
use tracing::warn;

use crate::Theme;
use crate::command::GameCommand;
use crate::overlay::{ModalContext, ModalHandler, RenderAction};
use crate::ui::EventResult;

pub const NAME: &str = "battle";

const TURN_INTERVAL: Duration = Duration::from_secs(5);
const PLAYER_DAMAGE: u32 = 7;
const FOE_DAMAGE: u32 = 4;

#[derive(Debug, Clone)]
struct Foe {
    name: &'static str,
    hp: u32,
    max_hp: u32,
}

impl Foe {
    fn fresh() -> Self {
        Self {
            name: "Bog Wraith",
            hp: 20,
            max_hp: 20,
        }
    }
}

pub struct Battle {
    command_tx: UnboundedSender<GameCommand>,
    foe: Foe,
    until_strike: Duration,
    paused: bool,
    wants_close: bool,
}

impl Battle {
    #[must_use]
    pub fn new(command_tx: UnboundedSender<GameCommand>) -> Self {
        Self {
            command_tx,
            foe: Foe::fresh(),
            until_strike: TURN_INTERVAL,
            paused: false,
            wants_close: false,
        }
    }

    fn send(&self, command: GameCommand) {
        if self.command_tx.send(command).is_err() {
            warn!("command channel closed, dropping battle command");
        }
    }
}

impl ModalHandler for Battle {
    fn name(&self) -> &'static str {
        NAME
    }

    fn can_open(&self, ctx: &ModalContext) -> bool {
        matches!(ctx, ModalContext::None | ModalContext::Session(_))
    }

    fn on_opening(&mut self, _ctx: &ModalContext) {
        self.foe = Foe::fresh();
        self.until_strike = TURN_INTERVAL;
        self.paused = false;
        self.wants_close = false;
    }

    fn on_closed(&mut self) {
        self.foe = Foe::fresh();
        self.until_strike = TURN_INTERVAL;
        self.paused = false;
        self.wants_close = false;
    }

    fn on_obscured(&mut self) {
        self.paused = true;
    }

    fn on_revealed(&mut self) {
        self.paused = false;
    }

    fn handle_key(&mut self, key: KeyEvent) -> EventResult<()> {
        match key.code {
            KeyCode::Char('a') => {
                self.foe.hp = self.foe.hp.saturating_sub(PLAYER_DAMAGE);
                if self.foe.hp == 0 {
                    self.send(GameCommand::BattleEnded { victory: true });
                    self.wants_close = true;
                }
                EventResult::Consumed
            }
            KeyCode::Char('f') => {
                self.send(GameCommand::BattleEnded { victory: false });
                self.wants_close = true;
                EventResult::Consumed
            }
            _ => EventResult::Ignored,
        }
    }

    fn update(&mut self, dt: Duration) {
        if self.paused || self.wants_close {
            return;
        }
        if let Some(remaining) = self.until_strike.checked_sub(dt) {
            self.until_strike = remaining;
        } else {
            self.send(GameCommand::EnemyStrike { damage: FOE_DAMAGE });
            self.until_strike = TURN_INTERVAL;
        }
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
        let Some(session) = ctx.session() else {
            return RenderAction::Close;
        };

        let popup_area = area.centered(Constraint::Percentage(60), Constraint::Length(12));
        frame.render_widget(Clear, popup_area);

        let block = Block::default()
            .title(format!(" Battle: {} ", self.foe.name))
            .title_style(Style::default().fg(theme.red()).add_modifier(Modifier::BOLD))
            .borders(Borders::ALL)
            .border_type(theme.border_type())
            .border_style(Style::default().fg(theme.red()))
            .style(Style::default().bg(theme.base()));
        let inner = block.inner(popup_area);
        frame.render_widget(block, popup_area);

        let [foe_area, player_area, timer_area, hint_area] = Layout::vertical([
            Constraint::Length(2),
            Constraint::Length(2),
            Constraint::Length(2),
            Constraint::Fill(1),
        ])
        .areas(inner);

        let foe_ratio = f64::from(self.foe.hp) / f64::from(self.foe.max_hp);
        frame.render_widget(
            Gauge::default()
                .label(format!("{} {}/{}", self.foe.name, self.foe.hp, self.foe.max_hp))
                .ratio(foe_ratio)
                .gauge_style(Style::default().fg(theme.maroon()).bg(theme.surface0())),
            foe_area,
        );

        let player_ratio = if session.max_hp == 0 {
            0.0
        } else {
            f64::from(session.hp) / f64::from(session.max_hp)
        };
        frame.render_widget(
            Gauge::default()
                .label(format!("You {}/{}", session.hp, session.max_hp))
                .ratio(player_ratio)
                .gauge_style(Style::default().fg(theme.green()).bg(theme.surface0())),
            player_area,
        );

        let status = if self.paused {
            "Paused".to_string()
        } else {
            format!("Next strike in {}s", self.until_strike.as_secs() + 1)
        };
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(
                status,
                Style::default().fg(theme.peach()),
            ))),
            timer_area,
        );

        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(
                "[a] attack    [f] flee    [i] inventory",
                Style::default().fg(theme.subtext0()),
            ))),
            hint_area,
        );
        RenderAction::Keep
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::KeyModifiers;
    use tokio::sync::mpsc;

    use super::*;

    fn battle() -> (Battle, mpsc::UnboundedReceiver<GameCommand>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Battle::new(tx), rx)
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_countdown_fires_enemy_strike_and_resets() {
        let (mut battle, mut rx) = battle();
        battle.on_opening(&ModalContext::None);

        battle.update(TURN_INTERVAL - Duration::from_millis(1));
        assert!(rx.try_recv().is_err());

        battle.update(Duration::from_millis(2));
        assert_eq!(
            rx.try_recv().unwrap(),
            GameCommand::EnemyStrike { damage: FOE_DAMAGE }
        );
        assert_eq!(battle.until_strike, TURN_INTERVAL);
    }

    #[test]
    fn test_obscured_pauses_the_timer() {
        let (mut battle, mut rx) = battle();
        battle.on_opening(&ModalContext::None);
        battle.on_obscured();

        battle.update(TURN_INTERVAL * 3);
        assert!(rx.try_recv().is_err());
        assert_eq!(battle.until_strike, TURN_INTERVAL);

        battle.on_revealed();
        battle.update(TURN_INTERVAL + Duration::from_millis(1));
        assert!(rx.try_recv().is_ok());
    }

    #[test]
    fn test_attacking_to_zero_ends_in_victory() {
        let (mut battle, mut rx) = battle();
        battle.on_opening(&ModalContext::None);

        while battle.foe.hp > 0 {
            assert!(battle.handle_key(key(KeyCode::Char('a'))).is_consumed());
        }
        assert_eq!(
            rx.try_recv().unwrap(),
            GameCommand::BattleEnded { victory: true }
        );
        assert!(battle.wants_close);
    }

    #[test]
    fn test_close_resets_foe_and_timer() {
        let (mut battle, _rx) = battle();
        battle.on_opening(&ModalContext::None);

        battle.update(Duration::from_secs(2));
        battle.foe.hp = 5;
        battle.on_obscured();
        battle.wants_close = true;

        battle.on_closed();
        assert_eq!(battle.foe.hp, battle.foe.max_hp);
        assert_eq!(battle.until_strike, TURN_INTERVAL);
        assert!(!battle.paused);
        assert!(!battle.wants_close);
    }

    #[test]
    fn test_fleeing_ends_in_defeat() {
        let (mut battle, mut rx) = battle();
        battle.on_opening(&ModalContext::None);

        assert!(battle.handle_key(key(KeyCode::Char('f'))).is_consumed());
        assert_eq!(
            rx.try_recv().unwrap(),
            GameCommand::BattleEnded { victory: false }
        );
        assert!(battle.wants_close);
    }
}
