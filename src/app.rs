use std::sync::Arc;
use std::time::Instant;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph};
use tokio::sync::mpsc;
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender};
use tracing::{debug, error, info};

use crate::Theme;
use crate::command::GameCommand;
use crate::config::{self, AppConfig, GlobalAction, KeyResolver, OverlayAction};
use crate::dialogs::{self, battle, dialogue, inventory, quest_log, settings, trade, world_map};
use crate::overlay::{ModalContext, Overlays};
use crate::session::{GameSession, ItemId, NpcId};
use crate::theme::theme_from_name;
use crate::tui::{Event, Tui};

pub struct App {
    session: GameSession,
    overlays: Overlays,
    theme: Theme,
    resolver: Arc<KeyResolver>,
    command_tx: UnboundedSender<GameCommand>,
    command_rx: UnboundedReceiver<GameCommand>,
    status: Option<String>,
    esc_down: bool,
    last_frame: Instant,
    should_quit: bool,
    should_suspend: bool,
}

impl App {
    /// Build the app from loaded configuration: theme, keybindings, and one
    /// registered handler per dialog kind.
    ///
    /// # Errors
    /// Returns an error if dialog registration fails.
    pub fn new(config: AppConfig) -> color_eyre::Result<Self> {
        let (command_tx, command_rx) = mpsc::unbounded_channel();
        let resolver = Arc::new(KeyResolver::new(Arc::new(config.keybindings)));
        let mut overlays = Overlays::new();
        dialogs::register_all(&mut overlays, &command_tx, &resolver)?;

        Ok(Self {
            session: GameSession::demo(),
            overlays,
            theme: theme_from_name(&config.theme.name),
            resolver,
            command_tx,
            command_rx,
            status: None,
            esc_down: false,
            last_frame: Instant::now(),
            should_quit: false,
            should_suspend: false,
        })
    }

    pub async fn run(&mut self) -> color_eyre::Result<()> {
        let mut tui = Tui::new(60.0, 4.0)?;
        tui.enter()?;

        loop {
            self.handle_events(&mut tui).await?;
            self.handle_commands();
            if self.should_suspend {
                self.should_suspend = false;
                tui.suspend()?;
                tui.resume()?;
                tui.clear()?;
            } else if self.should_quit {
                break;
            }
        }

        tui.exit()?;
        Ok(())
    }

    async fn handle_events(&mut self, tui: &mut Tui) -> color_eyre::Result<()> {
        let Some(event) = tui.next_event().await else {
            return Ok(());
        };

        match event {
            Event::Init | Event::Tick => {}
            Event::Quit => self.should_quit = true,
            Event::Error(message) => {
                error!("terminal event error: {message}");
                self.status = Some(message);
            }
            Event::Render => self.render_frame(tui)?,
            Event::Resize(width, height) => {
                tui.resize(Rect::new(0, 0, width, height))?;
                self.render_frame(tui)?;
            }
            Event::Key(key) => self.handle_key_event(key),
        }
        Ok(())
    }

    fn handle_key_event(&mut self, key: KeyEvent) {
        // Esc is tracked as held-key state and only acted on by the per-frame
        // edge poll in `render_frame`.
        if key.code == KeyCode::Esc {
            self.esc_down = key.kind == KeyEventKind::Press;
            return;
        }
        if key.kind != KeyEventKind::Press {
            return;
        }

        if self.overlays.handle_key(key).is_consumed() {
            return;
        }

        if self.resolver.matches_global(&key, GlobalAction::Quit) {
            self.should_quit = true;
        } else if self.resolver.matches_global(&key, GlobalAction::Suspend) {
            self.should_suspend = true;
        } else if self.resolver.matches_global(&key, GlobalAction::TitleScreen) {
            self.overlays.close_all();
            self.status = Some("Returned to the title screen.".to_string());
        } else if self.resolver.matches_overlay(&key, OverlayAction::Talk) {
            if let Some(npc) = self.session.npcs.first() {
                let id = npc.id;
                self.send(GameCommand::TalkTo(id));
            }
        } else if self.resolver.matches_overlay(&key, OverlayAction::Inventory) {
            self.overlays.open(inventory::NAME);
        } else if self.resolver.matches_overlay(&key, OverlayAction::WorldMap) {
            // Opened by name only; the render fallback supplies the session.
            self.overlays.open(world_map::NAME);
        } else if self.resolver.matches_overlay(&key, OverlayAction::QuestLog) {
            self.overlays.open(quest_log::NAME);
        } else if self.resolver.matches_overlay(&key, OverlayAction::Settings) {
            self.overlays.open(settings::NAME);
        } else if self.resolver.matches_overlay(&key, OverlayAction::Battle) {
            self.overlays.open(battle::NAME);
        }
    }

    fn send(&self, command: GameCommand) {
        if self.command_tx.send(command).is_err() {
            error!("command channel closed");
        }
    }

    fn handle_commands(&mut self) {
        while let Ok(command) = self.command_rx.try_recv() {
            debug!("handling command: {command:?}");
            match command {
                GameCommand::Quit => self.should_quit = true,
                GameCommand::TalkTo(npc) => {
                    self.overlays.open_with(
                        dialogue::NAME,
                        ModalContext::Npc {
                            session: self.session.view(),
                            npc,
                        },
                    );
                }
                GameCommand::TradeWith(npc) => {
                    self.overlays.open_with(
                        trade::NAME,
                        ModalContext::Npc {
                            session: self.session.view(),
                            npc,
                        },
                    );
                }
                GameCommand::ShowQuest { quest, arc } => {
                    self.overlays.open_with(
                        quest_log::NAME,
                        ModalContext::Quest {
                            quest,
                            arc,
                            session: self.session.view(),
                        },
                    );
                }
                GameCommand::TravelTo(location) => {
                    self.session.location = location;
                    let name = self
                        .session
                        .location_name(location)
                        .unwrap_or("parts unknown")
                        .to_string();
                    info!("traveling to {name}");
                    self.status = Some(format!("You travel to {name}."));
                    self.overlays.close(world_map::NAME);
                }
                GameCommand::BuyItem { npc, item } => self.buy_item(npc, item),
                GameCommand::UseItem(item) => self.use_item(item),
                GameCommand::EnemyStrike { damage } => {
                    self.session.hp = self.session.hp.saturating_sub(damage);
                    if self.session.hp == 0 {
                        self.overlays.close(battle::NAME);
                        self.status = Some("You fall. The tale ends here.".to_string());
                    } else {
                        self.status = Some(format!("The foe strikes for {damage}!"));
                    }
                }
                GameCommand::BattleEnded { victory } => {
                    self.status = Some(if victory {
                        "Victory! The foe is vanquished.".to_string()
                    } else {
                        "You flee the battle.".to_string()
                    });
                }
                GameCommand::SetTheme(name) => {
                    self.theme = theme_from_name(&name);
                    if let Err(error) = config::save_theme(&name) {
                        error!("failed to persist theme: {error}");
                    }
                    self.status = Some(format!("Theme set to {name}."));
                }
            }
        }
    }

    fn buy_item(&mut self, npc: NpcId, item: ItemId) {
        let Some(price) = self
            .session
            .npc(npc)
            .filter(|n| n.wares.contains(&item))
            .and_then(|_| self.session.item(item))
            .map(|i| i.price)
        else {
            debug!("buy rejected, npc {npc:?} does not sell {item:?}");
            return;
        };
        if self.session.gold < price {
            self.status = Some("Not enough gold.".to_string());
            return;
        }
        self.session.gold -= price;
        self.session.inventory.push(item);
        let name = self
            .session
            .item(item)
            .map_or("something", |i| i.name.as_str())
            .to_string();
        self.status = Some(format!("Bought {name} for {price} gold."));
    }

    fn use_item(&mut self, item: ItemId) {
        let Some(position) = self.session.inventory.iter().position(|&i| i == item) else {
            return;
        };
        let Some(heal) = self.session.item(item).map(|i| i.heal) else {
            return;
        };
        self.session.inventory.remove(position);
        self.session.hp = (self.session.hp + heal).min(self.session.max_hp);
        let name = self
            .session
            .item(item)
            .map_or("something", |i| i.name.as_str())
            .to_string();
        self.status = Some(format!("Used {name}."));
    }

    fn render_frame(&mut self, tui: &mut Tui) -> color_eyre::Result<()> {
        let now = Instant::now();
        let dt = now.duration_since(self.last_frame);
        self.last_frame = now;

        self.overlays.update(dt);
        if self.overlays.was_esc_just_pressed(self.esc_down) {
            self.overlays.close_top();
        }

        let fallback = ModalContext::Session(self.session.view());
        let overlay_open = self.overlays.has_any_open();
        tui.draw(|frame| {
            let area = frame.area();
            let [scene_area, status_area] =
                Layout::vertical([Constraint::Fill(1), Constraint::Length(1)]).areas(area);
            Self::draw_scene(frame, scene_area, &self.theme, &self.session, overlay_open);
            self.overlays.render(frame, scene_area, &self.theme, &fallback);
            Self::draw_status(frame, status_area, &self.theme, self.status.as_deref());
        })?;
        Ok(())
    }

    fn draw_scene(
        frame: &mut Frame,
        area: Rect,
        theme: &Theme,
        session: &GameSession,
        overlay_open: bool,
    ) {
        let location = session
            .location_name(session.location)
            .unwrap_or("parts unknown");
        let block = Block::default().style(Style::default().bg(theme.mantle()));
        frame.render_widget(block, area);

        let lines = vec![
            Line::from(Span::styled(
                location,
                Style::default()
                    .fg(theme.lavender())
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(Span::styled(
                format!(
                    "{}  HP {}/{}  Gold {}",
                    session.player_name, session.hp, session.max_hp, session.gold
                ),
                Style::default().fg(theme.text()),
            )),
            Line::from(""),
            Line::from(Span::styled(
                if overlay_open {
                    "[Esc] close"
                } else {
                    "[t] talk  [i] inventory  [m] map  [q] quests  [b] battle  [o] settings"
                },
                Style::default().fg(theme.subtext0()),
            )),
        ];
        frame.render_widget(Paragraph::new(lines), area);
    }

    fn draw_status(frame: &mut Frame, area: Rect, theme: &Theme, status: Option<&str>) {
        let text = status.unwrap_or("");
        frame.render_widget(
            Paragraph::new(Span::styled(
                text,
                Style::default().fg(theme.peach()).bg(theme.surface0()),
            )),
            area,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app() -> App {
        App::new(AppConfig::default()).unwrap()
    }

    #[test]
    fn test_buy_item_deducts_gold_and_adds_to_pack() {
        let mut app = app();
        let before_gold = app.session.gold;
        let before_count = app.session.inventory.len();

        app.send(GameCommand::BuyItem {
            npc: NpcId(1),
            item: ItemId(1),
        });
        app.handle_commands();

        let price = app.session.item(ItemId(1)).unwrap().price;
        assert_eq!(app.session.gold, before_gold - price);
        assert_eq!(app.session.inventory.len(), before_count + 1);
    }

    #[test]
    fn test_buy_rejected_when_npc_does_not_sell_item() {
        let mut app = app();
        let before_gold = app.session.gold;

        // Old Tobbe carries no wares.
        app.send(GameCommand::BuyItem {
            npc: NpcId(2),
            item: ItemId(1),
        });
        app.handle_commands();

        assert_eq!(app.session.gold, before_gold);
    }

    #[test]
    fn test_use_item_heals_and_consumes() {
        let mut app = app();
        app.session.hp = 1;
        let before_count = app.session.inventory.len();

        app.send(GameCommand::UseItem(ItemId(1)));
        app.handle_commands();

        let heal = app.session.item(ItemId(1)).unwrap().heal;
        assert_eq!(app.session.hp, 1 + heal);
        assert_eq!(app.session.inventory.len(), before_count - 1);
    }

    #[test]
    fn test_enemy_strike_at_zero_hp_closes_battle() {
        let mut app = app();
        app.overlays.open(battle::NAME);
        app.session.hp = 3;

        app.send(GameCommand::EnemyStrike { damage: 5 });
        app.handle_commands();

        assert_eq!(app.session.hp, 0);
        assert!(!app.overlays.is_open(battle::NAME));
    }

    #[test]
    fn test_talk_command_opens_dialogue_with_npc_context() {
        let mut app = app();
        app.send(GameCommand::TalkTo(NpcId(1)));
        app.handle_commands();
        assert!(app.overlays.is_open(dialogue::NAME));
    }
}
