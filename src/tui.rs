//! Terminal lifecycle and input pump.
//!
//! [`Tui`] owns the ratatui terminal, toggles raw mode and the alternate
//! screen, and feeds the app a single [`Event`] stream driven by tick and
//! frame timers plus crossterm input. Key release reporting is requested so
//! the app can observe key edges (held Esc in particular).

use std::io::Stdout;
use std::ops::{Deref, DerefMut};
use std::time::Duration;

use crossterm::cursor;
use crossterm::event::{
    Event as CrosstermEvent, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers,
    KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen};
use futures::{FutureExt, StreamExt};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tokio::sync::mpsc;
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender};
use tokio::task::JoinHandle;
use tokio::time::interval;
use tokio_util::sync::CancellationToken;

// How long stop() waits before aborting the pump task, then giving up.
const ABORT_AFTER_MS: u64 = 500;
const GIVE_UP_AFTER_MS: u64 = 2000;

pub type Backend = CrosstermBackend<Stdout>;

#[derive(Clone, Debug)]
pub enum Event {
    Init,
    Quit,
    Error(String),
    Tick,
    Render,
    Key(KeyEvent),
    Resize(u16, u16),
}

/// Map a raw crossterm event onto our event type.
///
/// Key presses and releases both pass through so the app can track edges;
/// repeats are dropped. Ctrl+C becomes a hard quit regardless of bindings.
fn map_crossterm_event(event: CrosstermEvent) -> Option<Event> {
    match event {
        CrosstermEvent::Key(key) => {
            if key.kind == KeyEventKind::Repeat {
                return None;
            }
            if key.kind == KeyEventKind::Press
                && key.modifiers.contains(KeyModifiers::CONTROL)
                && key.code == KeyCode::Char('c')
            {
                Some(Event::Quit)
            } else {
                Some(Event::Key(key))
            }
        }
        CrosstermEvent::Resize(width, height) => Some(Event::Resize(width, height)),
        _ => None,
    }
}

/// Terminal wrapper with an async event pump.
pub struct Tui {
    terminal: Terminal<Backend>,
    task: JoinHandle<()>,
    cancellation_token: CancellationToken,
    event_rx: UnboundedReceiver<Event>,
    event_tx: UnboundedSender<Event>,
    frame_rate: f64,
    tick_rate: f64,
}

impl Tui {
    /// Create a terminal wrapper rendering at `frame_rate` frames per second
    /// and ticking animations at `tick_rate` per second.
    pub fn new(frame_rate: f64, tick_rate: f64) -> color_eyre::Result<Self> {
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        Ok(Self {
            terminal: Terminal::new(Backend::new(std::io::stdout()))?,
            task: tokio::spawn(async {}),
            cancellation_token: CancellationToken::new(),
            event_rx,
            event_tx,
            frame_rate,
            tick_rate,
        })
    }

    /// Take over the terminal and start the event pump.
    pub fn enter(&mut self) -> color_eyre::Result<()> {
        crossterm::terminal::enable_raw_mode()?;
        crossterm::execute!(std::io::stdout(), EnterAlternateScreen, cursor::Hide)?;
        // Terminals without the kitty protocol never report releases; the
        // Esc edge detector then stays quiet and close-on-press still works.
        let _ = crossterm::execute!(
            std::io::stdout(),
            PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
        );
        self.start();
        Ok(())
    }

    /// Stop the pump and hand the terminal back to the shell.
    pub fn exit(&mut self) -> color_eyre::Result<()> {
        self.stop()?;
        if crossterm::terminal::is_raw_mode_enabled()? {
            self.flush()?;
            let _ = crossterm::execute!(std::io::stdout(), PopKeyboardEnhancementFlags);
            crossterm::execute!(std::io::stdout(), LeaveAlternateScreen, cursor::Show)?;
            crossterm::terminal::disable_raw_mode()?;
        }
        Ok(())
    }

    /// Release the terminal and put the process to sleep (Ctrl+Z).
    pub fn suspend(&mut self) -> color_eyre::Result<()> {
        self.exit()?;
        #[cfg(not(windows))]
        signal_hook::low_level::raise(signal_hook::consts::SIGTSTP)?;
        Ok(())
    }

    /// Re-enter the terminal after a suspend.
    pub fn resume(&mut self) -> color_eyre::Result<()> {
        self.enter()?;
        Ok(())
    }

    pub async fn next_event(&mut self) -> Option<Event> {
        self.event_rx.recv().await
    }

    fn start(&mut self) {
        self.cancellation_token.cancel();
        self.cancellation_token = CancellationToken::new();
        let pump = Self::event_loop(
            self.event_tx.clone(),
            self.cancellation_token.clone(),
            self.tick_rate,
            self.frame_rate,
        );
        self.task = tokio::spawn(pump);
    }

    fn stop(&mut self) -> color_eyre::Result<()> {
        self.cancellation_token.cancel();
        let mut waited_ms = 0;
        while !self.task.is_finished() {
            std::thread::sleep(Duration::from_millis(1));
            waited_ms += 1;
            if waited_ms == ABORT_AFTER_MS {
                self.task.abort();
            }
            if waited_ms >= GIVE_UP_AFTER_MS {
                return Err(color_eyre::eyre::eyre!("event pump did not stop"));
            }
        }
        Ok(())
    }

    /// Forward SIGTERM as a quit event so `run` can restore the terminal.
    #[cfg(unix)]
    fn watch_sigterm(event_tx: UnboundedSender<Event>) {
        tokio::spawn(async move {
            let signal =
                tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate());
            match signal {
                Ok(mut sigterm) => {
                    sigterm.recv().await;
                    let _ = event_tx.send(Event::Quit);
                }
                Err(e) => {
                    let _ = event_tx.send(Event::Error(e.to_string()));
                }
            }
        });
    }

    async fn event_loop(
        event_tx: UnboundedSender<Event>,
        cancellation_token: CancellationToken,
        tick_rate: f64,
        frame_rate: f64,
    ) {
        let mut input = EventStream::new();
        let mut ticks = interval(Duration::from_secs_f64(1.0 / tick_rate));
        let mut frames = interval(Duration::from_secs_f64(1.0 / frame_rate));

        #[cfg(unix)]
        Self::watch_sigterm(event_tx.clone());

        if event_tx.send(Event::Init).is_err() {
            return;
        }

        loop {
            let event = tokio::select! {
                () = cancellation_token.cancelled() => break,
                _ = ticks.tick() => Event::Tick,
                _ = frames.tick() => Event::Render,
                raw = input.next().fuse() => {
                    match raw {
                        Some(Ok(event)) => match map_crossterm_event(event) {
                            Some(event) => event,
                            None => continue,
                        },
                        Some(Err(e)) => Event::Error(e.to_string()),
                        None => break,
                    }
                }
            };
            if event_tx.send(event).is_err() {
                break;
            }
        }
        cancellation_token.cancel();
    }
}

impl Deref for Tui {
    type Target = Terminal<Backend>;

    fn deref(&self) -> &Self::Target {
        &self.terminal
    }
}

impl DerefMut for Tui {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.terminal
    }
}

impl Drop for Tui {
    fn drop(&mut self) {
        let _ = self.exit();
    }
}
