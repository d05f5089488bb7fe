use ratatui::Frame;
use ratatui::layout::{Constraint, Rect};
use ratatui::style::Style;
use throbber_widgets_tui::WhichUse::Spin;
use throbber_widgets_tui::{BRAILLE_SIX, Throbber, ThrobberState};

use crate::Theme;

/// Loading indicator for dialogs waiting on background work.
pub struct Spinner {
    throbber_state: ThrobberState,
    label: Option<&'static str>,
}

impl Spinner {
    #[must_use]
    pub fn new(label: Option<&'static str>) -> Self {
        Self {
            throbber_state: ThrobberState::default(),
            label,
        }
    }

    /// Advance the animation one step; call once per frame while visible.
    pub fn tick(&mut self) {
        self.throbber_state.calc_next();
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let mut throbber = Throbber::default()
            .throbber_set(BRAILLE_SIX)
            .use_type(Spin)
            .throbber_style(Style::default().fg(theme.lavender()))
            .style(Style::default().fg(theme.subtext0()));

        // The throbber glyph itself is one cell wide.
        let mut width = 1u16;

        if let Some(label) = self.label {
            throbber = throbber.label(label);
            width += label.len() as u16 + 1;
        }

        let area = area.centered(Constraint::Length(width), Constraint::Length(1));
        frame.render_stateful_widget(throbber, area, &mut self.throbber_state);
    }
}

impl Default for Spinner {
    fn default() -> Self {
        Self::new(None)
    }
}
