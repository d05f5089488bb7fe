use catppuccin::{FlavorColors, PALETTE};
use ratatui::style::Color;
use ratatui::widgets::BorderType;

/// Client color theme.
///
/// Borrows a Catppuccin flavor's color table and exposes the slots the
/// client actually paints with. Flavors live in the palette's static data,
/// so themes are plain copyable handles.
#[derive(Debug, Clone, Copy)]
pub struct Theme {
    colors: &'static FlavorColors,
    border_type: BorderType,
}

const fn slot(c: &catppuccin::Color) -> Color {
    Color::Rgb(c.rgb.r, c.rgb.g, c.rgb.b)
}

impl Theme {
    const fn new(colors: &'static FlavorColors) -> Self {
        Self {
            colors,
            border_type: BorderType::Rounded,
        }
    }

    /// Catppuccin Mocha (dark).
    #[must_use]
    pub fn catppuccin_mocha() -> Self {
        Self::new(&PALETTE.mocha.colors)
    }

    /// Catppuccin Latte (light).
    #[must_use]
    pub fn catppuccin_latte() -> Self {
        Self::new(&PALETTE.latte.colors)
    }

    /// Catppuccin Frappé (dark).
    #[must_use]
    pub fn catppuccin_frappe() -> Self {
        Self::new(&PALETTE.frappe.colors)
    }

    /// Catppuccin Macchiato (dark).
    #[must_use]
    pub fn catppuccin_macchiato() -> Self {
        Self::new(&PALETTE.macchiato.colors)
    }

    /// Popup and dialog fill.
    #[must_use]
    pub const fn base(&self) -> Color {
        slot(&self.colors.base)
    }

    /// Scene backdrop behind all overlays.
    #[must_use]
    pub const fn mantle(&self) -> Color {
        slot(&self.colors.mantle)
    }

    /// Status bar and gauge track fill.
    #[must_use]
    pub const fn surface0(&self) -> Color {
        slot(&self.colors.surface0)
    }

    #[must_use]
    pub const fn text(&self) -> Color {
        slot(&self.colors.text)
    }

    /// Hints and secondary copy.
    #[must_use]
    pub const fn subtext0(&self) -> Color {
        slot(&self.colors.subtext0)
    }

    #[must_use]
    pub const fn red(&self) -> Color {
        slot(&self.colors.red)
    }

    #[must_use]
    pub const fn maroon(&self) -> Color {
        slot(&self.colors.maroon)
    }

    #[must_use]
    pub const fn peach(&self) -> Color {
        slot(&self.colors.peach)
    }

    #[must_use]
    pub const fn yellow(&self) -> Color {
        slot(&self.colors.yellow)
    }

    #[must_use]
    pub const fn green(&self) -> Color {
        slot(&self.colors.green)
    }

    #[must_use]
    pub const fn teal(&self) -> Color {
        slot(&self.colors.teal)
    }

    #[must_use]
    pub const fn blue(&self) -> Color {
        slot(&self.colors.blue)
    }

    #[must_use]
    pub const fn lavender(&self) -> Color {
        slot(&self.colors.lavender)
    }

    #[must_use]
    pub const fn mauve(&self) -> Color {
        slot(&self.colors.mauve)
    }

    #[must_use]
    pub const fn border_type(&self) -> BorderType {
        self.border_type
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::catppuccin_mocha()
    }
}

/// Theme names offered in the settings dialog, in display order.
pub const THEME_NAMES: [&str; 4] = [
    "Catppuccin Mocha",
    "Catppuccin Latte",
    "Catppuccin Frappé",
    "Catppuccin Macchiato",
];

/// Resolve a theme by display name, falling back to Mocha.
#[must_use]
pub fn theme_from_name(name: &str) -> Theme {
    match name {
        "Catppuccin Latte" => Theme::catppuccin_latte(),
        "Catppuccin Frappé" => Theme::catppuccin_frappe(),
        "Catppuccin Macchiato" => Theme::catppuccin_macchiato(),
        _ => Theme::catppuccin_mocha(),
    }
}
