//! UI theme definitions.

use egui::{Color32, Visuals};

use crate::storage::config;
use crate::workouts::ActivityType;

/// Active UI theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl From<config::Theme> for Theme {
    fn from(theme: config::Theme) -> Self {
        match theme {
            config::Theme::Dark => Theme::Dark,
            config::Theme::Light => Theme::Light,
        }
    }
}

impl From<Theme> for config::Theme {
    fn from(theme: Theme) -> Self {
        match theme {
            Theme::Dark => config::Theme::Dark,
            Theme::Light => config::Theme::Light,
        }
    }
}

impl Theme {
    /// The other theme.
    pub fn toggled(&self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }

    /// Card background for workout entries.
    pub fn card_bg(&self) -> Color32 {
        match self {
            Theme::Dark => DarkTheme::CARD_BG,
            Theme::Light => LightTheme::CARD_BG,
        }
    }

    /// Secondary text color.
    pub fn text_secondary(&self) -> Color32 {
        match self {
            Theme::Dark => DarkTheme::TEXT_SECONDARY,
            Theme::Light => LightTheme::TEXT_SECONDARY,
        }
    }

    /// Get the egui Visuals for this theme.
    pub fn visuals(&self) -> Visuals {
        match self {
            Theme::Dark => dark_visuals(),
            Theme::Light => light_visuals(),
        }
    }
}

/// Dark theme colors (slate sidebar).
pub struct DarkTheme;

impl DarkTheme {
    /// Map backdrop behind tiles
    pub const BACKGROUND: Color32 = Color32::from_rgb(45, 52, 57);
    /// Sidebar and window background
    pub const PANEL_BG: Color32 = Color32::from_rgb(45, 52, 57);
    /// Workout card and form background
    pub const CARD_BG: Color32 = Color32::from_rgb(66, 72, 77);
    /// Primary text
    pub const TEXT_PRIMARY: Color32 = Color32::from_rgb(236, 236, 236);
    /// Secondary text (units, hints)
    pub const TEXT_SECONDARY: Color32 = Color32::from_rgb(170, 170, 170);
    /// Hover fill
    pub const HOVER: Color32 = Color32::from_rgb(80, 87, 92);
    /// Border color
    pub const BORDER: Color32 = Color32::from_rgb(90, 96, 101);
}

/// Light theme colors.
pub struct LightTheme;

impl LightTheme {
    /// Map backdrop behind tiles
    pub const BACKGROUND: Color32 = Color32::from_rgb(214, 222, 224);
    /// Sidebar and window background
    pub const PANEL_BG: Color32 = Color32::from_rgb(246, 247, 248);
    /// Workout card and form background
    pub const CARD_BG: Color32 = Color32::from_rgb(232, 236, 238);
    /// Primary text
    pub const TEXT_PRIMARY: Color32 = Color32::from_rgb(45, 52, 57);
    /// Secondary text (units, hints)
    pub const TEXT_SECONDARY: Color32 = Color32::from_rgb(104, 110, 115);
    /// Hover fill
    pub const HOVER: Color32 = Color32::from_rgb(220, 226, 228);
    /// Border color
    pub const BORDER: Color32 = Color32::from_rgb(200, 206, 208);
}

fn apply_palette(
    mut visuals: Visuals,
    panel: Color32,
    card: Color32,
    backdrop: Color32,
    hover: Color32,
    text: Color32,
    border: Color32,
) -> Visuals {
    visuals.window_fill = panel;
    visuals.panel_fill = panel;
    visuals.faint_bg_color = card;
    visuals.extreme_bg_color = backdrop;

    visuals.widgets.noninteractive.bg_fill = card;
    visuals.widgets.inactive.bg_fill = card;
    visuals.widgets.hovered.bg_fill = hover;
    visuals.widgets.active.bg_fill = activity_colors::RUNNING;

    visuals.selection.bg_fill = activity_colors::RUNNING.linear_multiply(0.4);
    visuals.selection.stroke.color = activity_colors::RUNNING;

    visuals.widgets.noninteractive.fg_stroke.color = text;
    visuals.widgets.hovered.fg_stroke.color = text;

    visuals.widgets.noninteractive.bg_stroke.color = border;
    visuals.widgets.inactive.bg_stroke.color = border;

    visuals
}

/// Create dark theme visuals.
fn dark_visuals() -> Visuals {
    let mut visuals = apply_palette(
        Visuals::dark(),
        DarkTheme::PANEL_BG,
        DarkTheme::CARD_BG,
        DarkTheme::BACKGROUND,
        DarkTheme::HOVER,
        DarkTheme::TEXT_PRIMARY,
        DarkTheme::BORDER,
    );
    visuals.widgets.inactive.fg_stroke.color = DarkTheme::TEXT_SECONDARY;
    visuals
}

/// Create light theme visuals.
fn light_visuals() -> Visuals {
    let mut visuals = apply_palette(
        Visuals::light(),
        LightTheme::PANEL_BG,
        LightTheme::CARD_BG,
        LightTheme::BACKGROUND,
        LightTheme::HOVER,
        LightTheme::TEXT_PRIMARY,
        LightTheme::BORDER,
    );
    visuals.widgets.inactive.fg_stroke.color = LightTheme::TEXT_SECONDARY;
    visuals.widgets.active.fg_stroke.color = Color32::WHITE;
    visuals
}

/// Accent colors per activity, used for card borders, markers and popups.
pub mod activity_colors {
    use super::{ActivityType, Color32};

    /// Running accent (green)
    pub const RUNNING: Color32 = Color32::from_rgb(0, 196, 106);
    /// Cycling accent (orange)
    pub const CYCLING: Color32 = Color32::from_rgb(255, 181, 69);

    /// Accent color for an activity.
    pub fn for_activity(activity: ActivityType) -> Color32 {
        match activity {
            ActivityType::Running => RUNNING,
            ActivityType::Cycling => CYCLING,
        }
    }
}
