//! Theme palettes.
//!
//! The renderer receives the active [`Theme`] as a parameter on every draw;
//! nothing in the simulation stores colours. Theme choice and optional
//! custom colour overrides persist through the settings store.

use termfolio_core::Color;

use crate::colors::*;
use crate::settings::Settings;

/// A named colour palette.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Theme {
    pub id: &'static str,
    pub fg: Color,
    pub bg: Color,
    pub accent: Color,
    pub dim: Color,
}

pub const DARK: Theme = Theme {
    id: "dark",
    fg: WHITE,
    bg: Color::DEFAULT,
    accent: RED,
    dim: GREY,
};

pub const LIGHT: Theme = Theme {
    id: "light",
    fg: INK,
    bg: PAPER,
    accent: CRIMSON,
    dim: GREY,
};

pub const MATRIX: Theme = Theme {
    id: "matrix",
    fg: BRIGHT_GREEN,
    bg: NEAR_BLACK,
    accent: GREEN,
    dim: DARK_GREEN,
};

pub const AMBER_TERM: Theme = Theme {
    id: "amber",
    fg: AMBER,
    bg: NEAR_BLACK,
    accent: WHITE,
    dim: DIM_AMBER,
};

/// Built-in palettes, in cycling order.
pub const BUILTIN: [Theme; 4] = [DARK, LIGHT, MATRIX, AMBER_TERM];

/// Look up a built-in palette by id.
pub fn by_id(id: &str) -> Option<Theme> {
    BUILTIN.iter().copied().find(|t| t.id == id)
}

/// The palette after `id` in cycling order. Unknown ids restart the cycle.
pub fn next(id: &str) -> Theme {
    match BUILTIN.iter().position(|t| t.id == id) {
        Some(i) => BUILTIN[(i + 1) % BUILTIN.len()],
        None => BUILTIN[0],
    }
}

/// Parse a `#RRGGBB` colour string. Anything else yields `None`.
pub fn parse_hex(s: &str) -> Option<Color> {
    let hex = s.strip_prefix('#')?;
    if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    u32::from_str_radix(hex, 16).ok().map(Color)
}

impl Theme {
    /// The persisted palette with any custom colour overrides applied.
    /// Malformed overrides are ignored.
    pub fn from_settings(settings: &Settings) -> Theme {
        let mut theme = by_id(&settings.theme).unwrap_or(DARK);
        if let Some(fg) = settings.custom_fg.as_deref().and_then(parse_hex) {
            theme.fg = fg;
        }
        if let Some(bg) = settings.custom_bg.as_deref().and_then(parse_hex) {
            theme.bg = bg;
        }
        theme
    }
}
