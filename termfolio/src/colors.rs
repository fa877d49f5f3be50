//! Colour constants shared by the theme palettes.
//!
//! RGB values are chosen to look right on both dark and light terminal
//! backgrounds; `Color::DEFAULT` defers to the terminal's own colours.

use termfolio_core::Color;

// -- neutrals --

pub const WHITE: Color = Color::from_rgb(248, 248, 242);
pub const NEAR_BLACK: Color = Color::from_rgb(24, 24, 28);
pub const PAPER: Color = Color::from_rgb(238, 236, 228);
pub const INK: Color = Color::from_rgb(40, 40, 46);
pub const GREY: Color = Color::from_rgb(110, 115, 125);

// -- accents --

pub const RED: Color = Color::from_rgb(255, 85, 85);
pub const GREEN: Color = Color::from_rgb(80, 200, 80);
pub const BRIGHT_GREEN: Color = Color::from_rgb(60, 255, 110);
pub const DARK_GREEN: Color = Color::from_rgb(30, 110, 45);
pub const AMBER: Color = Color::from_rgb(255, 176, 0);
pub const DIM_AMBER: Color = Color::from_rgb(150, 105, 20);
pub const CRIMSON: Color = Color::from_rgb(200, 40, 60);
