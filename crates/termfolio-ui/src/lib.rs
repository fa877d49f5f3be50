//! Widgets for termfolio.

mod menu;

pub use menu::{MenuAction, MenuItem, MenuKeys, SelectionMenu};
