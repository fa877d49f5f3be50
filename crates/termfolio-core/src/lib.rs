//! **termfolio-core** — cell-grid UI core for the terminal portfolio.
//!
//! Foundational types shared by the termfolio crates: geometry primitives,
//! styled cells, a shared-buffer grid with sub-grid views and frame diffing,
//! input messages, and the Elm-architecture application loop with its tick
//! scheduler.

pub mod app;
pub mod geom;
pub mod grid;
pub mod messages;
pub mod style;

pub use app::{App, AppConfig, Context, Driver, Effect, Model, TickHandle, tick_every};
pub use geom::{Point, Range};
pub use grid::{Frame, FrameCell, Grid, compute_frame};
pub use messages::{Key, ModMask, Msg};
pub use style::{AttrMask, Cell, Color, Style};
