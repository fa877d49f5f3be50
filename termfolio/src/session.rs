//! The host session: an explicit screen state machine over the games menu
//! and the snake game.
//!
//! The session owns which surface is active. The menu hands control to the
//! game on selection; leaving the game always returns to the idle screen,
//! never back into the menu. Entering the game starts exactly one frame
//! clock and leaving it cancels that clock, whichever way the exit happens.

use std::time::Duration;

use termfolio_core::{
    AttrMask, Cell, Grid, Point, Range, Style,
    app::{Effect, Model, TickHandle, tick_every},
    messages::{Key, ModMask, Msg},
};
use termfolio_ui::{MenuAction, MenuItem, SelectionMenu};

use crate::settings::Settings;
use crate::snake::{BOARD_CELLS, Direction, GRID_SIZE, SnakeSimulation};
use crate::theme::{self, Theme};

pub const UI_WIDTH: i32 = 80;
pub const UI_HEIGHT: i32 = 29;

/// Interval between frame-clock ticks (~60 Hz).
const FRAME_INTERVAL: Duration = Duration::from_millis(16);
/// The simulation advances once every this many frame ticks (~10 steps/s),
/// decoupling the redraw signal from the simulation rate.
const FRAMES_PER_STEP: u64 = 6;

enum Screen {
    Idle,
    MenuActive(SelectionMenu),
    GameActive(GameView),
}

/// The running game plus its clock. Dropping the view also cancels the
/// clock, so no exit path can leak the subscription.
struct GameView {
    sim: SnakeSimulation,
    clock: TickHandle,
    frames: u64,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum ScreenKind {
    Idle,
    Menu,
    Game,
}

/// The application model.
pub struct Session {
    screen: Screen,
    theme: Theme,
    settings: Settings,
}

impl Session {
    pub fn new(settings: Settings) -> Self {
        Self {
            screen: Screen::Idle,
            theme: Theme::from_settings(&settings),
            settings,
        }
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    fn kind(&self) -> ScreenKind {
        match self.screen {
            Screen::Idle => ScreenKind::Idle,
            Screen::MenuActive(_) => ScreenKind::Menu,
            Screen::GameActive(_) => ScreenKind::Game,
        }
    }

    // -----------------------------------------------------------------
    // Transitions
    // -----------------------------------------------------------------

    fn open_menu(&mut self) {
        log::info!("opening games menu");
        self.screen = Screen::MenuActive(games_menu());
    }

    fn close_menu(&mut self) {
        self.screen = Screen::Idle;
    }

    fn start_game(&mut self) -> Effect {
        log::info!("starting snake");
        let (effect, clock) = tick_every(FRAME_INTERVAL);
        self.screen = Screen::GameActive(GameView {
            sim: SnakeSimulation::new(),
            clock,
            frames: 0,
        });
        effect
    }

    /// Leave the running game for the idle screen, cancelling the game
    /// clock. The handle's drop is only a backstop.
    fn leave_game(&mut self) {
        if let Screen::GameActive(view) = &self.screen {
            view.clock.cancel();
            log::info!("leaving snake, final score {}", view.sim.score());
        }
        self.screen = Screen::Idle;
    }

    fn cycle_theme(&mut self) {
        self.theme = theme::next(self.theme.id);
        self.settings.theme = self.theme.id.to_string();
        if let Err(e) = self.settings.save() {
            log::warn!("could not persist settings: {e}");
        }
    }

    // -----------------------------------------------------------------
    // Per-screen input
    // -----------------------------------------------------------------

    fn update_idle(&mut self, msg: Msg) -> Option<Effect> {
        let Msg::KeyDown { key, modifiers, .. } = msg else {
            return None;
        };
        if is_ctrl_c(&key, modifiers) {
            return Some(Effect::End);
        }
        match key {
            Key::Char('g') | Key::Enter => {
                self.open_menu();
                None
            }
            Key::Char('t') => {
                self.cycle_theme();
                None
            }
            Key::Char('q') | Key::Escape => Some(Effect::End),
            _ => None,
        }
    }

    fn update_menu(&mut self, msg: Msg) -> Option<Effect> {
        if let Msg::KeyDown { ref key, modifiers, .. } = msg {
            if is_ctrl_c(key, modifiers) {
                return Some(Effect::End);
            }
        }
        let action = match &mut self.screen {
            Screen::MenuActive(menu) => menu.update(msg),
            _ => return None,
        };
        match action {
            MenuAction::Select => {
                let selected = match &self.screen {
                    Screen::MenuActive(menu) => menu.selected().map(|item| item.id.clone()),
                    _ => None,
                };
                match selected.as_deref() {
                    Some("snake") => Some(self.start_game()),
                    _ => None,
                }
            }
            MenuAction::Exit => {
                self.close_menu();
                None
            }
            MenuAction::Move | MenuAction::Pass => None,
        }
    }

    fn update_game(&mut self, msg: Msg) -> Option<Effect> {
        if let Msg::KeyDown { ref key, modifiers, .. } = msg {
            if *key == Key::Char('q') || is_ctrl_c(key, modifiers) {
                self.leave_game();
                return None;
            }
        }
        let Screen::GameActive(view) = &mut self.screen else {
            return None;
        };
        match msg {
            Msg::Tick { .. } => {
                view.frames += 1;
                if view.frames % FRAMES_PER_STEP == 0 {
                    view.sim.step();
                }
            }
            Msg::KeyDown { key, .. } => match key {
                Key::ArrowUp => view.sim.set_direction(Direction::Up),
                Key::ArrowDown => view.sim.set_direction(Direction::Down),
                Key::ArrowLeft => view.sim.set_direction(Direction::Left),
                Key::ArrowRight => view.sim.set_direction(Direction::Right),
                Key::Char('r') => view.sim.reset(),
                _ => {}
            },
            _ => {}
        }
        None
    }

    // -----------------------------------------------------------------
    // Drawing
    // -----------------------------------------------------------------

    fn draw_idle(&self, grid: &Grid) {
        let base = Style::default().with_fg(self.theme.fg).with_bg(self.theme.bg);
        let dim = Style::default().with_fg(self.theme.dim).with_bg(self.theme.bg);
        let origin = Point::new(4, 2);

        put_str(grid, origin, "TERMFOLIO", base.with_attrs(AttrMask::BOLD));
        put_str(
            grid,
            origin.shift(0, 1),
            "a portfolio that lives in the terminal",
            dim,
        );
        put_str(grid, origin.shift(0, 3), "g      games", base);
        put_str(
            grid,
            origin.shift(0, 4),
            &format!("t      theme ({})", self.theme.id),
            base,
        );
        put_str(grid, origin.shift(0, 5), "q      quit", base);
    }
}

impl Model for Session {
    fn update(&mut self, msg: Msg) -> Option<Effect> {
        match msg {
            Msg::Init => {
                log::info!("session started with theme '{}'", self.theme.id);
                None
            }
            Msg::Screen { .. } => None,
            msg => match self.kind() {
                ScreenKind::Idle => self.update_idle(msg),
                ScreenKind::Menu => self.update_menu(msg),
                ScreenKind::Game => self.update_game(msg),
            },
        }
    }

    fn draw(&self, grid: &mut Grid) {
        let base = Style::default().with_fg(self.theme.fg).with_bg(self.theme.bg);
        grid.fill(Cell::default().with_style(base));
        match &self.screen {
            Screen::Idle => self.draw_idle(grid),
            Screen::MenuActive(menu) => {
                let area = grid.slice(Range::new(4, 2, UI_WIDTH - 4, UI_HEIGHT - 2));
                let active = Style::default()
                    .with_fg(self.theme.accent)
                    .with_bg(self.theme.bg)
                    .with_attrs(AttrMask::BOLD);
                menu.draw(&area, base, active);
            }
            Screen::GameActive(view) => draw_game(&view.sim, grid, &self.theme),
        }
    }
}

fn is_ctrl_c(key: &Key, modifiers: ModMask) -> bool {
    *key == Key::Char('c') && modifiers.contains(ModMask::CTRL)
}

fn games_menu() -> SelectionMenu {
    SelectionMenu::new(
        "GAMES",
        "arrows move · enter play · esc back",
        vec![MenuItem::new("snake", "Snake", "Classic Snake Game")],
    )
}

fn put_str(grid: &Grid, origin: Point, text: &str, style: Style) {
    for (i, ch) in text.chars().enumerate() {
        let p = Point::new(origin.x + i as i32, origin.y);
        if !grid.contains(p) {
            break;
        }
        grid.set(p, Cell::default().with_char(ch).with_style(style));
    }
}

/// Draw the running game. Colours come from the theme passed in, read fresh
/// on every call; nothing colour-related lives in the simulation.
fn draw_game(sim: &SnakeSimulation, grid: &Grid, theme: &Theme) {
    let base = Style::default().with_fg(theme.fg).with_bg(theme.bg);
    let dim = Style::default().with_fg(theme.dim).with_bg(theme.bg);
    let accent = Style::default().with_fg(theme.accent).with_bg(theme.bg);

    let x0 = (UI_WIDTH - (BOARD_CELLS + 2)) / 2;
    let y0 = 1;
    let x1 = x0 + BOARD_CELLS + 1;
    let y1 = y0 + BOARD_CELLS + 1;

    put_str(
        grid,
        Point::new(x0, 0),
        &format!("SNAKE  score {:>4}", sim.score()),
        base.with_attrs(AttrMask::BOLD),
    );
    put_str(grid, Point::new(x0, y1 + 1), "r restart · q quit", dim);

    // Board frame.
    grid.set(Point::new(x0, y0), Cell::default().with_char('┌').with_style(dim));
    grid.set(Point::new(x1, y0), Cell::default().with_char('┐').with_style(dim));
    grid.set(Point::new(x0, y1), Cell::default().with_char('└').with_style(dim));
    grid.set(Point::new(x1, y1), Cell::default().with_char('┘').with_style(dim));
    for x in (x0 + 1)..x1 {
        grid.set(Point::new(x, y0), Cell::default().with_char('─').with_style(dim));
        grid.set(Point::new(x, y1), Cell::default().with_char('─').with_style(dim));
    }
    for y in (y0 + 1)..y1 {
        grid.set(Point::new(x0, y), Cell::default().with_char('│').with_style(dim));
        grid.set(Point::new(x1, y), Cell::default().with_char('│').with_style(dim));
    }

    // Apple first, body on top: a fresh apple can sit under a segment.
    let origin = Point::new(x0 + 1, y0 + 1);
    let apple = sim.apple();
    grid.set(
        origin + Point::new(apple.x / GRID_SIZE, apple.y / GRID_SIZE),
        Cell::default().with_char('●').with_style(accent),
    );
    for p in sim.cells() {
        grid.set(
            origin + Point::new(p.x / GRID_SIZE, p.y / GRID_SIZE),
            Cell::default().with_char('▪').with_style(base),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn game_head(session: &Session) -> Point {
        match &session.screen {
            Screen::GameActive(view) => view.sim.head(),
            _ => panic!("expected a running game"),
        }
    }

    fn start_game(session: &mut Session) {
        session.update(Msg::key(Key::Char('g')));
        let effect = session.update(Msg::key(Key::Enter));
        assert!(matches!(effect, Some(Effect::Sub(_))));
    }

    #[test]
    fn menu_opens_and_closes() {
        let mut s = Session::new(Settings::default());
        assert_eq!(s.kind(), ScreenKind::Idle);
        s.update(Msg::key(Key::Char('g')));
        assert_eq!(s.kind(), ScreenKind::Menu);
        s.update(Msg::key(Key::Escape));
        assert_eq!(s.kind(), ScreenKind::Idle);
    }

    #[test]
    fn selecting_snake_starts_game_with_clock() {
        let mut s = Session::new(Settings::default());
        start_game(&mut s);
        assert_eq!(s.kind(), ScreenKind::Game);
    }

    #[test]
    fn quitting_game_returns_to_idle_not_menu() {
        let mut s = Session::new(Settings::default());
        start_game(&mut s);
        let effect = s.update(Msg::key(Key::Char('q')));
        assert!(effect.is_none());
        assert_eq!(s.kind(), ScreenKind::Idle);
        // A tick still in flight after teardown is ignored.
        s.update(Msg::tick());
        assert_eq!(s.kind(), ScreenKind::Idle);
    }

    #[test]
    fn ctrl_c_is_an_alias_for_quit_in_game() {
        let mut s = Session::new(Settings::default());
        start_game(&mut s);
        let effect = s.update(Msg::key_mod(Key::Char('c'), ModMask::CTRL));
        assert!(effect.is_none());
        assert_eq!(s.kind(), ScreenKind::Idle);
    }

    #[test]
    fn quit_at_idle_ends_the_app() {
        let mut s = Session::new(Settings::default());
        assert!(matches!(
            s.update(Msg::key(Key::Char('q'))),
            Some(Effect::End)
        ));
    }

    #[test]
    fn six_frames_advance_one_step() {
        let mut s = Session::new(Settings::default());
        start_game(&mut s);
        let h0 = game_head(&s);
        for _ in 0..FRAMES_PER_STEP - 1 {
            s.update(Msg::tick());
        }
        assert_eq!(game_head(&s), h0);
        s.update(Msg::tick());
        assert_eq!(game_head(&s), Point::new(h0.x + GRID_SIZE, h0.y));
    }

    #[test]
    fn arrow_keys_steer_the_snake() {
        let mut s = Session::new(Settings::default());
        start_game(&mut s);
        let h0 = game_head(&s);

        // Reversal is ignored, the snake keeps moving right.
        s.update(Msg::key(Key::ArrowLeft));
        for _ in 0..FRAMES_PER_STEP {
            s.update(Msg::tick());
        }
        assert_eq!(game_head(&s), Point::new(h0.x + GRID_SIZE, h0.y));

        // Perpendicular change applies.
        s.update(Msg::key(Key::ArrowDown));
        for _ in 0..FRAMES_PER_STEP {
            s.update(Msg::tick());
        }
        assert_eq!(game_head(&s), Point::new(h0.x + GRID_SIZE, h0.y + GRID_SIZE));
    }

    #[test]
    fn restart_key_resets_the_game() {
        let mut s = Session::new(Settings::default());
        start_game(&mut s);
        let h0 = game_head(&s);
        for _ in 0..2 * FRAMES_PER_STEP {
            s.update(Msg::tick());
        }
        assert_ne!(game_head(&s), h0);
        s.update(Msg::key(Key::Char('r')));
        assert_eq!(game_head(&s), h0);
        assert_eq!(s.kind(), ScreenKind::Game);
    }

    #[test]
    fn renderer_reads_theme_at_draw_time() {
        use rand::SeedableRng;
        use rand::rngs::SmallRng;

        let sim = SnakeSimulation::with_rng(SmallRng::seed_from_u64(1));
        let grid = Grid::new(UI_WIDTH, UI_HEIGHT);
        let origin = Point::new((UI_WIDTH - (BOARD_CELLS + 2)) / 2 + 1, 2);
        let head = sim.head();
        let head_cell = origin + Point::new(head.x / GRID_SIZE, head.y / GRID_SIZE);

        draw_game(&sim, &grid, &theme::MATRIX);
        assert_eq!(grid.at(head_cell).ch, '▪');
        assert_eq!(grid.at(head_cell).style.fg, theme::MATRIX.fg);

        draw_game(&sim, &grid, &theme::AMBER_TERM);
        assert_eq!(grid.at(head_cell).style.fg, theme::AMBER_TERM.fg);
    }

    #[test]
    fn draw_covers_idle_and_menu_screens() {
        let mut s = Session::new(Settings::default());
        let mut grid = Grid::new(UI_WIDTH, UI_HEIGHT);
        s.draw(&mut grid);
        assert_eq!(grid.at(Point::new(4, 2)).ch, 'T');

        s.update(Msg::key(Key::Char('g')));
        s.draw(&mut grid);
        assert_eq!(grid.at(Point::new(4, 2)).ch, 'G');
        // The single game item is marked.
        assert_eq!(grid.at(Point::new(4, 4)).ch, '>');
    }
}
