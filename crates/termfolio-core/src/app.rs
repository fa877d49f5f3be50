//! The Elm-architecture application loop: [`Model`], [`Driver`], [`Effect`],
//! [`App`], and the tick scheduler.
//!
//! The model never schedules work by calling itself back: recurring clocks
//! are started by returning an [`Effect`] from `update` and are stopped
//! through the [`TickHandle`] that created them. Tearing down a view is a
//! single `cancel` call; a cancelled clock sends nothing further.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;
use std::time::Duration;

use crate::grid::{Grid, compute_frame};
use crate::messages::Msg;

// ---------------------------------------------------------------------------
// Context (cancellation token)
// ---------------------------------------------------------------------------

/// A cooperative-cancellation token backed by an [`AtomicBool`].
#[derive(Clone, Debug, Default)]
pub struct Context {
    done: Arc<AtomicBool>,
}

impl Context {
    /// Create a new, non-cancelled context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether cancellation has been requested.
    #[inline]
    pub fn is_done(&self) -> bool {
        self.done.load(Ordering::Relaxed)
    }

    /// Request cancellation.
    #[inline]
    pub fn cancel(&self) {
        self.done.store(true, Ordering::Relaxed);
    }
}

// ---------------------------------------------------------------------------
// Effect
// ---------------------------------------------------------------------------

/// A side-effect returned by [`Model::update`].
pub enum Effect {
    /// A long-running message source. The closure runs on a background
    /// thread and must return when the [`Context`] it receives is cancelled.
    Sub(Box<dyn FnOnce(Context, Sender<Msg>) + Send>),
    /// Signal the application loop to stop.
    End,
}

impl std::fmt::Debug for Effect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sub(_) => f.write_str("Effect::Sub(..)"),
            Self::End => f.write_str("Effect::End"),
        }
    }
}

// ---------------------------------------------------------------------------
// Tick scheduler
// ---------------------------------------------------------------------------

/// Cancellation handle for a clock started with [`tick_every`].
///
/// Dropping the handle cancels the clock, so a view that owns its handle
/// cannot leak the subscription however it is torn down.
#[derive(Debug)]
pub struct TickHandle {
    ctx: Context,
}

impl TickHandle {
    /// Stop the clock. Idempotent.
    pub fn cancel(&self) {
        self.ctx.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.ctx.is_done()
    }
}

impl Drop for TickHandle {
    fn drop(&mut self) {
        self.ctx.cancel();
    }
}

/// Create a clock that sends [`Msg::Tick`] every `period` until the returned
/// [`TickHandle`] or the application context is cancelled.
///
/// The effect must be returned from `update` to start the clock.
pub fn tick_every(period: Duration) -> (Effect, TickHandle) {
    let own = Context::new();
    let handle = TickHandle { ctx: own.clone() };
    let effect = Effect::Sub(Box::new(move |app: Context, tx: Sender<Msg>| {
        while !app.is_done() && !own.is_done() {
            thread::sleep(period);
            if app.is_done() || own.is_done() {
                break;
            }
            if tx.send(Msg::tick()).is_err() {
                break;
            }
        }
    }));
    (effect, handle)
}

// ---------------------------------------------------------------------------
// Model / Driver traits
// ---------------------------------------------------------------------------

/// The application model (Elm architecture).
pub trait Model {
    /// Process a message, optionally returning a side-effect.
    fn update(&mut self, msg: Msg) -> Option<Effect>;

    /// Render the current state into `grid`.
    fn draw(&self, grid: &mut Grid);
}

/// Back-end driver (e.g. a terminal).
pub trait Driver {
    /// Initialise the back-end.
    fn init(&mut self) -> Result<(), Box<dyn std::error::Error>>;

    /// Poll for input, sending any messages through `tx`. Implementations
    /// should return promptly (single poll round, not a blocking loop) and
    /// honour `ctx.is_done()`.
    fn poll_msgs(&mut self, ctx: &Context, tx: Sender<Msg>)
    -> Result<(), Box<dyn std::error::Error>>;

    /// Flush a computed diff frame to the screen.
    fn flush(&mut self, frame: crate::grid::Frame) -> Result<(), Box<dyn std::error::Error>>;

    /// Clean up / restore the terminal.
    fn close(&mut self);
}

// ---------------------------------------------------------------------------
// AppConfig / App
// ---------------------------------------------------------------------------

/// Configuration for creating an [`App`].
pub struct AppConfig<M: Model, D: Driver> {
    pub model: M,
    pub driver: D,
    pub width: i32,
    pub height: i32,
}

/// The main application runner: poll → update → draw → diff → flush.
pub struct App<M: Model, D: Driver> {
    model: M,
    driver: D,
    width: i32,
    height: i32,
}

impl<M: Model, D: Driver> App<M, D> {
    pub fn new(config: AppConfig<M, D>) -> Self {
        Self {
            model: config.model,
            driver: config.driver,
            width: config.width,
            height: config.height,
        }
    }

    /// Run the main loop until the model returns [`Effect::End`] or the
    /// driver fails.
    pub fn run(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        self.driver.init()?;

        let ctx = Context::new();
        let (tx, rx): (Sender<Msg>, Receiver<Msg>) = mpsc::channel();

        tx.send(Msg::Init).ok();

        let prev_grid = Grid::new(self.width, self.height);
        let mut curr_grid = Grid::new(self.width, self.height);

        while !ctx.is_done() {
            if let Err(e) = self.driver.poll_msgs(&ctx, tx.clone()) {
                ctx.cancel();
                self.driver.close();
                return Err(e);
            }
            if let Err(e) = self.process_pending(&rx, &ctx, &tx, &prev_grid, &mut curr_grid) {
                ctx.cancel();
                self.driver.close();
                return Err(e);
            }
        }

        self.driver.close();
        log::info!("application loop stopped");
        Ok(())
    }

    /// Drain queued messages, update the model, then draw, diff, and flush
    /// if anything changed.
    fn process_pending(
        &mut self,
        rx: &Receiver<Msg>,
        ctx: &Context,
        tx: &Sender<Msg>,
        prev_grid: &Grid,
        curr_grid: &mut Grid,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let mut needs_draw = false;

        while let Ok(msg) = rx.try_recv() {
            if let Some(effect) = self.model.update(msg) {
                self.run_effect(effect, ctx, tx);
            }
            needs_draw = true;
            if ctx.is_done() {
                return Ok(());
            }
        }

        if needs_draw {
            self.model.draw(curr_grid);
            let frame = compute_frame(prev_grid, curr_grid);
            if !frame.cells.is_empty() {
                self.driver.flush(frame)?;
            }
            prev_grid.copy_from(curr_grid);
        }

        Ok(())
    }

    fn run_effect(&self, effect: Effect, ctx: &Context, tx: &Sender<Msg>) {
        match effect {
            Effect::End => ctx.cancel(),
            Effect::Sub(f) => {
                let sub_ctx = ctx.clone();
                let sub_tx = tx.clone();
                thread::spawn(move || f(sub_ctx, sub_tx));
            }
        }
    }
}
