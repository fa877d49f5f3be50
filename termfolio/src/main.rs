//! Binary entry point.

use std::fs::File;

use log::{LevelFilter, info};
use simplelog::{Config, WriteLogger};
use termfolio_core::app::{App, AppConfig};
use termfolio_crossterm::CrosstermDriver;
use termfolio_lib::settings::Settings;
use termfolio_lib::{Session, UI_HEIGHT, UI_WIDTH};

/// The terminal owns stdout, so logs go to a file next to the binary.
const LOG_FILE: &str = "termfolio.log";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    WriteLogger::init(LevelFilter::Info, Config::default(), File::create(LOG_FILE)?)?;
    info!("termfolio starting");

    let settings = Settings::load();
    let model = Session::new(settings);
    let driver = CrosstermDriver::new();
    let mut app = App::new(AppConfig {
        model,
        driver,
        width: UI_WIDTH,
        height: UI_HEIGHT,
    });
    app.run()?;

    info!("termfolio exited cleanly");
    Ok(())
}
