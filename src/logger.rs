use chrono::Local;
use fern::Dispatch;
use fern::colors::{Color, ColoredLevelConfig};
use log::LevelFilter;
use std::fs;

use crate::domain::utils::statistics::ANALYTICS_TARGET;

// Define where to store logs
const LOG_DIR: &str = "logs";
const LOG_FILE: &str = "elevator.log";

/// Initializes the global logger.
///
/// This function should be called once at the very beginning of the
/// application's `main` function.
///
/// Log level is controlled by the `RUST_LOG` environment variable
/// (`RUST_LOG=debug` shows every scheduling decision). Defaults to `info`.
///
/// Human readable messages go to stderr and to `logs/elevator.log`. The structured dispatch
/// analytics (`tracing` events with the [`ANALYTICS_TARGET`] target, forwarded through
/// `tracing`'s `log` feature) only go to the file, so the console stays readable.
pub fn init() {
    init_with_level(level_from_env());
}

pub fn init_with_level(level: LevelFilter) {
    if let Err(e) = fs::create_dir_all(LOG_DIR) {
        eprintln!("Failed to create log directory at '{}': {}", LOG_DIR, e);
    }
    let log_file_path = format!("{}/{}", LOG_DIR, LOG_FILE);

    let mut base_config = Dispatch::new()
        .level(level)
        .level_for("serde", LevelFilter::Warn)
        .level_for("uuid", LevelFilter::Warn)
        .level_for("tokio", LevelFilter::Warn)
        .chain(console_dispatch());

    match fern::log_file(&log_file_path) {
        Ok(file) => base_config = base_config.chain(file_dispatch().chain(file)),
        Err(e) => eprintln!("Failed to open log file '{}': {}", log_file_path, e),
    }

    if let Err(e) = base_config.apply() {
        eprintln!("Failed to apply logger configuration: {}", e);
        return;
    }

    log::info!("Logger initialized at level {}. Logging to console and '{}'.", level, log_file_path);
}

fn level_from_env() -> LevelFilter {
    std::env::var("RUST_LOG").ok().and_then(|level| level.parse::<LevelFilter>().ok()).unwrap_or(LevelFilter::Info)
}

fn console_dispatch() -> Dispatch {
    let colors = ColoredLevelConfig::new()
        .error(Color::Red)
        .warn(Color::Yellow)
        .info(Color::Green)
        .debug(Color::Blue)
        .trace(Color::BrightBlack);

    Dispatch::new()
        .filter(|metadata| metadata.target() != ANALYTICS_TARGET)
        .format(move |out, message, record| {
            out.finish(format_args!("[{} {} {}] {}", Local::now().format("%H:%M:%S%.3f"), colors.color(record.level()), record.target(), message))
        })
        .chain(std::io::stderr())
}

fn file_dispatch() -> Dispatch {
    Dispatch::new().format(|out, message, record| {
        out.finish(format_args!("[{} {} {}] {}", Local::now().format("%Y-%m-%d %H:%M:%S%.3f"), record.level(), record.target(), message))
    })
}
