use chrono::Local;
use fern::colors::{Color, ColoredLevelConfig};
use fern::Dispatch;
use log::LevelFilter;
use std::fs;
use std::path::Path;

const LOG_DIR: &str = "logs";
const LOG_FILE: &str = "scheduler.log";

/// Initializes the global logger.
///
/// Call once at the start of `main`. The level comes from `RUST_LOG`
/// (default `info`); output goes to stderr in color and, if the log
/// directory can be created, to `logs/scheduler.log` as plain text.
pub fn init() {
    let level = std::env::var("RUST_LOG")
        .ok()
        .and_then(|raw| raw.parse::<LevelFilter>().ok())
        .unwrap_or(LevelFilter::Info);

    let colors = ColoredLevelConfig::new()
        .error(Color::Red)
        .warn(Color::Yellow)
        .info(Color::Green)
        .debug(Color::Blue)
        .trace(Color::BrightBlack);

    let console = Dispatch::new()
        .format(move |out, message, record| {
            out.finish(format_args!(
                "[{} {} {}] {}",
                Local::now().format("%Y-%m-%d %H:%M:%S"),
                colors.color(record.level()),
                record.target(),
                message
            ))
        })
        .chain(std::io::stderr());

    let mut dispatch = Dispatch::new()
        .level(level)
        .level_for("reqwest", LevelFilter::Warn)
        .level_for("hyper", LevelFilter::Warn)
        .chain(console);

    match open_log_file() {
        Ok(file) => {
            let file_sink = Dispatch::new()
                .format(|out, message, record| {
                    out.finish(format_args!("[{} {} {}] {}", Local::now().format("%Y-%m-%d %H:%M:%S"), record.level(), record.target(), message))
                })
                .chain(file);
            dispatch = dispatch.chain(file_sink);
        }
        Err(e) => {
            eprintln!("File logging disabled, could not open '{}/{}': {}", LOG_DIR, LOG_FILE, e);
        }
    }

    if let Err(e) = dispatch.apply() {
        eprintln!("Failed to apply logger configuration: {}", e);
    }
}

fn open_log_file() -> std::io::Result<std::fs::File> {
    fs::create_dir_all(LOG_DIR)?;
    fern::log_file(Path::new(LOG_DIR).join(LOG_FILE))
}
