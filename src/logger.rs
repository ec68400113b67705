use std::str::FromStr;

use anyhow::Result;
use colored::{Color, Colorize};
use log::{Level, LevelFilter};

fn level_color(level: Level) -> Color {
    match level {
        Level::Error => Color::Red,
        Level::Warn => Color::Yellow,
        Level::Info => Color::Green,
        Level::Debug => Color::Blue,
        Level::Trace => Color::Magenta,
    }
}

/// Installs the global logger. `level` falls back to `info` when absent or unrecognised.
pub fn setup_logger(level: Option<&str>) -> Result<()> {
    let level = level
        .and_then(|l| LevelFilter::from_str(l).ok())
        .unwrap_or(LevelFilter::Info);

    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "[{} {} {}] {}",
                humantime::format_rfc3339_seconds(std::time::SystemTime::now()),
                record.level().to_string().color(level_color(record.level())),
                record.target(),
                message
            ))
        })
        .level(LevelFilter::Warn)
        .level_for("vehicle_manager", level)
        .chain(std::io::stdout())
        .apply()?;

    Ok(())
}
