// src/utils/logger.rs

use log::{Level, LevelFilter, Metadata, Record, SetLoggerError};
use std::io::Write;
use std::sync::atomic::{AtomicUsize, Ordering};

static LOGGER: StderrLogger = StderrLogger;
static MAX_LEVEL: AtomicUsize = AtomicUsize::new(LevelFilter::Warn as usize);

struct StderrLogger;

pub fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
    MAX_LEVEL.store(level as usize, Ordering::Relaxed);
    log::set_logger(&LOGGER).map(|()| log::set_max_level(level))
}

/// Format: "🟠  Closest mass to 24.0: 24.3"
pub fn format_line(level: Level, message: &str) -> String {
    let icon = match level {
        Level::Error => "🔴", // Red Circle
        Level::Warn => "🟠",  // Orange Circle
        Level::Info => "🔵",  // Blue Circle
        Level::Debug => "⚪", // White/Gray Circle
        Level::Trace => "▫️", // Small dot
    };
    format!("{}  {}", icon, message)
}

impl log::Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() as usize <= MAX_LEVEL.load(Ordering::Relaxed)
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let line = format_line(record.level(), &record.args().to_string());
            let _ = writeln!(std::io::stderr().lock(), "{}", line);
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}
