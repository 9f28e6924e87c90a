//! Kernel logger backed by the serial port.
//!
//! Routes `log` records to COM1 so they interleave with the rest of the
//! serial output without touching the session console.

use log::{LevelFilter, Metadata, Record};

struct SerialLogger;

static LOGGER: SerialLogger = SerialLogger;

impl log::Log for SerialLogger {
    fn enabled(&self, _metadata: &Metadata) -> bool {
        true
    }

    fn log(&self, record: &Record) {
        crate::serial_println!("[{:>5}] {}", record.level(), record.args());
    }

    fn flush(&self) {}
}

/// Installs the serial logger.
///
/// Idempotent: a second call leaves the already-installed logger in place.
pub fn init() {
    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(LevelFilter::Info);
    }
}
