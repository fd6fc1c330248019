//! Defines the console logger that writes log records to stderr.
//!
//! Standard output carries the translation report, so diagnostics go to stderr where they
//! cannot interleave with it.

use std::io::{self, Write};
use std::sync::OnceLock;

use log::{LevelFilter, SetLoggerError};

pub struct Console {
    level: LevelFilter,
}

static DEFAULT: OnceLock<Console> = OnceLock::new();

impl Console {
    /// Creates the process-wide console and installs it as the `log` logger.
    ///
    /// Without an explicit level, debug builds log everything and release builds log `Info`
    /// and above.
    pub fn init(level: Option<LevelFilter>) -> Result<&'static Self, SetLoggerError> {
        let console = DEFAULT.get_or_init(|| Console {
            level: level.unwrap_or_else(default_level),
        });
        console.install()?;
        Ok(console)
    }

    fn install(&'static self) -> Result<(), SetLoggerError> {
        log::set_logger(self)?;
        log::set_max_level(self.level);
        Ok(())
    }
}

fn default_level() -> LevelFilter {
    if cfg!(debug_assertions) {
        LevelFilter::Trace
    } else {
        LevelFilter::Info
    }
}

impl log::Log for Console {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &log::Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let _ = write_log_entry_to(&mut io::stderr().lock(), record);
    }

    fn flush(&self) {
        let _ = io::stderr().flush();
    }
}

fn write_log_entry_to(writer: &mut impl Write, record: &log::Record) -> io::Result<()> {
    #[cfg(any(debug_assertions, feature = "detailed-logging"))]
    return writeln!(
        writer,
        "[{} {}:{} {}] {}",
        record.level(),
        record.file().unwrap_or("unknown"),
        record.line().unwrap_or(0),
        record.target(),
        record.args()
    );
    #[cfg(not(any(debug_assertions, feature = "detailed-logging")))]
    return writeln!(writer, "[{:5}] {}", record.level(), record.args());
}
