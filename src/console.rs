// hhee_rdr/src/console.rs

//! # Kernel Console Logger
//!
//! A `log` backend writing level-coloured lines to the firmware console. On
//! RISC-V the sink is the SBI legacy console; other platforms supply their
//! own [`ConsoleSink`].

use core::fmt::{self, Write};
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError};

/// Somewhere characters can be written without allocating.
pub trait ConsoleSink: Sync {
    fn put_str(&self, s: &str);
}

struct SinkWriter<'a>(&'a dyn ConsoleSink);

impl Write for SinkWriter<'_> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.0.put_str(s);
        Ok(())
    }
}

fn prefix(level: Level) -> &'static str {
    match level {
        Level::Error => "\x1b[31m[ERROR] ",
        Level::Warn => "\x1b[33m[WARN] ",
        Level::Info => "\x1b[32m[INFO] ",
        Level::Debug => "\x1b[36m[DEBUG] ",
        Level::Trace => "\x1b[90m[TRACE] ",
    }
}

/// Writes one formatted log line to `sink`.
pub fn write_line(sink: &dyn ConsoleSink, level: Level, args: fmt::Arguments) {
    let mut out = SinkWriter(sink);
    let _ = out.write_str(prefix(level));
    let _ = out.write_fmt(args);
    let _ = out.write_str("\x1b[0m\n");
}

pub struct ConsoleLogger {
    sink: &'static dyn ConsoleSink,
}

impl ConsoleLogger {
    pub const fn new(sink: &'static dyn ConsoleSink) -> Self {
        Self { sink }
    }
}

impl Log for ConsoleLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            write_line(self.sink, record.level(), *record.args());
        }
    }

    fn flush(&self) {}
}

/// Installs `logger` as the global logger at `level`. Fails if a logger is
/// already installed.
pub fn init_with(logger: &'static ConsoleLogger, level: LevelFilter) -> Result<(), SetLoggerError> {
    log::set_logger(logger)?;
    log::set_max_level(level);
    Ok(())
}

#[cfg(target_arch = "riscv64")]
pub use self::sbi::{init, SbiConsole};

#[cfg(target_arch = "riscv64")]
mod sbi {
    use super::{init_with, ConsoleLogger, ConsoleSink};
    use log::{LevelFilter, SetLoggerError};

    /// The SBI legacy console.
    pub struct SbiConsole;

    impl ConsoleSink for SbiConsole {
        fn put_str(&self, s: &str) {
            for byte in s.bytes() {
                sbi_rt::legacy::console_putchar(byte as usize);
            }
        }
    }

    static SBI_CONSOLE: SbiConsole = SbiConsole;
    static LOGGER: ConsoleLogger = ConsoleLogger::new(&SBI_CONSOLE);

    /// Routes `log` output to the SBI console.
    pub fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        init_with(&LOGGER, level)
    }
}
