use log::{Level, LevelFilter, Log, Metadata, Record};
use owo_colors::OwoColorize;
use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;
use std::sync::Mutex;

use super::timer_logger::elapsed_ms;

/// Writes records to stderr and, optionally, appends them to a file.
pub struct SimLogger {
    level: LevelFilter,
    file: Option<Mutex<File>>,
}

impl SimLogger {
    pub fn new(level: LevelFilter) -> Self {
        Self { level, file: None }
    }

    pub fn with_file<P: AsRef<Path>>(mut self, path: P) -> io::Result<Self> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)?;
        self.file = Some(Mutex::new(file));
        Ok(self)
    }

    fn format(record: &Record) -> String {
        format!(
            "[{:.3}ms {:<5} {}] {}",
            elapsed_ms(),
            record.level(),
            record.target(),
            record.args()
        )
    }
}

impl Log for SimLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let line = Self::format(record);
        match record.level() {
            Level::Error => eprintln!("{}", line.red()),
            Level::Warn => eprintln!("{}", line.yellow()),
            _ => eprintln!("{}", line.dimmed()),
        }

        if let Some(file) = &self.file
            && let Ok(mut file) = file.lock()
        {
            let _ = writeln!(file, "{line}");
        }
    }

    fn flush(&self) {
        if let Some(file) = &self.file
            && let Ok(mut file) = file.lock()
        {
            let _ = file.flush();
        }
    }
}

pub fn init(level: LevelFilter, log_file: Option<&Path>) -> io::Result<()> {
    let mut logger = SimLogger::new(level);
    if let Some(path) = log_file {
        logger = logger.with_file(path)?;
    }

    log::set_boxed_logger(Box::new(logger)).map_err(io::Error::other)?;
    log::set_max_level(level);
    Ok(())
}
