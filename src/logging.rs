use log::{LevelFilter, Metadata, Record};
use std::sync::Mutex;
use std::fs::OpenOptions;
use std::io::Write;
use std::str::FromStr;
use chrono::Local;
use crate::config::LoggingConfig;
use crate::error::{Error, Result};

/// Appends `timestamp [LEVEL] message` lines to a file.
pub struct FileLogger {
    file: Mutex<std::fs::File>,
    level: LevelFilter,
}

impl FileLogger {
    pub fn new(log_file: &str, level: LevelFilter) -> std::io::Result<Self> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(log_file)?;

        Ok(Self {
            file: Mutex::new(file),
            level,
        })
    }
}

impl log::Log for FileLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        if let Ok(mut file) = self.file.lock() {
            let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S");
            let _ = writeln!(
                file,
                "{} [{}] {}",
                timestamp,
                record.level(),
                record.args()
            );
        }
    }

    fn flush(&self) {
        if let Ok(mut file) = self.file.lock() {
            let _ = file.flush();
        }
    }
}

pub fn parse_level(level: &str) -> Result<LevelFilter> {
    LevelFilter::from_str(level.trim())
        .map_err(|_| Error::ConfigError(format!("unknown log level: {}", level)))
}

/// Installs the global logger: the file sink when configured, otherwise
/// `env_logger` on stderr. `debug` forces the debug level.
pub fn init(config: &LoggingConfig, debug: bool) -> Result<()> {
    let level = if debug {
        LevelFilter::Debug
    } else {
        parse_level(&config.level)?
    };

    match &config.file {
        Some(path) => {
            let logger = FileLogger::new(path, level)?;
            log::set_boxed_logger(Box::new(logger))
                .map_err(|e| Error::InternalError(e.to_string()))?;
            log::set_max_level(level);
        }
        None => {
            env_logger::Builder::new()
                .filter_level(level)
                .parse_default_env()
                .try_init()
                .map_err(|e| Error::InternalError(e.to_string()))?;
        }
    }
    Ok(())
}
