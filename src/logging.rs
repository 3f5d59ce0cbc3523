use chrono::Local;
use log::{Level, LevelFilter, Metadata, Record, SetLoggerError};
use once_cell::sync::OnceCell;
use std::fs::{OpenOptions, create_dir_all};
use std::io::Write;
use std::path::PathBuf;

#[derive(Debug)]
struct FileLogger {
    log_path: PathBuf,
    max_level: Level,
}

static LOGGER: OnceCell<FileLogger> = OnceCell::new();

impl log::Log for FileLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.max_level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S");
            let log_entry = format!("{} - {} - {}\n", timestamp, record.level(), record.args());
            let log_file = self.log_path.join("debug.log");

            if let Ok(mut file) = OpenOptions::new().create(true).append(true).open(log_file) {
                let _ = file.write_all(log_entry.as_bytes());
            }
        }
    }

    fn flush(&self) {}
}

pub fn init(debug_mode: bool) -> Result<(), SetLoggerError> {
    let log_path = PathBuf::from("./data");
    create_dir_all(&log_path).expect("Could not create log path");

    let max_level = if debug_mode { Level::Debug } else { Level::Info };
    LOGGER
        .set(FileLogger {
            log_path,
            max_level,
        })
        .expect("Logger already set");

    log::set_logger(LOGGER.get().unwrap()).map(|()| {
        log::set_max_level(if debug_mode {
            LevelFilter::Debug
        } else {
            LevelFilter::Info
        })
    })
}
