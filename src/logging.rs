//! Logging setup.
//!
//! Console logging follows the usual `RUST_LOG` conventions (defaulting to
//! `info`) and is optionally teed into a plain-text file inside the save
//! directory, so that a finished run leaves a readable trace next to its
//! outputs. Severity can be overridden at construction time; nothing here
//! mutates logger state after [init] returns.
use std::fs::File;
use std::io::{LineWriter, Write};
use std::path::Path;
use std::sync::Mutex;
use std::time::SystemTime;

use log::{Log, Metadata, Record};

use crate::error::Error;

struct TeeLogger {
    console: env_logger::Logger,
    file: Option<Mutex<LineWriter<File>>>,
}

impl Log for TeeLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        self.console.enabled(metadata)
    }

    fn log(&self, record: &Record) {
        if !self.console.matches(record) {
            return;
        }
        self.console.log(record);
        if let Some(file) = &self.file {
            if let Ok(mut sink) = file.lock() {
                let _ = writeln!(sink, "{}", file_line(record));
            }
        }
    }

    fn flush(&self) {
        self.console.flush();
        if let Some(file) = &self.file {
            if let Ok(mut sink) = file.lock() {
                let _ = sink.flush();
            }
        }
    }
}

/// One file-sink line: timestamp, severity, logger target, message.
fn file_line(record: &Record) -> String {
    format!(
        "[{} {} {}] {}",
        humantime::format_rfc3339_seconds(SystemTime::now()),
        record.level(),
        record.target(),
        record.args()
    )
}

fn build(log_file: Option<&Path>, level: Option<log::LevelFilter>) -> Result<TeeLogger, Error> {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if let Some(level) = level {
        // added after the env directives, so it wins over them
        builder.filter_level(level);
    }
    let file = match log_file {
        Some(path) => Some(Mutex::new(LineWriter::new(File::create(path)?))),
        None => None,
    };
    Ok(TeeLogger {
        console: builder.build(),
        file,
    })
}

/// Install the global logger.
///
/// `log_file` adds a plain-text sink (truncated on each run) alongside the
/// colored console output. `level` caps severity explicitly, overriding
/// whatever `RUST_LOG` resolves to.
pub fn init(log_file: Option<&Path>, level: Option<log::LevelFilter>) -> Result<(), Error> {
    let logger = build(log_file, level)?;
    let max_level = logger.console.filter();
    log::set_boxed_logger(Box::new(logger))?;
    log::set_max_level(max_level);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use log::Level;

    #[test]
    fn severity_override_wins() {
        let logger = build(None, Some(log::LevelFilter::Warn)).unwrap();
        let info = Metadata::builder().level(Level::Info).build();
        let warn = Metadata::builder().level(Level::Warn).build();
        assert!(!logger.console.enabled(&info));
        assert!(logger.console.enabled(&warn));
    }

    #[test]
    fn file_line_format() {
        let line = file_line(
            &Record::builder()
                .level(Level::Info)
                .target("shelob::sources")
                .args(format_args!("fetching archives"))
                .build(),
        );
        assert!(line.starts_with('['));
        assert!(line.contains(" INFO shelob::sources] "));
        assert!(line.ends_with("fetching archives"));
    }
}
