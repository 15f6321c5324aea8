//! Error enum
use std::path::PathBuf;

#[derive(Debug)]
pub enum Error {
    Io(std::io::Error),
    Reqwest(reqwest::Error),
    Url(url::ParseError),
    Glob(glob::GlobError),
    GlobPattern(glob::PatternError),
    Serde(serde_json::Error),
    SetLogger(log::SetLoggerError),
    /// An external command exited with a non-zero status.
    /// `stderr` holds whatever the command wrote before failing.
    Command {
        command: String,
        code: Option<i32>,
        stderr: String,
    },
    /// No file matched a raw-data discovery pattern.
    MissingSource { pattern: String },
    /// Several files matched where exactly one was required.
    AmbiguousSource {
        pattern: String,
        matches: Vec<PathBuf>,
    },
    /// The two sides of a parallel file pair have different line counts.
    UnalignedPair {
        src: PathBuf,
        tgt: PathBuf,
        src_lines: usize,
        tgt_lines: usize,
    },
    Custom(String),
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Error {
        Error::Io(e)
    }
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Error {
        Error::Reqwest(e)
    }
}

impl From<url::ParseError> for Error {
    fn from(e: url::ParseError) -> Error {
        Error::Url(e)
    }
}

impl From<glob::GlobError> for Error {
    fn from(e: glob::GlobError) -> Error {
        Error::Glob(e)
    }
}

impl From<glob::PatternError> for Error {
    fn from(e: glob::PatternError) -> Error {
        Error::GlobPattern(e)
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Error {
        Error::Serde(e)
    }
}

impl From<log::SetLoggerError> for Error {
    fn from(e: log::SetLoggerError) -> Error {
        Error::SetLogger(e)
    }
}

impl From<String> for Error {
    fn from(s: String) -> Error {
        Error::Custom(s)
    }
}
