//! Error types for dnshole.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// A configuration file problem, located by file name and 1-based line number.
#[derive(Error, Debug)]
#[error("{file}:{line}: {kind}")]
pub struct ConfigError {
    pub file: String,
    pub line: usize,
    pub kind: ConfigErrorKind,
}

impl ConfigError {
    pub fn new(file: impl Into<String>, line: usize, kind: ConfigErrorKind) -> Self {
        Self {
            file: file.into(),
            line,
            kind,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigErrorKind {
    WrongFieldCount,
    NonNumericFieldIndex,
    FieldIndexTooSmall,
    NonNumericConcurrency,
    ConcurrencyTooSmall,
    UnknownDirective(String),
}

impl fmt::Display for ConfigErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WrongFieldCount => f.write_str("wrong number of fields"),
            Self::NonNumericFieldIndex => f.write_str("non-numeric field index"),
            Self::FieldIndexTooSmall => f.write_str("field index must be greater than 0"),
            Self::NonNumericConcurrency => f.write_str("non-numeric concurrency"),
            Self::ConcurrencyTooSmall => f.write_str("concurrency must be greater than 0"),
            Self::UnknownDirective(d) => write!(f, "unknown directive: {}", d),
        }
    }
}

/// Failure while retrieving a single list source.
#[derive(Error, Debug)]
pub enum FetchError {
    /// The source could not be retrieved this run. The run continues without it.
    #[error("{location}: {reason}")]
    Unavailable { location: String, reason: String },

    /// A local list that must exist could not be read. The run aborts.
    #[error("failed to read {path:?}: {source}")]
    Fatal {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl FetchError {
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::Unavailable { .. })
    }
}
