//! Log level definitions

use super::error::LoggerError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Message severity, ordered from least to most important.
///
/// The numeric values match the level codes accepted by
/// [`NamedLogger::log_raw`](crate::core::NamedLogger::log_raw).
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum LogLevel {
    Verbose = 1,
    #[default]
    Debug = 2,
    Info = 3,
    Warning = 4,
    Error = 5,
    Fatal = 6,
}

impl LogLevel {
    /// Every level, lowest first.
    pub const ALL: [LogLevel; 6] = [
        LogLevel::Verbose,
        LogLevel::Debug,
        LogLevel::Info,
        LogLevel::Warning,
        LogLevel::Error,
        LogLevel::Fatal,
    ];

    pub fn to_str(&self) -> &'static str {
        match self {
            LogLevel::Verbose => "VERBOSE",
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warning => "WARNING",
            LogLevel::Error => "ERROR",
            LogLevel::Fatal => "FATAL",
        }
    }

    /// One-letter marker written at the start of every emitted line.
    pub fn tag(&self) -> char {
        match self {
            LogLevel::Verbose => 'V',
            LogLevel::Debug => 'D',
            LogLevel::Info => 'I',
            LogLevel::Warning => 'W',
            LogLevel::Error => 'E',
            LogLevel::Fatal => 'F',
        }
    }

    #[cfg(feature = "console")]
    pub fn color_code(&self) -> colored::Color {
        use colored::Color::*;
        match self {
            LogLevel::Verbose => BrightBlack,
            LogLevel::Debug => Blue,
            LogLevel::Info => Green,
            LogLevel::Warning => Yellow,
            LogLevel::Error => Red,
            LogLevel::Fatal => BrightRed,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_str())
    }
}

impl FromStr for LogLevel {
    type Err = LoggerError;

    fn from_str(s: &str) -> Result<Self, LoggerError> {
        match s.trim().to_uppercase().as_str() {
            "VERBOSE" | "TRACE" => Ok(LogLevel::Verbose),
            "DEBUG" => Ok(LogLevel::Debug),
            "INFO" => Ok(LogLevel::Info),
            "WARNING" | "WARN" => Ok(LogLevel::Warning),
            "ERROR" => Ok(LogLevel::Error),
            "FATAL" => Ok(LogLevel::Fatal),
            _ => Err(LoggerError::InvalidLevel(s.to_string())),
        }
    }
}

impl TryFrom<u8> for LogLevel {
    type Error = LoggerError;

    fn try_from(code: u8) -> Result<Self, LoggerError> {
        match code {
            1 => Ok(LogLevel::Verbose),
            2 => Ok(LogLevel::Debug),
            3 => Ok(LogLevel::Info),
            4 => Ok(LogLevel::Warning),
            5 => Ok(LogLevel::Error),
            6 => Ok(LogLevel::Fatal),
            _ => Err(LoggerError::UnsupportedLevel(code)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ordering() {
        for pair in LogLevel::ALL.windows(2) {
            assert!(pair[0] < pair[1]);
        }
    }

    #[test]
    fn test_tags() {
        let tags: String = LogLevel::ALL.iter().map(LogLevel::tag).collect();
        assert_eq!(tags, "VDIWEF");
    }

    #[test]
    fn test_parse_aliases() {
        assert_eq!("warn".parse::<LogLevel>().unwrap(), LogLevel::Warning);
        assert_eq!("Trace".parse::<LogLevel>().unwrap(), LogLevel::Verbose);
        assert_eq!(" error ".parse::<LogLevel>().unwrap(), LogLevel::Error);
        assert!(matches!(
            "loud".parse::<LogLevel>(),
            Err(LoggerError::InvalidLevel(_))
        ));
    }

    #[test]
    fn test_numeric_codes() {
        for level in LogLevel::ALL {
            assert_eq!(LogLevel::try_from(level as u8).unwrap(), level);
        }
        let err = LogLevel::try_from(7).unwrap_err();
        assert_eq!(err.to_string(), "unsupported log level 7");
        assert!(LogLevel::try_from(0).is_err());
    }

    #[test]
    fn test_default_is_debug() {
        assert_eq!(LogLevel::default(), LogLevel::Debug);
    }
}
