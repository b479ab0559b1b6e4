use std::{fmt, str::FromStr};

use thiserror::Error;

/// Defines the severity levels for log messages.
///
/// Levels are ordered by their integer priority, so `LogLevel::Warn > LogLevel::Info`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LogLevel {
    /// Designates very fine-grained informational events (a.k.a. verbose).
    Trace,
    /// Designates fine-grained informational events that are most useful to debug an application.
    Debug,
    /// Designates informational messages that highlight the progress of the application at coarse-grained level.
    Info,
    /// Designates potentially harmful situations.
    Warn,
    /// Designates error events that might still allow the application to continue running.
    Error,
    /// Designates conditions that should never happen. Routed to the fatal output.
    Assert,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LevelParseError {
    #[error("unknown log priority {0}")]
    Priority(i32),
    #[error("unknown log level '{0}'")]
    Name(String),
}

impl LogLevel {
    pub const ALL: [LogLevel; 6] = [
        LogLevel::Trace,
        LogLevel::Debug,
        LogLevel::Info,
        LogLevel::Warn,
        LogLevel::Error,
        LogLevel::Assert,
    ];

    /// Integer severity rank of the level (2 for `Trace` up to 7 for `Assert`).
    #[must_use]
    pub const fn priority(self) -> i32 {
        match self {
            LogLevel::Trace => 2,
            LogLevel::Debug => 3,
            LogLevel::Info => 4,
            LogLevel::Warn => 5,
            LogLevel::Error => 6,
            LogLevel::Assert => 7,
        }
    }

    /// Single-letter code used by line-oriented outputs.
    #[must_use]
    pub const fn letter(self) -> char {
        match self {
            LogLevel::Trace => 'V',
            LogLevel::Debug => 'D',
            LogLevel::Info => 'I',
            LogLevel::Warn => 'W',
            LogLevel::Error => 'E',
            LogLevel::Assert => 'A',
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LogLevel::Trace => "TRACE",
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warn => "WARN",
            LogLevel::Error => "ERROR",
            LogLevel::Assert => "ASSERT",
        };
        f.write_str(name)
    }
}

impl TryFrom<i32> for LogLevel {
    type Error = LevelParseError;

    fn try_from(priority: i32) -> Result<Self, LevelParseError> {
        LogLevel::ALL
            .into_iter()
            .find(|level| level.priority() == priority)
            .ok_or(LevelParseError::Priority(priority))
    }
}

impl FromStr for LogLevel {
    type Err = LevelParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "trace" | "verbose" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            "assert" | "wtf" => Ok(LogLevel::Assert),
            _ => Err(LevelParseError::Name(s.to_owned())),
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]
    use super::*;

    #[test]
    fn priorities_are_ordered_like_levels() {
        let priorities: Vec<i32> = LogLevel::ALL.iter().map(|l| l.priority()).collect();
        assert_eq!(priorities, vec![2, 3, 4, 5, 6, 7]);
        assert!(LogLevel::Assert > LogLevel::Error);
        assert!(LogLevel::Trace < LogLevel::Debug);
    }

    #[test]
    fn priority_round_trips_and_rejects_unknown() {
        assert_eq!(LogLevel::try_from(5).unwrap(), LogLevel::Warn);
        assert_eq!(LogLevel::try_from(1), Err(LevelParseError::Priority(1)));
    }

    #[test]
    fn parses_names_and_aliases() {
        assert_eq!("verbose".parse::<LogLevel>().unwrap(), LogLevel::Trace);
        assert_eq!(" Warning ".parse::<LogLevel>().unwrap(), LogLevel::Warn);
        assert_eq!("WTF".parse::<LogLevel>().unwrap(), LogLevel::Assert);
        assert!("loud".parse::<LogLevel>().is_err());
    }
}
