//! Line formatting configuration
//!
//! [`FormatFlags`] controls the metadata written in front of every emitted
//! line (timestamp, caller location) and how the message body is rendered.
//! It never influences filtering.

use super::log_level::LogLevel;
use chrono::{DateTime, Local, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::panic::Location;

/// Timestamp format options
///
/// # Examples
///
/// ```
/// use leveled_logger::core::TimestampFormat;
/// use chrono::{TimeZone, Utc};
///
/// let at = Utc.with_ymd_and_hms(2025, 1, 8, 10, 30, 45).unwrap();
/// assert_eq!(TimestampFormat::Std.format(&at), "2025/01/08 10:30:45");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimestampFormat {
    /// Date and time: `2025/01/08 10:30:45`
    Std,

    /// Date and time with microseconds: `2025/01/08 10:30:45.123456`
    #[default]
    StdMicros,

    /// ISO 8601 with milliseconds: `2025-01-08T10:30:45.123Z`
    Iso8601,

    /// ISO 8601 with microseconds: `2025-01-08T10:30:45.123456Z`
    Iso8601Micros,

    /// RFC 3339 with timezone offset: `2025-01-08T10:30:45.123456+00:00`
    Rfc3339,

    /// Unix timestamp in seconds: `1736332245`
    Unix,

    /// Unix timestamp in milliseconds: `1736332245123`
    UnixMillis,

    /// Custom strftime format
    Custom(String),
}

impl TimestampFormat {
    #[must_use]
    pub fn format<Tz: TimeZone>(&self, datetime: &DateTime<Tz>) -> String
    where
        Tz::Offset: fmt::Display,
    {
        match self {
            TimestampFormat::Std => datetime.format("%Y/%m/%d %H:%M:%S").to_string(),
            TimestampFormat::StdMicros => datetime.format("%Y/%m/%d %H:%M:%S%.6f").to_string(),
            TimestampFormat::Iso8601 => datetime.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string(),
            TimestampFormat::Iso8601Micros => {
                datetime.format("%Y-%m-%dT%H:%M:%S%.6fZ").to_string()
            }
            TimestampFormat::Rfc3339 => datetime.to_rfc3339(),
            TimestampFormat::Unix => datetime.timestamp().to_string(),
            TimestampFormat::UnixMillis => datetime.timestamp_millis().to_string(),
            TimestampFormat::Custom(format_str) => datetime.format(format_str).to_string(),
        }
    }
}

/// How the caller's source location is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LocationStyle {
    /// File name only: `main.rs:12`
    Short,
    /// Path as recorded by the compiler: `src/bin/main.rs:12`
    Long,
}

impl LocationStyle {
    fn render(&self, location: &Location<'_>) -> String {
        let file = match self {
            LocationStyle::Long => location.file(),
            LocationStyle::Short => location
                .file()
                .rsplit(['/', '\\'])
                .next()
                .unwrap_or_else(|| location.file()),
        };
        format!("{}:{}", file, location.line())
    }
}

/// Presentation options shared by every logger of a policy.
///
/// The default writes `2025/01/08 10:30:45.123456 main.rs:12: ` in front of
/// each line, using local time.
///
/// # Examples
///
/// ```
/// use leveled_logger::core::{FormatFlags, LocationStyle, TimestampFormat};
///
/// let flags = FormatFlags::none()
///     .with_timestamp(TimestampFormat::Iso8601)
///     .with_location(LocationStyle::Long)
///     .with_utc(true);
/// assert!(flags.location.is_some());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormatFlags {
    /// Timestamp written first on the line, if any
    pub timestamp: Option<TimestampFormat>,
    /// Render timestamps in UTC instead of local time
    pub utc: bool,
    /// Caller location written after the timestamp, if any
    pub location: Option<LocationStyle>,
    /// Escape `\n` and `\r` in messages so each one stays on a single line
    pub escape_newlines: bool,
    /// Colorize the level tag on destinations that support it (requires the
    /// `console` feature); other destinations always get plain tags
    pub colors: bool,
}

impl Default for FormatFlags {
    fn default() -> Self {
        Self {
            timestamp: Some(TimestampFormat::StdMicros),
            utc: false,
            location: Some(LocationStyle::Short),
            escape_newlines: false,
            colors: false,
        }
    }
}

impl FormatFlags {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// No metadata at all; lines are just `<TAG> <message>`.
    #[must_use]
    pub fn none() -> Self {
        Self {
            timestamp: None,
            utc: false,
            location: None,
            escape_newlines: false,
            colors: false,
        }
    }

    #[must_use]
    pub fn with_timestamp(mut self, format: TimestampFormat) -> Self {
        self.timestamp = Some(format);
        self
    }

    #[must_use]
    pub fn without_timestamp(mut self) -> Self {
        self.timestamp = None;
        self
    }

    #[must_use]
    pub fn with_utc(mut self, utc: bool) -> Self {
        self.utc = utc;
        self
    }

    #[must_use]
    pub fn with_location(mut self, style: LocationStyle) -> Self {
        self.location = Some(style);
        self
    }

    #[must_use]
    pub fn without_location(mut self) -> Self {
        self.location = None;
        self
    }

    #[must_use]
    pub fn with_escape_newlines(mut self, escape: bool) -> Self {
        self.escape_newlines = escape;
        self
    }

    #[must_use]
    pub fn with_colors(mut self, colors: bool) -> Self {
        self.colors = colors;
        self
    }

    /// Render a complete line, newline included, stamped with the current time.
    pub fn format_line(&self, location: &Location<'_>, level: LogLevel, message: &str) -> String {
        if self.utc {
            self.format_line_at(&Utc::now(), location, level, message)
        } else {
            self.format_line_at(&Local::now(), location, level, message)
        }
    }

    /// Render a complete line for an explicit point in time.
    pub fn format_line_at<Tz: TimeZone>(
        &self,
        at: &DateTime<Tz>,
        location: &Location<'_>,
        level: LogLevel,
        message: &str,
    ) -> String
    where
        Tz::Offset: fmt::Display,
    {
        let mut line = String::with_capacity(message.len() + 48);

        if let Some(ref format) = self.timestamp {
            line.push_str(&format.format(at));
            line.push(' ');
        }
        if let Some(style) = self.location {
            line.push_str(&style.render(location));
            line.push_str(": ");
        }

        line.push_str(&self.render_tag(level));
        line.push(' ');

        if self.escape_newlines {
            line.push_str(&escape_line_breaks(message));
        } else {
            line.push_str(message);
        }
        line.push('\n');
        line
    }

    #[cfg(feature = "console")]
    fn render_tag(&self, level: LogLevel) -> String {
        use colored::Colorize;
        if self.colors {
            level
                .tag()
                .to_string()
                .color(level.color_code())
                .to_string()
        } else {
            level.tag().to_string()
        }
    }

    #[cfg(not(feature = "console"))]
    fn render_tag(&self, level: LogLevel) -> String {
        level.tag().to_string()
    }
}

fn escape_line_breaks(message: &str) -> String {
    message.replace('\n', "\\n").replace('\r', "\\r")
}
