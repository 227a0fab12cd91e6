//! Core logger types and traits

pub mod appender;
pub mod error;
pub mod format_flags;
pub mod log_level;
pub mod logger;
pub mod metrics;
pub mod policy;

pub use appender::{Appender, Destination};
pub use error::{LoggerError, Result};
pub use format_flags::{FormatFlags, LocationStyle, TimestampFormat};
pub use log_level::LogLevel;
pub use logger::NamedLogger;
pub use metrics::LoggerMetrics;
pub use policy::{
    Directives, FatalAction, LevelPolicy, LevelPolicyBuilder, PolicyConfig, DEFAULT_ENV_VAR,
};
