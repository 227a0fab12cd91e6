//! Level policy: thresholds and formatting shared by named loggers
//!
//! A [`LevelPolicy`] holds a default threshold, per-name overrides, and the
//! [`FormatFlags`] used to render lines. Loggers hold an `Arc` to the policy
//! and resolve their threshold on every call, so changes apply immediately to
//! handles that already exist.

use super::{
    appender::Destination,
    error::{LoggerError, Result},
    format_flags::FormatFlags,
    log_level::LogLevel,
    logger::NamedLogger,
    metrics::LoggerMetrics,
};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, OnceLock};

/// Environment variable read by [`LevelPolicy::from_default_env`]
pub const DEFAULT_ENV_VAR: &str = "LEVELED_LOG";

/// What happens after a FATAL line has been written and flushed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum FatalAction {
    /// Unwind the calling thread with the rendered message as panic payload
    #[default]
    Panic,
    /// Abort the process immediately
    Abort,
    /// Exit the process with the given status code
    Exit(i32),
}

#[derive(Debug)]
struct PolicyState {
    default_threshold: LogLevel,
    overrides: HashMap<String, LogLevel>,
    format_flags: FormatFlags,
    fatal_action: FatalAction,
}

impl PolicyState {
    fn threshold_for(&self, name: &str) -> LogLevel {
        self.overrides
            .get(name)
            .copied()
            .unwrap_or(self.default_threshold)
    }
}

pub struct LevelPolicy {
    state: RwLock<PolicyState>,
    metrics: LoggerMetrics,
}

impl LevelPolicy {
    /// Policy with a DEBUG default threshold, no overrides and default flags
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: RwLock::new(PolicyState {
                default_threshold: LogLevel::Debug,
                overrides: HashMap::new(),
                format_flags: FormatFlags::default(),
                fatal_action: FatalAction::default(),
            }),
            metrics: LoggerMetrics::new(),
        }
    }

    /// Wrap this policy in an Arc so loggers can share it
    #[must_use]
    pub fn shared(self) -> Arc<Self> {
        Arc::new(self)
    }

    /// The process-wide policy, created on first use.
    pub fn global() -> &'static Arc<LevelPolicy> {
        static GLOBAL: OnceLock<Arc<LevelPolicy>> = OnceLock::new();
        GLOBAL.get_or_init(|| LevelPolicy::new().shared())
    }

    /// Set the threshold for loggers named `name`, replacing any previous one.
    pub fn set_threshold(&self, name: impl Into<String>, level: LogLevel) {
        self.state.write().overrides.insert(name.into(), level);
    }

    /// Remove the override for `name`, returning it if one was set.
    pub fn clear_threshold(&self, name: &str) -> Option<LogLevel> {
        self.state.write().overrides.remove(name)
    }

    pub fn set_default_threshold(&self, level: LogLevel) {
        self.state.write().default_threshold = level;
    }

    pub fn default_threshold(&self) -> LogLevel {
        self.state.read().default_threshold
    }

    /// Effective threshold for `name`: its override, else the default.
    pub fn threshold_for(&self, name: &str) -> LogLevel {
        self.state.read().threshold_for(name)
    }

    pub fn set_format_flags(&self, flags: FormatFlags) {
        self.state.write().format_flags = flags;
    }

    pub fn format_flags(&self) -> FormatFlags {
        self.state.read().format_flags.clone()
    }

    pub fn set_fatal_action(&self, action: FatalAction) {
        self.state.write().fatal_action = action;
    }

    pub fn fatal_action(&self) -> FatalAction {
        self.state.read().fatal_action
    }

    /// Whether a message at `level` from the logger `name` should be written.
    #[inline]
    pub fn is_loggable(&self, name: &str, level: LogLevel) -> bool {
        level >= self.state.read().threshold_for(name)
    }

    pub fn metrics(&self) -> &LoggerMetrics {
        &self.metrics
    }

    /// Render a line with the current flags. Colors are dropped for
    /// destinations that do not support them.
    pub(crate) fn format_line(
        &self,
        location: &std::panic::Location<'_>,
        level: LogLevel,
        message: &str,
        supports_color: bool,
    ) -> String {
        let state = self.state.read();
        if state.format_flags.colors && !supports_color {
            state
                .format_flags
                .clone()
                .with_colors(false)
                .format_line(location, level, message)
        } else {
            state.format_flags.format_line(location, level, message)
        }
    }

    /// Logger bound to `name` that writes to standard error
    pub fn logger(self: &Arc<Self>, name: impl Into<String>) -> NamedLogger {
        NamedLogger::new(Arc::clone(self), name, None)
    }

    /// Logger bound to `name` that writes to `destination`
    pub fn logger_with(self: &Arc<Self>, name: impl Into<String>, destination: Destination) -> NamedLogger {
        NamedLogger::new(Arc::clone(self), name, Some(destination))
    }

    /// Apply a directive string such as `"info,net=warning"`.
    ///
    /// Nothing is changed when any directive fails to parse.
    pub fn apply_directives(&self, spec: &str) -> Result<()> {
        let directives = Directives::parse(spec)?;
        let mut state = self.state.write();
        if let Some(level) = directives.default_threshold {
            state.default_threshold = level;
        }
        state.overrides.extend(directives.overrides);
        Ok(())
    }

    /// Build a policy from the directives in environment variable `var`.
    ///
    /// An unset variable yields the default policy.
    pub fn from_env(var: &str) -> Result<Arc<Self>> {
        let policy = Self::new();
        match std::env::var(var) {
            Ok(spec) => policy.apply_directives(&spec)?,
            Err(std::env::VarError::NotPresent) => {}
            Err(std::env::VarError::NotUnicode(_)) => {
                return Err(LoggerError::config(var, "value is not valid UTF-8"));
            }
        }
        Ok(policy.shared())
    }

    /// [`from_env`](Self::from_env) with [`DEFAULT_ENV_VAR`]
    pub fn from_default_env() -> Result<Arc<Self>> {
        Self::from_env(DEFAULT_ENV_VAR)
    }

    /// Current thresholds and flags as a serializable value
    pub fn snapshot(&self) -> PolicyConfig {
        let state = self.state.read();
        PolicyConfig {
            default_threshold: state.default_threshold,
            overrides: state
                .overrides
                .iter()
                .map(|(name, level)| (name.clone(), *level))
                .collect(),
            format_flags: state.format_flags.clone(),
            fatal_action: state.fatal_action,
        }
    }

    /// Replace all thresholds and flags with `config`.
    pub fn apply_config(&self, config: PolicyConfig) {
        let mut state = self.state.write();
        state.default_threshold = config.default_threshold;
        state.overrides = config.overrides.into_iter().collect();
        state.format_flags = config.format_flags;
        state.fatal_action = config.fatal_action;
    }

    /// Create a builder for LevelPolicy
    ///
    /// # Example
    /// ```
    /// use leveled_logger::prelude::*;
    ///
    /// let policy = LevelPolicy::builder()
    ///     .default_threshold(LogLevel::Info)
    ///     .threshold("net", LogLevel::Warning)
    ///     .build();
    /// assert!(!policy.is_loggable("net", LogLevel::Info));
    /// ```
    #[must_use]
    pub fn builder() -> LevelPolicyBuilder {
        LevelPolicyBuilder::new()
    }
}

impl Default for LevelPolicy {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for LevelPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LevelPolicy")
            .field("state", &*self.state.read())
            .field("metrics", &self.metrics)
            .finish()
    }
}

/// Serializable form of a policy's configuration
///
/// # Example
///
/// ```
/// use leveled_logger::prelude::*;
///
/// let config = PolicyConfig::from_json(
///     r#"{"default_threshold":"Info","overrides":{"net":"Error"}}"#,
/// ).unwrap();
/// let policy = LevelPolicy::new().shared();
/// policy.apply_config(config);
/// assert_eq!(policy.threshold_for("net"), LogLevel::Error);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PolicyConfig {
    pub default_threshold: LogLevel,
    pub overrides: BTreeMap<String, LogLevel>,
    pub format_flags: FormatFlags,
    pub fatal_action: FatalAction,
}

impl PolicyConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Parsed form of a directive string like `"debug,net=warning,db=error"`.
///
/// A bare level sets the default threshold (the last one wins); `name=level`
/// sets an override. Empty segments are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Directives {
    pub default_threshold: Option<LogLevel>,
    pub overrides: Vec<(String, LogLevel)>,
}

impl Directives {
    pub fn parse(spec: &str) -> Result<Self> {
        let mut directives = Directives::default();

        for segment in spec.split(',').map(str::trim).filter(|s| !s.is_empty()) {
            match segment.split_once('=') {
                None => directives.default_threshold = Some(segment.parse()?),
                Some((name, level)) => {
                    let name = name.trim();
                    if name.is_empty() {
                        return Err(LoggerError::config(
                            "directives",
                            format!("empty logger name in '{}'", segment),
                        ));
                    }
                    directives.overrides.push((name.to_string(), level.parse()?));
                }
            }
        }

        Ok(directives)
    }
}

/// Builder for [`LevelPolicy`]
#[derive(Debug, Clone)]
pub struct LevelPolicyBuilder {
    default_threshold: LogLevel,
    overrides: Vec<(String, LogLevel)>,
    format_flags: FormatFlags,
    fatal_action: FatalAction,
}

impl LevelPolicyBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self {
            default_threshold: LogLevel::Debug,
            overrides: Vec::new(),
            format_flags: FormatFlags::default(),
            fatal_action: FatalAction::default(),
        }
    }

    #[must_use = "builder methods return a new value"]
    pub fn default_threshold(mut self, level: LogLevel) -> Self {
        self.default_threshold = level;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn threshold(mut self, name: impl Into<String>, level: LogLevel) -> Self {
        self.overrides.push((name.into(), level));
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn format_flags(mut self, flags: FormatFlags) -> Self {
        self.format_flags = flags;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn fatal_action(mut self, action: FatalAction) -> Self {
        self.fatal_action = action;
        self
    }

    /// Build the shared policy
    pub fn build(self) -> Arc<LevelPolicy> {
        let policy = LevelPolicy::new();
        {
            let mut state = policy.state.write();
            state.default_threshold = self.default_threshold;
            state.overrides.extend(self.overrides);
            state.format_flags = self.format_flags;
            state.fatal_action = self.fatal_action;
        }
        policy.shared()
    }
}

impl Default for LevelPolicyBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_threshold_is_debug() {
        let policy = LevelPolicy::new();
        assert_eq!(policy.default_threshold(), LogLevel::Debug);
        assert!(!policy.is_loggable("", LogLevel::Verbose));
        assert!(policy.is_loggable("", LogLevel::Debug));
        assert!(policy.is_loggable("anything", LogLevel::Fatal));
    }

    #[test]
    fn test_override_takes_precedence() {
        let policy = LevelPolicy::new();
        policy.set_threshold("net", LogLevel::Warning);

        assert!(!policy.is_loggable("net", LogLevel::Info));
        assert!(policy.is_loggable("net", LogLevel::Warning));
        assert!(policy.is_loggable("db", LogLevel::Info));

        // Lowering the default does not affect an overridden name
        policy.set_default_threshold(LogLevel::Verbose);
        assert!(!policy.is_loggable("net", LogLevel::Info));

        // An override may also be looser than the default
        policy.set_default_threshold(LogLevel::Error);
        policy.set_threshold("db", LogLevel::Verbose);
        assert!(policy.is_loggable("db", LogLevel::Verbose));
        assert!(!policy.is_loggable("other", LogLevel::Warning));
    }

    #[test]
    fn test_set_threshold_is_idempotent() {
        let policy = LevelPolicy::new();
        policy.set_threshold("net", LogLevel::Error);
        policy.set_threshold("net", LogLevel::Error);
        assert_eq!(policy.snapshot().overrides.len(), 1);

        policy.set_threshold("net", LogLevel::Info);
        assert_eq!(policy.threshold_for("net"), LogLevel::Info);
    }

    #[test]
    fn test_clear_threshold() {
        let policy = LevelPolicy::new();
        policy.set_threshold("net", LogLevel::Error);
        assert_eq!(policy.clear_threshold("net"), Some(LogLevel::Error));
        assert_eq!(policy.clear_threshold("net"), None);
        assert_eq!(policy.threshold_for("net"), LogLevel::Debug);
    }

    #[test]
    fn test_empty_name_override() {
        let policy = LevelPolicy::new();
        policy.set_threshold("", LogLevel::Fatal);
        assert!(!policy.is_loggable("", LogLevel::Error));
        assert!(policy.is_loggable("named", LogLevel::Error));
    }

    #[test]
    fn test_format_flags_do_not_affect_filtering() {
        let policy = LevelPolicy::new();
        policy.set_format_flags(FormatFlags::none());
        assert_eq!(policy.format_flags(), FormatFlags::none());
        assert!(policy.is_loggable("x", LogLevel::Debug));
        assert!(!policy.is_loggable("x", LogLevel::Verbose));
    }

    #[test]
    fn test_parse_directives() {
        let directives = Directives::parse("info, net=warning ,db=verbose,").unwrap();
        assert_eq!(directives.default_threshold, Some(LogLevel::Info));
        assert_eq!(
            directives.overrides,
            vec![
                ("net".to_string(), LogLevel::Warning),
                ("db".to_string(), LogLevel::Verbose),
            ]
        );

        assert_eq!(Directives::parse("").unwrap(), Directives::default());
    }

    #[test]
    fn test_invalid_directives_leave_policy_untouched() {
        let policy = LevelPolicy::new();

        let err = policy.apply_directives("error,net=loud").unwrap_err();
        assert!(matches!(err, LoggerError::InvalidLevel(_)));

        let err = policy.apply_directives("=info").unwrap_err();
        assert!(matches!(err, LoggerError::InvalidConfiguration { .. }));

        assert_eq!(policy.default_threshold(), LogLevel::Debug);
        assert!(policy.snapshot().overrides.is_empty());
    }

    #[test]
    fn test_apply_directives() {
        let policy = LevelPolicy::new();
        policy.apply_directives("warn,net=error").unwrap();
        assert_eq!(policy.default_threshold(), LogLevel::Warning);
        assert_eq!(policy.threshold_for("net"), LogLevel::Error);
    }

    #[test]
    fn test_from_env() {
        let var = "LEVELED_LOGGER_POLICY_TEST_FROM_ENV";
        std::env::set_var(var, "error,cache=info");
        let policy = LevelPolicy::from_env(var).unwrap();
        std::env::remove_var(var);

        assert_eq!(policy.default_threshold(), LogLevel::Error);
        assert_eq!(policy.threshold_for("cache"), LogLevel::Info);

        let policy = LevelPolicy::from_env("LEVELED_LOGGER_POLICY_TEST_UNSET").unwrap();
        assert_eq!(policy.default_threshold(), LogLevel::Debug);
    }

    #[test]
    fn test_builder() {
        let policy = LevelPolicy::builder()
            .default_threshold(LogLevel::Warning)
            .threshold("net", LogLevel::Verbose)
            .format_flags(FormatFlags::none())
            .fatal_action(FatalAction::Exit(3))
            .build();

        assert_eq!(policy.default_threshold(), LogLevel::Warning);
        assert_eq!(policy.threshold_for("net"), LogLevel::Verbose);
        assert_eq!(policy.format_flags(), FormatFlags::none());
        assert_eq!(policy.fatal_action(), FatalAction::Exit(3));
    }

    #[test]
    fn test_config_json_roundtrip() {
        let policy = LevelPolicy::builder()
            .default_threshold(LogLevel::Info)
            .threshold("net", LogLevel::Error)
            .build();

        let json = policy.snapshot().to_json().unwrap();
        let config = PolicyConfig::from_json(&json).unwrap();
        assert_eq!(config, policy.snapshot());

        let other = LevelPolicy::new();
        other.set_threshold("stale", LogLevel::Fatal);
        other.apply_config(config);
        assert_eq!(other.threshold_for("net"), LogLevel::Error);
        assert_eq!(other.threshold_for("stale"), LogLevel::Info);
    }

    #[test]
    fn test_config_json_errors() {
        let err = PolicyConfig::from_json(r#"{"default_threshold":"Loud"}"#).unwrap_err();
        assert!(matches!(err, LoggerError::JsonError(_)));
    }

    #[test]
    fn test_global_is_shared() {
        let a = LevelPolicy::global();
        let b = LevelPolicy::global();
        assert!(Arc::ptr_eq(a, b));
    }
}
