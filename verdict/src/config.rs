//! Environment configuration.
//!
//! | Variable              | Default | Meaning                                   |
//! |-----------------------|---------|-------------------------------------------|
//! | `VERDICT_RUN_TIMEOUT` | `30s`   | Default timeout for [`crate::run::Process`] |
//! | `VERDICT_KEEP_TEMP`   | `false` | Preserve fixture directories for inspection |
//! | `VERDICT_LOG_LEVEL`   | `info`  | Filter for [`crate::testing::init_test_logging`] |
//! | `VERDICT_LOG_JSON`    | `false` | Emit test logs as JSON lines              |
//!
//! Settings are read on every call and never cached, so tests that adjust the
//! environment see their own values.

use std::env;
use std::time::Duration;

use thiserror::Error;
use tracing::warn;

/// Errors that can occur during environment variable parsing.
#[derive(Debug, Error)]
pub enum EnvError {
    /// Invalid value for a variable.
    #[error("Invalid value for {var}: expected {expected}, got '{value}'")]
    InvalidValue {
        var: String,
        expected: String,
        value: String,
    },

    /// Invalid duration format.
    #[error("Invalid duration for {var}: {value}")]
    InvalidDuration { var: String, value: String },

    /// Invalid log level.
    #[error("Invalid log level for {var}: {value}")]
    InvalidLogLevel { var: String, value: String },
}

/// Type-safe environment variable parser.
///
/// Collects errors during parsing so all issues can be reported at once.
pub struct EnvParser {
    prefix: &'static str,
    errors: Vec<EnvError>,
}

impl Default for EnvParser {
    fn default() -> Self {
        Self::new()
    }
}

impl EnvParser {
    /// Create a new parser with the VERDICT_ prefix.
    pub fn new() -> Self {
        Self {
            prefix: "VERDICT_",
            errors: Vec::new(),
        }
    }

    /// Get all accumulated errors.
    pub fn errors(&self) -> &[EnvError] {
        &self.errors
    }

    /// Take ownership of errors.
    pub fn take_errors(&mut self) -> Vec<EnvError> {
        std::mem::take(&mut self.errors)
    }

    fn var_name(&self, name: &str) -> String {
        format!("{}{}", self.prefix, name)
    }

    /// Get a boolean value with default.
    ///
    /// Accepts: 1, true, yes, on (for true)
    ///          0, false, no, off, "" (for false)
    pub fn get_bool(&mut self, name: &str, default: bool) -> bool {
        let var_name = self.var_name(name);
        let Ok(value) = env::var(&var_name) else {
            return default;
        };
        match value.to_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => true,
            "0" | "false" | "no" | "off" | "" => false,
            _ => {
                self.errors.push(EnvError::InvalidValue {
                    var: var_name,
                    expected: "boolean (true/false/1/0/yes/no)".to_string(),
                    value,
                });
                default
            }
        }
    }

    /// Get a duration in humantime format (`500ms`, `30s`, `2m`).
    pub fn get_duration(&mut self, name: &str, default: Duration) -> Duration {
        let var_name = self.var_name(name);
        let Ok(value) = env::var(&var_name) else {
            return default;
        };
        match humantime::parse_duration(value.trim()) {
            Ok(duration) => duration,
            Err(_) => {
                self.errors.push(EnvError::InvalidDuration {
                    var: var_name,
                    value,
                });
                default
            }
        }
    }

    /// Get a tracing level name.
    pub fn get_log_level(&mut self, name: &str, default: &str) -> String {
        let var_name = self.var_name(name);
        let Ok(value) = env::var(&var_name) else {
            return default.to_string();
        };
        let lower = value.to_lowercase();
        match lower.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" | "off" => lower,
            _ => {
                self.errors.push(EnvError::InvalidLogLevel {
                    var: var_name,
                    value,
                });
                default.to_string()
            }
        }
    }
}

/// Resolved configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub run_timeout: Duration,
    pub keep_temp: bool,
    pub log_level: String,
    pub log_json: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            run_timeout: Duration::from_secs(30),
            keep_temp: false,
            log_level: "info".to_string(),
            log_json: false,
        }
    }
}

impl Settings {
    /// Parse settings, returning any invalid variables alongside the
    /// defaults that replaced them.
    pub fn parse_env() -> (Self, Vec<EnvError>) {
        let defaults = Self::default();
        let mut parser = EnvParser::new();
        let settings = Self {
            run_timeout: parser.get_duration("RUN_TIMEOUT", defaults.run_timeout),
            keep_temp: parser.get_bool("KEEP_TEMP", defaults.keep_temp),
            log_level: parser.get_log_level("LOG_LEVEL", &defaults.log_level),
            log_json: parser.get_bool("LOG_JSON", defaults.log_json),
        };
        (settings, parser.take_errors())
    }

    /// Parse settings, logging invalid variables as warnings.
    pub fn from_env() -> Self {
        let (settings, errors) = Self::parse_env();
        for err in &errors {
            warn!(error = %err, "Ignoring invalid configuration");
        }
        settings
    }
}

#[cfg(test)]
pub(crate) fn env_test_lock() -> std::sync::MutexGuard<'static, ()> {
    use std::sync::{Mutex, OnceLock};

    static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();
    ENV_LOCK
        .get_or_init(|| Mutex::new(()))
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[cfg(test)]
#[allow(unsafe_code)]
mod tests {
    use super::*;

    // SAFETY for all set_var/remove_var calls below: tests touching the
    // environment are serialized via env_test_lock.
    fn set_env(key: &str, value: &str) {
        unsafe { env::set_var(key, value) };
    }

    fn clear_env(keys: &[&str]) {
        for key in keys {
            unsafe { env::remove_var(key) };
        }
    }

    const KEYS: [&str; 4] = [
        "VERDICT_RUN_TIMEOUT",
        "VERDICT_KEEP_TEMP",
        "VERDICT_LOG_LEVEL",
        "VERDICT_LOG_JSON",
    ];

    #[test]
    fn test_defaults_without_env() {
        let _lock = env_test_lock();
        clear_env(&KEYS);

        let (settings, errors) = Settings::parse_env();
        assert_eq!(settings, Settings::default());
        assert!(errors.is_empty());
    }

    #[test]
    fn test_reads_valid_values() {
        let _lock = env_test_lock();
        set_env("VERDICT_RUN_TIMEOUT", "1m 30s");
        set_env("VERDICT_KEEP_TEMP", "yes");
        set_env("VERDICT_LOG_LEVEL", "DEBUG");
        set_env("VERDICT_LOG_JSON", "1");

        let (settings, errors) = Settings::parse_env();
        clear_env(&KEYS);

        assert!(errors.is_empty());
        assert!(settings.log_json);
        assert_eq!(settings.run_timeout, Duration::from_secs(90));
        assert!(settings.keep_temp);
        assert_eq!(settings.log_level, "debug");
    }

    #[test]
    fn test_invalid_values_fall_back_and_are_reported() {
        let _lock = env_test_lock();
        set_env("VERDICT_RUN_TIMEOUT", "soon");
        set_env("VERDICT_KEEP_TEMP", "maybe");
        set_env("VERDICT_LOG_LEVEL", "loud");

        let (settings, errors) = Settings::parse_env();
        clear_env(&KEYS);

        assert_eq!(settings, Settings::default());
        assert_eq!(errors.len(), 3);
        assert!(matches!(errors[0], EnvError::InvalidDuration { .. }));
        assert!(matches!(errors[1], EnvError::InvalidValue { .. }));
        assert!(matches!(errors[2], EnvError::InvalidLogLevel { .. }));
        assert!(errors[1].to_string().contains("VERDICT_KEEP_TEMP"));
    }
}
