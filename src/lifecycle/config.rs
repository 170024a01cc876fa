//! Runner configuration.
//!
//! | variable | default | meaning |
//! |---|---|---|
//! | `FUNCTION_CHANNEL_CAPACITY` | `32` | requests queued before callers wait |
//! | `FUNCTION_TTL_SECONDS` | `60` | cache TTL advertised on responses |
//! | `RUST_LOG` | `info` | tracing filter directives |

use crate::sdk::response::DEFAULT_TTL;
use std::time::Duration;
use thiserror::Error;

pub const CHANNEL_CAPACITY_VAR: &str = "FUNCTION_CHANNEL_CAPACITY";
pub const TTL_SECONDS_VAR: &str = "FUNCTION_TTL_SECONDS";
pub const LOG_FILTER_VAR: &str = "RUST_LOG";

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("invalid value {value:?} for {var}: {reason}")]
    InvalidValue {
        var: &'static str,
        value: String,
        reason: String,
    },
    #[error("invalid log filter {filter:?}: {reason}")]
    LogFilter { filter: String, reason: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct RunnerConfig {
    pub channel_capacity: usize,
    pub ttl: Duration,
    pub log_filter: String,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            channel_capacity: 32,
            ttl: DEFAULT_TTL,
            log_filter: "info".to_string(),
        }
    }
}

impl RunnerConfig {
    /// Reads the configuration from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Reads the configuration through `lookup`; unset variables keep their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(value) = lookup(CHANNEL_CAPACITY_VAR) {
            let capacity: usize = parse(CHANNEL_CAPACITY_VAR, &value)?;
            if capacity == 0 {
                return Err(ConfigError::InvalidValue {
                    var: CHANNEL_CAPACITY_VAR,
                    value,
                    reason: "must be greater than zero".to_string(),
                });
            }
            config.channel_capacity = capacity;
        }
        if let Some(value) = lookup(TTL_SECONDS_VAR) {
            config.ttl = Duration::from_secs(parse(TTL_SECONDS_VAR, &value)?);
        }
        if let Some(value) = lookup(LOG_FILTER_VAR) {
            config.log_filter = value;
        }
        Ok(config)
    }
}

fn parse<T>(var: &'static str, value: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    value.trim().parse().map_err(|e: T::Err| ConfigError::InvalidValue {
        var,
        value: value.to_string(),
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |k| vars.get(k).cloned()
    }

    #[test]
    fn defaults_apply_when_unset() {
        let config = RunnerConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, RunnerConfig::default());
        assert_eq!(config.ttl, Duration::from_secs(60));
    }

    #[test]
    fn reads_overrides() {
        let config = RunnerConfig::from_lookup(lookup(&[
            (CHANNEL_CAPACITY_VAR, "8"),
            (TTL_SECONDS_VAR, " 120 "),
            (LOG_FILTER_VAR, "debug"),
        ]))
        .unwrap();
        assert_eq!(config.channel_capacity, 8);
        assert_eq!(config.ttl, Duration::from_secs(120));
        assert_eq!(config.log_filter, "debug");
    }

    #[test]
    fn rejects_bad_values() {
        let err = RunnerConfig::from_lookup(lookup(&[(TTL_SECONDS_VAR, "soon")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { var: TTL_SECONDS_VAR, .. }));

        let err = RunnerConfig::from_lookup(lookup(&[(CHANNEL_CAPACITY_VAR, "0")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { var: CHANNEL_CAPACITY_VAR, .. }));
    }
}
