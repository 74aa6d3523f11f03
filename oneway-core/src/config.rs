//! Store configuration and action log filtering
//!
//! A store needs nothing but its reducer to work. [`StoreConfig`] only
//! controls how the store reports itself through `tracing`: the name attached
//! to every event and which action names get a `debug` line per dispatch.
//!
//! # Example
//!
//! ```
//! use oneway_core::config::{ActionLogFilter, StoreConfig};
//!
//! let config = StoreConfig::from_json_str(r#"{ "name": "counter", "log": { "exclude": ["@@*"] } }"#)
//!     .unwrap();
//! assert_eq!(config.name, "counter");
//! assert!(!config.log.should_log("@@INIT"));
//! assert!(config.log.should_log("INCREASE_COUNT"));
//!
//! let filter = ActionLogFilter::new(Some("INCREASE_*"), None);
//! assert!(filter.should_log("INCREASE_COUNT"));
//! assert!(!filter.should_log("@@INIT"));
//! ```

use serde::Deserialize;
use thiserror::Error;

/// Default store name used in log fields
pub const DEFAULT_STORE_NAME: &str = "store";

/// Errors raised while loading a [`StoreConfig`]
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid store config: {0}")]
    Json(#[from] serde_json::Error),
    #[error("store name must not be empty")]
    EmptyName,
}

/// Configuration for a [`Store`](crate::Store)
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Name attached to every tracing event emitted by the store
    pub name: String,
    /// Which dispatched actions are logged
    pub log: ActionLogFilter,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            name: DEFAULT_STORE_NAME.to_string(),
            log: ActionLogFilter::default(),
        }
    }
}

impl StoreConfig {
    /// Create a config with the given store name and default log filter
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Replace the log filter
    pub fn with_log(mut self, log: ActionLogFilter) -> Self {
        self.log = log;
        self
    }

    /// Parse a config from JSON. Missing fields take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        if config.name.trim().is_empty() {
            return Err(ConfigError::EmptyName);
        }
        Ok(config)
    }
}

/// Include/exclude glob patterns over action names.
///
/// Patterns support `*` (any run of characters) and `?` (one character);
/// everything else matches literally.
///
/// - `INCREASE_*` matches INCREASE_COUNT, INCREASE_STEP
/// - `@@*` matches the reserved bootstrap action
/// - `RESET` matches only RESET
///
/// The default filter logs every action.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ActionLogFilter {
    /// If non-empty, only actions matching one of these are logged
    pub include: Vec<String>,
    /// Actions matching any of these are not logged (applied after include)
    pub exclude: Vec<String>,
}

impl ActionLogFilter {
    /// Build a filter from comma-separated pattern lists
    ///
    /// `None` for include means "everything"; `None` for exclude means
    /// "nothing excluded".
    pub fn new(include: Option<&str>, exclude: Option<&str>) -> Self {
        Self {
            include: include.map(split_patterns).unwrap_or_default(),
            exclude: exclude.map(split_patterns).unwrap_or_default(),
        }
    }

    /// A filter that logs every action, same as `default()`
    pub fn all() -> Self {
        Self::default()
    }

    /// A filter that logs nothing
    pub fn none() -> Self {
        Self {
            include: Vec::new(),
            exclude: vec!["*".to_string()],
        }
    }

    /// Check whether an action name passes the filter
    pub fn should_log(&self, action_name: &str) -> bool {
        if !self.include.is_empty() && !self.include.iter().any(|p| glob_match(p, action_name)) {
            return false;
        }
        !self.exclude.iter().any(|p| glob_match(p, action_name))
    }
}

fn split_patterns(list: &str) -> Vec<String> {
    list.split(',')
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(str::to_string)
        .collect()
}

/// Match `text` against a glob `pattern` supporting `*` and `?`
pub fn glob_match(pattern: &str, text: &str) -> bool {
    let pattern: Vec<char> = pattern.chars().collect();
    let text: Vec<char> = text.chars().collect();

    let (mut p, mut t) = (0, 0);
    // Position of the last `*` seen and the text index it is currently absorbing up to
    let mut backtrack: Option<(usize, usize)> = None;

    while t < text.len() {
        match pattern.get(p) {
            Some('*') => {
                backtrack = Some((p, t));
                p += 1;
            }
            Some(&c) if c == '?' || c == text[t] => {
                p += 1;
                t += 1;
            }
            _ => match backtrack {
                Some((star, absorbed)) => {
                    p = star + 1;
                    t = absorbed + 1;
                    backtrack = Some((star, t));
                }
                None => return false,
            },
        }
    }

    pattern[p..].iter().all(|&c| c == '*')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_glob_match_literal() {
        assert!(glob_match("RESET", "RESET"));
        assert!(!glob_match("RESET", "RESEND"));
        assert!(!glob_match("RESET", "RESET_COUNT"));
        assert!(!glob_match("", "RESET"));
        assert!(glob_match("", ""));
    }

    #[test]
    fn test_glob_match_wildcards() {
        assert!(glob_match("INCREASE_*", "INCREASE_COUNT"));
        assert!(glob_match("INCREASE_*", "INCREASE_"));
        assert!(glob_match("*COUNT", "INCREASE_COUNT"));
        assert!(glob_match("*EA*", "INCREASE_COUNT"));
        assert!(glob_match("@@????", "@@INIT"));
        assert!(!glob_match("@@???", "@@INIT"));
        assert!(glob_match("*", ""));
        assert!(glob_match("a*b*c", "aXXbYYc"));
        assert!(!glob_match("a*b*c", "aXXbYY"));
    }

    #[test]
    fn test_filter_default_logs_everything() {
        let filter = ActionLogFilter::default();
        assert!(filter.should_log("INCREASE_COUNT"));
        assert!(filter.should_log("@@INIT"));
        assert!(filter.should_log("UNKNOWN"));
        assert_eq!(filter, ActionLogFilter::all());
        assert_eq!(ActionLogFilter::new(None, None), ActionLogFilter::all());
    }

    #[test]
    fn test_filter_include_then_exclude() {
        let filter = ActionLogFilter::new(Some("INCREASE_*, @@INIT"), Some("*STEP"));
        assert!(filter.should_log("INCREASE_COUNT"));
        assert!(filter.should_log("@@INIT"));
        assert!(!filter.should_log("INCREASE_STEP"));
        assert!(!filter.should_log("DECREASE_COUNT"));
    }

    #[test]
    fn test_filter_all_and_none() {
        assert!(ActionLogFilter::all().should_log("RESET"));
        assert!(!ActionLogFilter::none().should_log("INCREASE_COUNT"));
    }

    #[test]
    fn test_split_patterns_skips_blanks() {
        let filter = ActionLogFilter::new(Some(" A ,, B,"), Some(""));
        assert_eq!(filter.include, vec!["A".to_string(), "B".to_string()]);
        assert!(filter.exclude.is_empty());
    }

    #[test]
    fn test_config_defaults_from_empty_json() {
        let config = StoreConfig::from_json_str("{}").unwrap();
        assert_eq!(config.name, DEFAULT_STORE_NAME);
        assert_eq!(config.log, ActionLogFilter::default());
    }

    #[test]
    fn test_config_rejects_bad_input() {
        assert!(matches!(
            StoreConfig::from_json_str("{ \"name\": 3 }"),
            Err(ConfigError::Json(_))
        ));
        assert!(matches!(
            StoreConfig::from_json_str("{ \"name\": \"  \" }"),
            Err(ConfigError::EmptyName)
        ));
    }

    #[test]
    fn test_config_builders() {
        let config = StoreConfig::named("counter").with_log(ActionLogFilter::all());
        assert_eq!(config.name, "counter");
        assert!(config.log.should_log("RESET"));
    }
}
