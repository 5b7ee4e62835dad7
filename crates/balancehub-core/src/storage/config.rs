//! TOML-based application configuration.
//!
//! Stores user preferences including:
//! - Balance limits checked by the conflict detector
//! - Protected (no-zone) rules and their expansion horizon
//! - Mentor match limit
//! - Optional chatbot seed
//!
//! Configuration is stored at `~/.config/balancehub/config.toml`.

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::data_dir;
use crate::balance::BalancePreferences;
use crate::error::{ConfigError, Result};
use crate::mentoring::DEFAULT_MAX_MATCHES;
use crate::schedule::{ProtectedTimeRule, DEFAULT_HORIZON_WEEKS};

/// Protected-time configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProtectionConfig {
    #[serde(default = "default_horizon_weeks")]
    pub horizon_weeks: u32,
    #[serde(default = "default_rules")]
    pub rules: Vec<ProtectedTimeRule>,
}

/// Mentor matching configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchingConfig {
    #[serde(default = "default_max_matches")]
    pub max_matches: usize,
}

/// Chatbot configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChatbotConfig {
    /// Fixed seed for nudge selection; random when unset.
    #[serde(default)]
    pub seed: Option<u64>,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/balancehub/config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub balance: BalancePreferences,
    #[serde(default)]
    pub protection: ProtectionConfig,
    #[serde(default)]
    pub matching: MatchingConfig,
    #[serde(default)]
    pub chatbot: ChatbotConfig,
}

// Default functions
fn default_horizon_weeks() -> u32 {
    DEFAULT_HORIZON_WEEKS
}
fn default_max_matches() -> usize {
    DEFAULT_MAX_MATCHES
}

fn hm(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).unwrap_or_default()
}

/// Monday lunch and Friday evening.
fn default_rules() -> Vec<ProtectedTimeRule> {
    vec![
        ProtectedTimeRule {
            id: "1".into(),
            day_of_week: 1,
            start: hm(12, 0),
            end: hm(13, 0),
            recurring: true,
        },
        ProtectedTimeRule {
            id: "2".into(),
            day_of_week: 5,
            start: hm(16, 0),
            end: hm(23, 59),
            recurring: true,
        },
    ]
}

impl Default for ProtectionConfig {
    fn default() -> Self {
        Self {
            horizon_weeks: default_horizon_weeks(),
            rules: default_rules(),
        }
    }
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            max_matches: default_max_matches(),
        }
    }
}

impl Config {
    fn get_json_value_by_path<'a>(
        root: &'a serde_json::Value,
        key: &str,
    ) -> Option<&'a serde_json::Value> {
        if key.is_empty() {
            return None;
        }

        let mut current = root;
        for part in key.split('.') {
            current = current.get(part)?;
        }
        Some(current)
    }

    fn set_json_value_by_path(
        root: &mut serde_json::Value,
        key: &str,
        value: &str,
    ) -> Result<(), ConfigError> {
        let unknown = || ConfigError::UnknownKey(key.to_string());
        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };

        let mut parts = key.split('.').peekable();
        if parts.peek().map_or(true, |p| p.is_empty()) {
            return Err(unknown());
        }

        let mut current = root;
        while let Some(part) = parts.next() {
            let is_leaf = parts.peek().is_none();
            if is_leaf {
                let obj = current.as_object_mut().ok_or_else(unknown)?;
                let existing = obj.get(part).ok_or_else(unknown)?;

                let new_value = match existing {
                    serde_json::Value::Bool(_) => serde_json::Value::Bool(
                        value
                            .parse::<bool>()
                            .map_err(|_| invalid(format!("cannot parse '{value}' as bool")))?,
                    ),
                    serde_json::Value::Number(_) => {
                        if let Ok(n) = value.parse::<u64>() {
                            serde_json::Value::Number(n.into())
                        } else if let Ok(n) = value.parse::<f64>() {
                            serde_json::Number::from_f64(n)
                                .map(serde_json::Value::Number)
                                .ok_or_else(|| invalid(format!("cannot parse '{value}' as number")))?
                        } else {
                            return Err(invalid(format!("cannot parse '{value}' as number")));
                        }
                    }
                    serde_json::Value::Object(_) | serde_json::Value::Array(_) => {
                        serde_json::from_str(value).map_err(|e| invalid(e.to_string()))?
                    }
                    // Unset optional: take JSON if it parses, else a plain string.
                    serde_json::Value::Null => serde_json::from_str(value)
                        .unwrap_or_else(|_| serde_json::Value::String(value.into())),
                    _ => serde_json::Value::String(value.into()),
                };

                obj.insert(part.to_string(), new_value);
                return Ok(());
            }

            current = current.get_mut(part).ok_or_else(unknown)?;
        }

        Err(unknown())
    }

    /// Default location of the config file.
    pub fn path() -> Result<PathBuf> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load from the default location, writing defaults when missing.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::path()?)
    }

    /// Load from `path`, writing defaults there when it does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed,
    /// holds invalid preferences, or defaults cannot be written.
    pub fn load_from(path: &Path) -> Result<Self> {
        let load_failed = |message: String| ConfigError::LoadFailed {
            path: path.to_path_buf(),
            message,
        };

        match std::fs::read_to_string(path) {
            Ok(content) => {
                let cfg: Config = toml::from_str(&content).map_err(|e| load_failed(e.to_string()))?;
                cfg.validate()?;
                Ok(cfg)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!(path = %path.display(), "writing default configuration");
                let cfg = Self::default();
                cfg.save_to(path)?;
                Ok(cfg)
            }
            Err(e) => Err(load_failed(e.to_string()).into()),
        }
    }

    /// Persist to the default location.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        let save_failed = |message: String| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message,
        };
        let content = toml::to_string_pretty(self).map_err(|e| save_failed(e.to_string()))?;
        std::fs::write(path, content).map_err(|e| save_failed(e.to_string()))?;
        Ok(())
    }

    /// Reject preferences and rules the detector cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |key: &str, err: crate::error::ValidationError| ConfigError::InvalidValue {
            key: key.to_string(),
            message: err.to_string(),
        };
        self.balance.validate().map_err(|e| invalid("balance", e))?;
        for rule in &self.protection.rules {
            rule.validate().map_err(|e| invalid("protection.rules", e))?;
        }
        // TOML integers are signed 64-bit.
        if let Some(seed) = self.chatbot.seed {
            if i64::try_from(seed).is_err() {
                return Err(ConfigError::InvalidValue {
                    key: "chatbot.seed".to_string(),
                    message: format!("{seed} does not fit in a TOML integer"),
                });
            }
        }
        Ok(())
    }

    /// Get a config value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let val = Self::get_json_value_by_path(&json, key)?;
        match val {
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Update a value in memory. The value is parsed according to the
    /// type already stored under `key`.
    pub fn set_value(&mut self, key: &str, value: &str) -> Result<()> {
        let mut json = serde_json::to_value(&*self)?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        let updated: Config = serde_json::from_value(json).map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        updated.validate()?;
        *self = updated;
        Ok(())
    }

    /// Set a value by key and save to the default location.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.set_value(key, value)?;
        self.save()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_roundtrip() {
        let cfg = Config::default();
        let toml_str = toml::to_string_pretty(&cfg).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed, cfg);
        assert_eq!(parsed.protection.rules.len(), 2);
    }

    #[test]
    fn get_supports_dot_path_keys() {
        let cfg = Config::default();
        assert_eq!(cfg.get("balance.max_events_per_day").as_deref(), Some("5"));
        assert_eq!(cfg.get("balance.work_hours.start").as_deref(), Some("09:00"));
        assert_eq!(cfg.get("protection.horizon_weeks").as_deref(), Some("8"));
        assert!(cfg.get("balance.missing_key").is_none());
        assert!(cfg.get("").is_none());
    }

    #[test]
    fn set_value_updates_numbers() {
        let mut cfg = Config::default();
        cfg.set_value("balance.min_break_minutes", "20").unwrap();
        assert_eq!(cfg.balance.min_break_minutes, 20.0);
        cfg.set_value("balance.max_consecutive_work_hours", "2.5").unwrap();
        assert_eq!(cfg.balance.max_consecutive_work_hours, 2.5);
    }

    #[test]
    fn set_value_fills_unset_option() {
        let mut cfg = Config::default();
        cfg.set_value("chatbot.seed", "42").unwrap();
        assert_eq!(cfg.chatbot.seed, Some(42));
    }

    #[test]
    fn set_value_rejects_unknown_key() {
        let mut cfg = Config::default();
        let err = cfg.set_value("balance.nonexistent", "1").unwrap_err();
        assert!(matches!(err, crate::CoreError::Config(ConfigError::UnknownKey(_))));
    }

    #[test]
    fn set_value_rejects_invalid_preferences() {
        let mut cfg = Config::default();
        assert!(cfg.set_value("balance.max_events_per_day", "0").is_err());
        assert_eq!(cfg.balance.max_events_per_day, 5);
        assert!(cfg.set_value("balance.max_events_per_day", "many").is_err());
    }

    #[test]
    fn set_value_rejects_seed_toml_cannot_store() {
        let mut cfg = Config::default();
        let too_big = (i64::MAX as u64 + 1).to_string();
        let err = cfg.set_value("chatbot.seed", &too_big).unwrap_err();
        assert!(matches!(err, crate::CoreError::Config(ConfigError::InvalidValue { .. })));
        assert_eq!(cfg.chatbot.seed, None);

        cfg.set_value("chatbot.seed", &i64::MAX.to_string()).unwrap();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        cfg.save_to(&path).unwrap();
        assert_eq!(Config::load_from(&path).unwrap().chatbot.seed, Some(i64::MAX as u64));
    }

    #[test]
    fn load_from_missing_file_writes_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let cfg = Config::load_from(&path).unwrap();
        assert_eq!(cfg, Config::default());
        assert!(path.exists());
    }

    #[test]
    fn load_from_partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[balance]\nmax_events_per_day = 7\n").unwrap();
        let cfg = Config::load_from(&path).unwrap();
        assert_eq!(cfg.balance.max_events_per_day, 7);
        assert_eq!(cfg.protection.horizon_weeks, 8);
    }

    #[test]
    fn load_from_rejects_garbage() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "balance = [").unwrap();
        assert!(Config::load_from(&path).is_err());
    }
}
