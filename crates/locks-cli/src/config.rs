//! Configuration loading and management.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, ensure};
use chrono::TimeDelta;
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use locks_core::{DEFAULT_GAP_THRESHOLD_MINUTES, FormatProfile, Locale, Style};
use serde::{Deserialize, Serialize};

/// Largest accepted gap threshold (1000 years).
const MAX_GAP_THRESHOLD_MINUTES: i64 = 1000 * 365 * 24 * 60;

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Locale used to render dates and times.
    pub locale: Locale,
    /// Style of the per-day date column.
    pub date_style: Style,
    /// Style of the session start and stop columns.
    pub time_style: Style,
    /// Sessions separated by less than this many minutes are merged.
    pub gap_threshold_minutes: i64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            locale: Locale::default(),
            date_style: Style::Short,
            time_style: Style::Short,
            gap_threshold_minutes: DEFAULT_GAP_THRESHOLD_MINUTES,
        }
    }
}

/// Values given on the command line, applied on top of every other source.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Overrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub locale: Option<Locale>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_style: Option<Style>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_style: Option<Style>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gap_threshold_minutes: Option<i64>,
}

impl Config {
    /// Loads configuration, optionally from a specific file.
    ///
    /// Sources in increasing priority: defaults, `<config dir>/locks/config.toml`,
    /// `config_path`, `LOCKS_*` environment variables, `overrides`.
    pub fn load_from(config_path: Option<&Path>, overrides: &Overrides) -> Result<Self> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Load from default config location
        if let Some(config_dir) = dirs_config_path() {
            figment = figment.merge(Toml::file(config_dir.join("config.toml")));
        }

        // Load from specified config file
        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        // Load from environment variables (LOCKS_*)
        figment = figment.merge(Env::prefixed("LOCKS_"));

        Self::from_figment(figment.merge(Serialized::defaults(overrides)))
    }

    fn from_figment(figment: Figment) -> Result<Self> {
        let config: Self = figment.extract().context("invalid configuration")?;
        ensure!(
            config.gap_threshold_minutes > 0,
            "gap_threshold_minutes must be positive, got {}",
            config.gap_threshold_minutes
        );
        ensure!(
            config.gap_threshold_minutes <= MAX_GAP_THRESHOLD_MINUTES,
            "gap_threshold_minutes must be at most {MAX_GAP_THRESHOLD_MINUTES}, got {}",
            config.gap_threshold_minutes
        );
        Ok(config)
    }

    pub const fn profile(&self) -> FormatProfile {
        FormatProfile::new(self.locale, self.date_style, self.time_style)
    }

    pub fn gap_threshold(&self) -> TimeDelta {
        TimeDelta::try_minutes(self.gap_threshold_minutes).unwrap_or(TimeDelta::MAX)
    }
}

/// Returns the platform-specific config directory for locks.
///
/// On Linux: `~/.config/locks`
fn dirs_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("locks"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn from_toml(toml: &str) -> Result<Config> {
        Config::from_figment(
            Figment::from(Serialized::defaults(Config::default())).merge(Toml::string(toml)),
        )
    }

    #[test]
    fn test_dirs_config_path_ends_with_locks() {
        let path = dirs_config_path().unwrap();
        assert_eq!(path.file_name().unwrap(), "locks");
    }

    #[test]
    fn test_default_config_is_swiss_short_with_fifteen_minutes() {
        let config = Config::default();
        assert_eq!(config.profile(), FormatProfile::default());
        assert_eq!(config.gap_threshold(), TimeDelta::minutes(15));
    }

    #[test]
    fn test_toml_overrides_defaults() {
        let config = from_toml(
            r#"
            locale = "en-US"
            time_style = "medium"
            gap_threshold_minutes = 30
            "#,
        )
        .unwrap();

        assert_eq!(config.locale, Locale::EnUs);
        assert_eq!(config.date_style, Style::Short);
        assert_eq!(config.time_style, Style::Medium);
        assert_eq!(config.gap_threshold_minutes, 30);
    }

    #[test]
    fn test_overrides_win_over_file() {
        let overrides = Overrides {
            locale: Some(Locale::Iso),
            gap_threshold_minutes: Some(5),
            ..Overrides::default()
        };
        let config = Config::from_figment(
            Figment::from(Serialized::defaults(Config::default()))
                .merge(Toml::string(r#"locale = "en-US""#))
                .merge(Serialized::defaults(&overrides)),
        )
        .unwrap();

        assert_eq!(config.locale, Locale::Iso);
        assert_eq!(config.gap_threshold_minutes, 5);
    }

    #[test]
    fn test_rejects_non_positive_threshold() {
        let err = from_toml("gap_threshold_minutes = 0").unwrap_err();
        assert!(err.to_string().contains("must be positive"), "{err}");
    }

    #[test]
    fn test_rejects_oversized_threshold() {
        let err = from_toml("gap_threshold_minutes = 9223372036854775807").unwrap_err();
        assert!(err.to_string().contains("must be at most"), "{err}");

        let config = from_toml(&format!(
            "gap_threshold_minutes = {MAX_GAP_THRESHOLD_MINUTES}"
        ))
        .unwrap();
        assert_eq!(
            config.gap_threshold(),
            TimeDelta::minutes(MAX_GAP_THRESHOLD_MINUTES)
        );
    }

    #[test]
    fn test_unvalidated_threshold_saturates() {
        let config = Config {
            gap_threshold_minutes: i64::MAX,
            ..Config::default()
        };
        assert_eq!(config.gap_threshold(), TimeDelta::MAX);
    }

    #[test]
    fn test_rejects_unknown_locale() {
        assert!(from_toml(r#"locale = "fr-FR""#).is_err());
    }
}
