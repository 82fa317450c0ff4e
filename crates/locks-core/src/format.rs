//! Explicit date and time rendering profiles.
//!
//! The report never consults the process locale. Callers pick a
//! [`FormatProfile`] and pass it down.

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error for unrecognized locale or style names.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    #[error("unknown locale: {0} (expected de-CH, en-US or iso)")]
    UnknownLocale(String),
    #[error("unknown style: {0} (expected short or medium)")]
    UnknownStyle(String),
}

/// Locale conventions supported by the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Locale {
    /// Swiss German, e.g. `02.08.21 10:00`.
    #[default]
    #[serde(rename = "de-CH")]
    DeCh,
    /// US English, e.g. `8/2/21 10:00 AM`.
    #[serde(rename = "en-US")]
    EnUs,
    /// ISO 8601, e.g. `2021-08-02 10:00`.
    #[serde(rename = "iso")]
    Iso,
}

impl Locale {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::DeCh => "de-CH",
            Self::EnUs => "en-US",
            Self::Iso => "iso",
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Locale {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace('_', "-").as_str() {
            "de-ch" => Ok(Self::DeCh),
            "en-us" => Ok(Self::EnUs),
            "iso" => Ok(Self::Iso),
            _ => Err(FormatError::UnknownLocale(s.to_string())),
        }
    }
}

/// Length of a rendered date or time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Style {
    #[default]
    Short,
    Medium,
}

impl Style {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Short => "short",
            Self::Medium => "medium",
        }
    }
}

impl fmt::Display for Style {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Style {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "short" => Ok(Self::Short),
            "medium" => Ok(Self::Medium),
            _ => Err(FormatError::UnknownStyle(s.to_string())),
        }
    }
}

/// Locale plus date and time styles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FormatProfile {
    pub locale: Locale,
    pub date_style: Style,
    pub time_style: Style,
}

impl FormatProfile {
    pub const fn new(locale: Locale, date_style: Style, time_style: Style) -> Self {
        Self {
            locale,
            date_style,
            time_style,
        }
    }

    const fn date_pattern(&self) -> &'static str {
        match (self.locale, self.date_style) {
            (Locale::DeCh, Style::Short) => "%d.%m.%y",
            (Locale::DeCh, Style::Medium) => "%d.%m.%Y",
            (Locale::EnUs, Style::Short) => "%-m/%-d/%y",
            (Locale::EnUs, Style::Medium) => "%b %-d, %Y",
            (Locale::Iso, _) => "%Y-%m-%d",
        }
    }

    const fn time_pattern(&self) -> &'static str {
        match (self.locale, self.time_style) {
            (Locale::DeCh | Locale::Iso, Style::Short) => "%H:%M",
            (Locale::DeCh | Locale::Iso, Style::Medium) => "%H:%M:%S",
            (Locale::EnUs, Style::Short) => "%-I:%M %p",
            (Locale::EnUs, Style::Medium) => "%-I:%M:%S %p",
        }
    }

    pub fn date(&self, day: NaiveDate) -> String {
        day.format(self.date_pattern()).to_string()
    }

    pub fn time(&self, at: NaiveDateTime) -> String {
        at.format(self.time_pattern()).to_string()
    }
}
