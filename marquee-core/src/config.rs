//! Countdown configuration: tick cadence, local offset and per-locale copy.
use std::collections::BTreeMap;

use chrono::{FixedOffset, Offset, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::{
    DEFAULT_LOCALE, DEFAULT_TICK_MS, DEFAULT_UTC_OFFSET_MINUTES, MAX_UTC_OFFSET_MINUTES,
};
use crate::labels::LabelSet;
use crate::timestamp::offset_from_minutes;

const DEFAULT_COUNTDOWN_DATA: &str =
    include_str!("../../marquee-web/static/assets/data/countdown.json");

/// Errors raised when a countdown configuration is malformed.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("countdown config is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("tick_ms must be greater than zero")]
    ZeroTick,
    #[error("utc_offset_minutes must be within ±840 (got {0})")]
    OffsetOutOfRange(i32),
    #[error("default locale '{0}' has no label set")]
    MissingDefaultLocale(String),
    #[error("locale '{locale}' has an empty '{field}' template")]
    EmptyTemplate {
        locale: String,
        field: &'static str,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountdownConfig {
    #[serde(default = "CountdownConfig::default_tick_ms")]
    pub tick_ms: u32,
    #[serde(default = "CountdownConfig::default_offset")]
    pub utc_offset_minutes: i32,
    #[serde(default = "CountdownConfig::default_locale")]
    pub default_locale: String,
    #[serde(default = "CountdownConfig::builtin_locales")]
    pub locales: BTreeMap<String, LabelSet>,
}

impl CountdownConfig {
    const fn default_tick_ms() -> u32 {
        DEFAULT_TICK_MS
    }

    const fn default_offset() -> i32 {
        DEFAULT_UTC_OFFSET_MINUTES
    }

    fn default_locale() -> String {
        DEFAULT_LOCALE.to_string()
    }

    fn builtin_locales() -> BTreeMap<String, LabelSet> {
        BTreeMap::from([
            ("ko".to_string(), LabelSet::korean()),
            ("en".to_string(), LabelSet::english()),
        ])
    }

    /// Load countdown configuration from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON cannot be parsed or if validation fails.
    pub fn from_json(json_str: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json_str)?;
        config.validate()?;
        Ok(config)
    }

    /// Embedded configuration shipped with the web assets.
    #[must_use]
    pub fn default_config() -> Self {
        Self::from_json(DEFAULT_COUNTDOWN_DATA).unwrap_or_else(|err| {
            log::warn!("embedded countdown config rejected, using built-in labels: {err}");
            Self::builtin()
        })
    }

    /// Built-in Korean/English configuration, independent of any asset.
    #[must_use]
    pub fn builtin() -> Self {
        Self {
            tick_ms: Self::default_tick_ms(),
            utc_offset_minutes: Self::default_offset(),
            default_locale: Self::default_locale(),
            locales: Self::builtin_locales(),
        }
    }

    /// Check every invariant the phase clock relies on.
    ///
    /// # Errors
    ///
    /// Returns the first violated invariant.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tick_ms == 0 {
            return Err(ConfigError::ZeroTick);
        }
        if self.utc_offset_minutes.abs() > MAX_UTC_OFFSET_MINUTES {
            return Err(ConfigError::OffsetOutOfRange(self.utc_offset_minutes));
        }
        if !self.locales.contains_key(&self.default_locale) {
            return Err(ConfigError::MissingDefaultLocale(
                self.default_locale.clone(),
            ));
        }
        for (locale, labels) in &self.locales {
            if let Some(field) = labels.first_blank_field() {
                return Err(ConfigError::EmptyTemplate {
                    locale: locale.clone(),
                    field,
                });
            }
        }
        Ok(())
    }

    /// Configured local offset; out-of-range values fall back to UTC+9.
    #[must_use]
    pub fn offset(&self) -> FixedOffset {
        offset_from_minutes(self.utc_offset_minutes)
            .or_else(|| offset_from_minutes(DEFAULT_UTC_OFFSET_MINUTES))
            .unwrap_or_else(|| Utc.fix())
    }

    /// Labels for `locale`, else the default locale, else built-in Korean.
    ///
    /// Region subtags are ignored, so `ko-KR` resolves to `ko`.
    #[must_use]
    pub fn labels_for(&self, locale: &str) -> LabelSet {
        let primary = locale.split(['-', '_']).next().unwrap_or(locale);
        self.locales
            .get(locale)
            .or_else(|| self.locales.get(primary))
            .or_else(|| self.locales.get(&self.default_locale))
            .cloned()
            .unwrap_or_default()
    }
}

impl Default for CountdownConfig {
    fn default() -> Self {
        Self::builtin()
    }
}
