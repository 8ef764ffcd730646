//! TOML interval definitions.
//!
//! ```toml
//! [defaults]
//! include_start = true
//! include_end = false
//!
//! [intervals.post_unpublished]
//! entity = "Post"
//! start = "created"
//! end = "publish"
//! ```
//!
//! `start`/`end` name entity fields; an omitted side is unbounded. Per-interval
//! `include_start`/`include_end` override `[defaults]`.

mod error;

#[cfg(test)]
mod tests;

pub use error::ConfigError;

use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, fs, path::Path};

///
/// Config
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub defaults: Defaults,

    #[serde(default)]
    pub intervals: BTreeMap<String, IntervalDef>,
}

impl Config {
    /// Parse and validate.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;

        Ok(config)
    }

    /// Read, parse and validate the file at `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        Self::from_toml_str(&text)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, def) in &self.intervals {
            if name.trim().is_empty() {
                return Err(ConfigError::invalid("interval name must not be empty"));
            }
            def.validate(name)?;
        }

        Ok(())
    }

    /// Definition `name` with its bounds resolved against `[defaults]`.
    #[must_use]
    pub fn interval(&self, name: &str) -> Option<ResolvedInterval<'_>> {
        self.intervals
            .get_key_value(name)
            .map(|(name, def)| def.resolve(name, &self.defaults))
    }

    /// Every definition, resolved, in name order.
    pub fn resolved(&self) -> impl Iterator<Item = ResolvedInterval<'_>> {
        self.intervals
            .iter()
            .map(|(name, def)| def.resolve(name, &self.defaults))
    }
}

///
/// Defaults
/// fallback inclusivity; both ends included unless configured
///

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct Defaults {
    pub include_start: bool,
    pub include_end: bool,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            include_start: true,
            include_end: true,
        }
    }
}

///
/// IntervalDef
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(deny_unknown_fields)]
pub struct IntervalDef {
    pub entity: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub include_start: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub include_end: Option<bool>,
}

impl IntervalDef {
    fn validate(&self, name: &str) -> Result<(), ConfigError> {
        if self.entity.trim().is_empty() {
            return Err(ConfigError::invalid(format!(
                "interval '{name}': entity must not be empty"
            )));
        }

        for (side, field) in [("start", &self.start), ("end", &self.end)] {
            if field.as_deref().is_some_and(|f| f.trim().is_empty()) {
                return Err(ConfigError::invalid(format!(
                    "interval '{name}': {side} field must not be empty"
                )));
            }
        }

        if self.start.is_none() && self.end.is_none() {
            return Err(ConfigError::invalid(format!(
                "interval '{name}': at least one of start or end is required"
            )));
        }

        Ok(())
    }

    fn resolve<'a>(&'a self, name: &'a str, defaults: &Defaults) -> ResolvedInterval<'a> {
        ResolvedInterval {
            name,
            entity: &self.entity,
            start: self.start.as_deref(),
            end: self.end.as_deref(),
            include_start: self.include_start.unwrap_or(defaults.include_start),
            include_end: self.include_end.unwrap_or(defaults.include_end),
        }
    }
}

///
/// ResolvedInterval
/// one definition with defaults applied
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ResolvedInterval<'a> {
    pub name: &'a str,
    pub entity: &'a str,
    pub start: Option<&'a str>,
    pub end: Option<&'a str>,
    pub include_start: bool,
    pub include_end: bool,
}
