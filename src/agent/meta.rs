//! Free-form `key=value` player properties.
//!
//! Arguments are whitespace-separated pairs; a later pair overrides an earlier one. A token
//! without `=` becomes a flag whose value is the token itself, so `weak` reads back as
//! `weak=weak`.

use crate::agent::ConfigError;
use std::collections::BTreeMap;
use std::fmt;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Meta {
    entries: BTreeMap<String, String>,
}

fn split_pair(pair: &str) -> (&str, &str) {
    match pair.split_once('=') {
        Some((key, value)) => (key, value),
        None => (pair, pair),
    }
}

impl Meta {
    pub fn parse(args: &str) -> Self {
        let mut meta = Meta::default();
        meta.extend(args);
        meta
    }

    pub fn extend(&mut self, args: &str) {
        for pair in args.split_whitespace() {
            let (key, value) = split_pair(pair);
            self.set(key, value);
        }
    }

    /// Applies a single `key=value` message.
    pub fn notify(&mut self, message: &str) {
        let (key, value) = split_pair(message.trim());
        self.set(key, value);
    }

    pub fn set(&mut self, key: &str, value: &str) {
        self.entries.insert(key.to_string(), value.to_string());
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn property(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Numeric value of `key`, parsed as a float so that `N=1e4` is accepted.
    pub fn number(&self, key: &str) -> Result<f64, ConfigError> {
        let value = self
            .property(key)
            .ok_or_else(|| ConfigError::MissingKey(key.to_string()))?;
        value
            .parse::<f64>()
            .ok()
            .filter(|number| number.is_finite())
            .ok_or_else(|| ConfigError::InvalidValue {
                key: key.to_string(),
                value: value.to_string(),
            })
    }

    /// Non-negative integer value of `key`. Plain integers are read exactly; other numeric
    /// forms such as `1e4` or `12.9` go through `f64` and are truncated.
    pub fn count(&self, key: &str) -> Result<u64, ConfigError> {
        if let Some(exact) = self.property(key).and_then(|value| value.parse::<u64>().ok()) {
            return Ok(exact);
        }
        let number = self.number(key)?;
        if number < 0.0 {
            return Err(ConfigError::InvalidValue {
                key: key.to_string(),
                value: number.to_string(),
            });
        }
        Ok(number as u64)
    }
}

impl fmt::Display for Meta {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (key, value) in &self.entries {
            if !first {
                write!(f, " ")?;
            }
            write!(f, "{}={}", key, value)?;
            first = false;
        }
        Ok(())
    }
}
