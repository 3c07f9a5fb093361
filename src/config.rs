use std::env;
use std::str::FromStr;

use thiserror::Error;

use crate::pagination::PageLimits;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {value:?}")]
    Invalid { key: &'static str, value: String },
    #[error("{key} must be greater than zero")]
    Zero { key: &'static str },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogConfig {
    /// Channel capacity of each store task.
    pub buffer_size: usize,
    pub page_limits: PageLimits,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            buffer_size: 32,
            page_limits: PageLimits::default(),
        }
    }
}

impl CatalogConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from any key/value source, falling back to
    /// the defaults for absent keys.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let buffer_size = read(&lookup, "CATALOG_BUFFER_SIZE", defaults.buffer_size)?;
        let default_size = read(&lookup, "CATALOG_DEFAULT_PAGE_SIZE", defaults.page_limits.default_size)?;
        let max_size = read(&lookup, "CATALOG_MAX_PAGE_SIZE", defaults.page_limits.max_size)?;

        Ok(Self {
            buffer_size,
            page_limits: PageLimits {
                default_size: default_size.min(max_size),
                max_size,
            },
        })
    }
}

fn read<T>(lookup: &impl Fn(&str) -> Option<String>, key: &'static str, default: T) -> Result<T, ConfigError>
where
    T: FromStr + PartialEq + Default,
{
    let value = match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { key, value: raw.clone() })?,
        None => return Ok(default),
    };
    if value == T::default() {
        return Err(ConfigError::Zero { key });
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_nothing_is_set() {
        let config = CatalogConfig::from_lookup(lookup(&[])).unwrap();

        assert_eq!(config, CatalogConfig::default());
    }

    #[test]
    fn test_values_are_read() {
        let config = CatalogConfig::from_lookup(lookup(&[
            ("CATALOG_BUFFER_SIZE", "8"),
            ("CATALOG_DEFAULT_PAGE_SIZE", " 20 "),
            ("CATALOG_MAX_PAGE_SIZE", "40"),
        ]))
        .unwrap();

        assert_eq!(config.buffer_size, 8);
        assert_eq!(config.page_limits, PageLimits { default_size: 20, max_size: 40 });
    }

    #[test]
    fn test_default_page_size_is_capped_by_max() {
        let config = CatalogConfig::from_lookup(lookup(&[("CATALOG_MAX_PAGE_SIZE", "5")])).unwrap();

        assert_eq!(config.page_limits.default_size, 5);
    }

    #[test]
    fn test_invalid_values_are_reported() {
        let result = CatalogConfig::from_lookup(lookup(&[("CATALOG_BUFFER_SIZE", "many")]));

        assert_eq!(
            result,
            Err(ConfigError::Invalid { key: "CATALOG_BUFFER_SIZE", value: "many".to_string() })
        );
    }

    #[test]
    fn test_zero_is_rejected() {
        let result = CatalogConfig::from_lookup(lookup(&[("CATALOG_MAX_PAGE_SIZE", "0")]));

        assert_eq!(result, Err(ConfigError::Zero { key: "CATALOG_MAX_PAGE_SIZE" }));
    }
}
