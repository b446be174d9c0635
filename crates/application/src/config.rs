//! Application configuration loaded from environment variables.

use std::path::PathBuf;

use domain::{Currency, Locale};

/// Shop configuration with sensible defaults.
///
/// Reads from environment variables:
/// - `RUST_LOG`: tracing filter directive (default: `"info"`)
/// - `SHOP_LOCALE`: BCP-47 tag used to display prices (default: `"en-US"`)
/// - `SHOP_CURRENCY`: ISO 4217 code used to display prices (default: `"USD"`)
/// - `SHOP_SEED_FILE`: JSON file loaded into the stores at startup (optional)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub log_level: String,
    pub locale: Locale,
    pub currency: Currency,
    pub seed_file: Option<PathBuf>,
}

impl Config {
    /// Loads configuration from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Loads configuration from any key lookup. Unparseable values fall back
    /// to their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            log_level: lookup("RUST_LOG").unwrap_or(defaults.log_level),
            locale: lookup("SHOP_LOCALE")
                .and_then(|l| l.parse().ok())
                .unwrap_or(defaults.locale),
            currency: lookup("SHOP_CURRENCY")
                .and_then(|c| c.parse().ok())
                .unwrap_or(defaults.currency),
            seed_file: lookup("SHOP_SEED_FILE")
                .filter(|path| !path.trim().is_empty())
                .map(PathBuf::from),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            locale: Locale::EnUs,
            currency: Currency::Usd,
            seed_file: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_default_values() {
        let config = Config::default();
        assert_eq!(config.log_level, "info");
        assert_eq!(config.locale, Locale::EnUs);
        assert_eq!(config.currency, Currency::Usd);
        assert_eq!(config.seed_file, None);
    }

    #[test]
    fn test_reads_all_variables() {
        let config = Config::from_lookup(lookup(&[
            ("RUST_LOG", "debug"),
            ("SHOP_LOCALE", "fr-FR"),
            ("SHOP_CURRENCY", "eur"),
            ("SHOP_SEED_FILE", "/tmp/seed.json"),
        ]));
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.locale, Locale::FrFr);
        assert_eq!(config.currency, Currency::Eur);
        assert_eq!(config.seed_file, Some(PathBuf::from("/tmp/seed.json")));
    }

    #[test]
    fn test_unsupported_values_fall_back() {
        let config = Config::from_lookup(lookup(&[
            ("SHOP_LOCALE", "ja-JP"),
            ("SHOP_CURRENCY", "JPY"),
            ("SHOP_SEED_FILE", "  "),
        ]));
        assert_eq!(config, Config::default());
    }
}
