use std::env;

use log::warn;

use crate::blockchain::{DEFAULT_DIFFICULTY, HASH_HEX_LEN};

/// Upper bound on request difficulty unless `MAX_DIFFICULTY` says otherwise.
/// Kept low so a single seal stays in the seconds range.
pub const DEFAULT_MAX_DIFFICULTY: u32 = 6;

/// Runtime settings, read from the environment (and an optional `.env`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub host: String,
    pub port: u16,
    /// Difficulty used when a seal request omits it or passes 0.
    pub default_difficulty: u32,
    /// Highest difficulty a seal request may ask for.
    pub max_difficulty: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            default_difficulty: DEFAULT_DIFFICULTY,
            max_difficulty: DEFAULT_MAX_DIFFICULTY,
        }
    }
}

impl Config {
    /// Read `HOST`, `PORT`, `DEFAULT_DIFFICULTY` and `MAX_DIFFICULTY`.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key lookup; unparseable values fall back to defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let parsed = |key: &str| lookup(key).and_then(|v| v.trim().parse::<u32>().ok());

        let host = lookup("HOST").unwrap_or(defaults.host);
        let port = lookup("PORT")
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(defaults.port);

        let ceiling = HASH_HEX_LEN as u32 - 1;
        let mut max_difficulty = parsed("MAX_DIFFICULTY").unwrap_or(defaults.max_difficulty);
        if max_difficulty > ceiling {
            warn!("MAX_DIFFICULTY={max_difficulty} is unreachable for a {HASH_HEX_LEN}-char hash, using {ceiling}");
            max_difficulty = ceiling;
        }

        let mut default_difficulty =
            parsed("DEFAULT_DIFFICULTY").unwrap_or(defaults.default_difficulty);
        if default_difficulty > max_difficulty {
            warn!("DEFAULT_DIFFICULTY={default_difficulty} exceeds MAX_DIFFICULTY, using {max_difficulty}");
            default_difficulty = max_difficulty;
        }

        Self {
            host,
            port,
            default_difficulty,
            max_difficulty,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Config {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_when_unset() {
        assert_eq!(config_from(&[]), Config::default());
        assert_eq!(Config::default().default_difficulty, 4);
    }

    #[test]
    fn reads_overrides() {
        let cfg = config_from(&[
            ("HOST", "0.0.0.0"),
            ("PORT", "9000"),
            ("DEFAULT_DIFFICULTY", "2"),
            ("MAX_DIFFICULTY", "5"),
        ]);
        assert_eq!(cfg.host, "0.0.0.0");
        assert_eq!(cfg.port, 9000);
        assert_eq!(cfg.default_difficulty, 2);
        assert_eq!(cfg.max_difficulty, 5);
    }

    #[test]
    fn garbage_falls_back_to_defaults() {
        let cfg = config_from(&[("PORT", "http"), ("DEFAULT_DIFFICULTY", "-1")]);
        assert_eq!(cfg.port, 8080);
        assert_eq!(cfg.default_difficulty, DEFAULT_DIFFICULTY);
    }

    #[test]
    fn clamps_difficulties() {
        let cfg = config_from(&[("MAX_DIFFICULTY", "64"), ("DEFAULT_DIFFICULTY", "70")]);
        assert_eq!(cfg.max_difficulty, 63);
        assert_eq!(cfg.default_difficulty, 63);

        let cfg = config_from(&[("MAX_DIFFICULTY", "3")]);
        assert_eq!(cfg.default_difficulty, 3);
    }
}
