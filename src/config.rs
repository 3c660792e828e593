//! Search configuration.
//!
//! Defaults can be overridden from the environment:
//!
//! | Variable                 | Field            |
//! |--------------------------|------------------|
//! | `MOTIFSCAN_MIN_SEED_LEN` | `min_seed_len`   |
//! | `MOTIFSCAN_DEDUP`        | `dedup_intervals`|

/// Environment configuration prefix.
pub const DEFAULT_PREFIX: &str = "MOTIFSCAN";

/// Minimum seed length used when nothing else is configured.
pub const DEFAULT_MIN_SEED_LEN: usize = 3;

/// Knobs for the gapped matcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchConfig {
    /// Literal runs shorter than this are not used as seeds (unless a pattern
    /// has no longer run). Never below 1.
    pub min_seed_len: usize,
    /// Report each (start, end) interval at most once per pattern. Off by
    /// default: every confirming seed hit adds its own entry.
    pub dedup_intervals: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            min_seed_len: DEFAULT_MIN_SEED_LEN,
            dedup_intervals: false,
        }
    }
}

impl SearchConfig {
    /// Default configuration with the given minimum seed length.
    #[must_use]
    pub fn with_min_seed_len(min_seed_len: usize) -> Self {
        Self::default().min_seed_len(min_seed_len)
    }

    #[must_use]
    pub fn min_seed_len(mut self, min_seed_len: usize) -> Self {
        self.min_seed_len = min_seed_len.max(1);
        self
    }

    #[must_use]
    pub fn dedup_intervals(mut self, dedup: bool) -> Self {
        self.dedup_intervals = dedup;
        self
    }

    /// Defaults overridden by `MOTIFSCAN_*` variables.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_env_config(&EnvConfig::default())
    }

    /// Defaults overridden by the variables `env` can see.
    #[must_use]
    pub fn from_env_config(env: &EnvConfig) -> Self {
        let defaults = Self::default();
        Self::default()
            .min_seed_len(env.parse_or("MIN_SEED_LEN", defaults.min_seed_len))
            .dedup_intervals(env.bool("DEDUP").unwrap_or(defaults.dedup_intervals))
    }
}

/// Environment variable reader.
#[derive(Debug, Clone)]
pub struct EnvConfig {
    /// Prefix for environment variables.
    prefix: String,
    /// Values consulted before the process environment.
    overrides: Vec<(String, String)>,
}

impl Default for EnvConfig {
    fn default() -> Self {
        Self::new(DEFAULT_PREFIX)
    }
}

impl EnvConfig {
    /// Create a new environment config reader.
    #[must_use]
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            overrides: Vec::new(),
        }
    }

    /// Pretend `name` (without prefix) is set to `value`.
    #[must_use]
    pub fn with_override(mut self, name: &str, value: impl Into<String>) -> Self {
        let key = self.var_name(name);
        self.overrides.push((key, value.into()));
        self
    }

    /// Build the full environment variable name.
    fn var_name(&self, name: &str) -> String {
        if self.prefix.is_empty() {
            name.to_uppercase()
        } else {
            format!("{}_{}", self.prefix, name.to_uppercase())
        }
    }

    /// Get a string value.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<String> {
        let var_name = self.var_name(name);
        self.overrides
            .iter()
            .rev()
            .find(|(k, _)| *k == var_name)
            .map(|(_, v)| v.clone())
            .or_else(|| std::env::var(&var_name).ok())
    }

    /// Get a parsed value.
    #[must_use]
    pub fn parse<T: std::str::FromStr>(&self, name: &str) -> Option<T> {
        let raw = self.get(name)?;
        match raw.trim().parse() {
            Ok(v) => Some(v),
            Err(_) => {
                tracing::warn!(var = %self.var_name(name), value = %raw, "ignoring unparsable value");
                None
            }
        }
    }

    /// Get a parsed value with default.
    #[must_use]
    pub fn parse_or<T: std::str::FromStr>(&self, name: &str, default: T) -> T {
        self.parse(name).unwrap_or(default)
    }

    /// Get a boolean value.
    #[must_use]
    pub fn bool(&self, name: &str) -> Option<bool> {
        self.get(name)
            .and_then(|v| match v.trim().to_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => Some(true),
                "0" | "false" | "no" | "off" => Some(false),
                _ => None,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A prefix no real environment sets.
    fn isolated() -> EnvConfig {
        EnvConfig::new("MOTIFSCAN_TEST_UNSET_PREFIX")
    }

    #[test]
    fn test_defaults() {
        let config = SearchConfig::default();
        assert_eq!(config.min_seed_len, 3);
        assert!(!config.dedup_intervals);
    }

    #[test]
    fn test_min_seed_len_clamped() {
        assert_eq!(SearchConfig::with_min_seed_len(0).min_seed_len, 1);
        assert_eq!(SearchConfig::with_min_seed_len(5).min_seed_len, 5);
    }

    #[test]
    fn test_from_env_without_variables() {
        assert_eq!(
            SearchConfig::from_env_config(&isolated()),
            SearchConfig::default()
        );
    }

    #[test]
    fn test_from_env_overrides() {
        let env = isolated()
            .with_override("min_seed_len", "5")
            .with_override("dedup", "on");
        let config = SearchConfig::from_env_config(&env);
        assert_eq!(config.min_seed_len, 5);
        assert!(config.dedup_intervals);
    }

    #[test]
    fn test_unparsable_values_fall_back() {
        let env = isolated()
            .with_override("MIN_SEED_LEN", "lots")
            .with_override("DEDUP", "maybe");
        assert_eq!(SearchConfig::from_env_config(&env), SearchConfig::default());
    }

    #[test]
    fn test_var_name() {
        assert_eq!(EnvConfig::default().var_name("dedup"), "MOTIFSCAN_DEDUP");
        assert_eq!(EnvConfig::new("").var_name("dedup"), "DEDUP");
    }
}
