use model::env::{PLAYLIST_API_KEY, TABLE_NAME};
use std::fmt::{Debug, Formatter};

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Missing {0} environment variable")]
    Missing(&'static str),
    #[error("{0} environment variable must not be empty")]
    Empty(&'static str),
}

/// Shared secret required in the `apikey` header of writes.
#[derive(Clone)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn new(secret: impl Into<String>) -> Self {
        ApiKey(secret.into())
    }

    /// Compare without returning early on the first differing byte.
    pub fn matches(&self, candidate: &str) -> bool {
        let expected: &[u8] = self.0.as_bytes();
        let candidate: &[u8] = candidate.as_bytes();

        let difference: usize = expected
            .iter()
            .zip(candidate)
            .fold(expected.len() ^ candidate.len(), |acc, (a, b)| {
                acc | usize::from(a ^ b)
            });

        difference == 0
    }
}

impl Debug for ApiKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str("ApiKey(..)")
    }
}

#[derive(Debug, Clone)]
pub struct PlaylistConfig {
    pub table_name: String,
    pub api_key: ApiKey,
}

impl PlaylistConfig {
    /// Read the configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let required = |name: &'static str| -> Result<String, ConfigError> {
            match lookup(name) {
                None => Err(ConfigError::Missing(name)),
                Some(value) if value.is_empty() => Err(ConfigError::Empty(name)),
                Some(value) => Ok(value),
            }
        };

        Ok(PlaylistConfig {
            table_name: required(TABLE_NAME)?,
            api_key: ApiKey::new(required(PLAYLIST_API_KEY)?),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use test_utils::{setup_default_env, TEST_API_KEY, TEST_TABLE};

    #[test]
    fn reads_from_environment() {
        setup_default_env();

        let config: PlaylistConfig = PlaylistConfig::from_env().expect("Config should load");

        assert_eq!(TEST_TABLE, config.table_name);
        assert!(config.api_key.matches(TEST_API_KEY));
    }

    #[test]
    fn fails_on_missing_or_empty_values() {
        let vars: HashMap<&str, &str> = HashMap::from([(TABLE_NAME, "table")]);
        let missing = PlaylistConfig::from_lookup(|name| vars.get(name).map(|v| v.to_string()));

        assert_eq!(Some(ConfigError::Missing(PLAYLIST_API_KEY)), missing.err());

        let empty = PlaylistConfig::from_lookup(|_| Some(String::new()));

        assert_eq!(Some(ConfigError::Empty(TABLE_NAME)), empty.err());
    }

    #[test]
    fn api_key_only_matches_exact_secret() {
        let key: ApiKey = ApiKey::new("secret");

        assert!(key.matches("secret"));
        assert!(!key.matches("secre"));
        assert!(!key.matches("secret "));
        assert!(!key.matches("Secret"));
        assert!(!key.matches(""));
        assert_eq!("ApiKey(..)", format!("{key:?}"));
    }
}
