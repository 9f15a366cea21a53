//! # Configuration
//!
//! Where the store lives and where the seed catalog comes from. Explicit
//! values win over environment variables, which win over the defaults.

use crate::source::{CatalogSource, FileSource, HttpSource};
use std::path::PathBuf;

/// Environment variable overriding the store path
pub const ENV_STORE_PATH: &str = "COURSEBOOK_STORE_PATH";
/// Environment variable overriding the seed location
pub const ENV_SEED: &str = "COURSEBOOK_SEED";

pub const DEFAULT_STORE_PATH: &str = ".coursebook/coursebook.db";
pub const DEFAULT_SEED: &str = "data/catalog.json";

/// Seed catalog location: a local file or an HTTP(S) URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SeedLocation {
    File(PathBuf),
    Url(String),
}

impl SeedLocation {
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        if raw.starts_with("http://") || raw.starts_with("https://") {
            Self::Url(raw.to_string())
        } else {
            Self::File(PathBuf::from(raw))
        }
    }

    pub fn into_source(self) -> Box<dyn CatalogSource> {
        match self {
            Self::File(path) => Box::new(FileSource::new(path)),
            Self::Url(url) => Box::new(HttpSource::new(url)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogConfig {
    pub store_path: PathBuf,
    pub seed: SeedLocation,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            store_path: PathBuf::from(DEFAULT_STORE_PATH),
            seed: SeedLocation::parse(DEFAULT_SEED),
        }
    }
}

impl CatalogConfig {
    /// Resolve against the process environment
    pub fn resolve(store_path: Option<PathBuf>, seed: Option<String>) -> Self {
        Self::resolve_with(store_path, seed, |key| std::env::var(key).ok())
    }

    /// Resolve against an arbitrary environment lookup
    pub fn resolve_with(
        store_path: Option<PathBuf>,
        seed: Option<String>,
        env: impl Fn(&str) -> Option<String>,
    ) -> Self {
        let non_empty = |value: String| (!value.trim().is_empty()).then_some(value);

        let store_path = store_path
            .or_else(|| env(ENV_STORE_PATH).and_then(non_empty).map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_STORE_PATH));
        let seed = seed
            .or_else(|| env(ENV_SEED).and_then(non_empty))
            .map(|raw| SeedLocation::parse(&raw))
            .unwrap_or_else(|| SeedLocation::parse(DEFAULT_SEED));

        Self { store_path, seed }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env_of(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = CatalogConfig::resolve_with(None, None, env_of(&[]));
        assert_eq!(config, CatalogConfig::default());
        assert!(config.store_path.ends_with("coursebook.db"));
    }

    #[test]
    fn test_env_overrides_default() {
        let config = CatalogConfig::resolve_with(
            None,
            None,
            env_of(&[
                (ENV_STORE_PATH, "/tmp/cb.db"),
                (ENV_SEED, "https://example.org/catalog.json"),
            ]),
        );
        assert_eq!(config.store_path, PathBuf::from("/tmp/cb.db"));
        assert_eq!(
            config.seed,
            SeedLocation::Url("https://example.org/catalog.json".to_string())
        );
    }

    #[test]
    fn test_flags_override_env() {
        let config = CatalogConfig::resolve_with(
            Some(PathBuf::from("flag.db")),
            Some("seed.json".to_string()),
            env_of(&[(ENV_STORE_PATH, "/tmp/cb.db"), (ENV_SEED, "")]),
        );
        assert_eq!(config.store_path, PathBuf::from("flag.db"));
        assert_eq!(config.seed, SeedLocation::File(PathBuf::from("seed.json")));
    }

    #[test]
    fn test_blank_env_falls_back() {
        let config = CatalogConfig::resolve_with(None, None, env_of(&[(ENV_SEED, "  ")]));
        assert_eq!(config.seed, SeedLocation::parse(DEFAULT_SEED));
    }
}
