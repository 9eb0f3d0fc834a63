use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::data::SieveOptions;
use crate::error::SieveError;
use crate::sieve::{AncestorKinds, DistanceKind, Granularity};

pub const DEFAULT_LEVEL: usize = 1;
pub const DEFAULT_LIMIT: usize = 100_000;

/// Persisted defaults for sieving runs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SieveConfig {
    #[serde(default)]
    pub granularity: Granularity,
    #[serde(default = "default_level")]
    pub level: usize,
    #[serde(default = "default_limit")]
    pub limit: usize,
    #[serde(default)]
    pub distance: DistanceKind,
    /// Overrides the grammar's function-like node kinds
    #[serde(default)]
    pub function_kinds: Option<Vec<String>>,
    /// Overrides the grammar's class-like node kinds
    #[serde(default)]
    pub class_kinds: Option<Vec<String>>,
}

impl Default for SieveConfig {
    fn default() -> Self {
        Self {
            granularity: Granularity::default(),
            level: default_level(),
            limit: default_limit(),
            distance: DistanceKind::default(),
            function_kinds: None,
            class_kinds: None,
        }
    }
}

fn default_level() -> usize {
    DEFAULT_LEVEL
}

fn default_limit() -> usize {
    // Environment wins over the built-in limit
    std::env::var("CODESIEVE_LIMIT")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(DEFAULT_LIMIT)
}

impl SieveConfig {
    /// Options for [`datasieve`](crate::data::datasieve), starting from
    /// `kinds` and applying any kind overrides from this config.
    pub fn options(&self, kinds: AncestorKinds) -> SieveOptions {
        let mut kinds = kinds;
        if let Some(functions) = &self.function_kinds {
            kinds = kinds.with_functions(functions.clone());
        }
        if let Some(classes) = &self.class_kinds {
            kinds = kinds.with_classes(classes.clone());
        }
        SieveOptions {
            level: self.level,
            limit: self.limit,
            distance: self.distance,
            kinds,
        }
    }
}

pub fn default_config_path() -> PathBuf {
    let Some(dirs) = ProjectDirs::from("com", "zaguan", "codesieve") else {
        return Path::new("codesieve.json").to_path_buf();
    };
    dirs.config_dir().join("config.json")
}

pub fn load_config(path: &Path) -> SieveConfig {
    let Ok(bytes) = fs::read(path) else {
        return SieveConfig::default();
    };
    match serde_json::from_slice::<SieveConfig>(&bytes) {
        Ok(cfg) => cfg,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "ignoring malformed config");
            SieveConfig::default()
        }
    }
}

pub fn save_config(path: &Path, cfg: &SieveConfig) -> Result<(), SieveError> {
    let json = serde_json::to_vec_pretty(cfg)?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, json)?;
    Ok(())
}
