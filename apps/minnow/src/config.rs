use serde::Deserialize;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file at {}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("cannot parse config file at {}", path.display())]
    ParseToml {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// Optional engine settings, read from `engine.toml` in the database
/// environment directory. Everything has a default, so the file is not
/// required to exist.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EngineConfig {
    #[serde(default)]
    pub storage: StorageConfig,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct StorageConfig {
    /// Where the rolling log files go. Relative paths resolve against the
    /// environment directory; unset means `<env>/logs`.
    pub logs_dir: Option<PathBuf>,
}

impl EngineConfig {
    /// Loads `engine.toml` from the environment directory, falling back to
    /// defaults when the file does not exist.
    pub fn load_or_default(env_dir: &Path) -> Result<Self, ConfigError> {
        let path = env_dir.join("engine.toml");

        let text = match std::fs::read_to_string(&path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => return Err(ConfigError::Io { path, source: e }),
        };

        toml::from_str(&text).map_err(|e| ConfigError::ParseToml { path, source: e })
    }

    /// Resolves the effective log directory.
    pub fn logs_dir(&self, env_dir: &Path) -> PathBuf {
        match &self.storage.logs_dir {
            Some(dir) if dir.is_absolute() => dir.clone(),
            Some(dir) => env_dir.join(dir),
            None => env_dir.join("logs"),
        }
    }
}
