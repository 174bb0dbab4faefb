//! Application configuration read from `config.toml` in the data directory.
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

pub const CONFIG_FILE: &str = "config.toml";
pub const DATABASE_FILE: &str = "math_facts.sqlite3";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Relative paths are resolved against the data directory.
    pub database_path: PathBuf,
    /// `env_logger` filter used when `RUST_LOG` is not set.
    pub log_filter: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database_path: PathBuf::from(DATABASE_FILE),
            log_filter: "info".to_string(),
        }
    }
}

impl AppConfig {
    pub fn resolved_database_path(&self, data_dir: &Path) -> PathBuf {
        if self.database_path.is_absolute() {
            self.database_path.clone()
        } else {
            data_dir.join(&self.database_path)
        }
    }
}

/// Platform data directory, or `./data` when none can be determined. Created if missing.
pub fn data_dir() -> io::Result<PathBuf> {
    let dir = ProjectDirs::from("com", "mathfacts", "Math Facts")
        .map(|dirs| dirs.data_local_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("./data"));
    fs::create_dir_all(&dir)?;
    Ok(dir)
}

/// Reads the config at `path`, writing the defaults there first if it does not exist.
pub fn load_config(path: &Path) -> io::Result<AppConfig> {
    if path.exists() {
        let content = fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|err| io::Error::new(io::ErrorKind::InvalidData, err))
    } else {
        let cfg = AppConfig::default();
        let content = toml::to_string_pretty(&cfg)
            .map_err(|err| io::Error::new(io::ErrorKind::Other, err))?;
        fs::write(path, content)?;
        Ok(cfg)
    }
}
