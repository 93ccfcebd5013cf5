use anyhow::Result;
use std::path::{Path, PathBuf};

/// Base path override, used in containers and tests.
pub fn base_path_override() -> Option<PathBuf> {
    std::env::var("CINETRACK_BASE_PATH").ok().map(PathBuf::from)
}

pub struct PathManager {
    config_dir: PathBuf,
}

impl PathManager {
    pub fn new() -> Result<Self> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?
            .join("cinetrack");
        Ok(Self { config_dir })
    }

    pub fn from_base(base: PathBuf) -> Self {
        Self { config_dir: base }
    }

    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    pub fn config_file(&self) -> PathBuf {
        self.config_dir.join("config.toml")
    }

    pub fn session_file(&self) -> PathBuf {
        self.config_dir.join("session.toml")
    }

    pub fn ensure_directories(&self) -> Result<()> {
        std::fs::create_dir_all(&self.config_dir)?;
        Ok(())
    }
}

impl Default for PathManager {
    fn default() -> Self {
        if let Some(base) = base_path_override() {
            return Self::from_base(base);
        }
        Self::new().unwrap_or_else(|_| Self::from_base(PathBuf::from(".cinetrack")))
    }
}
