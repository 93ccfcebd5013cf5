use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Serialize, Deserialize, Default)]
struct SessionData {
    #[serde(skip_serializing_if = "Option::is_none")]
    token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    username: Option<String>,
}

/// Durable storage for the bearer token and username pair. The pair is
/// written together and cleared together; readers never observe a write
/// in progress because `store` and `clear` replace the whole file.
///
/// No validation of the token format or expiry happens here.
pub struct SessionStore {
    path: PathBuf,
    data: SessionData,
}

impl SessionStore {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: SessionData::default(),
        }
    }

    pub fn load(&mut self) -> Result<()> {
        if self.path.exists() {
            let content = std::fs::read_to_string(&self.path)?;
            self.data = toml::from_str(&content)?;
        }
        Ok(())
    }

    /// Persist both values durably in a single write.
    pub fn store(&mut self, token: String, username: String) -> Result<()> {
        self.data.token = Some(token);
        self.data.username = Some(username);
        self.save()
    }

    pub fn token(&self) -> Option<&str> {
        self.data.token.as_deref()
    }

    pub fn username(&self) -> Option<&str> {
        self.data.username.as_deref()
    }

    /// Remove both values. Subsequent reads return absent for both even if
    /// the file removal raced with nothing else (missing file is fine).
    pub fn clear(&mut self) -> Result<()> {
        self.data = SessionData::default();
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(&self.data)?;
        std::fs::write(&self.path, content)?;
        Ok(())
    }
}
