use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf, sync::RwLock};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendSettings {
    pub base_url: String,
}

impl Default for BackendSettings {
    fn default() -> Self {
        Self {
            base_url: "http://172.18.7.91:9900".into(),
        }
    }
}

/// A persisted login session. The token travels with requests as a bearer
/// header; nothing else about the user is needed offline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredSession {
    pub token: String,
    pub username: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct UserSettings {
    backend: BackendSettings,
    session: Option<StoredSession>,
}

pub struct SettingsStore {
    path: PathBuf,
    data: RwLock<UserSettings>,
}

impl SettingsStore {
    pub fn new(path: PathBuf) -> Result<Self> {
        let data = if path.exists() {
            let contents = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read settings from {}", path.display()))?;
            serde_json::from_str(&contents).unwrap_or_default()
        } else {
            UserSettings::default()
        };

        Ok(Self {
            path,
            data: RwLock::new(data),
        })
    }

    pub fn backend(&self) -> BackendSettings {
        self.data.read().unwrap().backend.clone()
    }

    pub fn session(&self) -> Option<StoredSession> {
        self.data.read().unwrap().session.clone()
    }

    pub fn update_backend(&self, backend: BackendSettings) -> Result<()> {
        let mut guard = self.data.write().unwrap();
        guard.backend = backend;
        self.persist(&guard)
    }

    pub fn update_session(&self, session: Option<StoredSession>) -> Result<()> {
        let mut guard = self.data.write().unwrap();
        guard.session = session;
        self.persist(&guard)
    }

    fn persist(&self, data: &UserSettings) -> Result<()> {
        let serialized = serde_json::to_string_pretty(data)?;
        fs::write(&self.path, serialized)
            .with_context(|| format!("Failed to write settings to {}", self.path.display()))
    }
}
