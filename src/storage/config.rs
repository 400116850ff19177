use super::Result;
use crate::core::view_state::Theme;
use crate::error::{ConfigError, StorageError};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

pub const DEFAULT_SERVER_URL: &str = "http://localhost:5000";

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct Config {
    pub default_profile: Option<String>,
    #[serde(default)]
    pub theme: Theme,
    #[serde(default)]
    pub profiles: HashMap<String, Profile>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Profile {
    pub server_url: String,
    pub timeout_seconds: Option<u64>,
    pub download_dir: Option<String>,
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            server_url: DEFAULT_SERVER_URL.to_string(),
            timeout_seconds: None,
            download_dir: None,
        }
    }
}

impl Profile {
    /// Configured directory, else the user's download directory, else `.`
    pub fn resolved_download_dir(&self) -> PathBuf {
        self.download_dir
            .as_ref()
            .map(PathBuf::from)
            .or_else(dirs::download_dir)
            .unwrap_or_else(|| PathBuf::from("."))
    }
}

impl Config {
    pub fn load(path: Option<PathBuf>) -> Result<Self> {
        let config_path = match path {
            Some(p) => p,
            None => Self::config_file_path()?,
        };

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(|source| StorageError::FileIo {
            path: config_path.to_string_lossy().to_string(),
            source,
        })?;

        let config: Config =
            toml::from_str(&content).map_err(|e| StorageError::ConfigParseError {
                message: e.to_string(),
            })?;

        Ok(config)
    }

    pub fn save(&self, path: Option<PathBuf>) -> Result<()> {
        let config_path = match path {
            Some(p) => p,
            None => Self::config_file_path()?,
        };

        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent).map_err(|source| StorageError::FileIo {
                path: parent.to_string_lossy().to_string(),
                source,
            })?;
        }

        let toml_content = toml::to_string(self).map_err(|e| StorageError::ConfigSaveFailed {
            message: e.to_string(),
        })?;

        fs::write(&config_path, toml_content).map_err(|source| StorageError::FileIo {
            path: config_path.to_string_lossy().to_string(),
            source,
        })?;

        Ok(())
    }

    pub fn config_file_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir().ok_or(StorageError::ConfigDirNotFound)?;
        Ok(config_dir.join("dashboard-utils").join("config.toml"))
    }

    pub fn get_profile(&self, name: &str) -> Option<&Profile> {
        self.profiles.get(name)
    }

    pub fn set_profile(&mut self, name: String, profile: Profile) {
        self.profiles.insert(name, profile);
    }

    /// Apply `config set <key> <value>` to the named profile, creating it if needed
    pub fn set_value(
        &mut self,
        profile_name: &str,
        key: &str,
        value: &str,
    ) -> std::result::Result<(), ConfigError> {
        if key == "theme" {
            self.theme = value.parse().map_err(|reason| ConfigError::InvalidValue {
                field: key.to_string(),
                value: value.to_string(),
                reason,
            })?;
            return Ok(());
        }

        let profile = self.profiles.entry(profile_name.to_string()).or_default();
        match key {
            "server_url" => {
                crate::utils::validation::validate_url(value).map_err(|e| {
                    ConfigError::InvalidValue {
                        field: key.to_string(),
                        value: value.to_string(),
                        reason: e.to_string(),
                    }
                })?;
                profile.server_url = value.trim_end_matches('/').to_string();
            }
            "timeout_seconds" => {
                let secs = value
                    .parse::<u64>()
                    .ok()
                    .filter(|secs| *secs > 0)
                    .ok_or_else(|| ConfigError::InvalidValue {
                        field: key.to_string(),
                        value: value.to_string(),
                        reason: "expected a positive number of seconds".to_string(),
                    })?;
                profile.timeout_seconds = Some(secs);
            }
            "download_dir" => {
                profile.download_dir = Some(value.to_string());
            }
            _ => {
                return Err(ConfigError::UnknownKey {
                    key: key.to_string(),
                });
            }
        }
        Ok(())
    }
}
