//! Server configuration at ~/.config/calmcp/config.toml

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

const DEFAULT_ACCESS_TIMEOUT_SECS: u64 = 10;

fn default_access_timeout_secs() -> u64 {
    DEFAULT_ACCESS_TIMEOUT_SECS
}

fn default_calendars() -> Vec<String> {
    vec!["Personal".to_string()]
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Seconds to wait for the store's access decision.
    #[serde(default = "default_access_timeout_secs")]
    pub access_timeout_secs: u64,

    /// Calendar titles the event store starts with; the first one is the
    /// default calendar for new events.
    #[serde(default = "default_calendars")]
    pub calendars: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            access_timeout_secs: DEFAULT_ACCESS_TIMEOUT_SECS,
            calendars: default_calendars(),
        }
    }
}

impl ServerConfig {
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("calmcp").join("config.toml"))
    }

    /// Load from the config file, falling back to defaults when absent.
    pub fn load() -> Result<Self> {
        let Some(path) = Self::config_path() else {
            return Ok(ServerConfig::default());
        };
        if !path.exists() {
            return Ok(ServerConfig::default());
        }

        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("could not read {}", path.display()))?;
        let config = toml::from_str(&content)
            .with_context(|| format!("could not parse {}", path.display()))?;
        Ok(config)
    }

    /// Create a default config file with all options commented out.
    pub fn create_default_config(path: &Path) -> Result<()> {
        let contents = "\
# calmcp configuration

# Seconds to wait for the calendar store's access decision:
# access_timeout_secs = 10

# Calendars available in the event store (the first is the default):
# calendars = [\"Personal\", \"Work\"]
";

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("could not create {}", parent.display()))?;
        }
        std::fs::write(path, contents)
            .with_context(|| format!("could not write {}", path.display()))?;
        Ok(())
    }

    /// Calendar titles for the store; never empty.
    pub fn calendar_titles(&self) -> Vec<&str> {
        if self.calendars.is_empty() {
            vec!["Personal"]
        } else {
            self.calendars.iter().map(String::as_str).collect()
        }
    }
}
