use crate::error::{Result, SnippetError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILENAME: &str = "config.json";

/// Keys accepted by `get`/`set`.
pub const CONFIG_KEYS: &[&str] = &["root"];

/// Persistent settings, stored as `config.json` in the user config directory.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SnippetsConfig {
    /// Snippets root used when neither `--root` nor the environment set one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub root: Option<PathBuf>,
}

impl SnippetsConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path)?;
        Ok(serde_json::from_str(&content)?)
    }

    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();
        fs::create_dir_all(config_dir)?;

        let content = serde_json::to_string_pretty(self)?;
        fs::write(config_dir.join(CONFIG_FILENAME), content)?;
        Ok(())
    }

    /// Value of `key` as displayed to users; `None` when unset.
    pub fn get(&self, key: &str) -> Result<Option<String>> {
        match key {
            "root" => Ok(self.root.as_ref().map(|p| p.display().to_string())),
            other => Err(unknown_key(other)),
        }
    }

    /// Sets `key`. An empty value clears it.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "root" => {
                let value = value.trim();
                self.root = (!value.is_empty()).then(|| PathBuf::from(value));
                Ok(())
            }
            other => Err(unknown_key(other)),
        }
    }
}

fn unknown_key(key: &str) -> SnippetError {
    SnippetError::Config(format!(
        "unknown key '{}' (known keys: {})",
        key,
        CONFIG_KEYS.join(", ")
    ))
}
