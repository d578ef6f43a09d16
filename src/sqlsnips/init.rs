use crate::api::SnippetsApi;
use crate::config::SnippetsConfig;
use crate::error::{Result, SnippetError};
use crate::store::fs::FsBackend;
use directories::ProjectDirs;
use std::env;
use std::path::PathBuf;

/// Environment variable naming the snippets root.
pub const ROOT_ENV: &str = "SNIPPETS_MANAGEMENT_FOLDER";

/// Overrides the directory `config.json` lives in.
pub const CONFIG_DIR_ENV: &str = "SQLSNIPS_CONFIG_DIR";

pub struct SnippetsContext {
    pub api: SnippetsApi<FsBackend>,
    pub config: SnippetsConfig,
    pub config_dir: PathBuf,
}

/// Picks the snippets root: explicit flag, then environment, then config file.
/// Blank values count as unset.
pub fn resolve_root(
    flag: Option<PathBuf>,
    env_value: Option<String>,
    config: &SnippetsConfig,
) -> Option<PathBuf> {
    flag.filter(|p| !p.as_os_str().is_empty())
        .or_else(|| {
            env_value
                .filter(|v| !v.trim().is_empty())
                .map(PathBuf::from)
        })
        .or_else(|| config.root.clone())
}

pub fn config_dir() -> Result<PathBuf> {
    if let Some(dir) = env::var_os(CONFIG_DIR_ENV).filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(dir));
    }
    ProjectDirs::from("com", "sqlsnips", "sqlsnips")
        .map(|dirs| dirs.config_dir().to_path_buf())
        .ok_or_else(|| SnippetError::Config("could not determine config directory".into()))
}

/// Builds the application context. Never touches the snippets root itself:
/// an unresolved root yields an unconfigured backend whose calls fail with
/// `NotConfigured`.
pub fn initialize(root_flag: Option<PathBuf>) -> Result<SnippetsContext> {
    let config_dir = config_dir()?;
    let config = SnippetsConfig::load(&config_dir)?;
    let root = resolve_root(root_flag, env::var(ROOT_ENV).ok(), &config);

    Ok(SnippetsContext {
        api: SnippetsApi::new(FsBackend::new(root)),
        config,
        config_dir,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with(root: &str) -> SnippetsConfig {
        SnippetsConfig {
            root: Some(PathBuf::from(root)),
        }
    }

    #[test]
    fn flag_wins() {
        let root = resolve_root(
            Some(PathBuf::from("/flag")),
            Some("/env".into()),
            &config_with("/config"),
        );
        assert_eq!(root, Some(PathBuf::from("/flag")));
    }

    #[test]
    fn env_beats_config() {
        let root = resolve_root(None, Some("/env".into()), &config_with("/config"));
        assert_eq!(root, Some(PathBuf::from("/env")));
    }

    #[test]
    fn blank_env_falls_through() {
        let root = resolve_root(None, Some("  ".into()), &config_with("/config"));
        assert_eq!(root, Some(PathBuf::from("/config")));
    }

    #[test]
    fn nothing_configured() {
        assert_eq!(resolve_root(None, None, &SnippetsConfig::default()), None);
    }
}
