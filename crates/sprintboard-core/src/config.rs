//! Layered configuration.
//!
//! Precedence (highest wins):
//! 1. CLI flags ([`Overrides`])
//! 2. Environment: `SPRINTBOARD_API_URL`, `SPRINTBOARD_PROJECT`, `SPRINTBOARD_TOKEN`
//! 3. Project file `.sprintboard/config.toml`
//! 4. User file `{config_dir}/sprintboard/config.toml`
//! 5. Built-in defaults

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8080/api";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_TOKEN_ENV: &str = "SPRINTBOARD_TOKEN";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileConfig {
    #[serde(default)]
    pub api: ApiSection,
    #[serde(default)]
    pub board: BoardSection,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiSection {
    #[serde(default)]
    pub base_url: Option<String>,
    #[serde(default)]
    pub timeout_secs: Option<u64>,
    /// Name of the environment variable holding the bearer token.
    #[serde(default)]
    pub token_env: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardSection {
    #[serde(default)]
    pub project_id: Option<String>,
    /// Pin a sprint instead of resolving the project's active one.
    #[serde(default)]
    pub sprint_id: Option<String>,
}

impl FileConfig {
    /// Fill unset values in `self` from `fallback`.
    #[must_use]
    pub fn or(self, fallback: Self) -> Self {
        Self {
            api: ApiSection {
                base_url: self.api.base_url.or(fallback.api.base_url),
                timeout_secs: self.api.timeout_secs.or(fallback.api.timeout_secs),
                token_env: self.api.token_env.or(fallback.api.token_env),
            },
            board: BoardSection {
                project_id: self.board.project_id.or(fallback.board.project_id),
                sprint_id: self.board.sprint_id.or(fallback.board.sprint_id),
            },
        }
    }
}

/// Values supplied on the command line.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub api_url: Option<String>,
    pub project_id: Option<String>,
    pub sprint_id: Option<String>,
}

/// Fully resolved settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EffectiveConfig {
    pub base_url: String,
    pub timeout: Duration,
    #[serde(skip_serializing)]
    pub token: Option<String>,
    pub project_id: Option<String>,
    pub sprint_id: Option<String>,
}

fn read_config_file(path: &Path) -> Result<FileConfig> {
    if !path.exists() {
        return Ok(FileConfig::default());
    }

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    toml::from_str::<FileConfig>(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))
}

#[must_use]
pub fn project_config_path(project_root: &Path) -> PathBuf {
    project_root.join(".sprintboard/config.toml")
}

/// Load `.sprintboard/config.toml`; a missing file means defaults.
///
/// # Errors
///
/// Unreadable or unparseable files.
pub fn load_project_config(project_root: &Path) -> Result<FileConfig> {
    read_config_file(&project_config_path(project_root))
}

/// Load the per-user config; a missing file or config dir means defaults.
///
/// # Errors
///
/// Unreadable or unparseable files.
pub fn load_user_config() -> Result<FileConfig> {
    let Some(config_dir) = dirs::config_dir() else {
        return Ok(FileConfig::default());
    };
    read_config_file(&config_dir.join("sprintboard/config.toml"))
}

/// Resolve configuration from files, process environment, and flags.
///
/// # Errors
///
/// Propagates file read/parse failures.
pub fn resolve_config(project_root: &Path, overrides: &Overrides) -> Result<EffectiveConfig> {
    let files = load_project_config(project_root)?.or(load_user_config()?);
    Ok(resolve(files, overrides, |name| std::env::var(name).ok()))
}

fn resolve(
    files: FileConfig,
    overrides: &Overrides,
    env: impl Fn(&str) -> Option<String>,
) -> EffectiveConfig {
    let non_empty = |value: Option<String>| value.filter(|v| !v.trim().is_empty());

    let base_url = non_empty(overrides.api_url.clone())
        .or_else(|| non_empty(env("SPRINTBOARD_API_URL")))
        .or(files.api.base_url)
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

    let token_env = files
        .api
        .token_env
        .unwrap_or_else(|| DEFAULT_TOKEN_ENV.to_string());
    let token = non_empty(env(token_env.as_str()));

    let project_id = non_empty(overrides.project_id.clone())
        .or_else(|| non_empty(env("SPRINTBOARD_PROJECT")))
        .or(files.board.project_id);

    EffectiveConfig {
        base_url,
        timeout: Duration::from_secs(files.api.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS)),
        token,
        project_id,
        sprint_id: non_empty(overrides.sprint_id.clone()).or(files.board.sprint_id),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn missing_project_config_uses_defaults() {
        let root = tempfile::tempdir().expect("temp dir");
        let cfg = load_project_config(root.path()).expect("load should succeed");
        assert_eq!(cfg, FileConfig::default());

        let effective = resolve(cfg, &Overrides::default(), env_from(&[]));
        assert_eq!(effective.base_url, DEFAULT_BASE_URL);
        assert_eq!(effective.timeout, Duration::from_secs(DEFAULT_TIMEOUT_SECS));
        assert!(effective.token.is_none());
        assert!(effective.project_id.is_none());
    }

    #[test]
    fn project_file_is_parsed() {
        let root = tempfile::tempdir().expect("temp dir");
        std::fs::create_dir_all(root.path().join(".sprintboard")).expect("mkdir");
        std::fs::write(
            project_config_path(root.path()),
            r#"
[api]
base_url = "https://pm.example.com/api"
timeout_secs = 3
token_env = "PM_TOKEN"

[board]
project_id = "web"
"#,
        )
        .expect("write config");

        let cfg = load_project_config(root.path()).expect("parse");
        assert_eq!(cfg.api.base_url.as_deref(), Some("https://pm.example.com/api"));
        assert_eq!(cfg.api.timeout_secs, Some(3));
        assert_eq!(cfg.board.project_id.as_deref(), Some("web"));

        let effective = resolve(cfg, &Overrides::default(), env_from(&[("PM_TOKEN", "s3cret")]));
        assert_eq!(effective.token.as_deref(), Some("s3cret"));
        assert_eq!(effective.timeout, Duration::from_secs(3));
    }

    #[test]
    fn invalid_project_file_is_an_error() {
        let root = tempfile::tempdir().expect("temp dir");
        std::fs::create_dir_all(root.path().join(".sprintboard")).expect("mkdir");
        std::fs::write(project_config_path(root.path()), "[api\nbase_url = 1").expect("write");
        assert!(load_project_config(root.path()).is_err());
    }

    #[test]
    fn project_values_win_over_user_values() {
        let project = FileConfig {
            board: BoardSection {
                project_id: Some("web".into()),
                sprint_id: None,
            },
            ..FileConfig::default()
        };
        let user = FileConfig {
            api: ApiSection {
                base_url: Some("https://user.example.com".into()),
                ..ApiSection::default()
            },
            board: BoardSection {
                project_id: Some("mobile".into()),
                sprint_id: Some("s-9".into()),
            },
        };
        let merged = project.or(user);
        assert_eq!(merged.board.project_id.as_deref(), Some("web"));
        assert_eq!(merged.board.sprint_id.as_deref(), Some("s-9"));
        assert_eq!(merged.api.base_url.as_deref(), Some("https://user.example.com"));
    }

    #[test]
    fn flags_override_env_override_files() {
        let files = FileConfig {
            api: ApiSection {
                base_url: Some("https://file.example.com".into()),
                ..ApiSection::default()
            },
            board: BoardSection {
                project_id: Some("file-project".into()),
                sprint_id: None,
            },
        };
        let env = env_from(&[
            ("SPRINTBOARD_API_URL", "https://env.example.com"),
            ("SPRINTBOARD_PROJECT", "env-project"),
        ]);

        let from_env = resolve(files.clone(), &Overrides::default(), &env);
        assert_eq!(from_env.base_url, "https://env.example.com");
        assert_eq!(from_env.project_id.as_deref(), Some("env-project"));

        let overrides = Overrides {
            api_url: Some("https://flag.example.com".into()),
            project_id: Some("flag-project".into()),
            sprint_id: Some("s-1".into()),
        };
        let from_flags = resolve(files, &overrides, &env);
        assert_eq!(from_flags.base_url, "https://flag.example.com");
        assert_eq!(from_flags.project_id.as_deref(), Some("flag-project"));
        assert_eq!(from_flags.sprint_id.as_deref(), Some("s-1"));
    }

    #[test]
    fn empty_env_values_are_ignored() {
        let effective = resolve(
            FileConfig::default(),
            &Overrides::default(),
            env_from(&[("SPRINTBOARD_API_URL", ""), ("SPRINTBOARD_TOKEN", "  ")]),
        );
        assert_eq!(effective.base_url, DEFAULT_BASE_URL);
        assert!(effective.token.is_none());
    }
}
