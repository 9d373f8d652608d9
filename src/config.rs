// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Persisted settings: `config.toml` in the per-user config directory,
//! overridden by `YNAB_*` environment variables, overridden by flags.

use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::render::OutputFormat;

static APP: Lazy<(&str, &str, &str)> = Lazy::new(|| ("com", "ynabctl", "ynabctl"));

pub const CONFIG_FILE: &str = "config.toml";
pub const ENV_CONFIG_DIR: &str = "YNABCTL_CONFIG_DIR";
pub const ENV_TOKEN: &str = "YNAB_TOKEN";
pub const ENV_DEFAULT_BUDGET: &str = "YNAB_DEFAULT_BUDGET";
pub const ENV_FORMAT: &str = "YNAB_FORMAT";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("YNAB API token not configured. Run 'ynabctl config set-token <token>' to set it")]
    MissingToken,

    #[error(
        "no budget specified. Use --budget flag or set a default with 'ynabctl config set-default-budget <id>'"
    )]
    MissingBudget,

    #[error("invalid format: {0} (must be 'json' or 'table')")]
    InvalidFormat(String),

    #[error("could not determine platform-specific config dir; set YNABCTL_CONFIG_DIR")]
    NoConfigDir,

    #[error("malformed config file {}: {source}", .path.display())]
    Malformed {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("failed to encode config: {0}")]
    Encode(#[from] toml::ser::Error),

    #[error("config file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_budget: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
}

/// A partial update written by the `config set-*` commands.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigUpdate {
    pub token: Option<String>,
    pub default_budget: Option<String>,
    pub format: Option<OutputFormat>,
}

pub fn config_dir() -> Result<PathBuf, ConfigError> {
    config_dir_with(|k| std::env::var(k).ok())
}

pub fn config_dir_with(lookup: impl Fn(&str) -> Option<String>) -> Result<PathBuf, ConfigError> {
    if let Some(custom) = lookup(ENV_CONFIG_DIR).filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(custom));
    }
    let proj = ProjectDirs::from(APP.0, APP.1, APP.2).ok_or(ConfigError::NoConfigDir)?;
    Ok(proj.config_dir().to_path_buf())
}

pub fn config_path() -> Result<PathBuf, ConfigError> {
    Ok(config_dir()?.join(CONFIG_FILE))
}

impl Settings {
    /// File, then environment.
    pub fn load() -> Result<Self, ConfigError> {
        let path = config_path()?;
        Ok(Self::read_file(&path)?.with_env(|k| std::env::var(k).ok()))
    }

    /// A missing file yields defaults.
    pub fn read_file(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            debug!(path = %path.display(), "no config file");
            return Ok(Self::default());
        }
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&contents).map_err(|source| ConfigError::Malformed {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Overlay non-empty environment values.
    pub fn with_env(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |k: &str| lookup(k).filter(|v| !v.is_empty());
        if let Some(v) = get(ENV_TOKEN) {
            self.token = Some(v);
        }
        if let Some(v) = get(ENV_DEFAULT_BUDGET) {
            self.default_budget = Some(v);
        }
        if let Some(v) = get(ENV_FORMAT) {
            self.format = Some(v);
        }
        self
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref().filter(|t| !t.is_empty())
    }

    pub fn default_budget(&self) -> Option<&str> {
        self.default_budget.as_deref().filter(|b| !b.is_empty())
    }

    pub fn output_format(&self) -> Result<Option<OutputFormat>, ConfigError> {
        match self.format.as_deref() {
            None | Some("") => Ok(None),
            Some(f) => f.parse().map(Some),
        }
    }

    fn apply(&mut self, update: ConfigUpdate) {
        if let Some(token) = update.token {
            self.token = Some(token);
        }
        if let Some(budget) = update.default_budget {
            self.default_budget = Some(budget);
        }
        if let Some(format) = update.format {
            self.format = Some(format.as_str().to_string());
        }
    }

    /// Merge `update` into the user's config file.
    pub fn persist(update: ConfigUpdate) -> Result<PathBuf, ConfigError> {
        let path = config_path()?;
        Self::persist_to(&path, update)?;
        Ok(path)
    }

    /// Merge `update` into the file at `path`. Environment values are never
    /// written back.
    pub fn persist_to(path: &Path, update: ConfigUpdate) -> Result<Self, ConfigError> {
        let mut settings = Self::read_file(path)?;
        settings.apply(update);

        let io_err = |source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        };
        if let Some(dir) = path.parent() {
            create_private_dir(dir).map_err(io_err)?;
        }
        let contents = toml::to_string(&settings)?;
        fs::write(path, contents).map_err(io_err)?;
        debug!(path = %path.display(), "config saved");
        Ok(settings)
    }
}

#[cfg(unix)]
fn create_private_dir(dir: &Path) -> std::io::Result<()> {
    use std::os::unix::fs::DirBuilderExt;
    fs::DirBuilder::new().recursive(true).mode(0o700).create(dir)
}

#[cfg(not(unix))]
fn create_private_dir(dir: &Path) -> std::io::Result<()> {
    fs::create_dir_all(dir)
}

/// `abcd...wxyz` for long tokens, `****` for short ones.
pub fn mask_token(token: Option<&str>) -> String {
    match token {
        None | Some("") => "(not set)".to_string(),
        Some(t) if t.chars().count() > 8 => {
            let chars: Vec<char> = t.chars().collect();
            let head: String = chars[..4].iter().collect();
            let tail: String = chars[chars.len() - 4..].iter().collect();
            format!("{}...{}", head, tail)
        }
        Some(_) => "****".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |k| map.get(k).cloned()
    }

    #[test]
    fn env_overrides_file_values() {
        let file = Settings {
            token: Some("file-token".into()),
            default_budget: Some("file-budget".into()),
            format: Some("table".into()),
        };
        let merged = file.with_env(env(&[(ENV_TOKEN, "env-token"), (ENV_FORMAT, "")]));
        assert_eq!(merged.token(), Some("env-token"));
        assert_eq!(merged.default_budget(), Some("file-budget"));
        assert_eq!(merged.output_format().unwrap(), Some(OutputFormat::Table));
    }

    #[test]
    fn unknown_format_is_rejected() {
        let s = Settings {
            format: Some("yaml".into()),
            ..Settings::default()
        };
        assert!(matches!(
            s.output_format(),
            Err(ConfigError::InvalidFormat(f)) if f == "yaml"
        ));
    }

    #[test]
    fn config_dir_honors_override() {
        let dir = config_dir_with(env(&[(ENV_CONFIG_DIR, "/tmp/ynabctl-test")])).unwrap();
        assert_eq!(dir, PathBuf::from("/tmp/ynabctl-test"));
    }

    #[test]
    fn masks_tokens() {
        assert_eq!(mask_token(None), "(not set)");
        assert_eq!(mask_token(Some("short")), "****");
        assert_eq!(mask_token(Some("abcdefghijkl")), "abcd...ijkl");
    }
}
