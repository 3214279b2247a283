//! Settings for the remote spreadsheet API.
//!
//! Built once in `main` and passed down explicitly. The bearer token is
//! resolved from, in order: the `--token-file` flag, the `SHEETCLIP_TOKEN`
//! environment variable, then `token_file`/`token` in `config.toml` under
//! the sheetclip config directory. Acquiring the token itself (e.g. via
//! `gcloud auth print-access-token`) is left to external tooling.

use anyhow::{Context, Result, bail};
use directories::ProjectDirs;
use serde::Deserialize;
use std::path::PathBuf;

pub const TOKEN_ENV_VAR: &str = "SHEETCLIP_TOKEN";

const MAX_CONFIG_FILE_BYTES: u64 = 65_536;

#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    token: Option<String>,
    token_file: Option<PathBuf>,
}

/// Resolved configuration for one invocation.
#[derive(Debug, Default)]
pub struct Settings {
    /// Token taken directly from the environment or config file.
    pub token: Option<String>,
    /// File to read the token from; takes precedence over `token`.
    pub token_file: Option<PathBuf>,
}

impl Settings {
    /// Load settings, applying the CLI override. Problems with the optional
    /// config file are reported as warnings, not hard failures.
    pub fn load(token_file_flag: Option<PathBuf>) -> (Settings, Vec<String>) {
        let mut warnings = Vec::new();
        let mut file = ConfigFile::default();

        if let Some(path) = config_file_path() {
            if path.exists() {
                match read_config_file(&path) {
                    Ok(parsed) => file = parsed,
                    Err(err) => warnings.push(format!("{}: {}", path.display(), err)),
                }
            }
        }

        let env_token = std::env::var(TOKEN_ENV_VAR).ok();
        (Settings::resolve(token_file_flag, env_token, file), warnings)
    }

    /// Combine the three token sources in precedence order: the CLI flag
    /// beats the environment variable, which beats the config file. A
    /// non-blank env token discards the config file's `token_file` so the
    /// environment fully shadows the file.
    fn resolve(
        token_file_flag: Option<PathBuf>,
        env_token: Option<String>,
        file: ConfigFile,
    ) -> Settings {
        let mut settings = Settings {
            token: file.token,
            token_file: file.token_file,
        };

        if let Some(token) = env_token {
            if !token.trim().is_empty() {
                settings.token = Some(token);
                settings.token_file = None;
            }
        }

        if token_file_flag.is_some() {
            settings.token_file = token_file_flag;
        }

        settings
    }

    /// Resolve the bearer token, or fail with a message naming the sources.
    pub fn require_token(&self) -> Result<String> {
        if let Some(path) = &self.token_file {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read token file {}", path.display()))?;
            let token = raw.trim();
            if token.is_empty() {
                bail!("token file {} is empty", path.display());
            }
            return Ok(token.to_string());
        }

        if let Some(token) = &self.token {
            let token = token.trim();
            if !token.is_empty() {
                return Ok(token.to_string());
            }
        }

        bail!(
            "no access token configured; set {}, pass --token-file, or add token/token_file to {}",
            TOKEN_ENV_VAR,
            config_file_path()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "config.toml".to_string())
        )
    }

    /// Human-readable description of where the token will come from.
    pub fn token_source(&self) -> String {
        if let Some(path) = &self.token_file {
            format!("token file {}", path.display())
        } else if self.token.is_some() {
            format!("inline token ({} or config.toml)", TOKEN_ENV_VAR)
        } else {
            "none".to_string()
        }
    }
}

/// Path of the optional config file, e.g. ~/.config/sheetclip/config.toml.
pub fn config_file_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", "sheetclip").map(|dirs| dirs.config_dir().join("config.toml"))
}

fn read_config_file(path: &std::path::Path) -> Result<ConfigFile> {
    let meta = std::fs::metadata(path)?;
    if meta.len() > MAX_CONFIG_FILE_BYTES {
        bail!(
            "refusing to read config: file too large ({} bytes, max {})",
            meta.len(),
            MAX_CONFIG_FILE_BYTES
        );
    }
    let content = std::fs::read_to_string(path)?;
    toml::from_str(&content).context("failed to parse config")
}
