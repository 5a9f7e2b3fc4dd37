use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Hex color overrides for the theme (`#RRGGBB` or `#RGB`)
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct ThemeOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accent: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub danger: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_dim: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bg_selected: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inactive: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub header: Option<String>,
}

/// Command used to open links. Either a single string split on whitespace
/// (`"firefox --new-tab"`, no quoting), or an argument list for programs whose
/// path contains spaces (`["C:\\Program Files\\Firefox\\firefox.exe", "-new-tab"]`).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum Opener {
    Command(String),
    Argv(Vec<String>),
}

impl Opener {
    /// Program followed by its arguments
    pub fn argv(&self) -> Vec<String> {
        match self {
            Opener::Command(cmd) => cmd.split_whitespace().map(|s| s.to_string()).collect(),
            Opener::Argv(argv) => argv.clone(),
        }
    }

    fn is_blank(&self) -> bool {
        match self {
            Opener::Command(cmd) => cmd.trim().is_empty(),
            Opener::Argv(argv) => argv.first().map(|p| p.trim().is_empty()).unwrap_or(true),
        }
    }
}

/// User settings. Section passwords and link catalogs are never read from here.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct AppConfig {
    /// Command used to open links; platform opener when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opener: Option<Opener>,

    /// Log filter used when RUST_LOG is not set (e.g. "debug")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_level: Option<String>,

    #[serde(default)]
    pub theme: ThemeOverrides,
}

impl AppConfig {
    /// Get the default config file path
    pub fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?
            .join("mob-portal");

        Ok(config_dir.join("config.toml"))
    }

    /// Load config from `path`, or from the default location (writing a default file
    /// there on first run). Never fails: when the file can't be used the defaults are
    /// returned together with a warning for the caller to report once logging is up.
    pub fn load_or_default(path: Option<&Path>) -> (Self, Option<String>) {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => {
                let path = match Self::config_path() {
                    Ok(p) => p,
                    Err(e) => return (AppConfig::default(), Some(e.to_string())),
                };
                if !path.exists() {
                    let config = AppConfig::default();
                    let warning = config
                        .save_to(&path)
                        .err()
                        .map(|e| format!("Could not write default config: {:#}", e));
                    return (config, warning);
                }
                path
            }
        };

        match Self::load_from(&path) {
            Ok(config) => (config, None),
            Err(e) => (AppConfig::default(), Some(format!("{:#}", e))),
        }
    }

    /// Load config from an explicit path
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        Self::parse(&content).with_context(|| format!("Failed to parse config {}", path.display()))
    }

    pub fn parse(content: &str) -> Result<Self> {
        let mut config: AppConfig = toml::from_str(content)?;

        // Treat blank values as unset
        if config.opener.as_ref().map(|o| o.is_blank()).unwrap_or(false) {
            config.opener = None;
        }
        if config.log_level.as_ref().map(|s| s.trim().is_empty()).unwrap_or(false) {
            config.log_level = None;
        }

        Ok(config)
    }

    /// Save config to a file, creating its directory
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
