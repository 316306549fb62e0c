//! Site configuration for Compass.
//!
//! Parses `compass.toml` with serde into an immutable [`SiteConfig`] value
//! (site identity, social links, sidebar tree, theme plugins) and provides
//! auto-discovery of the config file in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Environment Variable Expansion
//!
//! String configuration values support environment variable expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! Expanded fields:
//! - `site.url`
//! - `site.base`
//! - `content.dir`

mod expand;
pub mod nav;
pub mod site;
mod validate;

use serde::Deserialize;
use std::path::{Path, PathBuf};

pub use nav::{Autogenerate, GroupContents, LeafRef, NavGroup, NavItem, Target};
pub use site::{SiteConfig, SocialIcon, SocialLink, ThemePlugin};

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override the published site URL.
    pub site_url: Option<String>,
    /// Override the base path.
    pub base_path: Option<String>,
    /// Override the content directory.
    pub content_dir: Option<PathBuf>,
}

/// Configuration filename to search for.
pub const CONFIG_FILENAME: &str = "compass.toml";

/// Content directory used when `[content]` does not set one.
const DEFAULT_CONTENT_DIR: &str = "src/content/docs";

/// Loaded configuration.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Site description.
    pub site: SiteConfig,
    /// Content configuration (paths are relative strings from TOML).
    #[serde(default)]
    content: ContentConfigRaw,

    /// Resolved content configuration (set after loading).
    #[serde(skip)]
    pub content_resolved: ContentConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

/// Raw content configuration as parsed from TOML.
#[derive(Debug, Deserialize, Default)]
#[serde(default, deny_unknown_fields)]
struct ContentConfigRaw {
    dir: Option<String>,
}

/// Resolved content configuration with absolute paths.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ContentConfig {
    /// Directory holding the content pages.
    pub dir: PathBuf,
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// TOML serialization error.
    #[error("TOML serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`site.url`").
        field: String,
        /// Error message (e.g., "${`COMPASS_SITE_URL`} not set").
        message: String,
    },
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `compass.toml` in current directory and parents.
    ///
    /// CLI settings are applied after loading and path resolution, and the
    /// result is validated last, so overrides are subject to the same checks.
    ///
    /// # Errors
    ///
    /// Returns error if no config file is found, parsing fails, an env
    /// variable is missing, or validation fails.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let path = match config_path {
            Some(path) if !path.exists() => {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Some(path) => path.to_path_buf(),
            None => Self::discover_config().ok_or_else(|| {
                let cwd = std::env::current_dir().unwrap_or_default();
                ConfigError::NotFound(cwd.join(CONFIG_FILENAME))
            })?,
        };

        let mut config = Self::load_from_file(&path)?;

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        config.validate()?;

        tracing::debug!(
            path = %path.display(),
            content_dir = %config.content_resolved.dir.display(),
            groups = config.site.sidebar.len(),
            leaves = config.site.leaves().len(),
            "Loaded site configuration"
        );

        Ok(config)
    }

    /// Parse configuration from TOML text.
    ///
    /// Relative paths are resolved against `config_dir`. The result is not
    /// validated; call [`Config::validate`] once overrides are applied.
    ///
    /// # Errors
    ///
    /// Returns error if parsing or env expansion fails.
    pub fn from_toml(content: &str, config_dir: &Path) -> Result<Self, ConfigError> {
        let mut config: Self = toml::from_str(content)?;

        // Expand environment variables before path resolution
        config.expand_env_vars()?;
        config.resolve_paths(config_dir);

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.content_resolved.dir.as_os_str().is_empty() {
            return Err(ConfigError::Validation(
                "content.dir cannot be empty".to_owned(),
            ));
        }
        self.site.validate()
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(url) = &settings.site_url {
            self.site.url.clone_from(url);
        }
        if let Some(base) = &settings.base_path {
            self.site.base.clone_from(base);
        }
        if let Some(dir) = &settings.content_dir {
            self.content_resolved.dir.clone_from(dir);
        }
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config_dir = path.parent().unwrap_or(Path::new("."));
        let mut config = Self::from_toml(&content, config_dir)?;
        config.config_path = Some(path.to_path_buf());
        Ok(config)
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        expand::expand_in_place(&mut self.site.url, "site.url")?;
        expand::expand_in_place(&mut self.site.base, "site.base")?;
        if let Some(ref mut dir) = self.content.dir {
            expand::expand_in_place(dir, "content.dir")?;
        }
        Ok(())
    }

    /// Resolve relative paths to absolute paths based on config directory.
    fn resolve_paths(&mut self, config_dir: &Path) {
        let dir = self.content.dir.as_deref().unwrap_or(DEFAULT_CONTENT_DIR);
        self.content_resolved = ContentConfig {
            dir: config_dir.join(dir),
        };
    }
}
