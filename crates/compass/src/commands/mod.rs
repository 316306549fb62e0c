//! CLI command implementations.

mod check;
mod export;
mod nav;

use std::path::PathBuf;

use clap::Args;
use compass_config::{CliSettings, Config};

use crate::error::CliError;

pub(crate) use check::CheckArgs;
pub(crate) use export::ExportArgs;
pub(crate) use nav::NavArgs;

/// Config location and overrides shared by every command.
#[derive(Args, Debug, Default)]
pub(crate) struct ConfigArgs {
    /// Path to configuration file (default: auto-discover compass.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Content directory (overrides config).
    #[arg(long)]
    content_dir: Option<PathBuf>,

    /// Published site URL (overrides config).
    #[arg(long, env = "COMPASS_SITE_URL")]
    site_url: Option<String>,

    /// Base path the site is served under (overrides config).
    #[arg(long, env = "COMPASS_BASE")]
    base: Option<String>,
}

impl ConfigArgs {
    /// Load and validate the configuration with CLI overrides applied.
    pub(crate) fn load(self) -> Result<Config, CliError> {
        let cli_settings = CliSettings {
            site_url: self.site_url,
            base_path: self.base,
            content_dir: self.content_dir,
        };
        Ok(Config::load(self.config.as_deref(), Some(&cli_settings))?)
    }
}
