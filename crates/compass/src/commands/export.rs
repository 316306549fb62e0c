//! `compass export` command implementation.

use clap::{Args, ValueEnum};
use compass_config::SiteConfig;
use serde::Serialize;

use super::ConfigArgs;
use crate::error::CliError;
use crate::output::Output;

/// Output format for the export command.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub(crate) enum ExportFormat {
    Toml,
    Json,
}

/// Arguments for the export command.
#[derive(Args)]
pub(crate) struct ExportArgs {
    #[command(flatten)]
    config: ConfigArgs,

    /// Output format.
    #[arg(short, long, value_enum, default_value_t = ExportFormat::Toml)]
    format: ExportFormat,
}

/// JSON export document: the site config plus its normalized base path.
#[derive(Serialize)]
struct JsonExport<'a> {
    site: &'a SiteConfig,
    base_path: String,
}

impl ExportArgs {
    /// Print the site config after env expansion and overrides.
    pub(crate) fn execute(self, output: &Output) -> Result<(), CliError> {
        let config = self.config.load()?;
        output.data(&render(&config.site, self.format)?)?;
        Ok(())
    }
}

fn render(site: &SiteConfig, format: ExportFormat) -> Result<String, CliError> {
    match format {
        ExportFormat::Toml => Ok(site.to_toml()?),
        ExportFormat::Json => Ok(serde_json::to_string_pretty(&JsonExport {
            site,
            base_path: site.base_path(),
        })?),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use compass_config::{NavGroup, NavItem};
    use pretty_assertions::assert_eq;

    fn site() -> SiteConfig {
        SiteConfig {
            url: "https://example.github.io/Docs".to_owned(),
            base: "Docs/".to_owned(),
            title: "Docs".to_owned(),
            social: Vec::new(),
            sidebar: vec![NavGroup::with_items(
                "Guides",
                vec![NavItem::slug("Start", "guides/start")],
            )],
            plugins: Vec::new(),
        }
    }

    #[test]
    fn test_render_toml_parses_back() {
        #[derive(serde::Deserialize)]
        struct Document {
            site: SiteConfig,
        }

        let text = render(&site(), ExportFormat::Toml).unwrap();
        let doc: Document = toml::from_str(&text).unwrap();

        assert_eq!(doc.site, site());
    }

    #[test]
    fn test_render_json_includes_base_path() {
        let text = render(&site(), ExportFormat::Json).unwrap();
        let json: serde_json::Value = serde_json::from_str(&text).unwrap();

        assert_eq!(json["base_path"], "/Docs");
        assert_eq!(json["site"]["title"], "Docs");
        assert_eq!(json["site"]["sidebar"][0]["items"][0]["slug"], "guides/start");
    }
}
