//! `compass nav` command implementation.

use clap::Args;
use compass_nav::{ResolvedSidebar, resolve_sidebar};

use super::ConfigArgs;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the nav command.
#[derive(Args)]
pub(crate) struct NavArgs {
    #[command(flatten)]
    config: ConfigArgs,
}

impl NavArgs {
    /// Print the resolved sidebar as pretty JSON on stdout.
    pub(crate) fn execute(self, output: &Output) -> Result<(), CliError> {
        let config = self.config.load()?;
        let sidebar = resolve_sidebar(&config)?;
        output.data(&render(&sidebar)?)?;
        Ok(())
    }
}

fn render(sidebar: &ResolvedSidebar) -> Result<String, CliError> {
    Ok(serde_json::to_string_pretty(sidebar)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::tests::demo_config;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_render_demo_sidebar() {
        let sidebar = resolve_sidebar(&demo_config()).unwrap();

        let text = render(&sidebar).unwrap();
        let json: serde_json::Value = serde_json::from_str(&text).unwrap();

        assert_eq!(json["page_count"], 11);
        assert!(json.get("duplicate_pages").is_none());

        let guides = &json["entries"][0];
        assert_eq!(guides["type"], "group");
        assert_eq!(guides["label"], "Guides");
        assert_eq!(guides["entries"][1]["type"], "link");
        assert_eq!(guides["entries"][1]["label"], "How to start (Short Guide)");

        let reference = &json["entries"][1]["entries"];
        assert_eq!(reference[0]["label"], "LLM Agent");
        assert_eq!(reference.as_array().map(Vec::len), Some(3));
    }
}
