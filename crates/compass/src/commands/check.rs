//! `compass check` command implementation.

use clap::Args;
use compass_config::Config;
use compass_nav::{NavError, ResolvedSidebar, SidebarEntry, resolve_sidebar};

use super::ConfigArgs;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the check command.
#[derive(Args)]
pub(crate) struct CheckArgs {
    #[command(flatten)]
    config: ConfigArgs,
}

impl CheckArgs {
    /// Execute the check command.
    ///
    /// # Errors
    ///
    /// Returns an error if the config is invalid or any sidebar target is
    /// unresolved. Each unresolved target is printed before returning.
    pub(crate) fn execute(self, output: &Output) -> Result<(), CliError> {
        let config = self.config.load()?;

        if let Some(path) = &config.config_path {
            output.info(&format!("Config: {}", path.display()));
        }
        output.info(&format!(
            "Content: {}",
            config.content_resolved.dir.display()
        ));
        output.highlight(&site_heading(&config));

        tracing::info!(
            groups = config.site.sidebar.len(),
            declared_links = config.site.leaves().len(),
            "Resolving sidebar"
        );
        let sidebar = match resolve_sidebar(&config) {
            Ok(sidebar) => sidebar,
            Err(err) => {
                for line in unresolved_report(&err) {
                    output.error(&line);
                }
                return Err(err.into());
            }
        };

        if let Some(warning) = duplicate_warning(&sidebar) {
            output.warning(&warning);
        }
        output.success(&summary(&config, &sidebar));
        Ok(())
    }
}

/// Site title followed by its public root URL.
fn site_heading(config: &Config) -> String {
    format!(
        "{} ({}{})",
        config.site.title,
        config.site.url.trim_end_matches('/'),
        config.site.base_path().trim_end_matches('/')
    )
}

/// One indented line per unresolved target.
fn unresolved_report(err: &NavError) -> Vec<String> {
    let NavError::Unresolved(items) = err;
    items.iter().map(|item| format!("  {item}")).collect()
}

fn duplicate_warning(sidebar: &ResolvedSidebar) -> Option<String> {
    (sidebar.duplicate_pages > 0).then(|| {
        format!(
            "{} content file(s) skipped because their slug is already taken",
            sidebar.duplicate_pages
        )
    })
}

fn summary(config: &Config, sidebar: &ResolvedSidebar) -> String {
    let links: usize = sidebar.entries.iter().map(SidebarEntry::link_count).sum();
    format!(
        "OK: {} group(s), {} link(s), {} content page(s), {} plugin(s)",
        sidebar.entries.len(),
        links,
        sidebar.page_count,
        config.site.plugins.len()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::tests::demo_config;
    use pretty_assertions::assert_eq;
    use std::path::PathBuf;

    #[test]
    fn test_summary_for_demo_site() {
        let config = demo_config();
        let sidebar = resolve_sidebar(&config).unwrap();

        assert_eq!(
            summary(&config, &sidebar),
            "OK: 2 group(s), 10 link(s), 11 content page(s), 1 plugin(s)"
        );
        assert_eq!(duplicate_warning(&sidebar), None);
    }

    #[test]
    fn test_site_heading_joins_url_and_base() {
        let toml = r#"
[site]
url = "https://example.github.io/"
base = "Docs/"
title = "Docs"
"#;
        let config = Config::from_toml(toml, std::path::Path::new("/project")).unwrap();

        assert_eq!(site_heading(&config), "Docs (https://example.github.io/Docs)");
    }

    #[test]
    fn test_unresolved_report_lists_every_target() {
        let mut config = demo_config();
        config.content_resolved.dir = PathBuf::from("/nonexistent/content");

        let err = resolve_sidebar(&config).unwrap_err();
        let lines = unresolved_report(&err);

        assert_eq!(lines.len(), 8);
        assert_eq!(
            lines[0],
            "  `Flashing Raspberry and plugin`: no content page for slug \
             `guides/setup/raspberry-and-plug`"
        );
        assert_eq!(
            lines[7],
            "  `Reference`: no pages under directory `reference`"
        );
    }

    #[test]
    fn test_duplicate_warning_counts_files() {
        let sidebar = ResolvedSidebar {
            entries: Vec::new(),
            page_count: 1,
            duplicate_pages: 2,
        };

        assert_eq!(
            duplicate_warning(&sidebar).as_deref(),
            Some("2 content file(s) skipped because their slug is already taken")
        );
    }
}
