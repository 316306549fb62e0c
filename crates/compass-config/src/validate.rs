//! Structural validation of [`SiteConfig`].
//!
//! Checks shape only: labels are present, URLs parse, slugs are well-formed.
//! Whether a slug points at a real page is decided when the sidebar is
//! resolved against the content tree.

use std::collections::HashSet;

use url::Url;

use crate::ConfigError;
use crate::nav::{GroupContents, NavGroup, NavItem, Target};
use crate::site::SiteConfig;

impl SiteConfig {
    /// Validate the configuration value.
    ///
    /// Stops at the first problem and names the offending field, e.g.
    /// `site.sidebar[0].items[2].label`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any check fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_identity()?;
        self.validate_social()?;
        for (i, group) in self.sidebar.iter().enumerate() {
            validate_group(group, &format!("site.sidebar[{i}]"))?;
        }
        self.validate_plugins()?;
        Ok(())
    }

    fn validate_identity(&self) -> Result<(), ConfigError> {
        require_http_url(&self.url, "site.url")?;
        require_base_path(&self.base, "site.base")?;
        require_non_empty(&self.title, "site.title")?;
        Ok(())
    }

    fn validate_social(&self) -> Result<(), ConfigError> {
        for (i, link) in self.social.iter().enumerate() {
            require_non_empty(&link.label, &format!("site.social[{i}].label"))?;
            let field = format!("site.social[{i}].href");
            let url = require_absolute_url(&link.href, &field)?;
            if url.scheme() != "mailto" && url.host_str().is_none() {
                return Err(ConfigError::Validation(format!("{field} must include a host")));
            }
        }
        Ok(())
    }

    fn validate_plugins(&self) -> Result<(), ConfigError> {
        let mut seen = HashSet::new();
        for (i, plugin) in self.plugins.iter().enumerate() {
            let field = format!("site.plugins[{i}].name");
            require_non_empty(&plugin.name, &field)?;
            if !seen.insert(plugin.name.as_str()) {
                return Err(ConfigError::Validation(format!(
                    "{field}: plugin `{}` is listed more than once",
                    plugin.name
                )));
            }
        }
        Ok(())
    }
}

fn validate_group(group: &NavGroup, prefix: &str) -> Result<(), ConfigError> {
    require_non_empty(&group.label, &format!("{prefix}.label"))?;
    match &group.contents {
        GroupContents::Items(items) => {
            for (i, item) in items.iter().enumerate() {
                validate_item(item, &format!("{prefix}.items[{i}]"))?;
            }
        }
        GroupContents::Autogenerate(rule) => {
            require_slug(&rule.directory, &format!("{prefix}.autogenerate.directory"))?;
        }
    }
    Ok(())
}

fn validate_item(item: &NavItem, prefix: &str) -> Result<(), ConfigError> {
    match item {
        NavItem::Leaf { label, target } => {
            require_non_empty(label, &format!("{prefix}.label"))?;
            match target {
                Target::Slug(slug) => require_slug(slug, &format!("{prefix}.slug")),
                Target::Link(link) => require_link(link, &format!("{prefix}.link")),
            }
        }
        NavItem::Group(group) => validate_group(group, prefix),
    }
}

/// Require a string field to contain something other than whitespace.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

/// Require a field to parse as an absolute URL.
fn require_absolute_url(value: &str, field: &str) -> Result<Url, ConfigError> {
    require_non_empty(value, field)?;
    Url::parse(value)
        .map_err(|e| ConfigError::Validation(format!("{field} is not an absolute URL: {e}")))
}

/// Require an absolute http:// or https:// URL with a host.
fn require_http_url(value: &str, field: &str) -> Result<(), ConfigError> {
    let url = require_absolute_url(value, field)?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::Validation(format!(
            "{field} must start with http:// or https://"
        )));
    }
    if url.host_str().is_none() {
        return Err(ConfigError::Validation(format!("{field} must include a host")));
    }
    Ok(())
}

/// Require a base path without empty or parent segments.
fn require_base_path(value: &str, field: &str) -> Result<(), ConfigError> {
    require_non_empty(value, field)?;
    let trimmed = value.trim();
    if trimmed.contains("//") {
        return Err(ConfigError::Validation(format!(
            "{field} cannot contain repeated slashes"
        )));
    }
    if trimmed.split('/').any(|segment| segment == "..") {
        return Err(ConfigError::Validation(format!(
            "{field} cannot contain `..` segments"
        )));
    }
    if trimmed.chars().any(char::is_whitespace) {
        return Err(ConfigError::Validation(format!("{field} cannot contain whitespace")));
    }
    Ok(())
}

/// Require a content slug: relative, slash-separated, no empty or `..` segments.
///
/// Slugs derived from file names are lower-cased, so upper-case letters are
/// rejected here rather than failing later as unresolved.
fn require_slug(value: &str, field: &str) -> Result<(), ConfigError> {
    require_non_empty(value, field)?;
    if value.chars().any(char::is_uppercase) {
        return Err(ConfigError::Validation(format!(
            "{field} `{value}` must be lower-case (use `{}`)",
            value.to_lowercase()
        )));
    }
    if value.starts_with('/') || value.ends_with('/') {
        return Err(ConfigError::Validation(format!(
            "{field} `{value}` cannot start or end with /"
        )));
    }
    if value.chars().any(char::is_whitespace) {
        return Err(ConfigError::Validation(format!(
            "{field} `{value}` cannot contain whitespace"
        )));
    }
    if value.split('/').any(|segment| segment.is_empty() || segment == "..") {
        return Err(ConfigError::Validation(format!(
            "{field} `{value}` cannot contain empty or `..` segments"
        )));
    }
    Ok(())
}

/// Require an absolute URL or a root-relative path.
fn require_link(value: &str, field: &str) -> Result<(), ConfigError> {
    require_non_empty(value, field)?;
    if value.starts_with('/') && !value.starts_with("//") {
        return Ok(());
    }
    Url::parse(value).map(|_| ()).map_err(|_| {
        ConfigError::Validation(format!(
            "{field} `{value}` must be an absolute URL or a path starting with /"
        ))
    })
}
