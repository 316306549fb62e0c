//! Site identity, social links and theme plugins.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::ConfigError;
use crate::nav::{LeafRef, NavGroup, Target};

/// Root description of a documentation site.
///
/// Built once when the configuration is loaded and never mutated afterwards.
/// Consumers receive it by reference.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SiteConfig {
    /// Absolute URL of the published site origin.
    pub url: String,
    /// Routing prefix the site is served under, as written in the config.
    ///
    /// Use [`SiteConfig::base_path`] for the normalized form.
    #[serde(default = "default_base")]
    pub base: String,
    /// Display name of the site.
    pub title: String,
    /// Social links shown in the site header.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub social: Vec<SocialLink>,
    /// Sidebar navigation groups.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sidebar: Vec<NavGroup>,
    /// Theme plugins activated for the generator.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub plugins: Vec<ThemePlugin>,
}

fn default_base() -> String {
    "/".to_owned()
}

/// Link to an external profile, rendered as an icon.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SocialLink {
    /// Icon key.
    pub icon: SocialIcon,
    /// Accessible label.
    pub label: String,
    /// Absolute URL the icon links to.
    pub href: String,
}

/// Known social icon keys.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SocialIcon {
    Github,
    Gitlab,
    Bitbucket,
    Codeberg,
    Discord,
    Slack,
    Matrix,
    Mastodon,
    Bluesky,
    #[serde(rename = "x.com")]
    XCom,
    Linkedin,
    Youtube,
    Twitch,
    Telegram,
    Reddit,
    Rss,
    Email,
}

impl SocialIcon {
    /// Icon key as written in the config file.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Github => "github",
            Self::Gitlab => "gitlab",
            Self::Bitbucket => "bitbucket",
            Self::Codeberg => "codeberg",
            Self::Discord => "discord",
            Self::Slack => "slack",
            Self::Matrix => "matrix",
            Self::Mastodon => "mastodon",
            Self::Bluesky => "bluesky",
            Self::XCom => "x.com",
            Self::Linkedin => "linkedin",
            Self::Youtube => "youtube",
            Self::Twitch => "twitch",
            Self::Telegram => "telegram",
            Self::Reddit => "reddit",
            Self::Rss => "rss",
            Self::Email => "email",
        }
    }
}

impl fmt::Display for SocialIcon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A theme plugin and its options.
///
/// Options are passed through to the plugin untouched.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ThemePlugin {
    /// Plugin identifier (e.g. `starlight-theme-nova`).
    pub name: String,
    /// Plugin-specific options.
    #[serde(default, skip_serializing_if = "toml::Table::is_empty")]
    pub options: toml::Table,
}

impl ThemePlugin {
    /// Plugin with no options.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            options: toml::Table::new(),
        }
    }
}

impl SiteConfig {
    /// Normalized base path: leading slash, no trailing slash, `/` for root.
    ///
    /// `RoboCrew`, `/RoboCrew` and `/RoboCrew/` all normalize to `/RoboCrew`.
    #[must_use]
    pub fn base_path(&self) -> String {
        let trimmed = self.base.trim().trim_matches('/');
        if trimmed.is_empty() {
            "/".to_owned()
        } else {
            format!("/{trimmed}")
        }
    }

    /// Every declared sidebar leaf, depth-first in declaration order.
    #[must_use]
    pub fn leaves(&self) -> Vec<LeafRef<'_>> {
        self.sidebar.iter().flat_map(NavGroup::leaves).collect()
    }

    /// Slugs referenced by sidebar leaves, in declaration order.
    #[must_use]
    pub fn slugs(&self) -> Vec<&str> {
        self.leaves()
            .into_iter()
            .filter_map(|leaf| match leaf.target {
                Target::Slug(slug) => Some(slug.as_str()),
                Target::Link(_) => None,
            })
            .collect()
    }

    /// Whether a plugin with the given name is activated.
    #[must_use]
    pub fn has_plugin(&self, name: &str) -> bool {
        self.plugins.iter().any(|p| p.name == name)
    }

    /// Serialize to the `[site]` TOML representation.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        #[derive(Serialize)]
        struct Document<'a> {
            site: &'a SiteConfig,
        }
        Ok(toml::to_string(&Document { site: self })?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nav::NavItem;
    use pretty_assertions::assert_eq;

    static_assertions::assert_impl_all!(SiteConfig: Send, Sync);

    fn site_with_base(base: &str) -> SiteConfig {
        SiteConfig {
            url: "https://example.github.io".to_owned(),
            base: base.to_owned(),
            title: "Example".to_owned(),
            social: Vec::new(),
            sidebar: Vec::new(),
            plugins: Vec::new(),
        }
    }

    #[derive(Deserialize)]
    struct Document {
        site: SiteConfig,
    }

    #[test]
    fn test_base_path_normalization() {
        assert_eq!(site_with_base("RoboCrew").base_path(), "/RoboCrew");
        assert_eq!(site_with_base("/RoboCrew").base_path(), "/RoboCrew");
        assert_eq!(site_with_base("/RoboCrew/").base_path(), "/RoboCrew");
        assert_eq!(site_with_base("docs/v2").base_path(), "/docs/v2");
        assert_eq!(site_with_base("/").base_path(), "/");
    }

    #[test]
    fn test_parse_site_defaults() {
        let doc: Document = toml::from_str(
            r#"
[site]
url = "https://example.com"
title = "Example"
"#,
        )
        .unwrap();

        assert_eq!(doc.site.base, "/");
        assert!(doc.site.social.is_empty());
        assert!(doc.site.sidebar.is_empty());
        assert!(doc.site.plugins.is_empty());
    }

    #[test]
    fn test_parse_social_links() {
        let doc: Document = toml::from_str(
            r#"
[site]
url = "https://example.com"
title = "Example"
social = [
  { icon = "github", label = "GitHub", href = "https://github.com/example" },
  { icon = "x.com", label = "X", href = "https://x.com/example" },
]
"#,
        )
        .unwrap();

        let icons: Vec<_> = doc.site.social.iter().map(|s| s.icon).collect();
        assert_eq!(icons, vec![SocialIcon::Github, SocialIcon::XCom]);
        assert_eq!(doc.site.social[1].icon.to_string(), "x.com");
    }

    #[test]
    fn test_unknown_social_icon_rejected() {
        let result: Result<Document, _> = toml::from_str(
            r#"
[site]
url = "https://example.com"
title = "Example"
social = [{ icon = "myspace", label = "MySpace", href = "https://myspace.com" }]
"#,
        );

        let err = result.err().unwrap();
        assert!(err.to_string().contains("myspace"), "unexpected error: {err}");
    }

    #[test]
    fn test_parse_plugin_options() {
        let doc: Document = toml::from_str(
            r#"
[site]
url = "https://example.com"
title = "Example"

[[site.plugins]]
name = "starlight-theme-nova"

[[site.plugins]]
name = "starlight-links-validator"
options = { errorOnRelativeLinks = false }
"#,
        )
        .unwrap();

        assert!(doc.site.has_plugin("starlight-theme-nova"));
        assert!(!doc.site.has_plugin("starlight-blog"));
        assert!(doc.site.plugins[0].options.is_empty());
        assert_eq!(
            doc.site.plugins[1].options.get("errorOnRelativeLinks"),
            Some(&toml::Value::Boolean(false))
        );
    }

    #[test]
    fn test_slugs_skip_links() {
        let mut site = site_with_base("/");
        site.sidebar = vec![NavGroup::with_items(
            "Guides",
            vec![
                NavItem::slug("Start", "guides/start"),
                NavItem::link("GitHub", "https://github.com/example"),
                NavItem::slug("Audio", "guides/examples/audio"),
            ],
        )];

        assert_eq!(site.slugs(), vec!["guides/start", "guides/examples/audio"]);
        assert_eq!(site.leaves().len(), 3);
    }

    #[test]
    fn test_to_toml_round_trip() {
        let mut site = site_with_base("RoboCrew");
        site.social = vec![SocialLink {
            icon: SocialIcon::Github,
            label: "GitHub".to_owned(),
            href: "https://github.com/example/repo".to_owned(),
        }];
        site.sidebar = vec![
            NavGroup::with_items(
                "Guides",
                vec![
                    NavItem::Group(NavGroup::with_items(
                        "First Setup",
                        vec![
                            NavItem::slug("Flashing", "guides/setup/raspberry-and-plug"),
                            NavItem::slug("Installing", "guides/setup/installing-robocrew"),
                            NavItem::slug("udev", "guides/setup/udev-rules"),
                        ],
                    )),
                    NavItem::slug("How to start", "guides/start"),
                ],
            ),
            NavGroup::autogenerated("Reference", "reference"),
        ];
        let mut plugin = ThemePlugin::new("starlight-theme-nova");
        plugin
            .options
            .insert("accent".to_owned(), toml::Value::String("teal".to_owned()));
        site.plugins = vec![plugin];

        let text = site.to_toml().unwrap();
        let parsed: Document = toml::from_str(&text).unwrap();

        assert_eq!(parsed.site, site);
    }
}
