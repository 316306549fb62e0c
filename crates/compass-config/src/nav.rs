//! Sidebar navigation tree.
//!
//! The sidebar is an ordered list of [`NavGroup`]s. A group holds either
//! explicit [`NavItem`]s or an [`Autogenerate`] rule that is expanded from the
//! content directory at resolution time. Items are leaves addressed by slug or
//! link, or nested groups.
//!
//! In TOML every node is a table with a `label` and exactly one of `slug`,
//! `link`, `items` or `autogenerate`:
//!
//! ```toml
//! [[site.sidebar]]
//! label = "Guides"
//!
//! [[site.sidebar.items]]
//! label = "How to start"
//! slug = "guides/start"
//!
//! [[site.sidebar]]
//! label = "Reference"
//! autogenerate = { directory = "reference" }
//! ```

use serde::{Deserialize, Serialize};

/// A labelled group of sidebar entries.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawNavNode", into = "RawNavNode")]
pub struct NavGroup {
    /// Display label.
    pub label: String,
    /// Whether the group renders collapsed by default.
    pub collapsed: bool,
    /// Where the group's children come from.
    pub contents: GroupContents,
}

/// Children of a [`NavGroup`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GroupContents {
    /// Explicitly declared children, in display order.
    Items(Vec<NavItem>),
    /// Children generated from every page under a content directory.
    Autogenerate(Autogenerate),
}

/// Rule for generating group children from the content tree.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Autogenerate {
    /// Content directory, relative to the content root (e.g. `reference`).
    pub directory: String,
}

/// A node inside a [`NavGroup`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawNavNode", into = "RawNavNode")]
pub enum NavItem {
    /// A single navigable entry.
    Leaf {
        /// Display label.
        label: String,
        /// What the entry points at.
        target: Target,
    },
    /// A nested group.
    Group(NavGroup),
}

/// Addressing mode of a navigation leaf.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Target {
    /// Content page identifier, resolved against the content tree.
    Slug(String),
    /// Direct link, either an absolute URL or a root-relative path.
    Link(String),
}

impl Target {
    /// The raw slug or link string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Slug(s) | Self::Link(s) => s,
        }
    }
}

/// A leaf reference produced by [`NavGroup::leaves`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LeafRef<'a> {
    /// Display label.
    pub label: &'a str,
    /// Target of the leaf.
    pub target: &'a Target,
}

impl NavGroup {
    /// Create a group with explicit items.
    #[must_use]
    pub fn with_items(label: impl Into<String>, items: Vec<NavItem>) -> Self {
        Self {
            label: label.into(),
            collapsed: false,
            contents: GroupContents::Items(items),
        }
    }

    /// Create a group generated from a content directory.
    #[must_use]
    pub fn autogenerated(label: impl Into<String>, directory: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            collapsed: false,
            contents: GroupContents::Autogenerate(Autogenerate {
                directory: directory.into(),
            }),
        }
    }

    /// Explicit items, or an empty slice for autogenerated groups.
    #[must_use]
    pub fn items(&self) -> &[NavItem] {
        match &self.contents {
            GroupContents::Items(items) => items,
            GroupContents::Autogenerate(_) => &[],
        }
    }

    /// Nesting depth of the group. A group without nested groups has depth 1.
    #[must_use]
    pub fn depth(&self) -> usize {
        1 + self
            .items()
            .iter()
            .filter_map(|item| match item {
                NavItem::Group(group) => Some(group.depth()),
                NavItem::Leaf { .. } => None,
            })
            .max()
            .unwrap_or(0)
    }

    /// All declared leaves in depth-first declaration order.
    #[must_use]
    pub fn leaves(&self) -> Vec<LeafRef<'_>> {
        let mut out = Vec::new();
        collect_leaves(self.items(), &mut out);
        out
    }
}

fn collect_leaves<'a>(items: &'a [NavItem], out: &mut Vec<LeafRef<'a>>) {
    for item in items {
        match item {
            NavItem::Leaf { label, target } => out.push(LeafRef { label, target }),
            NavItem::Group(group) => collect_leaves(group.items(), out),
        }
    }
}

impl NavItem {
    /// Leaf pointing at a content page.
    #[must_use]
    pub fn slug(label: impl Into<String>, slug: impl Into<String>) -> Self {
        Self::Leaf {
            label: label.into(),
            target: Target::Slug(slug.into()),
        }
    }

    /// Leaf pointing at a direct link.
    #[must_use]
    pub fn link(label: impl Into<String>, link: impl Into<String>) -> Self {
        Self::Leaf {
            label: label.into(),
            target: Target::Link(link.into()),
        }
    }

    /// Display label of the item.
    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Self::Leaf { label, .. } => label,
            Self::Group(group) => &group.label,
        }
    }
}

/// Wire form shared by groups and items.
///
/// Keeps the TOML shape flat (`slug`, `link`, `items`, `autogenerate` as
/// sibling keys) while the public types stay tagged.
#[derive(Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawNavNode {
    label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    slug: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    link: Option<String>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    collapsed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    autogenerate: Option<Autogenerate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    items: Option<Vec<NavItem>>,
}

impl TryFrom<RawNavNode> for NavGroup {
    type Error = String;

    fn try_from(raw: RawNavNode) -> Result<Self, Self::Error> {
        if raw.slug.is_some() || raw.link.is_some() {
            return Err(format!(
                "sidebar group `{}` cannot have `slug` or `link`; use `items` or `autogenerate`",
                raw.label
            ));
        }
        let contents = match (raw.items, raw.autogenerate) {
            (Some(items), None) => GroupContents::Items(items),
            (None, Some(rule)) => GroupContents::Autogenerate(rule),
            (Some(_), Some(_)) => {
                return Err(format!(
                    "sidebar group `{}` cannot have both `items` and `autogenerate`",
                    raw.label
                ));
            }
            (None, None) => {
                return Err(format!(
                    "sidebar group `{}` needs `items` or `autogenerate`",
                    raw.label
                ));
            }
        };
        Ok(Self {
            label: raw.label,
            collapsed: raw.collapsed,
            contents,
        })
    }
}

impl TryFrom<RawNavNode> for NavItem {
    type Error = String;

    fn try_from(mut raw: RawNavNode) -> Result<Self, Self::Error> {
        let has_children = raw.items.is_some() || raw.autogenerate.is_some();
        let target = match (raw.slug.take(), raw.link.take()) {
            (Some(_), Some(_)) => {
                return Err(format!(
                    "sidebar item `{}` has both `slug` and `link`; use exactly one",
                    raw.label
                ));
            }
            (Some(slug), None) => Some(Target::Slug(slug)),
            (None, Some(link)) => Some(Target::Link(link)),
            (None, None) => None,
        };

        match target {
            Some(_) if has_children => Err(format!(
                "sidebar item `{}` cannot combine a `slug` or `link` with `items` or `autogenerate`",
                raw.label
            )),
            Some(_) if raw.collapsed => Err(format!(
                "sidebar item `{}` is a link; `collapsed` only applies to groups",
                raw.label
            )),
            Some(target) => Ok(Self::Leaf {
                label: raw.label,
                target,
            }),
            None if has_children => NavGroup::try_from(raw).map(Self::Group),
            None => Err(format!(
                "sidebar item `{}` needs one of `slug`, `link`, `items` or `autogenerate`",
                raw.label
            )),
        }
    }
}

impl From<NavGroup> for RawNavNode {
    fn from(group: NavGroup) -> Self {
        let (items, autogenerate) = match group.contents {
            GroupContents::Items(items) => (Some(items), None),
            GroupContents::Autogenerate(rule) => (None, Some(rule)),
        };
        Self {
            label: group.label,
            slug: None,
            link: None,
            collapsed: group.collapsed,
            autogenerate,
            items,
        }
    }
}

impl From<NavItem> for RawNavNode {
    fn from(item: NavItem) -> Self {
        match item {
            NavItem::Leaf { label, target } => {
                let (slug, link) = match target {
                    Target::Slug(slug) => (Some(slug), None),
                    Target::Link(link) => (None, Some(link)),
                };
                Self {
                    label,
                    slug,
                    link,
                    collapsed: false,
                    autogenerate: None,
                    items: None,
                }
            }
            NavItem::Group(group) => group.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[derive(Debug, Deserialize, Serialize, PartialEq)]
    struct Wrapper {
        sidebar: Vec<NavGroup>,
    }

    fn parse(toml: &str) -> Result<Wrapper, toml::de::Error> {
        toml::from_str(toml)
    }

    #[test]
    fn test_parse_slug_leaf() {
        let wrapper = parse(
            r#"
[[sidebar]]
label = "Guides"
items = [{ label = "Start", slug = "guides/start" }]
"#,
        )
        .unwrap();

        assert_eq!(
            wrapper.sidebar,
            vec![NavGroup::with_items(
                "Guides",
                vec![NavItem::slug("Start", "guides/start")]
            )]
        );
    }

    #[test]
    fn test_parse_link_leaf() {
        let wrapper = parse(
            r#"
[[sidebar]]
label = "More"
items = [{ label = "GitHub", link = "https://github.com/example/repo" }]
"#,
        )
        .unwrap();

        let leaves = wrapper.sidebar[0].leaves();
        assert_eq!(leaves.len(), 1);
        assert_eq!(
            leaves[0].target,
            &Target::Link("https://github.com/example/repo".to_owned())
        );
    }

    #[test]
    fn test_parse_autogenerate_group() {
        let wrapper = parse(
            r#"
[[sidebar]]
label = "Reference"
collapsed = true
autogenerate = { directory = "reference" }
"#,
        )
        .unwrap();

        let group = &wrapper.sidebar[0];
        assert!(group.collapsed);
        assert_eq!(
            group.contents,
            GroupContents::Autogenerate(Autogenerate {
                directory: "reference".to_owned()
            })
        );
        assert!(group.items().is_empty());
    }

    #[test]
    fn test_nested_groups_preserve_depth_and_order() {
        let wrapper = parse(
            r#"
[[sidebar]]
label = "Guides"

[[sidebar.items]]
label = "First Setup"

[[sidebar.items.items]]
label = "Flashing Raspberry and plugin"
slug = "guides/setup/raspberry-and-plug"

[[sidebar.items.items]]
label = "Installing RoboCrew"
slug = "guides/setup/installing-robocrew"

[[sidebar.items.items]]
label = "Setting up udev rules"
slug = "guides/setup/udev-rules"

[[sidebar.items]]
label = "How to start"
slug = "guides/start"
"#,
        )
        .unwrap();

        let guides = &wrapper.sidebar[0];
        assert_eq!(guides.label, "Guides");
        assert_eq!(guides.depth(), 2);

        let items = guides.items();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].label(), "First Setup");
        assert_eq!(items[1].label(), "How to start");

        let NavItem::Group(setup) = &items[0] else {
            panic!("expected nested group, got {:?}", items[0]);
        };
        let slugs: Vec<_> = setup.leaves().iter().map(|l| l.target.as_str()).collect();
        assert_eq!(
            slugs,
            vec![
                "guides/setup/raspberry-and-plug",
                "guides/setup/installing-robocrew",
                "guides/setup/udev-rules",
            ]
        );

        let all: Vec<_> = guides.leaves().iter().map(|l| l.label).collect();
        assert_eq!(
            all,
            vec![
                "Flashing Raspberry and plugin",
                "Installing RoboCrew",
                "Setting up udev rules",
                "How to start",
            ]
        );
    }

    #[test]
    fn test_leaf_with_slug_and_link_rejected() {
        let err = parse(
            r#"
[[sidebar]]
label = "Guides"
items = [{ label = "Both", slug = "a", link = "https://example.com" }]
"#,
        )
        .unwrap_err();

        assert!(
            err.to_string().contains("both `slug` and `link`"),
            "unexpected error: {err}"
        );
    }

    #[test]
    fn test_leaf_without_target_rejected() {
        let err = parse(
            r#"
[[sidebar]]
label = "Guides"
items = [{ label = "Nothing" }]
"#,
        )
        .unwrap_err();

        assert!(err.to_string().contains("needs one of"), "unexpected error: {err}");
    }

    #[test]
    fn test_target_with_children_rejected() {
        let err = parse(
            r#"
[[sidebar]]
label = "Guides"
items = [{ label = "Mixed", slug = "a", items = [] }]
"#,
        )
        .unwrap_err();

        assert!(err.to_string().contains("cannot combine"), "unexpected error: {err}");
    }

    #[test]
    fn test_collapsed_leaf_rejected() {
        let err = parse(
            r#"
[[sidebar]]
label = "Guides"
items = [{ label = "Start", slug = "guides/start", collapsed = true }]
"#,
        )
        .unwrap_err();

        assert!(err.to_string().contains("collapsed"), "unexpected error: {err}");
    }

    #[test]
    fn test_top_level_group_requires_children() {
        let err = parse(
            r#"
[[sidebar]]
label = "Start"
slug = "guides/start"
"#,
        )
        .unwrap_err();

        assert!(
            err.to_string().contains("cannot have `slug` or `link`"),
            "unexpected error: {err}"
        );
    }

    #[test]
    fn test_group_with_items_and_autogenerate_rejected() {
        let err = parse(
            r#"
[[sidebar]]
label = "Reference"
items = []
autogenerate = { directory = "reference" }
"#,
        )
        .unwrap_err();

        assert!(err.to_string().contains("both `items` and `autogenerate`"));
    }

    #[test]
    fn test_unknown_field_rejected() {
        let result = parse(
            r#"
[[sidebar]]
label = "Guides"
items = [{ label = "Start", slug = "guides/start", badge = "new" }]
"#,
        );

        assert!(result.is_err());
    }

    #[test]
    fn test_serialize_leaf_writes_single_address_key() {
        let json = serde_json::to_value(NavItem::slug("Start", "guides/start")).unwrap();

        assert_eq!(json["label"], "Start");
        assert_eq!(json["slug"], "guides/start");
        assert!(json.get("link").is_none());
        assert!(json.get("items").is_none());
        assert!(json.get("collapsed").is_none());
    }

    #[test]
    fn test_toml_round_trip_keeps_structure() {
        let original = Wrapper {
            sidebar: vec![
                NavGroup::with_items(
                    "Guides",
                    vec![
                        NavItem::Group(NavGroup::with_items(
                            "Examples",
                            vec![
                                NavItem::slug("Movement", "guides/examples/movement"),
                                NavItem::slug("Audio and Voice", "guides/examples/audio"),
                            ],
                        )),
                        NavItem::link("Changelog", "/changelog/"),
                    ],
                ),
                NavGroup {
                    collapsed: true,
                    ..NavGroup::autogenerated("Reference", "reference")
                },
            ],
        };

        let text = toml::to_string(&original).unwrap();
        let parsed: Wrapper = toml::from_str(&text).unwrap();

        assert_eq!(parsed, original);
    }

    #[test]
    fn test_depth_of_flat_and_autogenerated_groups() {
        let flat = NavGroup::with_items("Flat", vec![NavItem::slug("A", "a")]);
        let generated = NavGroup::autogenerated("Reference", "reference");

        assert_eq!(flat.depth(), 1);
        assert_eq!(generated.depth(), 1);
        assert!(generated.leaves().is_empty());
    }
}
