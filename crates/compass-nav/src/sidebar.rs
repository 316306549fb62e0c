//! Sidebar resolution.
//!
//! Turns the declared [`NavGroup`] tree into concrete [`SidebarEntry`] links
//! by looking slugs up in a [`ContentIndex`] and expanding autogenerated
//! groups. Output order follows declaration order exactly.

use std::collections::HashSet;
use std::fmt;

use compass_config::{GroupContents, NavGroup, NavItem, SiteConfig, Target};
use serde::Serialize;
use url::Url;

use crate::content::{ContentIndex, ContentPage, slugify};

/// Resolved sidebar node.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum SidebarEntry {
    /// Navigable link.
    Link {
        /// Display label.
        label: String,
        /// Link target, including the base path for content pages.
        href: String,
        /// Whether the link leaves the site.
        #[serde(skip_serializing_if = "std::ops::Not::not")]
        external: bool,
    },
    /// Labelled group of entries.
    Group {
        /// Display label.
        label: String,
        /// Whether the group renders collapsed by default.
        #[serde(skip_serializing_if = "std::ops::Not::not")]
        collapsed: bool,
        /// Child entries.
        entries: Vec<SidebarEntry>,
    },
}

impl SidebarEntry {
    /// Display label.
    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Self::Link { label, .. } | Self::Group { label, .. } => label,
        }
    }

    /// Number of links in this subtree.
    #[must_use]
    pub fn link_count(&self) -> usize {
        match self {
            Self::Link { .. } => 1,
            Self::Group { entries, .. } => entries.iter().map(Self::link_count).sum(),
        }
    }
}

/// A sidebar target that could not be resolved.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Unresolved {
    /// Slug with no matching content page.
    Slug {
        /// Label of the sidebar item.
        label: String,
        /// The missing slug.
        slug: String,
    },
    /// Autogenerate directory with no visible pages.
    EmptyDirectory {
        /// Label of the sidebar group.
        label: String,
        /// The directory that produced no pages.
        directory: String,
    },
}

impl fmt::Display for Unresolved {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Slug { label, slug } => {
                write!(f, "`{label}`: no content page for slug `{slug}`")
            }
            Self::EmptyDirectory { label, directory } => {
                write!(f, "`{label}`: no pages under directory `{directory}`")
            }
        }
    }
}

/// Error returned when the sidebar cannot be built.
#[derive(Debug, thiserror::Error)]
pub enum NavError {
    /// One or more targets did not resolve.
    #[error("{} unresolved sidebar target(s): {}", .0.len(), join_unresolved(.0))]
    Unresolved(Vec<Unresolved>),
}

fn join_unresolved(items: &[Unresolved]) -> String {
    items
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Build the resolved sidebar for a site.
///
/// Every unresolved target is collected before failing, so one run reports
/// all broken entries. A slug listed more than once is only logged.
///
/// # Errors
///
/// Returns `NavError::Unresolved` if any slug has no page or any
/// autogenerated group is empty.
pub fn build_sidebar(
    site: &SiteConfig,
    index: &ContentIndex,
) -> Result<Vec<SidebarEntry>, NavError> {
    let mut resolver = Resolver {
        base_path: site.base_path(),
        index,
        seen: HashSet::new(),
        unresolved: Vec::new(),
    };

    let entries: Vec<_> = site.sidebar.iter().map(|g| resolver.group(g)).collect();

    if resolver.unresolved.is_empty() {
        Ok(entries)
    } else {
        Err(NavError::Unresolved(resolver.unresolved))
    }
}

/// Href for a content page: `{base}/{slug}/`, or `{base}/` for the root page.
#[must_use]
pub fn page_href(base_path: &str, slug: &str) -> String {
    let base = base_path.trim_end_matches('/');
    if slug.is_empty() {
        format!("{base}/")
    } else {
        format!("{base}/{slug}/")
    }
}

/// Whether a link points outside the site.
///
/// Root-relative paths never parse as a URL on their own, even when their
/// query string carries one.
fn is_external(link: &str) -> bool {
    Url::parse(link).is_ok()
}

struct Resolver<'a> {
    base_path: String,
    index: &'a ContentIndex,
    seen: HashSet<String>,
    unresolved: Vec<Unresolved>,
}

impl Resolver<'_> {
    fn group(&mut self, group: &NavGroup) -> SidebarEntry {
        let entries: Vec<SidebarEntry> = match &group.contents {
            GroupContents::Items(items) => items.iter().map(|item| self.item(item)).collect(),
            GroupContents::Autogenerate(rule) => {
                self.autogenerate(&group.label, &rule.directory, group.collapsed)
            }
        };
        SidebarEntry::Group {
            label: group.label.clone(),
            collapsed: group.collapsed,
            entries,
        }
    }

    fn item(&mut self, item: &NavItem) -> SidebarEntry {
        match item {
            NavItem::Leaf {
                label,
                target: Target::Slug(slug),
            } => {
                if !self.seen.insert(slug.clone()) {
                    tracing::warn!(%slug, %label, "Slug appears more than once in the sidebar");
                }
                if self.index.get(slug).is_none() {
                    self.unresolved.push(Unresolved::Slug {
                        label: label.clone(),
                        slug: slug.clone(),
                    });
                }
                SidebarEntry::Link {
                    label: label.clone(),
                    href: page_href(&self.base_path, slug),
                    external: false,
                }
            }
            NavItem::Leaf {
                label,
                target: Target::Link(link),
            } => SidebarEntry::Link {
                label: label.clone(),
                href: link.clone(),
                external: is_external(link),
            },
            NavItem::Group(group) => self.group(group),
        }
    }

    fn autogenerate(&mut self, label: &str, directory: &str, collapsed: bool) -> Vec<SidebarEntry> {
        let index = self.index;
        let mut pages: Vec<_> = index
            .pages_under(directory)
            .into_iter()
            .filter(|page| !page.hidden)
            .collect();

        if pages.is_empty() {
            self.unresolved.push(Unresolved::EmptyDirectory {
                label: label.to_owned(),
                directory: directory.to_owned(),
            });
            return Vec::new();
        }

        // Ordered pages first, then alphabetical by slug
        pages.sort_by(|a, b| {
            (a.order.is_none(), a.order, &a.slug).cmp(&(b.order.is_none(), b.order, &b.slug))
        });

        let depth = directory.split('/').filter(|s| !s.is_empty()).count();
        let mut tree = Vec::new();
        for page in pages {
            // Directory names below the group root as written on disk; an
            // index page sits inside the group of its own directory
            let dirs: Vec<String> = page.dir_names().skip(depth).collect();
            insert_page(&mut tree, &dirs, page);
        }

        tree.into_iter()
            .map(|node| self.tree_entry(node, collapsed))
            .collect()
    }

    fn tree_entry(&self, node: TreeNode<'_>, collapsed: bool) -> SidebarEntry {
        match node {
            TreeNode::Page(page) => SidebarEntry::Link {
                label: page.label().to_owned(),
                href: page_href(&self.base_path, &page.slug),
                external: false,
            },
            TreeNode::Dir { name, children, .. } => SidebarEntry::Group {
                label: name,
                collapsed,
                entries: children
                    .into_iter()
                    .map(|child| self.tree_entry(child, collapsed))
                    .collect(),
            },
        }
    }
}

/// Intermediate tree for autogenerated groups.
enum TreeNode<'a> {
    Page(&'a ContentPage),
    Dir {
        /// Slug segment, used to match directories.
        key: String,
        /// Directory name as written on disk, used as the label.
        name: String,
        children: Vec<TreeNode<'a>>,
    },
}

/// Insert a page under the directory path `dirs`, creating groups on demand.
///
/// A group is placed where its first page appears, so sibling order follows
/// page order.
fn insert_page<'a>(nodes: &mut Vec<TreeNode<'a>>, dirs: &[String], page: &'a ContentPage) {
    let Some((first, rest)) = dirs.split_first() else {
        nodes.push(TreeNode::Page(page));
        return;
    };

    let segment = slugify(first);
    let position = nodes
        .iter()
        .position(|node| matches!(node, TreeNode::Dir { key, .. } if *key == segment));
    let index = position.unwrap_or_else(|| {
        nodes.push(TreeNode::Dir {
            key: segment,
            name: first.clone(),
            children: Vec::new(),
        });
        nodes.len() - 1
    });

    if let TreeNode::Dir { children, .. } = &mut nodes[index] {
        insert_page(children, rest, page);
    }
}
