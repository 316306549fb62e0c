//! Sidebar resolution for Compass.
//!
//! Scans the content directory into a [`ContentIndex`] and resolves the
//! declared sidebar of a [`SiteConfig`](compass_config::SiteConfig) against
//! it, producing a tree of [`SidebarEntry`] values ready for rendering.
//!
//! # Example
//!
//! ```no_run
//! use compass_config::Config;
//! use compass_nav::resolve_sidebar;
//!
//! let config = Config::load(None, None)?;
//! let sidebar = resolve_sidebar(&config)?;
//! for entry in &sidebar.entries {
//!     println!("{} ({} links)", entry.label(), entry.link_count());
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod content;
mod frontmatter;
mod sidebar;

use compass_config::Config;
use serde::Serialize;

pub use content::{ContentIndex, ContentPage};
pub use sidebar::{NavError, SidebarEntry, Unresolved, build_sidebar, page_href};

/// Sidebar resolved against the configured content directory.
#[derive(Debug, Serialize)]
pub struct ResolvedSidebar {
    /// Top-level entries, in declaration order.
    pub entries: Vec<SidebarEntry>,
    /// Number of content pages found.
    pub page_count: usize,
    /// Content files ignored because their slug was taken.
    #[serde(skip)]
    pub duplicate_pages: usize,
}

/// Scan `config.content_resolved.dir` and build the sidebar.
///
/// # Errors
///
/// Returns `NavError::Unresolved` if any sidebar target has no page.
pub fn resolve_sidebar(config: &Config) -> Result<ResolvedSidebar, NavError> {
    let index = ContentIndex::scan(&config.content_resolved.dir);
    let entries = build_sidebar(&config.site, &index)?;
    Ok(ResolvedSidebar {
        entries,
        page_count: index.len(),
        duplicate_pages: index.duplicates().len(),
    })
}
