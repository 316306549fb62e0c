//! Content page discovery by filesystem walking.
//!
//! Every `.md` / `.mdx` file under the content directory becomes a
//! [`ContentPage`] keyed by its slug. `index` files stand for their
//! directory: `guides/index.md` has slug `guides`, the root `index.md` has
//! the empty slug.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::frontmatter::{first_heading, parse_frontmatter, split_frontmatter};

/// Content file extensions recognized as pages.
const PAGE_EXTENSIONS: &[&str] = &["md", "mdx"];

/// A page discovered in the content directory.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ContentPage {
    /// Page identifier (e.g. `guides/setup/udev-rules`).
    pub slug: String,
    /// Page title from frontmatter, first heading, or file name.
    pub title: String,
    /// Sidebar label override from frontmatter.
    pub sidebar_label: Option<String>,
    /// Sort position within autogenerated groups.
    pub order: Option<i64>,
    /// Excluded from autogenerated groups.
    pub hidden: bool,
    /// Whether the page is an `index` file standing for its directory.
    pub is_index: bool,
    /// Source file path.
    pub path: PathBuf,
    /// Source file path relative to the content directory, original casing.
    pub rel_path: PathBuf,
}

impl ContentPage {
    /// Label to show in the sidebar.
    #[must_use]
    pub fn label(&self) -> &str {
        self.sidebar_label.as_deref().unwrap_or(&self.title)
    }

    /// Names of the directories containing the page, as written on disk.
    pub fn dir_names(&self) -> impl Iterator<Item = String> + '_ {
        self.rel_path
            .parent()
            .into_iter()
            .flat_map(Path::components)
            .map(|c| c.as_os_str().to_string_lossy().into_owned())
    }
}

/// Slug-addressable set of content pages.
#[derive(Debug, Default)]
pub struct ContentIndex {
    pages: BTreeMap<String, ContentPage>,
    duplicates: Vec<PathBuf>,
}

impl ContentIndex {
    /// Scan a content directory.
    ///
    /// Hidden entries are skipped. Returns an empty index if the directory
    /// doesn't exist. When two files map to the same slug the first one in
    /// walk order is kept and the other is recorded in
    /// [`ContentIndex::duplicates`].
    #[must_use]
    pub fn scan(content_dir: &Path) -> Self {
        let mut index = Self::default();
        if content_dir.is_dir() {
            index.scan_directory(content_dir, content_dir);
        } else {
            tracing::warn!(dir = %content_dir.display(), "Content directory does not exist");
        }
        tracing::debug!(
            dir = %content_dir.display(),
            pages = index.pages.len(),
            duplicates = index.duplicates.len(),
            "Scanned content directory"
        );
        index
    }

    /// Build an index from already-known pages.
    #[must_use]
    pub fn from_pages(pages: impl IntoIterator<Item = ContentPage>) -> Self {
        let mut index = Self::default();
        for page in pages {
            index.insert(page);
        }
        index
    }

    /// Look up a page by slug.
    #[must_use]
    pub fn get(&self, slug: &str) -> Option<&ContentPage> {
        self.pages.get(slug)
    }

    /// Pages inside `directory`, in slug order.
    ///
    /// This is the directory's own index page plus every page below it. A
    /// sibling file such as `reference.md` is not inside `reference/`.
    #[must_use]
    pub fn pages_under(&self, directory: &str) -> Vec<&ContentPage> {
        let directory = directory.trim_matches('/');
        let prefix = format!("{directory}/");
        self.pages
            .values()
            .filter(|page| {
                if page.slug == directory {
                    page.is_index
                } else {
                    directory.is_empty() || page.slug.starts_with(&prefix)
                }
            })
            .collect()
    }

    /// All pages in slug order.
    pub fn iter(&self) -> impl Iterator<Item = &ContentPage> {
        self.pages.values()
    }

    /// Number of pages.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pages.len()
    }

    /// Whether no pages were found.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Files skipped because their slug was already taken.
    #[must_use]
    pub fn duplicates(&self) -> &[PathBuf] {
        &self.duplicates
    }

    fn insert(&mut self, page: ContentPage) {
        if let Some(existing) = self.pages.get(&page.slug) {
            tracing::warn!(
                slug = %page.slug,
                kept = %existing.path.display(),
                skipped = %page.path.display(),
                "Duplicate content slug"
            );
            self.duplicates.push(page.path);
            return;
        }
        self.pages.insert(page.slug.clone(), page);
    }

    fn scan_directory(&mut self, root: &Path, dir_path: &Path) {
        let entries = match fs::read_dir(dir_path) {
            Ok(entries) => entries,
            Err(e) => {
                tracing::warn!(dir = %dir_path.display(), error = %e, "Failed to read directory");
                return;
            }
        };

        // Sort so slug collisions resolve the same way on every platform
        let mut entries: Vec<_> = entries
            .filter_map(Result::ok)
            .map(|e| {
                let is_dir = e.file_type().is_ok_and(|t| t.is_dir());
                (e.path(), is_dir)
            })
            .collect();
        entries.sort();

        for (path, is_dir) in entries {
            let hidden = path
                .file_name()
                .is_some_and(|name| name.to_string_lossy().starts_with('.'));
            if hidden {
                continue;
            }

            if is_dir {
                self.scan_directory(root, &path);
            } else if is_page(&path)
                && let Some(page) = read_page(root, &path)
            {
                self.insert(page);
            }
        }
    }
}

fn is_page(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| PAGE_EXTENSIONS.iter().any(|p| ext.eq_ignore_ascii_case(p)))
}

/// Read a page file and build its [`ContentPage`].
///
/// Returns `None` (after logging) if the file can't be read. Malformed
/// frontmatter is logged and treated as absent.
fn read_page(root: &Path, path: &Path) -> Option<ContentPage> {
    let rel_path = path.strip_prefix(root).ok()?;
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "Failed to read content page");
            return None;
        }
    };

    let (yaml, body) = split_frontmatter(&content);
    let frontmatter = match yaml.map(parse_frontmatter).transpose() {
        Ok(fm) => fm.unwrap_or_default(),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "Ignoring malformed frontmatter");
            Default::default()
        }
    };

    let (slug, is_index) = file_path_to_slug(rel_path);
    let title = frontmatter
        .title
        .or_else(|| first_heading(body))
        .unwrap_or_else(|| title_from_path(rel_path));

    Some(ContentPage {
        slug,
        title,
        sidebar_label: frontmatter.sidebar.label,
        order: frontmatter.sidebar.order,
        hidden: frontmatter.sidebar.hidden,
        is_index,
        path: path.to_path_buf(),
        rel_path: rel_path.to_path_buf(),
    })
}

/// Convert a path relative to the content root into a slug.
///
/// Returns the slug and whether the file is an `index` page.
///
/// Examples:
/// - `index.md` -> `("", true)`
/// - `guides/start.md` -> `("guides/start", false)`
/// - `guides/index.mdx` -> `("guides", true)`
/// - `Guides/First Setup.md` -> `("guides/first-setup", false)`
pub(crate) fn file_path_to_slug(rel_path: &Path) -> (String, bool) {
    let mut segments: Vec<String> = rel_path
        .with_extension("")
        .components()
        .map(|c| slugify(&c.as_os_str().to_string_lossy()))
        .collect();

    let is_index = segments.last().is_some_and(|s| s == "index");
    if is_index {
        segments.pop();
    }
    (segments.join("/"), is_index)
}

/// Lower-case a path segment and replace whitespace runs with `-`.
pub(crate) fn slugify(segment: &str) -> String {
    segment
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
        .to_lowercase()
}

/// Fallback title from the file (or directory, for index pages) name.
fn title_from_path(rel_path: &Path) -> String {
    let stem = rel_path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    if stem.eq_ignore_ascii_case("index")
        && let Some(parent) = rel_path.parent().and_then(Path::file_name)
    {
        return parent.to_string_lossy().into_owned();
    }
    stem
}
