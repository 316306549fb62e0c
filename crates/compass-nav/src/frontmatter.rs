//! Frontmatter and title extraction for content pages.
//!
//! A page may start with a YAML block fenced by `---` lines. Only the fields
//! the sidebar needs are read; everything else is ignored.

use pulldown_cmark::{Event, HeadingLevel, Parser, Tag, TagEnd};
use serde::Deserialize;

/// Sidebar-relevant frontmatter fields.
#[derive(Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub(crate) struct Frontmatter {
    pub title: Option<String>,
    pub sidebar: SidebarMeta,
}

/// The `sidebar:` frontmatter table.
#[derive(Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub(crate) struct SidebarMeta {
    pub label: Option<String>,
    pub order: Option<i64>,
    pub hidden: bool,
}

/// Split a page into its YAML frontmatter and body.
///
/// Returns `None` for the frontmatter when the page does not open with a
/// `---` line or the block is never closed.
pub(crate) fn split_frontmatter(content: &str) -> (Option<&str>, &str) {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    let Some(after_open) = content
        .strip_prefix("---\n")
        .or_else(|| content.strip_prefix("---\r\n"))
    else {
        return (None, content);
    };

    let mut offset = 0;
    for line in after_open.split_inclusive('\n') {
        if line.trim_end() == "---" {
            let yaml = &after_open[..offset];
            let body = &after_open[offset + line.len()..];
            return (Some(yaml), body);
        }
        offset += line.len();
    }

    (None, content)
}

/// Parse the frontmatter block.
///
/// Empty content returns a default instance.
///
/// # Errors
///
/// Returns an error if the YAML is malformed or a field has the wrong type.
pub(crate) fn parse_frontmatter(yaml: &str) -> Result<Frontmatter, serde_yaml::Error> {
    let trimmed = yaml.trim();
    if trimmed.is_empty() {
        return Ok(Frontmatter::default());
    }
    serde_yaml::from_str(trimmed)
}

/// Text of the first level-one heading in a markdown body.
pub(crate) fn first_heading(body: &str) -> Option<String> {
    let mut in_heading = false;
    let mut text = String::new();

    for event in Parser::new(body) {
        match event {
            Event::Start(Tag::Heading {
                level: HeadingLevel::H1,
                ..
            }) => in_heading = true,
            Event::End(TagEnd::Heading(HeadingLevel::H1)) => {
                let title = text.trim();
                return (!title.is_empty()).then(|| title.to_owned());
            }
            Event::Text(t) | Event::Code(t) if in_heading => text.push_str(&t),
            _ => {}
        }
    }

    None
}
