//! Immutable navigation tree.
//!
//! Entries keep the order they were authored in. Alongside the nested
//! entries the tree stores the flattened page list and a route index, both
//! computed once by the builder:
//! - O(1) route lookups via `path_index` `HashMap`
//! - O(1) prev/next lookups via the flattened page position

use std::collections::HashMap;

use serde::Serialize;

use crate::path::normalize_path;

/// Leaf entry bound to a site route.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Page {
    /// Sidebar label.
    pub name: String,
    /// Normalized route with leading slash (e.g., "/basic-html").
    pub path: String,
}

/// Named, collapsible group of entries.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Section {
    /// Sidebar label.
    pub name: String,
    /// Whether the section starts expanded.
    pub open: bool,
    /// Child entries in authored order.
    pub children: Vec<NavEntry>,
}

impl Section {
    /// Whether the sidebar should offer to expand this section.
    ///
    /// Empty sections are placeholders and render disabled.
    #[must_use]
    pub fn is_expandable(&self) -> bool {
        !self.children.is_empty()
    }
}

/// Sidebar entry: a page or a section of further entries.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum NavEntry {
    Page(Page),
    Section(Section),
}

impl NavEntry {
    /// Sidebar label of the entry.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Page(page) => &page.name,
            Self::Section(section) => &section.name,
        }
    }
}

/// Site-level values passed through to the renderer uninterpreted.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SiteMeta {
    /// Site title shown in the sidebar and page titles.
    pub title: String,
    /// Theme identifier from the renderer's theme set.
    pub theme: String,
    /// HTML injected into every page head.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub head: Option<String>,
    /// HTML shown in every page footer.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub footer: Option<String>,
}

impl Default for SiteMeta {
    fn default() -> Self {
        Self {
            title: String::new(),
            theme: "default".to_owned(),
            head: None,
            footer: None,
        }
    }
}

/// Validated navigation tree.
///
/// Built once per configuration load by
/// [`NavigationTreeBuilder`](crate::NavigationTreeBuilder) and never mutated
/// afterwards. Share it by reference or behind an `Arc`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct NavigationTree {
    #[serde(flatten)]
    meta: SiteMeta,
    entries: Vec<NavEntry>,
    #[serde(skip)]
    pages: Vec<Page>,
    #[serde(skip)]
    path_index: HashMap<String, usize>,
}

impl NavigationTree {
    /// Assemble a tree from already-validated parts.
    pub(crate) fn from_parts(
        meta: SiteMeta,
        entries: Vec<NavEntry>,
        pages: Vec<Page>,
        path_index: HashMap<String, usize>,
    ) -> Self {
        Self {
            meta,
            entries,
            pages,
            path_index,
        }
    }

    /// Site-level metadata.
    #[must_use]
    pub fn meta(&self) -> &SiteMeta {
        &self.meta
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.meta.title
    }

    #[must_use]
    pub fn theme(&self) -> &str {
        &self.meta.theme
    }

    #[must_use]
    pub fn head(&self) -> Option<&str> {
        self.meta.head.as_deref()
    }

    #[must_use]
    pub fn footer(&self) -> Option<&str> {
        self.meta.footer.as_deref()
    }

    /// Top-level entries in authored order.
    #[must_use]
    pub fn entries(&self) -> &[NavEntry] {
        &self.entries
    }

    /// All pages in depth-first pre-order.
    ///
    /// Sections contribute no entries of their own. This is the order used
    /// for previous/next links.
    #[must_use]
    pub fn flatten(&self) -> &[Page] {
        &self.pages
    }

    /// Look up a page by route.
    ///
    /// The query is normalized first, so `/html/` and `//html` both find the
    /// page authored as `/html`. Returns `None` for unknown routes.
    #[must_use]
    pub fn resolve(&self, path: &str) -> Option<&Page> {
        self.position(path).map(|idx| &self.pages[idx])
    }

    /// Position of a route in [`flatten`](Self::flatten) order.
    pub(crate) fn position(&self, path: &str) -> Option<usize> {
        self.path_index.get(&normalize_path(path)).copied()
    }

    /// Number of pages in the tree.
    #[must_use]
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Whether the tree has no entries at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All sections in depth-first pre-order.
    #[must_use]
    pub fn sections(&self) -> Vec<&Section> {
        fn collect<'a>(entries: &'a [NavEntry], out: &mut Vec<&'a Section>) {
            for entry in entries {
                if let NavEntry::Section(section) = entry {
                    out.push(section);
                    collect(&section.children, out);
                }
            }
        }

        let mut sections = Vec::new();
        collect(&self.entries, &mut sections);
        sections
    }

    /// Nesting depth: 0 for an empty tree, 1 when only top-level entries exist.
    #[must_use]
    pub fn depth(&self) -> usize {
        fn depth_of(entries: &[NavEntry]) -> usize {
            entries
                .iter()
                .map(|entry| match entry {
                    NavEntry::Page(_) => 1,
                    NavEntry::Section(section) => 1 + depth_of(&section.children),
                })
                .max()
                .unwrap_or(0)
        }

        depth_of(&self.entries)
    }
}
