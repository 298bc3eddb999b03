//! Navigation tree construction from untyped configuration data.
//!
//! Records are discriminated by shape:
//! - a record with `pages` (or `children`) is a section
//! - otherwise a record with `path` is a page
//! - anything else is rejected
//!
//! Validation is fail-fast: the first bad record aborts the build and no
//! partial tree is returned. Route uniqueness is checked in a second pass
//! over the finished tree, in depth-first pre-order.

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use serde_json::{Map, Value};

use crate::error::{Location, NavError};
use crate::path::validate_route;
use crate::tree::{NavEntry, NavigationTree, Page, Section, SiteMeta};

/// Build a navigation tree with default site metadata.
///
/// # Errors
///
/// See [`NavigationTreeBuilder::build`].
pub fn build(raw: &Value) -> Result<NavigationTree, NavError> {
    NavigationTreeBuilder::new().build(raw)
}

/// Builder for [`NavigationTree`].
///
/// Site metadata is set with the chained setters; [`build`](Self::build)
/// validates the page list and produces the tree.
#[derive(Clone, Debug, Default)]
pub struct NavigationTreeBuilder {
    meta: SiteMeta,
}

impl NavigationTreeBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace all site metadata at once.
    #[must_use]
    pub fn meta(mut self, meta: SiteMeta) -> Self {
        self.meta = meta;
        self
    }

    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.meta.title = title.into();
        self
    }

    #[must_use]
    pub fn theme(mut self, theme: impl Into<String>) -> Self {
        self.meta.theme = theme.into();
        self
    }

    #[must_use]
    pub fn head(mut self, head: impl Into<String>) -> Self {
        self.meta.head = Some(head.into());
        self
    }

    #[must_use]
    pub fn footer(mut self, footer: impl Into<String>) -> Self {
        self.meta.footer = Some(footer.into());
        self
    }

    /// Validate `raw` and build the tree.
    ///
    /// `raw` is the authored `pages` list: an ordered sequence of page and
    /// section records.
    ///
    /// # Errors
    ///
    /// Returns the first problem found:
    /// - `NavError::InvalidPage` for a page with a missing name or bad path
    /// - `NavError::InvalidSection` for a section with a missing name, a
    ///   non-boolean `open`, or children that are not a list
    /// - `NavError::UnrecognizedEntry` for a record of neither shape
    /// - `NavError::DuplicatePath` when two pages share a normalized route
    pub fn build(self, raw: &Value) -> Result<NavigationTree, NavError> {
        let root = Location::root();
        let Value::Array(records) = raw else {
            return Err(NavError::InvalidSection {
                location: root,
                reason: format!("pages must be a list, found {}", kind_of(raw)),
            });
        };

        let entries = parse_entries(records, &root)?;
        let (pages, path_index) = index_pages(&entries)?;

        tracing::debug!(
            title = %self.meta.title,
            pages = pages.len(),
            entries = entries.len(),
            "Built navigation tree"
        );

        Ok(NavigationTree::from_parts(
            self.meta, entries, pages, path_index,
        ))
    }
}

fn parse_entries(records: &[Value], parent: &Location) -> Result<Vec<NavEntry>, NavError> {
    records
        .iter()
        .enumerate()
        .map(|(idx, record)| parse_entry(record, parent.child(idx)))
        .collect()
}

fn parse_entry(record: &Value, location: Location) -> Result<NavEntry, NavError> {
    let Value::Object(fields) = record else {
        return Err(NavError::UnrecognizedEntry { location });
    };

    if fields.contains_key("pages") || fields.contains_key("children") {
        parse_section(fields, &location).map(NavEntry::Section)
    } else if fields.contains_key("path") {
        parse_page(fields, &location).map(NavEntry::Page)
    } else {
        Err(NavError::UnrecognizedEntry { location })
    }
}

fn parse_page(fields: &Map<String, Value>, location: &Location) -> Result<Page, NavError> {
    let invalid = |reason: String| NavError::InvalidPage {
        location: location.clone(),
        reason,
    };

    let name = required_name(fields).map_err(invalid)?;
    let raw_path = match fields.get("path") {
        Some(Value::String(path)) => path.as_str(),
        Some(other) => {
            return Err(invalid(format!(
                "path must be a string, found {}",
                kind_of(other)
            )));
        }
        None => return Err(invalid("missing path".to_owned())),
    };
    let path = validate_route(raw_path).map_err(invalid)?;

    Ok(Page { name, path })
}

fn parse_section(fields: &Map<String, Value>, location: &Location) -> Result<Section, NavError> {
    let invalid = |reason: String| NavError::InvalidSection {
        location: location.clone(),
        reason,
    };

    let name = required_name(fields).map_err(invalid)?;

    if fields.contains_key("pages") && fields.contains_key("children") {
        return Err(invalid(
            "section has both pages and children; use one".to_owned(),
        ));
    }
    if fields.contains_key("path") {
        return Err(invalid("section cannot have a path".to_owned()));
    }

    let open = match fields.get("open") {
        None | Some(Value::Null) => true,
        Some(value) => coerce_bool(value).ok_or_else(|| {
            invalid(format!("open must be a boolean, found {value}"))
        })?,
    };

    let children = match fields.get("pages").or_else(|| fields.get("children")) {
        Some(Value::Array(records)) => parse_entries(records, location)?,
        Some(other) => {
            return Err(invalid(format!(
                "pages must be a list, found {}",
                kind_of(other)
            )));
        }
        None => return Err(invalid("missing pages".to_owned())),
    };

    Ok(Section {
        name,
        open,
        children,
    })
}

/// Read the mandatory, non-blank `name` field.
fn required_name(fields: &Map<String, Value>) -> Result<String, String> {
    match fields.get("name") {
        Some(Value::String(name)) if name.trim().is_empty() => {
            Err("name must not be empty".to_owned())
        }
        Some(Value::String(name)) => Ok(name.clone()),
        Some(other) => Err(format!("name must be a string, found {}", kind_of(other))),
        None => Err("missing name".to_owned()),
    }
}

/// Interpret a loosely-typed flag the way config authors write them.
fn coerce_bool(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(flag) => Some(*flag),
        Value::Number(n) => match n.as_u64() {
            Some(0) => Some(false),
            Some(1) => Some(true),
            _ => None,
        },
        Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "true" | "yes" | "on" | "1" => Some(true),
            "false" | "no" | "off" | "0" => Some(false),
            _ => None,
        },
        _ => None,
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}

/// Flatten pages in depth-first pre-order and index them by route.
///
/// Fails on the first route seen twice.
fn index_pages(entries: &[NavEntry]) -> Result<(Vec<Page>, HashMap<String, usize>), NavError> {
    fn walk(
        entries: &[NavEntry],
        parent: &Location,
        pages: &mut Vec<Page>,
        index: &mut HashMap<String, usize>,
    ) -> Result<(), NavError> {
        for (idx, entry) in entries.iter().enumerate() {
            match entry {
                NavEntry::Page(page) => match index.entry(page.path.clone()) {
                    Entry::Occupied(_) => {
                        return Err(NavError::DuplicatePath {
                            path: page.path.clone(),
                            location: parent.child(idx),
                        });
                    }
                    Entry::Vacant(slot) => {
                        slot.insert(pages.len());
                        pages.push(page.clone());
                    }
                },
                NavEntry::Section(section) => {
                    walk(&section.children, &parent.child(idx), pages, index)?;
                }
            }
        }
        Ok(())
    }

    let mut pages = Vec::new();
    let mut index = HashMap::new();
    walk(entries, &Location::root(), &mut pages, &mut index)?;
    Ok((pages, index))
}
