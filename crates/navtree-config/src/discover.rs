//! Page discovery for configurations without an explicit `pages` list.
//!
//! Every `.md` file under the source root becomes a top-level page, listed
//! alphabetically by route. Files and directories starting with `_` or `.`
//! are private and skipped. The root `index.md` is the site home and is not
//! listed; nested `index.md` files map to their directory route.
//!
//! Discovery only emits routes the navigation builder accepts: files whose
//! route contains whitespace or control characters are skipped, and when two
//! files claim the same route (`guide.md` and `guide/index.md`) the first in
//! source path order wins.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;
use serde_json::{Value, json};

static H1: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?m)^#[ \t]+(.+)$").unwrap());

/// A markdown file found under the source root.
#[derive(Debug)]
struct Discovered {
    route: String,
    name: String,
    /// Source file, used to order claimants of the same route.
    source: PathBuf,
}

/// Build a `pages` list from the markdown files under `root`.
///
/// Returns an empty list if `root` doesn't exist.
pub(crate) fn discover_pages(root: &Path) -> Value {
    let mut found = Vec::new();
    if root.is_dir() {
        scan_directory(root, "", &mut found);
    }
    // Byte order on the source path puts `guide.md` ahead of `guide/index.md`
    found.sort_by(|a, b| {
        a.route
            .cmp(&b.route)
            .then_with(|| a.source.as_os_str().cmp(b.source.as_os_str()))
    });
    found.dedup_by(|later, kept| {
        let duplicate = later.route == kept.route;
        if duplicate {
            tracing::warn!(
                route = %kept.route,
                kept = %kept.source.display(),
                skipped = %later.source.display(),
                "Two pages map to the same route, skipping the second"
            );
        }
        duplicate
    });

    tracing::debug!(root = %root.display(), page_count = found.len(), "Page discovery completed");

    Value::Array(
        found
            .into_iter()
            .map(|page| json!({"name": page.name, "path": page.route}))
            .collect(),
    )
}

fn scan_directory(dir: &Path, route_prefix: &str, found: &mut Vec<Discovered>) {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            tracing::warn!(path = %dir.display(), error = %e, "Failed to read directory, skipping");
            return;
        }
    };

    for entry in entries.filter_map(Result::ok) {
        let file_name = entry.file_name().to_string_lossy().into_owned();
        if file_name.starts_with('_') || file_name.starts_with('.') {
            continue;
        }

        let path = entry.path();
        if entry.file_type().is_ok_and(|t| t.is_dir()) {
            scan_directory(&path, &format!("{route_prefix}/{file_name}"), found);
            continue;
        }

        let Some(stem) = file_name.strip_suffix(".md") else {
            continue;
        };
        let route = if stem == "index" {
            if route_prefix.is_empty() {
                continue;
            }
            route_prefix.to_owned()
        } else {
            format!("{route_prefix}/{stem}")
        };
        if route.chars().any(|c| c.is_whitespace() || c.is_control()) {
            tracing::warn!(
                path = %path.display(),
                route = %route,
                "Page route contains whitespace, skipping"
            );
            continue;
        }
        let slug = if stem == "index" {
            route_prefix.rsplit('/').next().unwrap_or(stem)
        } else {
            stem
        };

        let name = title_from_content(&path).unwrap_or_else(|| titlecase_from_slug(slug));
        found.push(Discovered {
            route,
            name,
            source: path,
        });
    }
}

/// First `# ` heading of a markdown file.
fn title_from_content(path: &Path) -> Option<String> {
    let content = fs::read_to_string(path)
        .inspect_err(|e| {
            tracing::warn!(path = %path.display(), error = %e, "Failed to read page, using file name");
        })
        .ok()?;
    let caps = H1.captures(&content)?;
    Some(caps[1].trim().to_owned())
}

/// Convert a slug like `basic-html` into `Basic Html`.
fn titlecase_from_slug(slug: &str) -> String {
    let mut result = String::with_capacity(slug.len());
    for word in slug.split(['-', '_', ' ']).filter(|w| !w.is_empty()) {
        if !result.is_empty() {
            result.push(' ');
        }
        let mut chars = word.chars();
        if let Some(first) = chars.next() {
            result.extend(first.to_uppercase());
            result.push_str(chars.as_str());
        }
    }
    result
}
