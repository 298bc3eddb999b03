//! Breadcrumb trails from the sidebar root to a page.

use serde::Serialize;

use crate::path::normalize_path;
use crate::tree::{NavEntry, NavigationTree};

/// One step of a breadcrumb trail.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Crumb<'a> {
    /// Label of the section or page.
    pub name: &'a str,
    /// Route of the step; sections have none.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<&'a str>,
}

impl NavigationTree {
    /// Enclosing sections of `path`, outermost first, ending with the page.
    ///
    /// Returns `None` when `path` does not resolve.
    #[must_use]
    pub fn breadcrumbs(&self, path: &str) -> Option<Vec<Crumb<'_>>> {
        fn trail_to<'a>(entries: &'a [NavEntry], target: &str, trail: &mut Vec<Crumb<'a>>) -> bool {
            for entry in entries {
                match entry {
                    NavEntry::Page(page) if page.path == target => {
                        trail.push(Crumb {
                            name: &page.name,
                            path: Some(&page.path),
                        });
                        return true;
                    }
                    NavEntry::Page(_) => {}
                    NavEntry::Section(section) => {
                        trail.push(Crumb {
                            name: &section.name,
                            path: None,
                        });
                        if trail_to(&section.children, target, trail) {
                            return true;
                        }
                        trail.pop();
                    }
                }
            }
            false
        }

        // Unknown routes skip the walk
        self.position(path)?;

        let target = normalize_path(path);
        let mut trail = Vec::new();
        trail_to(self.entries(), &target, &mut trail).then_some(trail)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;
    use crate::build;

    #[test]
    fn test_breadcrumbs_nested() {
        let tree = build(&json!([
            {"name": "Setup", "path": "/setup"},
            {"name": "Basics", "pages": [
                {"name": "HTML", "path": "/html"},
                {"name": "Styling", "pages": [{"name": "CSS", "path": "/css"}]}
            ]}
        ]))
        .unwrap();

        assert_eq!(
            tree.breadcrumbs("/css/").unwrap(),
            vec![
                Crumb { name: "Basics", path: None },
                Crumb { name: "Styling", path: None },
                Crumb { name: "CSS", path: Some("/css") },
            ]
        );
    }

    #[test]
    fn test_breadcrumbs_top_level_page() {
        let tree = build(&json!([{"name": "Setup", "path": "/setup"}])).unwrap();
        assert_eq!(
            tree.breadcrumbs("/setup").unwrap(),
            vec![Crumb { name: "Setup", path: Some("/setup") }]
        );
    }

    #[test]
    fn test_breadcrumbs_skip_sibling_sections() {
        let tree = build(&json!([
            {"name": "A", "pages": [{"name": "a", "path": "/a"}]},
            {"name": "B", "pages": [{"name": "b", "path": "/b"}]}
        ]))
        .unwrap();

        let names: Vec<_> = tree
            .breadcrumbs("/b")
            .unwrap()
            .iter()
            .map(|c| c.name)
            .collect();
        assert_eq!(names, ["B", "b"]);
    }

    #[test]
    fn test_breadcrumbs_unknown_path() {
        let tree = build(&json!([{"name": "Setup", "path": "/setup"}])).unwrap();
        assert!(tree.breadcrumbs("/nope").is_none());
    }
}
