//! Previous/next links between pages.

use serde::Serialize;

use crate::tree::{NavigationTree, Page};

/// Neighbours of a page in [`NavigationTree::flatten`] order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Pager<'a> {
    /// Page before the current one, `None` on the first page.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prev: Option<&'a Page>,
    /// Page after the current one, `None` on the last page.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next: Option<&'a Page>,
}

impl NavigationTree {
    /// Previous and next pages around `path`.
    ///
    /// Sections do not interrupt the sequence: the last page of one section
    /// links to the first page of the next. Returns `None` when `path` does
    /// not resolve.
    #[must_use]
    pub fn pager(&self, path: &str) -> Option<Pager<'_>> {
        let idx = self.position(path)?;
        let pages = self.flatten();

        Some(Pager {
            prev: idx.checked_sub(1).map(|prev| &pages[prev]),
            next: pages.get(idx + 1),
        })
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::build;

    fn tree() -> crate::NavigationTree {
        build(&json!([
            {"name": "Initial setup", "path": "/initial-setup"},
            {"name": "Basics", "pages": [
                {"name": "Basic HTML", "path": "/basic-html"},
                {"name": "Basic CSS", "path": "/basic-css"}
            ]},
            {"name": "Empty", "pages": []},
            {"name": "Basic SVG", "path": "/basic-svg"}
        ]))
        .unwrap()
    }

    fn names<'a>(pager: &super::Pager<'a>) -> (Option<&'a str>, Option<&'a str>) {
        (
            pager.prev.map(|p| p.name.as_str()),
            pager.next.map(|p| p.name.as_str()),
        )
    }

    #[test]
    fn test_first_page_has_no_prev() {
        let tree = tree();
        let pager = tree.pager("/initial-setup").unwrap();
        assert_eq!(names(&pager), (None, Some("Basic HTML")));
    }

    #[test]
    fn test_last_page_has_no_next() {
        let tree = tree();
        let pager = tree.pager("/basic-svg").unwrap();
        assert_eq!(names(&pager), (Some("Basic CSS"), None));
    }

    #[test]
    fn test_pager_crosses_sections() {
        let tree = tree();
        let pager = tree.pager("/basic-css/").unwrap();
        assert_eq!(names(&pager), (Some("Basic HTML"), Some("Basic SVG")));
    }

    #[test]
    fn test_pager_unknown_path() {
        assert!(tree().pager("/missing").is_none());
    }

    #[test]
    fn test_single_page_has_no_neighbours() {
        let tree = build(&json!([{"name": "Only", "path": "/only"}])).unwrap();
        let pager = tree.pager("/only").unwrap();
        assert_eq!(names(&pager), (None, None));
    }
}
