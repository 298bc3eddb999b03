//! Route normalization.
//!
//! Routes are case-sensitive. Two routes are the same page when their
//! normalized forms are equal: repeated slashes collapse, a trailing slash
//! is dropped (except for the root `/`), and relative routes gain a leading
//! slash.

/// Normalize a route for lookup and uniqueness checks.
///
/// ```
/// use navtree_core::normalize_path;
///
/// assert_eq!(normalize_path("/html/"), "/html");
/// assert_eq!(normalize_path("//basics///css"), "/basics/css");
/// assert_eq!(normalize_path("setup"), "/setup");
/// assert_eq!(normalize_path("/"), "/");
/// ```
#[must_use]
pub fn normalize_path(raw: &str) -> String {
    let mut normalized = String::with_capacity(raw.len() + 1);
    for segment in raw.split('/').filter(|s| !s.is_empty()) {
        normalized.push('/');
        normalized.push_str(segment);
    }
    if normalized.is_empty() {
        normalized.push('/');
    }
    normalized
}

/// Check an authored route and return its normalized form.
///
/// Authored routes are held to a stricter standard than lookup queries:
/// whitespace, control characters and a doubled leading slash are rejected
/// rather than cleaned up.
pub(crate) fn validate_route(raw: &str) -> Result<String, String> {
    if raw.is_empty() {
        return Err("path must not be empty".to_owned());
    }
    if raw.chars().any(char::is_whitespace) {
        return Err(format!("path {raw:?} must not contain whitespace"));
    }
    if raw.chars().any(char::is_control) {
        return Err(format!("path {raw:?} must not contain control characters"));
    }
    if raw.starts_with("//") {
        return Err(format!("path {raw:?} must not start with duplicate slashes"));
    }
    Ok(normalize_path(raw))
}

/// Link rendering options matching the host framework's URL settings.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HrefOptions {
    /// Keep a trailing `/index` segment instead of linking to the directory.
    pub preserve_index: bool,
    /// Append `.html` to page links.
    pub preserve_extension: bool,
}

/// Link target for a route as the renderer should emit it.
///
/// ```
/// use navtree_core::{HrefOptions, href};
///
/// let defaults = HrefOptions::default();
/// assert_eq!(href("/guide/index", defaults), "/guide/");
/// assert_eq!(href("/basic-css", defaults), "/basic-css");
///
/// let static_host = HrefOptions { preserve_index: true, preserve_extension: true };
/// assert_eq!(href("/guide/index", static_host), "/guide/index.html");
/// ```
#[must_use]
pub fn href(path: &str, options: HrefOptions) -> String {
    let path = normalize_path(path);

    if !options.preserve_index {
        if path == "/index" {
            return "/".to_owned();
        }
        if let Some(parent) = path.strip_suffix("/index") {
            return format!("{parent}/");
        }
    }

    if options.preserve_extension && path != "/" && !path.ends_with(".html") {
        return format!("{path}.html");
    }

    path
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_strips_trailing_slash() {
        assert_eq!(normalize_path("/html/"), "/html");
        assert_eq!(normalize_path("/a/b///"), "/a/b");
    }

    #[test]
    fn test_normalize_keeps_root() {
        assert_eq!(normalize_path("/"), "/");
        assert_eq!(normalize_path("///"), "/");
        assert_eq!(normalize_path(""), "/");
    }

    #[test]
    fn test_normalize_collapses_repeated_slashes() {
        assert_eq!(normalize_path("//a//b"), "/a/b");
    }

    #[test]
    fn test_normalize_is_case_sensitive() {
        assert_eq!(normalize_path("/Basic-HTML"), "/Basic-HTML");
        assert_ne!(normalize_path("/HTML"), normalize_path("/html"));
    }

    #[test]
    fn test_normalize_makes_relative_absolute() {
        assert_eq!(normalize_path("basic-js"), "/basic-js");
        assert_eq!(normalize_path("guide/setup/"), "/guide/setup");
    }

    #[test]
    fn test_normalize_is_idempotent() {
        for raw in ["/a/", "//a//b/", "x", "/", "/a.b/c"] {
            let once = normalize_path(raw);
            assert_eq!(normalize_path(&once), once);
        }
    }

    #[test]
    fn test_validate_accepts_relative_and_absolute() {
        assert_eq!(validate_route("/setup").unwrap(), "/setup");
        assert_eq!(validate_route("setup").unwrap(), "/setup");
        assert_eq!(validate_route("/setup/").unwrap(), "/setup");
        assert_eq!(validate_route("/").unwrap(), "/");
    }

    #[test]
    fn test_validate_rejects_malformed() {
        assert!(validate_route("").is_err());
        assert!(validate_route("/basic html").is_err());
        assert!(validate_route("/tab\there").is_err());
        assert!(validate_route("/line\u{7}").is_err());
        let err = validate_route("//setup").unwrap_err();
        assert!(err.contains("duplicate slashes"));
    }

    #[test]
    fn test_href_drops_index_by_default() {
        let options = HrefOptions::default();
        assert_eq!(href("/index", options), "/");
        assert_eq!(href("/guide/index", options), "/guide/");
        assert_eq!(href("/guide/indexing", options), "/guide/indexing");
    }

    #[test]
    fn test_href_preserves_index() {
        let options = HrefOptions {
            preserve_index: true,
            preserve_extension: false,
        };
        assert_eq!(href("/guide/index", options), "/guide/index");
    }

    #[test]
    fn test_href_appends_extension() {
        let options = HrefOptions {
            preserve_index: false,
            preserve_extension: true,
        };
        assert_eq!(href("/basic-svg", options), "/basic-svg.html");
        assert_eq!(href("/basic-svg.html", options), "/basic-svg.html");
        assert_eq!(href("/", options), "/");
        // Directory links never get an extension
        assert_eq!(href("/guide/index", options), "/guide/");
    }
}
