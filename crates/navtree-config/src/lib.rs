//! Site configuration for navtree.
//!
//! Parses `navtree.json`, `navtree.toml` or `navtree.yaml` with serde and
//! provides auto-discovery of config files in parent directories. The
//! `pages` list is kept untyped and handed to [`navtree_core`] for
//! validation by [`SiteConfig::navigation`].
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Environment Variable Expansion
//!
//! String configuration values support environment variable expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! Expanded fields:
//! - `title`
//! - `root`
//! - `output`

mod discover;
mod expand;

use std::path::{Path, PathBuf};

use navtree_core::{HrefOptions, NavError, NavigationTree, NavigationTreeBuilder, SiteMeta};
use serde::Deserialize;
use serde_json::Value;

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override the page source root.
    pub root: Option<PathBuf>,
}

/// Configuration filenames to search for, in priority order.
pub const CONFIG_FILENAMES: &[&str] = &[
    "navtree.json",
    "navtree.toml",
    "navtree.yaml",
    "navtree.yml",
];

/// Serialization format of a configuration file.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConfigFormat {
    Json,
    Toml,
    Yaml,
}

impl ConfigFormat {
    /// Format implied by a file extension.
    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()? {
            "json" => Some(Self::Json),
            "toml" => Some(Self::Toml),
            "yaml" | "yml" => Some(Self::Yaml),
            _ => None,
        }
    }
}

/// Theme as authored: a single name or a list of names.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ThemeRaw {
    Name(String),
    List(Vec<String>),
}

impl Default for ThemeRaw {
    fn default() -> Self {
        Self::Name("default".to_owned())
    }
}

/// Site configuration.
///
/// Keys are camelCase as in the host framework's config (`preserveIndex`).
/// Unknown keys are ignored.
#[derive(Debug, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SiteConfig {
    /// Site title used in the sidebar and page titles.
    pub title: String,
    /// Sidebar pages and sections, validated lazily by [`Self::navigation`].
    pages: Option<Value>,
    /// HTML added to the head of every page.
    pub head: Option<String>,
    /// HTML shown in the page header.
    pub header: Option<String>,
    /// HTML shown in the page footer.
    pub footer: Option<String>,
    theme: ThemeRaw,
    root: String,
    output: String,
    /// Whether to show the sidebar.
    pub sidebar: bool,
    /// Whether to show the table of contents.
    pub toc: bool,
    /// Whether to show previous and next links in the footer.
    pub pager: bool,
    /// Whether to build the search index.
    pub search: bool,
    /// Convert URLs in Markdown to links.
    pub linkify: bool,
    /// Smart quotes and other typographic improvements.
    pub typographer: bool,
    /// Keep `.html` in page links.
    pub preserve_extension: bool,
    /// Keep `/index` in page links.
    pub preserve_index: bool,

    /// Resolved page source directory (set after loading).
    #[serde(skip)]
    pub root_dir: PathBuf,
    /// Resolved build output directory (set after loading).
    #[serde(skip)]
    pub output_dir: PathBuf,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// File extension is not json, toml, yaml or yml.
    #[error("Unsupported configuration format: {}", .0.display())]
    UnsupportedFormat(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// JSON parsing error.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    /// YAML parsing error.
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field (e.g., "title").
        field: String,
        /// Error message (e.g., "${`SITE_TITLE`} not set").
        message: String,
    },
    /// The `pages` list is invalid.
    #[error("Navigation error: {0}")]
    Navigation(#[from] NavError),
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

impl SiteConfig {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for a config file in current directory and parents,
    /// falling back to defaults relative to the current directory.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails,
    /// or the CLI root override collides with the output directory.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default_with_cwd()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
            config.validate()?;
        }

        Ok(config)
    }

    /// Parse configuration text in the given format without touching the filesystem.
    ///
    /// Paths are resolved against `base_dir`.
    ///
    /// # Errors
    ///
    /// Returns a parse, expansion or validation error.
    pub fn from_str_with_format(
        content: &str,
        format: ConfigFormat,
        base_dir: &Path,
    ) -> Result<Self, ConfigError> {
        let mut config: Self = match format {
            ConfigFormat::Json => serde_json::from_str(content)?,
            ConfigFormat::Toml => toml::from_str(content)?,
            ConfigFormat::Yaml => serde_yaml::from_str(content)?,
        };

        config.expand_env_vars()?;
        config.resolve_paths(base_dir);
        config.validate()?;

        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(root) = &settings.root {
            self.root_dir.clone_from(root);
        }
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            if let Some(found) = find_config_in(&current) {
                return Some(found);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Create default config with paths relative to current working directory.
    fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    /// Create default config with paths relative to given base directory.
    fn default_with_base(base: &Path) -> Self {
        Self {
            title: String::new(),
            pages: None,
            head: None,
            header: None,
            footer: None,
            theme: ThemeRaw::default(),
            root: "src".to_owned(),
            output: "dist".to_owned(),
            sidebar: true,
            toc: true,
            pager: true,
            search: false,
            linkify: true,
            typographer: false,
            preserve_extension: false,
            preserve_index: false,
            root_dir: base.join("src"),
            output_dir: base.join("dist"),
            config_path: None,
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let format = ConfigFormat::from_path(path)
            .ok_or_else(|| ConfigError::UnsupportedFormat(path.to_path_buf()))?;
        let content = std::fs::read_to_string(path)?;
        let config_dir = path.parent().unwrap_or(Path::new("."));

        let mut config = Self::from_str_with_format(&content, format, config_dir)?;
        config.config_path = Some(path.to_path_buf());

        tracing::debug!(path = %path.display(), ?format, "Loaded site configuration");

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// Checks that all required fields are properly set and contain valid values.
    /// Called automatically after loading. The `pages` list is validated
    /// separately by [`Self::navigation`].
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.root, "root")?;
        require_non_empty(&self.output, "output")?;

        if let ThemeRaw::List(names) = &self.theme {
            if names.is_empty() {
                return Err(ConfigError::Validation(
                    "theme list cannot be empty".to_owned(),
                ));
            }
            for name in names {
                require_non_empty(name, "theme")?;
            }
        }

        if self.root_dir == self.output_dir {
            return Err(ConfigError::Validation(
                "output cannot be the same directory as root".to_owned(),
            ));
        }

        Ok(())
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        self.title = expand::expand_env(&self.title, "title")?;
        self.root = expand::expand_env(&self.root, "root")?;
        self.output = expand::expand_env(&self.output, "output")?;
        Ok(())
    }

    /// Resolve relative paths to absolute paths based on config directory.
    fn resolve_paths(&mut self, config_dir: &Path) {
        self.root_dir = config_dir.join(&self.root);
        self.output_dir = config_dir.join(&self.output);
    }

    /// Theme name as passed to the renderer; lists are joined with commas.
    #[must_use]
    pub fn theme(&self) -> String {
        match &self.theme {
            ThemeRaw::Name(name) => name.clone(),
            ThemeRaw::List(names) => names.join(","),
        }
    }

    /// Whether the sidebar pages were listed explicitly.
    #[must_use]
    pub fn has_explicit_pages(&self) -> bool {
        self.pages.is_some()
    }

    /// Link options for [`navtree_core::href`].
    #[must_use]
    pub fn href_options(&self) -> HrefOptions {
        HrefOptions {
            preserve_index: self.preserve_index,
            preserve_extension: self.preserve_extension,
        }
    }

    /// Site metadata carried by the navigation tree.
    #[must_use]
    pub fn site_meta(&self) -> SiteMeta {
        SiteMeta {
            title: self.title.clone(),
            theme: self.theme(),
            head: self.head.clone(),
            footer: self.footer.clone(),
        }
    }

    /// Build the validated navigation tree.
    ///
    /// Uses the authored `pages` list when present; otherwise lists every
    /// markdown page under [`Self::root_dir`] alphabetically.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Navigation` if the pages list is invalid.
    pub fn navigation(&self) -> Result<NavigationTree, ConfigError> {
        let builder = NavigationTreeBuilder::new().meta(self.site_meta());
        let tree = match &self.pages {
            Some(pages) => builder.build(pages)?,
            None => builder.build(&discover::discover_pages(&self.root_dir))?,
        };
        Ok(tree)
    }
}

/// Find the first config file in `dir` by [`CONFIG_FILENAMES`] priority.
#[must_use]
pub fn find_config_in(dir: &Path) -> Option<PathBuf> {
    CONFIG_FILENAMES
        .iter()
        .map(|name| dir.join(name))
        .find(|candidate| candidate.exists())
}

#[cfg(test)]
mod tests {
    use std::fs;

    use pretty_assertions::assert_eq;

    use super::*;

    fn parse(content: &str, format: ConfigFormat) -> SiteConfig {
        SiteConfig::from_str_with_format(content, format, Path::new("/project")).unwrap()
    }

    #[test]
    fn test_default_config() {
        let config = SiteConfig::default_with_base(Path::new("/test"));
        assert_eq!(config.root_dir, PathBuf::from("/test/src"));
        assert_eq!(config.output_dir, PathBuf::from("/test/dist"));
        assert_eq!(config.theme(), "default");
        assert!(config.sidebar);
        assert!(config.toc);
        assert!(config.pager);
        assert!(!config.search);
        assert!(config.linkify);
        assert!(!config.typographer);
        assert!(!config.has_explicit_pages());
        assert_eq!(config.href_options(), HrefOptions::default());
    }

    #[test]
    fn test_parse_minimal_json() {
        let config = parse("{}", ConfigFormat::Json);
        assert_eq!(config.title, "");
        assert_eq!(config.root_dir, PathBuf::from("/project/src"));
    }

    #[test]
    fn test_parse_full_json() {
        let config = parse(
            r#"{
                "title": "Lets learn D3",
                "pages": [
                    {"name": "Initial setup", "path": "/initial-setup"},
                    {"name": "Basic HTML", "path": "/basic-html"}
                ],
                "head": "<link rel=\"icon\" href=\"icon.png\" type=\"image/png\" sizes=\"32x32\">",
                "root": "src",
                "theme": "dashboard",
                "footer": "<div>Lets learn D3</div>",
                "pager": false,
                "preserveIndex": true,
                "preserveExtension": true,
                "unknownOption": 1
            }"#,
            ConfigFormat::Json,
        );

        assert_eq!(config.title, "Lets learn D3");
        assert_eq!(config.theme(), "dashboard");
        assert!(!config.pager);
        assert_eq!(
            config.href_options(),
            HrefOptions {
                preserve_index: true,
                preserve_extension: true,
            }
        );

        let tree = config.navigation().unwrap();
        assert_eq!(tree.title(), "Lets learn D3");
        assert_eq!(tree.theme(), "dashboard");
        assert_eq!(tree.footer(), Some("<div>Lets learn D3</div>"));
        let paths: Vec<_> = tree.flatten().iter().map(|p| p.path.as_str()).collect();
        assert_eq!(paths, ["/initial-setup", "/basic-html"]);
    }

    #[test]
    fn test_parse_toml_sections() {
        let config = parse(
            r#"
title = "Docs"
theme = ["air", "near-midnight"]

[[pages]]
name = "Setup"
path = "/setup"

[[pages]]
name = "Examples"
open = false

[[pages.pages]]
name = "Dashboard"
path = "/example-dashboard"
"#,
            ConfigFormat::Toml,
        );

        assert_eq!(config.theme(), "air,near-midnight");
        let tree = config.navigation().unwrap();
        let sections = tree.sections();
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].name, "Examples");
        assert!(!sections[0].open);
        assert_eq!(tree.flatten()[1].path, "/example-dashboard");
    }

    #[test]
    fn test_parse_yaml() {
        let config = parse(
            r"
title: Docs
pages:
  - name: Basics
    pages:
      - name: HTML
        path: /html
      - name: CSS
        path: /css
  - name: Advanced
    pages: []
",
            ConfigFormat::Yaml,
        );

        let tree = config.navigation().unwrap();
        assert_eq!(tree.page_count(), 2);
        assert!(tree.sections()[1].open);
    }

    #[test]
    fn test_navigation_error_propagates() {
        let config = parse(
            r#"{"pages": [
                {"name": "HTML", "path": "/html"},
                {"name": "S", "pages": [{"name": "HTML 2", "path": "/html/"}]}
            ]}"#,
            ConfigFormat::Json,
        );

        let err = config.navigation().unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Navigation(NavError::DuplicatePath { ref path, .. }) if path == "/html"
        ));
    }

    #[test]
    fn test_parse_error() {
        let result = SiteConfig::from_str_with_format("{", ConfigFormat::Json, Path::new("/p"));
        assert!(matches!(result, Err(ConfigError::Json(_))));

        let result =
            SiteConfig::from_str_with_format("title = ", ConfigFormat::Toml, Path::new("/p"));
        assert!(matches!(result, Err(ConfigError::Toml(_))));
    }

    #[test]
    fn test_validate_rejects_empty_root() {
        let result =
            SiteConfig::from_str_with_format(r#"{"root": " "}"#, ConfigFormat::Json, Path::new("/p"));
        let err = result.unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
        assert!(err.to_string().contains("root"));
    }

    #[test]
    fn test_validate_rejects_output_equal_to_root() {
        let result = SiteConfig::from_str_with_format(
            r#"{"root": "site", "output": "site"}"#,
            ConfigFormat::Json,
            Path::new("/p"),
        );
        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }

    #[test]
    fn test_validate_rejects_empty_theme_list() {
        let result =
            SiteConfig::from_str_with_format(r#"{"theme": []}"#, ConfigFormat::Json, Path::new("/p"));
        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }

    #[test]
    fn test_title_env_expansion() {
        // SAFETY: variable name is unique to this test
        unsafe {
            std::env::set_var("NAVTREE_CONFIG_TEST_TITLE", "Course");
        }
        let config = parse(
            r#"{"title": "${NAVTREE_CONFIG_TEST_TITLE} notes", "root": "${NAVTREE_CONFIG_UNSET:-docs}"}"#,
            ConfigFormat::Json,
        );
        unsafe {
            std::env::remove_var("NAVTREE_CONFIG_TEST_TITLE");
        }

        assert_eq!(config.title, "Course notes");
        assert_eq!(config.root_dir, PathBuf::from("/project/docs"));
    }

    #[test]
    fn test_format_from_path() {
        assert_eq!(
            ConfigFormat::from_path(Path::new("navtree.json")),
            Some(ConfigFormat::Json)
        );
        assert_eq!(
            ConfigFormat::from_path(Path::new("a/navtree.yml")),
            Some(ConfigFormat::Yaml)
        );
        assert_eq!(ConfigFormat::from_path(Path::new("navtree.js")), None);
        assert_eq!(ConfigFormat::from_path(Path::new("navtree")), None);
    }

    #[test]
    fn test_load_missing_file() {
        let result = SiteConfig::load(Some(Path::new("/definitely/not/here.json")), None);
        assert!(matches!(result, Err(ConfigError::NotFound(_))));
    }

    #[test]
    fn test_load_unsupported_format() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("observablehq.config.js");
        fs::write(&path, "export default {}").unwrap();

        let result = SiteConfig::load(Some(&path), None);
        assert!(matches!(result, Err(ConfigError::UnsupportedFormat(_))));
    }

    #[test]
    fn test_load_resolves_paths_against_config_dir() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("navtree.toml");
        fs::write(&path, "title = \"Docs\"\nroot = \"content\"\n").unwrap();

        let config = SiteConfig::load(Some(&path), None).unwrap();

        assert_eq!(config.root_dir, temp.path().join("content"));
        assert_eq!(config.output_dir, temp.path().join("dist"));
        assert_eq!(config.config_path, Some(path));
    }

    #[test]
    fn test_load_applies_cli_settings() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("navtree.json");
        fs::write(&path, "{}").unwrap();
        let settings = CliSettings {
            root: Some(PathBuf::from("/custom/src")),
        };

        let config = SiteConfig::load(Some(&path), Some(&settings)).unwrap();

        assert_eq!(config.root_dir, PathBuf::from("/custom/src"));
    }

    #[test]
    fn test_navigation_discovers_pages_without_list() {
        let temp = tempfile::tempdir().unwrap();
        let src = temp.path().join("src");
        fs::create_dir(&src).unwrap();
        fs::write(src.join("index.md"), "# Home").unwrap();
        fs::write(src.join("basic-html.md"), "# Basic HTML").unwrap();
        fs::write(src.join("basic-css.md"), "# Basic CSS").unwrap();
        let path = temp.path().join("navtree.yaml");
        fs::write(&path, "title: Lets learn D3\n").unwrap();

        let config = SiteConfig::load(Some(&path), None).unwrap();
        let tree = config.navigation().unwrap();

        let names: Vec<_> = tree.flatten().iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["Basic CSS", "Basic HTML"]);
    }

    #[test]
    fn test_load_rejects_cli_root_equal_to_output() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("navtree.json");
        fs::write(&path, "{}").unwrap();
        let settings = CliSettings {
            root: Some(temp.path().join("dist")),
        };

        let result = SiteConfig::load(Some(&path), Some(&settings));

        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }

    #[test]
    fn test_navigation_skips_undiscoverable_routes() {
        let temp = tempfile::tempdir().unwrap();
        let src = temp.path().join("src");
        fs::create_dir_all(src.join("guide")).unwrap();
        fs::write(src.join("basic html.md"), "# Basic HTML").unwrap();
        fs::write(src.join("guide.md"), "# Guide").unwrap();
        fs::write(src.join("guide/index.md"), "# Guide Index").unwrap();
        let path = temp.path().join("navtree.json");
        fs::write(&path, "{}").unwrap();

        let config = SiteConfig::load(Some(&path), None).unwrap();
        let tree = config.navigation().unwrap();

        let routes: Vec<_> = tree.flatten().iter().map(|p| p.path.as_str()).collect();
        assert_eq!(routes, ["/guide"]);
        assert_eq!(tree.resolve("/guide").map(|p| p.name.as_str()), Some("Guide"));
    }

    #[test]
    fn test_find_config_priority() {
        let temp = tempfile::tempdir().unwrap();
        fs::write(temp.path().join("navtree.yaml"), "").unwrap();
        fs::write(temp.path().join("navtree.toml"), "").unwrap();

        assert_eq!(
            find_config_in(temp.path()),
            Some(temp.path().join("navtree.toml"))
        );
    }
}
