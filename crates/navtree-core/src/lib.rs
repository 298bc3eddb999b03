//! Sidebar navigation model for static documentation sites.
//!
//! This crate provides:
//! - [`NavigationTreeBuilder`]: validates author-supplied page lists into a [`NavigationTree`]
//! - [`NavigationTree::flatten`]: depth-first page order used for prev/next linking
//! - [`NavigationTree::resolve`]: route lookup with slash normalization
//! - [`SharedTree`]: atomically swappable snapshot for rebuild-on-change hosts
//!
//! The builder performs no I/O. Loading the configuration file is the
//! caller's job (see the `navtree-config` crate).
//!
//! # Quick Start
//!
//! ```
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use navtree_core::NavigationTreeBuilder;
//! use serde_json::json;
//!
//! let raw = json!([
//!     {"name": "Setup", "path": "/setup"},
//!     {"name": "Basics", "pages": [
//!         {"name": "HTML", "path": "/html"},
//!         {"name": "CSS", "path": "/css"}
//!     ]}
//! ]);
//!
//! let tree = NavigationTreeBuilder::new().title("Lets learn D3").build(&raw)?;
//!
//! let order: Vec<_> = tree.flatten().iter().map(|p| p.path.as_str()).collect();
//! assert_eq!(order, ["/setup", "/html", "/css"]);
//! assert_eq!(tree.resolve("/html/").map(|p| p.name.as_str()), Some("HTML"));
//! # Ok(())
//! # }
//! ```

mod breadcrumbs;
mod builder;
mod error;
mod pager;
pub mod path;
mod shared;
mod tree;

pub use breadcrumbs::Crumb;
pub use builder::{NavigationTreeBuilder, build};
pub use error::{Location, NavError};
pub use pager::Pager;
pub use path::{HrefOptions, href, normalize_path};
pub use shared::SharedTree;
pub use tree::{NavEntry, NavigationTree, Page, Section, SiteMeta};
