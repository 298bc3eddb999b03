//! `navtree tree` and `navtree pages` command implementations.

use clap::Args;
use navtree_core::{HrefOptions, NavEntry, NavigationTree, href};

use super::ConfigArgs;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the tree command.
#[derive(Args)]
pub(crate) struct TreeArgs {
    #[command(flatten)]
    config: ConfigArgs,

    /// Print the tree as JSON for an external renderer.
    #[arg(long)]
    json: bool,
}

impl TreeArgs {
    /// Execute the tree command.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration or its pages are invalid.
    pub(crate) fn execute(self, output: &Output) -> Result<(), CliError> {
        let (config, tree) = self.config.navigation()?;

        if self.json {
            output.data(&serde_json::to_string_pretty(&tree)?);
            return Ok(());
        }

        if !config.sidebar {
            output.warning("Sidebar is disabled in config (sidebar: false)");
        }
        if !tree.title().is_empty() {
            output.highlight(tree.title());
        }
        for line in render_tree(&tree, config.href_options()) {
            output.data(&line);
        }
        Ok(())
    }
}

/// Arguments for the pages command.
#[derive(Args)]
pub(crate) struct PagesArgs {
    #[command(flatten)]
    config: ConfigArgs,

    /// Print link targets instead of routes.
    #[arg(long)]
    href: bool,
}

impl PagesArgs {
    /// Execute the pages command.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration or its pages are invalid.
    pub(crate) fn execute(self, output: &Output) -> Result<(), CliError> {
        let (config, tree) = self.config.navigation()?;
        let options = self.href.then(|| config.href_options());

        for line in render_pages(&tree, options) {
            output.data(&line);
        }
        Ok(())
    }
}

/// Sidebar lines: `[-]` open section, `[+]` collapsed section, `[ ]` placeholder.
pub(crate) fn render_tree(tree: &NavigationTree, options: HrefOptions) -> Vec<String> {
    fn render(entries: &[NavEntry], depth: usize, options: HrefOptions, lines: &mut Vec<String>) {
        let indent = "  ".repeat(depth);
        for entry in entries {
            match entry {
                NavEntry::Page(page) => {
                    lines.push(format!("{indent}{}  {}", page.name, href(&page.path, options)));
                }
                NavEntry::Section(section) if !section.is_expandable() => {
                    lines.push(format!("{indent}[ ] {} (empty)", section.name));
                }
                NavEntry::Section(section) => {
                    let marker = if section.open { "[-]" } else { "[+]" };
                    lines.push(format!("{indent}{marker} {}", section.name));
                    render(&section.children, depth + 1, options, lines);
                }
            }
        }
    }

    let mut lines = Vec::new();
    render(tree.entries(), 0, options, &mut lines);
    lines
}

/// One `route<TAB>name` line per page in flattened order.
pub(crate) fn render_pages(tree: &NavigationTree, options: Option<HrefOptions>) -> Vec<String> {
    tree.flatten()
        .iter()
        .map(|page| {
            let target = match options {
                Some(options) => href(&page.path, options),
                None => page.path.clone(),
            };
            format!("{target}\t{}", page.name)
        })
        .collect()
}
