//! `navtree resolve` and `navtree pager` command implementations.

use clap::Args;
use navtree_core::{HrefOptions, Page, href};

use super::ConfigArgs;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the resolve command.
#[derive(Args)]
pub(crate) struct ResolveArgs {
    #[command(flatten)]
    config: ConfigArgs,

    /// Route to look up (trailing and repeated slashes are ignored).
    path: String,
}

impl ResolveArgs {
    /// Execute the resolve command.
    ///
    /// # Errors
    ///
    /// Returns `CliError::PageNotFound` if no page owns the route.
    pub(crate) fn execute(self, output: &Output) -> Result<(), CliError> {
        let (_, tree) = self.config.navigation()?;
        let page = tree
            .resolve(&self.path)
            .ok_or_else(|| CliError::PageNotFound(self.path.clone()))?;

        output.data(&format!("{}\t{}", page.path, page.name));

        if let Some(trail) = tree.breadcrumbs(&self.path)
            && trail.len() > 1
        {
            let names: Vec<_> = trail.iter().map(|crumb| crumb.name).collect();
            output.muted(&names.join(" > "));
        }
        Ok(())
    }
}

/// Arguments for the pager command.
#[derive(Args)]
pub(crate) struct PagerArgs {
    #[command(flatten)]
    config: ConfigArgs,

    /// Route of the current page.
    path: String,
}

impl PagerArgs {
    /// Execute the pager command.
    ///
    /// # Errors
    ///
    /// Returns `CliError::PageNotFound` if no page owns the route.
    pub(crate) fn execute(self, output: &Output) -> Result<(), CliError> {
        let (config, tree) = self.config.navigation()?;
        if !config.pager {
            output.warning("Pager is disabled in config (pager: false)");
        }

        let pager = tree
            .pager(&self.path)
            .ok_or_else(|| CliError::PageNotFound(self.path.clone()))?;
        let options = config.href_options();

        output.data(&describe("prev", pager.prev, options));
        output.data(&describe("next", pager.next, options));
        Ok(())
    }
}

/// `label<TAB>href<TAB>name`, or `label<TAB>-` at either end of the sequence.
fn describe(label: &str, page: Option<&Page>, options: HrefOptions) -> String {
    match page {
        Some(page) => format!("{label}\t{}\t{}", href(&page.path, options), page.name),
        None => format!("{label}\t-"),
    }
}
