//! CLI command implementations.

pub(crate) mod check;
pub(crate) mod lookup;
pub(crate) mod tree;

use std::path::PathBuf;

use clap::Args;
use navtree_config::{CliSettings, SiteConfig};
use navtree_core::NavigationTree;

use crate::error::CliError;

pub(crate) use check::CheckArgs;
pub(crate) use lookup::{PagerArgs, ResolveArgs};
pub(crate) use tree::{PagesArgs, TreeArgs};

/// Configuration options shared by every command.
#[derive(Args, Clone, Debug)]
pub(crate) struct ConfigArgs {
    /// Path to configuration file (default: auto-discover navtree.json/.toml/.yaml).
    #[arg(short, long, env = "NAVTREE_CONFIG")]
    config: Option<PathBuf>,

    /// Page source directory used when no pages are listed (overrides config).
    #[arg(short, long)]
    root: Option<PathBuf>,
}

impl ConfigArgs {
    /// Load the site configuration.
    pub(crate) fn load(&self) -> Result<SiteConfig, CliError> {
        let settings = CliSettings {
            root: self.root.clone(),
        };
        Ok(SiteConfig::load(self.config.as_deref(), Some(&settings))?)
    }

    /// Load the site configuration and build its navigation tree.
    pub(crate) fn navigation(&self) -> Result<(SiteConfig, NavigationTree), CliError> {
        let config = self.load()?;
        let tree = config.navigation()?;
        Ok((config, tree))
    }

    /// Pin the config file so reloads don't re-run discovery.
    pub(crate) fn pinned(&self, config: &SiteConfig) -> Self {
        Self {
            config: config.config_path.clone().or_else(|| self.config.clone()),
            root: self.root.clone(),
        }
    }
}
