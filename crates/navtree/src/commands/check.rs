//! `navtree check` command implementation.

use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::time::Duration;

use clap::Args;
use navtree_config::SiteConfig;
use navtree_core::{NavigationTree, SharedTree};
use notify::{Event, EventKind, RecursiveMode, Watcher};

use super::ConfigArgs;
use crate::error::CliError;
use crate::output::Output;

/// Quiet period after a change before rebuilding.
const DEBOUNCE: Duration = Duration::from_millis(100);

/// Arguments for the check command.
#[derive(Args)]
pub(crate) struct CheckArgs {
    #[command(flatten)]
    config: ConfigArgs,

    /// Keep running and re-check whenever the configuration changes.
    #[arg(short, long)]
    watch: bool,
}

impl CheckArgs {
    /// Execute the check command.
    ///
    /// # Errors
    ///
    /// Returns an error if the initial configuration is invalid or the file
    /// watcher cannot be started. Failed rebuilds while watching are reported
    /// and the last good tree is kept.
    pub(crate) fn execute(self, output: &Output) -> Result<(), CliError> {
        let (config, tree) = self.config.navigation()?;

        match &config.config_path {
            Some(path) => output.info(&format!("Config: {}", path.display())),
            None => output.info("Config: none found, using defaults"),
        }
        if !config.has_explicit_pages() {
            output.info(&format!(
                "Pages: discovered from {}",
                config.root_dir.display()
            ));
        }
        output.success(&summary(&tree));

        if !self.watch {
            return Ok(());
        }

        let reload_args = self.config.pinned(&config);
        let shared = SharedTree::new(tree);
        watch(&config, &shared, output, || reload_args.navigation())
    }
}

/// One-line description of a built tree.
fn summary(tree: &NavigationTree) -> String {
    let title = if tree.title().is_empty() {
        "Navigation"
    } else {
        tree.title()
    };
    format!(
        "{title}: {} pages in {} sections (depth {})",
        tree.page_count(),
        tree.sections().len(),
        tree.depth()
    )
}

/// Rebuild the tree on every relevant change until the watcher stops.
fn watch<F>(
    config: &SiteConfig,
    shared: &SharedTree,
    output: &Output,
    reload: F,
) -> Result<(), CliError>
where
    F: Fn() -> Result<(SiteConfig, NavigationTree), CliError>,
{
    let (tx, rx) = mpsc::channel::<Event>();
    let mut watcher = notify::recommended_watcher(move |res: Result<Event, notify::Error>| {
        if let Ok(event) = res {
            let _ = tx.send(event);
        }
    })?;

    let mut targets = WatchTargets::for_config(config);
    let mut watching = false;
    if let Some(path) = &targets.config_path
        && let Some(dir) = path.parent()
    {
        watcher.watch(dir, RecursiveMode::NonRecursive)?;
        watching = true;
    }
    let mut watched_root = targets.existing_pages_root();
    if let Some(root) = &watched_root {
        watcher.watch(root, RecursiveMode::Recursive)?;
        watching = true;
    }
    if !watching {
        output.warning("Nothing to watch: no config file and no page source directory");
        return Ok(());
    }

    output.info("Watching for changes (Ctrl+C to stop)");

    while let Ok(event) = rx.recv() {
        if !targets.is_relevant(&event) {
            continue;
        }
        // Editors often write in several steps; wait for them to settle
        while rx.recv_timeout(DEBOUNCE).is_ok() {}

        match reload() {
            Ok((reloaded, tree)) => {
                // An edit may add or drop `pages`, or move `root`
                targets = WatchTargets::for_config(&reloaded);
                watched_root = rewatch_pages_root(&mut watcher, watched_root, &targets);

                let summary = summary(&tree);
                let previous = shared.replace(tree);
                tracing::info!(
                    previous_pages = previous.page_count(),
                    pages = shared.current().page_count(),
                    "Navigation rebuilt"
                );
                output.success(&summary);
            }
            Err(err) => {
                tracing::warn!(error = %err, "Navigation rebuild failed, keeping previous tree");
                output.error(&format!("Error: {err}"));
            }
        }
    }

    Ok(())
}

/// Move the recursive watch to the page root `targets` wants, if it changed.
///
/// Returns the root that is watched afterwards.
fn rewatch_pages_root<W: Watcher>(
    watcher: &mut W,
    watched: Option<PathBuf>,
    targets: &WatchTargets,
) -> Option<PathBuf> {
    let wanted = targets.existing_pages_root();
    if wanted == watched {
        return watched;
    }

    if let Some(old) = &watched
        && let Err(e) = watcher.unwatch(old)
    {
        tracing::debug!(path = %old.display(), error = %e, "Failed to unwatch page source directory");
    }
    let root = wanted?;
    match watcher.watch(&root, RecursiveMode::Recursive) {
        Ok(()) => {
            tracing::info!(path = %root.display(), "Watching page source directory");
            Some(root)
        }
        Err(e) => {
            tracing::warn!(path = %root.display(), error = %e, "Failed to watch page source directory");
            None
        }
    }
}

/// Files whose changes trigger a rebuild.
#[derive(Debug, PartialEq, Eq)]
struct WatchTargets {
    config_path: Option<PathBuf>,
    /// Set when pages are discovered from markdown files rather than listed.
    pages_root: Option<PathBuf>,
}

impl WatchTargets {
    fn for_config(config: &SiteConfig) -> Self {
        Self {
            config_path: config.config_path.clone(),
            pages_root: (!config.has_explicit_pages()).then(|| config.root_dir.clone()),
        }
    }

    /// Page root to watch recursively, once it exists on disk.
    fn existing_pages_root(&self) -> Option<PathBuf> {
        self.pages_root.clone().filter(|root| root.is_dir())
    }

    fn is_relevant(&self, event: &Event) -> bool {
        if !matches!(
            event.kind,
            EventKind::Create(_) | EventKind::Modify(_) | EventKind::Remove(_)
        ) {
            return false;
        }
        event.paths.iter().any(|path| self.matches_path(path))
    }

    fn matches_path(&self, path: &Path) -> bool {
        if self
            .config_path
            .as_ref()
            .is_some_and(|config| same_file(config, path))
        {
            return true;
        }
        self.pages_root.as_ref().is_some_and(|root| {
            path.starts_with(root) && path.extension().is_some_and(|ext| ext == "md")
        })
    }
}

/// Compare paths, tolerating one side being canonicalized by the watcher.
fn same_file(a: &Path, b: &Path) -> bool {
    if a == b {
        return true;
    }
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => a.file_name() == b.file_name() && a.parent().is_some_and(|p| b.starts_with(p)),
    }
}
