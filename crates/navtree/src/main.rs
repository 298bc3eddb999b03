//! navtree CLI - sidebar navigation checker.
//!
//! Provides commands for:
//! - `check`: Validate the navigation config (optionally on every change)
//! - `tree`: Print the sidebar as a tree or JSON
//! - `pages`: Print pages in prev/next order
//! - `resolve`: Look up the page for a route
//! - `pager`: Show previous and next pages for a route

mod commands;
mod error;
mod output;

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{CheckArgs, PagerArgs, PagesArgs, ResolveArgs, TreeArgs};
use output::Output;

/// navtree - sidebar navigation checker for documentation sites.
#[derive(Parser)]
#[command(name = "navtree", version, about)]
struct Cli {
    /// Enable verbose output (show build and reload logs).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate the navigation configuration.
    Check(CheckArgs),
    /// Print the sidebar tree.
    Tree(TreeArgs),
    /// Print pages in previous/next order.
    Pages(PagesArgs),
    /// Find the page for a route.
    Resolve(ResolveArgs),
    /// Show previous and next pages for a route.
    Pager(PagerArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let output = Output::new();

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let filter = if cli.verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Check(args) => args.execute(&output),
        Commands::Tree(args) => args.execute(&output),
        Commands::Pages(args) => args.execute(&output),
        Commands::Resolve(args) => args.execute(&output),
        Commands::Pager(args) => args.execute(&output),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
