//! Package queries (`quarry list`, `quarry search`, `quarry info`).

use anyhow::Result;
use clap::Args;

use crate::action::Action;
use crate::engine::Engine;
use crate::session::Session;

/// Arguments for `quarry list`.
#[derive(Args, Debug)]
pub struct ListArgs {
    /// Print package names only, one per line.
    #[arg(short, long)]
    pub short: bool,
    /// Restrict the listing to installed packages.
    #[arg(short, long)]
    pub installed: bool,
    /// Patterns selecting packages (every package when omitted).
    pub patterns: Vec<String>,
}

/// Arguments for `quarry search`.
#[derive(Args, Debug)]
pub struct SearchArgs {
    /// Print package names only, one per line.
    #[arg(short, long)]
    pub short: bool,
    /// Restrict the search to installed packages.
    #[arg(short, long)]
    pub installed: bool,
    /// Match patterns case sensitively.
    #[arg(long)]
    pub case_sensitive: bool,
    /// Patterns to search for.
    pub patterns: Vec<String>,
}

/// Arguments for `quarry info`.
#[derive(Args, Debug)]
pub struct InfoArgs {
    /// Packages to describe.
    #[arg(required = true)]
    pub patterns: Vec<String>,
}

pub fn list(session: &Session, args: ListArgs, engine: &mut dyn Engine) -> Result<()> {
    engine.perform(
        session,
        Action::List {
            patterns: args.patterns,
            short: args.short,
            installed_only: args.installed,
        },
    )
}

pub fn search(session: &Session, args: SearchArgs, engine: &mut dyn Engine) -> Result<()> {
    engine.perform(
        session,
        Action::Search {
            patterns: args.patterns,
            short: args.short,
            installed_only: args.installed,
            case_sensitive: args.case_sensitive,
        },
    )
}

pub fn info(session: &Session, args: InfoArgs, engine: &mut dyn Engine) -> Result<()> {
    engine.perform(session, Action::Info { patterns: args.patterns })
}
