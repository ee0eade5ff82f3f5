//! Command-line interface wiring for the `quarry` binary.
//!
//! This module owns the clap definitions for the top-level verbs and
//! delegates execution to specialized submodules that encapsulate each
//! command family. Global options are declared once here and inherited by
//! every command.

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};

use crate::engine::Engine;
use crate::session::{EnvPreset, GlobalArgs, Session};

pub mod config;
pub mod help;
pub mod init;
pub mod package;
pub mod pin;
pub mod query;
pub mod repository;
pub mod switch;
pub mod upload;

/// Parsed CLI entrypoint for the `quarry` binary.
#[derive(Parser, Debug)]
#[command(
    name = "quarry",
    version,
    about = "Manage source packages, repositories, and compiler switches",
    disable_help_subcommand = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Top-level command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Top-level verbs made available to end users.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Initialize the quarry state root and the first repository.
    Init(init::InitArgs),
    /// List packages known to the configured repositories.
    List(query::ListArgs),
    /// Search packages by pattern.
    Search(query::SearchArgs),
    /// Show detailed information about packages.
    Info(query::InfoArgs),
    /// Query configuration values and the build environment.
    #[command(subcommand)]
    Config(config::ConfigCommand),
    /// Install packages.
    Install(package::InstallArgs),
    /// Remove packages.
    Remove(package::RemoveArgs),
    /// Reinstall packages.
    Reinstall(package::ReinstallArgs),
    /// Synchronize repositories.
    Update(package::UpdateArgs),
    /// Upgrade installed packages.
    Upgrade(package::UpgradeArgs),
    /// Manage package repositories.
    #[command(subcommand, visible_alias = "remote")]
    Repository(repository::RepositoryCommand),
    /// Manage compiler switches.
    Switch(switch::SwitchArgs),
    /// Pin a package to a version, a path, or a git address.
    Pin(pin::PinArgs),
    /// Upload a package to a repository.
    Upload(upload::UploadArgs),
    /// Show help about a command or list available topics.
    Help(help::HelpArgs),
}

/// Names of every registered top-level command, in declaration order.
pub fn command_names() -> Vec<String> {
    Cli::command()
        .get_subcommands()
        .map(|cmd| cmd.get_name().to_string())
        .collect()
}

/// Resolve the session, then execute the requested command.
pub fn run(cli: Cli, engine: &mut dyn Engine) -> Result<()> {
    let session = Session::new(&cli.global, &EnvPreset::from_env());
    session.init_logging();
    dispatch(&session, cli.command, engine)
}

pub(crate) fn dispatch(
    session: &Session,
    command: Command,
    engine: &mut dyn Engine,
) -> Result<()> {
    match command {
        Command::Init(args) => init::handle(session, args, engine),
        Command::List(args) => query::list(session, args, engine),
        Command::Search(args) => query::search(session, args, engine),
        Command::Info(args) => query::info(session, args, engine),
        Command::Config(cmd) => config::handle(session, cmd, engine),
        Command::Install(args) => package::install(session, args, engine),
        Command::Remove(args) => package::remove(session, args, engine),
        Command::Reinstall(args) => package::reinstall(session, args, engine),
        Command::Update(args) => package::update(session, args, engine),
        Command::Upgrade(args) => package::upgrade(session, args, engine),
        Command::Repository(cmd) => repository::handle(session, cmd, engine),
        Command::Switch(args) => switch::handle(session, args, engine),
        Command::Pin(args) => pin::handle(session, args, engine),
        Command::Upload(args) => upload::handle(session, args, engine),
        Command::Help(args) => help::handle(args),
    }
}
