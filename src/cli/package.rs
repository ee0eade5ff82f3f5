//! Package lifecycle commands (`quarry install`, `remove`, `reinstall`,
//! `update`, `upgrade`).
//!
//! These are the commands that run builds, so each folds its build
//! options into the session before calling the engine.

use anyhow::Result;
use clap::Args;

use crate::action::Action;
use crate::engine::Engine;
use crate::ident::{PackageName, RepoName};
use crate::session::{BuildArgs, Session};

/// Arguments for `quarry install`.
#[derive(Args, Debug)]
pub struct InstallArgs {
    #[command(flatten)]
    pub build: BuildArgs,
    /// Packages to install.
    #[arg(required = true)]
    pub packages: Vec<PackageName>,
}

/// Arguments for `quarry remove`.
#[derive(Args, Debug)]
pub struct RemoveArgs {
    #[command(flatten)]
    pub build: BuildArgs,
    /// Packages to remove.
    #[arg(required = true)]
    pub packages: Vec<PackageName>,
}

/// Arguments for `quarry reinstall`.
#[derive(Args, Debug)]
pub struct ReinstallArgs {
    #[command(flatten)]
    pub build: BuildArgs,
    /// Packages to reinstall.
    #[arg(required = true)]
    pub packages: Vec<PackageName>,
}

/// Arguments for `quarry update`.
#[derive(Args, Debug)]
pub struct UpdateArgs {
    #[command(flatten)]
    pub build: BuildArgs,
    /// Repositories to synchronize (every repository when omitted).
    pub repositories: Vec<RepoName>,
}

/// Arguments for `quarry upgrade`.
#[derive(Args, Debug)]
pub struct UpgradeArgs {
    #[command(flatten)]
    pub build: BuildArgs,
    /// Packages to upgrade (every installed package when omitted).
    pub packages: Vec<PackageName>,
}

pub fn install(session: &Session, args: InstallArgs, engine: &mut dyn Engine) -> Result<()> {
    let session = session.with_build(&args.build);
    engine.perform(&session, Action::Install { packages: args.packages })
}

pub fn remove(session: &Session, args: RemoveArgs, engine: &mut dyn Engine) -> Result<()> {
    let session = session.with_build(&args.build);
    engine.perform(&session, Action::Remove { packages: args.packages })
}

pub fn reinstall(session: &Session, args: ReinstallArgs, engine: &mut dyn Engine) -> Result<()> {
    let session = session.with_build(&args.build);
    engine.perform(&session, Action::Reinstall { packages: args.packages })
}

pub fn update(session: &Session, args: UpdateArgs, engine: &mut dyn Engine) -> Result<()> {
    let session = session.with_build(&args.build);
    engine.perform(
        &session,
        Action::Update { repositories: args.repositories },
    )
}

pub fn upgrade(session: &Session, args: UpgradeArgs, engine: &mut dyn Engine) -> Result<()> {
    let session = session.with_build(&args.build);
    engine.perform(&session, Action::Upgrade { packages: args.packages })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::testutil::{parse_err, record};
    use crate::cli::{Cli, dispatch};
    use crate::engine::testing::RecordingEngine;
    use clap::Parser;
    use clap::error::ErrorKind;
    use pretty_assertions::assert_eq;

    #[test]
    fn install_requires_a_package() {
        let err = parse_err(&["quarry", "install"]);
        assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn install_carries_every_named_package() {
        let action = record(&["quarry", "install", "zlib", "lwt"]);
        assert_eq!(
            action,
            Action::Install {
                packages: vec!["zlib".parse().unwrap(), "lwt".parse().unwrap()],
            }
        );
    }

    #[test]
    fn malformed_package_names_fail_at_parse_time() {
        let err = parse_err(&["quarry", "install", "-zlib"]);
        // A leading hyphen reads as an unknown flag, which is still a
        // usage failure before any handler runs.
        assert_ne!(err.kind(), ErrorKind::DisplayHelp);
    }

    #[test]
    fn update_accepts_zero_repositories() {
        let action = record(&["quarry", "update"]);
        assert_eq!(action, Action::Update { repositories: vec![] });
    }

    #[test]
    fn build_options_land_in_the_session() {
        let cli = Cli::try_parse_from([
            "quarry",
            "install",
            "--keep-build-dir",
            "--make",
            "gmake",
            "zlib",
        ])
        .unwrap();
        let mut engine = RecordingEngine::default();
        dispatch(&Session::for_tests(), cli.command, &mut engine).unwrap();
        let session = engine.sessions.pop().unwrap();
        assert!(session.build.keep_build_dir);
        assert!(!session.build.no_checksums);
        assert_eq!(session.build.make.as_deref(), Some("gmake"));
    }
}
