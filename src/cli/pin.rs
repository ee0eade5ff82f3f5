//! Package pinning (`quarry pin ...`).
//!
//! Pinning is flag-and-positional shaped rather than sub-verb shaped:
//! `pin` alone lists, `pin PKG none` unpins, `pin PKG TARGET` pins.

use anyhow::Result;
use clap::{Args, ValueEnum};

use crate::action::{Action, PinAction, PinTarget};
use crate::engine::Engine;
use crate::fault::Fault;
use crate::ident::{Address, PackageName};
use crate::session::Session;

/// Arguments for `quarry pin`.
#[derive(Args, Debug)]
pub struct PinArgs {
    /// List the currently pinned packages.
    #[arg(short = 'l', long = "list")]
    pub list: bool,
    /// Force the interpretation of TARGET instead of inferring it.
    #[arg(long, value_name = "KIND", value_enum)]
    pub kind: Option<PinKind>,
    /// Package to pin or unpin.
    pub package: Option<PackageName>,
    /// Pin target: a version, a path, a git address, or `none` to unpin.
    pub target: Option<String>,
}

/// Explicit interpretations of a pin target.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum PinKind {
    Version,
    Git,
    Path,
}

pub fn handle(session: &Session, args: PinArgs, engine: &mut dyn Engine) -> Result<()> {
    let action = match (args.list, args.package, args.target) {
        (true, None, None) | (false, None, None) => PinAction::List,
        (true, _, _) => {
            return Err(Fault::Usage(
                "--list does not take a package or target".to_string(),
            )
            .into());
        }
        (false, Some(package), Some(target)) if target == "none" => {
            PinAction::Unpin { package }
        }
        (false, Some(package), Some(target)) => PinAction::Pin {
            package,
            target: resolve_target(&target, args.kind)?,
        },
        (false, _, _) => {
            return Err(Fault::Usage(
                "pin requires both a package and a target (or `none` to unpin)".to_string(),
            )
            .into());
        }
    };
    engine.perform(session, Action::Pin(action))
}

/// Decides what a pin target means. An explicit `--kind` wins; otherwise
/// an existing local path pins to that path, a git-shaped address pins
/// to git, and anything else is taken as a version.
fn resolve_target(target: &str, kind: Option<PinKind>) -> Result<PinTarget> {
    let resolved = match kind {
        Some(PinKind::Version) => PinTarget::Version(target.to_string()),
        Some(PinKind::Git) => PinTarget::Git(parse_address(target)?),
        Some(PinKind::Path) => PinTarget::Path(parse_address(target)?.to_path()),
        None => {
            let address = parse_address(target)?;
            if address.is_local_path() {
                PinTarget::Path(address.to_path())
            } else if address.looks_like_git() {
                PinTarget::Git(address)
            } else {
                PinTarget::Version(target.to_string())
            }
        }
    };
    Ok(resolved)
}

fn parse_address(target: &str) -> Result<Address> {
    target
        .parse::<Address>()
        .map_err(|e| Fault::Usage(e.to_string()).into())
}
