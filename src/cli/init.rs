//! State-root initialization (`quarry init`).

use anyhow::Result;
use clap::Args;

use crate::action::Action;
use crate::engine::Engine;
use crate::ident::{Address, CompilerId, RepoKind, RepoName};
use crate::session::Session;

/// Arguments for `quarry init`.
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Name of the initial repository.
    pub name: Option<RepoName>,
    /// Address of the initial repository.
    pub address: Option<Address>,
    /// Kind of the initial repository (inferred from the address when omitted).
    #[arg(long, value_name = "KIND")]
    pub kind: Option<RepoKind>,
    /// Compiler to install into the initial switch.
    #[arg(long = "comp", value_name = "COMP")]
    pub compiler: Option<CompilerId>,
    /// Number of parallel build jobs.
    #[arg(short = 'j', long, value_name = "JOBS")]
    pub jobs: Option<u32>,
}

pub fn handle(session: &Session, args: InitArgs, engine: &mut dyn Engine) -> Result<()> {
    let repo = args.name.unwrap_or_else(RepoName::default_repo);
    let address = args.address.unwrap_or_else(Address::default_repo);
    let kind = args.kind.unwrap_or_else(|| RepoKind::infer(&address));
    engine.perform(
        session,
        Action::Init {
            repo,
            address,
            kind,
            compiler: args.compiler,
            jobs: args.jobs,
        },
    )
}
