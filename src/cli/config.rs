//! Configuration queries (`quarry config ...`).

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Subcommand};

use crate::action::{Action, ConfigAction, LinkPhase};
use crate::engine::Engine;
use crate::ident::{PackageName, Variable};
use crate::session::Session;

/// Supported `quarry config` sub-verbs.
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Print the environment variables needed to use the current switch.
    Env(EnvArgs),
    /// Look up the value of a configuration variable.
    Var {
        /// Variable to look up, `var` or `package.var`.
        name: Variable,
    },
    /// List the configuration variables of the given packages.
    List {
        /// Packages to list variables for (every package when omitted).
        packages: Vec<PackageName>,
    },
    /// Substitute configuration variables in template files.
    Subst {
        /// Template files to substitute in place.
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
    /// Print include directives for the given packages.
    Includes {
        /// Include the transitive dependencies as well.
        #[arg(short, long)]
        recursive: bool,
        /// Packages whose include directives are printed.
        #[arg(required = true)]
        packages: Vec<PackageName>,
    },
    /// Print bytecode compilation flags.
    Bytecomp(FlagsArgs),
    /// Print bytecode link flags.
    Bytelink(FlagsArgs),
    /// Print native compilation flags.
    Asmcomp(FlagsArgs),
    /// Print native link flags.
    Asmlink(FlagsArgs),
}

/// Arguments for `quarry config env`.
#[derive(Args, Debug)]
pub struct EnvArgs {
    /// Use csh-compatible syntax.
    #[arg(short, long)]
    pub csh: bool,
}

/// Arguments shared by the compilation-flag sub-verbs.
#[derive(Args, Debug)]
pub struct FlagsArgs {
    /// Include flags of the transitive dependencies as well.
    #[arg(short, long)]
    pub recursive: bool,
    /// Packages whose flags are printed.
    #[arg(required = true)]
    pub packages: Vec<PackageName>,
}

pub fn handle(session: &Session, command: ConfigCommand, engine: &mut dyn Engine) -> Result<()> {
    let action = match command {
        ConfigCommand::Env(args) => ConfigAction::Env { csh: args.csh },
        ConfigCommand::Var { name } => ConfigAction::Var { name },
        ConfigCommand::List { packages } => ConfigAction::List { packages },
        ConfigCommand::Subst { files } => ConfigAction::Subst { files },
        ConfigCommand::Includes { recursive, packages } => {
            ConfigAction::Includes { recursive, packages }
        }
        ConfigCommand::Bytecomp(args) => flags(LinkPhase::Bytecomp, args),
        ConfigCommand::Bytelink(args) => flags(LinkPhase::Bytelink, args),
        ConfigCommand::Asmcomp(args) => flags(LinkPhase::Asmcomp, args),
        ConfigCommand::Asmlink(args) => flags(LinkPhase::Asmlink, args),
    };
    engine.perform(session, Action::Config(action))
}

fn flags(phase: LinkPhase, args: FlagsArgs) -> ConfigAction {
    ConfigAction::CompileFlags {
        phase,
        recursive: args.recursive,
        packages: args.packages,
    }
}
