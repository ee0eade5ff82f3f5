//! Compiler switch management (`quarry switch ...`).
//!
//! `switch NAME` with no sub-verb is shorthand for `switch add NAME`.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Subcommand};

use crate::action::{Action, SwitchAction};
use crate::engine::Engine;
use crate::fault::Fault;
use crate::ident::{CompilerId, SwitchName};
use crate::session::Session;

/// Arguments for `quarry switch`.
#[derive(Args, Debug)]
pub struct SwitchArgs {
    #[command(subcommand)]
    pub command: Option<SwitchCommand>,
    /// Switch to install when no sub-verb is given.
    pub name: Option<SwitchName>,
    /// Compiler the new switch is an alias of (the switch name itself
    /// when omitted).
    #[arg(long = "alias-of", value_name = "COMP")]
    pub alias_of: Option<CompilerId>,
    /// Do not install the base packages into the new switch.
    #[arg(long)]
    pub no_base_packages: bool,
}

/// Supported `quarry switch` sub-verbs.
#[derive(Subcommand, Debug)]
pub enum SwitchCommand {
    /// Install a new compiler switch.
    #[command(alias = "install")]
    Add {
        /// Name of the switch to install.
        name: SwitchName,
        /// Compiler the switch is an alias of (the switch name itself
        /// when omitted).
        #[arg(long = "alias-of", value_name = "COMP")]
        alias_of: Option<CompilerId>,
        /// Do not install the base packages into the new switch.
        #[arg(long)]
        no_base_packages: bool,
    },
    /// Remove a compiler switch.
    #[command(alias = "rm")]
    Remove {
        /// Switch to remove.
        name: SwitchName,
    },
    /// Export the installed-package set of the current switch to a file.
    Export {
        /// File to write the package set to.
        file: PathBuf,
    },
    /// Import an installed-package set into the current switch.
    Import {
        /// File to read the package set from.
        file: PathBuf,
    },
    /// Rebuild a switch from scratch.
    Reinstall {
        /// Switch to rebuild (the current one when omitted).
        name: Option<SwitchName>,
    },
    /// List the available and installed switches.
    List,
    /// Print the switch currently in use.
    Current,
}

pub fn handle(session: &Session, args: SwitchArgs, engine: &mut dyn Engine) -> Result<()> {
    let action = match (args.command, args.name) {
        (Some(command), None) => resolve(command),
        (None, Some(name)) => install(name, args.alias_of, args.no_base_packages),
        (None, None) => {
            return Err(Fault::Usage(
                "switch requires a sub-verb or a switch name to install".to_string(),
            )
            .into());
        }
        (Some(_), Some(_)) => {
            return Err(Fault::Usage(
                "cannot combine a bare switch name with a sub-verb".to_string(),
            )
            .into());
        }
    };
    engine.perform(session, Action::Switch(action))
}

fn resolve(command: SwitchCommand) -> SwitchAction {
    match command {
        SwitchCommand::Add { name, alias_of, no_base_packages } => {
            install(name, alias_of, no_base_packages)
        }
        SwitchCommand::Remove { name } => SwitchAction::Remove { switch: name },
        SwitchCommand::Export { file } => SwitchAction::Export { file },
        SwitchCommand::Import { file } => SwitchAction::Import { file },
        SwitchCommand::Reinstall { name } => SwitchAction::Reinstall { switch: name },
        SwitchCommand::List => SwitchAction::List,
        SwitchCommand::Current => SwitchAction::Current,
    }
}

fn install(
    name: SwitchName,
    alias_of: Option<CompilerId>,
    no_base_packages: bool,
) -> SwitchAction {
    let compiler = alias_of.unwrap_or_else(|| CompilerId::from(name.clone()));
    SwitchAction::Install {
        switch: name,
        compiler,
        no_base_packages,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::testutil::{dispatch_err, record};
    use pretty_assertions::assert_eq;

    #[test]
    fn add_without_alias_uses_the_name_as_compiler() {
        let action = record(&["quarry", "switch", "add", "4.01.0"]);
        assert_eq!(
            action,
            Action::Switch(SwitchAction::Install {
                switch: "4.01.0".parse().unwrap(),
                compiler: "4.01.0".parse().unwrap(),
                no_base_packages: false,
            })
        );
    }

    #[test]
    fn bare_name_is_shorthand_for_add() {
        let action = record(&[
            "quarry", "switch", "4.01.0", "--alias-of", "4.01.0+flambda",
        ]);
        assert_eq!(
            action,
            Action::Switch(SwitchAction::Install {
                switch: "4.01.0".parse().unwrap(),
                compiler: "4.01.0+flambda".parse().unwrap(),
                no_base_packages: false,
            })
        );
    }

    #[test]
    fn install_is_an_alias_for_add() {
        let via_alias = record(&["quarry", "switch", "install", "system"]);
        let direct = record(&["quarry", "switch", "add", "system"]);
        assert_eq!(via_alias, direct);
    }

    #[test]
    fn bare_switch_with_nothing_to_do_is_a_usage_fault() {
        let err = dispatch_err(&["quarry", "switch"]);
        assert!(matches!(
            err.downcast_ref::<Fault>(),
            Some(Fault::Usage(_))
        ));
    }

    #[test]
    fn reinstall_defaults_to_the_current_switch() {
        let action = record(&["quarry", "switch", "reinstall"]);
        assert_eq!(
            action,
            Action::Switch(SwitchAction::Reinstall { switch: None })
        );
    }

    #[test]
    fn export_and_import_carry_the_file() {
        let action = record(&["quarry", "switch", "export", "state.export"]);
        assert_eq!(
            action,
            Action::Switch(SwitchAction::Export {
                file: PathBuf::from("state.export"),
            })
        );
    }
}
