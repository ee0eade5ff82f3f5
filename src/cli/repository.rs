//! Repository management (`quarry repository ...`, alias `remote`).

use anyhow::Result;
use clap::{Args, Subcommand};

use crate::action::{Action, RepoAction};
use crate::engine::Engine;
use crate::ident::{Address, RepoKind, RepoName};
use crate::session::Session;

/// Supported `quarry repository` sub-verbs.
#[derive(Subcommand, Debug)]
pub enum RepositoryCommand {
    /// Register a new repository.
    Add(AddArgs),
    /// Unregister repositories.
    #[command(alias = "rm")]
    Remove {
        /// Repositories to unregister.
        #[arg(required = true)]
        names: Vec<RepoName>,
    },
    /// List the registered repositories.
    List,
    /// Change the resolution priority of a repository.
    #[command(allow_negative_numbers = true)]
    Priority {
        /// Repository to reprioritize.
        name: RepoName,
        /// New priority (higher wins).
        priority: i32,
    },
}

/// Arguments for `quarry repository add`.
#[derive(Args, Debug)]
pub struct AddArgs {
    /// Name under which the repository is registered.
    pub name: RepoName,
    /// Address of the repository.
    pub address: Address,
    /// Kind of the repository (inferred from the address when omitted).
    #[arg(long, value_name = "KIND")]
    pub kind: Option<RepoKind>,
    /// Resolution priority of the repository (higher wins).
    #[arg(long, value_name = "INT", allow_negative_numbers = true)]
    pub priority: Option<i32>,
}

pub fn handle(
    session: &Session,
    command: RepositoryCommand,
    engine: &mut dyn Engine,
) -> Result<()> {
    let action = match command {
        RepositoryCommand::Add(args) => {
            let kind = args.kind.unwrap_or_else(|| RepoKind::infer(&args.address));
            RepoAction::Add {
                name: args.name,
                address: args.address,
                kind,
                priority: args.priority,
            }
        }
        RepositoryCommand::Remove { names } => RepoAction::Remove { names },
        RepositoryCommand::List => RepoAction::List,
        RepositoryCommand::Priority { name, priority } => RepoAction::Priority { name, priority },
    };
    engine.perform(session, Action::Repository(action))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::testutil::{parse_err, record};
    use clap::error::ErrorKind;
    use pretty_assertions::assert_eq;

    #[test]
    fn add_infers_http_for_plain_urls() {
        let action = record(&["quarry", "repository", "add", "myrepo", "http://example.com/repo"]);
        assert_eq!(
            action,
            Action::Repository(RepoAction::Add {
                name: "myrepo".parse().unwrap(),
                address: "http://example.com/repo".parse().unwrap(),
                kind: RepoKind::Http,
                priority: None,
            })
        );
    }

    #[test]
    fn add_honors_an_explicit_kind_and_priority() {
        let action = record(&[
            "quarry", "repository", "add", "myrepo", "host::repo", "--kind", "rsync",
            "--priority", "10",
        ]);
        assert_eq!(
            action,
            Action::Repository(RepoAction::Add {
                name: "myrepo".parse().unwrap(),
                address: "host::repo".parse().unwrap(),
                kind: RepoKind::Rsync,
                priority: Some(10),
            })
        );
    }

    #[test]
    fn curl_is_accepted_as_an_http_synonym() {
        let action = record(&[
            "quarry", "repository", "add", "myrepo", "http://example.com/repo", "--kind", "curl",
        ]);
        match action {
            Action::Repository(RepoAction::Add { kind, .. }) => assert_eq!(kind, RepoKind::Http),
            other => panic!("unexpected action {:?}", other),
        }
    }

    #[test]
    fn priority_takes_exactly_a_name_and_an_integer() {
        let action = record(&["quarry", "repository", "priority", "myrepo", "5"]);
        assert_eq!(
            action,
            Action::Repository(RepoAction::Priority {
                name: "myrepo".parse().unwrap(),
                priority: 5,
            })
        );

        let missing = parse_err(&["quarry", "repository", "priority", "myrepo"]);
        assert_eq!(missing.kind(), ErrorKind::MissingRequiredArgument);

        let extra = parse_err(&["quarry", "repository", "priority", "a", "5", "c"]);
        assert_eq!(extra.kind(), ErrorKind::UnknownArgument);
    }

    #[test]
    fn rm_is_an_alias_for_remove() {
        let action = record(&["quarry", "repository", "rm", "myrepo", "other"]);
        assert_eq!(
            action,
            Action::Repository(RepoAction::Remove {
                names: vec!["myrepo".parse().unwrap(), "other".parse().unwrap()],
            })
        );
    }

    #[test]
    fn unknown_sub_verb_is_rejected() {
        let err = parse_err(&["quarry", "repository", "promote"]);
        assert_eq!(err.kind(), ErrorKind::InvalidSubcommand);
    }
}
