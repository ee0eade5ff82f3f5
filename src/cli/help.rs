//! Help topics (`quarry help [TOPIC]`).

use anyhow::Result;
use clap::{Args, CommandFactory};

use crate::cli::{command_names, Cli};
use crate::fault::Fault;

/// Arguments for `quarry help`.
#[derive(Args, Debug)]
pub struct HelpArgs {
    /// Command to show help for, or `topics` to list what is available.
    pub topic: Option<String>,
}

pub fn handle(args: HelpArgs) -> Result<()> {
    match args.topic.as_deref() {
        None => {
            println!("{}", Cli::command().render_long_help());
            Ok(())
        }
        Some("topics") => {
            for name in command_names() {
                println!("{}", name);
            }
            Ok(())
        }
        Some(topic) => {
            let mut root = Cli::command();
            match root.find_subcommand_mut(topic) {
                Some(cmd) => {
                    println!("{}", cmd.render_long_help());
                    Ok(())
                }
                None => Err(Fault::Usage(format!(
                    "no help topic {:?}; try one of: {}",
                    topic,
                    command_names().join(", ")
                ))
                .into()),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::testutil::dispatch_err;

    #[test]
    fn unknown_topic_lists_the_known_ones() {
        let err = dispatch_err(&["quarry", "help", "frobnicate"]);
        match err.downcast_ref::<Fault>() {
            Some(Fault::Usage(msg)) => {
                assert!(msg.contains("frobnicate"));
                assert!(msg.contains("install"));
                assert!(msg.contains("repository"));
            }
            other => panic!("expected a usage fault, got {:?}", other),
        }
    }
}
