//! Seam between the CLI layer and the package-management engine.
//!
//! Handlers hand exactly one [`Action`] to an [`Engine`]; resolution,
//! repository synchronization, and build execution all live behind this
//! trait. The built-in [`PlanEngine`] renders each action instead of
//! executing it, which is what the binary ships until a real backend is
//! wired in, and what keeps the parsing layer testable on its own.

use std::env;

use anyhow::{Result, bail};

use crate::action::Action;
use crate::session::Session;

/// Fault-injection hook: when set, the plan engine fails with the given
/// message instead of performing anything. Lets the failure reporting
/// path be exercised against the real binary.
pub const INJECT_FAILURE_ENV: &str = "QUARRY_INJECT_FAILURE";

pub trait Engine {
    /// Carry out a single fully-typed action under the given session.
    fn perform(&mut self, session: &Session, action: Action) -> Result<()>;
}

/// Engine that prints the canonical one-line form of each action.
#[derive(Debug, Default)]
pub struct PlanEngine;

impl Engine for PlanEngine {
    fn perform(&mut self, session: &Session, action: Action) -> Result<()> {
        log::debug!("session: {:?}", session);
        log::info!("performing: {}", action);
        if let Ok(reason) = env::var(INJECT_FAILURE_ENV) {
            bail!("{}", reason);
        }
        println!("{}", action);
        Ok(())
    }
}
