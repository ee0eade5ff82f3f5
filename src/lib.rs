//! Command-line front end for the quarry package manager.
//!
//! This crate turns raw process arguments into validated, strongly-typed
//! [`Action`] values and routes each to an [`Engine`]. Parsing and routing
//! are the whole job: what installing a package or synchronizing a
//! repository actually does lives behind the engine seam.

pub mod action;
pub mod cli;
pub mod engine;
pub mod fault;
pub mod ident;
pub mod session;

pub use action::{Action, ConfigAction, LinkPhase, PinAction, PinTarget, RepoAction, SwitchAction};
pub use engine::{Engine, PlanEngine};
pub use fault::Fault;
pub use ident::{
    Address, CompilerId, IdentError, PackageName, RepoKind, RepoName, SwitchName, Variable,
};
pub use session::{BuildArgs, BuildSettings, EnvPreset, GlobalArgs, Session, Verbosity};
