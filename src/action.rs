//! Fully-typed action descriptors handed to the engine.
//!
//! One variant per concrete operation the CLI can request. By the time a
//! value of these types exists, every argument has been through its
//! converter; the only raw strings left are genuinely free-form text
//! (search patterns, pin versions, make commands).

use std::fmt;
use std::path::PathBuf;

use crate::ident::{Address, CompilerId, PackageName, RepoKind, RepoName, SwitchName, Variable};

/// A single validated operation, ready to perform.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Init {
        repo: RepoName,
        address: Address,
        kind: RepoKind,
        compiler: Option<CompilerId>,
        jobs: Option<u32>,
    },
    List {
        patterns: Vec<String>,
        short: bool,
        installed_only: bool,
    },
    Search {
        patterns: Vec<String>,
        short: bool,
        installed_only: bool,
        case_sensitive: bool,
    },
    Info {
        patterns: Vec<String>,
    },
    Config(ConfigAction),
    Install {
        packages: Vec<PackageName>,
    },
    Remove {
        packages: Vec<PackageName>,
    },
    Reinstall {
        packages: Vec<PackageName>,
    },
    Update {
        repositories: Vec<RepoName>,
    },
    Upgrade {
        packages: Vec<PackageName>,
    },
    Repository(RepoAction),
    Switch(SwitchAction),
    Pin(PinAction),
    Upload {
        manifest: PathBuf,
        descr: PathBuf,
        archive: PathBuf,
        repository: RepoName,
    },
}

/// Configuration queries.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigAction {
    Env { csh: bool },
    Var { name: Variable },
    List { packages: Vec<PackageName> },
    Subst { files: Vec<PathBuf> },
    Includes { recursive: bool, packages: Vec<PackageName> },
    CompileFlags {
        phase: LinkPhase,
        recursive: bool,
        packages: Vec<PackageName>,
    },
}

/// Compilation step whose flags are being queried.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkPhase {
    Bytecomp,
    Bytelink,
    Asmcomp,
    Asmlink,
}

impl fmt::Display for LinkPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LinkPhase::Bytecomp => "bytecomp",
            LinkPhase::Bytelink => "bytelink",
            LinkPhase::Asmcomp => "asmcomp",
            LinkPhase::Asmlink => "asmlink",
        };
        f.write_str(name)
    }
}

/// Repository management operations.
#[derive(Debug, Clone, PartialEq)]
pub enum RepoAction {
    Add {
        name: RepoName,
        address: Address,
        kind: RepoKind,
        priority: Option<i32>,
    },
    Remove { names: Vec<RepoName> },
    List,
    Priority { name: RepoName, priority: i32 },
}

/// Compiler switch operations.
#[derive(Debug, Clone, PartialEq)]
pub enum SwitchAction {
    Install {
        switch: SwitchName,
        compiler: CompilerId,
        no_base_packages: bool,
    },
    Remove { switch: SwitchName },
    Export { file: PathBuf },
    Import { file: PathBuf },
    Reinstall { switch: Option<SwitchName> },
    List,
    Current,
}

/// Pin management operations.
#[derive(Debug, Clone, PartialEq)]
pub enum PinAction {
    List,
    Unpin { package: PackageName },
    Pin { package: PackageName, target: PinTarget },
}

/// What a package is pinned to.
#[derive(Debug, Clone, PartialEq)]
pub enum PinTarget {
    Version(String),
    Git(Address),
    Path(PathBuf),
}

impl fmt::Display for PinTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PinTarget::Version(v) => write!(f, "version {}", v),
            PinTarget::Git(addr) => write!(f, "git {}", addr),
            PinTarget::Path(path) => write!(f, "path {}", path.display()),
        }
    }
}

fn join<T: fmt::Display>(items: &[T]) -> String {
    items
        .iter()
        .map(|item| item.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

fn write_with_list(
    f: &mut fmt::Formatter<'_>,
    verb: &str,
    items: &[impl fmt::Display],
) -> fmt::Result {
    if items.is_empty() {
        f.write_str(verb)
    } else {
        write!(f, "{} {}", verb, join(items))
    }
}

/// Canonical one-line rendering, used by the plan engine and debug logs.
impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Init { repo, address, kind, compiler, jobs } => {
                write!(f, "init {} {} (kind: {})", repo, address, kind)?;
                if let Some(compiler) = compiler {
                    write!(f, " compiler={}", compiler)?;
                }
                if let Some(jobs) = jobs {
                    write!(f, " jobs={}", jobs)?;
                }
                Ok(())
            }
            Action::List { patterns, .. } => write_with_list(f, "list", patterns),
            Action::Search { patterns, .. } => write_with_list(f, "search", patterns),
            Action::Info { patterns } => write_with_list(f, "info", patterns),
            Action::Config(config) => config.fmt(f),
            Action::Install { packages } => write_with_list(f, "install", packages),
            Action::Remove { packages } => write_with_list(f, "remove", packages),
            Action::Reinstall { packages } => write_with_list(f, "reinstall", packages),
            Action::Update { repositories } => write_with_list(f, "update", repositories),
            Action::Upgrade { packages } => write_with_list(f, "upgrade", packages),
            Action::Repository(repo) => repo.fmt(f),
            Action::Switch(switch) => switch.fmt(f),
            Action::Pin(pin) => pin.fmt(f),
            Action::Upload { manifest, descr, archive, repository } => write!(
                f,
                "upload {} {} {} to {}",
                manifest.display(),
                descr.display(),
                archive.display(),
                repository
            ),
        }
    }
}

impl fmt::Display for ConfigAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigAction::Env { csh: false } => f.write_str("config env"),
            ConfigAction::Env { csh: true } => f.write_str("config env (csh)"),
            ConfigAction::Var { name } => write!(f, "config var {}", name),
            ConfigAction::List { packages } => write_with_list(f, "config list", packages),
            ConfigAction::Subst { files } => {
                let files: Vec<String> = files.iter().map(|p| p.display().to_string()).collect();
                write_with_list(f, "config subst", &files)
            }
            ConfigAction::Includes { recursive, packages } => {
                let verb = if *recursive {
                    "config includes -r"
                } else {
                    "config includes"
                };
                write_with_list(f, verb, packages)
            }
            ConfigAction::CompileFlags { phase, recursive, packages } => {
                let verb = if *recursive {
                    format!("config {} -r", phase)
                } else {
                    format!("config {}", phase)
                };
                write_with_list(f, &verb, packages)
            }
        }
    }
}

impl fmt::Display for RepoAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RepoAction::Add { name, address, kind, priority } => {
                write!(f, "repository add {} {} (kind: {}", name, address, kind)?;
                if let Some(priority) = priority {
                    write!(f, ", priority: {}", priority)?;
                }
                f.write_str(")")
            }
            RepoAction::Remove { names } => write_with_list(f, "repository remove", names),
            RepoAction::List => f.write_str("repository list"),
            RepoAction::Priority { name, priority } => {
                write!(f, "repository priority {} {}", name, priority)
            }
        }
    }
}

impl fmt::Display for SwitchAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SwitchAction::Install { switch, compiler, no_base_packages } => {
                write!(f, "switch install {} (compiler: {})", switch, compiler)?;
                if *no_base_packages {
                    f.write_str(" without base packages")?;
                }
                Ok(())
            }
            SwitchAction::Remove { switch } => write!(f, "switch remove {}", switch),
            SwitchAction::Export { file } => write!(f, "switch export {}", file.display()),
            SwitchAction::Import { file } => write!(f, "switch import {}", file.display()),
            SwitchAction::Reinstall { switch: Some(switch) } => {
                write!(f, "switch reinstall {}", switch)
            }
            SwitchAction::Reinstall { switch: None } => f.write_str("switch reinstall"),
            SwitchAction::List => f.write_str("switch list"),
            SwitchAction::Current => f.write_str("switch current"),
        }
    }
}

impl fmt::Display for PinAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PinAction::List => f.write_str("pin list"),
            PinAction::Unpin { package } => write!(f, "unpin {}", package),
            PinAction::Pin { package, target } => write!(f, "pin {} to {}", package, target),
        }
    }
}
