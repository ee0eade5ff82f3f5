//! Shared option groups and the per-invocation session value.
//!
//! `GlobalArgs` and `BuildArgs` are the two reusable option bundles.
//! Global options are declared once on the top-level parser and inherited
//! verbatim by every command; build options are flattened only into the
//! commands that run builds. Both resolve into a single [`Session`] value
//! that is constructed once per invocation, before any handler runs, and
//! read-only from then on.

use std::env;
use std::path::PathBuf;

use clap::Args;
use log::LevelFilter;

use crate::ident::SwitchName;

/// Environment variables that preset session flags. Presets OR-combine
/// with command-line flags, so an environment-enabled toggle cannot be
/// cleared by a command line that does not mention it.
pub const ROOT_ENV: &str = "QUARRY_ROOT";
pub const DEBUG_ENV: &str = "QUARRY_DEBUG";
pub const YES_ENV: &str = "QUARRY_YES";
pub const KEEP_BUILD_DIR_ENV: &str = "QUARRY_KEEP_BUILD_DIR";
pub const NO_CHECKSUMS_ENV: &str = "QUARRY_NO_CHECKSUMS";
pub const MAKE_ENV: &str = "QUARRY_MAKE";

/// Options shared by every command.
#[derive(Args, Debug, Clone, Default)]
pub struct GlobalArgs {
    /// Print debugging information.
    #[arg(long, global = true, help_heading = "Global options")]
    pub debug: bool,

    /// Report in more detail what is being done.
    #[arg(short, long, global = true, help_heading = "Global options")]
    pub verbose: bool,

    /// Suppress informational output.
    #[arg(short, long, global = true, help_heading = "Global options")]
    pub quiet: bool,

    /// Use this compiler switch instead of the configured one.
    #[arg(long, global = true, value_name = "SWITCH", help_heading = "Global options")]
    pub switch: Option<SwitchName>,

    /// Answer yes to every confirmation prompt.
    #[arg(short = 'y', long = "yes", global = true, help_heading = "Global options")]
    pub assume_yes: bool,

    /// Location of the quarry state root.
    #[arg(long, global = true, value_name = "DIR", help_heading = "Global options")]
    pub root: Option<PathBuf>,
}

/// Options accepted by commands that build packages.
#[derive(Args, Debug, Clone, Default)]
pub struct BuildArgs {
    /// Keep build directories after a build finishes.
    #[arg(long, help_heading = "Build options")]
    pub keep_build_dir: bool,

    /// Command to run instead of the default make.
    #[arg(long = "make", value_name = "COMMAND", help_heading = "Build options")]
    pub make: Option<String>,

    /// Do not verify archive checksums.
    #[arg(long = "no-checksums", help_heading = "Build options")]
    pub no_checksums: bool,
}

/// Flags read from the environment before the command line is applied.
#[derive(Debug, Clone, Default)]
pub struct EnvPreset {
    pub debug: bool,
    pub assume_yes: bool,
    pub root: Option<PathBuf>,
    pub build: BuildSettings,
}

impl EnvPreset {
    pub fn from_env() -> EnvPreset {
        EnvPreset {
            debug: env_flag(DEBUG_ENV),
            assume_yes: env_flag(YES_ENV),
            root: env::var_os(ROOT_ENV).map(PathBuf::from),
            build: BuildSettings {
                keep_build_dir: env_flag(KEEP_BUILD_DIR_ENV),
                make: env::var(MAKE_ENV).ok().filter(|v| !v.is_empty()),
                no_checksums: env_flag(NO_CHECKSUMS_ENV),
            },
        }
    }
}

fn env_flag(name: &str) -> bool {
    match env::var(name) {
        Ok(v) => !v.is_empty() && v != "0" && !v.eq_ignore_ascii_case("false"),
        Err(_) => false,
    }
}

/// Resolved build settings carried by the session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildSettings {
    pub keep_build_dir: bool,
    pub make: Option<String>,
    pub no_checksums: bool,
}

/// How talkative the process should be. Quiet always wins over verbose.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    Quiet,
    Normal,
    Verbose,
    Debug,
}

/// Per-invocation configuration handed to every handler and to the
/// engine. Built exactly once, never mutated afterward.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub debug: bool,
    pub verbose: bool,
    pub quiet: bool,
    pub assume_yes: bool,
    pub switch: Option<SwitchName>,
    pub root: PathBuf,
    pub build: BuildSettings,
}

impl Session {
    pub fn new(args: &GlobalArgs, preset: &EnvPreset) -> Session {
        let root = args
            .root
            .clone()
            .or_else(|| preset.root.clone())
            .unwrap_or_else(default_root);
        Session {
            debug: args.debug || preset.debug,
            verbose: args.verbose,
            quiet: args.quiet,
            assume_yes: args.assume_yes || preset.assume_yes,
            switch: args.switch.clone(),
            root,
            build: preset.build.clone(),
        }
    }

    /// Layer explicit build options on top of the environment presets.
    /// Boolean toggles OR-combine; an explicit `--make` replaces the
    /// preset command.
    pub fn with_build(&self, args: &BuildArgs) -> Session {
        let mut session = self.clone();
        session.build.keep_build_dir |= args.keep_build_dir;
        session.build.no_checksums |= args.no_checksums;
        if let Some(make) = &args.make {
            session.build.make = Some(make.clone());
        }
        session
    }

    pub fn verbosity(&self) -> Verbosity {
        if self.quiet {
            Verbosity::Quiet
        } else if self.debug {
            Verbosity::Debug
        } else if self.verbose {
            Verbosity::Verbose
        } else {
            Verbosity::Normal
        }
    }

    /// Install the global logger according to the session flags. `RUST_LOG`
    /// still takes precedence when set. Safe to call more than once; later
    /// calls are ignored.
    pub fn init_logging(&self) {
        let level = match self.verbosity() {
            Verbosity::Quiet => LevelFilter::Error,
            Verbosity::Normal => LevelFilter::Warn,
            Verbosity::Verbose => LevelFilter::Info,
            Verbosity::Debug => LevelFilter::Debug,
        };
        let mut builder = env_logger::Builder::new();
        builder.filter_level(level);
        builder.format_timestamp(None);
        builder.parse_default_env();
        let _ = builder.try_init();
    }

    #[cfg(test)]
    pub(crate) fn for_tests() -> Session {
        Session {
            debug: false,
            verbose: false,
            quiet: false,
            assume_yes: false,
            switch: None,
            root: PathBuf::from("/tmp/quarry-test-root"),
            build: BuildSettings::default(),
        }
    }
}

fn default_root() -> PathBuf {
    match env::var_os("HOME") {
        Some(home) => PathBuf::from(home).join(".quarry"),
        None => PathBuf::from(".quarry"),
    }
}
