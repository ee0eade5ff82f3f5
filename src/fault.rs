//! Failure taxonomy and process exit mapping.
//!
//! Three outcomes exist: a recognized user-facing failure (bad usage or a
//! named domain precondition) exits with 1, anything unclassified exits
//! with 2, success exits with 0. Classification happens in one place, at
//! the end of `main`; handlers never call `process::exit` themselves.

use std::backtrace::BacktraceStatus;
use std::fmt::Write as _;

use thiserror::Error;

pub const SUCCESS: i32 = 0;
pub const USER_ERROR: i32 = 1;
pub const UNEXPECTED: i32 = 2;

/// A recognized, user-facing failure.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Fault {
    /// Malformed invocation detected after argument parsing, e.g. a
    /// positional shape clap cannot express.
    #[error("{0}")]
    Usage(String),
    /// Named precondition failure raised by a handler.
    #[error("{0}")]
    Domain(String),
}

/// Exit code for an error that reached the entry point.
pub fn exit_code(err: &anyhow::Error) -> i32 {
    if err.downcast_ref::<Fault>().is_some() {
        USER_ERROR
    } else {
        UNEXPECTED
    }
}

/// Stderr report for an error that reached the entry point. Recognized
/// faults get a one-line message; unclassified failures echo the full
/// invoked command line first, then the cause chain and, when captured,
/// a backtrace.
pub fn render_failure(argv: &[String], err: &anyhow::Error) -> String {
    if let Some(fault) = err.downcast_ref::<Fault>() {
        return format!("quarry: {}\n", fault);
    }

    let mut out = String::new();
    let _ = writeln!(out, "'{}' failed.", argv.join(" "));
    let _ = writeln!(out, "error: {}", err);
    for cause in err.chain().skip(1) {
        let _ = writeln!(out, "  caused by: {}", cause);
    }
    let backtrace = err.backtrace();
    if backtrace.status() == BacktraceStatus::Captured {
        let _ = writeln!(out, "{}", backtrace);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::{Context, anyhow};
    use pretty_assertions::assert_eq;

    #[test]
    fn faults_exit_with_one() {
        let usage: anyhow::Error = Fault::Usage("bad shape".to_string()).into();
        let domain: anyhow::Error = Fault::Domain("missing file".to_string()).into();
        assert_eq!(exit_code(&usage), USER_ERROR);
        assert_eq!(exit_code(&domain), USER_ERROR);
    }

    #[test]
    fn unclassified_failures_exit_with_two() {
        let err = anyhow!("disk on fire");
        assert_eq!(exit_code(&err), UNEXPECTED);
    }

    #[test]
    fn fault_report_is_one_line() {
        let err: anyhow::Error = Fault::Domain("missing required file: --manifest".into()).into();
        assert_eq!(
            render_failure(&[], &err),
            "quarry: missing required file: --manifest\n"
        );
    }

    #[test]
    fn unclassified_report_echoes_the_command_line() {
        let argv: Vec<String> = ["quarry", "install", "zlib"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let err = anyhow!("connection reset").context("fetching repository index");
        let report = render_failure(&argv, &err);
        assert!(report.starts_with("'quarry install zlib' failed.\n"));
        assert!(report.contains("error: fetching repository index"));
        assert!(report.contains("caused by: connection reset"));
    }
}
