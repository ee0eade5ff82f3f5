//! Domain identifier types and their parse/print pairs.
//!
//! Every option and positional argument that names a domain entity goes
//! through one of these converters. Parsing only checks lexical shape;
//! whether a package or repository actually exists is the engine's problem.
//! For every canonically written value `v`, `parse(print(v)) == v`.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum IdentError {
    #[error("invalid package name '{0}': expected alphanumeric characters plus '_', '-', '+', '.'")]
    BadPackageName(String),
    #[error("invalid repository name '{0}': expected alphanumeric characters plus '_', '-', '+', '.'")]
    BadRepoName(String),
    #[error("invalid switch name '{0}': expected a nonempty name without whitespace or '/'")]
    BadSwitchName(String),
    #[error("invalid compiler '{0}': expected a nonempty identifier without whitespace")]
    BadCompilerId(String),
    #[error("invalid variable '{0}': expected 'var' or 'package.var'")]
    BadVariable(String),
    #[error("address cannot be empty")]
    EmptyAddress,
    #[error("unknown repository kind '{0}': expected http, curl, wget, local, rsync, or git")]
    BadRepoKind(String),
}

/// First character alphanumeric, the rest alphanumeric or `_ - + .`.
fn valid_name(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphanumeric() => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '+' | '.'))
}

/// Name of a package as it appears in repositories.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PackageName(String);

impl PackageName {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for PackageName {
    type Err = IdentError;

    fn from_str(s: &str) -> Result<Self, IdentError> {
        if valid_name(s) {
            Ok(PackageName(s.to_string()))
        } else {
            Err(IdentError::BadPackageName(s.to_string()))
        }
    }
}

impl fmt::Display for PackageName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Name under which a repository is registered.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RepoName(String);

impl RepoName {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Name used when no repository is specified.
    pub fn default_repo() -> RepoName {
        RepoName("default".to_string())
    }
}

impl FromStr for RepoName {
    type Err = IdentError;

    fn from_str(s: &str) -> Result<Self, IdentError> {
        if valid_name(s) {
            Ok(RepoName(s.to_string()))
        } else {
            Err(IdentError::BadRepoName(s.to_string()))
        }
    }
}

impl fmt::Display for RepoName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Name of a compiler switch. Switch names are used as directory names
/// under the state root, so path separators are rejected outright.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SwitchName(String);

impl SwitchName {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for SwitchName {
    type Err = IdentError;

    fn from_str(s: &str) -> Result<Self, IdentError> {
        if !s.is_empty() && !s.contains(char::is_whitespace) && !s.contains('/') {
            Ok(SwitchName(s.to_string()))
        } else {
            Err(IdentError::BadSwitchName(s.to_string()))
        }
    }
}

impl fmt::Display for SwitchName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier of a compiler release, e.g. `4.01.0` or `4.01.0+flambda`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CompilerId(String);

impl CompilerId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for CompilerId {
    type Err = IdentError;

    fn from_str(s: &str) -> Result<Self, IdentError> {
        if !s.is_empty() && !s.contains(char::is_whitespace) {
            Ok(CompilerId(s.to_string()))
        } else {
            Err(IdentError::BadCompilerId(s.to_string()))
        }
    }
}

/// A switch installed without `--alias-of` uses its own name as the
/// compiler identifier. Switch name rules are a subset of compiler rules,
/// so the conversion never fails.
impl From<SwitchName> for CompilerId {
    fn from(name: SwitchName) -> CompilerId {
        CompilerId(name.0)
    }
}

impl fmt::Display for CompilerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Configuration variable, either global (`var`) or scoped to a package
/// (`package.var`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Variable(String);

impl Variable {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for Variable {
    type Err = IdentError;

    fn from_str(s: &str) -> Result<Self, IdentError> {
        let segments: Vec<&str> = s.split('.').collect();
        let ok = matches!(segments.len(), 1 | 2) && segments.iter().all(|seg| valid_name(seg));
        if ok {
            Ok(Variable(s.to_string()))
        } else {
            Err(IdentError::BadVariable(s.to_string()))
        }
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Location of a repository or pin target: a URL, an rsync spec, or a
/// local path. Free-form apart from being nonempty.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Address(String);

impl Address {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Address of the standard package repository, used by `init` when no
    /// address is given.
    pub fn default_repo() -> Address {
        Address("https://repo.quarry.dev/stable".to_string())
    }

    /// Filesystem probe: does the address name something that exists here?
    pub fn is_local_path(&self) -> bool {
        Path::new(&self.0).exists()
    }

    /// Git-shaped address: leading `git` (as in `git://...`) or trailing
    /// `git` (as in `repo.git`, with a trailing `/` ignored).
    pub fn looks_like_git(&self) -> bool {
        self.0.starts_with("git") || self.0.trim_end_matches('/').ends_with("git")
    }

    pub fn to_path(&self) -> PathBuf {
        PathBuf::from(&self.0)
    }
}

impl FromStr for Address {
    type Err = IdentError;

    fn from_str(s: &str) -> Result<Self, IdentError> {
        if s.is_empty() {
            Err(IdentError::EmptyAddress)
        } else {
            Ok(Address(s.to_string()))
        }
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Transport used to synchronize a repository.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RepoKind {
    Http,
    Local,
    Rsync,
    Git,
}

impl RepoKind {
    /// System-wide default kind, used as the last inference fallback.
    pub const DEFAULT: RepoKind = RepoKind::Http;

    /// Guess the kind of a repository from its address when `--kind` was
    /// not given. The precedence is fixed: an existing local path wins,
    /// then a git-shaped address, then the system default. A local
    /// directory whose name ends in `git` is deliberately classified as
    /// local because the probe runs first.
    pub fn infer(address: &Address) -> RepoKind {
        if address.is_local_path() {
            RepoKind::Local
        } else if address.looks_like_git() {
            RepoKind::Git
        } else {
            RepoKind::DEFAULT
        }
    }
}

impl FromStr for RepoKind {
    type Err = IdentError;

    fn from_str(s: &str) -> Result<Self, IdentError> {
        // curl and wget are historical synonyms for the http transport.
        match s {
            "http" | "curl" | "wget" => Ok(RepoKind::Http),
            "local" => Ok(RepoKind::Local),
            "rsync" => Ok(RepoKind::Rsync),
            "git" => Ok(RepoKind::Git),
            _ => Err(IdentError::BadRepoKind(s.to_string())),
        }
    }
}

impl fmt::Display for RepoKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let canonical = match self {
            RepoKind::Http => "http",
            RepoKind::Local => "local",
            RepoKind::Rsync => "rsync",
            RepoKind::Git => "git",
        };
        f.write_str(canonical)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn canonical_values_round_trip() {
        for name in ["zlib", "lwt", "ocamlfind", "conf-gmp.1", "foo_bar+x"] {
            let parsed: PackageName = name.parse().unwrap();
            assert_eq!(parsed.to_string(), name);
        }
        for name in ["default", "my-repo", "overlay.2"] {
            let parsed: RepoName = name.parse().unwrap();
            assert_eq!(parsed.to_string(), name);
        }
        for name in ["4.01.0", "4.01.0+flambda", "system"] {
            let sw: SwitchName = name.parse().unwrap();
            assert_eq!(sw.to_string(), name);
            let comp: CompilerId = name.parse().unwrap();
            assert_eq!(comp.to_string(), name);
        }
        for var in ["prefix", "foo.bar"] {
            let parsed: Variable = var.parse().unwrap();
            assert_eq!(parsed.to_string(), var);
        }
        for addr in ["http://example.com/repo", "rsync://host/repo", "/srv/repo"] {
            let parsed: Address = addr.parse().unwrap();
            assert_eq!(parsed.to_string(), addr);
        }
        for kind in ["http", "local", "rsync", "git"] {
            let parsed: RepoKind = kind.parse().unwrap();
            assert_eq!(parsed.to_string(), kind);
        }
    }

    #[test]
    fn malformed_identifiers_are_rejected() {
        assert!("".parse::<PackageName>().is_err());
        assert!("-zlib".parse::<PackageName>().is_err());
        assert!("zl ib".parse::<PackageName>().is_err());
        assert!("".parse::<RepoName>().is_err());
        assert!("a/b".parse::<SwitchName>().is_err());
        assert!("4.01 .0".parse::<CompilerId>().is_err());
        assert!("".parse::<Address>().is_err());
        assert!("a.b.c".parse::<Variable>().is_err());
        assert!(".hidden".parse::<Variable>().is_err());
    }

    #[test]
    fn http_synonyms_funnel_to_one_kind() {
        assert_eq!("curl".parse::<RepoKind>().unwrap(), RepoKind::Http);
        assert_eq!("wget".parse::<RepoKind>().unwrap(), RepoKind::Http);
        assert_eq!(
            "ftp".parse::<RepoKind>(),
            Err(IdentError::BadRepoKind("ftp".to_string()))
        );
    }

    #[test]
    fn kind_inference_prefers_existing_paths() {
        let dir = tempfile::tempdir().unwrap();
        let addr: Address = dir.path().to_str().unwrap().parse().unwrap();
        assert_eq!(RepoKind::infer(&addr), RepoKind::Local);
    }

    #[test]
    fn kind_inference_recognizes_git_shapes() {
        let git_prefix: Address = "git://host/repo".parse().unwrap();
        let git_suffix: Address = "https://host/repo.git".parse().unwrap();
        let git_suffix_slash: Address = "https://host/repo.git/".parse().unwrap();
        assert_eq!(RepoKind::infer(&git_prefix), RepoKind::Git);
        assert_eq!(RepoKind::infer(&git_suffix), RepoKind::Git);
        assert_eq!(RepoKind::infer(&git_suffix_slash), RepoKind::Git);
    }

    #[test]
    fn kind_inference_falls_back_to_http() {
        let addr: Address = "http://example.com/repo".parse().unwrap();
        assert_eq!(RepoKind::infer(&addr), RepoKind::Http);
        // Not a URL at all, but not git-shaped and not on disk either.
        let odd: Address = "somewhere-else".parse().unwrap();
        assert_eq!(RepoKind::infer(&odd), RepoKind::Http);
    }

    #[test]
    fn local_directory_named_git_stays_local() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mygit");
        std::fs::create_dir(&path).unwrap();
        let addr: Address = path.to_str().unwrap().parse().unwrap();
        assert_eq!(RepoKind::infer(&addr), RepoKind::Local);
    }
}
