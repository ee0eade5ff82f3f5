//! Package upload (`quarry upload`).

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::Args;

use crate::action::Action;
use crate::engine::Engine;
use crate::fault::Fault;
use crate::ident::RepoName;
use crate::session::Session;

/// Arguments for `quarry upload`.
#[derive(Args, Debug)]
pub struct UploadArgs {
    /// Package manifest to upload.
    #[arg(long, value_name = "FILE")]
    pub manifest: Option<PathBuf>,
    /// Package description to upload.
    #[arg(long, value_name = "FILE")]
    pub descr: Option<PathBuf>,
    /// Source archive to upload.
    #[arg(long, value_name = "FILE")]
    pub archive: Option<PathBuf>,
    /// Repository to upload to.
    #[arg(long = "repo", value_name = "NAME")]
    pub repository: Option<RepoName>,
}

pub fn handle(session: &Session, args: UploadArgs, engine: &mut dyn Engine) -> Result<()> {
    let manifest = required(args.manifest, "--manifest")?;
    let descr = required(args.descr, "--descr")?;
    let archive = required(args.archive, "--archive")?;
    for (file, flag) in [(&manifest, "--manifest"), (&descr, "--descr"), (&archive, "--archive")] {
        must_exist(file, flag)?;
    }
    engine.perform(
        session,
        Action::Upload {
            manifest,
            descr,
            archive,
            repository: args.repository.unwrap_or_else(RepoName::default_repo),
        },
    )
}

fn required(file: Option<PathBuf>, flag: &str) -> Result<PathBuf> {
    file.ok_or_else(|| Fault::Usage(format!("upload requires {}", flag)).into())
}

/// All three upload files must exist before the upload is attempted.
fn must_exist(file: &Path, flag: &str) -> Result<()> {
    if !file.exists() {
        return Err(Fault::Domain(format!(
            "{} file not found: {}",
            flag,
            file.display()
        ))
        .into());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::testutil::{dispatch_err, record};
    use pretty_assertions::assert_eq;
    use std::fs;

    fn touch(dir: &tempfile::TempDir, name: &str) -> String {
        let path = dir.path().join(name);
        fs::write(&path, b"").unwrap();
        path.to_str().unwrap().to_string()
    }

    #[test]
    fn upload_defaults_to_the_default_repository() {
        let dir = tempfile::tempdir().unwrap();
        let manifest = touch(&dir, "quarry.manifest");
        let descr = touch(&dir, "descr");
        let archive = touch(&dir, "pkg.tar.gz");
        let action = record(&[
            "quarry", "upload", "--manifest", &manifest, "--descr", &descr, "--archive",
            &archive,
        ]);
        assert_eq!(
            action,
            Action::Upload {
                manifest: manifest.into(),
                descr: descr.into(),
                archive: archive.into(),
                repository: RepoName::default_repo(),
            }
        );
    }

    #[test]
    fn missing_flag_is_a_usage_fault() {
        let err = dispatch_err(&["quarry", "upload", "--manifest", "m"]);
        assert!(matches!(
            err.downcast_ref::<Fault>(),
            Some(Fault::Usage(_))
        ));
    }

    #[test]
    fn missing_file_is_a_domain_fault() {
        let dir = tempfile::tempdir().unwrap();
        let manifest = touch(&dir, "quarry.manifest");
        let missing = dir.path().join("nope").to_str().unwrap().to_string();
        let err = dispatch_err(&[
            "quarry", "upload", "--manifest", &manifest, "--descr", &missing, "--archive",
            &missing,
        ]);
        match err.downcast_ref::<Fault>() {
            Some(Fault::Domain(msg)) => assert!(msg.contains("--descr")),
            other => panic!("expected a domain fault, got {:?}", other),
        }
    }
}
