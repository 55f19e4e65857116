//! Content fingerprints for result-space environment hooks

use resultspace_core::paths::ENV_HOOKS_DIR;
use resultspace_core::{Error, Result};
use sha2::{Digest, Sha256};
use std::fs;
use std::path::Path;
use tracing::debug;

/// Fingerprint every hook file under `space`'s hook directory.
///
/// Produces one lowercase-hex SHA-256 digest of the raw byte content per
/// directory entry (non-recursive), in the host filesystem's listing order.
/// A missing hook directory yields an empty set, not an error.
///
/// Cache validity compares these sequences positionally, so the listing
/// order itself is significant: two calls against an unchanged directory on
/// the same machine return the same sequence in the same order.
pub fn hook_fingerprints(space: &Path) -> Result<Vec<String>> {
    let hooks_dir = space.join(ENV_HOOKS_DIR);
    if !hooks_dir.exists() {
        return Ok(Vec::new());
    }

    let entries = fs::read_dir(&hooks_dir)
        .map_err(|err| Error::io(err, Some(hooks_dir.clone()), "list environment hooks"))?;

    let mut fingerprints = Vec::new();
    for entry in entries {
        let entry = entry
            .map_err(|err| Error::io(err, Some(hooks_dir.clone()), "list environment hooks"))?;
        let content = fs::read(entry.path())
            .map_err(|err| Error::io(err, Some(entry.path()), "read environment hook"))?;

        let mut hasher = Sha256::new();
        hasher.update(&content);
        fingerprints.push(hex::encode(hasher.finalize()));
    }

    debug!(
        space = %space.display(),
        hooks = fingerprints.len(),
        "fingerprinted environment hooks"
    );
    Ok(fingerprints)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn hooks_dir(space: &TempDir) -> std::path::PathBuf {
        let dir = space.path().join(ENV_HOOKS_DIR);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_absent_hook_directory_yields_empty_set() {
        let space = TempDir::new().unwrap();
        assert!(hook_fingerprints(space.path()).unwrap().is_empty());
    }

    #[test]
    fn test_one_fingerprint_per_hook_file() {
        let space = TempDir::new().unwrap();
        let dir = hooks_dir(&space);
        fs::write(dir.join("10.env_hook.sh"), "export A=1\n").unwrap();
        fs::write(dir.join("20.path.sh"), "export PATH=/opt/bin:$PATH\n").unwrap();

        let fingerprints = hook_fingerprints(space.path()).unwrap();
        assert_eq!(fingerprints.len(), 2);
    }

    #[test]
    fn test_fingerprints_are_stable_across_calls() {
        let space = TempDir::new().unwrap();
        let dir = hooks_dir(&space);
        fs::write(dir.join("10.env_hook.sh"), "export A=1\n").unwrap();
        fs::write(dir.join("20.path.sh"), "export B=2\n").unwrap();

        let first = hook_fingerprints(space.path()).unwrap();
        let second = hook_fingerprints(space.path()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_content_change_changes_the_set() {
        let space = TempDir::new().unwrap();
        let dir = hooks_dir(&space);
        fs::write(dir.join("10.env_hook.sh"), "export A=1\n").unwrap();

        let before = hook_fingerprints(space.path()).unwrap();
        fs::write(dir.join("10.env_hook.sh"), "export A=2\n").unwrap();
        let after = hook_fingerprints(space.path()).unwrap();
        assert_ne!(before, after);
    }

    #[test]
    fn test_digest_is_of_raw_bytes() {
        let space = TempDir::new().unwrap();
        let dir = hooks_dir(&space);
        fs::write(dir.join("hook.sh"), b"export A=1\n").unwrap();

        let mut hasher = Sha256::new();
        hasher.update(b"export A=1\n");
        let expected = hex::encode(hasher.finalize());

        assert_eq!(hook_fingerprints(space.path()).unwrap(), vec![expected]);
    }
}
