//! Directory contract of a valid result space, and executable lookup
//!
//! A result space rooted at `<path>` is expected to provide:
//!
//! | Entry | Role |
//! |-------|------|
//! | `<path>/.catkin` | marker file, required in strict mode |
//! | `<path>/env.sh` | generated setup script sourced to produce the environment |
//! | `<path>/etc/catkin/profile.d/*` | environment hook files, fingerprinted for staleness |

use std::path::{Path, PathBuf};

/// Marker file whose presence identifies a genuine result space
pub const MARKER_FILE: &str = ".catkin";

/// Generated setup script sourced to produce the environment
pub const SETUP_SCRIPT: &str = "env.sh";

/// Directory of environment hook files, relative to the result-space root
pub const ENV_HOOKS_DIR: &str = "etc/catkin/profile.d";

/// Command whose `env` subcommand dumps the sourced environment
pub const TOOL_COMMAND: &str = "catkin";

/// Locate `command` on `PATH`.
///
/// Candidates must be regular files and, on Unix, carry an execute bit. A
/// `command` containing a path separator is checked directly instead of being
/// searched for.
pub fn which(command: &str) -> Option<PathBuf> {
    if command.contains(std::path::MAIN_SEPARATOR) {
        let candidate = PathBuf::from(command);
        return is_executable(&candidate).then_some(candidate);
    }

    let path_value = std::env::var_os("PATH")?;
    let resolved = std::env::split_paths(&path_value)
        .map(|dir| dir.join(command))
        .find(|candidate| is_executable(candidate));

    match &resolved {
        Some(path) => tracing::debug!(command, resolved = %path.display(), "resolved executable"),
        None => tracing::debug!(command, "executable not found on PATH"),
    }
    resolved
}

fn is_executable(candidate: &Path) -> bool {
    if !candidate.is_file() {
        return false;
    }
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::metadata(candidate)
            .map(|metadata| metadata.permissions().mode() & 0o111 != 0)
            .unwrap_or(false)
    }
    #[cfg(not(unix))]
    {
        true
    }
}
