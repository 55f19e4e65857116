//! Shell selection for sourcing result-space setup scripts
//!
//! Sourcing must happen in a clean, reproducible shell state, so the chosen
//! shell is always invoked in no-rc mode. Only two shell families have a
//! known no-rc flag; everything else is normalized to the first family so
//! that a command line can always be compiled.

use crate::errors::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Default shell used when no `SHELL` override is present
pub const DEFAULT_SHELL: &str = "/bin/bash";

/// Shell families with a known no-rc invocation flag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ShellFamily {
    /// Bash shell
    #[default]
    Bash,
    /// Z shell
    Zsh,
}

impl ShellFamily {
    /// Map a shell executable's base name to a family.
    ///
    /// Total: any name outside the recognized families falls back to bash,
    /// trading fidelity for an invocation that always carries a valid flag.
    pub fn from_name(name: &str) -> Self {
        match name {
            "zsh" => Self::Zsh,
            _ => Self::Bash,
        }
    }

    /// Get the name of the shell family
    pub fn name(&self) -> &'static str {
        match self {
            Self::Bash => "bash",
            Self::Zsh => "zsh",
        }
    }

    /// Flag that suppresses shell startup customization files
    pub fn norc_flag(&self) -> &'static str {
        match self {
            Self::Bash => "--norc",
            Self::Zsh => "-f",
        }
    }
}

impl fmt::Display for ShellFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A selected shell executable and its normalized family
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellSelection {
    /// Executable path used to invoke the shell
    pub path: PathBuf,
    /// Family whose no-rc flag the invocation uses
    pub family: ShellFamily,
}

/// Choose the shell used to source a setup script.
///
/// A `SHELL` value in the calling environment is taken verbatim, even when it
/// points at nothing (it will fail at execution time instead). Without an
/// override the default shell is used and must exist on disk.
pub fn select() -> Result<ShellSelection> {
    let path = match std::env::var_os("SHELL") {
        Some(shell) => PathBuf::from(shell),
        None => {
            let default = PathBuf::from(DEFAULT_SHELL);
            if !default.is_file() {
                return Err(Error::shell_not_found(default));
            }
            default
        }
    };

    let family = path
        .file_name()
        .and_then(|name| name.to_str())
        .map(ShellFamily::from_name)
        .unwrap_or_default();

    tracing::debug!(shell = %path.display(), family = %family, "selected sourcing shell");
    Ok(ShellSelection { path, family })
}
