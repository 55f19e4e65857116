//! Error types for the resultspace crates

use miette::Diagnostic;
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for result-space operations
#[derive(Error, Debug, Diagnostic)]
pub enum Error {
    /// The result-space path is not an existing directory
    #[error(
        "cannot load environment from result space \"{}\" because it does not exist",
        path.display()
    )]
    #[diagnostic(code(resultspace::space::not_a_directory))]
    NotADirectory {
        /// The path that was expected to be a result-space directory
        path: PathBuf,
    },

    /// The marker file identifying a genuine result space is absent
    #[error(
        "cannot load environment from result space \"{}\" because it is missing the marker file",
        path.display()
    )]
    #[diagnostic(code(resultspace::space::missing_marker))]
    MissingMarker {
        /// The result-space path that lacks the marker file
        path: PathBuf,
    },

    /// The generated setup script is absent from the result space
    #[error(
        "cannot load environment from result space \"{}\" because the required setup file \"{}\" does not exist",
        path.display(),
        setup.display()
    )]
    #[diagnostic(code(resultspace::space::missing_setup_script))]
    MissingSetupScript {
        /// The result-space path
        path: PathBuf,
        /// The setup script path that was expected to exist
        setup: PathBuf,
    },

    /// No usable shell: `SHELL` is unset and the default shell is absent
    #[error(
        "cannot determine shell executable: the SHELL environment variable is not set and the default \"{}\" does not exist",
        path.display()
    )]
    #[diagnostic(code(resultspace::shell::not_found))]
    ShellNotFound {
        /// The default shell path that failed the existence check
        path: PathBuf,
    },

    /// I/O error with path context
    #[error("I/O error during {operation}: {source}")]
    #[diagnostic(code(resultspace::io::error))]
    Io {
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
        /// The path where the I/O error occurred, if applicable
        path: Option<Box<std::path::Path>>,
        /// Description of the operation that failed
        operation: String,
    },
}

impl Error {
    /// Create a `NotADirectory` error for `path`
    pub fn not_a_directory(path: impl Into<PathBuf>) -> Self {
        Self::NotADirectory { path: path.into() }
    }

    /// Create a `MissingMarker` error for `path`
    pub fn missing_marker(path: impl Into<PathBuf>) -> Self {
        Self::MissingMarker { path: path.into() }
    }

    /// Create a `MissingSetupScript` error for `path` and its expected `setup` script
    pub fn missing_setup_script(path: impl Into<PathBuf>, setup: impl Into<PathBuf>) -> Self {
        Self::MissingSetupScript {
            path: path.into(),
            setup: setup.into(),
        }
    }

    /// Create a `ShellNotFound` error for the default shell `path`
    pub fn shell_not_found(path: impl Into<PathBuf>) -> Self {
        Self::ShellNotFound { path: path.into() }
    }

    /// Create an I/O error with context
    pub fn io(source: std::io::Error, path: Option<PathBuf>, operation: impl Into<String>) -> Self {
        Self::Io {
            source,
            path: path.map(|p| p.into_boxed_path()),
            operation: operation.into(),
        }
    }
}

/// Result type for result-space operations
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_a_directory_message_names_the_path() {
        let err = Error::not_a_directory("/work/result");
        assert!(err.to_string().contains("/work/result"));
        assert!(err.to_string().contains("does not exist"));
    }

    #[test]
    fn test_missing_setup_script_message_names_both_paths() {
        let err = Error::missing_setup_script("/work/result", "/work/result/env.sh");
        let message = err.to_string();
        assert!(message.contains("/work/result"));
        assert!(message.contains("/work/result/env.sh"));
    }

    #[test]
    fn test_io_error_carries_operation() {
        let source = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err = Error::io(source, Some(PathBuf::from("/tmp/hook")), "read environment hook");
        assert!(err.to_string().contains("read environment hook"));
    }
}
