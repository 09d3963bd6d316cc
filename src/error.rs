//! Domain-specific error types for the module installer.
//!
//! Library modules return typed errors ([`ConfigError`], [`InstallError`],
//! [`CommandError`]) so callers can branch on the kind of failure; command
//! handlers at the CLI boundary convert them to [`anyhow::Error`] via `?`.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that arise from reading or writing the settings document.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The settings document does not exist yet.
    #[error("Settings document not found: {}. Run `psmod set-code-path <path>` first", path.display())]
    DocumentMissing {
        /// Expected location of the document.
        path: PathBuf,
    },

    /// The document exists but `PSCodePath` is missing or blank.
    #[error("PSCodePath is not set in {}", path.display())]
    CodePathUnset {
        /// Location of the document that was read.
        path: PathBuf,
    },

    /// `PSCodePath` points at a directory that no longer exists.
    #[error("PSCodePath does not exist: {}", path.display())]
    CodePathMissing {
        /// The stored code path.
        path: PathBuf,
    },

    /// No per-user configuration directory could be determined.
    #[error("cannot determine configuration directory. Use --config or set PSMOD_CONFIG")]
    NoConfigDir,

    /// An I/O error occurred while reading or writing the document.
    #[error("IO error on settings document {}: {source}", path.display())]
    Io {
        /// Path of the document.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The document is not valid JSON or has the wrong shape.
    #[error("Invalid settings document {}: {source}", path.display())]
    Parse {
        /// Path of the document.
        path: PathBuf,
        /// Underlying JSON error.
        source: serde_json::Error,
    },
}

/// Errors that arise while planning or applying an install.
#[derive(Error, Debug)]
pub enum InstallError {
    /// No `<module>.psd1` directly inside the source directory.
    #[error("Cannot find module manifest {module}.psd1 in {}", dir.display())]
    ManifestNotFound {
        /// Module name that was looked up.
        module: String,
        /// Directory that was searched.
        dir: PathBuf,
    },

    /// The manifest is neither UTF-8 nor BOM-marked UTF-16.
    #[error("Manifest {} is not UTF-8 or UTF-16 text", manifest.display())]
    ManifestEncoding {
        /// Path of the manifest.
        manifest: PathBuf,
    },

    /// The manifest has no `ModuleVersion` entry.
    #[error("ModuleVersion not found in manifest {}", manifest.display())]
    VersionMissing {
        /// Path of the manifest.
        manifest: PathBuf,
    },

    /// The target directory exists and `--force` was not given.
    #[error("Module exists: {}", path.display())]
    TargetExists {
        /// The existing target directory.
        path: PathBuf,
    },

    /// The source directory is not usable (missing, or has no name).
    #[error("Invalid module source directory: {}", path.display())]
    InvalidSource {
        /// The offending path.
        path: PathBuf,
    },

    /// An I/O error on a specific path.
    #[error("IO error on {}: {source}", path.display())]
    Io {
        /// Path being read or written.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// Directory traversal of the source tree failed.
    #[error("failed to walk source tree: {source}")]
    Walk {
        /// Underlying traversal error.
        #[from]
        source: walkdir::Error,
    },
}

impl InstallError {
    /// Shorthand for wrapping an [`std::io::Error`] with its path.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Errors raised by command handlers themselves.
#[derive(Error, Debug)]
pub enum CommandError {
    /// The command exists on the CLI but has no implementation.
    #[error("'{command}' is not implemented")]
    NotImplemented {
        /// Name of the command.
        command: String,
    },

    /// Neither `pwsh` nor `powershell` is on `PATH`.
    #[error("PowerShell not found on PATH (looked for pwsh, powershell)")]
    ShellNotFound,

    /// The test runner exited non-zero.
    #[error("tests failed (exit {code})")]
    TestsFailed {
        /// Exit code, or `-1` when terminated by a signal.
        code: i32,
    },
}
