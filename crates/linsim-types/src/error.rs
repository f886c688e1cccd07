//! Error types for linsim.

use std::io;

/// Errors produced by the simulated system.
///
/// Command-level variants format as the reason part of a shell diagnostic;
/// the interpreter prefixes them with the command name (`cat: x: No such
/// file or directory`).
#[derive(Debug, thiserror::Error)]
pub enum SimError {
    #[error("{0}: No such file or directory")]
    NotFound(String),

    #[error("cannot create directory '{0}': File exists")]
    AlreadyExists(String),

    #[error("{0}: Is a directory")]
    NotAFile(String),

    #[error("{0}: Not a directory")]
    NotADirectory(String),

    #[error("missing operand")]
    MissingOperand,

    /// Operand error with command-specific wording.
    #[error("{0}")]
    Usage(String),

    #[error("{0}: command not found")]
    UnknownCommand(String),

    #[error("{0}: Permission denied")]
    PermissionDenied(String),

    #[error("Unable to locate package {0}")]
    PackageNotFound(String),

    #[error("{0}")]
    InvalidArgument(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),
}

impl SimError {
    /// Whether this error belongs to the command-level taxonomy (rendered
    /// as `<cmd>: <reason>`) rather than an internal failure.
    pub fn is_command_error(&self) -> bool {
        !matches!(
            self,
            Self::Config(_) | Self::Io(_) | Self::TomlParse(_)
        )
    }
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, SimError>;
