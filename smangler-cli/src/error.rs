//! Errors surfaced by the command line tool and their process exit codes.

use thiserror::Error;

pub const EXIT_ARGUMENTS: i32 = -1;
pub const EXIT_MISSING_DIRECTORY: i32 = -2;
pub const EXIT_SAME_DIRECTORY: i32 = -3;
pub const EXIT_INVALID_PATTERN: i32 = -4;
pub const EXIT_OPERATION: i32 = -5;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("{0}")]
    Arguments(String),

    #[error("the directory \"{0}\" does not exist")]
    MissingDirectory(String),

    #[error("the source and destination directories are the same")]
    SameDirectory,

    #[error("the specified name pattern is not valid: {0}")]
    InvalidPattern(String),

    #[error("{0}")]
    Operation(#[from] smangler::Error),
}

impl CliError {
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Arguments(_) => EXIT_ARGUMENTS,
            CliError::MissingDirectory(_) => EXIT_MISSING_DIRECTORY,
            CliError::SameDirectory => EXIT_SAME_DIRECTORY,
            CliError::InvalidPattern(_) => EXIT_INVALID_PATTERN,
            CliError::Operation(_) => EXIT_OPERATION,
        }
    }
}
