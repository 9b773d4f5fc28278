//! Command error types using thiserror.

use optiplot_common::OptiplotError;
use std::path::PathBuf;

/// Errors a command can end with.
#[derive(thiserror::Error, Debug)]
pub enum CliError {
    /// Loading, validation, translation or rendering failed.
    #[error(transparent)]
    Optiplot(#[from] OptiplotError),

    /// Reading input or writing to the terminal failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// `init` would overwrite an existing definition.
    #[error("{} already exists, pass --force to overwrite it", .0.display())]
    AlreadyExists(PathBuf),

    /// Some charts of a render batch were not written.
    #[error("{failed} of {total} charts failed")]
    ChartsFailed {
        /// Charts that failed.
        failed: usize,
        /// Charts in the batch.
        total: usize,
    },
}

/// Result type for commands.
pub type CliResult<T> = Result<T, CliError>;
