//! Error handling for the kiln application.
//! Defines custom error types and results used throughout the application.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Custom error types for kiln operations.
///
/// Every variant is fatal to a scaffolding run. Nothing that was already
/// applied to the staging tree is rolled back when one of these is returned.
#[derive(Error, Debug)]
pub enum Error {
    /// Represents errors that occur during file system operations
    #[error("IO error: {0}.")]
    IoError(#[from] io::Error),

    /// Represents errors raised while walking a directory tree
    #[error("Failed to walk directory: {0}.")]
    WalkError(#[from] walkdir::Error),

    /// Represents errors that occur during template expansion or file rendering
    #[error("Template error: {0}.")]
    MinijinjaError(#[from] minijinja::Error),

    /// Represents malformed wildcard patterns
    #[error("Invalid pattern: {0}.")]
    PatternError(#[from] globset::Error),

    #[error("Failed to clone template repository: {0}.")]
    Git2Error(#[from] git2::Error),

    #[error("Cannot rename '{path}' because it does not exist.")]
    FileNotFound { path: PathBuf },

    #[error("Cannot place a file at '{path}' because it already exists.")]
    TargetExists { path: PathBuf },

    #[error("Cannot move files into '{path}' because it is not a directory.")]
    InvalidTarget { path: PathBuf },

    #[error("Failed to copy '{path}': {source}.")]
    CopyError {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Unknown validator '{name}'.")]
    UnknownValidator { name: String },

    /// Represents validation failures of answers supplied up front
    #[error("Validation error: {0}.")]
    ValidationError(String),

    /// Represents errors that occur during configuration parsing or processing
    #[error("Configuration error: {0}.")]
    ConfigError(String),

    /// Represents failures while interacting with the terminal
    #[error("Prompt error: {0}.")]
    PromptError(String),

    #[error("Template does not exist: {template_dir}.")]
    TemplateDoesNotExistsError { template_dir: String },

    #[error("Output directory '{output_dir}' already exists. Use --force to overwrite it.")]
    OutputDirectoryExistsError { output_dir: String },
}

/// Convenience type alias for Results with kiln's Error as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Default error handler that prints the error and exits the program.
///
/// Instructions are applied in place, so a failed run can leave a partially
/// transformed tree behind. The message says so instead of hiding it.
pub fn default_error_handler(err: Error) {
    eprintln!("Generation failed: {err}");
    eprintln!("Partial files may remain from the failed run.");
    std::process::exit(1);
}
