//! Error handling for the testgen application.
//! Defines custom error types and results used throughout the application.

use std::io;
use thiserror::Error;

/// Custom error types for testgen operations.
///
/// Run-fatal variants (input, parsing) abort a generation run. The remaining
/// variants are caught per entity by the generator and recorded in that
/// entity's outcome.
#[derive(Error, Debug)]
pub enum Error {
    /// Represents errors that occur during file system operations
    #[error("IO error: {0}.")]
    IoError(#[from] io::Error),

    #[error("Input file '{path}' does not exist.")]
    InputNotFound { path: String },

    #[error("Input file '{path}' must have the .{expected} extension.")]
    InvalidInputExtension { path: String, expected: &'static str },

    /// The metadata document is not well-formed or lacks required attributes
    #[error("Malformed metadata document: {0}.")]
    MalformedDocument(String),

    #[error("No entity types found in the metadata document.")]
    NoEntitiesFound,

    /// Represents errors that occur while loading or saving the configuration
    #[error("Configuration error: {0}.")]
    ConfigError(String),

    #[error("Project '{project}' not found in the configuration.")]
    ProjectNotFound { project: String },

    #[error("Template '{template}' not found in project '{project}'.")]
    TemplateNotFound { template: String, project: String },

    /// The template targets a generator this tool does not provide
    #[error("Template '{template}' targets unsupported tool '{tool}'.")]
    UnsupportedTool { template: String, tool: String },

    /// Entity names become part of a file name and cannot leave its directory
    #[error("Entity name '{name}' cannot be used in a file name.")]
    InvalidEntityName { name: String },

    #[error("Template file for '{template}' does not exist: '{path}'.")]
    TemplateFileMissing { template: String, path: String },

    /// The completion service answered, but no usable text could be extracted
    #[error("The model returned no text for entity '{entity}'.")]
    EmptyGeneration { entity: String },

    /// Transport or status errors from the completion service
    #[error("HTTP error: {0}.")]
    HttpError(#[from] reqwest::Error),

    #[error("JSON error: {0}.")]
    JsonError(#[from] serde_json::Error),

    /// Represents errors that occur while rendering template skeletons
    #[error("Template rendering error: {0}.")]
    MinijinjaError(#[from] minijinja::Error),
}

/// Convenience type alias for Results with [`Error`] as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Default error handler that prints the error and exits the program.
///
/// # Arguments
/// * `err` - The error to handle
///
/// # Behavior
/// Prints the error message to stderr and exits with status code 1
pub fn default_error_handler(err: Error) {
    eprintln!("{}", err);
    std::process::exit(1);
}
