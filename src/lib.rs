//! testgen reads an OData metadata document and asks a language model to
//! write one test file per declared entity, using prompt templates kept in
//! a per-user configuration directory.

/// Command-line interface module for the testgen application
pub mod cli;

/// Language-model completion clients
pub mod completion;

/// Project and template records, and the store they are read from
pub mod config;

/// Common constants
pub mod constants;

/// Error types and handling for the testgen application
pub mod error;

/// Extraction of plain text from completion responses
pub mod extract;

/// Generation orchestration: per-entity loop, overwrite policy, summary
pub mod generator;

/// Logger initialization
pub mod logger;

/// OData metadata parsing
pub mod metadata;

/// Rendering of the template skeletons written by `create-template`
pub mod renderer;

/// Prompt template lookup and placeholder substitution
pub mod resolver;

/// Config directory bootstrap and template registration
pub mod scaffold;
