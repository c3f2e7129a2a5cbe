//! kiln scaffolds projects from template trees driven by an instruction
//! script: it asks for variables, renders `.ftl` templates, reshapes the tree
//! and copies the result into the output directory.

/// Built-in validators and converters callable from scripts and templates
pub mod builtins;

/// Command-line interface module for the kiln application
pub mod cli;

/// Instruction script loading
/// Supports JSON and YAML formats (kiln.yaml, kiln.yml, kiln.json)
pub mod config;

/// Error types and handling for the kiln application
pub mod error;

/// Copies the staging tree into the output directory
pub mod finalizer;

/// Stage, interpret, publish
pub mod generator;

/// File and directory ignore patterns
/// Processes .kilnignore files to exclude paths from staging
pub mod ignore;

pub mod instruction;

/// Walks the instruction script
pub mod interpreter;

/// Template sources (local directories and git repositories)
pub mod loader;

pub mod logger;

/// Template rendering, moving, renaming and deleting inside the staging tree
pub mod operations;

/// Wildcard matching on staging-relative paths
pub mod pattern;

/// User input and interaction handling
pub mod prompt;

/// Template expansion backed by MiniJinja
pub mod renderer;

pub mod staging;

/// Variable environment shared by the interpreter and the renderer
pub mod variables;
