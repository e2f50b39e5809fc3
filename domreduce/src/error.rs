//! Error types for reduction operations

use std::fmt;

/// Errors that can occur while configuring or running a reduction pipeline
#[derive(Debug, Clone, PartialEq)]
pub enum ReduceError {
    /// A pipeline references a stage the registry does not know
    StageNotFound(String),
    /// A stage (or serialization) was requested before the document was parsed
    Unparsed(String),
    /// The serializer failed to render the tree
    SerializationError(String),
    /// A token counter could not be initialised
    Tokenizer(String),
}

impl ReduceError {
    /// Whether this error was raised while validating a pipeline configuration
    pub fn is_configuration_error(&self) -> bool {
        matches!(self, ReduceError::StageNotFound(_))
    }
}

impl fmt::Display for ReduceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReduceError::StageNotFound(name) => write!(f, "Stage '{name}' not found"),
            ReduceError::Unparsed(stage) => write!(
                f,
                "Cannot run '{stage}' on an unparsed document: run 'parse' first"
            ),
            ReduceError::SerializationError(msg) => write!(f, "Serialization error: {msg}"),
            ReduceError::Tokenizer(msg) => write!(f, "Tokenizer error: {msg}"),
        }
    }
}

impl std::error::Error for ReduceError {}
