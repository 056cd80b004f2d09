//! Pipeline error types
//!
//! Validation failures are never errors: they travel through the pipeline
//! as [`ValidationMessage`](crate::ValidationMessage) data. These errors
//! cover malformed declarations, unknown functions, and faults raised by a
//! function's compute logic (which the pipeline intercepts).

use thiserror::Error;

/// Result type for pipeline operations
pub type PipelineResult<T> = std::result::Result<T, PipelineError>;

/// Errors that can occur while declaring, looking up or computing functions
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PipelineError {
    /// Function name does not follow the naming convention
    #[error("Invalid function name: {0}")]
    InvalidFunctionName(String),

    /// Argument name does not follow the naming convention
    #[error("Invalid argument name for {function}: {argument}")]
    InvalidArgumentName { function: String, argument: String },

    /// Two arguments share a name
    #[error("Duplicate argument for {function}: {argument}")]
    DuplicateArgument { function: String, argument: String },

    /// A required argument is declared after an optional one
    #[error("Required argument {argument} of {function} follows an optional argument")]
    RequiredAfterOptional { function: String, argument: String },

    /// A required argument declares a default value
    #[error("Required argument {argument} of {function} cannot have a default")]
    DefaultOnRequired { function: String, argument: String },

    /// A rule is missing the bounds its operator needs
    #[error("Invalid rule on {argument}: {reason}")]
    InvalidRule { argument: String, reason: String },

    /// A group check names an argument that is not declared
    #[error("Unknown argument in group check for {function}: {argument}")]
    UnknownArgument { function: String, argument: String },

    /// Unknown function
    #[error("Unknown function: {0}")]
    UnknownFunction(String),

    /// Compute logic asked for an argument that has no value
    #[error("Argument {0} has no value")]
    MissingValue(String),

    /// Compute logic failed
    #[error("Evaluation error: {0}")]
    Evaluation(String),

    /// Value conversion failed
    #[error(transparent)]
    Value(#[from] cascade_core::Error),
}
