//! Prelude module - common imports for cascade users
//!
//! ```rust
//! use cascade::prelude::*;
//! ```

pub use crate::{
    // Values
    ArgValue,
    // Declarations
    ArgumentSpec,
    Arguments,
    ErrorReport,
    FunctionDef,
    FunctionRegistry,
    GroupCheck,
    HostError,
    // Invocation
    InvocationOptions,
    InvocationResult,
    Operator,
    // Error types
    PipelineError,
    PipelineResult,
    RawArguments,
    ReportFormat,
    Rule,
    ValidationMessage,
    Value,
};
